//! Per-frame uniform data
//!
//! [`FrameUniforms`] holds everything the render pass needs for one frame:
//! the Phong uniform block shared by all submeshes, one material record per
//! submesh, the light marker transforms and the skybox transform. The layouts
//! match the uniform blocks in `shaders/*.wgsl`.

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector3};

use crate::gfx::camera::Camera;
use crate::gfx::resources::MaterialUniform;
use crate::gfx::scene::command::LightingMode;
use crate::gfx::scene::light::{DirectionalLight, Light, PointLight, SpotLight};
use crate::gfx::scene::mesh::TriangleMesh;
use crate::gfx::scene::object::{SceneLight, SceneObject};
use crate::gfx::scene::skybox::Skybox;

/// Texture unit the diffuse map is bound to
pub const MAP_KD_TEXTURE_UNIT: u32 = 0;

fn mat4(m: Matrix4<f32>) -> [[f32; 4]; 4] {
    m.into()
}

fn vec3(v: Vector3<f32>) -> [f32; 3] {
    v.into()
}

/// Uniform block of `phong_shading.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PhongFrameUniform {
    pub world: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub mvp: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub lighting_mode: u32,
    pub dir_light_direction: [f32; 3],
    _padding0: f32,
    pub dir_light_radiance: [f32; 3],
    _padding1: f32,
    pub point_light_position: [f32; 3],
    _padding2: f32,
    pub point_light_intensity: [f32; 3],
    _padding3: f32,
    pub spot_light_position: [f32; 3],
    pub spot_light_total_width: f32,
    pub spot_light_intensity: [f32; 3],
    pub spot_light_falloff_start: f32,
    pub spot_light_direction: [f32; 3],
    pub cos_spot_light_total_width: f32,
    pub ambient_light: [f32; 3],
    pub cos_spot_light_falloff_start: f32,
}

impl PhongFrameUniform {
    pub fn set_directional(&mut self, light: &DirectionalLight) {
        self.dir_light_direction = vec3(light.direction());
        self.dir_light_radiance = vec3(light.radiance());
    }

    pub fn set_point(&mut self, light: &PointLight) {
        self.point_light_position = vec3(light.position());
        self.point_light_intensity = vec3(light.intensity());
    }

    pub fn set_spot(&mut self, light: &SpotLight) {
        self.spot_light_position = vec3(light.position());
        self.spot_light_intensity = vec3(light.intensity());
        self.spot_light_direction = vec3(light.direction());
        self.spot_light_total_width = light.total_width_deg();
        self.spot_light_falloff_start = light.falloff_start_deg();
        self.cos_spot_light_total_width = light.cos_total_width();
        self.cos_spot_light_falloff_start = light.cos_falloff_start();
    }
}

/// Uniform block of `fixed_color.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FillColorUniform {
    pub mvp: [[f32; 4]; 4],
    pub fill_color: [f32; 3],
    _padding: f32,
}

/// Uniform block of `skybox.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyboxUniform {
    pub mvp: [[f32; 4]; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubMeshDraw {
    pub submesh: usize,
    pub index_count: u32,
    pub material: MaterialUniform,
    /// Set when the material has a diffuse texture
    pub texture_unit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightMarkerDraw {
    pub world: Matrix4<f32>,
    pub uniform: FillColorUniform,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyboxDraw {
    pub world: Matrix4<f32>,
    pub view_projection: Matrix4<f32>,
    pub uniform: SkyboxUniform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    pub phong: PhongFrameUniform,
    pub submeshes: Vec<SubMeshDraw>,
    pub light_markers: Vec<LightMarkerDraw>,
    pub skybox: Option<SkyboxDraw>,
}

/// Scene state a frame is built from
pub struct FrameInputs<'a> {
    pub camera: &'a Camera,
    pub object: Option<&'a SceneObject>,
    pub directional: Option<&'a DirectionalLight>,
    pub point: Option<&'a SceneLight>,
    pub spot: Option<&'a SceneLight>,
    pub ambient_light: Vector3<f32>,
    pub lighting_mode: LightingMode,
    pub skybox: Option<&'a Skybox>,
}

/// normal matrix = transpose(inverse(view * world)); identity if singular
pub fn normal_matrix(view: Matrix4<f32>, world: Matrix4<f32>) -> Matrix4<f32> {
    (view * world)
        .invert()
        .map(|inv| inv.transpose())
        .unwrap_or_else(Matrix4::identity)
}

fn submesh_draws(mesh: &TriangleMesh) -> Vec<SubMeshDraw> {
    mesh.submeshes()
        .iter()
        .enumerate()
        .map(|(i, submesh)| {
            let material = mesh.material_of(submesh);
            SubMeshDraw {
                submesh: i,
                index_count: submesh.indices().len() as u32,
                material: material.map(|m| m.uniform()).unwrap_or_default(),
                texture_unit: material
                    .filter(|m| m.has_texture())
                    .map(|_| MAP_KD_TEXTURE_UNIT),
            }
        })
        .collect()
}

fn marker_draw(light: &SceneLight, view_projection: Matrix4<f32>) -> LightMarkerDraw {
    LightMarkerDraw {
        world: light.world_matrix,
        uniform: FillColorUniform {
            mvp: mat4(view_projection * light.world_matrix),
            fill_color: vec3(light.vis_color),
            _padding: 0.0,
        },
    }
}

/// Assembles the uniforms for one frame.
///
/// The world matrices of `inputs` must already be up to date.
pub fn build_frame(inputs: &FrameInputs) -> FrameUniforms {
    let view = inputs.camera.view_matrix();
    let projection = inputs.camera.projection_matrix();
    let view_projection = projection * view;

    let mut phong = PhongFrameUniform {
        camera_position: vec3(inputs.camera.position()),
        ambient_light: vec3(inputs.ambient_light),
        lighting_mode: inputs.lighting_mode.index(),
        ..Default::default()
    };

    let mut submeshes = Vec::new();
    if let Some(object) = inputs.object {
        let world = object.world_matrix;
        phong.world = mat4(world);
        phong.normal_matrix = mat4(normal_matrix(view, world));
        phong.mvp = mat4(view_projection * world);
        submeshes = submesh_draws(&object.mesh);
    }

    if let Some(light) = inputs.directional {
        phong.set_directional(light);
    }

    let mut light_markers = Vec::new();
    for scene_light in [inputs.point, inputs.spot].into_iter().flatten() {
        match &scene_light.light {
            Light::Point(point) => phong.set_point(point),
            Light::Spot(spot) => phong.set_spot(spot),
            Light::Directional(directional) => phong.set_directional(directional),
        }
        if scene_light.light.marker().is_some() {
            light_markers.push(marker_draw(scene_light, view_projection));
        }
    }

    let skybox = inputs.skybox.map(|skybox| {
        let world = skybox.world_matrix();
        SkyboxDraw {
            world,
            view_projection,
            uniform: SkyboxUniform {
                mvp: mat4(view_projection * world),
            },
        }
    });

    FrameUniforms {
        phong,
        submeshes,
        light_markers,
        skybox,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<PhongFrameUniform>(), 336);
        assert_eq!(std::mem::size_of::<FillColorUniform>(), 80);
        assert_eq!(std::mem::size_of::<SkyboxUniform>(), 64);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let rotation = Matrix4::from_angle_y(cgmath::Deg(30.0));
        let normal = normal_matrix(Matrix4::identity(), rotation);
        for c in 0..4 {
            for r in 0..4 {
                assert_relative_eq!(normal[c][r], rotation[c][r], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_frame_without_object() {
        let camera = Camera::new(1.0);
        let inputs = FrameInputs {
            camera: &camera,
            object: None,
            directional: None,
            point: None,
            spot: None,
            ambient_light: Vector3::new(0.2, 0.2, 0.2),
            lighting_mode: LightingMode::new(2),
            skybox: None,
        };

        let frame = build_frame(&inputs);
        assert!(frame.submeshes.is_empty());
        assert!(frame.light_markers.is_empty());
        assert!(frame.skybox.is_none());
        assert_eq!(frame.phong.lighting_mode, 2);
        assert_eq!(frame.phong.camera_position, [0.0, 1.0, 5.0]);
    }
}
