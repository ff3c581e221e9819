use std::path::Path;

use crate::config::ViewerConfig;
use crate::gfx::camera::Camera;
use crate::gfx::loader::LoadError;
use crate::gfx::rendering::frame::{build_frame, FrameInputs, FrameUniforms};
use crate::gfx::rendering::gpu::GpuContext;
use crate::gfx::rendering::shaders::ShaderLibrary;

use super::command::{DirectionPreset, LightTarget, LightingMode};
use super::light::{DirectionalLight, LightError, MoveDirection, PointLight, SpotLight};
use super::mesh::TriangleMesh;
use super::object::{SceneLight, SceneObject};
use super::skybox::Skybox;

#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Light(#[from] LightError),
}

#[derive(Debug)]
pub struct SceneLights {
    pub directional: DirectionalLight,
    pub point: SceneLight,
    pub spot: SceneLight,
}

impl SceneLights {
    fn from_config(config: &ViewerConfig) -> Result<Self, LightError> {
        let c = &config.lights;
        let directional = DirectionalLight::new(c.dir_light_direction, c.dir_light_radiance)?;
        let point = PointLight::new(c.point_light_position, c.point_light_intensity);
        let spot = SpotLight::new(
            c.spot_light_position,
            c.spot_light_intensity,
            c.spot_light_direction,
            c.spot_light_falloff_start_deg,
            c.spot_light_total_width_deg,
        )?;

        Ok(Self {
            directional,
            point: SceneLight::new(point.into()),
            spot: SceneLight::new(spot.into()),
        })
    }

    pub fn get(&self, target: LightTarget) -> &SceneLight {
        match target {
            LightTarget::Point => &self.point,
            LightTarget::Spot => &self.spot,
        }
    }

    pub fn get_mut(&mut self, target: LightTarget) -> &mut SceneLight {
        match target {
            LightTarget::Point => &mut self.point,
            LightTarget::Spot => &mut self.spot,
        }
    }

    fn create_buffers(&mut self, gpu: &GpuContext) {
        for light in [&mut self.point, &mut self.spot] {
            if let Some(marker) = light.light.marker_mut() {
                marker.create_buffer(gpu);
            }
        }
    }

    fn release_buffers(&mut self) {
        for light in [&mut self.point, &mut self.spot] {
            if let Some(marker) = light.light.marker_mut() {
                marker.release();
            }
        }
    }
}

/// Everything needed to draw one model
///
/// Fields are declared in release order (mesh, lights, camera, shaders), so
/// dropping a `Scene` releases its parts the same way
/// [`release_resources`](Self::release_resources) does.
#[derive(Debug)]
pub struct Scene {
    object: SceneObject,
    lights: SceneLights,
    camera: Camera,
    shaders: ShaderLibrary,
    ambient_light: cgmath::Vector3<f32>,
}

impl Scene {
    /// Builds a scene around the model in `model_dir`.
    ///
    /// Creation order is camera, lights, mesh (plus GPU buffers when `gpu` is
    /// given), then shaders.
    pub fn setup(
        config: &ViewerConfig,
        model_dir: &Path,
        gpu: Option<&GpuContext>,
    ) -> Result<Self, SceneError> {
        let c = &config.camera;
        let mut camera = Camera::new(c.aspect());
        camera.update_view(c.position, c.target, c.up);
        camera.update_projection(c.fovy_deg, c.aspect(), c.znear, c.zfar);

        let mut lights = SceneLights::from_config(config)?;

        let mut mesh = TriangleMesh::load_from_file(model_dir, config.normalize)?;
        mesh.show_info();
        if let Some(gpu) = gpu {
            mesh.create_buffers(gpu);
            lights.create_buffers(gpu);
        }
        let object = SceneObject::new(mesh, config.object_scale, config.object_rotation_y_deg);

        let shaders = match &config.shader_dir {
            Some(dir) => ShaderLibrary::load(dir, gpu)?,
            None => ShaderLibrary::empty(),
        };

        Ok(Self {
            object,
            lights,
            camera,
            shaders,
            ambient_light: config.lights.ambient_light,
        })
    }

    pub fn object(&self) -> &SceneObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut SceneObject {
        &mut self.object
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.object.mesh
    }

    pub fn lights(&self) -> &SceneLights {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn shaders(&self) -> &ShaderLibrary {
        &self.shaders
    }

    pub fn ambient_light(&self) -> cgmath::Vector3<f32> {
        self.ambient_light
    }

    pub fn set_light_direction(&mut self, preset: DirectionPreset) -> Result<(), LightError> {
        self.lights.directional.set_direction(preset.vector())?;
        log::debug!(
            "Directional light set to {} {:?}",
            preset.name(),
            self.lights.directional.direction()
        );
        Ok(())
    }

    pub fn move_light(&mut self, target: LightTarget, direction: MoveDirection, speed: f32) {
        let light = self.lights.get_mut(target);
        light.light.move_by(direction, speed);
        light.update_world_matrix();
    }

    /// Adapts the projection to a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.camera.set_aspect(width as f32 / height as f32);
    }

    /// Per-frame uniforms for the current state.
    pub fn frame(&self, lighting_mode: LightingMode, skybox: Option<&Skybox>) -> FrameUniforms {
        build_frame(&FrameInputs {
            camera: &self.camera,
            object: Some(&self.object),
            directional: Some(&self.lights.directional),
            point: Some(&self.lights.point),
            spot: Some(&self.lights.spot),
            ambient_light: self.ambient_light,
            lighting_mode,
            skybox,
        })
    }

    /// Releases GPU state part by part: mesh buffers, light markers, then
    /// shaders. The camera holds no GPU state.
    ///
    /// The scene stays usable for CPU queries afterwards and a second call
    /// does nothing.
    pub fn release_resources(&mut self) {
        self.object.mesh.release_buffers();
        log::debug!("Released mesh {}", self.object.mesh.name());

        self.lights.release_buffers();
        log::debug!("Released light markers");

        self.shaders.release();
        log::debug!("Released shaders");

        log::info!("Scene resources released");
    }
}
