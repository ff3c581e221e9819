use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

use super::light::Light;
use super::mesh::TriangleMesh;

/// The loaded mesh placed in the world
#[derive(Debug)]
pub struct SceneObject {
    pub mesh: TriangleMesh,
    pub world_matrix: Matrix4<f32>,
    scale: f32,
    rotation_y: f32,
}

impl SceneObject {
    pub fn new(mesh: TriangleMesh, scale: f32, rotation_y_deg: f32) -> Self {
        let mut object = Self {
            mesh,
            world_matrix: Matrix4::identity(),
            scale,
            rotation_y: rotation_y_deg,
        };
        object.update_world_matrix();
        object
    }

    /// Rotation about +y in degrees
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn set_rotation_y(&mut self, degrees: f32) {
        self.rotation_y = degrees;
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// world = S * R_y
    pub fn update_world_matrix(&mut self) -> Matrix4<f32> {
        let s = Matrix4::from_scale(self.scale);
        let r = Matrix4::from_angle_y(Deg(self.rotation_y));
        self.world_matrix = s * r;
        self.world_matrix
    }
}

/// A light placed in the world, with the color its marker is drawn in
#[derive(Debug)]
pub struct SceneLight {
    pub light: Light,
    pub world_matrix: Matrix4<f32>,
    pub vis_color: Vector3<f32>,
}

impl SceneLight {
    pub fn new(light: Light) -> Self {
        let vis_color = light.visualization_color();
        let mut scene_light = Self {
            light,
            world_matrix: Matrix4::identity(),
            vis_color,
        };
        scene_light.update_world_matrix();
        scene_light
    }

    /// Translation to the light position; identity for directional lights.
    pub fn update_world_matrix(&mut self) -> Matrix4<f32> {
        self.world_matrix = match self.light.position() {
            Some(position) => Matrix4::from_translation(position),
            None => Matrix4::identity(),
        };
        self.world_matrix
    }
}
