//! Viewer configuration
//!
//! [`ViewerConfig::default`] reproduces the stock viewer setup: the lights,
//! camera and object transform, and the model and skybox catalogs.

use std::path::PathBuf;

use cgmath::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct LightConfig {
    pub dir_light_direction: Vector3<f32>,
    pub dir_light_radiance: Vector3<f32>,
    pub point_light_position: Vector3<f32>,
    pub point_light_intensity: Vector3<f32>,
    pub spot_light_position: Vector3<f32>,
    pub spot_light_direction: Vector3<f32>,
    pub spot_light_intensity: Vector3<f32>,
    pub spot_light_falloff_start_deg: f32,
    pub spot_light_total_width_deg: f32,
    pub ambient_light: Vector3<f32>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            dir_light_direction: Vector3::new(0.0, 0.0, -1.0),
            dir_light_radiance: Vector3::new(0.6, 0.6, 0.6),
            point_light_position: Vector3::new(0.8, 0.0, 0.8),
            point_light_intensity: Vector3::new(0.5, 0.1, 0.1),
            spot_light_position: Vector3::new(0.0, 1.0, 0.0),
            spot_light_direction: Vector3::new(0.0, -1.0, 0.0),
            spot_light_intensity: Vector3::new(0.25, 0.25, 0.1),
            spot_light_falloff_start_deg: 30.0,
            spot_light_total_width_deg: 45.0,
            ambient_light: Vector3::new(0.2, 0.2, 0.2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl CameraConfig {
    pub fn aspect(&self) -> f32 {
        self.screen_width as f32 / self.screen_height.max(1) as f32
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 1.0, 5.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fovy_deg: 30.0,
            znear: 0.1,
            zfar: 1000.0,
            screen_width: 600,
            screen_height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub lights: LightConfig,
    pub camera: CameraConfig,
    pub object_scale: f32,
    pub object_rotation_y_deg: f32,
    pub light_move_speed: f32,
    pub skybox_rotation_speed: f32,
    /// Center and scale loaded meshes into the unit box
    pub normalize: bool,
    pub clear_color: [f64; 4],
    /// Model directories selectable by index
    pub models: Vec<PathBuf>,
    /// Skybox textures selectable by index
    pub skyboxes: Vec<PathBuf>,
    /// Directory holding the WGSL shaders; `None` runs without shaders
    pub shader_dir: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let models = [
            "Ferrari", "Forklift", "Gengar", "Ivysaur", "Koffing", "MagikarpF", "Rose", "Slowbro",
            "TexCube",
        ]
        .iter()
        .map(|name| PathBuf::from("../TestModels_HW3").join(name))
        .collect();

        let skyboxes = ["photostudio_02_2k.png", "sunflowers_2k.png", "veranda_2k.png"]
            .iter()
            .map(|name| PathBuf::from("../TestTextures_HW3").join(name))
            .collect();

        Self {
            lights: LightConfig::default(),
            camera: CameraConfig::default(),
            object_scale: 1.5,
            object_rotation_y_deg: 30.0,
            light_move_speed: 0.2,
            skybox_rotation_speed: 1.0,
            normalize: true,
            clear_color: [0.44, 0.57, 0.75, 1.0],
            models,
            skyboxes,
            shader_dir: None,
        }
    }
}
