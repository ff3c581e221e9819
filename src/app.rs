use std::path::{Path, PathBuf};

use crate::config::ViewerConfig;
use crate::gfx::rendering::{FrameUniforms, GpuContext};
use crate::gfx::resources::TextureError;
use crate::gfx::scene::{
    Command, LightError, LightingMode, PolygonMode, RotateDirection, Scene, SceneError, Skybox,
};

#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    #[error("Model index {index} out of range ({available} models)")]
    UnknownModel { index: usize, available: usize },
    #[error("Skybox index {index} out of range ({available} skyboxes)")]
    UnknownSkybox { index: usize, available: usize },
    #[error("No model loaded")]
    NoScene,
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("Failed to load skybox: {0}")]
    Skybox(#[from] TextureError),
    #[error(transparent)]
    Light(#[from] LightError),
}

/// What the driver should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Viewer state driven by [`Command`]s
///
/// Owns the current scene, the skybox (kept across model switches) and the
/// optional GPU context. The GPU context is declared last so it outlives every
/// buffer created from it.
pub struct ViewerApp {
    config: ViewerConfig,
    scene: Option<Scene>,
    skybox: Option<Skybox>,
    lighting_mode: LightingMode,
    polygon_mode: PolygonMode,
    model_path: Option<PathBuf>,
    running: bool,
    gpu: Option<GpuContext>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig, gpu: Option<GpuContext>) -> Self {
        Self {
            config,
            scene: None,
            skybox: None,
            lighting_mode: LightingMode::default(),
            polygon_mode: PolygonMode::default(),
            model_path: None,
            running: true,
            gpu,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn skybox(&self) -> Option<&Skybox> {
        self.skybox.as_ref()
    }

    pub fn gpu(&self) -> Option<&GpuContext> {
        self.gpu.as_ref()
    }

    pub fn lighting_mode(&self) -> LightingMode {
        self.lighting_mode
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    /// Directory of the model currently shown
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Switches to the model in `model_dir`.
    ///
    /// The new scene is built before the old one is released; if loading
    /// fails the current scene stays.
    pub fn load_model(&mut self, model_dir: &Path) -> Result<(), ViewerError> {
        let scene = match Scene::setup(&self.config, model_dir, self.gpu.as_ref()) {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("Failed to load {}: {}", model_dir.display(), err);
                return Err(err.into());
            }
        };

        if let Some(mut old) = self.scene.replace(scene) {
            old.release_resources();
        }
        self.model_path = Some(model_dir.to_path_buf());
        log::info!("Showing {}", model_dir.display());
        Ok(())
    }

    /// Replaces the skybox; the rotation starts over.
    pub fn load_skybox(&mut self, texture_path: &Path) -> Result<(), ViewerError> {
        let mut skybox = match Skybox::with_texture(texture_path) {
            Ok(skybox) => skybox,
            Err(err) => {
                log::error!("Failed to load skybox {}: {}", texture_path.display(), err);
                return Err(err.into());
            }
        };
        if let Some(gpu) = &self.gpu {
            skybox.create_buffers(gpu);
        }
        self.skybox = Some(skybox);
        Ok(())
    }

    fn scene_mut(&mut self) -> Result<&mut Scene, ViewerError> {
        self.scene.as_mut().ok_or(ViewerError::NoScene)
    }

    /// Applies one command.
    pub fn dispatch(&mut self, command: Command) -> Result<Flow, ViewerError> {
        log::debug!("Command: {}", command);

        match command {
            Command::SelectModel(index) => {
                let path = self
                    .config
                    .models
                    .get(index)
                    .cloned()
                    .ok_or(ViewerError::UnknownModel {
                        index,
                        available: self.config.models.len(),
                    })?;
                self.load_model(&path)?;
            }
            Command::SelectSkybox(index) => {
                let path = self
                    .config
                    .skyboxes
                    .get(index)
                    .cloned()
                    .ok_or(ViewerError::UnknownSkybox {
                        index,
                        available: self.config.skyboxes.len(),
                    })?;
                self.load_skybox(&path)?;
            }
            Command::SetLightDirection(preset) => {
                self.scene_mut()?.set_light_direction(preset)?;
            }
            Command::MoveLight {
                target,
                direction,
                speed,
            } => {
                self.scene_mut()?.move_light(target, direction, speed);
            }
            Command::RotateSkybox { direction, speed } => match self.skybox.as_mut() {
                Some(skybox) => match direction {
                    RotateDirection::Left => skybox.rotate_left(speed),
                    RotateDirection::Right => skybox.rotate_right(speed),
                },
                None => log::debug!("No skybox to rotate"),
            },
            Command::CycleLightingMode => {
                self.lighting_mode = self.lighting_mode.next();
                log::info!("Lighting mode: {}", self.lighting_mode.name());
            }
            Command::SetPolygonMode(mode) => {
                self.polygon_mode = mode;
                log::info!("Polygon mode: {:?}", mode);
            }
            Command::CyclePolygonMode => {
                self.polygon_mode = self.polygon_mode.next();
                log::info!("Polygon mode: {:?}", self.polygon_mode);
            }
            Command::Resize { width, height } => {
                self.config.camera.screen_width = width;
                self.config.camera.screen_height = height;
                if let Some(scene) = self.scene.as_mut() {
                    scene.resize(width, height);
                }
            }
            Command::Quit => {
                self.release_resources();
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    /// Uniforms for the next frame, `None` until a model is loaded
    pub fn frame(&self) -> Option<FrameUniforms> {
        self.scene
            .as_ref()
            .map(|scene| scene.frame(self.lighting_mode, self.skybox.as_ref()))
    }

    /// Releases the scene, then the skybox.
    pub fn release_resources(&mut self) {
        if let Some(mut scene) = self.scene.take() {
            scene.release_resources();
        }
        self.skybox = None;
        self.model_path = None;
        self.running = false;
        log::info!("Resource releasing finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::DirectionPreset;

    #[test]
    fn test_commands_without_scene() {
        let mut app = ViewerApp::new(ViewerConfig::default(), None);

        assert!(matches!(
            app.dispatch(Command::SetLightDirection(DirectionPreset::Top)),
            Err(ViewerError::NoScene)
        ));
        assert!(app.frame().is_none());

        assert_eq!(app.dispatch(Command::CycleLightingMode).unwrap(), Flow::Continue);
        assert_eq!(app.lighting_mode().index(), 1);

        assert_eq!(app.dispatch(Command::Quit).unwrap(), Flow::Exit);
        assert!(!app.is_running());
    }

    #[test]
    fn test_out_of_range_selection() {
        let mut app = ViewerApp::new(ViewerConfig::default(), None);

        assert!(matches!(
            app.dispatch(Command::SelectModel(9)),
            Err(ViewerError::UnknownModel {
                index: 9,
                available: 9
            })
        ));
        assert!(matches!(
            app.dispatch(Command::SelectSkybox(3)),
            Err(ViewerError::UnknownSkybox { index: 3, .. })
        ));
        assert!(app.scene().is_none());
        assert!(app.skybox().is_none());
    }

    #[test]
    fn test_polygon_modes() {
        let mut app = ViewerApp::new(ViewerConfig::default(), None);
        assert_eq!(app.polygon_mode(), PolygonMode::Fill);

        app.dispatch(Command::CyclePolygonMode).unwrap();
        assert_eq!(app.polygon_mode(), PolygonMode::Point);
        app.dispatch(Command::SetPolygonMode(PolygonMode::Line)).unwrap();
        assert_eq!(app.polygon_mode(), PolygonMode::Line);
    }
}
