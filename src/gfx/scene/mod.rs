//! # Scene Module
//!
//! The data a frame is drawn from: the loaded mesh and its materials, the
//! three lights, the skybox and the commands that change them.
//!
//! ## Key Components
//!
//! - [`Scene`] - camera, lights, model and shaders of one loaded model
//! - [`TriangleMesh`] - deduplicated vertices split into per-material [`SubMesh`]es
//! - [`Light`] - directional, point or spot light
//! - [`Skybox`] - textured sphere around the scene
//! - [`Command`] - a single user interaction
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use tessera::config::ViewerConfig;
//! use tessera::gfx::scene::{Command, Scene};
//!
//! let config = ViewerConfig::default();
//! let scene = Scene::setup(&config, Path::new("Models/TexCube"), None)?;
//! scene.mesh().show_info();
//!
//! let command: Command = "move point left 0.2".parse()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod command;
pub mod light;
pub mod mesh;
pub mod object;
pub mod scene;
pub mod skybox;
pub mod vertex;

pub use command::{
    Command, DirectionPreset, LightTarget, LightingMode, ParseCommandError, PolygonMode,
    RotateDirection,
};
pub use light::{
    DirectionalLight, Light, LightError, LightKind, LightMarker, MoveDirection, PointLight,
    SpotLight,
};
pub use mesh::{DrawMesh, MeshBuffers, NormalizationInfo, SubMesh, TriangleMesh};
pub use object::{SceneLight, SceneObject};
pub use scene::{Scene, SceneError, SceneLights};
pub use skybox::Skybox;
pub use vertex::{VertexP, VertexPTN};
