//! # Tessera Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use tessera::prelude::*;
//!
//! let mut app = tessera::default();
//! app.dispatch(Command::SelectModel(8))?;
//! app.dispatch("move spot up".parse()?)?;
//! let frame = app.frame();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export core application types
pub use crate::app::{Flow, ViewerApp, ViewerError};
pub use crate::config::ViewerConfig;
pub use crate::default;

// Re-export graphics and scene types
pub use crate::gfx::camera::Camera;
pub use crate::gfx::loader::LoadError;
pub use crate::gfx::rendering::{FrameUniforms, GpuContext, ShaderLibrary};
pub use crate::gfx::resources::{MaterialId, MaterialLibrary, PhongMaterial};
pub use crate::gfx::scene::{
    Command, DirectionPreset, Light, LightTarget, LightingMode, MoveDirection, PolygonMode,
    RotateDirection, Scene, Skybox, SubMesh, TriangleMesh,
};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
