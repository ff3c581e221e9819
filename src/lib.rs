// src/lib.rs
//! Tessera
//!
//! Core of a Phong-shaded model viewer: Wavefront OBJ/MTL loading, a
//! directional/point/spot light model, a skybox, and per-frame uniform data
//! for a wgpu render pass. Windowing is left to the embedding application;
//! user input reaches the viewer as [`Command`](gfx::scene::Command)s.

pub mod app;
pub mod config;
pub mod gfx;
pub mod prelude;

// Re-export main types for convenience
pub use app::{Flow, ViewerApp, ViewerError};
pub use config::ViewerConfig;

/// Creates a viewer with the default configuration and no GPU
pub fn default() -> ViewerApp {
    ViewerApp::new(ViewerConfig::default(), None)
}
