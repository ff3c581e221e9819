//! # Graphics Module
//!
//! Everything between the model files on disk and the uniform data a render
//! pass consumes.
//!
//! ## Architecture Overview
//!
//! - **Loading** ([`loader`]) - Wavefront `.obj` / `.mtl` parsers
//! - **Resources** ([`resources`]) - Phong materials, images and GPU textures
//! - **Geometry** ([`geometry`]) - generated spheres and bounding boxes
//! - **Scene** ([`scene`]) - meshes, lights, skybox and commands
//! - **Camera** ([`camera`]) - look-at view and perspective projection
//! - **Rendering** ([`rendering`]) - GPU context, shaders and frame uniforms
//!
//! Windowing and pipeline state are left to the embedding application.

pub mod camera;
pub mod geometry;
pub mod loader;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::Camera;
pub use loader::LoadError;
pub use rendering::{FrameUniforms, GpuContext};
pub use scene::{Scene, TriangleMesh};
