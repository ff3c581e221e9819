pub mod camera;

pub use camera::{Camera, OPENGL_TO_WGPU_MATRIX};
