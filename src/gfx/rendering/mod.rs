//! GPU-facing side of the viewer
//!
//! Device creation, shader loading and the per-frame uniform records handed
//! to the render pass.

pub mod frame;
pub mod gpu;
pub mod shaders;

pub use frame::{
    build_frame, FillColorUniform, FrameInputs, FrameUniforms, LightMarkerDraw,
    PhongFrameUniform, SkyboxDraw, SkyboxUniform, SubMeshDraw,
};
pub use gpu::{GpuContext, GpuError};
pub use shaders::{Shader, ShaderLibrary, ShaderProgram};
