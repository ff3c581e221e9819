//! # Resources
//!
//! Materials, decoded images and their GPU textures.
//!
//! - [`material`] - Phong materials and the [`MaterialLibrary`] arena
//! - [`image_texture`] - image decoding and [`ImageTexture`]
//! - [`texture_resource`] - wgpu texture, view and sampler

pub mod image_texture;
pub mod material;
pub mod texture_resource;

pub use image_texture::{load_image, ImageTexture, PixelBuffer, TextureError};
pub use material::{MaterialId, MaterialLibrary, MaterialUniform, PhongMaterial};
pub use texture_resource::TextureResource;
