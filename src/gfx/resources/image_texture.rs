//! Decoded images and the textures built from them.

use std::path::{Path, PathBuf};

use crate::gfx::rendering::gpu::GpuContext;

use super::texture_resource::TextureResource;

#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to decode image `{path}`: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded RGBA8 pixels, row-major, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let mut texel = [0u8; 4];
        texel.copy_from_slice(&self.data[offset..offset + 4]);
        Some(texel)
    }
}

/// Decodes an image file into RGBA8 pixels.
pub fn load_image(path: &Path) -> Result<PixelBuffer, TextureError> {
    let image = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PixelBuffer {
        width,
        height,
        data: rgba.into_raw(),
    })
}

/// An image loaded from disk, plus its GPU texture once uploaded
pub struct ImageTexture {
    path: PathBuf,
    pixels: PixelBuffer,
    gpu: Option<TextureResource>,
}

impl ImageTexture {
    /// Loads and decodes the image eagerly.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, TextureError> {
        let path = path.into();
        let pixels = load_image(&path)?;
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            pixels.width,
            pixels.height
        );

        Ok(Self {
            path,
            pixels,
            gpu: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// The GPU texture, if [`upload`](Self::upload) has run
    pub fn resource(&self) -> Option<&TextureResource> {
        self.gpu.as_ref()
    }

    /// Creates the GPU texture. Uploading twice replaces the previous texture.
    pub fn upload(&mut self, gpu: &GpuContext, address_mode: wgpu::AddressMode) {
        let label = self.path.display().to_string();
        self.gpu = Some(TextureResource::create_from_pixels_with_filter(
            gpu.device(),
            gpu.queue(),
            &self.pixels,
            &label,
            address_mode,
            wgpu::FilterMode::Linear,
        ));
    }

    /// Releases the GPU texture, keeping the decoded pixels.
    pub fn release(&mut self) {
        self.gpu = None;
    }
}

impl std::fmt::Debug for ImageTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageTexture")
            .field("path", &self.path)
            .field("width", &self.pixels.width)
            .field("height", &self.pixels.height)
            .field("uploaded", &self.gpu.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.png");
        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let texture = ImageTexture::load(&path).unwrap();
        assert_eq!(texture.pixels().width, 2);
        assert_eq!(texture.pixels().height, 2);
        assert_eq!(texture.pixels().texel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(texture.pixels().texel(2, 0), None);
        assert!(!texture.is_uploaded());
    }

    #[test]
    fn test_missing_image() {
        let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.png"));
    }
}
