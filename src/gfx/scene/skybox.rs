use std::path::Path;

use cgmath::{Deg, Matrix4};
use wgpu::util::DeviceExt;

use crate::gfx::geometry::generate_sphere;
use crate::gfx::rendering::gpu::GpuContext;
use crate::gfx::resources::{ImageTexture, TextureError};

use super::vertex::VertexPTN;

pub const DEFAULT_SLICES: u32 = 36;
pub const DEFAULT_STACKS: u32 = 18;
pub const DEFAULT_RADIUS: f32 = 50.0;

struct SkyboxBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl Drop for SkyboxBuffers {
    fn drop(&mut self) {
        self.index_buffer.destroy();
        self.vertex_buffer.destroy();
    }
}

/// Textured sphere surrounding the scene, rotatable about +y
pub struct Skybox {
    vertices: Vec<VertexPTN>,
    indices: Vec<u32>,
    texture: ImageTexture,
    rotation_y: f32,
    buffers: Option<SkyboxBuffers>,
}

impl Skybox {
    pub fn new(
        texture_path: impl AsRef<Path>,
        slices: u32,
        stacks: u32,
        radius: f32,
    ) -> Result<Self, TextureError> {
        let texture = ImageTexture::load(texture_path.as_ref())?;
        let sphere = generate_sphere(slices, stacks, radius);
        log::info!(
            "Skybox created from {} ({} triangles)",
            texture_path.as_ref().display(),
            sphere.triangle_count()
        );

        Ok(Self {
            vertices: sphere.to_vertices(),
            indices: sphere.indices,
            texture,
            rotation_y: 0.0,
            buffers: None,
        })
    }

    /// Skybox with the default sphere resolution and radius
    pub fn with_texture(texture_path: impl AsRef<Path>) -> Result<Self, TextureError> {
        Self::new(texture_path, DEFAULT_SLICES, DEFAULT_STACKS, DEFAULT_RADIUS)
    }

    pub fn vertices(&self) -> &[VertexPTN] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn texture(&self) -> &ImageTexture {
        &self.texture
    }

    /// Rotation about +y in degrees
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn rotate_left(&mut self, speed: f32) {
        self.rotation_y -= speed;
    }

    pub fn rotate_right(&mut self, speed: f32) {
        self.rotation_y += speed;
    }

    pub fn world_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_y(Deg(self.rotation_y))
    }

    pub fn is_uploaded(&self) -> bool {
        self.buffers.is_some()
    }

    pub fn vertex_buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffers.as_ref().map(|b| &b.vertex_buffer)
    }

    pub fn index_buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffers.as_ref().map(|b| &b.index_buffer)
    }

    pub fn create_buffers(&mut self, gpu: &GpuContext) {
        let device = gpu.device();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Skybox Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Skybox Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.texture.upload(gpu, wgpu::AddressMode::Repeat);
        self.buffers = Some(SkyboxBuffers {
            vertex_buffer,
            index_buffer,
        });
    }

    pub fn release_buffers(&mut self) {
        self.buffers = None;
        self.texture.release();
    }
}

impl std::fmt::Debug for Skybox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skybox")
            .field("texture", &self.texture)
            .field("vertices", &self.vertices.len())
            .field("rotation_y", &self.rotation_y)
            .field("uploaded", &self.buffers.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Vector4;

    fn write_png(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("sky.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_skybox_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let skybox = Skybox::with_texture(write_png(dir.path())).unwrap();

        assert_eq!(skybox.vertices().len(), 37 * 19);
        assert_eq!(skybox.indices().len(), 36 * 18 * 6);
        assert_eq!(skybox.texture().pixels().width, 4);
        assert!(!skybox.is_uploaded());
    }

    #[test]
    fn test_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let mut skybox = Skybox::with_texture(write_png(dir.path())).unwrap();

        skybox.rotate_right(1.0);
        skybox.rotate_right(1.0);
        skybox.rotate_left(0.5);
        assert_relative_eq!(skybox.rotation_y(), 1.5);

        skybox.rotate_left(91.5);
        let x_axis = skybox.world_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        // -90 degrees about +y maps +x onto +z
        assert_relative_eq!(x_axis.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_texture() {
        assert!(Skybox::with_texture("no/such/sky.png").is_err());
    }
}
