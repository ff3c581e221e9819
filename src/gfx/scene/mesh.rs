use std::ops::Range;
use std::path::Path;

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::gfx::loader::{self, LoadError};
use crate::gfx::rendering::gpu::GpuContext;
use crate::gfx::resources::{MaterialId, MaterialLibrary, PhongMaterial};

use super::vertex::VertexPTN;

/// Triangles drawn with a single material
#[derive(Debug, Clone, PartialEq)]
pub struct SubMesh {
    indices: Vec<u32>,
    material: MaterialId,
}

impl SubMesh {
    pub fn new(material: MaterialId) -> Self {
        Self {
            indices: Vec::new(),
            material,
        }
    }

    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        self.indices.extend_from_slice(&triangle);
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// How a mesh was moved into the unit box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationInfo {
    /// Bounding box center in file coordinates
    pub center: Vector3<f32>,
    /// Per-axis extent divided by the longest one
    pub extent: Vector3<f32>,
}

/// GPU copies of the vertex list and of each submesh's index list
pub struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffers: Vec<wgpu::Buffer>,
}

impl MeshBuffers {
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self, submesh: usize) -> Option<&wgpu::Buffer> {
        self.index_buffers.get(submesh)
    }
}

impl Drop for MeshBuffers {
    fn drop(&mut self) {
        for buffer in &self.index_buffers {
            buffer.destroy();
        }
        self.vertex_buffer.destroy();
    }
}

/// A triangle mesh split into per-material submeshes
///
/// All submeshes index into the same deduplicated vertex list. The mesh owns
/// its material library, so every [`MaterialId`] held by a submesh resolves
/// for the lifetime of the mesh.
pub struct TriangleMesh {
    name: String,
    vertices: Vec<VertexPTN>,
    submeshes: Vec<SubMesh>,
    materials: MaterialLibrary,
    num_triangles: usize,
    normalization: Option<NormalizationInfo>,
    buffers: Option<MeshBuffers>,
}

impl TriangleMesh {
    pub(crate) fn new(
        name: String,
        vertices: Vec<VertexPTN>,
        submeshes: Vec<SubMesh>,
        materials: MaterialLibrary,
        num_triangles: usize,
        normalization: Option<NormalizationInfo>,
    ) -> Self {
        Self {
            name,
            vertices,
            submeshes,
            materials,
            num_triangles,
            normalization,
            buffers: None,
        }
    }

    /// Loads `<model_dir>/<name>.obj` together with its materials and textures.
    ///
    /// With `normalize` set, the mesh is centered on the origin and its longest
    /// axis scaled to length 1.
    pub fn load_from_file(model_dir: impl AsRef<Path>, normalize: bool) -> Result<Self, LoadError> {
        loader::parse_obj(model_dir.as_ref(), normalize)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[VertexPTN] {
        &self.vertices
    }

    pub fn submeshes(&self) -> &[SubMesh] {
        &self.submeshes
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    /// Material bound to a submesh
    pub fn material_of(&self, submesh: &SubMesh) -> Option<&PhongMaterial> {
        self.materials.get(submesh.material())
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    pub fn normalization(&self) -> Option<&NormalizationInfo> {
        self.normalization.as_ref()
    }

    /// Bounding box center before normalization, zero when not normalized
    pub fn center(&self) -> Vector3<f32> {
        self.normalization
            .map(|n| n.center)
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }

    /// Normalized per-axis extent, zero when not normalized
    pub fn extent(&self) -> Vector3<f32> {
        self.normalization
            .map(|n| n.extent)
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0))
    }

    /// Logs a summary of the mesh.
    pub fn show_info(&self) {
        log::info!("Mesh '{}'", self.name);
        log::info!("  vertices:  {}", self.num_vertices());
        log::info!("  triangles: {}", self.num_triangles());
        log::info!("  submeshes: {}", self.submeshes.len());
        for (i, submesh) in self.submeshes.iter().enumerate() {
            let material = self.material_of(submesh).map(|m| m.name()).unwrap_or("?");
            log::info!(
                "    [{}] material '{}', {} triangles",
                i,
                material,
                submesh.num_triangles()
            );
        }
        match &self.normalization {
            Some(info) => {
                log::info!("  center: {:?}", info.center);
                log::info!("  extent: {:?}", info.extent);
            }
            None => log::info!("  not normalized"),
        }
    }

    pub fn buffers(&self) -> Option<&MeshBuffers> {
        self.buffers.as_ref()
    }

    pub fn has_buffers(&self) -> bool {
        self.buffers.is_some()
    }

    /// Uploads the vertex list, every submesh's indices and the material textures.
    pub fn create_buffers(&mut self, gpu: &GpuContext) {
        let device = gpu.device();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffers = self
            .submeshes
            .iter()
            .enumerate()
            .map(|(i, submesh)| {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Index Buffer {}", self.name, i)),
                    contents: bytemuck::cast_slice(submesh.indices()),
                    usage: wgpu::BufferUsages::INDEX,
                })
            })
            .collect();

        self.materials.upload_textures(gpu);
        self.buffers = Some(MeshBuffers {
            vertex_buffer,
            index_buffers,
        });
        log::debug!("Created GPU buffers for '{}'", self.name);
    }

    /// Destroys the GPU buffers and textures; the CPU data stays.
    pub fn release_buffers(&mut self) {
        if self.buffers.take().is_some() {
            log::debug!("Released GPU buffers for '{}'", self.name);
        }
        self.materials.release_textures();
    }
}

impl std::fmt::Debug for TriangleMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriangleMesh")
            .field("name", &self.name)
            .field("vertices", &self.vertices.len())
            .field("submeshes", &self.submeshes.len())
            .field("materials", &self.materials.len())
            .field("num_triangles", &self.num_triangles)
            .field("normalization", &self.normalization)
            .field("uploaded", &self.buffers.is_some())
            .finish()
    }
}

pub trait DrawMesh<'a> {
    fn draw_submesh(&mut self, mesh: &'a TriangleMesh, submesh: usize, instances: Range<u32>);
    fn draw_mesh(&mut self, mesh: &'a TriangleMesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_submesh(&mut self, mesh: &'b TriangleMesh, submesh: usize, instances: Range<u32>) {
        let Some(buffers) = mesh.buffers() else {
            return; // not uploaded
        };
        let (Some(index_buffer), Some(sub)) =
            (buffers.index_buffer(submesh), mesh.submeshes.get(submesh))
        else {
            return;
        };

        self.set_vertex_buffer(0, buffers.vertex_buffer().slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..sub.indices().len() as u32, 0, instances);
    }

    fn draw_mesh(&mut self, mesh: &'b TriangleMesh) {
        for i in 0..mesh.submeshes.len() {
            self.draw_submesh(mesh, i, 0..1);
        }
    }
}
