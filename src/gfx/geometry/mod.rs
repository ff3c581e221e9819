//! # Procedural Geometry and Bounds
//!
//! Geometry that is generated rather than loaded (the skybox sphere) and the
//! axis-aligned bounding box used when normalizing loaded meshes.
//!
//! ## Usage
//!
//! ```rust
//! use tessera::gfx::geometry::{generate_sphere, Aabb};
//!
//! // Sky sphere with 36 slices and 18 stacks
//! let sphere = generate_sphere(36, 18, 50.0);
//! assert_eq!(sphere.triangle_count(), 36 * 18 * 2);
//!
//! let mut bounds = Aabb::empty();
//! bounds.extend([1.0, 2.0, 3.0]);
//! ```

pub mod bounds;
pub mod primitives;

pub use bounds::Aabb;
pub use primitives::*;

use crate::gfx::scene::vertex::VertexPTN;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves the attribute streams into the renderer's vertex format.
    pub fn to_vertices(&self) -> Vec<VertexPTN> {
        (0..self.vertices.len())
            .map(|i| VertexPTN {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coord: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
