//! Material system for Phong shading
//!
//! Materials are stored in a [`MaterialLibrary`] owned by the mesh that
//! loaded them. Submeshes refer to materials through [`MaterialId`] handles,
//! which stay valid for as long as the library lives.

use std::collections::HashMap;

use cgmath::{Vector3, Zero};

use crate::gfx::rendering::gpu::GpuContext;

use super::image_texture::ImageTexture;

/// Handle to a material inside a [`MaterialLibrary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ka: [f32; 3],
    pub ns: f32,
    pub kd: [f32; 3],
    /// 1 when a diffuse texture is bound, 0 otherwise
    pub use_map_kd: i32,
    pub ks: [f32; 3],
    _padding: f32,
}

/// Phong material read from an `.mtl` block
pub struct PhongMaterial {
    name: String,
    pub ka: Vector3<f32>,
    pub kd: Vector3<f32>,
    pub ks: Vector3<f32>,
    pub ns: f32,
    map_kd: Option<ImageTexture>,
}

impl PhongMaterial {
    /// Creates a material with all coefficients zero and no texture
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ka: Vector3::zero(),
            kd: Vector3::zero(),
            ks: Vector3::zero(),
            ns: 0.0,
            map_kd: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn map_kd(&self) -> Option<&ImageTexture> {
        self.map_kd.as_ref()
    }

    pub fn set_map_kd(&mut self, texture: Option<ImageTexture>) {
        self.map_kd = texture;
    }

    pub fn has_texture(&self) -> bool {
        self.map_kd.is_some()
    }

    /// Builder pattern: Set diffuse color
    pub fn with_kd(mut self, r: f32, g: f32, b: f32) -> Self {
        self.kd = Vector3::new(r, g, b);
        self
    }

    /// Builder pattern: Set shininess
    pub fn with_ns(mut self, ns: f32) -> Self {
        self.ns = ns;
        self
    }

    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            ka: self.ka.into(),
            ns: self.ns,
            kd: self.kd.into(),
            use_map_kd: self.has_texture() as i32,
            ks: self.ks.into(),
            _padding: 0.0,
        }
    }
}

impl std::fmt::Debug for PhongMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhongMaterial")
            .field("name", &self.name)
            .field("ka", &self.ka)
            .field("kd", &self.kd)
            .field("ks", &self.ks)
            .field("ns", &self.ns)
            .field("map_kd", &self.map_kd)
            .finish()
    }
}

/// Arena of materials keyed by name
///
/// Names are unique: inserting a name that already exists replaces the
/// material in its existing slot, so handles given out earlier keep pointing
/// at the material with that name.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    materials: Vec<PhongMaterial>,
    by_name: HashMap<String, MaterialId>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material to the library
    ///
    /// # Returns
    /// The handle of the slot now holding the material
    pub fn insert(&mut self, material: PhongMaterial) -> MaterialId {
        if let Some(&id) = self.by_name.get(material.name()) {
            log::warn!("Material '{}' redefined, replacing it", material.name());
            self.materials[id.0] = material;
            return id;
        }

        let id = MaterialId(self.materials.len());
        self.by_name.insert(material.name().to_string(), id);
        self.materials.push(material);
        id
    }

    /// Moves every material of `other` into this library.
    pub fn merge(&mut self, other: MaterialLibrary) {
        for material in other.materials {
            self.insert(material);
        }
    }

    pub fn id_of(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&PhongMaterial> {
        self.materials.get(id.0)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&PhongMaterial> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &PhongMaterial)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i), m))
    }

    /// Uploads every material texture.
    pub fn upload_textures(&mut self, gpu: &GpuContext) {
        for material in &mut self.materials {
            if let Some(texture) = material.map_kd.as_mut() {
                texture.upload(gpu, wgpu::AddressMode::Repeat);
            }
        }
    }

    /// Releases every material texture on the GPU.
    pub fn release_textures(&mut self) {
        for material in &mut self.materials {
            if let Some(texture) = material.map_kd.as_mut() {
                texture.release();
            }
        }
    }
}
