//! Parses `.obj` geometry files
//!
//! Faces must reference all three attributes (`p/t/n`). Polygons with more
//! than three corners are fan-triangulated, which is only correct for convex
//! planar polygons.

use std::collections::HashMap;
use std::path::Path;

use cgmath::Vector3;

use crate::gfx::geometry::Aabb;
use crate::gfx::resources::MaterialLibrary;
use crate::gfx::scene::mesh::{NormalizationInfo, SubMesh, TriangleMesh};
use crate::gfx::scene::vertex::VertexPTN;

use super::{parse_floats, parse_material_file, parse_name, read_lines, DirectiveError, LoadError};

/// 1-based attribute indices of one face corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceIndex {
    pub position: usize,
    pub tex_coord: usize,
    pub normal: usize,
}

/// Parses a `p/t/n` face token.
pub fn parse_face_index(token: &str) -> Result<FaceIndex, DirectiveError> {
    let mut parts = token.split('/');
    let mut next = || -> Result<usize, DirectiveError> {
        match parts.next() {
            Some(part) if !part.is_empty() => part
                .parse()
                .map_err(|_| DirectiveError::InvalidNumber(part.to_string())),
            _ => Err(DirectiveError::IncompleteFaceVertex(token.to_string())),
        }
    };

    Ok(FaceIndex {
        position: next()?,
        tex_coord: next()?,
        normal: next()?,
    })
}

fn check_index(
    kind: &'static str,
    index: usize,
    available: usize,
) -> Result<usize, DirectiveError> {
    if index == 0 || index > available {
        return Err(DirectiveError::IndexOutOfRange {
            kind,
            index,
            available,
        });
    }
    Ok(index - 1)
}

#[derive(Debug, Default)]
struct ObjMeshBuilder {
    positions: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    bounds: Aabb,
    materials: MaterialLibrary,
    vertices: Vec<VertexPTN>,
    vertex_ids: HashMap<FaceIndex, u32>,
    submeshes: Vec<SubMesh>,
    current: Option<SubMesh>,
    num_triangles: usize,
}

impl ObjMeshBuilder {
    fn push_position(&mut self, position: [f32; 3]) {
        self.bounds.extend(position);
        self.positions.push(position);
    }

    fn push_tex_coord(&mut self, tex_coord: [f32; 2]) {
        self.tex_coords.push(tex_coord);
    }

    fn push_normal(&mut self, normal: [f32; 3]) {
        self.normals.push(normal);
    }

    fn load_material_library(
        &mut self,
        path: &Path,
        texture_base_dir: &Path,
    ) -> Result<(), LoadError> {
        let library = parse_material_file(path, texture_base_dir)?;
        self.materials.merge(library);
        Ok(())
    }

    fn use_material(&mut self, name: &str) -> Result<(), DirectiveError> {
        let material = self
            .materials
            .id_of(name)
            .ok_or_else(|| DirectiveError::UndefinedMaterial(name.to_string()))?;

        self.close_submesh();
        self.current = Some(SubMesh::new(material));
        Ok(())
    }

    fn close_submesh(&mut self) {
        if let Some(submesh) = self.current.take() {
            self.submeshes.push(submesh);
        }
    }

    /// Resolves a face corner to a slot in the deduplicated vertex list.
    fn vertex_id(&mut self, index: FaceIndex) -> Result<u32, DirectiveError> {
        if let Some(&id) = self.vertex_ids.get(&index) {
            return Ok(id);
        }

        let p = check_index("position", index.position, self.positions.len())?;
        let t = check_index("texture coordinate", index.tex_coord, self.tex_coords.len())?;
        let n = check_index("normal", index.normal, self.normals.len())?;

        let id = self.vertices.len() as u32;
        self.vertices.push(VertexPTN::new(
            self.positions[p],
            self.normals[n],
            self.tex_coords[t],
        ));
        self.vertex_ids.insert(index, id);
        Ok(id)
    }

    fn push_face(&mut self, corners: &[FaceIndex]) -> Result<(), DirectiveError> {
        if corners.len() < 3 {
            return Err(DirectiveError::DegeneratePolygon(corners.len()));
        }
        if self.current.is_none() {
            return Err(DirectiveError::NoActiveMaterial);
        }

        let ids = corners
            .iter()
            .map(|&corner| self.vertex_id(corner))
            .collect::<Result<Vec<_>, _>>()?;

        let submesh = self.current.as_mut().ok_or(DirectiveError::NoActiveMaterial)?;
        for i in 2..ids.len() {
            submesh.push_triangle([ids[0], ids[i - 1], ids[i]]);
        }
        self.num_triangles += ids.len() - 2;
        Ok(())
    }

    fn build(mut self, name: String, normalize: bool) -> TriangleMesh {
        self.close_submesh();

        let normalization = if normalize {
            normalize_vertices(&mut self.vertices, &self.bounds)
        } else {
            None
        };

        TriangleMesh::new(
            name,
            self.vertices,
            self.submeshes,
            self.materials,
            self.num_triangles,
            normalization,
        )
    }
}

/// Centers the vertices on the bounding box and scales the longest axis to 1.
fn normalize_vertices(vertices: &mut [VertexPTN], bounds: &Aabb) -> Option<NormalizationInfo> {
    if bounds.is_empty() {
        log::warn!("Mesh has no positions, skipping normalization");
        return None;
    }

    let center = bounds.center();
    let size = bounds.size();
    let longest = bounds.longest_axis();

    let scale = if longest > 0.0 {
        1.0 / longest
    } else {
        log::warn!("Mesh has zero extent, translating only");
        0.0
    };

    for vertex in vertices.iter_mut() {
        let p = Vector3::from(vertex.position) - center;
        vertex.position = if longest > 0.0 { (p * scale).into() } else { p.into() };
    }

    Some(NormalizationInfo {
        center,
        extent: size * scale,
    })
}

/// Loads `<model_dir>/<name>.obj`, where `name` is the last segment of `model_dir`.
///
/// `mtllib` files and textures are resolved relative to `model_dir`.
pub fn parse_obj(model_dir: &Path, normalize: bool) -> Result<TriangleMesh, LoadError> {
    let name = model_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = model_dir.join(format!("{}.obj", name));

    let lines = read_lines(&path)?;
    log::info!("Loading mesh: {}", path.display());

    let mut builder = ObjMeshBuilder::default();

    for (i, line) in lines.enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let malformed = |source: DirectiveError| LoadError::MalformedGeometry {
            path: path.clone(),
            line: i + 1,
            source,
        };

        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };

        match directive {
            "v" => builder.push_position(parse_floats::<3>("v", &mut tokens).map_err(malformed)?),
            "vt" => {
                builder.push_tex_coord(parse_floats::<2>("vt", &mut tokens).map_err(malformed)?)
            }
            "vn" => builder.push_normal(parse_floats::<3>("vn", &mut tokens).map_err(malformed)?),
            "mtllib" => {
                let file = parse_name("mtllib", tokens).map_err(malformed)?;
                builder.load_material_library(&model_dir.join(file), model_dir)?;
            }
            "usemtl" => {
                let material = parse_name("usemtl", tokens).map_err(malformed)?;
                builder.use_material(&material).map_err(malformed)?;
            }
            "f" => {
                let corners = tokens
                    .map(parse_face_index)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(malformed)?;
                builder.push_face(&corners).map_err(malformed)?;
            }
            _ => log::trace!("Skipping `{}`", directive),
        }
    }

    let mesh = builder.build(name, normalize);
    log::info!(
        "Mesh '{}' loaded: {} vertices, {} triangles, {} submeshes",
        mesh.name(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        mesh.submeshes().len()
    );
    Ok(mesh)
}
