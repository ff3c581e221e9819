//! Parses `.mtl` material libraries
//!
//! Supported directives: `newmtl`, `Ns`, `Ka`, `Kd`, `Ks`, `map_Kd`.
//! Anything else inside a block (`illum`, `Ni`, `d`, ...) is skipped.

use std::path::Path;

use cgmath::Vector3;

use crate::gfx::resources::{ImageTexture, MaterialLibrary, PhongMaterial};

use super::{parse_floats, parse_name, read_lines, DirectiveError, LoadError};

#[derive(Debug, Default)]
struct MtlBuilder {
    library: MaterialLibrary,
    current: Option<PhongMaterial>,
}

impl MtlBuilder {
    fn begin(&mut self, name: &str) {
        self.finish_current();
        self.current = Some(PhongMaterial::new(name));
    }

    fn finish_current(&mut self) {
        if let Some(material) = self.current.take() {
            log::debug!("Material '{}' loaded", material.name());
            self.library.insert(material);
        }
    }

    fn current(&mut self, directive: &str) -> Option<&mut PhongMaterial> {
        if self.current.is_none() {
            log::warn!("`{}` outside of a material block, ignoring", directive);
        }
        self.current.as_mut()
    }

    fn build(mut self) -> MaterialLibrary {
        self.finish_current();
        self.library
    }
}

/// Parses a material library.
///
/// # Arguments
/// * `path` - The `.mtl` file
/// * `texture_base_dir` - Directory that `map_Kd` paths are relative to
///
/// Textures are decoded eagerly. A texture that cannot be decoded is logged
/// and the material stays untextured.
pub fn parse_material_file(
    path: &Path,
    texture_base_dir: &Path,
) -> Result<MaterialLibrary, LoadError> {
    let lines = read_lines(path)?;
    log::info!("Loading materials: {}", path.display());

    let mut builder = MtlBuilder::default();

    for (i, line) in lines.enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        parse_line(&line, texture_base_dir, &mut builder).map_err(|source| {
            LoadError::MalformedMaterial {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            }
        })?;
    }

    let library = builder.build();
    log::info!("{} materials loaded from {}", library.len(), path.display());
    Ok(library)
}

fn parse_line(
    line: &str,
    texture_base_dir: &Path,
    builder: &mut MtlBuilder,
) -> Result<(), DirectiveError> {
    let mut tokens = line.split_whitespace();
    let Some(directive) = tokens.next() else {
        return Ok(());
    };

    match directive {
        "newmtl" => {
            let name = parse_name("newmtl", tokens)?;
            builder.begin(&name);
        }
        "Ns" => {
            let [ns] = parse_floats::<1>("Ns", &mut tokens)?;
            if let Some(material) = builder.current(directive) {
                material.ns = ns;
            }
        }
        "Ka" => {
            let ka = parse_floats::<3>("Ka", &mut tokens)?;
            if let Some(material) = builder.current(directive) {
                material.ka = Vector3::from(ka);
            }
        }
        "Kd" => {
            let kd = parse_floats::<3>("Kd", &mut tokens)?;
            if let Some(material) = builder.current(directive) {
                material.kd = Vector3::from(kd);
            }
        }
        "Ks" => {
            let ks = parse_floats::<3>("Ks", &mut tokens)?;
            if let Some(material) = builder.current(directive) {
                material.ks = Vector3::from(ks);
            }
        }
        "map_Kd" => {
            let file = parse_name("map_Kd", tokens)?;
            if let Some(material) = builder.current(directive) {
                let texture_path = texture_base_dir.join(&file);
                match ImageTexture::load(&texture_path) {
                    Ok(texture) => material.set_map_kd(Some(texture)),
                    Err(err) => {
                        log::warn!("Material '{}' left untextured: {}", material.name(), err)
                    }
                }
            }
        }
        _ => log::trace!("Skipping material directive `{}`", directive),
    }

    Ok(())
}
