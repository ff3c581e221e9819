//! # Model Loading
//!
//! Line-oriented parsers for Wavefront geometry (`.obj`) and material
//! (`.mtl`) files.
//!
//! A model lives in its own directory: `Models/TexCube/TexCube.obj`, next to
//! the material library and textures it references. The parsers are strict
//! about geometry (a face that references an attribute which was never
//! declared aborts the load) and lenient about materials (absent fields
//! default to zero).

pub mod mtl;
pub mod obj;

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    str::SplitWhitespace,
};

pub use mtl::parse_material_file;
pub use obj::parse_obj;

/// What went wrong with a single directive
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DirectiveError {
    #[error("`{directive}` expects {expected} values, found {found}")]
    MissingComponents {
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("`{0}` is missing its name")]
    MissingName(&'static str),
    #[error("face vertex `{0}` must have the form position/texture/normal")]
    IncompleteFaceVertex(String),
    #[error("{kind} index {index} is out of range ({available} declared so far)")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        available: usize,
    },
    #[error("face has {0} vertices, at least 3 are required")]
    DegeneratePolygon(usize),
    #[error("material `{0}` is used before it is defined")]
    UndefinedMaterial(String),
    #[error("face declared before any `usemtl`")]
    NoActiveMaterial,
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Could not open `{path}`: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed geometry in `{path}` at line {line}: {source}")]
    MalformedGeometry {
        path: PathBuf,
        line: usize,
        #[source]
        source: DirectiveError,
    },
    #[error("Malformed material in `{path}` at line {line}: {source}")]
    MalformedMaterial {
        path: PathBuf,
        line: usize,
        #[source]
        source: DirectiveError,
    },
    #[error("Failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Opens `path` as a buffered line stream.
pub(crate) fn read_lines(path: &Path) -> Result<io::Lines<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file).lines())
}

/// Parses the next `N` whitespace-separated floats; trailing values are ignored.
pub(crate) fn parse_floats<const N: usize>(
    directive: &'static str,
    tokens: &mut SplitWhitespace,
) -> Result<[f32; N], DirectiveError> {
    let mut values = [0.0f32; N];
    for (found, value) in values.iter_mut().enumerate() {
        let token = tokens.next().ok_or(DirectiveError::MissingComponents {
            directive,
            expected: N,
            found,
        })?;
        *value = token
            .parse()
            .map_err(|_| DirectiveError::InvalidNumber(token.to_string()))?;
    }
    Ok(values)
}

/// The rest of the line after the directive, for names and file paths.
pub(crate) fn parse_name(
    directive: &'static str,
    tokens: SplitWhitespace,
) -> Result<String, DirectiveError> {
    let name = tokens.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(DirectiveError::MissingName(directive));
    }
    Ok(name)
}
