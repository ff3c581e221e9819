//! WGSL shader programs used by the viewer
//!
//! Each program is a single WGSL file with `vs_main` and `fs_main` entry points.

use std::fs;
use std::path::{Path, PathBuf};

use crate::gfx::loader::LoadError;

use super::gpu::GpuContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    /// Draws light markers in a single color
    FillColor,
    /// Blinn-Phong shading of the model
    PhongShading,
    Skybox,
}

impl ShaderProgram {
    pub const ALL: [ShaderProgram; 3] = [
        ShaderProgram::FillColor,
        ShaderProgram::PhongShading,
        ShaderProgram::Skybox,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ShaderProgram::FillColor => "fixed_color.wgsl",
            ShaderProgram::PhongShading => "phong_shading.wgsl",
            ShaderProgram::Skybox => "skybox.wgsl",
        }
    }
}

pub struct Shader {
    program: ShaderProgram,
    path: PathBuf,
    source: String,
    module: Option<wgpu::ShaderModule>,
}

impl Shader {
    pub fn program(&self) -> ShaderProgram {
        self.program
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled module, present when loaded with a GPU context
    pub fn module(&self) -> Option<&wgpu::ShaderModule> {
        self.module.as_ref()
    }
}

impl std::fmt::Debug for Shader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shader")
            .field("program", &self.program)
            .field("path", &self.path)
            .field("compiled", &self.module.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ShaderLibrary {
    shaders: Vec<Shader>,
}

impl ShaderLibrary {
    /// A library without shaders, for headless use
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads every program from `shader_dir`, compiling them when `gpu` is given.
    pub fn load(shader_dir: &Path, gpu: Option<&GpuContext>) -> Result<Self, LoadError> {
        let mut shaders = Vec::with_capacity(ShaderProgram::ALL.len());

        for program in ShaderProgram::ALL {
            let path = shader_dir.join(program.file_name());
            let source = fs::read_to_string(&path).map_err(|source| LoadError::FileNotFound {
                path: path.clone(),
                source,
            })?;

            let module = gpu.map(|gpu| {
                gpu.device()
                    .create_shader_module(wgpu::ShaderModuleDescriptor {
                        label: Some(program.file_name()),
                        source: wgpu::ShaderSource::Wgsl(source.as_str().into()),
                    })
            });

            log::debug!("Loaded shader {}", path.display());
            shaders.push(Shader {
                program,
                path,
                source,
                module,
            });
        }

        log::info!("Shader library loaded from {}", shader_dir.display());
        Ok(Self { shaders })
    }

    pub fn get(&self, program: ShaderProgram) -> Option<&Shader> {
        self.shaders.iter().find(|shader| shader.program == program)
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    pub fn release(&mut self) {
        self.shaders.clear();
    }
}
