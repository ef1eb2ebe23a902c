//! Shader build unit: compile GLSL stages and link them into programs.
//!
//! Failures come back as [`BuildError`] carrying the driver's diagnostic log.
//! Nothing here terminates the process; the initialization boundary decides
//! what a build failure means (see [`BuildError::exit_code`]).

use std::fmt;

use gl::types::{GLenum, GLuint};
use gl_driver::GlApi;
use tracing::debug;

/// Size of the buffer diagnostic logs are read into, terminator included.
pub const INFO_LOG_CAPACITY: usize = 1024;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

impl ShaderStage {
    /// The GL shader type enum for this stage.
    pub fn gl_kind(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Compute => gl::COMPUTE_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        })
    }
}

/// A shader build failure.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{stage} shader compilation failed\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program link failed\n{log}")]
    Link { log: String },
}

impl BuildError {
    /// Process exit status for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Compile { .. } => 1,
            BuildError::Link { .. } => 2,
        }
    }

    /// The driver's diagnostic log.
    pub fn log(&self) -> &str {
        match self {
            BuildError::Compile { log, .. } | BuildError::Link { log } => log,
        }
    }
}

/// A compiled, not yet linked, shader object.
#[derive(Debug)]
pub struct Shader {
    id: GLuint,
    stage: ShaderStage,
}

impl Shader {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

/// A linked program. Immutable after link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Program {
    id: GLuint,
}

impl Program {
    /// GL program name.
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Make this the current program.
    pub fn bind(&self, gl: &impl GlApi) {
        gl.use_program(self.id);
    }
}

/// Cut a log to what fits in an [`INFO_LOG_CAPACITY`] buffer.
fn bounded_log(mut log: String) -> String {
    let max = INFO_LOG_CAPACITY - 1;
    if log.len() > max {
        let mut end = max;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}

/// Compile `source` as a `stage` shader and check its compile status.
pub fn compile_shader(
    gl: &impl GlApi,
    stage: ShaderStage,
    source: &str,
) -> Result<Shader, BuildError> {
    let id = gl.create_shader(stage.gl_kind());
    gl.shader_source(id, source);
    gl.compile_shader(id);

    if !gl.shader_compile_status(id) {
        let log = bounded_log(gl.shader_info_log(id, INFO_LOG_CAPACITY));
        return Err(BuildError::Compile { stage, log });
    }

    Ok(Shader { id, stage })
}

/// Link compiled stages into a program and check its link status.
///
/// Stage objects are released once the program links.
pub fn link_program(gl: &impl GlApi, shaders: &[Shader]) -> Result<Program, BuildError> {
    let id = gl.create_program();
    for shader in shaders {
        gl.attach_shader(id, shader.id);
    }
    gl.link_program(id);

    if !gl.program_link_status(id) {
        let log = bounded_log(gl.program_info_log(id, INFO_LOG_CAPACITY));
        return Err(BuildError::Link { log });
    }

    for shader in shaders {
        gl.delete_shader(shader.id);
    }

    Ok(Program { id })
}

/// Compile every `(stage, source)` pair and link the result.
pub fn build_program(
    gl: &impl GlApi,
    stages: &[(ShaderStage, &str)],
) -> Result<Program, BuildError> {
    let shaders = stages
        .iter()
        .map(|&(stage, source)| compile_shader(gl, stage, source))
        .collect::<Result<Vec<_>, _>>()?;
    let program = link_program(gl, &shaders)?;
    debug!(program = program.id, stages = shaders.len(), "linked program");
    Ok(program)
}
