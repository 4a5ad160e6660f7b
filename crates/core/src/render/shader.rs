//! Shader compilation and linking for GLES2 / WebGL.
//!
//! Compile and link run against a live `glow::Context`. The source
//! annotation used in error messages is plain string processing and is
//! tested without a context.

use std::fmt;
use thiserror::Error;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL shader type constant for this stage.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors raised while building the shader program.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile:\n{log}")]
    CompileError { stage: ShaderStage, log: String },

    #[error("program failed to link:\n{0}")]
    LinkError(String),
}

/// Prefixes each source line with its 1-based number and appends the
/// driver log, so `0:12: error` style messages can be matched by eye.
///
/// Line numbers are right-aligned to the widest number.
pub fn annotate_source(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().to_string().len();

    let mut out = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}| {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    if !log.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(log.trim_end());
    }
    out
}

/// Compiles one shader stage.
///
/// # Errors
///
/// `ShaderError::CompileError` carrying the annotated source and info log.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    use glow::HasContext;

    // SAFETY: the stage constant is valid and every handle used below comes
    // from this create call. The shader is deleted on the failure path.
    let shader = unsafe { gl.create_shader(stage.gl_type()) }
        .map_err(|log| ShaderError::CompileError { stage, log })?;

    let compiled = unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        gl.get_shader_compile_status(shader)
    };

    if compiled {
        log::debug!("compiled {stage} shader ({} bytes)", source.len());
        return Ok(shader);
    }

    let info = unsafe { gl.get_shader_info_log(shader) };
    unsafe { gl.delete_shader(shader) };
    Err(ShaderError::CompileError {
        stage,
        log: annotate_source(source, &info),
    })
}

/// Compiles both stages and links them into a program.
///
/// The stage objects are released whether or not linking succeeds; a
/// linked program keeps its own copy.
///
/// # Errors
///
/// `ShaderError::CompileError` for either stage, `ShaderError::LinkError`
/// if the program does not link.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, ShaderError> {
    use glow::HasContext;

    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(shader) => shader,
        Err(e) => {
            // SAFETY: `vertex` was returned by a successful compile above.
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    // SAFETY: both stage handles are live; they are detached and deleted
    // before returning on every path.
    let linked = unsafe {
        match gl.create_program() {
            Ok(program) => {
                gl.attach_shader(program, vertex);
                gl.attach_shader(program, fragment);
                gl.link_program(program);
                gl.detach_shader(program, vertex);
                gl.detach_shader(program, fragment);

                if gl.get_program_link_status(program) {
                    Ok(program)
                } else {
                    let info = gl.get_program_info_log(program);
                    gl.delete_program(program);
                    Err(ShaderError::LinkError(info))
                }
            }
            Err(e) => Err(ShaderError::LinkError(e)),
        }
    };

    unsafe {
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);
    }

    if linked.is_ok() {
        log::debug!("linked shader program");
    }
    linked
}
