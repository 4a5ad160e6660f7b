use super::shader::ShaderError;
use crate::error::LessonError;
use thiserror::Error;

/// Errors raised by the GL renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Lesson(#[from] LessonError),

    /// The linked program does not expose a required attribute.
    #[error("shader attribute {0} is missing")]
    MissingAttribute(&'static str),

    /// The driver failed to allocate an object.
    #[error("GL error: {0}")]
    Gl(String),
}
