//! Error types for the GL lessons core.

use thiserror::Error;

/// Errors produced while building lesson data or planning a frame.
#[derive(Debug, Error)]
pub enum LessonError {
    /// The viewport had a zero side or a side above `MAX_VIEWPORT`.
    #[error(
        "invalid viewport {width}x{height}: each side must be between 1 and {}",
        crate::frame_spec::MAX_VIEWPORT
    )]
    InvalidViewport { width: u32, height: u32 },

    /// A flat vertex buffer length was not a multiple of the component count.
    #[error("vertex buffer of {len} floats does not hold whole {components}-component positions")]
    VertexLayout { len: usize, components: usize },

    /// A draw call referenced vertices past the end of the buffer.
    #[error("draw range {first}..{end} exceeds vertex count {vertex_count}")]
    DrawOutOfRange {
        first: usize,
        end: usize,
        vertex_count: usize,
    },

    /// A frame plan issued a draw before any transform was bound.
    #[error("draw issued before a matrix was bound")]
    MatrixNotBound,

    /// The near/far planes of a frustum were not `0 < near < far`.
    #[error("invalid depth range: near {near}, far {far}")]
    InvalidDepthRange { near: f32, far: f32 },

    /// No lesson is registered under the requested name.
    #[error("unknown lesson: {0}")]
    UnknownLesson(String),

    /// A file could not be read or written.
    #[error("i/o error: {0}")]
    Io(String),
}
