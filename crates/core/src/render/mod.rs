//! GLES2 / WebGL rendering of lessons through `glow`.
//!
//! Only available with the `render` feature.
//!
//! # Module overview
//!
//! - [`shader`] -- stage compilation, program linking, annotated error logs.
//! - [`shaders`] -- the bundled flat-color GLSL sources.
//! - [`program`] -- the linked program and its attribute/uniform locations.
//! - [`buffer`] -- static vertex buffer upload.
//! - [`renderer`] -- surface-created / surface-changed / draw-frame callbacks.
//! - [`context`] -- GPU context wrapper.

pub mod buffer;
pub mod context;
pub mod error;
pub mod program;
pub mod renderer;
pub mod shader;
pub mod shaders;

pub use buffer::VertexBuffer;
pub use context::GpuContext;
pub use error::RenderError;
pub use program::ColorProgram;
pub use renderer::Renderer;
pub use shader::{annotate_source, compile_program, compile_shader, ShaderError, ShaderStage};
