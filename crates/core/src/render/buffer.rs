//! Static vertex buffer upload.

use super::error::RenderError;
use crate::vertex::{VertexData, POSITION_COUNT, POSITION_STRIDE};

/// A GL array buffer holding a lesson's positions.
pub struct VertexBuffer {
    buffer: glow::Buffer,
    vertex_count: usize,
}

impl VertexBuffer {
    /// Uploads `data` once with `STATIC_DRAW` usage.
    ///
    /// # Errors
    ///
    /// `RenderError::Gl` if the buffer cannot be created.
    #[allow(unsafe_code)]
    pub fn upload(gl: &glow::Context, data: &VertexData) -> Result<Self, RenderError> {
        use glow::HasContext;

        // SAFETY: the buffer handle comes from this create call and the byte
        // slice lives for the duration of the upload.
        let buffer = unsafe { gl.create_buffer() }.map_err(RenderError::Gl)?;
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data.as_bytes(), glow::STATIC_DRAW);
        }
        log::debug!(
            "uploaded {} vertices ({} bytes)",
            data.vertex_count(),
            data.as_bytes().len()
        );

        Ok(Self {
            buffer,
            vertex_count: data.vertex_count(),
        })
    }

    /// Binds the buffer and points `location` at its tightly packed positions.
    #[allow(unsafe_code)]
    pub fn bind_positions(&self, gl: &glow::Context, location: u32) {
        use glow::HasContext;

        // SAFETY: `self.buffer` is live; size and stride match the packing
        // guaranteed by `VertexData`.
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
            gl.vertex_attrib_pointer_f32(
                location,
                POSITION_COUNT as i32,
                glow::FLOAT,
                false,
                POSITION_STRIDE as i32,
                0,
            );
            gl.enable_vertex_attrib_array(location);
        }
    }

    /// Vertices stored in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: `self.buffer` is a live buffer from `upload`.
        unsafe { gl.delete_buffer(self.buffer) };
    }
}
