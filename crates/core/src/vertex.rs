//! Flat position buffers uploaded once per surface.

use crate::error::LessonError;
use glam::Vec3;

/// Floats per vertex position (`x, y, z`).
pub const POSITION_COUNT: usize = 3;

/// Size in bytes of one packed position.
pub const POSITION_STRIDE: usize = POSITION_COUNT * std::mem::size_of::<f32>();

/// An immutable, tightly packed list of 3-component vertex positions.
///
/// The backing slice always holds `POSITION_COUNT * vertex_count()` floats.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexData {
    floats: Vec<f32>,
}

impl VertexData {
    /// Wraps a flat float list.
    ///
    /// Returns `LessonError::VertexLayout` if the length is not a multiple of
    /// [`POSITION_COUNT`].
    pub fn from_floats(floats: Vec<f32>) -> Result<Self, LessonError> {
        if floats.len() % POSITION_COUNT != 0 {
            return Err(LessonError::VertexLayout {
                len: floats.len(),
                components: POSITION_COUNT,
            });
        }
        Ok(Self { floats })
    }

    /// Packs a list of positions.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        let floats = positions.iter().flat_map(|p| p.to_array()).collect();
        Self { floats }
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.floats.len() / POSITION_COUNT
    }

    /// Number of floats in the buffer.
    pub fn len(&self) -> usize {
        self.floats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty()
    }

    /// The raw float slice, in upload order.
    pub fn as_slice(&self) -> &[f32] {
        &self.floats
    }

    /// The buffer viewed as bytes for `glBufferData`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.floats)
    }

    /// Position of vertex `index`, or `None` past the end.
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let start = index.checked_mul(POSITION_COUNT)?;
        self.floats
            .get(start..start + POSITION_COUNT)
            .map(Vec3::from_slice)
    }
}
