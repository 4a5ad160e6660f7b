//! The `Lesson` trait every rendering lesson implements.
//!
//! The trait mirrors the three host surface callbacks: vertex data is read once
//! when the surface is created, the projection is recomputed when the surface
//! changes size, and a frame plan is produced on every draw. It is object-safe
//! so lessons can be switched at runtime as `dyn Lesson`.

use crate::color::Rgba;
use crate::draw::FramePlan;
use crate::error::LessonError;
use crate::vertex::VertexData;
use glam::Mat4;
use serde_json::Value;
use std::time::Duration;

pub trait Lesson {
    /// Short registry name (e.g. "perspective").
    fn name(&self) -> &'static str;

    /// The static vertex buffer, uploaded once per surface.
    fn vertices(&self) -> &VertexData;

    /// Projection matrix for a `width x height` viewport.
    ///
    /// Returns `LessonError::InvalidViewport` for a zero dimension.
    fn projection(&self, width: u32, height: u32) -> Result<Mat4, LessonError>;

    /// The draw sequence for the frame at `elapsed` since the surface was
    /// created, given the current projection.
    fn frame(&self, elapsed: Duration, projection: &Mat4) -> FramePlan;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing each parameter's type, default, and meaning.
    fn param_schema(&self) -> Value;

    /// Color the surface is cleared to.
    fn clear_color(&self) -> Rgba {
        Rgba::BLACK
    }
}
