#![deny(unsafe_code)]
//! Lesson 172: perspective projection.
//!
//! Two flat triangles sit at different depths in front of the eye. A frustum
//! projection sized to the viewport aspect ratio makes the farther (green)
//! triangle smaller, and the depth test keeps the nearer (blue) one on top
//! where they overlap, even though green is drawn first.

use gl_lessons_core::error::LessonError;
use gl_lessons_core::params::param_f32;
use gl_lessons_core::projection::Frustum;
use gl_lessons_core::{DrawCall, FramePlan, Lesson, Rgba, VertexData};
use glam::{Mat4, Vec3};
use serde_json::{json, Value};
use std::time::Duration;

/// Default near clip plane distance.
const DEFAULT_NEAR: f32 = 1.0;
/// Default far clip plane distance.
const DEFAULT_FAR: f32 = 8.0;
/// Depth of the first (green) triangle.
const FAR_TRIANGLE_Z: f32 = -2.0;
/// Depth of the second (blue) triangle.
const NEAR_TRIANGLE_Z: f32 = -1.0;

/// Vertices in the static buffer.
pub const VERTEX_COUNT: usize = 6;

/// Clip planes for the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveParams {
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveParams {
    fn default() -> Self {
        Self {
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl PerspectiveParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            near: param_f32(params, "near", DEFAULT_NEAR),
            far: param_f32(params, "far", DEFAULT_FAR),
        }
    }
}

/// The two-triangle perspective scene.
pub struct Perspective {
    vertices: VertexData,
    params: PerspectiveParams,
}

impl Perspective {
    pub fn new(params: PerspectiveParams) -> Self {
        Self {
            vertices: scene_vertices(),
            params,
        }
    }

    pub fn from_json(params: &Value) -> Self {
        Self::new(PerspectiveParams::from_json(params))
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::new(PerspectiveParams::default())
    }
}

/// Two triangles, the first one meter farther away than the second.
fn scene_vertices() -> VertexData {
    let (z1, z2) = (FAR_TRIANGLE_Z, NEAR_TRIANGLE_Z);
    VertexData::from_positions(&[
        Vec3::new(-0.7, -0.5, z1),
        Vec3::new(0.3, -0.5, z1),
        Vec3::new(-0.2, 0.3, z1),
        Vec3::new(-0.3, -0.4, z2),
        Vec3::new(0.7, -0.4, z2),
        Vec3::new(0.2, 0.4, z2),
    ])
}

impl Lesson for Perspective {
    fn name(&self) -> &'static str {
        "perspective"
    }

    fn vertices(&self) -> &VertexData {
        &self.vertices
    }

    fn projection(&self, width: u32, height: u32) -> Result<Mat4, LessonError> {
        let frustum = Frustum::for_viewport(width, height, self.params.near, self.params.far)?;
        Ok(frustum.to_mat4())
    }

    fn frame(&self, _elapsed: Duration, projection: &Mat4) -> FramePlan {
        let mut plan = FramePlan::new();
        plan.clear()
            .set_matrix(*projection)
            .draw(DrawCall::triangles(0, 3, Rgba::GREEN))
            .draw(DrawCall::triangles(3, 3, Rgba::BLUE));
        plan
    }

    fn params(&self) -> Value {
        json!({
            "near": self.params.near,
            "far": self.params.far,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "near": {
                "type": "number",
                "default": DEFAULT_NEAR,
                "min": 0.01,
                "description": "Distance to the near clip plane"
            },
            "far": {
                "type": "number",
                "default": DEFAULT_FAR,
                "description": "Distance to the far clip plane; must exceed near"
            }
        })
    }
}
