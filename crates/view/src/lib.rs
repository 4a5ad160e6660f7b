#![deny(unsafe_code)]
//! Lesson 173: view matrix.
//!
//! Four triangles stand around the origin, one on each side, together with
//! the three coordinate axes and a short line marking the camera's up vector.
//! The camera orbits the origin once per period and looks at it through a
//! look-at view matrix, so the whole arrangement appears to turn. A copy of
//! the front triangle is additionally spun about the (0, 1, 1) axis by a
//! time-driven model matrix.

use gl_lessons_core::camera::{
    model_rotation, OrbitCamera, DEFAULT_HEIGHT, DEFAULT_PERIOD_MS, DEFAULT_RADIUS,
};
use gl_lessons_core::error::LessonError;
use gl_lessons_core::params::{param_f32, param_u64, param_vec3};
use gl_lessons_core::projection::Frustum;
use gl_lessons_core::{DrawCall, FramePlan, Lesson, Rgba, VertexData};
use glam::{Mat4, Vec3};
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_NEAR: f32 = 2.0;
const DEFAULT_FAR: f32 = 8.0;
/// Half height of a triangle.
const TRIANGLE_HALF: f32 = 0.4;
/// Distance of each triangle from the origin.
const TRIANGLE_OFFSET: f32 = 0.9;
/// Half length of each coordinate axis.
const AXIS_LENGTH: f32 = 3.0;
const AXIS_LINE_WIDTH: f32 = 1.0;
const UP_LINE_WIDTH: f32 = 3.0;

/// Vertices in the static buffer: 4 triangles, 3 axes, 1 up-vector line.
pub const VERTEX_COUNT: usize = 20;

/// First vertex of each group in the buffer.
const AXES_FIRST: usize = 12;
const UP_FIRST: usize = 18;

/// Camera orbit, clip planes and model spin axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub near: f32,
    pub far: f32,
    pub camera: OrbitCamera,
    pub spin_axis: Vec3,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            camera: OrbitCamera::default(),
            spin_axis: Vec3::new(0.0, 1.0, 1.0),
        }
    }
}

impl ViewParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            near: param_f32(params, "near", DEFAULT_NEAR),
            far: param_f32(params, "far", DEFAULT_FAR),
            camera: OrbitCamera {
                period_ms: param_u64(params, "period_ms", DEFAULT_PERIOD_MS),
                radius: param_f32(params, "radius", DEFAULT_RADIUS),
                height: param_f32(params, "height", DEFAULT_HEIGHT),
                target: param_vec3(params, "target", defaults.camera.target),
                up: param_vec3(params, "up", defaults.camera.up),
            },
            spin_axis: param_vec3(params, "spin_axis", defaults.spin_axis),
        }
    }
}

/// The orbiting-camera scene.
pub struct View {
    vertices: VertexData,
    params: ViewParams,
}

impl View {
    pub fn new(params: ViewParams) -> Self {
        Self {
            vertices: scene_vertices(&params.camera),
            params,
        }
    }

    pub fn from_json(params: &Value) -> Self {
        Self::new(ViewParams::from_json(params))
    }

    /// Camera eye position at `elapsed`.
    pub fn eye(&self, elapsed: Duration) -> Vec3 {
        self.params.camera.eye(elapsed)
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.params.camera
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(ViewParams::default())
    }
}

/// Builds the 20-vertex buffer. The up-vector marker is baked from the
/// camera's target and up vector, which stay fixed for the lesson's lifetime.
fn scene_vertices(camera: &OrbitCamera) -> VertexData {
    let s = TRIANGLE_HALF;
    let d = TRIANGLE_OFFSET;
    let l = AXIS_LENGTH;
    let [up_from, up_to] = camera.up_marker();

    VertexData::from_positions(&[
        // front (+z)
        Vec3::new(-2.0 * s, -s, d),
        Vec3::new(2.0 * s, -s, d),
        Vec3::new(0.0, s, d),
        // back (-z)
        Vec3::new(-2.0 * s, -s, -d),
        Vec3::new(2.0 * s, -s, -d),
        Vec3::new(0.0, s, -d),
        // right (+x)
        Vec3::new(d, -s, -2.0 * s),
        Vec3::new(d, -s, 2.0 * s),
        Vec3::new(d, s, 0.0),
        // left (-x)
        Vec3::new(-d, -s, -2.0 * s),
        Vec3::new(-d, -s, 2.0 * s),
        Vec3::new(-d, s, 0.0),
        // axes
        Vec3::new(-l, 0.0, 0.0),
        Vec3::new(l, 0.0, 0.0),
        Vec3::new(0.0, -l, 0.0),
        Vec3::new(0.0, l, 0.0),
        Vec3::new(0.0, 0.0, -l),
        Vec3::new(0.0, 0.0, l),
        // up vector
        up_from,
        up_to,
    ])
}

impl Lesson for View {
    fn name(&self) -> &'static str {
        "view"
    }

    fn vertices(&self) -> &VertexData {
        &self.vertices
    }

    fn projection(&self, width: u32, height: u32) -> Result<Mat4, LessonError> {
        let frustum = Frustum::for_viewport(width, height, self.params.near, self.params.far)?;
        Ok(frustum.to_mat4())
    }

    fn frame(&self, elapsed: Duration, projection: &Mat4) -> FramePlan {
        let camera = &self.params.camera;
        let view_projection = *projection * camera.view_matrix(elapsed);
        let spin = model_rotation(elapsed, camera.period_ms, self.params.spin_axis);

        let mut plan = FramePlan::new();
        plan.clear();

        // spinning copy of the front triangle
        plan.set_matrix(view_projection * spin)
            .draw(DrawCall::triangles(0, 3, Rgba::GREEN));

        plan.set_matrix(view_projection)
            .draw(DrawCall::triangles(0, 3, Rgba::GREEN))
            .draw(DrawCall::triangles(3, 3, Rgba::BLUE))
            .draw(DrawCall::triangles(6, 3, Rgba::RED))
            .draw(DrawCall::triangles(9, 3, Rgba::YELLOW));

        plan.set_line_width(AXIS_LINE_WIDTH)
            .draw(DrawCall::lines(AXES_FIRST, 2, Rgba::CYAN))
            .draw(DrawCall::lines(AXES_FIRST + 2, 2, Rgba::MAGENTA))
            .draw(DrawCall::lines(AXES_FIRST + 4, 2, Rgba::ORANGE));

        plan.set_line_width(UP_LINE_WIDTH)
            .draw(DrawCall::lines(UP_FIRST, 2, Rgba::WHITE));

        plan
    }

    fn params(&self) -> Value {
        let camera = &self.params.camera;
        json!({
            "near": self.params.near,
            "far": self.params.far,
            "period_ms": camera.period_ms,
            "radius": camera.radius,
            "height": camera.height,
            "target": camera.target.to_array(),
            "up": camera.up.to_array(),
            "spin_axis": self.params.spin_axis.to_array(),
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
            },
            "period_ms": {
                "type": "integer",
                "default": DEFAULT_PERIOD_MS,
                "min": 1,
                "description": "Milliseconds per camera orbit and per model spin"
            },
            "radius": {
                "type": "number",
                "default": DEFAULT_RADIUS,
                "description": "Horizontal orbit radius of the eye"
            },
            "height": {
                "type": "number",
                "default": DEFAULT_HEIGHT,
                "description": "Vertical swing of the eye, in phase with x"
            },
            "target": {
                "type": "vec3",
                "default": [0.0, 0.0, 0.0],
                "description": "Point the camera looks at"
            },
            "up": {
                "type": "vec3",
                "default": [0.0, 1.0, 0.0],
                "description": "Camera up vector, also drawn as a white line from the target"
            },
            "spin_axis": {
                "type": "vec3",
                "default": [0.0, 1.0, 1.0],
                "description": "Axis the spinning front triangle turns about"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gl_lessons_core::{FrameCommand, Primitive};

    fn lesson_plan(elapsed_ms: u64) -> (View, Mat4, FramePlan) {
        let lesson = View::default();
        let projection = lesson.projection(800, 600).unwrap();
        let plan = lesson.frame(Duration::from_millis(elapsed_ms), &projection);
        (lesson, projection, plan)
    }

    #[test]
    fn vertex_buffer_holds_sixty_floats() {
        let lesson = View::default();
        assert_eq!(lesson.vertices().vertex_count(), VERTEX_COUNT);
        assert_eq!(lesson.vertices().len(), 60);
    }

    #[test]
    fn axes_span_minus_three_to_three() {
        let lesson = View::default();
        let v = |i| lesson.vertices().position(i).unwrap();
        assert_eq!(v(12), Vec3::new(-3.0, 0.0, 0.0));
        assert_eq!(v(13), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(v(14), Vec3::new(0.0, -3.0, 0.0));
        assert_eq!(v(15), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(v(16), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(v(17), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn up_marker_follows_configured_camera() {
        let lesson = View::from_json(&json!({"target": [1, 0, 0], "up": [0, 0, 1]}));
        assert_eq!(lesson.vertices().position(18), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(lesson.vertices().position(19), Some(Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn eye_follows_orbit() {
        let lesson = View::default();
        let start = lesson.eye(Duration::ZERO);
        assert!((start - Vec3::new(4.0, 3.0, 0.0)).length() < 1e-5);
        let quarter = lesson.eye(Duration::from_millis(2_500));
        assert!((quarter - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn frame_validates_against_buffer() {
        let (_, _, plan) = lesson_plan(1_234);
        assert!(plan.validate(VERTEX_COUNT).is_ok());
    }

    #[test]
    fn frame_draw_sequence_matches_scene_layout() {
        let (_, _, plan) = lesson_plan(0);
        let draws: Vec<_> = plan.draws().copied().collect();
        assert_eq!(
            draws,
            vec![
                DrawCall::triangles(0, 3, Rgba::GREEN),
                DrawCall::triangles(0, 3, Rgba::GREEN),
                DrawCall::triangles(3, 3, Rgba::BLUE),
                DrawCall::triangles(6, 3, Rgba::RED),
                DrawCall::triangles(9, 3, Rgba::YELLOW),
                DrawCall::lines(12, 2, Rgba::CYAN),
                DrawCall::lines(14, 2, Rgba::MAGENTA),
                DrawCall::lines(16, 2, Rgba::ORANGE),
                DrawCall::lines(18, 2, Rgba::WHITE),
            ]
        );
        let lines = draws.iter().filter(|d| d.primitive == Primitive::Lines).count();
        assert_eq!(lines, 4);
    }

    #[test]
    fn line_widths_are_one_for_axes_and_three_for_up_vector() {
        let (_, _, plan) = lesson_plan(0);
        let widths: Vec<f32> = plan
            .commands()
            .iter()
            .filter_map(|c| match c {
                FrameCommand::SetLineWidth { width } => Some(*width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![1.0, 3.0]);
    }

    #[test]
    fn scene_is_drawn_with_projection_times_view() {
        let (lesson, projection, plan) = lesson_plan(3_300);
        let expected = projection * lesson.camera().view_matrix(Duration::from_millis(3_300));
        assert_eq!(plan.bound_matrix(), Some(expected));
    }

    #[test]
    fn matrix_is_rebound_between_spinning_and_static_passes() {
        let (_, _, plan) = lesson_plan(2_000);
        let matrices: Vec<Mat4> = plan
            .commands()
            .iter()
            .filter_map(|c| match c {
                FrameCommand::SetMatrix { matrix } => Some(*matrix),
                _ => None,
            })
            .collect();
        assert_eq!(matrices.len(), 2);
        assert_ne!(matrices[0], matrices[1]);
    }

    #[test]
    fn at_period_start_spin_is_identity_so_one_matrix_suffices() {
        let (_, _, plan) = lesson_plan(0);
        let binds = plan
            .commands()
            .iter()
            .filter(|c| matches!(c, FrameCommand::SetMatrix { .. }))
            .count();
        assert_eq!(binds, 1);
    }

    #[test]
    fn view_changes_with_time() {
        let lesson = View::default();
        let p = lesson.projection(100, 100).unwrap();
        let a = lesson.frame(Duration::from_millis(100), &p);
        let b = lesson.frame(Duration::from_millis(2_600), &p);
        assert_ne!(a.bound_matrix(), b.bound_matrix());
        let wrapped = lesson.frame(Duration::from_millis(10_100), &p);
        assert_eq!(a.bound_matrix(), wrapped.bound_matrix());
    }

    #[test]
    fn from_json_reads_camera_params() {
        let lesson = View::from_json(&json!({"period_ms": 4000, "radius": 5.0, "height": 1}));
        assert_eq!(lesson.camera().period_ms, 4000);
        assert_eq!(lesson.camera().radius, 5.0);
        assert_eq!(lesson.camera().height, 1.0);
        let p = lesson.params();
        assert_eq!(p["period_ms"], 4000);
        assert_eq!(p["up"], json!([0.0, 1.0, 0.0]));
    }

    #[test]
    fn param_schema_covers_all_params() {
        let lesson = View::default();
        let params = lesson.params();
        let schema = lesson.param_schema();
        for key in params.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
            assert!(schema[key].get("description").is_some(), "{key} missing description");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_frame_is_valid(ms in 0_u64..100_000, w in 1_u32..2048, h in 1_u32..2048) {
                let lesson = View::default();
                let p = lesson.projection(w, h).unwrap();
                let plan = lesson.frame(Duration::from_millis(ms), &p);
                prop_assert!(plan.validate(VERTEX_COUNT).is_ok());
                prop_assert_eq!(plan.draws().count(), 9);
            }

            #[test]
            fn origin_is_always_in_front_of_the_camera(ms in 0_u64..10_000) {
                let lesson = View::default();
                let view = lesson.camera().view_matrix(Duration::from_millis(ms));
                let origin = view.transform_point3(Vec3::ZERO);
                let distance = lesson.eye(Duration::from_millis(ms)).length();
                prop_assert!((origin.z + distance).abs() < 1e-4, "origin at {}", origin);
                prop_assert!(origin.truncate().length() < 1e-4);
            }
        }
    }
}
