//! CPU replay of a [`FramePlan`] into an RGBA8 image.
//!
//! Follows the fixed-function GL conventions the lessons rely on: clip space
//! through the bound matrix, perspective divide, viewport mapping with the
//! origin at the bottom-left, depth range [0, 1] cleared to 1.0, and a `LESS`
//! depth test. Triangles are filled by edge functions sampled at pixel centers
//! with no face culling. Lines are stepped with a DDA and widened to a square
//! brush of the current line width.
//!
//! Lines are clipped against the near and far planes. Triangles with a vertex
//! in front of the near plane are dropped whole; the lessons keep every
//! triangle well inside the frustum, so clipping them is not needed.

use gl_lessons_core::error::LessonError;
use gl_lessons_core::frame_spec::check_viewport;
use gl_lessons_core::{FrameCommand, FramePlan, Lesson, Primitive, Rgba, VertexData};
use glam::{Mat4, Vec3, Vec4};
use std::time::Duration;

/// A point after the viewport transform: pixel x/y (bottom-left origin) and
/// window depth in [0, 1].
#[derive(Debug, Clone, Copy)]
struct ScreenPoint {
    x: f32,
    y: f32,
    depth: f32,
}

/// Color and depth buffers for one frame.
pub struct Rasterizer {
    width: u32,
    height: u32,
    clear: [u8; 4],
    pixels: Vec<u8>,
    depth: Vec<f32>,
}

impl Rasterizer {
    /// Allocates buffers for a `width x height` target cleared to `clear`.
    ///
    /// Returns `LessonError::InvalidViewport` for a zero side or a side above
    /// `MAX_VIEWPORT`.
    pub fn new(width: u32, height: u32, clear: Rgba) -> Result<Self, LessonError> {
        check_viewport(width, height)?;
        let len = width as usize * height as usize;
        let clear = clear.to_rgba8();
        Ok(Self {
            width,
            height,
            clear,
            pixels: clear.repeat(len),
            depth: vec![1.0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixels, rows top to bottom.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The pixel at column `x`, row `row` counted from the top.
    pub fn pixel(&self, x: u32, row: u32) -> Option<[u8; 4]> {
        if x >= self.width || row >= self.height {
            return None;
        }
        let i = (row as usize * self.width as usize + x as usize) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    /// Replays `plan` reading positions from `vertices`.
    ///
    /// The plan is validated first, so a bad draw range leaves the buffers
    /// untouched.
    pub fn execute(&mut self, plan: &FramePlan, vertices: &VertexData) -> Result<(), LessonError> {
        plan.validate(vertices.vertex_count())?;

        let mut matrix = Mat4::IDENTITY;
        let mut line_width = 1.0_f32;

        for command in plan.commands() {
            match command {
                FrameCommand::Clear => self.clear(),
                FrameCommand::SetMatrix { matrix: m } => matrix = *m,
                FrameCommand::SetLineWidth { width } => line_width = *width,
                FrameCommand::Draw(call) => {
                    let clip: Vec<Vec4> = (call.first..call.end())
                        .filter_map(|i| vertices.position(i))
                        .map(|p| matrix * p.extend(1.0))
                        .collect();
                    let color = call.color.to_rgba8();
                    match call.primitive {
                        Primitive::Triangles => {
                            for tri in clip.chunks_exact(3) {
                                self.fill_triangle([tri[0], tri[1], tri[2]], color);
                            }
                        }
                        Primitive::Lines => {
                            for seg in clip.chunks_exact(2) {
                                self.draw_line(seg[0], seg[1], line_width, color);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&self.clear);
        }
        self.depth.fill(1.0);
    }

    fn to_screen(&self, clip: Vec4) -> ScreenPoint {
        let ndc: Vec3 = clip.truncate() / clip.w;
        ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (ndc.y + 1.0) * 0.5 * self.height as f32,
            depth: ndc.z * 0.5 + 0.5,
        }
    }

    /// Depth-tested write at pixel (`x`, `y`) with `y` counted from the bottom.
    fn plot(&mut self, x: i64, y: i64, depth: f32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        if !(0.0..=1.0).contains(&depth) {
            return;
        }
        let row = (i64::from(self.height) - 1 - y) as usize;
        let idx = row * self.width as usize + x as usize;
        if depth < self.depth[idx] {
            self.depth[idx] = depth;
            self.pixels[idx * 4..idx * 4 + 4].copy_from_slice(&color);
        }
    }

    fn fill_triangle(&mut self, clip: [Vec4; 3], color: [u8; 4]) {
        if clip.iter().any(|c| c.w <= 0.0 || c.z < -c.w) {
            return;
        }
        let [a, b, c] = clip.map(|v| self.to_screen(v));

        let area = edge(a, b, c.x, c.y);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i64;
        let max_x = a.x.max(b.x).max(c.x).ceil().min(self.width as f32) as i64;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i64;
        let max_y = a.y.max(b.y).max(c.y).ceil().min(self.height as f32) as i64;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                // Normalized by the signed area so either winding yields
                // non-negative weights inside.
                let wa = edge(b, c, px, py) / area;
                let wb = edge(c, a, px, py) / area;
                let wc = edge(a, b, px, py) / area;
                if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                    continue;
                }
                let depth = wa * a.depth + wb * b.depth + wc * c.depth;
                self.plot(x, y, depth, color);
            }
        }
    }

    fn draw_line(&mut self, from: Vec4, to: Vec4, width: f32, color: [u8; 4]) {
        let Some((from, to)) = clip_depth(from, to) else {
            return;
        };
        let a = self.to_screen(from);
        let b = self.to_screen(to);

        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        let brush = width.round().max(1.0) as i64;
        let lo = -(brush - 1) / 2;
        let hi = brush / 2;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (a.x + dx * t).floor() as i64;
            let y = (a.y + dy * t).floor() as i64;
            let depth = a.depth + (b.depth - a.depth) * t;
            for oy in lo..=hi {
                for ox in lo..=hi {
                    self.plot(x + ox, y + oy, depth, color);
                }
            }
        }
    }
}

/// Signed doubled area of (a, b, p); positive when p is left of a->b.
fn edge(a: ScreenPoint, b: ScreenPoint, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Clips a segment to `-w <= z <= w` in clip space.
fn clip_depth(from: Vec4, to: Vec4) -> Option<(Vec4, Vec4)> {
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    // Each plane as a signed distance that must stay non-negative.
    let planes: [fn(Vec4) -> f32; 2] = [|v| v.w + v.z, |v| v.w - v.z];
    for dist in planes {
        let d0 = dist(from);
        let d1 = dist(to);
        if d0 < 0.0 && d1 < 0.0 {
            return None;
        }
        if d0 < 0.0 {
            t0 = t0.max(d0 / (d0 - d1));
        } else if d1 < 0.0 {
            t1 = t1.min(d0 / (d0 - d1));
        }
    }
    if t0 > t1 {
        return None;
    }
    let a = from.lerp(to, t0);
    let b = from.lerp(to, t1);
    if a.w <= 0.0 || b.w <= 0.0 {
        return None;
    }
    Some((a, b))
}

/// Runs one frame of `lesson` on a CPU target.
pub fn render_frame(
    lesson: &dyn Lesson,
    width: u32,
    height: u32,
    elapsed: Duration,
) -> Result<Rasterizer, LessonError> {
    let projection = lesson.projection(width, height)?;
    let plan = lesson.frame(elapsed, &projection);
    let mut target = Rasterizer::new(width, height, lesson.clear_color())?;
    target.execute(&plan, lesson.vertices())?;
    log::debug!(
        "rasterized {} at {}ms ({} commands)",
        lesson.name(),
        elapsed.as_millis(),
        plan.commands().len()
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LessonKind;
    use gl_lessons_core::frame_spec::MAX_VIEWPORT;
    use gl_lessons_core::DrawCall;
    use serde_json::json;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];

    /// Two overlapping squares-worth of triangles at z = -0.5 (near) and z = 0.5 (far),
    /// drawn through the identity so NDC equals the positions.
    fn overlapping() -> VertexData {
        VertexData::from_floats(vec![
            -1.0, -1.0, -0.5, 1.0, -1.0, -0.5, 0.0, 1.0, -0.5, //
            -1.0, -1.0, 0.5, 1.0, -1.0, 0.5, 0.0, 1.0, 0.5,
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_empty_target() {
        assert!(Rasterizer::new(0, 4, Rgba::BLACK).is_err());
    }

    #[test]
    fn new_rejects_oversized_target_without_allocating() {
        for (w, h) in [(u32::MAX, u32::MAX), (100_000, 100_000), (MAX_VIEWPORT + 1, 1)] {
            assert!(
                matches!(
                    Rasterizer::new(w, h, Rgba::BLACK),
                    Err(LessonError::InvalidViewport { .. })
                ),
                "{w}x{h}"
            );
        }
    }

    #[test]
    fn render_frame_rejects_oversized_viewport() {
        let lesson = LessonKind::from_name("view", &json!({})).unwrap();
        assert!(render_frame(&lesson, u32::MAX, u32::MAX, Duration::ZERO).is_err());
    }

    #[test]
    fn clear_fills_with_clear_color() {
        let mut r = Rasterizer::new(4, 3, Rgba::RED).unwrap();
        let mut plan = FramePlan::new();
        plan.clear();
        r.execute(&plan, &VertexData::from_floats(Vec::new()).unwrap())
            .unwrap();
        assert!(r.pixels().chunks_exact(4).all(|p| p == RED));
        assert_eq!(r.pixels().len(), 4 * 3 * 4);
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let mut plan = FramePlan::new();
        plan.clear()
            .set_matrix(Mat4::IDENTITY)
            .draw(DrawCall::triangles(0, 3, Rgba::GREEN))
            .draw(DrawCall::triangles(3, 3, Rgba::BLUE));
        let mut r = Rasterizer::new(16, 16, Rgba::BLACK).unwrap();
        r.execute(&plan, &overlapping()).unwrap();
        assert_eq!(r.pixel(8, 10), Some(GREEN));
    }

    #[test]
    fn triangle_fill_respects_bottom_left_origin() {
        // Apex at the top of NDC: the top-left corner stays empty, the
        // bottom row center is covered.
        let mut plan = FramePlan::new();
        plan.clear()
            .set_matrix(Mat4::IDENTITY)
            .draw(DrawCall::triangles(0, 3, Rgba::GREEN));
        let mut r = Rasterizer::new(16, 16, Rgba::BLACK).unwrap();
        r.execute(&plan, &overlapping()).unwrap();
        assert_eq!(r.pixel(0, 0), Some(BLACK));
        assert_eq!(r.pixel(8, 15), Some(GREEN));
    }

    #[test]
    fn execute_rejects_out_of_range_plan_without_drawing() {
        let mut plan = FramePlan::new();
        plan.set_matrix(Mat4::IDENTITY)
            .draw(DrawCall::triangles(3, 6, Rgba::GREEN));
        let mut r = Rasterizer::new(8, 8, Rgba::BLACK).unwrap();
        assert!(r.execute(&plan, &overlapping()).is_err());
        assert!(r.pixels().chunks_exact(4).all(|p| p == BLACK));
    }

    #[test]
    fn line_width_widens_brush() {
        let vertices =
            VertexData::from_floats(vec![-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
        let count_lit = |width: f32| {
            let mut plan = FramePlan::new();
            plan.clear()
                .set_matrix(Mat4::IDENTITY)
                .set_line_width(width)
                .draw(DrawCall::lines(0, 2, Rgba::WHITE));
            let mut r = Rasterizer::new(20, 20, Rgba::BLACK).unwrap();
            r.execute(&plan, &vertices).unwrap();
            (0..20).filter(|&row| r.pixel(10, row) != Some(BLACK)).count()
        };
        assert_eq!(count_lit(1.0), 1);
        assert_eq!(count_lit(3.0), 3);
    }

    #[test]
    fn clip_depth_trims_segment_crossing_near_plane() {
        let from = Vec4::new(0.0, 0.0, -3.0, 1.0); // in front of near (z < -w)
        let to = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let (a, b) = clip_depth(from, to).unwrap();
        assert!((a.z + a.w).abs() < 1e-6, "a = {a}");
        assert_eq!(b, to);
    }

    #[test]
    fn clip_depth_drops_segment_outside_one_plane() {
        let from = Vec4::new(0.0, 0.0, 2.0, 1.0);
        let to = Vec4::new(0.0, 0.0, 3.0, 1.0);
        assert!(clip_depth(from, to).is_none());
    }

    #[test]
    fn perspective_lesson_shows_both_triangles_with_blue_in_front() {
        let lesson = LessonKind::from_name("perspective", &json!({})).unwrap();
        let r = render_frame(&lesson, 100, 100, Duration::ZERO).unwrap();
        // NDC (-0.25, -0.2): only the far green triangle.
        assert_eq!(r.pixel(37, 59), Some(GREEN));
        // NDC (0.0, -0.1): both overlap; the nearer blue one is kept.
        assert_eq!(r.pixel(50, 54), Some(BLUE));
        assert_eq!(r.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn view_lesson_front_triangle_and_x_axis_at_quarter_turn() {
        // At 2.5 s the eye sits on +z looking straight at the origin.
        let lesson = LessonKind::from_name("view", &json!({})).unwrap();
        let r = render_frame(&lesson, 200, 200, Duration::from_millis(2_500)).unwrap();
        assert_eq!(r.pixel(95, 110), Some(GREEN));
        assert_eq!(r.pixel(0, 0), Some(BLACK));
        let cyan = [0, 255, 255, 255];
        assert!(
            (98..=101).any(|row| r.pixel(20, row) == Some(cyan)),
            "expected the x axis near the horizontal center line"
        );
    }

    #[test]
    fn render_frame_rejects_empty_viewport() {
        let lesson = LessonKind::from_name("view", &json!({})).unwrap();
        assert!(render_frame(&lesson, 0, 10, Duration::ZERO).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_view_frame_rasterizes(ms in 0_u64..20_000, w in 1_u32..96, h in 1_u32..96) {
                let lesson = LessonKind::from_name("view", &json!({})).unwrap();
                let r = render_frame(&lesson, w, h, Duration::from_millis(ms)).unwrap();
                prop_assert_eq!(r.pixels().len(), (w * h * 4) as usize);
            }
        }
    }
}
