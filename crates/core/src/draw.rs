//! Recorded per-frame draw sequences.
//!
//! A lesson does not talk to GL directly when drawing. It returns a
//! [`FramePlan`], which the GL renderer replays with real calls and the CPU
//! rasterizer replays into a pixel buffer. The plan is plain data, so the
//! draw order, colors and bound transforms can be checked without a context.

use crate::color::Rgba;
use crate::error::LessonError;
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Primitive topology of a draw-arrays call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Triangles,
    Lines,
}

impl Primitive {
    /// Vertices consumed by one primitive.
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Primitive::Triangles => 3,
            Primitive::Lines => 2,
        }
    }
}

/// One `glDrawArrays` call preceded by a solid `u_Color`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub first: usize,
    pub count: usize,
    pub color: Rgba,
}

impl DrawCall {
    pub fn triangles(first: usize, count: usize, color: Rgba) -> Self {
        Self {
            primitive: Primitive::Triangles,
            first,
            count,
            color,
        }
    }

    pub fn lines(first: usize, count: usize, color: Rgba) -> Self {
        Self {
            primitive: Primitive::Lines,
            first,
            count,
            color,
        }
    }

    /// One past the last vertex read.
    pub fn end(&self) -> usize {
        self.first + self.count
    }
}

/// A single step of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum FrameCommand {
    /// Clear the color and depth buffers.
    Clear,
    /// Upload a combined transform to `u_Matrix`.
    SetMatrix { matrix: Mat4 },
    /// Set the rasterized line width in pixels.
    SetLineWidth { width: f32 },
    /// Set `u_Color` and draw.
    Draw(DrawCall),
}

/// An ordered list of frame commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FramePlan {
    commands: Vec<FrameCommand>,
}

impl FramePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clear of color and depth.
    pub fn clear(&mut self) -> &mut Self {
        self.commands.push(FrameCommand::Clear);
        self
    }

    /// Binds `matrix`, skipping the upload when it equals the bound one.
    pub fn set_matrix(&mut self, matrix: Mat4) -> &mut Self {
        if self.bound_matrix() != Some(matrix) {
            self.commands.push(FrameCommand::SetMatrix { matrix });
        }
        self
    }

    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.commands.push(FrameCommand::SetLineWidth { width });
        self
    }

    pub fn draw(&mut self, call: DrawCall) -> &mut Self {
        self.commands.push(FrameCommand::Draw(call));
        self
    }

    pub fn commands(&self) -> &[FrameCommand] {
        &self.commands
    }

    /// The draw calls in issue order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.commands.iter().filter_map(|c| match c {
            FrameCommand::Draw(call) => Some(call),
            _ => None,
        })
    }

    /// The matrix that is bound at the end of the plan so far.
    pub fn bound_matrix(&self) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            FrameCommand::SetMatrix { matrix } => Some(*matrix),
            _ => None,
        })
    }

    /// Checks that every draw reads inside a buffer of `vertex_count`
    /// vertices and that a matrix is bound before the first draw.
    ///
    /// # Errors
    ///
    /// `LessonError::DrawOutOfRange` or `LessonError::MatrixNotBound`.
    pub fn validate(&self, vertex_count: usize) -> Result<(), LessonError> {
        let mut matrix_bound = false;
        for command in &self.commands {
            match command {
                FrameCommand::SetMatrix { .. } => matrix_bound = true,
                FrameCommand::Draw(call) => {
                    if !matrix_bound {
                        return Err(LessonError::MatrixNotBound);
                    }
                    if call.end() > vertex_count {
                        return Err(LessonError::DrawOutOfRange {
                            first: call.first,
                            end: call.end(),
                            vertex_count,
                        });
                    }
                }
                FrameCommand::Clear | FrameCommand::SetLineWidth { .. } => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn builder_records_commands_in_order() {
        let mut plan = FramePlan::new();
        plan.clear()
            .set_matrix(Mat4::IDENTITY)
            .draw(DrawCall::triangles(0, 3, Rgba::GREEN))
            .set_line_width(2.0)
            .draw(DrawCall::lines(3, 2, Rgba::WHITE));

        assert_eq!(plan.commands().len(), 5);
        assert_eq!(plan.commands()[0], FrameCommand::Clear);
        assert_eq!(
            plan.commands()[3],
            FrameCommand::SetLineWidth { width: 2.0 }
        );
        let prims: Vec<_> = plan.draws().map(|d| d.primitive).collect();
        assert_eq!(prims, vec![Primitive::Triangles, Primitive::Lines]);
    }

    #[test]
    fn set_matrix_skips_redundant_upload() {
        let mut plan = FramePlan::new();
        plan.set_matrix(Mat4::IDENTITY).set_matrix(Mat4::IDENTITY);
        assert_eq!(plan.commands().len(), 1);
    }

    #[test]
    fn set_matrix_rebinds_when_transform_changes() {
        let moved = Mat4::from_translation(Vec3::X);
        let mut plan = FramePlan::new();
        plan.set_matrix(Mat4::IDENTITY)
            .set_matrix(moved)
            .set_matrix(Mat4::IDENTITY);
        assert_eq!(plan.commands().len(), 3);
        assert_eq!(plan.bound_matrix(), Some(Mat4::IDENTITY));
    }

    #[test]
    fn validate_accepts_in_range_draws() {
        let mut plan = FramePlan::new();
        plan.set_matrix(Mat4::IDENTITY)
            .draw(DrawCall::triangles(0, 3, Rgba::RED))
            .draw(DrawCall::triangles(3, 3, Rgba::BLUE));
        assert!(plan.validate(6).is_ok());
    }

    #[test]
    fn validate_rejects_draw_past_buffer_end() {
        let mut plan = FramePlan::new();
        plan.set_matrix(Mat4::IDENTITY)
            .draw(DrawCall::lines(18, 3, Rgba::WHITE));
        assert!(matches!(
            plan.validate(20),
            Err(LessonError::DrawOutOfRange {
                first: 18,
                end: 21,
                vertex_count: 20
            })
        ));
    }

    #[test]
    fn validate_rejects_draw_without_matrix() {
        let mut plan = FramePlan::new();
        plan.clear().draw(DrawCall::triangles(0, 3, Rgba::RED));
        assert!(matches!(plan.validate(3), Err(LessonError::MatrixNotBound)));
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let mut plan = FramePlan::new();
        plan.clear().set_line_width(3.0);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["commands"][0]["op"], "clear");
        assert_eq!(json["commands"][1]["op"], "set_line_width");
        assert_eq!(json["commands"][1]["width"], 3.0);
    }

    #[test]
    fn vertices_per_primitive() {
        assert_eq!(Primitive::Triangles.vertices_per_primitive(), 3);
        assert_eq!(Primitive::Lines.vertices_per_primitive(), 2);
    }
}
