//! Host surface callbacks driving a [`Lesson`] on a GL context.
//!
//! The three entry points mirror a host render loop: `surface_created` once
//! the context is current, `surface_changed` on every resize, and
//! `draw_frame` once per frame. Each call runs to completion on the host's
//! render thread.

use super::buffer::VertexBuffer;
use super::error::RenderError;
use super::program::ColorProgram;
use crate::draw::{FrameCommand, FramePlan, Primitive};
use crate::lesson::Lesson;
use glam::Mat4;
use std::time::Duration;

/// GL draw mode for a primitive.
pub fn gl_mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Triangles => glow::TRIANGLES,
        Primitive::Lines => glow::LINES,
    }
}

/// Owns the program and vertex buffer built for one lesson on one surface.
pub struct Renderer {
    lesson: Box<dyn Lesson>,
    program: ColorProgram,
    vertices: VertexBuffer,
    projection: Mat4,
}

impl Renderer {
    /// Sets up fixed state, builds the program, and uploads the lesson's vertices.
    ///
    /// The projection stays the identity until the first `surface_changed`.
    ///
    /// # Errors
    ///
    /// Shader compile/link failures, a missing `a_Position`, or a failed
    /// buffer allocation.
    #[allow(unsafe_code)]
    pub fn surface_created(
        gl: &glow::Context,
        lesson: Box<dyn Lesson>,
    ) -> Result<Self, RenderError> {
        use glow::HasContext;

        let clear = lesson.clear_color();
        // SAFETY: plain state setters on the current context.
        unsafe {
            gl.clear_color(clear.r, clear.g, clear.b, clear.a);
            gl.enable(glow::DEPTH_TEST);
        }

        let program = ColorProgram::new(gl)?;
        program.activate(gl);

        let vertices = match VertexBuffer::upload(gl, lesson.vertices()) {
            Ok(v) => v,
            Err(e) => {
                program.destroy(gl);
                return Err(e);
            }
        };
        vertices.bind_positions(gl, program.position_location());

        log::info!("surface created for lesson {}", lesson.name());

        Ok(Self {
            lesson,
            program,
            vertices,
            projection: Mat4::IDENTITY,
        })
    }

    /// Resizes the viewport and recomputes the projection.
    ///
    /// # Errors
    ///
    /// `LessonError::InvalidViewport` (wrapped) for a zero dimension; the
    /// previous projection is kept.
    #[allow(unsafe_code)]
    pub fn surface_changed(
        &mut self,
        gl: &glow::Context,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        use glow::HasContext;

        self.projection = self.lesson.projection(width, height)?;

        let w = width.min(i32::MAX as u32) as i32;
        let h = height.min(i32::MAX as u32) as i32;
        // SAFETY: viewport takes any non-negative size.
        unsafe { gl.viewport(0, 0, w, h) };

        self.program.activate(gl);
        self.program.set_matrix(gl, &self.projection);

        log::info!("surface changed to {width}x{height}");
        Ok(())
    }

    /// Draws the lesson's frame at `elapsed`.
    ///
    /// # Errors
    ///
    /// The frame plan is validated against the uploaded buffer before any
    /// GL call is made; an out-of-range draw aborts the frame.
    pub fn draw_frame(&self, gl: &glow::Context, elapsed: Duration) -> Result<(), RenderError> {
        let plan = self.lesson.frame(elapsed, &self.projection);
        plan.validate(self.vertices.vertex_count())?;
        self.execute(gl, &plan);
        Ok(())
    }

    /// Replays a validated plan as GL calls.
    #[allow(unsafe_code)]
    fn execute(&self, gl: &glow::Context, plan: &FramePlan) {
        use glow::HasContext;

        for command in plan.commands() {
            match command {
                // SAFETY (all arms): state setters and draws on the current
                // context, with draw ranges checked by `FramePlan::validate`.
                FrameCommand::Clear => unsafe {
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                },
                FrameCommand::SetMatrix { matrix } => self.program.set_matrix(gl, matrix),
                FrameCommand::SetLineWidth { width } => unsafe { gl.line_width(*width) },
                FrameCommand::Draw(call) => {
                    self.program.set_color(gl, call.color);
                    unsafe {
                        gl.draw_arrays(gl_mode(call.primitive), call.first as i32, call.count as i32);
                    }
                }
            }
        }
    }

    /// The lesson being rendered.
    pub fn lesson(&self) -> &dyn Lesson {
        self.lesson.as_ref()
    }

    /// The projection from the last successful `surface_changed`.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Releases the program and buffer.
    pub fn destroy(self, gl: &glow::Context) {
        self.vertices.destroy(gl);
        self.program.destroy(gl);
    }
}
