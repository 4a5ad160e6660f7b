//! The linked flat-color program and its attribute/uniform handles.

use super::error::RenderError;
use super::shader::compile_program;
use super::shaders::{
    COLOR_UNIFORM, FRAGMENT_SHADER, MATRIX_UNIFORM, POSITION_ATTRIBUTE, VERTEX_SHADER,
};
use crate::color::Rgba;
use glam::Mat4;

/// A linked program plus the locations the lessons write to.
///
/// A uniform the driver optimized away resolves to `None`; uploads to it are
/// silently ignored, as GL does for location -1.
pub struct ColorProgram {
    program: glow::Program,
    position: u32,
    color: Option<glow::UniformLocation>,
    matrix: Option<glow::UniformLocation>,
}

impl ColorProgram {
    /// Compiles and links the bundled shaders and resolves the locations.
    ///
    /// # Errors
    ///
    /// `RenderError::Shader` on compile/link failure and
    /// `RenderError::MissingAttribute` if `a_Position` is not active.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self, RenderError> {
        use glow::HasContext;

        let program = compile_program(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        // SAFETY: `program` is a freshly linked program handle.
        let position = unsafe { gl.get_attrib_location(program, POSITION_ATTRIBUTE) };
        let Some(position) = position else {
            unsafe { gl.delete_program(program) };
            return Err(RenderError::MissingAttribute(POSITION_ATTRIBUTE));
        };
        let color = unsafe { gl.get_uniform_location(program, COLOR_UNIFORM) };
        let matrix = unsafe { gl.get_uniform_location(program, MATRIX_UNIFORM) };

        if color.is_none() {
            log::warn!("uniform {COLOR_UNIFORM} is not active");
        }
        if matrix.is_none() {
            log::warn!("uniform {MATRIX_UNIFORM} is not active");
        }

        Ok(Self {
            program,
            position,
            color,
            matrix,
        })
    }

    /// Location of `a_Position`.
    pub fn position_location(&self) -> u32 {
        self.position
    }

    /// Makes this the current program.
    #[allow(unsafe_code)]
    pub fn activate(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: `self.program` is a live program from `new`.
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Uploads `u_Color`. The program must be current.
    #[allow(unsafe_code)]
    pub fn set_color(&self, gl: &glow::Context, color: Rgba) {
        use glow::HasContext;
        // SAFETY: the location belongs to this program.
        unsafe {
            gl.uniform_4_f32(self.color.as_ref(), color.r, color.g, color.b, color.a);
        }
    }

    /// Uploads `u_Matrix` (column-major). The program must be current.
    #[allow(unsafe_code)]
    pub fn set_matrix(&self, gl: &glow::Context, matrix: &Mat4) {
        use glow::HasContext;
        // SAFETY: the location belongs to this program; the slice holds 16 floats.
        unsafe {
            gl.uniform_matrix_4_f32_slice(self.matrix.as_ref(), false, &matrix.to_cols_array());
        }
    }

    /// Deletes the program.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: `self.program` is a live program from `new`.
        unsafe { gl.delete_program(self.program) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_program_exposes_expected_api() {
        fn _assert_api(gl: &glow::Context, p: &ColorProgram) {
            let _loc: u32 = p.position_location();
            p.activate(gl);
            p.set_color(gl, Rgba::GREEN);
            p.set_matrix(gl, &Mat4::IDENTITY);
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_resolves_all_locations() {
        // Would test: ColorProgram::new(gl) finds a_Position, u_Color and u_Matrix.
    }
}
