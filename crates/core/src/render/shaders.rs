//! The flat-color shader pair shared by every lesson.
//!
//! Written in GLSL ES 1.00 so the same text compiles on GLES2 devices and
//! on WebGL2 contexts.

/// Name of the position attribute.
pub const POSITION_ATTRIBUTE: &str = "a_Position";
/// Name of the solid color uniform.
pub const COLOR_UNIFORM: &str = "u_Color";
/// Name of the combined transform uniform.
pub const MATRIX_UNIFORM: &str = "u_Matrix";

/// Transforms each position by `u_Matrix`.
pub const VERTEX_SHADER: &str = r#"#version 100
attribute vec4 a_Position;
uniform mat4 u_Matrix;

void main() {
    gl_Position = u_Matrix * a_Position;
}
"#;

/// Fills every fragment with `u_Color`.
pub const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
uniform vec4 u_Color;

void main() {
    gl_FragColor = u_Color;
}
"#;
