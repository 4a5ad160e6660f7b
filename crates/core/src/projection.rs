//! Perspective frustum sized to the viewport aspect ratio.

use crate::error::LessonError;
use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

/// Clip bounds of a perspective projection volume.
///
/// `left/right/bottom/top` are measured on the near plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    /// Builds a frustum for a `width x height` viewport.
    ///
    /// Starts from the unit bounds (-1, 1, -1, 1). A landscape viewport widens
    /// left/right by `width / height`; anything else (portrait or square)
    /// stretches bottom/top by `height / width`, which is a no-op for a square.
    ///
    /// # Errors
    ///
    /// `LessonError::InvalidViewport` for a zero dimension and
    /// `LessonError::InvalidDepthRange` unless `0 < near < far`.
    pub fn for_viewport(width: u32, height: u32, near: f32, far: f32) -> Result<Self, LessonError> {
        if width == 0 || height == 0 {
            return Err(LessonError::InvalidViewport { width, height });
        }
        if !(near > 0.0 && far > near) {
            return Err(LessonError::InvalidDepthRange { near, far });
        }

        let (mut left, mut right, mut bottom, mut top) = (-1.0_f32, 1.0_f32, -1.0_f32, 1.0_f32);
        if width > height {
            let ratio = width as f32 / height as f32;
            left *= ratio;
            right *= ratio;
        } else {
            let ratio = height as f32 / width as f32;
            bottom *= ratio;
            top *= ratio;
        }

        Ok(Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        })
    }

    /// The OpenGL perspective matrix for this frustum (`glFrustum` layout).
    pub fn to_mat4(&self) -> Mat4 {
        let Self {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;

        let width = r - l;
        let height = t - b;
        let depth = f - n;

        Mat4::from_cols(
            Vec4::new(2.0 * n / width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n / height, 0.0, 0.0),
            Vec4::new((r + l) / width, (t + b) / height, -(f + n) / depth, -1.0),
            Vec4::new(0.0, 0.0, -2.0 * f * n / depth, 0.0),
        )
    }
}
