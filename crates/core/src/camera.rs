//! Time-driven camera orbit and model spin.
//!
//! Both are pure functions of the elapsed time: the orbit phase is
//! `(elapsed_ms mod period) / period`, so the motion repeats every period
//! and never accumulates drift across frames.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::time::Duration;

/// Default orbit period in milliseconds.
pub const DEFAULT_PERIOD_MS: u64 = 10_000;
/// Default horizontal orbit radius (x and z amplitude).
pub const DEFAULT_RADIUS: f32 = 4.0;
/// Default vertical amplitude (y follows the x cosine).
pub const DEFAULT_HEIGHT: f32 = 3.0;

/// Fraction of the period elapsed, in [0, 1).
///
/// A zero period is treated as a stopped clock and always yields 0.
pub fn phase(elapsed: Duration, period_ms: u64) -> f32 {
    if period_ms == 0 {
        return 0.0;
    }
    let ms = elapsed.as_millis() % u128::from(period_ms);
    // f32 rounds ratios just below 1 up to 1 for long periods.
    ((ms as f64 / period_ms as f64) as f32).min(1.0 - f32::EPSILON)
}

/// A camera circling the target on a tilted ellipse.
///
/// At phase `t` the eye sits at `(cos a * radius, cos a * height, sin a * radius)`
/// with `a = t * 2π`, looking at `target` with the given `up` vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    pub period_ms: u64,
    pub radius: f32,
    pub height: f32,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            radius: DEFAULT_RADIUS,
            height: DEFAULT_HEIGHT,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl OrbitCamera {
    /// Eye position at a phase fraction `t` of the orbit.
    pub fn eye_at_phase(&self, t: f32) -> Vec3 {
        let angle = t * TAU;
        let (sin, cos) = angle.sin_cos();
        Vec3::new(cos * self.radius, cos * self.height, sin * self.radius)
    }

    /// Eye position after `elapsed` time.
    pub fn eye(&self, elapsed: Duration) -> Vec3 {
        self.eye_at_phase(phase(elapsed, self.period_ms))
    }

    /// Right-handed look-at view matrix after `elapsed` time.
    pub fn view_matrix(&self, elapsed: Duration) -> Mat4 {
        Mat4::look_at_rh(self.eye(elapsed), self.target, self.up)
    }

    /// The end points of the up-vector marker line: `target` to `target + up`.
    pub fn up_marker(&self) -> [Vec3; 2] {
        [self.target, self.target + self.up]
    }
}

/// Spin of a model about `axis`: one full turn per period.
///
/// The axis is normalized; a zero axis yields the identity.
pub fn model_rotation(elapsed: Duration, period_ms: u64, axis: Vec3) -> Mat4 {
    let Some(axis) = axis.try_normalize() else {
        return Mat4::IDENTITY;
    };
    let degrees = phase(elapsed, period_ms) * 360.0;
    Mat4::from_axis_angle(axis, degrees.to_radians())
}
