//! Helpers for reading typed lesson parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key or
//! a value of the wrong type yields the default, so lesson construction from
//! user-supplied JSON never fails on a bad parameter.

use glam::Vec3;
use serde_json::Value;

/// Extracts an `f32` from `params[name]`.
///
/// Accepts any JSON number, including integers.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Extracts a `u64` from `params[name]`.
///
/// Only non-negative integers are accepted.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `Vec3` from a three-element numeric array at `params[name]`.
pub fn param_vec3(params: &Value, name: &str, default: Vec3) -> Vec3 {
    let Some(items) = params.get(name).and_then(Value::as_array) else {
        return default;
    };
    match items.as_slice() {
        [x, y, z] => match (x.as_f64(), y.as_f64(), z.as_f64()) {
            (Some(x), Some(y), Some(z)) => Vec3::new(x as f32, y as f32, z as f32),
            _ => default,
        },
        _ => default,
    }
}
