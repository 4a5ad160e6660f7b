//! Reproducible description of a single rendered frame.
//!
//! A [`FrameSpec`] captures everything needed to rasterize the same frame
//! again: lesson name, viewport size, clock reading, and parameter overrides.
//! It is the on-disk format of the CLI `--config` file.

use crate::error::LessonError;
use serde::{Deserialize, Serialize};

/// Default viewport edge in pixels.
pub const DEFAULT_VIEWPORT: u32 = 512;

/// Largest viewport edge accepted for CPU rendering.
pub const MAX_VIEWPORT: u32 = 16_384;

/// Bytes per pixel of an RGBA8 target.
const BYTES_PER_PIXEL: usize = 4;

/// Checks that a `width x height` RGBA8 target is non-empty, at most
/// `MAX_VIEWPORT` per side, and that its byte size fits in `usize`.
pub fn check_viewport(width: u32, height: u32) -> Result<(), LessonError> {
    let invalid = LessonError::InvalidViewport { width, height };
    if !(1..=MAX_VIEWPORT).contains(&width) || !(1..=MAX_VIEWPORT).contains(&height) {
        return Err(invalid);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or(invalid)?;
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSpec {
    pub lesson: String,
    #[serde(default = "default_viewport")]
    pub width: u32,
    #[serde(default = "default_viewport")]
    pub height: u32,
    /// Milliseconds since the surface was created.
    #[serde(default)]
    pub time_ms: u64,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

fn default_viewport() -> u32 {
    DEFAULT_VIEWPORT
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl FrameSpec {
    /// Creates a frame description with empty params at time zero.
    pub fn new(lesson: &str, width: u32, height: u32) -> Self {
        Self {
            lesson: lesson.to_string(),
            width,
            height,
            time_ms: 0,
            params: empty_params(),
        }
    }

    /// Parses a frame description from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks the viewport with [`check_viewport`].
    pub fn validate(&self) -> Result<(), LessonError> {
        check_viewport(self.width, self.height)
    }
}
