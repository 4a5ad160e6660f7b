#![deny(unsafe_code)]
//! Core types for the GL lessons.
//!
//! Provides the `Lesson` trait, the perspective `Frustum`, the time-driven
//! `OrbitCamera`, packed `VertexData`, solid `Rgba` colors, the recorded
//! `FramePlan` draw sequence, and parameter helpers. The glow-backed renderer
//! lives in [`render`] behind the `render` feature.

pub mod camera;
pub mod color;
pub mod draw;
pub mod error;
pub mod frame_spec;
pub mod lesson;
pub mod params;
pub mod projection;
pub mod vertex;

#[cfg(feature = "render")]
pub mod render;

pub use camera::OrbitCamera;
pub use color::Rgba;
pub use draw::{DrawCall, FrameCommand, FramePlan, Primitive};
pub use error::LessonError;
pub use frame_spec::FrameSpec;
pub use lesson::Lesson;
pub use projection::Frustum;
pub use vertex::VertexData;
