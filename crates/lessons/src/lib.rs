#![deny(unsafe_code)]
//! Lesson registry: maps lesson names to implementations and provides a CPU
//! rasterizer for frame plans plus PNG snapshots.
//!
//! This crate sits between `gl-lessons-core` (which defines the `Lesson` trait)
//! and the individual lesson crates. Both the CLI and the WASM host depend on
//! it so name lookup lives in one place.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use gl_lessons_core::error::LessonError;
use gl_lessons_core::{FramePlan, Lesson, VertexData};
use gl_lessons_perspective::Perspective;
use gl_lessons_view::View;
use glam::{Mat4, Vec3};
use serde_json::Value;
use std::time::Duration;

/// Registered lessons: canonical name, numeric alias, one-line description.
const LESSONS: &[(&str, &str, &str)] = &[
    (
        "perspective",
        "172",
        "two triangles at different depths under a frustum projection",
    ),
    (
        "view",
        "173",
        "orbiting look-at camera over four triangles and coordinate axes",
    ),
];

/// Every available lesson.
///
/// Use [`LessonKind::from_name`] for string-based construction (CLI, WASM).
pub enum LessonKind {
    /// Lesson 172.
    Perspective(Perspective),
    /// Lesson 173.
    View(View),
}

impl LessonKind {
    /// Constructs a lesson by canonical name or numeric alias.
    ///
    /// Returns `LessonError::UnknownLesson` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, LessonError> {
        match name {
            "perspective" | "172" => Ok(LessonKind::Perspective(Perspective::from_json(params))),
            "view" | "173" => Ok(LessonKind::View(View::from_json(params))),
            _ => Err(LessonError::UnknownLesson(name.to_string())),
        }
    }

    /// Canonical names of all lessons.
    pub fn list_lessons() -> impl Iterator<Item = &'static str> {
        LESSONS.iter().map(|(name, _, _)| *name)
    }

    /// `(name, alias, description)` for all lessons.
    pub fn catalog() -> &'static [(&'static str, &'static str, &'static str)] {
        LESSONS
    }

    /// Camera position at `elapsed`, for lessons with a moving eye.
    pub fn eye(&self, elapsed: Duration) -> Option<Vec3> {
        match self {
            LessonKind::Perspective(_) => None,
            LessonKind::View(v) => Some(v.eye(elapsed)),
        }
    }

    fn inner(&self) -> &dyn Lesson {
        match self {
            LessonKind::Perspective(l) => l,
            LessonKind::View(l) => l,
        }
    }
}

impl Lesson for LessonKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn vertices(&self) -> &VertexData {
        self.inner().vertices()
    }

    fn projection(&self, width: u32, height: u32) -> Result<Mat4, LessonError> {
        self.inner().projection(width, height)
    }

    fn frame(&self, elapsed: Duration, projection: &Mat4) -> FramePlan {
        self.inner().frame(elapsed, projection)
    }

    fn params(&self) -> Value {
        self.inner().params()
    }

    fn param_schema(&self) -> Value {
        self.inner().param_schema()
    }
}
