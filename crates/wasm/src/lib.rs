#![deny(unsafe_code)]
//! Browser host for the GL lessons.
//!
//! A page creates a [`LessonApp`] on a canvas, calls `resize` whenever the
//! canvas size changes, and `frame` from `requestAnimationFrame` with the
//! timestamp it receives.

mod clock;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::LessonApp;

pub use clock::elapsed_from_ms;
