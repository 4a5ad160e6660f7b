//! PNG snapshots of a lesson frame.
//!
//! Feature-gated behind `png` (default on) so the WASM host can depend on
//! this crate without pulling in `image`.

use gl_lessons_core::error::LessonError;
use gl_lessons_core::Lesson;
use std::path::Path;
use std::time::Duration;

use crate::raster::render_frame;

/// Rasterizes one frame of `lesson` and writes it to `path` as a PNG.
///
/// Returns `LessonError::InvalidViewport` for a zero dimension, or
/// `LessonError::Io` on write failure.
pub fn write_png(
    lesson: &dyn Lesson,
    width: u32,
    height: u32,
    elapsed: Duration,
    path: &Path,
) -> Result<(), LessonError> {
    let target = render_frame(lesson, width, height, elapsed)?;
    let img = image::RgbaImage::from_raw(width, height, target.into_pixels())
        .ok_or_else(|| LessonError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| LessonError::Io(e.to_string()))?;
    log::info!("wrote {} ({width}x{height}) to {}", lesson.name(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LessonKind;
    use serde_json::json;

    #[test]
    fn write_png_round_trip() {
        let lesson = LessonKind::from_name("perspective", &json!({})).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&lesson, 64, 48, Duration::ZERO, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let lesson = LessonKind::from_name("view", &json!({})).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");

        let err = write_png(&lesson, 8, 8, Duration::ZERO, &path).unwrap_err();
        assert!(matches!(err, LessonError::Io(_)));
    }

    #[test]
    fn write_png_rejects_empty_viewport() {
        let lesson = LessonKind::from_name("view", &json!({})).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(&lesson, 0, 8, Duration::ZERO, &dir.path().join("x.png")).unwrap_err();
        assert!(matches!(err, LessonError::InvalidViewport { .. }));
    }
}
