//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: lesson error (unknown lesson, bad viewport)
//! - 11: I/O error (config read, snapshot write)
//! - 12: input error (bad JSON params or config, clip planes out of order)
//! - 13: serialization error

use gl_lessons_core::LessonError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A lesson-level error (unknown lesson, bad viewport).
    Lesson(LessonError),
    /// An I/O error (config read, snapshot write).
    Io(String),
    /// A user input error (malformed params or config file).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Lesson(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Lesson(e @ LessonError::UnknownLesson(_)) => {
                write!(f, "{e} (see `gl-lessons list`)")
            }
            CliError::Lesson(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<LessonError> for CliError {
    fn from(e: LessonError) -> Self {
        match e {
            LessonError::Io(msg) => CliError::Io(msg),
            // near/far only come from user params
            e @ LessonError::InvalidDepthRange { .. } => {
                CliError::Input(format!("invalid --params: {e}"))
            }
            other => CliError::Lesson(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_error_exit_code_is_10() {
        let err = CliError::Lesson(LessonError::UnknownLesson("foo".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        assert_eq!(CliError::Input("bad params".into()).exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        assert_eq!(CliError::Serialization("json fail".into()).exit_code(), 13);
    }

    #[test]
    fn from_lesson_error_io_routes_to_cli_io() {
        let cli_err = CliError::from(LessonError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_lesson_error_viewport_routes_to_cli_lesson() {
        let cli_err = CliError::from(LessonError::InvalidViewport {
            width: 0,
            height: 4,
        });
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("0x4"));
    }

    #[test]
    fn depth_range_from_params_routes_to_cli_input() {
        let cli_err = CliError::from(LessonError::InvalidDepthRange {
            near: 8.0,
            far: 2.0,
        });
        assert_eq!(cli_err.exit_code(), 12);
        let msg = cli_err.to_string();
        assert!(msg.starts_with("invalid --params"), "{msg}");
        assert!(msg.contains("near 8") && msg.contains("far 2"), "{msg}");
    }

    #[test]
    fn unknown_lesson_points_at_list() {
        let msg = CliError::from(LessonError::UnknownLesson("cube".into())).to_string();
        assert!(msg.contains("cube"), "{msg}");
        assert!(msg.contains("gl-lessons list"), "{msg}");
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
