#![deny(unsafe_code)]
//! CLI binary for the GL lessons.
//!
//! Subcommands:
//! - `list`: print available lessons
//! - `inspect <lesson>`: print the projection, eye and frame plan for one frame
//! - `render <lesson>`: rasterize one frame on the CPU and write a PNG

mod error;
mod logging;

use clap::{Parser, Subcommand};
use error::CliError;
use gl_lessons::LessonKind;
use gl_lessons_core::{FrameSpec, Lesson};
use logging::{init_logging, LoggingConfig};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gl-lessons", about = "Perspective and view-matrix GL lessons")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log filter in env_logger syntax (e.g. "gl_lessons=debug"); overrides RUST_LOG and -v.
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available lessons.
    List,
    /// Print the matrices and draw commands of one frame.
    Inspect {
        /// Lesson name or number (e.g. "view" or "173").
        lesson: String,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: u32,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: u32,

        /// Milliseconds since the surface was created.
        #[arg(long, default_value_t = 0)]
        time_ms: u64,

        /// Lesson parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Rasterize one frame and write a PNG snapshot.
    Render {
        /// Lesson name or number. Overrides the lesson in --config.
        #[arg(required_unless_present = "config")]
        lesson: Option<String>,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: u32,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: u32,

        /// Milliseconds since the surface was created.
        #[arg(long, default_value_t = 0)]
        time_ms: u64,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Lesson parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Frame description file; replaces the size, time and params flags.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn parse_params(text: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(text).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn load_frame(path: &Path) -> Result<FrameSpec, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    FrameSpec::from_json_str(&text)
        .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display())))
}

/// Builds the frame description from either a config file or the flags.
fn resolve_frame(
    lesson: Option<String>,
    config: Option<&Path>,
    width: u32,
    height: u32,
    time_ms: u64,
    params: &str,
) -> Result<FrameSpec, CliError> {
    let mut frame = match config {
        Some(path) => load_frame(path)?,
        None => {
            let mut frame = FrameSpec::new(lesson.as_deref().unwrap_or_default(), width, height);
            frame.time_ms = time_ms;
            frame.params = parse_params(params)?;
            frame
        }
    };
    if let Some(lesson) = lesson {
        frame.lesson = lesson;
    }
    frame.validate()?;
    Ok(frame)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let catalog = LessonKind::catalog();
            if cli.json {
                let lessons: Vec<_> = catalog
                    .iter()
                    .map(|(name, alias, description)| {
                        serde_json::json!({
                            "name": name,
                            "alias": alias,
                            "description": description,
                        })
                    })
                    .collect();
                let info = serde_json::json!({ "lessons": lessons });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Lessons:");
                for (name, alias, description) in catalog {
                    println!("  {name} ({alias}): {description}");
                }
            }
        }
        Command::Inspect {
            lesson,
            width,
            height,
            time_ms,
            params,
        } => {
            let frame = resolve_frame(Some(lesson), None, width, height, time_ms, &params)?;
            let lesson = LessonKind::from_name(&frame.lesson, &frame.params)?;
            let elapsed = Duration::from_millis(frame.time_ms);
            let projection = lesson.projection(frame.width, frame.height)?;
            let plan = lesson.frame(elapsed, &projection);
            plan.validate(lesson.vertices().vertex_count())?;
            let eye = lesson.eye(elapsed);

            if cli.json {
                let info = serde_json::json!({
                    "lesson": lesson.name(),
                    "width": frame.width,
                    "height": frame.height,
                    "time_ms": frame.time_ms,
                    "params": lesson.params(),
                    "projection": projection.to_cols_array(),
                    "eye": eye.map(|e| e.to_array()),
                    "vertex_count": lesson.vertices().vertex_count(),
                    "plan": plan,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{} at {}ms on {}x{}",
                    lesson.name(),
                    frame.time_ms,
                    frame.width,
                    frame.height
                );
                println!("params: {}", lesson.params());
                println!("projection (rows):");
                for r in 0..4 {
                    let row = projection.row(r);
                    println!(
                        "  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]",
                        row.x, row.y, row.z, row.w
                    );
                }
                if let Some(eye) = eye {
                    println!("eye: ({:.4}, {:.4}, {:.4})", eye.x, eye.y, eye.z);
                }
                println!("vertices: {}", lesson.vertices().vertex_count());
                println!("commands:");
                for command in plan.commands() {
                    println!("  {}", serde_json::to_string(command)?);
                }
            }
        }
        Command::Render {
            lesson,
            width,
            height,
            time_ms,
            output,
            params,
            config,
        } => {
            let frame = resolve_frame(lesson, config.as_deref(), width, height, time_ms, &params)?;
            let lesson = LessonKind::from_name(&frame.lesson, &frame.params)?;
            let elapsed = Duration::from_millis(frame.time_ms);
            log::debug!("rendering {:?}", frame);

            gl_lessons::snapshot::write_png(&lesson, frame.width, frame.height, elapsed, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "lesson": lesson.name(),
                    "width": frame.width,
                    "height": frame.height,
                    "time_ms": frame.time_ms,
                    "params": lesson.params(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {}ms) -> {}",
                    lesson.name(),
                    frame.width,
                    frame.height,
                    frame.time_ms,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_flags(cli.verbose, cli.log.clone()));
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
