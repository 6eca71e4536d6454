/// Wirespin Terminal Demo - Spinning wireframe solids
///
/// Controls:
///   - Digits / . / -: Edit the focused rotation speed
///   - Tab: Next speed field
///   - Enter: Start, Space: Stop, R: Reset
///   - Q/ESC: Quit

use clap::Parser;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wirespin_core::{ControlInputs, Point3D, SceneConfig, ShapeKind, Solid};
use wirespin_terminal::{log_level, run_headless, to_io_error, TerminalApp};

#[derive(Parser, Debug)]
#[command(version, about = "Spin a torus, cube or cone in the terminal")]
struct Args {
    /// Solid to animate: torus, cube or cone
    #[arg(short, long, default_value = "torus")]
    shape: ShapeKind,

    /// Rotation about X, in radians per tick
    #[arg(long = "speed-x", default_value = "0.05", allow_hyphen_values = true)]
    speed_x: String,

    /// Rotation about Y, in radians per tick
    #[arg(long = "speed-y", default_value = "0.05", allow_hyphen_values = true)]
    speed_y: String,

    /// Rotation about Z, in radians per tick
    #[arg(long = "speed-z", default_value = "0.05", allow_hyphen_values = true)]
    speed_z: String,

    /// Focal length of the pinhole projection, in world units
    #[arg(short, long = "focal-length", default_value_t = 40.0)]
    focal_length: f64,

    /// Samples per full turn for the torus and cone
    #[arg(long, default_value_t = 200)]
    segments: usize,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Run without a terminal UI and print a summary of the last frame
    #[arg(long)]
    headless: bool,

    /// Number of ticks to run in headless mode
    #[arg(long, default_value_t = 60)]
    frames: usize,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    init_logging(&args)?;
    debug!("{args:?}");

    let config = SceneConfig {
        shape: args.shape,
        focal_length: args.focal_length,
        segments: args.segments,
        ..SceneConfig::default()
    };
    let inputs = ControlInputs::new(&args.speed_x, &args.speed_y, &args.speed_z);

    if args.headless {
        let (driver, recorder) =
            run_headless(config, &inputs, args.frames, 800.0, 600.0).map_err(to_io_error)?;
        let solid = driver.solid();
        println!(
            "{} after {} ticks: {} points, {} squares and {} lines drawn",
            solid.name(),
            args.frames,
            solid.points().len(),
            recorder.squares(),
            recorder.lines()
        );
        println!("max distance from center: {:.6}", max_radius(solid));
        return Ok(());
    }

    // Reject bad speeds before taking over the screen
    inputs.parse().map_err(to_io_error)?;

    info!(shape = %args.shape, "starting terminal renderer");
    let mut app = TerminalApp::new(config, inputs, args.fps)?;
    app.run()
}

/// Logs go to stderr only when nothing else owns the screen
fn init_logging(args: &Args) -> io::Result<()> {
    let builder = tracing_subscriber::fmt();
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level(args.verbose, false)));
            builder
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            // stderr shares the terminal with the alternate screen
            let level = log_level(args.verbose, !args.headless);
            let filter = if args.headless {
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
            } else {
                EnvFilter::new(level)
            };
            builder.with_env_filter(filter).with_writer(io::stderr).init();
        }
    }
    Ok(())
}

fn max_radius(solid: &dyn Solid) -> f64 {
    let center: Point3D = solid.center();
    solid
        .points()
        .iter()
        .map(|p| (p - center).norm())
        .fold(0.0, f64::max)
}
