//! manipulator - load an image, run one pixel transform, save or preview it
//!
//! One-shot subcommands cover scripting use, `interactive` reproduces the
//! numbered menu loop.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use manipulator_core::{CodecOptions, ColorMode, FlipAxis};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod viewer;

#[derive(Parser)]
#[command(name = "manipulator")]
#[command(author, version, about = "Pixel-level image manipulation")]
#[command(long_about = "
Loads an 8-bit grayscale or color image and applies exact pixel transforms:
linear contrast/brightness, right-angle rotations and axis flips.

Examples:
  manipulator info photo.jpg                      # Show dimensions and channels
  manipulator info photo.jpg --json
  manipulator contrast photo.jpg -a 1.5 -b 20 -o out.png
  manipulator rotate photo.jpg -d 270 -o out.png
  manipulator flip photo.jpg --axis both -o out.png
  manipulator --gray interactive photo.jpg --preview-dir previews
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load images as single-channel grayscale
    #[arg(long, global = true, conflicts_with = "color")]
    gray: bool,

    /// Load images as 3-channel color
    #[arg(long, global = true)]
    color: bool,

    /// Ignore the EXIF orientation tag when loading
    #[arg(long, global = true)]
    no_orientation: bool,

    /// JPEG output quality (1-100)
    #[arg(short, long, global = true, default_value_t = 90,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

impl Cli {
    fn codec_options(&self) -> CodecOptions {
        let color_mode = if self.gray {
            ColorMode::Grayscale
        } else if self.color {
            ColorMode::Color
        } else {
            ColorMode::Auto
        };
        CodecOptions {
            color_mode,
            apply_orientation: !self.no_orientation,
            jpeg_quality: self.quality,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display image dimensions and channels
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Apply clamp(alpha * x + beta, 0, 255) to every sample
    Contrast(ContrastArgs),

    /// Rotate clockwise by 90, 180 or 270 degrees
    #[command(visible_alias = "r")]
    Rotate(RotateArgs),

    /// Mirror horizontally, vertically or both
    Flip(FlipArgs),

    /// Numbered menu over one loaded image
    Interactive(InteractiveArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Print one JSON object per image
    #[arg(long)]
    json: bool,
}

/// Output options shared by the one-shot transforms.
#[derive(Args)]
struct OutputArgs {
    /// Output image (format from extension: png, jpg, bmp)
    #[arg(short, long)]
    output: PathBuf,

    /// Also write a labelled PNG preview into this directory
    #[arg(long)]
    preview_dir: Option<PathBuf>,
}

#[derive(Args)]
struct ContrastArgs {
    /// Input image
    input: PathBuf,

    /// Gain applied to every sample
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    alpha: f64,

    /// Offset added after the gain
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    beta: f64,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct RotateArgs {
    /// Input image
    input: PathBuf,

    /// Clockwise angle: 90, 180 or 270
    #[arg(short, long, allow_negative_numbers = true)]
    degrees: i32,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct FlipArgs {
    /// Input image
    input: PathBuf,

    /// horizontal (h), vertical (v) or both (b)
    #[arg(long, value_parser = parse_axis)]
    axis: FlipAxis,

    #[command(flatten)]
    out: OutputArgs,
}

#[derive(Args)]
struct InteractiveArgs {
    /// Image to start with (prompted for when omitted)
    input: Option<PathBuf>,

    /// Default path for "Save Processed Image"
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Write each displayed image as a PNG into this directory
    #[arg(long)]
    preview_dir: Option<PathBuf>,
}

fn parse_axis(s: &str) -> Result<FlipAxis, manipulator_core::Error> {
    s.parse()
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let options = cli.codec_options();

    match cli.command {
        Commands::Info(args) => commands::info::run(args, &options),
        Commands::Contrast(args) => commands::contrast::run(args, &options),
        Commands::Rotate(args) => commands::rotate::run(args, &options),
        Commands::Flip(args) => commands::flip::run(args, &options),
        Commands::Interactive(args) => commands::interactive::run(args, &options),
    }
}
