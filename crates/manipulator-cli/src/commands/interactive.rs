//! Interactive menu over one loaded image.
//!
//! Every transform reads the original image and replaces the processed
//! one, so choices can be made in any order. Errors from a single choice
//! are reported and the menu continues; only end of input or `0` leaves
//! the loop.

use crate::InteractiveArgs;
use anyhow::{bail, Context, Result};
use manipulator_core::{
    CodecOptions, FlipAxis, ImageCodec, ImageFileCodec, ImageSession, Rotation,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use super::flip::flip_label;
use crate::viewer::Viewer;

pub fn run(args: InteractiveArgs, options: &CodecOptions) -> Result<()> {
    let codec = ImageFileCodec::new(*options);
    let viewer = super::viewer_for(args.preview_dir.as_deref());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let path = match args.input {
        Some(path) => path,
        None => match prompt(&mut input, &mut output, "Enter image path: ")? {
            Some(line) if !line.is_empty() => PathBuf::from(line),
            _ => bail!("No image path given"),
        },
    };

    let session = super::open_session(&codec, &path)?;
    writeln!(output, "{}", describe(&session))?;

    let mut menu = Menu::new(session, &codec, viewer.as_ref(), args.output);
    menu.run(&mut input, &mut output)?;
    tracing::debug!(processed = menu.session().has_processed(), "Menu closed");
    Ok(())
}

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayOriginal,
    EnhanceContrast,
    Rotate(Rotation),
    Flip(FlipAxis),
    LoadImage,
    SaveProcessed,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => Self::DisplayOriginal,
            "2" => Self::EnhanceContrast,
            "3" => Self::Rotate(Rotation::Cw90),
            "4" => Self::Rotate(Rotation::Cw180),
            "5" => Self::Rotate(Rotation::Cw270),
            "6" => Self::Flip(FlipAxis::Horizontal),
            "7" => Self::Flip(FlipAxis::Vertical),
            "8" => Self::Flip(FlipAxis::Both),
            "9" => Self::LoadImage,
            "10" => Self::SaveProcessed,
            "0" => Self::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

const MENU: &str = "
========== Image Manipulator Menu ==========
1. Display Original Image
2. Enhance Contrast
3. Rotate Image (90° Clockwise)
4. Rotate Image (180°)
5. Rotate Image (270° Clockwise)
6. Flip Horizontally
7. Flip Vertically
8. Flip Both Directions
9. Load New Image
10. Save Processed Image
0. Exit
============================================";

const ALPHA_PROMPT: &str = "Alpha (contrast control, recommended 0.5-3.0): ";
const BETA_PROMPT: &str = "Beta (brightness control, recommended -100 to 100): ";

/// Menu state: the session plus its collaborators.
pub struct Menu<'a> {
    session: ImageSession,
    codec: &'a dyn ImageCodec,
    viewer: &'a dyn Viewer,
    save_path: PathBuf,
}

impl<'a> Menu<'a> {
    pub fn new(
        session: ImageSession,
        codec: &'a dyn ImageCodec,
        viewer: &'a dyn Viewer,
        save_path: PathBuf,
    ) -> Self {
        Self {
            session,
            codec,
            viewer,
            save_path,
        }
    }

    pub fn session(&self) -> &ImageSession {
        &self.session
    }

    /// Show the menu and handle choices until `0` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        loop {
            writeln!(output, "{MENU}")?;
            let Some(line) = prompt(input, output, "Enter your choice: ")? else {
                writeln!(output)?;
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(output, "Invalid choice! Please try again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                writeln!(output, "Exiting...")?;
                break;
            }

            if let Err(e) = self.dispatch(choice, input, output) {
                tracing::debug!("{e:?}");
                writeln!(output, "Error: {e:#}")?;
            }
        }
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        match choice {
            MenuChoice::DisplayOriginal => {
                let original = self.session.require_original()?;
                self.viewer.show(original, "Original Image")?;
            }
            MenuChoice::EnhanceContrast => {
                self.session.require_original()?;
                let Some(alpha) = prompt_number(input, output, ALPHA_PROMPT)? else {
                    return Ok(());
                };
                let Some(beta) = prompt_number(input, output, BETA_PROMPT)? else {
                    return Ok(());
                };
                let processed = self.session.enhance_contrast(alpha, beta)?;
                writeln!(output, "Contrast enhanced with alpha={alpha}, beta={beta}")?;
                self.viewer.show(processed, "Contrast Enhanced Image")?;
            }
            MenuChoice::Rotate(rotation) => {
                let processed = self.session.rotate(rotation)?;
                writeln!(output, "Image rotated by {} degrees", rotation.degrees())?;
                self.viewer.show(processed, rotation_label(rotation))?;
            }
            MenuChoice::Flip(axis) => {
                let processed = self.session.flip(axis)?;
                writeln!(output, "Image {}", flip_label(axis).to_lowercase())?;
                self.viewer.show(processed, flip_label(axis))?;
            }
            MenuChoice::LoadImage => {
                let Some(path) = prompt(input, output, "Enter image path: ")? else {
                    return Ok(());
                };
                if path.is_empty() {
                    return Ok(());
                }
                self.session
                    .load_from(self.codec, Path::new(&path))
                    .with_context(|| format!("Failed to load: {path}"))?;
                writeln!(output, "{}", describe(&self.session))?;
            }
            MenuChoice::SaveProcessed => {
                self.session.require_processed()?;
                let message = format!("Enter output path [{}]: ", self.save_path.display());
                let Some(line) = prompt(input, output, &message)? else {
                    return Ok(());
                };
                let path = if line.is_empty() {
                    self.save_path.clone()
                } else {
                    PathBuf::from(line)
                };
                super::save_processed(&self.session, self.codec, &path)?;
                writeln!(output, "Image saved to {}", path.display())?;
            }
            MenuChoice::Exit => {}
        }
        Ok(())
    }
}

fn rotation_label(rotation: Rotation) -> &'static str {
    match rotation {
        Rotation::Cw90 => "Rotated 90° Clockwise",
        Rotation::Cw180 => "Rotated 180°",
        Rotation::Cw270 => "Rotated 270° (90° Counter-Clockwise)",
    }
}

fn describe(session: &ImageSession) -> String {
    let image = session.original();
    format!(
        "Image loaded successfully\nImage size: {}x{}\nChannels: {}",
        image.width(),
        image.height(),
        image.channels().count()
    )
}

/// Print `message` and read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<f64>> {
    let Some(line) = prompt(input, output, message)? else {
        return Ok(None);
    };
    match line.parse::<f64>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => bail!("Invalid number: '{line}'"),
    }
}
