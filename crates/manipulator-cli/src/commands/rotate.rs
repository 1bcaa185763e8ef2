//! Rotate command
//!
//! Exact clockwise rotation by a multiple of 90 degrees. Any other angle is
//! rejected before anything is written.

use crate::RotateArgs;
use anyhow::Result;
use manipulator_core::{CodecOptions, ImageFileCodec};

pub fn run(args: RotateArgs, options: &CodecOptions) -> Result<()> {
    let codec = ImageFileCodec::new(*options);
    let mut session = super::open_session(&codec, &args.input)?;

    session.rotate_degrees(args.degrees)?;

    let label = format!("Rotated {}°", args.degrees);
    super::finish(&session, &codec, &args.out, &label)
}
