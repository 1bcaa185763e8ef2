//! Flip command

use crate::FlipArgs;
use anyhow::Result;
use manipulator_core::{CodecOptions, FlipAxis, ImageFileCodec};

pub fn run(args: FlipArgs, options: &CodecOptions) -> Result<()> {
    let codec = ImageFileCodec::new(*options);
    let mut session = super::open_session(&codec, &args.input)?;

    session.flip(args.axis)?;

    super::finish(&session, &codec, &args.out, flip_label(args.axis))
}

pub fn flip_label(axis: FlipAxis) -> &'static str {
    match axis {
        FlipAxis::Horizontal => "Flipped Horizontally",
        FlipAxis::Vertical => "Flipped Vertically",
        FlipAxis::Both => "Flipped Both Directions",
    }
}
