//! Contrast command
//!
//! Applies `clamp(alpha * x + beta, 0, 255)` to every sample of the input.

use crate::ContrastArgs;
use anyhow::Result;
use manipulator_core::{CodecOptions, ImageFileCodec};
use tracing::debug;

pub fn run(args: ContrastArgs, options: &CodecOptions) -> Result<()> {
    let codec = ImageFileCodec::new(*options);
    let mut session = super::open_session(&codec, &args.input)?;

    debug!(alpha = args.alpha, beta = args.beta, "Applying linear remap");
    session.enhance_contrast(args.alpha, args.beta)?;

    super::finish(&session, &codec, &args.out, "Contrast Enhanced Image")
}
