//! Linear brightness/contrast remap.
//!
//! Every sample `x` becomes `alpha * x + beta`, clamped to `[0, 255]` and then
//! truncated to a byte. Clamping happens before the cast, so `254.9` maps to
//! `254` and anything at or above `255.0` maps to `255`.
//!
//! The output depends only on the input sample value, so the mapping is
//! evaluated once per byte value into a [`LinearRemapLut`] and applied by
//! lookup. Channels are remapped independently with the same table.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Pre-computed 256-entry lookup table for a linear remap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearRemapLut {
    /// LUT values: lut[input] = output
    pub lut: [u8; 256],
}

impl LinearRemapLut {
    /// Build the table for `alpha * x + beta`.
    ///
    /// Any `alpha`/`beta` is accepted; out-of-range results saturate at the
    /// byte boundaries. A NaN result maps to 0.
    pub fn new(alpha: f64, beta: f64) -> Self {
        let mut lut = [0u8; 256];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            *lut_value = clamp_to_byte(alpha * i as f64 + beta);
        }
        Self { lut }
    }

    /// Identity table (alpha = 1, beta = 0).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Check if this LUT leaves every sample unchanged.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    #[inline]
    pub fn map(&self, sample: u8) -> u8 {
        self.lut[sample as usize]
    }

    /// Remap raw samples in place.
    pub fn apply_in_place(&self, samples: &mut [u8]) {
        if self.is_identity() {
            return;
        }
        for sample in samples.iter_mut() {
            *sample = self.lut[*sample as usize];
        }
    }
}

impl Default for LinearRemapLut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Clamp to `[0, 255]`, then truncate.
#[inline]
pub fn clamp_to_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Produce a new buffer with `clamp(alpha * x + beta, 0, 255)` applied to
/// every sample of `input`.
///
/// # Errors
///
/// Returns [`Error::NoImageLoaded`] if `input` is the empty sentinel.
pub fn apply_linear_remap(input: &PixelBuffer, alpha: f64, beta: f64) -> Result<PixelBuffer> {
    if input.is_empty() {
        return Err(Error::NoImageLoaded);
    }

    let lut = LinearRemapLut::new(alpha, beta);
    let mut data = input.as_bytes().to_vec();
    lut.apply_in_place(&mut data);

    Ok(PixelBuffer::from_parts(
        input.width(),
        input.height(),
        input.channels(),
        data,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    fn gray(values: &[u8]) -> PixelBuffer {
        PixelBuffer::new(values.len() as u32, 1, Channels::Gray, values.to_vec()).unwrap()
    }

    #[test]
    fn test_identity_lut() {
        let lut = LinearRemapLut::identity();
        assert!(lut.is_identity());
        for i in 0..=255u8 {
            assert_eq!(lut.map(i), i);
        }
    }

    #[test]
    fn test_unit_gain_zero_offset_is_identity() {
        let input = gray(&[0, 1, 127, 128, 254, 255]);
        let output = apply_linear_remap(&input, 1.0, 0.0).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_saturates_high() {
        let output = apply_linear_remap(&gray(&[200]), 2.0, 0.0).unwrap();
        assert_eq!(output.as_bytes(), &[255]);
    }

    #[test]
    fn test_saturates_low() {
        let output = apply_linear_remap(&gray(&[0]), 0.5, -10.0).unwrap();
        assert_eq!(output.as_bytes(), &[0]);
    }

    #[test]
    fn test_clamp_then_truncate() {
        assert_eq!(clamp_to_byte(254.9), 254);
        assert_eq!(clamp_to_byte(255.0), 255);
        assert_eq!(clamp_to_byte(255.4), 255);
        assert_eq!(clamp_to_byte(-0.7), 0);
        assert_eq!(clamp_to_byte(0.99), 0);
        assert_eq!(clamp_to_byte(f64::INFINITY), 255);
        assert_eq!(clamp_to_byte(f64::NEG_INFINITY), 0);
        assert_eq!(clamp_to_byte(f64::NAN), 0);
    }

    #[test]
    fn test_fractional_results_truncate() {
        // 1.5 * 101 + 0.2 = 151.7 -> 151
        let output = apply_linear_remap(&gray(&[101]), 1.5, 0.2).unwrap();
        assert_eq!(output.as_bytes(), &[151]);
    }

    #[test]
    fn test_channels_processed_independently() {
        let input =
            PixelBuffer::new(2, 1, Channels::Color, vec![10, 100, 250, 0, 50, 128]).unwrap();
        let output = apply_linear_remap(&input, 2.0, 5.0).unwrap();

        assert_eq!(output.channels(), Channels::Color);
        assert_eq!(output.as_bytes(), &[25, 205, 255, 5, 105, 255]);
    }

    #[test]
    fn test_preserves_shape_and_input() {
        let input = PixelBuffer::filled(7, 3, Channels::Color, 40);
        let output = apply_linear_remap(&input, 2.0, 10.0).unwrap();

        assert_eq!(output.dimensions(), (7, 3));
        assert_eq!(output.channels(), Channels::Color);
        assert!(output.as_bytes().iter().all(|&v| v == 90));
        // Input is untouched
        assert!(input.as_bytes().iter().all(|&v| v == 40));
    }

    #[test]
    fn test_extreme_parameters_accepted() {
        let input = gray(&[0, 128, 255]);

        let bright = apply_linear_remap(&input, 1e9, 1e9).unwrap();
        assert_eq!(bright.as_bytes(), &[255, 255, 255]);

        let dark = apply_linear_remap(&input, -3.0, -1e6).unwrap();
        assert_eq!(dark.as_bytes(), &[0, 0, 0]);

        let inverted = apply_linear_remap(&input, -1.0, 255.0).unwrap();
        assert_eq!(inverted.as_bytes(), &[255, 127, 0]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = apply_linear_remap(&PixelBuffer::empty(), 1.0, 0.0);
        assert!(matches!(result, Err(Error::NoImageLoaded)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::Channels;
    use proptest::prelude::*;

    proptest! {
        /// Property: every output sample equals clamp(alpha * x + beta) of
        /// the sample at the same position.
        #[test]
        fn prop_matches_formula(
            samples in prop::collection::vec(any::<u8>(), 3..=300),
            alpha in -10.0f64..10.0,
            beta in -300.0f64..300.0,
        ) {
            let pixel_count = samples.len() / 3;
            let data = samples[..pixel_count * 3].to_vec();
            let input = PixelBuffer::new(pixel_count as u32, 1, Channels::Color, data).unwrap();

            let output = apply_linear_remap(&input, alpha, beta).unwrap();

            for (x, y) in input.as_bytes().iter().zip(output.as_bytes()) {
                let expected = (alpha * *x as f64 + beta).clamp(0.0, 255.0) as u8;
                prop_assert_eq!(*y, expected);
            }
        }

        /// Property: with non-negative alpha the remap is monotonic.
        #[test]
        fn prop_monotonic_for_positive_gain(alpha in 0.0f64..5.0, beta in -255.0f64..255.0) {
            let lut = LinearRemapLut::new(alpha, beta);
            for i in 1..256 {
                prop_assert!(lut.lut[i] >= lut.lut[i - 1]);
            }
        }
    }
}
