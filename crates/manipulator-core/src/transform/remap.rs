//! Index remapping for rotations and flips.
//!
//! Each operation is expressed as an inverse mapping: for every output pixel
//! we compute which input pixel it comes from and copy all of its channels.
//!
//! | Operation  | Output size | Source of `out[r][c]`       |
//! |------------|-------------|-----------------------------|
//! | Cw90       | `H x W`     | `in[H-1-c][r]`              |
//! | Cw180      | `W x H`     | `in[H-1-r][W-1-c]`          |
//! | Cw270      | `H x W`     | `in[c][W-1-r]`              |
//! | Horizontal | `W x H`     | `in[r][W-1-c]`              |
//! | Vertical   | `W x H`     | `in[H-1-r][c]`              |
//! | Both       | `W x H`     | `in[H-1-r][W-1-c]`          |

use super::{FlipAxis, Orientation, Rotation};
use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Rotate `input` clockwise by a right angle into a new buffer.
///
/// # Errors
///
/// Returns [`Error::NoImageLoaded`] if `input` is the empty sentinel.
pub fn rotate(input: &PixelBuffer, rotation: Rotation) -> Result<PixelBuffer> {
    if input.is_empty() {
        return Err(Error::NoImageLoaded);
    }
    Ok(rotate_buffer(input, rotation))
}

/// Mirror `input` along `axis` into a new buffer.
///
/// # Errors
///
/// Returns [`Error::NoImageLoaded`] if `input` is the empty sentinel.
pub fn flip(input: &PixelBuffer, axis: FlipAxis) -> Result<PixelBuffer> {
    if input.is_empty() {
        return Err(Error::NoImageLoaded);
    }
    Ok(flip_buffer(input, axis))
}

/// Upright an image stored with the given EXIF orientation.
pub fn apply_orientation(input: &PixelBuffer, orientation: Orientation) -> PixelBuffer {
    match orientation {
        Orientation::Normal => input.clone(),
        Orientation::FlipHorizontal => flip_buffer(input, FlipAxis::Horizontal),
        Orientation::Rotate180 => rotate_buffer(input, Rotation::Cw180),
        Orientation::FlipVertical => flip_buffer(input, FlipAxis::Vertical),
        Orientation::Transpose => {
            flip_buffer(&rotate_buffer(input, Rotation::Cw90), FlipAxis::Horizontal)
        }
        Orientation::Rotate90CW => rotate_buffer(input, Rotation::Cw90),
        Orientation::Transverse => {
            flip_buffer(&rotate_buffer(input, Rotation::Cw270), FlipAxis::Horizontal)
        }
        Orientation::Rotate270CW => rotate_buffer(input, Rotation::Cw270),
    }
}

fn rotate_buffer(input: &PixelBuffer, rotation: Rotation) -> PixelBuffer {
    let (w, h) = input.dimensions();
    match rotation {
        Rotation::Cw90 => remap(input, h, w, |r, c| (h - 1 - c, r)),
        Rotation::Cw180 => remap(input, w, h, |r, c| (h - 1 - r, w - 1 - c)),
        Rotation::Cw270 => remap(input, h, w, |r, c| (c, w - 1 - r)),
    }
}

fn flip_buffer(input: &PixelBuffer, axis: FlipAxis) -> PixelBuffer {
    let (w, h) = input.dimensions();
    match axis {
        FlipAxis::Horizontal => remap(input, w, h, |r, c| (r, w - 1 - c)),
        FlipAxis::Vertical => remap(input, w, h, |r, c| (h - 1 - r, c)),
        FlipAxis::Both => remap(input, w, h, |r, c| (h - 1 - r, w - 1 - c)),
    }
}

/// Build a `dst_w x dst_h` buffer where output pixel `(r, c)` is a copy of
/// input pixel `source(r, c)`.
fn remap<F>(input: &PixelBuffer, dst_w: u32, dst_h: u32, source: F) -> PixelBuffer
where
    F: Fn(u32, u32) -> (u32, u32),
{
    let channels = input.channels().count();
    let src = input.as_bytes();
    let src_stride = input.width() as usize * channels;
    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize * channels);

    for dst_r in 0..dst_h {
        for dst_c in 0..dst_w {
            let (src_r, src_c) = source(dst_r, dst_c);
            let idx = src_r as usize * src_stride + src_c as usize * channels;
            output.extend_from_slice(&src[idx..idx + channels]);
        }
    }

    PixelBuffer::from_parts(dst_w, dst_h, input.channels(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    /// 2x2 grayscale [[10, 20], [30, 40]].
    fn square() -> PixelBuffer {
        PixelBuffer::new(2, 2, Channels::Gray, vec![10, 20, 30, 40]).unwrap()
    }

    /// Create a test image where every sample encodes its position.
    fn test_image(width: u32, height: u32, channels: Channels) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, channels, |row, col, ch| {
            ((row * width + col) as usize * channels.count() + ch) as u8
        })
    }

    #[test]
    fn test_rotate_90_square() {
        let result = rotate(&square(), Rotation::Cw90).unwrap();
        assert_eq!(result.as_bytes(), &[30, 10, 40, 20]);
    }

    #[test]
    fn test_rotate_180_square() {
        let result = rotate(&square(), Rotation::Cw180).unwrap();
        assert_eq!(result.as_bytes(), &[40, 30, 20, 10]);
    }

    #[test]
    fn test_rotate_270_square() {
        let result = rotate(&square(), Rotation::Cw270).unwrap();
        assert_eq!(result.as_bytes(), &[20, 40, 10, 30]);
    }

    #[test]
    fn test_flip_square() {
        let h = flip(&square(), FlipAxis::Horizontal).unwrap();
        assert_eq!(h.as_bytes(), &[20, 10, 40, 30]);

        let v = flip(&square(), FlipAxis::Vertical).unwrap();
        assert_eq!(v.as_bytes(), &[30, 40, 10, 20]);

        let both = flip(&square(), FlipAxis::Both).unwrap();
        assert_eq!(both.as_bytes(), &[40, 30, 20, 10]);
    }

    #[test]
    fn test_rotate_90_rectangular() {
        // 3 wide, 2 tall:
        // 1 2 3
        // 4 5 6
        let img = PixelBuffer::new(3, 2, Channels::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let result = rotate(&img, Rotation::Cw90).unwrap();

        // 2 wide, 3 tall:
        // 4 1
        // 5 2
        // 6 3
        assert_eq!(result.dimensions(), (2, 3));
        assert_eq!(result.as_bytes(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_rotate_270_rectangular() {
        let img = PixelBuffer::new(3, 2, Channels::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let result = rotate(&img, Rotation::Cw270).unwrap();

        // 3 6
        // 2 5
        // 1 4
        assert_eq!(result.dimensions(), (2, 3));
        assert_eq!(result.as_bytes(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_rotate_90_index_mapping() {
        let img = test_image(5, 3, Channels::Color);
        let result = rotate(&img, Rotation::Cw90).unwrap();
        let h = img.height();

        for r in 0..img.height() {
            for c in 0..img.width() {
                assert_eq!(result.pixel(c, h - 1 - r), img.pixel(r, c));
            }
        }
    }

    #[test]
    fn test_rotate_270_index_mapping() {
        let img = test_image(5, 3, Channels::Color);
        let result = rotate(&img, Rotation::Cw270).unwrap();
        let w = img.width();

        for r in 0..img.height() {
            for c in 0..img.width() {
                assert_eq!(result.pixel(w - 1 - c, r), img.pixel(r, c));
            }
        }
    }

    #[test]
    fn test_color_pixels_move_as_units() {
        let img = PixelBuffer::new(2, 1, Channels::Color, vec![1, 2, 3, 4, 5, 6]).unwrap();

        let flipped = flip(&img, FlipAxis::Horizontal).unwrap();
        assert_eq!(flipped.as_bytes(), &[4, 5, 6, 1, 2, 3]);

        let rotated = rotate(&img, Rotation::Cw90).unwrap();
        assert_eq!(rotated.dimensions(), (1, 2));
        assert_eq!(rotated.as_bytes(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_dimension_handling() {
        let img = test_image(200, 100, Channels::Gray);

        assert_eq!(rotate(&img, Rotation::Cw90).unwrap().dimensions(), (100, 200));
        assert_eq!(rotate(&img, Rotation::Cw180).unwrap().dimensions(), (200, 100));
        assert_eq!(rotate(&img, Rotation::Cw270).unwrap().dimensions(), (100, 200));

        for axis in [FlipAxis::Horizontal, FlipAxis::Vertical, FlipAxis::Both] {
            assert_eq!(flip(&img, axis).unwrap().dimensions(), (200, 100));
        }
    }

    #[test]
    fn test_1x1_image_invariant() {
        let img = PixelBuffer::new(1, 1, Channels::Color, vec![7, 8, 9]).unwrap();

        for rotation in [Rotation::Cw90, Rotation::Cw180, Rotation::Cw270] {
            assert_eq!(rotate(&img, rotation).unwrap(), img);
        }
        for axis in [FlipAxis::Horizontal, FlipAxis::Vertical, FlipAxis::Both] {
            assert_eq!(flip(&img, axis).unwrap(), img);
        }
    }

    #[test]
    fn test_very_thin_images() {
        let row = test_image(100, 1, Channels::Gray);
        let col = rotate(&row, Rotation::Cw90).unwrap();
        assert_eq!(col.dimensions(), (1, 100));
        // The top of the rotated column is the left end of the row
        assert_eq!(col.sample(0, 0, 0), row.sample(0, 0, 0));

        let flipped = flip(&row, FlipAxis::Vertical).unwrap();
        assert_eq!(flipped, row);
    }

    #[test]
    fn test_flip_both_matches_rotate_180() {
        let img = test_image(6, 4, Channels::Color);
        assert_eq!(
            flip(&img, FlipAxis::Both).unwrap(),
            rotate(&img, Rotation::Cw180).unwrap()
        );
    }

    #[test]
    fn test_empty_input_rejected() {
        let empty = PixelBuffer::empty();
        assert!(matches!(
            rotate(&empty, Rotation::Cw90),
            Err(Error::NoImageLoaded)
        ));
        assert!(matches!(
            flip(&empty, FlipAxis::Both),
            Err(Error::NoImageLoaded)
        ));
    }

    #[test]
    fn test_apply_orientation() {
        let img = test_image(4, 3, Channels::Gray);

        assert_eq!(apply_orientation(&img, Orientation::Normal), img);
        assert_eq!(
            apply_orientation(&img, Orientation::Rotate90CW),
            rotate(&img, Rotation::Cw90).unwrap()
        );
        assert_eq!(
            apply_orientation(&img, Orientation::FlipVertical),
            flip(&img, FlipAxis::Vertical).unwrap()
        );

        for value in 1..=8u32 {
            let orientation = Orientation::from(value);
            let result = apply_orientation(&img, orientation);
            let expected = if orientation.swaps_dimensions() {
                (3, 4)
            } else {
                (4, 3)
            };
            assert_eq!(result.dimensions(), expected, "orientation {value}");
        }
    }

    #[test]
    fn test_transpose_mirrors_across_main_diagonal() {
        let img = test_image(4, 3, Channels::Gray);
        let result = apply_orientation(&img, Orientation::Transpose);

        for r in 0..img.height() {
            for c in 0..img.width() {
                assert_eq!(result.sample(c, r, 0), img.sample(r, c, 0));
            }
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
