//! Closed sets of orientation operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Clockwise right-angle rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// 90 degrees clockwise. Swaps width and height.
    Cw90,
    /// 180 degrees.
    Cw180,
    /// 270 degrees clockwise (90 counter-clockwise). Swaps width and height.
    Cw270,
}

impl Rotation {
    /// Map a clockwise angle in degrees. Only 90, 180 and 270 are accepted.
    pub fn from_degrees(degrees: i32) -> Result<Self, Error> {
        match degrees {
            90 => Ok(Rotation::Cw90),
            180 => Ok(Rotation::Cw180),
            270 => Ok(Rotation::Cw270),
            other => Err(Error::InvalidParameter(format!(
                "rotation angle {other} (use 90, 180, or 270)"
            ))),
        }
    }

    /// Map a number of clockwise quarter turns. Only 1, 2 and 3 are accepted.
    pub fn from_quarter_turns(turns: u32) -> Result<Self, Error> {
        match turns {
            1 => Ok(Rotation::Cw90),
            2 => Ok(Rotation::Cw180),
            3 => Ok(Rotation::Cw270),
            other => Err(Error::InvalidParameter(format!(
                "quarter turns {other} (use 1, 2, or 3)"
            ))),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    pub fn quarter_turns(self) -> u32 {
        match self {
            Rotation::Cw90 => 1,
            Rotation::Cw180 => 2,
            Rotation::Cw270 => 3,
        }
    }

    /// Returns true if the rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Mirror axis for a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
    /// Mirror both ways (same pixels as a 180 degree rotation).
    Both,
}

impl FlipAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            FlipAxis::Horizontal => "horizontal",
            FlipAxis::Vertical => "vertical",
            FlipAxis::Both => "both",
        }
    }
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlipAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(FlipAxis::Horizontal),
            "vertical" | "v" => Ok(FlipAxis::Vertical),
            "both" | "b" => Ok(FlipAxis::Both),
            _ => Err(Error::InvalidParameter(format!(
                "flip axis '{s}' (use horizontal, vertical, or both)"
            ))),
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if uprighting this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
