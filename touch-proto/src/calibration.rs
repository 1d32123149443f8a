//! Calibration bounds and their plain-text persistence format.
//!
//! A calibration is the raw-sensor bounding box of the active surface,
//! stored as four comma-separated decimal integers:
//!
//! ```text
//! <x_min>,<x_max>,<y_min>,<y_max>
//! ```
//!
//! # Example
//!
//! ```
//! use touch_proto::Calibration;
//!
//! let calibration: Calibration = "90,3900,130,3600".parse().unwrap();
//! assert_eq!(calibration.x_min(), 90);
//! assert_eq!(calibration.height(), 3470);
//! assert_eq!(calibration.to_text().as_str(), "90,3900,130,3600");
//! ```

use core::fmt::{self, Write};
use core::str::FromStr;
use heapless::String;

/// Longest possible calibration text: four `u32::MAX` fields and three commas.
pub const CALIBRATION_TEXT_LEN: usize = 43;

/// Number of fields in the text format.
const FIELD_COUNT: usize = 4;

/// Calibration axis, used to report which range is degenerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// Raw-sensor bounding box of the digitizer surface.
///
/// Both ranges are guaranteed non-empty (`max > min`), so the mapper can
/// always divide by the width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    x_min: u32,
    x_max: u32,
    y_min: u32,
    y_max: u32,
}

impl Calibration {
    /// Compiled-in bounds used when no calibration file exists or it is unreadable.
    pub const DEFAULT: Self = Self {
        x_min: 140,
        x_max: 3900,
        y_min: 280,
        y_max: 3650,
    };

    /// Create a calibration, rejecting empty or inverted ranges.
    pub const fn new(x_min: u32, x_max: u32, y_min: u32, y_max: u32) -> Result<Self, CalibrationError> {
        if x_max <= x_min {
            return Err(CalibrationError::Degenerate(Axis::X));
        }
        if y_max <= y_min {
            return Err(CalibrationError::Degenerate(Axis::Y));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    #[inline]
    #[must_use]
    pub const fn x_min(&self) -> u32 {
        self.x_min
    }

    #[inline]
    #[must_use]
    pub const fn x_max(&self) -> u32 {
        self.x_max
    }

    #[inline]
    #[must_use]
    pub const fn y_min(&self) -> u32 {
        self.y_min
    }

    #[inline]
    #[must_use]
    pub const fn y_max(&self) -> u32 {
        self.y_max
    }

    /// `x_max - x_min`, never zero.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    /// `y_max - y_min`, never zero.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.y_max - self.y_min
    }

    /// Render in the persistence format without allocating.
    #[must_use]
    pub fn to_text(&self) -> String<CALIBRATION_TEXT_LEN> {
        let mut text = String::new();
        // Four u32 values and three commas always fit.
        let _ = write!(text, "{}", self);
        text
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x_min, self.x_max, self.y_min, self.y_max)
    }
}

impl FromStr for Calibration {
    type Err = CalibrationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut values = [0u32; FIELD_COUNT];
        let mut count = 0;

        for field in text.split(',') {
            if count < FIELD_COUNT {
                values[count] = field
                    .trim()
                    .parse()
                    .map_err(|_| CalibrationError::InvalidNumber(count))?;
            }
            count += 1;
        }

        if count != FIELD_COUNT {
            return Err(CalibrationError::FieldCount(count));
        }

        let [x_min, x_max, y_min, y_max] = values;
        Self::new(x_min, x_max, y_min, y_max)
    }
}

/// Error parsing or validating a calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Text did not contain exactly four fields (actual count attached).
    FieldCount(usize),
    /// Field at this index is not a decimal `u32`.
    InvalidNumber(usize),
    /// Range on this axis is empty or inverted.
    Degenerate(Axis),
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(
                f,
                "expected 4 comma separated numbers like \"90,3900,130,3600\", found {} fields",
                n
            ),
            Self::InvalidNumber(i) => write!(f, "field {} is not a number", i + 1),
            Self::Degenerate(axis) => write!(f, "{:?} range is empty", axis),
        }
    }
}
