//! Raw record to pointer sample mapping.
//!
//! Each axis is clamped into the calibrated range and then scaled into the
//! output range with truncating integer division. The Y axis is inverted:
//! `y_min` on the sensor lands on `y_scale` in the output and `y_max` on 0.

use touch_proto::{Calibration, RawRecord};

/// Output coordinate ceiling for each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputRange {
    pub x_scale: u32,
    pub y_scale: u32,
}

impl OutputRange {
    /// Normalised absolute pointer space (0..=65535 on both axes).
    pub const ABSOLUTE: Self = Self {
        x_scale: 65535,
        y_scale: 65535,
    };

    #[must_use]
    pub const fn new(x_scale: u32, y_scale: u32) -> Self {
        Self { x_scale, y_scale }
    }
}

impl Default for OutputRange {
    fn default() -> Self {
        Self::ABSOLUTE
    }
}

/// One mapped pointer position with its contact state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerSample {
    pub x: u32,
    pub y: u32,
    pub contact_down: bool,
}

/// Clamp a raw reading into `[min, max]`.
///
/// Out-of-range readings are absorbed rather than rejected. Bounds may lie
/// beyond the 16-bit sensor range.
#[inline]
#[must_use]
pub fn clamp_axis(value: u16, min: u32, max: u32) -> u32 {
    let value = u32::from(value);
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Map a record into the output range.
///
/// The sample's `contact_down` is the new contact state; feed it to
/// [`ContactState::transition`] to find out whether an edge occurred.
#[must_use]
pub fn map(record: &RawRecord, calibration: &Calibration, range: &OutputRange) -> PointerSample {
    let x = clamp_axis(record.x, calibration.x_min(), calibration.x_max());
    let y = clamp_axis(record.y, calibration.y_min(), calibration.y_max());

    let width = u64::from(calibration.width());
    let height = u64::from(calibration.height());

    let offset_x = u64::from(x - calibration.x_min());
    let offset_y = height - u64::from(y - calibration.y_min());

    // Results never exceed the scale, which is a u32.
    PointerSample {
        x: (offset_x * u64::from(range.x_scale) / width) as u32,
        y: (offset_y * u64::from(range.y_scale) / height) as u32,
        contact_down: record.contact_down(),
    }
}

/// Calibration and output range bundled for repeated mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerMapper {
    calibration: Calibration,
    range: OutputRange,
}

impl PointerMapper {
    #[must_use]
    pub const fn new(calibration: Calibration, range: OutputRange) -> Self {
        Self { calibration, range }
    }

    #[inline]
    #[must_use]
    pub fn map(&self, record: &RawRecord) -> PointerSample {
        map(record, &self.calibration, &self.range)
    }

    #[must_use]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    #[must_use]
    pub fn range(&self) -> &OutputRange {
        &self.range
    }
}

/// Contact transition reported to the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContactEdge {
    /// Up to down: inject a button press.
    Pressed,
    /// Down to up: inject a button release.
    Released,
}

/// Per-contact state machine (`Up` <-> `Down`), starting `Up`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContactState {
    #[default]
    Up,
    Down,
}

impl ContactState {
    #[inline]
    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Down)
    }

    /// Move to `contact_down`, returning the edge if the state changed.
    ///
    /// Repeating the current state never yields an edge.
    pub fn transition(&mut self, contact_down: bool) -> Option<ContactEdge> {
        match (*self, contact_down) {
            (Self::Up, true) => {
                *self = Self::Down;
                Some(ContactEdge::Pressed)
            }
            (Self::Down, false) => {
                *self = Self::Up;
                Some(ContactEdge::Released)
            }
            _ => None,
        }
    }
}
