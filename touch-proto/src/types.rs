//! Raw touch record types: ContactTag, RawRecord, DecodeError.

use core::fmt;

/// Length of one touch record on the interrupt pipe.
pub const RECORD_LEN: usize = 5;

/// Tag byte of a record reported while nothing touches the surface.
pub const TAG_RELEASED: u8 = 0x80;

/// Tag byte of a record reported while the surface is touched.
pub const TAG_TOUCHING: u8 = 0x81;

/// Leading tag byte of a record.
///
/// Only two values are valid on the wire; anything else means the byte
/// stream is out of step with the 5-byte record boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContactTag {
    /// `0x80`: no contact.
    Released,
    /// `0x81`: contact present.
    Touching,
}

impl ContactTag {
    /// Interpret a tag byte, returning `None` for anything but `0x80`/`0x81`.
    #[inline]
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TAG_RELEASED => Some(Self::Released),
            TAG_TOUCHING => Some(Self::Touching),
            _ => None,
        }
    }

    /// Wire value of this tag.
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Released => TAG_RELEASED,
            Self::Touching => TAG_TOUCHING,
        }
    }

    /// Whether this tag reports a contact.
    #[inline]
    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Touching)
    }

    /// Check if a byte is a valid tag.
    #[inline]
    #[must_use]
    pub const fn is_valid(byte: u8) -> bool {
        Self::from_byte(byte).is_some()
    }
}

/// One decoded 5-byte touch record.
///
/// Layout on the wire:
///
/// ```text
/// +-----+------+------+------+------+
/// | tag | y_hi | y_lo | x_hi | x_lo |
/// +-----+------+------+------+------+
/// ```
///
/// Both coordinates are big-endian raw sensor readings. Note that Y comes
/// before X.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawRecord {
    pub tag: ContactTag,
    pub y: u16,
    pub x: u16,
}

impl RawRecord {
    #[must_use]
    pub const fn new(tag: ContactTag, x: u16, y: u16) -> Self {
        Self { tag, y, x }
    }

    /// Decode a record from its five wire bytes.
    pub fn from_bytes(bytes: &[u8; RECORD_LEN]) -> Result<Self, DecodeError> {
        let tag = ContactTag::from_byte(bytes[0]).ok_or(DecodeError::InvalidTag(bytes[0]))?;
        Ok(Self {
            tag,
            y: u16::from_be_bytes([bytes[1], bytes[2]]),
            x: u16::from_be_bytes([bytes[3], bytes[4]]),
        })
    }

    /// Encode the record back into its wire bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let y = self.y.to_be_bytes();
        let x = self.x.to_be_bytes();
        [self.tag.as_byte(), y[0], y[1], x[0], x[1]]
    }

    /// Whether the record reports a contact.
    #[inline]
    #[must_use]
    pub const fn contact_down(&self) -> bool {
        self.tag.is_down()
    }
}

/// Error decoding a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Leading byte is neither `0x80` nor `0x81`.
    InvalidTag(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTag(byte) => write!(f, "invalid record tag 0x{:02X}", byte),
        }
    }
}
