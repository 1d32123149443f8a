//! Wire and persistence formats for a USB HID touch digitizer.
//!
//! This crate provides everything needed to turn the digitizer's raw
//! interrupt stream into records:
//!
//! - **Types**: [`RawRecord`] and its [`ContactTag`]
//! - **Framing**: [`FrameDecoder`] assembles 5-byte records from arbitrarily
//!   chunked transfers, with a configurable [`SyncPolicy`]
//! - **Calibration**: [`Calibration`] bounds and their text format
//! - **Device identity**: [`TOUCH_DIGITIZER`], [`INTERRUPT_IN_PIPE`]
//!
//! # Record Format
//!
//! ```text
//! <tag:1> <y:2 BE> <x:2 BE>
//! ```
//!
//! - `tag` - `0x80` released, `0x81` touching
//! - `y`, `x` - raw sensor coordinates, big-endian
//!
//! # Calibration Format
//!
//! ```text
//! <x_min>,<x_max>,<y_min>,<y_max>
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod calibration;
pub mod decoder;
pub mod device;
pub mod types;

pub use calibration::{Axis, Calibration, CalibrationError, CALIBRATION_TEXT_LEN};
pub use decoder::{DecoderStats, FrameDecoder, Records, SyncPolicy};
pub use device::{DeviceId, INTERRUPT_IN_PIPE, MAX_TRANSFER_LEN, TOUCH_DIGITIZER};
pub use types::{ContactTag, DecodeError, RawRecord, RECORD_LEN, TAG_RELEASED, TAG_TOUCHING};
