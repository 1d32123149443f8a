//! Platform-agnostic touch-to-pointer mapping, traits, and bridge.
//!
//! This crate turns decoded digitizer records into absolute pointer events
//! without any platform-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`mapper`]: Calibration clamp and scale ([`map`], [`PointerMapper`]) and
//!   edge detection ([`ContactState`])
//! - [`input`]: Byte source trait ([`ByteSource`])
//! - [`output`]: Pointer sink trait ([`PointerSink`])
//! - [`device`]: Device selection trait ([`DeviceSelector`])
//! - [`store`]: Calibration persistence ([`CalibrationStore`], [`load_or_init`])
//! - [`channel`]: Channel-backed byte source ([`ChannelByteSource`])
//! - [`bridge`]: Orchestrates decode, map and inject ([`TouchBridge`])
//!
//! # Example
//!
//! ```rust
//! use touch_core::{map, Calibration, ContactState, ContactTag, OutputRange, RawRecord};
//!
//! let calibration = Calibration::new(0, 100, 0, 100).unwrap();
//! let record = RawRecord::new(ContactTag::Touching, 50, 100);
//!
//! let sample = map(&record, &calibration, &OutputRange::ABSOLUTE);
//! assert_eq!((sample.x, sample.y), (32767, 0));
//!
//! let mut contact = ContactState::default();
//! assert!(contact.transition(sample.contact_down).is_some());
//! assert!(contact.transition(sample.contact_down).is_none());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod channel;
pub mod device;
pub mod input;
pub mod mapper;
pub mod output;
pub mod store;

// Re-export main types at crate root
pub use bridge::{BridgeStats, TouchBridge};
pub use channel::{ChannelByteSource, ChunkChannel};
pub use device::{DeviceError, DeviceSelector};
pub use input::{ByteSource, Chunk, InputError};
pub use mapper::{
    clamp_axis, map, ContactEdge, ContactState, OutputRange, PointerMapper, PointerSample,
};
pub use output::{OutputError, PointerSink};
pub use store::{load_or_init, CalibrationStore, StoreError};

pub use touch_proto::{
    Calibration, CalibrationError, ContactTag, DeviceId, FrameDecoder, RawRecord, SyncPolicy,
    INTERRUPT_IN_PIPE, MAX_TRANSFER_LEN, RECORD_LEN, TOUCH_DIGITIZER,
};
