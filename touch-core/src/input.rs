//! Byte source trait and error types.

use core::fmt;
use core::future::Future;
use heapless::Vec;
use touch_proto::MAX_TRANSFER_LEN;

/// One interrupt transfer worth of raw bytes.
///
/// Transfers are not aligned to record boundaries.
pub type Chunk = Vec<u8, MAX_TRANSFER_LEN>;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// USB/communication I/O error.
    Io,
    /// Device detached or stream ended.
    Disconnected,
    /// Transfer larger than a [`Chunk`].
    Overflow,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => f.write_str("transfer I/O error"),
            Self::Disconnected => f.write_str("device disconnected"),
            Self::Overflow => f.write_str("transfer exceeds chunk size"),
        }
    }
}

/// Async trait for raw byte sources.
///
/// This trait abstracts where interrupt transfers come from (a USB pipe,
/// a hidraw node, a capture replay, a test), so the bridge never touches
/// the transport directly.
pub trait ByteSource {
    /// Wait for the next chunk of bytes.
    ///
    /// Yields while no transfer is available.
    fn receive(&mut self) -> impl Future<Output = Result<Chunk, InputError>>;

    /// Check if the source is still attached.
    fn is_connected(&self) -> bool;
}
