//! Device selection trait.

use core::fmt;
use touch_proto::DeviceId;

/// Error locating or opening the digitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// No device matches the identifier.
    NotFound,
    /// Device exists but cannot be opened.
    AccessDenied,
    /// Device has no interrupt-in pipe at the requested index.
    NoInterruptPipe,
    /// Any other I/O failure while opening.
    Io,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("device not found"),
            Self::AccessDenied => f.write_str("access denied"),
            Self::NoInterruptPipe => f.write_str("no interrupt-in pipe"),
            Self::Io => f.write_str("I/O error"),
        }
    }
}

/// Locates the digitizer and opens its interrupt-in pipe.
///
/// A missing device is not fatal: callers log the error and stay idle.
pub trait DeviceSelector {
    /// Handle to the opened pipe, used by the host to drive a [`ByteSource`](crate::ByteSource).
    type Pipe;

    /// Open interrupt-in pipe `pipe_index` of the first device matching `id`.
    fn open(&mut self, id: DeviceId, pipe_index: u8) -> Result<Self::Pipe, DeviceError>;
}
