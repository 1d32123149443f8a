//! Pointer sink trait and error types.

use core::fmt;
use core::future::Future;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Injection I/O error.
    Io,
    /// Injector not initialised yet.
    NotReady,
    /// Injector refused the event (e.g. invalid argument).
    Rejected,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => f.write_str("injection I/O error"),
            Self::NotReady => f.write_str("injector not ready"),
            Self::Rejected => f.write_str("injection rejected"),
        }
    }
}

/// Async trait for pointer event sinks.
///
/// This trait abstracts the OS-level pointer injection. Each call is
/// independent; the caller guarantees button events are edge-triggered, so
/// implementations do not need to deduplicate.
pub trait PointerSink {
    /// Move the pointer to an absolute position in output-range units.
    fn move_to(&mut self, x: u32, y: u32) -> impl Future<Output = Result<(), OutputError>>;

    /// Press the primary button.
    fn button_down(&mut self) -> impl Future<Output = Result<(), OutputError>>;

    /// Release the primary button.
    fn button_up(&mut self) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the sink is ready to accept events.
    fn is_ready(&self) -> bool;
}
