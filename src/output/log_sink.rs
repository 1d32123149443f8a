//! Dry-run pointer sink.

use log::{debug, info};
use touch_core::{OutputError, PointerSink};

/// [`PointerSink`] that logs every event instead of injecting it.
///
/// Keeps the last position and button state so a run can be inspected
/// without an OS injection backend.
#[derive(Debug, Default)]
pub struct LogPointerSink {
    position: Option<(u32, u32)>,
    pressed: bool,
    events: u64,
}

impl LogPointerSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last absolute position, `None` before the first move.
    #[must_use]
    pub fn position(&self) -> Option<(u32, u32)> {
        self.position
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Events accepted so far.
    #[must_use]
    pub fn events(&self) -> u64 {
        self.events
    }
}

impl PointerSink for LogPointerSink {
    async fn move_to(&mut self, x: u32, y: u32) -> Result<(), OutputError> {
        debug!("move ({}, {})", x, y);
        self.position = Some((x, y));
        self.events += 1;
        Ok(())
    }

    async fn button_down(&mut self) -> Result<(), OutputError> {
        info!("button down at {:?}", self.position);
        self.pressed = true;
        self.events += 1;
        Ok(())
    }

    async fn button_up(&mut self) -> Result<(), OutputError> {
        info!("button up at {:?}", self.position);
        self.pressed = false;
        self.events += 1;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}
