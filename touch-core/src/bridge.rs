//! TouchBridge: connects a byte source to a pointer sink.

use crate::input::{ByteSource, InputError};
use crate::mapper::{ContactEdge, ContactState, OutputRange, PointerMapper};
use crate::output::{OutputError, PointerSink};
use log::{debug, trace, warn};
use touch_proto::{Calibration, FrameDecoder, RawRecord, SyncPolicy};

/// A bridge that turns raw transfers from a byte source into pointer events.
///
/// Owns the stream's [`FrameDecoder`] and contact state, so a bridge is the
/// single consumer of one device stream.
///
/// # Event Rules
///
/// - every valid record produces one absolute move
/// - a press or release follows the move only when the contact state changes
/// - a failed injection is dropped, never retried
/// - while the sink is not ready, records are skipped and the contact state is
///   left unchanged
///
/// # Error Handling
///
/// On input errors, the bridge releases a held contact so the button cannot
/// stay stuck down.
pub struct TouchBridge<I, O> {
    input: I,
    output: O,
    decoder: FrameDecoder,
    mapper: PointerMapper,
    contact: ContactState,
    stats: BridgeStats,
}

/// Running counters kept by a [`TouchBridge`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeStats {
    /// Moves accepted by the sink.
    pub samples: u32,
    /// Button presses delivered.
    pub presses: u32,
    /// Button releases delivered.
    pub releases: u32,
    /// Records skipped because the sink was not ready.
    pub skipped: u32,
    /// Sink calls that failed and were dropped.
    pub dropped_injections: u32,
}

impl<I: ByteSource, O: PointerSink> TouchBridge<I, O> {
    /// Create a bridge mapping into [`OutputRange::ABSOLUTE`] with the
    /// stop-the-line decoder.
    pub fn new(input: I, output: O, calibration: Calibration) -> Self {
        Self::with_config(
            input,
            output,
            PointerMapper::new(calibration, OutputRange::ABSOLUTE),
            SyncPolicy::StopTheLine,
        )
    }

    /// Create a bridge with an explicit mapper and resynchronisation policy.
    pub fn with_config(input: I, output: O, mapper: PointerMapper, policy: SyncPolicy) -> Self {
        Self {
            input,
            output,
            decoder: FrameDecoder::with_policy(policy),
            mapper,
            contact: ContactState::Up,
            stats: BridgeStats::default(),
        }
    }

    /// Run the bridge, forwarding pointer events indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Receive a single chunk and forward the records it completes.
    ///
    /// Returns the number of samples delivered.
    pub async fn process_one(&mut self) -> Result<usize, InputError> {
        match self.input.receive().await {
            Ok(chunk) => Ok(self.process_chunk(&chunk).await),
            Err(e) => {
                warn!("Input error: {}", e);
                self.release_contact().await;
                Err(e)
            }
        }
    }

    /// Decode a chunk and deliver every completed record to the sink.
    ///
    /// Returns the number of samples delivered.
    pub async fn process_chunk(&mut self, chunk: &[u8]) -> usize {
        let before = self.decoder.stats();
        let mut delivered = 0;

        for record in self.decoder.feed(chunk) {
            if deliver(
                &mut self.output,
                &self.mapper,
                &mut self.contact,
                &mut self.stats,
                &record,
            )
            .await
            {
                delivered += 1;
            }
        }

        let after = self.decoder.stats();
        if after.desyncs != before.desyncs {
            warn!(
                "Interrupt data sequence broken, discarded {} bytes",
                after.discarded.saturating_sub(before.discarded)
            );
        }

        delivered
    }

    /// Release the button if the contact is currently held.
    async fn release_contact(&mut self) {
        if self.contact.transition(false) == Some(ContactEdge::Released) {
            self.stats.releases = self.stats.releases.saturating_add(1);
            if let Err(e) = self.output.button_up().await {
                note_dropped(&mut self.stats, "button up", e);
            }
        }
    }

    /// Current contact state.
    pub fn contact(&self) -> ContactState {
        self.contact
    }

    /// Bridge counters.
    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    /// Decoder owned by this bridge.
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    /// Mapper used for every record.
    pub fn mapper(&self) -> &PointerMapper {
        &self.mapper
    }

    /// Get a reference to the byte source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the byte source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the pointer sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the pointer sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its source and sink.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Map one record and inject it. Returns whether the move reached the sink.
async fn deliver<O: PointerSink>(
    output: &mut O,
    mapper: &PointerMapper,
    contact: &mut ContactState,
    stats: &mut BridgeStats,
    record: &RawRecord,
) -> bool {
    if !output.is_ready() {
        debug!("Injector not ready, skipping record");
        stats.skipped = stats.skipped.saturating_add(1);
        return false;
    }

    let sample = mapper.map(record);
    trace!(
        "{:02X}: ({}, {}) -> ({}, {})",
        record.tag.as_byte(),
        record.x,
        record.y,
        sample.x,
        sample.y
    );

    let moved = match output.move_to(sample.x, sample.y).await {
        Ok(()) => {
            stats.samples = stats.samples.saturating_add(1);
            true
        }
        Err(e) => {
            note_dropped(stats, "move", e);
            false
        }
    };

    match contact.transition(sample.contact_down) {
        Some(ContactEdge::Pressed) => {
            stats.presses = stats.presses.saturating_add(1);
            if let Err(e) = output.button_down().await {
                note_dropped(stats, "button down", e);
            }
        }
        Some(ContactEdge::Released) => {
            stats.releases = stats.releases.saturating_add(1);
            if let Err(e) = output.button_up().await {
                note_dropped(stats, "button up", e);
            }
        }
        None => {}
    }

    moved
}

fn note_dropped(stats: &mut BridgeStats, what: &str, e: OutputError) {
    debug!("Dropped {} injection: {}", what, e);
    stats.dropped_injections = stats.dropped_injections.saturating_add(1);
}
