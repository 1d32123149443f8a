//! Stream framing for the digitizer's interrupt pipe.
//!
//! Interrupt transfers carry back-to-back 5-byte records, but a transfer
//! boundary is not guaranteed to line up with a record boundary. The
//! [`FrameDecoder`] buffers a partial record between calls to
//! [`FrameDecoder::feed`] and yields every record completed by the new bytes.
//!
//! # Example
//!
//! ```
//! use touch_proto::{ContactTag, FrameDecoder};
//!
//! let mut decoder = FrameDecoder::new();
//!
//! // First transfer ends in the middle of a record.
//! assert_eq!(decoder.feed(&[0x81, 0x01, 0x00]).count(), 0);
//! assert_eq!(decoder.pending(), 3);
//!
//! // Second transfer completes it.
//! let record = decoder.feed(&[0x02, 0x00]).next().unwrap();
//! assert_eq!(record.tag, ContactTag::Touching);
//! assert_eq!(record.y, 0x0100);
//! assert_eq!(record.x, 0x0200);
//! ```

use crate::types::{ContactTag, RawRecord, RECORD_LEN};

/// What the decoder does when a completed record carries an invalid tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncPolicy {
    /// Discard the rest of the current chunk and restart at the next chunk.
    ///
    /// The tag is checked only once all five bytes are buffered. A single
    /// corrupt byte therefore costs every record still in the same transfer.
    #[default]
    StopTheLine,
    /// Drop bytes one at a time until a valid tag starts a record.
    ///
    /// Recovers within the same chunk, at the cost of possibly locking onto
    /// a coordinate byte that happens to equal `0x80` or `0x81`.
    Resync,
}

/// Running counters kept by a [`FrameDecoder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    /// Records yielded.
    pub records: u32,
    /// Times the stream was found out of step.
    pub desyncs: u32,
    /// Bytes thrown away while out of step.
    pub discarded: u32,
}

/// Stateful 5-byte record assembler.
///
/// One decoder per physical device stream. It holds mutable buffer state and
/// must be driven by a single consumer.
#[derive(Debug)]
pub struct FrameDecoder {
    buf: [u8; RECORD_LEN],
    pos: usize,
    policy: SyncPolicy,
    hunting: bool,
    stats: DecoderStats,
}

impl FrameDecoder {
    /// Create a decoder using [`SyncPolicy::StopTheLine`].
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy(SyncPolicy::StopTheLine)
    }

    /// Create a decoder with an explicit resynchronisation policy.
    #[must_use]
    pub const fn with_policy(policy: SyncPolicy) -> Self {
        Self {
            buf: [0u8; RECORD_LEN],
            pos: 0,
            policy,
            hunting: false,
            stats: DecoderStats {
                records: 0,
                desyncs: 0,
                discarded: 0,
            },
        }
    }

    /// Feed one chunk of bytes.
    ///
    /// Returns a lazy iterator over the records completed by this chunk,
    /// including any partial record buffered by earlier calls. Bytes are
    /// consumed as the iterator advances, so it should be drained; bytes
    /// left unread when it is dropped are lost.
    pub fn feed<'d, 'c>(&'d mut self, chunk: &'c [u8]) -> Records<'d, 'c> {
        Records {
            decoder: self,
            chunk,
        }
    }

    /// Number of bytes buffered towards the next record (0..5).
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pos
    }

    /// Active resynchronisation policy.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Counters since creation.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Drop any partially buffered record.
    pub fn reset(&mut self) {
        self.stats.discarded = self.stats.discarded.saturating_add(self.pos as u32);
        self.pos = 0;
        self.hunting = false;
    }

    fn push(&mut self, byte: u8) -> Step {
        if self.pos == 0 && self.policy == SyncPolicy::Resync {
            if !ContactTag::is_valid(byte) {
                // A run of skipped bytes counts as one desync.
                if !self.hunting {
                    self.hunting = true;
                    self.stats.desyncs = self.stats.desyncs.saturating_add(1);
                }
                self.stats.discarded = self.stats.discarded.saturating_add(1);
                return Step::Skipped;
            }
            self.hunting = false;
        }

        self.buf[self.pos] = byte;
        self.pos += 1;

        if self.pos < RECORD_LEN {
            return Step::Pending;
        }

        self.pos = 0;
        match RawRecord::from_bytes(&self.buf) {
            Ok(record) => {
                self.stats.records = self.stats.records.saturating_add(1);
                Step::Record(record)
            }
            Err(_) => {
                self.stats.desyncs = self.stats.desyncs.saturating_add(1);
                self.stats.discarded = self.stats.discarded.saturating_add(RECORD_LEN as u32);
                Step::Broken
            }
        }
    }
}

/// Outcome of pushing a single byte.
enum Step {
    Pending,
    Skipped,
    Record(RawRecord),
    Broken,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`FrameDecoder::feed`].
#[derive(Debug)]
pub struct Records<'d, 'c> {
    decoder: &'d mut FrameDecoder,
    chunk: &'c [u8],
}

impl Records<'_, '_> {
    /// Bytes of the chunk not yet consumed.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.chunk.len()
    }
}

impl Iterator for Records<'_, '_> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        while let Some((&byte, rest)) = self.chunk.split_first() {
            self.chunk = rest;

            match self.decoder.push(byte) {
                Step::Record(record) => return Some(record),
                Step::Pending | Step::Skipped => {}
                Step::Broken => {
                    let dropped = self.chunk.len() as u32;
                    self.decoder.stats.discarded =
                        self.decoder.stats.discarded.saturating_add(dropped);
                    self.chunk = &[];
                    return None;
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn record_bytes(tag: ContactTag, x: u16, y: u16) -> [u8; RECORD_LEN] {
        RawRecord::new(tag, x, y).to_bytes()
    }

    fn stream(records: &[RawRecord]) -> Vec<u8> {
        records.iter().flat_map(|r| r.to_bytes()).collect()
    }

    fn sample_records() -> Vec<RawRecord> {
        std::vec![
            RawRecord::new(ContactTag::Released, 100, 200),
            RawRecord::new(ContactTag::Touching, 1000, 2000),
            RawRecord::new(ContactTag::Touching, 1010, 1990),
            RawRecord::new(ContactTag::Touching, 0x8081, 0x8180),
            RawRecord::new(ContactTag::Released, 3900, 3650),
        ]
    }

    #[test]
    fn test_single_record() {
        let mut decoder = FrameDecoder::new();
        let bytes = record_bytes(ContactTag::Touching, 512, 1024);
        let records: Vec<_> = decoder.feed(&bytes).collect();
        assert_eq!(records, [RawRecord::new(ContactTag::Touching, 512, 1024)]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_partial_record_is_buffered() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(&[0x80, 0x00]).count(), 0);
        assert_eq!(decoder.pending(), 2);
        assert_eq!(decoder.feed(&[0x10, 0x00]).count(), 0);
        assert_eq!(decoder.pending(), 4);

        let records: Vec<_> = decoder.feed(&[0x20]).collect();
        assert_eq!(records, [RawRecord::new(ContactTag::Released, 0x0020, 0x0010)]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_empty_chunk() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(&[]).count(), 0);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_chunking_invariance() {
        let expected = sample_records();
        let bytes = stream(&expected);

        for chunk_size in 1..=bytes.len() {
            let mut decoder = FrameDecoder::new();
            let mut decoded = Vec::new();
            for chunk in bytes.chunks(chunk_size) {
                decoded.extend(decoder.feed(chunk));
            }
            assert_eq!(decoded, expected, "chunk size {}", chunk_size);
            assert_eq!(decoder.pending(), 0);
        }
    }

    #[test]
    fn test_uneven_chunking_matches_single_chunk() {
        let bytes = stream(&sample_records());
        let mut whole = FrameDecoder::new();
        let expected: Vec<_> = whole.feed(&bytes).collect();

        let mut decoder = FrameDecoder::new();
        let mut decoded = Vec::new();
        let mut rest = &bytes[..];
        for size in [3usize, 1, 7, 2, 11, 1].iter().cycle() {
            if rest.is_empty() {
                break;
            }
            let take = (*size).min(rest.len());
            decoded.extend(decoder.feed(&rest[..take]));
            rest = &rest[take..];
        }
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_stop_the_line_discards_rest_of_chunk() {
        let mut decoder = FrameDecoder::new();
        // [80 FF 81 g g] has a valid tag, [g g 80 v v] does not; [v v] are dropped.
        let chunk = [
            0x80, 0xFF, 0x81, 0x13, 0x37, 0x42, 0x24, 0x80, 0x01, 0x02, 0x03, 0x04,
        ];
        let records: Vec<_> = decoder.feed(&chunk).collect();
        assert_eq!(records, [RawRecord::new(ContactTag::Released, 0x1337, 0xFF81)]);
        assert_eq!(decoder.pending(), 0);

        let stats = decoder.stats();
        assert_eq!(stats.desyncs, 1);
        assert_eq!(stats.discarded, 7);

        // A fresh, aligned chunk decodes cleanly.
        let next = record_bytes(ContactTag::Touching, 300, 400);
        let records: Vec<_> = decoder.feed(&next).collect();
        assert_eq!(records, [RawRecord::new(ContactTag::Touching, 300, 400)]);
    }

    #[test]
    fn test_stop_the_line_loses_valid_records_after_bad_tag() {
        let mut decoder = FrameDecoder::new();
        let mut chunk = Vec::from([0x00u8, 0, 0, 0, 0]);
        chunk.extend_from_slice(&record_bytes(ContactTag::Touching, 1, 2));
        assert_eq!(decoder.feed(&chunk).count(), 0);
        assert_eq!(decoder.stats().discarded, 10);
    }

    #[test]
    fn test_stop_the_line_bad_tag_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(&[0x55, 0x00, 0x00]).count(), 0);
        // Record completes with an invalid tag; the trailing record in this chunk is lost.
        let mut chunk = Vec::from([0x00u8, 0x00]);
        chunk.extend_from_slice(&record_bytes(ContactTag::Touching, 1, 2));
        assert_eq!(decoder.feed(&chunk).count(), 0);
        assert_eq!(decoder.pending(), 0);

        let records: Vec<_> = decoder.feed(&record_bytes(ContactTag::Released, 5, 6)).collect();
        assert_eq!(records, [RawRecord::new(ContactTag::Released, 5, 6)]);
    }

    #[test]
    fn test_resync_recovers_within_chunk() {
        let mut decoder = FrameDecoder::with_policy(SyncPolicy::Resync);
        let mut chunk = Vec::from([0x13u8, 0x37, 0x00]);
        chunk.extend_from_slice(&record_bytes(ContactTag::Touching, 700, 800));
        chunk.extend_from_slice(&record_bytes(ContactTag::Released, 701, 801));

        let records: Vec<_> = decoder.feed(&chunk).collect();
        assert_eq!(
            records,
            [
                RawRecord::new(ContactTag::Touching, 700, 800),
                RawRecord::new(ContactTag::Released, 701, 801),
            ]
        );

        let stats = decoder.stats();
        assert_eq!(stats.desyncs, 1);
        assert_eq!(stats.discarded, 3);
        assert_eq!(stats.records, 2);
    }

    #[test]
    fn test_resync_matches_stop_the_line_on_clean_stream() {
        let bytes = stream(&sample_records());
        let mut strict = FrameDecoder::new();
        let mut lenient = FrameDecoder::with_policy(SyncPolicy::Resync);
        for chunk in bytes.chunks(4) {
            let a: Vec<_> = strict.feed(chunk).collect();
            let b: Vec<_> = lenient.feed(chunk).collect();
            assert_eq!(a, b);
        }
        assert_eq!(lenient.stats().desyncs, 0);
    }

    #[test]
    fn test_records_iterator_is_lazy() {
        let bytes = stream(&sample_records());
        let mut decoder = FrameDecoder::new();
        let mut records = decoder.feed(&bytes);
        assert_eq!(records.remaining(), 25);
        assert!(records.next().is_some());
        assert_eq!(records.remaining(), 20);
    }

    #[test]
    fn test_reset_drops_partial_record() {
        let mut decoder = FrameDecoder::new();
        let _ = decoder.feed(&[0x81, 0x00]).count();
        decoder.reset();
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.stats().discarded, 2);

        let records: Vec<_> = decoder.feed(&record_bytes(ContactTag::Released, 9, 9)).collect();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_reset_starts_a_new_desync_run() {
        let mut decoder = FrameDecoder::with_policy(SyncPolicy::Resync);
        assert_eq!(decoder.feed(&[0x13, 0x37]).count(), 0);
        assert_eq!(decoder.stats().desyncs, 1);

        decoder.reset();
        assert_eq!(decoder.feed(&[0x42]).count(), 0);
        assert_eq!(decoder.stats().desyncs, 2);
        assert_eq!(decoder.stats().discarded, 3);
    }
}
