//! Channel-backed [`ByteSource`].
//!
//! Whatever delivers interrupt transfers (a USB completion callback, a reader
//! thread, a test) pushes [`Chunk`]s into a [`ChunkChannel`]. The bridge owns
//! the receiving end, so the decoder only ever runs on one task regardless of
//! which thread the transfers arrive on.
//!
//! # Example
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use touch_core::{ChannelByteSource, Chunk, ChunkChannel};
//!
//! let channel: ChunkChannel<NoopRawMutex, 4> = ChunkChannel::new();
//! let source = ChannelByteSource::new(channel.receiver());
//!
//! let chunk = Chunk::from_slice(&[0x81, 0x00, 0x10, 0x00, 0x20]).unwrap();
//! channel.try_send(chunk).unwrap();
//! # drop(source);
//! ```

use crate::input::{ByteSource, Chunk, InputError};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver};

/// Bounded queue of transfers between producer and bridge.
pub type ChunkChannel<M, const N: usize> = Channel<M, Chunk, N>;

/// [`ByteSource`] that drains a [`ChunkChannel`].
pub struct ChannelByteSource<'ch, M: RawMutex, const N: usize> {
    rx: Receiver<'ch, M, Chunk, N>,
}

impl<'ch, M: RawMutex, const N: usize> ChannelByteSource<'ch, M, N> {
    /// Wrap the receiving end of a chunk channel.
    #[must_use]
    pub fn new(rx: Receiver<'ch, M, Chunk, N>) -> Self {
        Self { rx }
    }

    /// Number of chunks waiting.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.rx.len()
    }
}

impl<M: RawMutex, const N: usize> ByteSource for ChannelByteSource<'_, M, N> {
    async fn receive(&mut self) -> Result<Chunk, InputError> {
        Ok(self.rx.receive().await)
    }

    fn is_connected(&self) -> bool {
        // The producer side owns connection state; a channel never disconnects.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_chunks_arrive_in_order() {
        let channel: ChunkChannel<NoopRawMutex, 4> = ChunkChannel::new();
        let mut source = ChannelByteSource::new(channel.receiver());

        channel.try_send(Chunk::from_slice(&[1, 2, 3]).unwrap()).unwrap();
        channel.try_send(Chunk::from_slice(&[4]).unwrap()).unwrap();
        assert_eq!(source.queued(), 2);

        assert_eq!(block_on(source.receive()).unwrap().as_slice(), &[1, 2, 3]);
        assert_eq!(block_on(source.receive()).unwrap().as_slice(), &[4]);
        assert_eq!(source.queued(), 0);
        assert!(source.is_connected());
    }
}
