//! Reader thread feeding the chunk channel.
//!
//! Blocking reads happen on a plain std thread. Each transfer is pushed into
//! the [`HostChannel`] as one [`Chunk`], and the bridge drains it from the
//! executor through a [`ReaderSource`].

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender, TrySendError};
use embassy_sync::signal::Signal;
use log::{debug, warn};
use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use touch_core::{
    ByteSource, ChannelByteSource, Chunk, ChunkChannel, InputError, MAX_TRANSFER_LEN,
};

/// Transfers buffered between the reader thread and the bridge.
pub const CHANNEL_DEPTH: usize = 16;

/// Back-off while the channel is full.
const FULL_BACKOFF: Duration = Duration::from_millis(1);

/// Chunk channel shared by the reader thread and the executor.
pub type HostChannel = ChunkChannel<CriticalSectionRawMutex, CHANNEL_DEPTH>;

/// Connection state shared by the reader thread and its [`ReaderSource`].
pub struct ReaderLink {
    connected: AtomicBool,
    closed: Signal<CriticalSectionRawMutex, InputError>,
}

impl ReaderLink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            closed: Signal::new(),
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn close(&self, reason: InputError) {
        self.connected.store(false, Ordering::Release);
        self.closed.signal(reason);
    }
}

impl Default for ReaderLink {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a thread copying transfers from `reader` into the channel.
///
/// The thread ends on end of file or on the first read error, after which
/// `link` reports the stream as disconnected.
pub fn spawn_reader<R>(
    mut reader: R,
    tx: Sender<'static, CriticalSectionRawMutex, Chunk, CHANNEL_DEPTH>,
    link: &'static ReaderLink,
) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("touch-reader".into())
        .spawn(move || {
            let mut buf = [0u8; MAX_TRANSFER_LEN];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => {
                        debug!("Device stream ended");
                        link.close(InputError::Disconnected);
                        return;
                    }
                    Ok(n) => {
                        let Ok(chunk) = Chunk::from_slice(&buf[..n]) else {
                            link.close(InputError::Overflow);
                            return;
                        };
                        push(&tx, chunk);
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        warn!("Device read failed: {}", e);
                        link.close(InputError::Io);
                        return;
                    }
                }
            }
        })
}

/// Queue a transfer, sleeping while the bridge catches up. Nothing is dropped.
fn push(tx: &Sender<'static, CriticalSectionRawMutex, Chunk, CHANNEL_DEPTH>, mut chunk: Chunk) {
    loop {
        match tx.try_send(chunk) {
            Ok(()) => return,
            Err(TrySendError::Full(rejected)) => {
                chunk = rejected;
                thread::sleep(FULL_BACKOFF);
            }
        }
    }
}

/// [`ByteSource`] draining the reader thread's channel.
///
/// Queued transfers are delivered before the disconnect is reported. The
/// disconnect is reported once; afterwards the source waits forever.
pub struct ReaderSource<'a> {
    chunks: ChannelByteSource<'a, CriticalSectionRawMutex, CHANNEL_DEPTH>,
    link: &'a ReaderLink,
}

impl<'a> ReaderSource<'a> {
    pub fn new(
        rx: Receiver<'a, CriticalSectionRawMutex, Chunk, CHANNEL_DEPTH>,
        link: &'a ReaderLink,
    ) -> Self {
        Self {
            chunks: ChannelByteSource::new(rx),
            link,
        }
    }
}

impl ByteSource for ReaderSource<'_> {
    async fn receive(&mut self) -> Result<Chunk, InputError> {
        match select(self.chunks.receive(), self.link.closed.wait()).await {
            Either::First(chunk) => chunk,
            Either::Second(reason) => Err(reason),
        }
    }

    fn is_connected(&self) -> bool {
        self.link.is_connected() || self.chunks.queued() > 0
    }
}
