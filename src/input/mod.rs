mod device;
mod reader;
#[cfg(target_os = "linux")]
mod udev_discovery;

pub use device::{parse_hid_id, DevicePipe, PathSelector};
pub use reader::{spawn_reader, HostChannel, ReaderLink, ReaderSource, CHANNEL_DEPTH};
