//! Device lookup over hidraw nodes and plain files.

use log::info;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use touch_core::{DeviceError, DeviceId, DeviceSelector, INTERRUPT_IN_PIPE};

/// Opened interrupt-in pipe.
#[derive(Debug)]
pub enum DevicePipe {
    Stdin(io::Stdin),
    File(File),
}

impl Read for DevicePipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Stdin(stdin) => stdin.read(buf),
            Self::File(file) => file.read(buf),
        }
    }
}

/// [`DeviceSelector`] for a hidraw node.
///
/// Either opens a fixed path (`-` meaning stdin, which is handy for replaying
/// captures) or asks udev for the first hidraw node whose HID parent matches
/// the requested vendor/product pair.
#[derive(Debug, Clone)]
pub struct PathSelector {
    target: Target,
}

#[derive(Debug, Clone)]
enum Target {
    Fixed(PathBuf),
    Discover,
}

impl PathSelector {
    /// Open `path` as is, without checking its identity.
    pub fn fixed(path: impl AsRef<Path>) -> Self {
        Self {
            target: Target::Fixed(path.as_ref().to_path_buf()),
        }
    }

    /// Search the system's hidraw nodes.
    #[must_use]
    pub fn discover() -> Self {
        Self {
            target: Target::Discover,
        }
    }
}

impl DeviceSelector for PathSelector {
    type Pipe = DevicePipe;

    fn open(&mut self, id: DeviceId, pipe_index: u8) -> Result<DevicePipe, DeviceError> {
        if pipe_index != INTERRUPT_IN_PIPE {
            return Err(DeviceError::NoInterruptPipe);
        }

        let path = match &self.target {
            Target::Fixed(path) if path.as_os_str() == "-" => {
                info!("Reading records from stdin");
                return Ok(DevicePipe::Stdin(io::stdin()));
            }
            Target::Fixed(path) => path.clone(),
            Target::Discover => discover(id)?,
        };

        let file = File::open(&path).map_err(|e| device_error(&e))?;
        info!("Opened {} at {}", id, path.display());
        Ok(DevicePipe::File(file))
    }
}

#[cfg(target_os = "linux")]
fn discover(id: DeviceId) -> Result<PathBuf, DeviceError> {
    super::udev_discovery::find_hidraw(id)
}

#[cfg(not(target_os = "linux"))]
fn discover(_id: DeviceId) -> Result<PathBuf, DeviceError> {
    Err(DeviceError::NotFound)
}

fn device_error(err: &io::Error) -> DeviceError {
    match err.kind() {
        io::ErrorKind::NotFound => DeviceError::NotFound,
        io::ErrorKind::PermissionDenied => DeviceError::AccessDenied,
        _ => DeviceError::Io,
    }
}

/// Extract the vendor/product pair from a HID device's `HID_ID` property,
/// formatted `bus:vendor:product` in hex, e.g. `0003:00000EEF:00000001`.
#[must_use]
pub fn parse_hid_id(value: &str) -> Option<DeviceId> {
    let mut fields = value.trim().split(':');
    let _bus = fields.next()?;
    let vendor = u32::from_str_radix(fields.next()?, 16).ok()?;
    let product = u32::from_str_radix(fields.next()?, 16).ok()?;

    Some(DeviceId::new(
        u16::try_from(vendor).ok()?,
        u16::try_from(product).ok()?,
    ))
}
