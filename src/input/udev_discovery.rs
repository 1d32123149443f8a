use super::device::parse_hid_id;
use log::debug;
use std::path::PathBuf;
use touch_core::{DeviceError, DeviceId};

/// Find the hidraw node of the first HID device reporting `id`.
///
/// Walks every `hidraw` device up to its `hid` parent and compares the
/// parent's `HID_ID` property.
pub fn find_hidraw(id: DeviceId) -> Result<PathBuf, DeviceError> {
    let mut enumerator = udev::Enumerator::new().map_err(udev_error)?;
    enumerator.match_subsystem("hidraw").map_err(udev_error)?;

    for device in enumerator.scan_devices().map_err(udev_error)? {
        let Ok(Some(hid)) = device.parent_with_subsystem("hid") else {
            continue;
        };

        let found = hid
            .property_value("HID_ID")
            .and_then(|value| value.to_str())
            .and_then(parse_hid_id);

        match found {
            Some(found) if found == id => {
                if let Some(devnode) = device.devnode() {
                    return Ok(devnode.to_path_buf());
                }
            }
            Some(found) => debug!("Skipping {:?} ({})", device.sysname(), found),
            None => {}
        }
    }

    Err(DeviceError::NotFound)
}

fn udev_error(err: std::io::Error) -> DeviceError {
    debug!("udev error: {}", err);
    DeviceError::Io
}
