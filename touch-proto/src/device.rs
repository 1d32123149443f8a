//! USB identity of the touch digitizer.

use core::fmt;

/// USB vendor/product identifier pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceId {
    #[must_use]
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VID={:04X}, PID={:04X}", self.vendor_id, self.product_id)
    }
}

/// The resistive touch controller this bridge talks to (eGalax-style, `0EEF:0001`).
pub const TOUCH_DIGITIZER: DeviceId = DeviceId::new(0x0EEF, 0x0001);

/// Index of the interrupt-in pipe carrying touch records.
pub const INTERRUPT_IN_PIPE: u8 = 0;

/// Largest interrupt transfer on a full-speed endpoint.
pub const MAX_TRANSFER_LEN: usize = 64;
