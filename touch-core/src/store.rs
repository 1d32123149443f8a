//! Calibration persistence trait and the load-or-create policy.

use core::fmt;
use log::{info, warn};
use touch_proto::{Calibration, CalibrationError};

/// Error loading a stored calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError<E> {
    /// Backing storage failed.
    Io(E),
    /// Stored text is malformed or describes an empty range.
    Invalid(CalibrationError),
}

impl<E> From<CalibrationError> for StoreError<E> {
    fn from(err: CalibrationError) -> Self {
        StoreError::Invalid(err)
    }
}

impl<E: fmt::Display> fmt::Display for StoreError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "calibration storage error: {}", err),
            Self::Invalid(err) => write!(f, "invalid calibration: {}", err),
        }
    }
}

/// Persistent home of the calibration record.
pub trait CalibrationStore {
    type Error: fmt::Display;

    /// Load the stored calibration, `Ok(None)` if nothing is stored yet.
    fn load(&mut self) -> Result<Option<Calibration>, StoreError<Self::Error>>;

    /// Persist a calibration, replacing any previous one.
    fn save(&mut self, calibration: &Calibration) -> Result<(), Self::Error>;
}

/// Load the calibration, falling back to [`Calibration::DEFAULT`].
///
/// - nothing stored: the default is persisted and used
/// - unreadable or invalid record: the default is used, the record is left as is
///
/// Never fails; every fallback is logged.
pub fn load_or_init<S: CalibrationStore>(store: &mut S) -> Calibration {
    let calibration = match store.load() {
        Ok(Some(calibration)) => calibration,
        Ok(None) => {
            info!("No calibration stored, creating {}", Calibration::DEFAULT);
            if let Err(err) = store.save(&Calibration::DEFAULT) {
                warn!("Failed to store default calibration: {}", err);
            }
            Calibration::DEFAULT
        }
        Err(err) => {
            warn!("{}, using defaults", err);
            Calibration::DEFAULT
        }
    };

    info!(
        "Calibration settings: x=({}..{}), y=({}..{})",
        calibration.x_min(),
        calibration.x_max(),
        calibration.y_min(),
        calibration.y_max()
    );
    calibration
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::{String, ToString};

    /// In-memory store holding the raw text, like a file would.
    struct MemoryStore {
        text: Option<String>,
        fail_io: bool,
        saves: usize,
    }

    impl MemoryStore {
        fn new(text: Option<&str>) -> Self {
            Self {
                text: text.map(ToString::to_string),
                fail_io: false,
                saves: 0,
            }
        }
    }

    impl CalibrationStore for MemoryStore {
        type Error = &'static str;

        fn load(&mut self) -> Result<Option<Calibration>, StoreError<Self::Error>> {
            if self.fail_io {
                return Err(StoreError::Io("read failed"));
            }
            match &self.text {
                Some(text) => Ok(Some(text.parse()?)),
                None => Ok(None),
            }
        }

        fn save(&mut self, calibration: &Calibration) -> Result<(), Self::Error> {
            if self.fail_io {
                return Err("write failed");
            }
            self.saves += 1;
            self.text = Some(calibration.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_load_existing() {
        let mut store = MemoryStore::new(Some("90,3900,130,3600"));
        let calibration = load_or_init(&mut store);
        assert_eq!(calibration, Calibration::new(90, 3900, 130, 3600).unwrap());
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn test_missing_creates_default() {
        let mut store = MemoryStore::new(None);
        assert_eq!(load_or_init(&mut store), Calibration::DEFAULT);
        assert_eq!(store.saves, 1);
        assert_eq!(store.text.as_deref(), Some("140,3900,280,3650"));
    }

    #[test]
    fn test_malformed_falls_back_without_overwriting() {
        let mut store = MemoryStore::new(Some("90;3900;130;3600"));
        assert_eq!(load_or_init(&mut store), Calibration::DEFAULT);
        assert_eq!(store.saves, 0);
        assert_eq!(store.text.as_deref(), Some("90;3900;130;3600"));
    }

    #[test]
    fn test_degenerate_falls_back() {
        let mut store = MemoryStore::new(Some("100,100,130,3600"));
        assert_eq!(load_or_init(&mut store), Calibration::DEFAULT);
    }

    #[test]
    fn test_io_failure_falls_back() {
        let mut store = MemoryStore::new(None);
        store.fail_io = true;
        assert_eq!(load_or_init(&mut store), Calibration::DEFAULT);
        assert_eq!(store.saves, 0);
    }
}
