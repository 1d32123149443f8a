//! Calibration stored as a one-line text file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use touch_core::{Calibration, CalibrationStore, StoreError};

/// [`CalibrationStore`] over a plain text file such as `calibration.txt`.
#[derive(Debug, Clone)]
pub struct FileCalibrationStore {
    path: PathBuf,
}

impl FileCalibrationStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalibrationStore for FileCalibrationStore {
    type Error = io::Error;

    fn load(&mut self) -> Result<Option<Calibration>, StoreError<Self::Error>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(Some(text.parse()?))
    }

    fn save(&mut self, calibration: &Calibration) -> Result<(), Self::Error> {
        fs::write(&self.path, calibration.to_text().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use touch_core::{load_or_init, CalibrationError};

    fn store_in(dir: &TempDir) -> FileCalibrationStore {
        FileCalibrationStore::new(dir.path().join("calibration.txt"))
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(store.load(), Ok(None)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        let calibration = Calibration::new(90, 3900, 130, 3600).unwrap();

        store.save(&calibration).unwrap();
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "90,3900,130,3600"
        );
        assert_eq!(store.load().unwrap(), Some(calibration));
    }

    #[test]
    fn test_trailing_newline_accepted() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        fs::write(store.path(), "90,3900,130,3600\n").unwrap();
        assert_eq!(
            store.load().unwrap(),
            Some(Calibration::new(90, 3900, 130, 3600).unwrap())
        );
    }

    #[test]
    fn test_malformed_file_is_invalid() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        fs::write(store.path(), "90,3900,abc,3600").unwrap();
        assert!(matches!(
            store.load(),
            Err(StoreError::Invalid(CalibrationError::InvalidNumber(2)))
        ));
    }

    #[test]
    fn test_load_or_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert_eq!(load_or_init(&mut store), Calibration::DEFAULT);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "140,3900,280,3650"
        );
    }

    #[test]
    fn test_load_or_init_keeps_malformed_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        fs::write(store.path(), "1,2,3").unwrap();

        assert_eq!(load_or_init(&mut store), Calibration::DEFAULT);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "1,2,3");
    }
}
