//! Where the registration store lives.

use std::path::PathBuf;

use crate::db::{DbResult, Store};

/// File name of the registration store.
pub const DEFAULT_DB_FILE: &str = "ekg_patients.db";

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "ekg-intake";

/// Store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    /// The store file in the working directory.
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// The store file under the platform data directory, which is created
    /// if missing. Falls back to the working directory when the platform has
    /// no data directory.
    pub fn in_data_dir() -> DbResult<Self> {
        let Some(base) = dirs::data_local_dir() else {
            tracing::warn!("no platform data directory, using working directory");
            return Ok(Self::default());
        };
        let dir = base.join(APP_DIR_NAME);
        std::fs::create_dir_all(&dir)?;
        Ok(Self::new(dir.join(DEFAULT_DB_FILE)))
    }

    /// Open the store, creating its schema if needed.
    pub fn open_store(&self) -> DbResult<Store> {
        tracing::info!(path = %self.db_path.display(), "opening registration store");
        Store::open(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_working_directory_file() {
        assert_eq!(StoreConfig::default().db_path, PathBuf::from("ekg_patients.db"));
    }

    #[test]
    fn test_open_store_at_custom_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("clinic.db"));

        let store = config.open_store().unwrap();
        assert_eq!(store.path(), config.db_path.as_path());
        assert!(config.db_path.exists());
    }
}
