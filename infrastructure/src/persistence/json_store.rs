//! JSON file adapter for the durable key-value port.
//!
//! One file per namespace under a state directory
//! (`~/.local/share/clearflow/<namespace>.json` by default). Writes go
//! through the whole-snapshot contract of [`StateStore`]; two processes
//! writing the same namespace resolve as last-writer-wins.

use clearflow_application::{StateStore, StoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-per-namespace [`StateStore`] implementation.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform state directory: `<data_dir>/clearflow`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("clearflow"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{}.json", namespace))
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, namespace: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(self.path_for(namespace)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(e.to_string())),
        }
    }

    fn set(&self, namespace: &str, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        let path = self.path_for(namespace);
        std::fs::write(&path, bytes).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        debug!("Persisted {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
