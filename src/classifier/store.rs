//! Persistence port for the training dataset
//!
//! The classifier only sees `DatasetStore`. Two backends ship here: a JSON
//! file written atomically next to its final location, and an in-memory
//! blob used by tests and throwaway sessions.

use crate::classifier::dataset::Dataset;
use parking_lot::Mutex as ParkingMutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Key the dataset blob is stored under
pub const DATASET_KEY: &str = "gesture_knn_dataset";

/// Errors raised by dataset storage backends
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to replace dataset file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Load/save seam between the classifier and its storage
pub trait DatasetStore {
    /// Read the stored dataset. `Ok(None)` means nothing was stored yet.
    fn load(&self) -> StoreResult<Option<Dataset>>;

    /// Replace the stored dataset
    fn save(&self, dataset: &Dataset) -> StoreResult<()>;
}

impl<T: DatasetStore + ?Sized> DatasetStore for Box<T> {
    fn load(&self) -> StoreResult<Option<Dataset>> {
        (**self).load()
    }

    fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        (**self).save(dataset)
    }
}

/// Dataset stored as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, DATASET_KEY)
    }

    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetStore for JsonFileStore {
    fn load(&self) -> StoreResult<Option<Dataset>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let dataset = serde_json::from_str(&content)?;
        Ok(Some(dataset))
    }

    fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let data = serde_json::to_vec(dataset)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&data)?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

/// Dataset kept as a serialized blob in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: ParkingMutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored content, valid or not
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: ParkingMutex::new(Some(blob.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.lock().clone()
    }
}

impl DatasetStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Dataset>> {
        match self.blob.lock().as_deref() {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        let blob = serde_json::to_string(dataset)?;
        *self.blob.lock() = Some(blob);
        Ok(())
    }
}
