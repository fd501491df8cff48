use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::{KeyValueBackend, StorageError};

/// Key-value store kept as a single JSON object document on disk.
///
/// Every operation reads the document fresh, so a failure on one call does
/// not poison later calls. Writes go to a temp file that is renamed over the
/// document, so a crash mid-write leaves the previous document intact.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Maximum document size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// The file does not need to exist yet; it is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(StorageError::TooLarge(format!(
                    "{} is {} bytes (max {} bytes)",
                    self.path.display(),
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(values)?;
        let temp_path = self.path.with_extension(format!("tmp.{}", std::process::id()));

        let result = (|| {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            std::fs::rename(&temp_path, &self.path)
        })();

        if result.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }
        Ok(result?)
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt document is reported rather than overwritten, which would
        // silently drop the other slots.
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.store(&values)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
