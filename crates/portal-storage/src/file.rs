//! JSON-file storage backend.

use crate::{KeyValueStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key/value storage persisted as a single JSON object on disk.
///
/// The file is read once at open and kept in memory; every mutation is
/// written through. A missing, unreadable, or corrupt file is treated as
/// empty rather than an error.
pub struct FileStorage {
    path: PathBuf,
    data: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open (or create) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the parent directory cannot be created or is
    /// not writable; callers are expected to fall back to in-memory storage.
    pub fn open(path: PathBuf) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Corrupt session file, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        let storage = Self {
            path,
            data: Mutex::new(data),
        };

        // Probe writability up front; open errors trigger the memory fallback.
        {
            let data = storage.data.lock().unwrap();
            storage.flush(&data)?;
        }

        Ok(storage)
    }

    /// Write the current map to disk.
    fn flush(&self, data: &HashMap<String, String>) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(data)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut data = self.data.lock().unwrap();
        data.insert(key.to_string(), value.to_string());
        self.flush(&data)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self.data.lock().unwrap();
        Ok(data.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let mut data = self.data.lock().unwrap();
        let existed = data.remove(key).is_some();
        if existed {
            self.flush(&data)?;
        }
        Ok(existed)
    }
}
