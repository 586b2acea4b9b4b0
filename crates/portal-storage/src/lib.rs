//! Token and profile persistence for the portal client.
//!
//! This crate provides the durable key/value store behind the session
//! manager: three independent slots (access token, refresh token, serialized
//! user profile), a JSON-file backend for normal use, and an in-memory
//! fallback so the rest of the system behaves identically when durable
//! storage is unavailable (tokens simply do not survive a restart).

mod file;
mod keys;
mod memory;
mod token_store;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use token_store::TokenStore;
pub use traits::KeyValueStorage;

use portal_config::Paths;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend could not be created or written
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Open the token store backed by the session file under `paths`.
///
/// Falls back to a process-lifetime in-memory store when the file backend
/// cannot be created; the caller sees the same API either way and never an
/// error.
pub fn open_store(paths: &Paths) -> TokenStore {
    match FileStorage::open(paths.session_file()) {
        Ok(storage) => TokenStore::new(Box::new(storage)),
        Err(e) => {
            tracing::warn!(error = %e, "Durable storage unavailable, using in-memory store");
            TokenStore::new(Box::new(MemoryStorage::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_store_with_writable_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_base_dir(tmp.path().to_path_buf());

        let store = open_store(&paths);
        store.set_access_token(Some("tok")).unwrap();
        assert_eq!(store.access_token(), Some("tok".to_string()));
    }

    #[test]
    fn test_open_store_falls_back_to_memory() {
        // A path under a regular file cannot be created as a directory.
        let tmp = tempfile::TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let paths = Paths::with_base_dir(blocker.join("nested"));

        let store = open_store(&paths);
        store.set_access_token(Some("tok")).unwrap();
        assert_eq!(store.access_token(), Some("tok".to_string()));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let tmp = tempfile::TempDir::new().unwrap();
        let base = PathBuf::from(tmp.path());

        {
            let paths = Paths::with_base_dir(base.clone());
            let store = open_store(&paths);
            store.set_access_token(Some("persisted")).unwrap();
        }

        let paths = Paths::with_base_dir(base);
        let store = open_store(&paths);
        assert_eq!(store.access_token(), Some("persisted".to_string()));
    }
}
