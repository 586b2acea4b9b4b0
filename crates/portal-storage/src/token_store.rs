//! High-level API over the three persisted session slots.

use crate::{KeyValueStorage, StorageKeys, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Persisted session record: access token, refresh token, and user profile.
///
/// Each slot is independently overwritable; setting a slot to `None` deletes
/// it. The profile slot is stored as JSON and parsed fail-soft: a corrupt
/// record is treated as absent, never as an error.
pub struct TokenStore {
    storage: Box<dyn KeyValueStorage>,
}

impl TokenStore {
    /// Create a token store over the given backend.
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    fn set_slot(&self, key: &str, value: Option<&str>) -> StorageResult<()> {
        match value {
            Some(value) => self.storage.set(key, value),
            None => self.storage.delete(key).map(|_| ()),
        }
    }

    /// Store or clear the access token.
    pub fn set_access_token(&self, token: Option<&str>) -> StorageResult<()> {
        self.set_slot(StorageKeys::ACCESS_TOKEN, token)
    }

    /// Retrieve the access token.
    pub fn access_token(&self) -> Option<String> {
        self.storage.get(StorageKeys::ACCESS_TOKEN).ok().flatten()
    }

    /// Store or clear the refresh token.
    pub fn set_refresh_token(&self, token: Option<&str>) -> StorageResult<()> {
        self.set_slot(StorageKeys::REFRESH_TOKEN, token)
    }

    /// Retrieve the refresh token.
    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(StorageKeys::REFRESH_TOKEN).ok().flatten()
    }

    /// Store or clear the serialized user profile.
    pub fn set_user<T: Serialize>(&self, user: Option<&T>) -> StorageResult<()> {
        match user {
            Some(user) => {
                let json = serde_json::to_string(user)
                    .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
                self.storage.set(StorageKeys::USER, &json)
            }
            None => self.storage.delete(StorageKeys::USER).map(|_| ()),
        }
    }

    /// Retrieve the stored user profile.
    ///
    /// A missing or unparseable record yields `None`; parse failures are
    /// logged and never surfaced.
    pub fn user<T: DeserializeOwned>(&self) -> Option<T> {
        let raw = self.storage.get(StorageKeys::USER).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse stored user profile, treating as absent");
                None
            }
        }
    }

    /// Clear all three slots.
    pub fn clear_all(&self) -> StorageResult<()> {
        self.set_access_token(None)?;
        self.set_refresh_token(None)?;
        self.storage.delete(StorageKeys::USER).map(|_| ())
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.access_token().is_none()
            && self.refresh_token().is_none()
            && self.storage.get(StorageKeys::USER).ok().flatten().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        id: String,
        role: String,
    }

    fn store() -> TokenStore {
        TokenStore::new(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_token_slots_roundtrip() {
        let store = store();

        store.set_access_token(Some("A")).unwrap();
        store.set_refresh_token(Some("R")).unwrap();
        assert_eq!(store.access_token(), Some("A".to_string()));
        assert_eq!(store.refresh_token(), Some("R".to_string()));

        store.set_access_token(None).unwrap();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), Some("R".to_string()));
    }

    #[test]
    fn test_user_roundtrip() {
        let store = store();
        let profile = Profile {
            id: "u1".to_string(),
            role: "student".to_string(),
        };

        store.set_user(Some(&profile)).unwrap();
        assert_eq!(store.user::<Profile>(), Some(profile));

        store.set_user::<Profile>(None).unwrap();
        assert_eq!(store.user::<Profile>(), None);
    }

    #[test]
    fn test_corrupt_user_record_is_absent() {
        let backend = MemoryStorage::new();
        backend.set(StorageKeys::USER, "{definitely not json").unwrap();
        let store = TokenStore::new(Box::new(backend));

        assert_eq!(store.user::<Profile>(), None);
    }

    #[test]
    fn test_clear_all_empties_every_slot() {
        let store = store();
        store.set_access_token(Some("A")).unwrap();
        store.set_refresh_token(Some("R")).unwrap();
        store
            .set_user(Some(&Profile {
                id: "u1".to_string(),
                role: "teacher".to_string(),
            }))
            .unwrap();
        assert!(!store.is_empty());

        store.clear_all().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_all_on_empty_store_is_ok() {
        let store = store();
        store.clear_all().unwrap();
        assert!(store.is_empty());
    }
}
