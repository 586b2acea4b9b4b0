//! Mutable access-token getter slot shared with the HTTP client.

use std::sync::{Arc, RwLock};

/// No-arg function returning the current access token, if any.
pub type TokenGetter = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// A single mutable slot holding the current token getter.
///
/// The session manager is the only writer: it installs a fresh getter every
/// time the access token changes and clears the slot on teardown. The HTTP
/// client reads the slot lazily, once per outgoing request; an empty slot
/// means requests go out unauthenticated.
#[derive(Default)]
pub struct TokenProviderBridge {
    getter: RwLock<Option<TokenGetter>>,
}

impl TokenProviderBridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new token getter, replacing any previous one.
    pub fn install(&self, getter: TokenGetter) {
        let mut slot = self.getter.write().unwrap();
        *slot = Some(getter);
    }

    /// Clear the slot; subsequent reads yield no token.
    pub fn clear(&self) {
        let mut slot = self.getter.write().unwrap();
        *slot = None;
    }

    /// Invoke the current getter, if one is installed.
    pub fn current_token(&self) -> Option<String> {
        let slot = self.getter.read().unwrap();
        slot.as_ref().and_then(|getter| getter())
    }
}
