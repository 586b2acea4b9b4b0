//! CLI command implementations.

pub mod auth;

use portal_api::{ApiClient, TokenProviderBridge};
use portal_config::{Config, Paths};
use portal_session::{HttpAuthApi, SessionService};
use std::sync::Arc;

/// Wire up the session service: token store, bridge, HTTP client, bindings.
pub fn build_session(config: &Config, paths: &Paths) -> Arc<SessionService> {
    let store = portal_storage::open_store(paths);
    let bridge = Arc::new(TokenProviderBridge::new());
    let api = ApiClient::new(config.api_url(), bridge.clone());
    let auth_api = Arc::new(HttpAuthApi::new(api));

    Arc::new(SessionService::new(auth_api, store, bridge))
}
