//! Storage key constants.

/// Storage keys used by the portal client
pub struct StorageKeys;

impl StorageKeys {
    /// Access token (short-lived bearer credential)
    pub const ACCESS_TOKEN: &'static str = "portal.auth.accessToken";

    /// Refresh token (longer-lived credential)
    pub const REFRESH_TOKEN: &'static str = "portal.auth.refreshToken";

    /// Serialized user profile (JSON)
    pub const USER: &'static str = "portal.auth.user";
}
