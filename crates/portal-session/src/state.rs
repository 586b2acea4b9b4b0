//! In-memory session state.

use crate::{AuthStatus, AuthUser, Role};
use serde::{Deserialize, Serialize};

/// The single in-memory session record.
///
/// Owned and mutated exclusively by `SessionService`; everything else reads
/// cloned snapshots. Invariant: `status == Authenticated` exactly when both
/// `user` and `access_token` are present, and `Unauthenticated` implies
/// `user` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<AuthUser>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Last human-readable failure message; cleared at the start of every
    /// new attempt.
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            status: AuthStatus::Idle,
            user: None,
            access_token: None,
            refresh_token: None,
            error: None,
        }
    }
}

impl AuthState {
    /// True when the session holds a valid identity.
    pub fn is_authenticated(&self) -> bool {
        self.status.is_authenticated() && self.user.is_some()
    }

    /// True while the session outcome is not yet known (idle or loading).
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Role of the current user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// True when the current user is a guest.
    pub fn is_guest(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: None,
            role: Role::Student,
            first_name: None,
            last_name: None,
            class_id: None,
            created_at: None,
            updated_at: None,
            is_guest: false,
        }
    }

    #[test]
    fn test_default_state_is_idle_and_empty() {
        let state = AuthState::default();
        assert_eq!(state.status, AuthStatus::Idle);
        assert!(state.user.is_none());
        assert!(state.access_token.is_none());
        assert!(state.refresh_token.is_none());
        assert!(state.error.is_none());
        assert!(state.is_pending());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_authenticated_requires_user() {
        let state = AuthState {
            status: AuthStatus::Authenticated,
            user: None,
            access_token: Some("A".to_string()),
            refresh_token: None,
            error: None,
        };
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_role_and_guest_accessors() {
        let mut state = AuthState {
            status: AuthStatus::Authenticated,
            user: Some(student()),
            access_token: Some("A".to_string()),
            refresh_token: None,
            error: None,
        };
        assert_eq!(state.role(), Some(Role::Student));
        assert!(!state.is_guest());

        state.user.as_mut().unwrap().is_guest = true;
        assert!(state.is_guest());
    }
}
