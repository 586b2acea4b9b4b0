//! Navigation guard decision functions.

use crate::routes::{home_route_for_role, Routes};
use portal_session::{AuthState, Role};
use serde::{Deserialize, Serialize};

/// Per-route access configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// Roles allowed on the route; `None` admits every role.
    #[serde(default)]
    pub allowed_roles: Option<Vec<Role>>,
    /// Whether guest sessions may enter. Guests are allowed by default.
    #[serde(default = "default_allow_guest")]
    pub allow_guest: bool,
}

fn default_allow_guest() -> bool {
    true
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            allowed_roles: None,
            allow_guest: true,
        }
    }
}

impl RoutePolicy {
    /// Restrict the route to the given roles.
    pub fn roles(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed_roles: Some(roles.into()),
            allow_guest: true,
        }
    }

    /// Disallow guest sessions on this route.
    pub fn no_guests(mut self) -> Self {
        self.allow_guest = false;
        self
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "to")]
pub enum GuardDecision {
    /// Render the guarded content.
    Render,
    /// Session outcome not yet known; render a loading placeholder.
    Loading,
    /// Navigate elsewhere.
    Redirect(String),
}

/// Guard for routes that require an authenticated session.
///
/// While the session is idle or loading the caller shows a placeholder;
/// unauthenticated visitors (and guests on guest-restricted routes) are sent
/// to the login page; a user whose role is not admitted is sent to their own
/// home route rather than to login.
pub fn require_auth(state: &AuthState, policy: &RoutePolicy) -> GuardDecision {
    if state.is_pending() {
        return GuardDecision::Loading;
    }

    let Some(user) = state.user.as_ref().filter(|_| state.is_authenticated()) else {
        return GuardDecision::Redirect(Routes::LOGIN.to_string());
    };

    if !policy.allow_guest && user.is_guest {
        return GuardDecision::Redirect(Routes::LOGIN.to_string());
    }

    if let Some(allowed) = &policy.allowed_roles {
        if !allowed.contains(&user.role) {
            return GuardDecision::Redirect(home_route_for_role(user.role).to_string());
        }
    }

    GuardDecision::Render
}

/// Guard for routes that only make sense signed out (login, registration).
///
/// An authenticated user is sent to their home route.
pub fn public_only(state: &AuthState) -> GuardDecision {
    if state.is_pending() {
        return GuardDecision::Loading;
    }

    match state.user.as_ref().filter(|_| state.is_authenticated()) {
        Some(user) => GuardDecision::Redirect(home_route_for_role(user.role).to_string()),
        None => GuardDecision::Render,
    }
}

/// Decision for the index route: home when signed in, login otherwise.
pub fn home_redirect(state: &AuthState) -> GuardDecision {
    match state.user.as_ref().filter(|_| state.is_authenticated()) {
        Some(user) => GuardDecision::Redirect(home_route_for_role(user.role).to_string()),
        None => GuardDecision::Redirect(Routes::LOGIN.to_string()),
    }
}
