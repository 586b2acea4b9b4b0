//! Session management for the portal client.
//!
//! This crate provides:
//! - The remote authentication API bindings (login, register, guest login,
//!   refresh, logout)
//! - An explicit FSM for the session status
//!   (`idle → loading → authenticated | unauthenticated`)
//! - `SessionService`, the single owner of `AuthState`: it bootstraps the
//!   session from persisted tokens, drives every mutating operation, keeps
//!   the token store and the token provider bridge in sync, and is the one
//!   source of truth read by the rest of the application.

mod auth_api;
mod error;
mod session;
mod state;
mod status_fsm;
mod user;

pub use auth_api::{
    AuthApi, AuthSuccess, GuestLoginRequest, HttpAuthApi, LoginRequest, LogoutRequest,
    RefreshRequest, RegisterProfile, RegisterRequest,
};
pub use error::{SessionError, SessionResult};
pub use session::SessionService;
pub use state::AuthState;
pub use status_fsm::{session_status, AuthStatus, MachineStatus, StatusInput, StatusMachine};
pub use user::{AuthUser, Role};
