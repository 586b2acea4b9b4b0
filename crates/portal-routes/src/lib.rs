//! Route table and navigation guards for the portal client.
//!
//! Guards are pure functions of the current `AuthState` plus static per-route
//! configuration; they produce allow/redirect decisions and have no side
//! effects. The routing layer consumes the decisions declaratively.

mod guards;
mod routes;

pub use guards::{home_redirect, public_only, require_auth, GuardDecision, RoutePolicy};
pub use routes::{home_route_for_role, problem_route, Routes};
