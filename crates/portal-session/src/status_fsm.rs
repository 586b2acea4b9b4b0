//! Session status state machine using rust-fsm.
//!
//! The status drives loading/redirect behavior everywhere else in the app,
//! so its transitions are declared explicitly instead of being scattered
//! across ad-hoc field writes.
//!
//! ## State Diagram
//!
//! ```text
//!                  ┌──────────┐
//!                  │   Idle   │ (initial; never re-entered)
//!                  └────┬─────┘
//!   SessionTrusted      │ OperationStarted      NoSession
//!  ┌────────────────────┼───────────────────────────────┐
//!  │                    ▼                               │
//!  │              ┌──────────┐  AttemptFailed /         │
//!  │              │ Loading  │  SessionCleared          │
//!  │              └────┬─────┘ ───────────────────┐     │
//!  │   CommitSucceeded │                          ▼     ▼
//!  │                   ▼                  ┌─────────────────┐
//!  │           ┌───────────────┐          │ Unauthenticated │
//!  └──────────►│ Authenticated │          └───────┬─────────┘
//!              └───────┬───────┘                  │
//!                      │ OperationStarted ──► Loading
//!                      │ SessionCleared ──► Unauthenticated
//!                      ▼
//! ```
//!
//! `Authenticated ⇄ Loading ⇄ Unauthenticated` remain reachable repeatedly
//! for the rest of the session.

use rust_fsm::*;
use serde::{Deserialize, Serialize};

// Generates a module `session_status` with State, Input, and StateMachine.
state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub session_status(Idle)

    Idle => {
        OperationStarted => Loading,
        SessionTrusted => Authenticated,
        NoSession => Unauthenticated,
        SessionCleared => Unauthenticated
    },
    Loading => {
        CommitSucceeded => Authenticated,
        AttemptFailed => Unauthenticated,
        SessionCleared => Unauthenticated
    },
    Authenticated => {
        OperationStarted => Loading,
        SessionCleared => Unauthenticated
    },
    Unauthenticated => {
        OperationStarted => Loading,
        SessionCleared => Unauthenticated
    }
}

// Re-export the generated types with clearer names
pub use session_status::Input as StatusInput;
pub use session_status::State as MachineStatus;
pub use session_status::StateMachine as StatusMachine;

/// Session status as read by guards and pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// Pre-bootstrap; nothing known yet.
    Idle,
    /// A mutating operation (or bootstrap refresh) is in flight.
    Loading,
    /// Valid session with a user and access token.
    Authenticated,
    /// No session.
    Unauthenticated,
}

impl AuthStatus {
    /// Returns true for the `Authenticated` state only.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated)
    }

    /// Returns true while the session outcome is not yet known.
    pub fn is_pending(&self) -> bool {
        matches!(self, AuthStatus::Idle | AuthStatus::Loading)
    }
}

impl From<&MachineStatus> for AuthStatus {
    fn from(state: &MachineStatus) -> Self {
        match state {
            MachineStatus::Idle => AuthStatus::Idle,
            MachineStatus::Loading => AuthStatus::Loading,
            MachineStatus::Authenticated => AuthStatus::Authenticated,
            MachineStatus::Unauthenticated => AuthStatus::Unauthenticated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let machine = StatusMachine::new();
        assert_eq!(*machine.state(), MachineStatus::Idle);
    }

    #[test]
    fn test_login_flow() {
        let mut machine = StatusMachine::new();

        machine.consume(&StatusInput::OperationStarted).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Loading);

        machine.consume(&StatusInput::CommitSucceeded).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Authenticated);
    }

    #[test]
    fn test_failed_attempt_lands_unauthenticated() {
        let mut machine = StatusMachine::new();

        machine.consume(&StatusInput::OperationStarted).unwrap();
        machine.consume(&StatusInput::AttemptFailed).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Unauthenticated);
    }

    #[test]
    fn test_bootstrap_trust_skips_loading() {
        let mut machine = StatusMachine::new();

        machine.consume(&StatusInput::SessionTrusted).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Authenticated);
    }

    #[test]
    fn test_bootstrap_without_tokens_skips_loading() {
        let mut machine = StatusMachine::new();

        machine.consume(&StatusInput::NoSession).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Unauthenticated);
    }

    #[test]
    fn test_session_repeatedly_crosses_loading() {
        let mut machine = StatusMachine::new();

        // unauthenticated → login → authenticated → re-auth → authenticated
        machine.consume(&StatusInput::NoSession).unwrap();
        machine.consume(&StatusInput::OperationStarted).unwrap();
        machine.consume(&StatusInput::CommitSucceeded).unwrap();
        machine.consume(&StatusInput::OperationStarted).unwrap();
        machine.consume(&StatusInput::CommitSucceeded).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Authenticated);
    }

    #[test]
    fn test_logout_clears_from_any_settled_state() {
        let mut machine = StatusMachine::new();
        machine.consume(&StatusInput::SessionTrusted).unwrap();
        machine.consume(&StatusInput::SessionCleared).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Unauthenticated);

        // logout while already signed out stays put
        machine.consume(&StatusInput::SessionCleared).unwrap();
        assert_eq!(*machine.state(), MachineStatus::Unauthenticated);
    }

    #[test]
    fn test_idle_is_never_reentered() {
        let mut machine = StatusMachine::new();
        machine.consume(&StatusInput::NoSession).unwrap();

        // no input leads back to Idle
        assert!(machine.consume(&StatusInput::NoSession).is_err());
        assert!(machine.consume(&StatusInput::SessionTrusted).is_err());
        assert_ne!(*machine.state(), MachineStatus::Idle);
    }

    #[test]
    fn test_commit_invalid_outside_loading() {
        let mut machine = StatusMachine::new();
        assert!(machine.consume(&StatusInput::CommitSucceeded).is_err());

        machine.consume(&StatusInput::SessionTrusted).unwrap();
        assert!(machine.consume(&StatusInput::CommitSucceeded).is_err());
    }

    #[test]
    fn test_status_conversion() {
        assert_eq!(AuthStatus::from(&MachineStatus::Idle), AuthStatus::Idle);
        assert_eq!(
            AuthStatus::from(&MachineStatus::Loading),
            AuthStatus::Loading
        );
        assert_eq!(
            AuthStatus::from(&MachineStatus::Authenticated),
            AuthStatus::Authenticated
        );
        assert_eq!(
            AuthStatus::from(&MachineStatus::Unauthenticated),
            AuthStatus::Unauthenticated
        );
    }

    #[test]
    fn test_status_predicates() {
        assert!(AuthStatus::Authenticated.is_authenticated());
        assert!(!AuthStatus::Loading.is_authenticated());

        assert!(AuthStatus::Idle.is_pending());
        assert!(AuthStatus::Loading.is_pending());
        assert!(!AuthStatus::Authenticated.is_pending());
        assert!(!AuthStatus::Unauthenticated.is_pending());
    }

    #[test]
    fn test_status_wire_format_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&AuthStatus::Unauthenticated).unwrap(),
            "\"unauthenticated\""
        );
    }
}
