//! The session state machine.
//!
//! `SessionService` owns the in-memory `AuthState` and is its only writer.
//! Every mutating operation follows the same fixed order:
//! clear error → loading → (success: commit + authenticated) |
//! (failure: unauthenticated + error). Commits write the token store and the
//! in-memory state together, and re-install the token provider bridge getter
//! so outbound requests always see the freshest access token.

use crate::auth_api::{
    AuthApi, AuthSuccess, GuestLoginRequest, LoginRequest, LogoutRequest, RefreshRequest,
    RegisterProfile,
};
use crate::error::{SessionError, SessionResult};
use crate::state::AuthState;
use crate::status_fsm::{AuthStatus, StatusInput, StatusMachine};
use crate::user::{AuthUser, Role};
use portal_api::{ApiError, TokenProviderBridge};
use portal_storage::TokenStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, warn};

/// Orchestrates bootstrap, login/registration/guest flows, refresh, and
/// logout over the token store and the remote authentication API.
///
/// Mutating operations are serialized through an internal async lock:
/// concurrent callers queue rather than interleave, so a slow operation can
/// never be overwritten by a stale response from another.
pub struct SessionService {
    auth_api: Arc<dyn AuthApi>,
    store: TokenStore,
    tokens: Arc<TokenProviderBridge>,
    state: RwLock<AuthState>,
    /// Internal FSM for the session status.
    status: Mutex<StatusMachine>,
    /// Serializes mutating operations, bootstrap included.
    op_lock: tokio::sync::Mutex<()>,
    /// One-shot latch: bootstrap runs at most once per process.
    bootstrapped: AtomicBool,
    /// Set by `shutdown`; an in-flight bootstrap refresh discards its result.
    cancelled: AtomicBool,
}

impl SessionService {
    /// Create a new session service.
    ///
    /// The bridge is seeded with an empty getter so the HTTP client can read
    /// it from the very first request.
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        store: TokenStore,
        tokens: Arc<TokenProviderBridge>,
    ) -> Self {
        let service = Self {
            auth_api,
            store,
            tokens,
            state: RwLock::new(AuthState::default()),
            status: Mutex::new(StatusMachine::new()),
            op_lock: tokio::sync::Mutex::new(()),
            bootstrapped: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
        };
        service.sync_bridge(None);
        service
    }

    /// A snapshot of the current session state.
    pub fn snapshot(&self) -> AuthState {
        self.state.read().unwrap().clone()
    }

    /// Current session status.
    pub fn status(&self) -> AuthStatus {
        self.state.read().unwrap().status
    }

    /// The underlying token store.
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Tear down the service: an unresolved bootstrap refresh is discarded
    /// and the bridge slot is cleared so no dangling getter survives.
    pub fn shutdown(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.tokens.clear();
        debug!("Session service shut down");
    }

    // ==========================================
    // Bootstrap
    // ==========================================

    /// Reconstruct session state from persisted tokens.
    ///
    /// Runs at most once per process, even when invoked twice by an
    /// over-eager startup path. With a stored access token and user the
    /// session is trusted without a network call; with only a refresh token
    /// a silent refresh is attempted, and its failure clears the session
    /// without surfacing an error.
    pub async fn bootstrap(&self) -> SessionResult<()> {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            debug!("Bootstrap already ran, skipping");
            return Ok(());
        }
        let _guard = self.op_lock.lock().await;

        let stored_access = self.store.access_token();
        let stored_refresh = self.store.refresh_token();
        let stored_user: Option<AuthUser> = self.store.user();

        // Access token and user present: assume the session is valid.
        if let (Some(access), Some(user)) = (stored_access.clone(), stored_user) {
            info!(user_id = %user.id, "Restoring stored session without refresh");
            let status = self.transition(&StatusInput::SessionTrusted)?;
            {
                let mut state = self.state.write().unwrap();
                state.status = status;
                state.user = Some(user);
                state.access_token = Some(access.clone());
                state.refresh_token = stored_refresh;
                state.error = None;
            }
            self.sync_bridge(Some(access));
            return Ok(());
        }

        // Refresh token but no access token: try a silent refresh.
        if stored_access.is_none() {
            if let Some(refresh_token) = stored_refresh {
                self.begin_attempt()?;

                let result = self.auth_api.refresh(&RefreshRequest { refresh_token }).await;

                if self.cancelled.load(Ordering::SeqCst) {
                    debug!("Bootstrap cancelled, discarding refresh result");
                    return Ok(());
                }

                match result {
                    Ok(auth) => {
                        info!(user_id = %auth.user.id, "Session refreshed during bootstrap");
                        self.commit(auth)?;
                    }
                    Err(e) => {
                        warn!(error = %e, "Refresh failed during bootstrap, clearing session");
                        self.clear_session();
                    }
                }
                return Ok(());
            }
        }

        // No usable tokens.
        debug!("No stored session found");
        let status = self.transition(&StatusInput::NoSession)?;
        self.state.write().unwrap().status = status;
        Ok(())
    }

    // ==========================================
    // Mutating operations
    // ==========================================

    /// Log in with email and password.
    ///
    /// # Errors
    /// Failures populate `AuthState.error` and are also returned, so callers
    /// can show a contextual message.
    pub async fn login(&self, payload: LoginRequest) -> SessionResult<AuthUser> {
        let _guard = self.op_lock.lock().await;
        self.begin_attempt()?;

        match self.auth_api.login(&payload).await {
            Ok(auth) => self.commit(auth),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Register a student account.
    pub async fn register_student(&self, profile: RegisterProfile) -> SessionResult<AuthUser> {
        self.register(profile, Role::Student).await
    }

    /// Register a teacher account.
    pub async fn register_teacher(&self, profile: RegisterProfile) -> SessionResult<AuthUser> {
        self.register(profile, Role::Teacher).await
    }

    async fn register(&self, profile: RegisterProfile, role: Role) -> SessionResult<AuthUser> {
        let _guard = self.op_lock.lock().await;
        self.begin_attempt()?;

        let payload = profile.into_request(role);
        match self.auth_api.register(&payload).await {
            Ok(auth) => self.commit(auth),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Start a guest session.
    ///
    /// The resulting session has no refresh token and does not survive a
    /// token expiry.
    pub async fn guest_login(&self, payload: GuestLoginRequest) -> SessionResult<AuthUser> {
        let _guard = self.op_lock.lock().await;
        self.begin_attempt()?;

        match self.auth_api.guest_login(&payload).await {
            Ok(auth) => self.commit(auth),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Exchange the persisted refresh token for fresh credentials.
    ///
    /// The token is read from the store, not from in-memory state, so it
    /// reflects the latest persisted value. Without one this is a no-op
    /// returning `Ok(None)` rather than an error.
    ///
    /// # Errors
    /// A failed refresh clears the whole session (the token can no longer be
    /// trusted) and returns the failure.
    pub async fn refresh(&self) -> SessionResult<Option<AuthUser>> {
        let _guard = self.op_lock.lock().await;

        let Some(refresh_token) = self.store.refresh_token() else {
            debug!("No refresh token stored, nothing to refresh");
            return Ok(None);
        };

        self.begin_attempt()?;

        match self.auth_api.refresh(&RefreshRequest { refresh_token }).await {
            Ok(auth) => {
                info!(user_id = %auth.user.id, "Session refreshed");
                self.commit(auth).map(Some)
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, clearing session");
                Err(self.fail(e))
            }
        }
    }

    /// Sign out.
    ///
    /// The remote revoke is best-effort: a failure is logged and swallowed,
    /// and local state and storage always clear.
    pub async fn logout(&self) {
        let _guard = self.op_lock.lock().await;

        let refresh_token = self.store.refresh_token();
        if let Err(e) = self.auth_api.logout(&LogoutRequest { refresh_token }).await {
            warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }

        self.clear_session();
        info!("Signed out");
    }

    // ==========================================
    // Internal transitions
    // ==========================================

    /// Feed the status machine and return the resulting public status.
    fn transition(&self, input: &StatusInput) -> SessionResult<AuthStatus> {
        let mut machine = self.status.lock().unwrap();
        let old_status = AuthStatus::from(machine.state());

        machine.consume(input).map_err(|_| {
            SessionError::State(format!(
                "Cannot apply {:?} in state {:?}",
                input,
                machine.state()
            ))
        })?;

        let new_status = AuthStatus::from(machine.state());
        drop(machine);

        if old_status != new_status {
            debug!(old_status = ?old_status, new_status = ?new_status, "Session status transition");
        }

        Ok(new_status)
    }

    /// Start an attempt: clear the error field and enter `loading`.
    fn begin_attempt(&self) -> SessionResult<()> {
        let status = self.transition(&StatusInput::OperationStarted)?;
        let mut state = self.state.write().unwrap();
        state.error = None;
        state.status = status;
        Ok(())
    }

    /// Commit a successful authentication to storage, memory, and the bridge.
    fn commit(&self, auth: AuthSuccess) -> SessionResult<AuthUser> {
        if let Err(e) = self.persist(&auth) {
            warn!(error = %e, "Failed to persist session, treating attempt as failed");
            return Err(self.fail_with(SessionError::Storage(e)));
        }

        let status = self.transition(&StatusInput::CommitSucceeded)?;
        {
            let mut state = self.state.write().unwrap();
            state.status = status;
            state.user = Some(auth.user.clone());
            state.access_token = Some(auth.access_token.clone());
            state.refresh_token = auth.refresh_token.clone();
            state.error = None;
        }
        self.sync_bridge(Some(auth.access_token));

        Ok(auth.user)
    }

    /// Write all three storage slots for a successful authentication.
    fn persist(&self, auth: &AuthSuccess) -> Result<(), portal_storage::StorageError> {
        self.store.set_access_token(Some(&auth.access_token))?;
        self.store.set_refresh_token(auth.refresh_token.as_deref())?;
        self.store.set_user(Some(&auth.user))
    }

    /// Record a failed attempt: storage cleared, `unauthenticated`, error set.
    fn fail(&self, error: ApiError) -> SessionError {
        self.fail_with(SessionError::Api(error))
    }

    fn fail_with(&self, error: SessionError) -> SessionError {
        if let Err(e) = self.store.clear_all() {
            warn!(error = %e, "Failed to clear storage after failed attempt");
        }

        match self.transition(&StatusInput::AttemptFailed) {
            Ok(status) => {
                let mut state = self.state.write().unwrap();
                state.status = status;
                state.user = None;
                state.access_token = None;
                state.refresh_token = None;
                state.error = Some(error.message());
            }
            Err(e) => warn!(error = %e, "Status machine rejected failure transition"),
        }

        self.sync_bridge(None);
        error
    }

    /// Clear storage and memory without recording an error.
    fn clear_session(&self) {
        if let Err(e) = self.store.clear_all() {
            warn!(error = %e, "Failed to clear storage, clearing in-memory state anyway");
        }

        match self.transition(&StatusInput::SessionCleared) {
            Ok(status) => {
                let mut state = self.state.write().unwrap();
                state.status = status;
                state.user = None;
                state.access_token = None;
                state.refresh_token = None;
                state.error = None;
            }
            Err(e) => warn!(error = %e, "Status machine rejected clear transition"),
        }

        self.sync_bridge(None);
    }

    /// Re-install the bridge getter for the current access token.
    fn sync_bridge(&self, token: Option<String>) {
        self.tokens.install(Arc::new(move || token.clone()));
    }
}
