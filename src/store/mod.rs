//! The authentication store.
//!
//! [`AuthStore`] owns the in-memory [`AuthState`] and is the only way to
//! change it. It is an ordinary value: construct as many as you like, each
//! with its own collaborator and storage.
//!
//! State lives in a [`tokio::sync::watch`] channel, so UI code can either
//! take snapshots with [`AuthStore::state`] or await changes through
//! [`AuthStore::subscribe`].
//!
//! # Concurrency
//!
//! Only [`AuthStore::login`] suspends. Logins are not queued and cannot be
//! cancelled: if a `logout` runs while a login is pending, whichever settles
//! last decides the final state.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wa_console::auth::{AuthClient, LoginCredentials};
//! use wa_console::storage::{DurableSessionStorage, FileBackend};
//! use wa_console::store::AuthStore;
//!
//! let storage = Arc::new(DurableSessionStorage::new(FileBackend::new("session.json"), &config));
//! let store = AuthStore::new(AuthClient::new(&config, storage.clone()), storage);
//!
//! store.check_auth();
//! if !store.state().is_authenticated {
//!     store.login(&LoginCredentials::new("a@b.com", "secret")).await?;
//! }
//! ```

mod state;

pub use state::{AuthEvent, AuthPhase, AuthState};

use std::sync::Arc;

use tokio::sync::watch;

use crate::auth::{AuthApi, AuthError, LoginCredentials};
use crate::storage::SessionStorage;

/// Owner of the authentication state.
pub struct AuthStore<A> {
    api: A,
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<AuthState>,
}

impl<A: std::fmt::Debug> std::fmt::Debug for AuthStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("api", &self.api)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<A: AuthApi> AuthStore<A> {
    /// Creates a store in the unauthenticated state.
    ///
    /// Call [`check_auth`](Self::check_auth) to pick up a persisted session.
    #[must_use]
    pub fn new(api: A, storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            api,
            storage,
            state,
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Returns the login collaborator.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns the session storage.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    fn dispatch(&self, event: AuthEvent) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).apply(event));
    }

    /// Logs in with `credentials`.
    ///
    /// On success the session is persisted and the store becomes
    /// authenticated. On failure the store records a message in `error`,
    /// drops any session it held, and the error is returned as well.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's [`AuthError`] unchanged.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), AuthError> {
        self.dispatch(AuthEvent::LoginStarted);

        match self.api.login(credentials).await {
            Ok(session) => {
                self.storage.write_session(&session.token, &session.user);
                tracing::info!(user_id = ?session.user.id(), "Login succeeded");
                self.dispatch(AuthEvent::LoginSucceeded {
                    user: session.user,
                    token: session.token,
                });
                Ok(())
            }
            Err(e) => {
                let message = e.failure_message();
                tracing::warn!(error = %message, "Login failed");
                self.dispatch(AuthEvent::LoginFailed { message });
                Err(e)
            }
        }
    }

    /// Ends the session, in storage and in memory. Safe to call at any time.
    pub fn logout(&self) {
        self.storage.clear_session();
        self.dispatch(AuthEvent::LoggedOut);
        tracing::info!("Logged out");
    }

    /// Loads the persisted session, if both token and user are stored.
    ///
    /// The token is not re-validated against the server.
    pub fn check_auth(&self) {
        match (self.storage.read_token(), self.storage.read_user()) {
            (Some(token), Some(user)) => {
                tracing::debug!("Restored persisted session");
                self.dispatch(AuthEvent::SessionRestored { user, token });
            }
            _ => {
                tracing::debug!("No persisted session");
                self.dispatch(AuthEvent::SessionMissing);
            }
        }
    }

    /// Dismisses the last login error.
    pub fn clear_error(&self) {
        self.dispatch(AuthEvent::ErrorCleared);
    }
}
