//! Authentication state and its pure transitions.

use crate::auth::{SessionToken, User};

/// Coarse phase of the authentication state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    /// No session, no error.
    Unauthenticated,
    /// A login request is outstanding.
    Authenticating,
    /// A user and token are held.
    Authenticated,
    /// No session, and the last login failed.
    Failed,
}

/// Something that happened to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthEvent {
    /// A login request was sent.
    LoginStarted,
    /// The login request succeeded.
    LoginSucceeded {
        /// The authenticated principal.
        user: User,
        /// The issued token.
        token: SessionToken,
    },
    /// The login request failed.
    LoginFailed {
        /// Message to show the user.
        message: String,
    },
    /// The user logged out.
    LoggedOut,
    /// A persisted session was found.
    SessionRestored {
        /// The persisted principal.
        user: User,
        /// The persisted token.
        token: SessionToken,
    },
    /// No usable persisted session was found.
    SessionMissing,
    /// The caller dismissed the last error.
    ErrorCleared,
}

/// In-memory authentication state.
///
/// `is_authenticated` holds exactly when both `user` and `token` are set.
/// Transitions go through [`AuthState::apply`], which is pure.
///
/// # Example
///
/// ```rust
/// use wa_console::store::{AuthEvent, AuthPhase, AuthState};
///
/// let state = AuthState::default().apply(AuthEvent::LoginStarted);
/// assert_eq!(state.phase(), AuthPhase::Authenticating);
///
/// let state = state.apply(AuthEvent::LoginFailed { message: "Login failed".into() });
/// assert_eq!(state.phase(), AuthPhase::Failed);
/// assert_eq!(state.error.as_deref(), Some("Login failed"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// The authenticated principal.
    pub user: Option<User>,
    /// The session token.
    pub token: Option<SessionToken>,
    /// Whether a session is held.
    pub is_authenticated: bool,
    /// Whether a login request is outstanding.
    pub is_loading: bool,
    /// Message from the last failed login.
    pub error: Option<String>,
}

impl AuthState {
    /// Returns the state after `event`.
    #[must_use]
    pub fn apply(self, event: AuthEvent) -> Self {
        match event {
            AuthEvent::LoginStarted => Self {
                is_loading: true,
                error: None,
                ..self
            },
            AuthEvent::LoginSucceeded { user, token } => Self {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
                is_loading: false,
                error: None,
            },
            AuthEvent::LoginFailed { message } => Self {
                user: None,
                token: None,
                is_authenticated: false,
                is_loading: false,
                error: Some(message),
            },
            // A logout during a pending login leaves is_loading to the login
            AuthEvent::LoggedOut => Self {
                user: None,
                token: None,
                is_authenticated: false,
                error: None,
                ..self
            },
            AuthEvent::SessionRestored { user, token } => Self {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
                ..self
            },
            AuthEvent::SessionMissing => Self {
                user: None,
                token: None,
                is_authenticated: false,
                ..self
            },
            AuthEvent::ErrorCleared => Self { error: None, ..self },
        }
    }

    /// Returns the coarse phase of this state.
    #[must_use]
    pub const fn phase(&self) -> AuthPhase {
        if self.is_loading {
            AuthPhase::Authenticating
        } else if self.is_authenticated {
            AuthPhase::Authenticated
        } else if self.error.is_some() {
            AuthPhase::Failed
        } else {
            AuthPhase::Unauthenticated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> User {
        User::from_value(json!({"id": 1, "name": "A"})).unwrap()
    }

    fn token() -> SessionToken {
        SessionToken::new("tok123").unwrap()
    }

    fn authenticated() -> AuthState {
        AuthState::default().apply(AuthEvent::LoginSucceeded {
            user: user(),
            token: token(),
        })
    }

    fn assert_invariant(state: &AuthState) {
        assert_eq!(
            state.is_authenticated,
            state.user.is_some() && state.token.is_some(),
            "is_authenticated out of sync in {state:?}"
        );
    }

    #[test]
    fn test_default_is_unauthenticated() {
        let state = AuthState::default();
        assert_eq!(state.phase(), AuthPhase::Unauthenticated);
        assert_invariant(&state);
    }

    #[test]
    fn test_login_started_clears_error_and_keeps_session() {
        let failed = AuthState::default().apply(AuthEvent::LoginFailed {
            message: "bad".to_string(),
        });
        let state = failed.apply(AuthEvent::LoginStarted);
        assert!(state.is_loading);
        assert!(state.error.is_none());

        let state = authenticated().apply(AuthEvent::LoginStarted);
        assert!(state.is_authenticated);
        assert_eq!(state.phase(), AuthPhase::Authenticating);
        assert_invariant(&state);
    }

    #[test]
    fn test_login_succeeded_sets_session() {
        let state = AuthState::default()
            .apply(AuthEvent::LoginStarted)
            .apply(AuthEvent::LoginSucceeded {
                user: user(),
                token: token(),
            });

        assert_eq!(state.user, Some(user()));
        assert_eq!(state.token, Some(token()));
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.phase(), AuthPhase::Authenticated);
    }

    #[test]
    fn test_login_failed_drops_session() {
        let state = authenticated()
            .apply(AuthEvent::LoginStarted)
            .apply(AuthEvent::LoginFailed {
                message: "Invalid credentials".to_string(),
            });

        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert!(!state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(state.phase(), AuthPhase::Failed);
    }

    #[test]
    fn test_logged_out_resets_but_keeps_loading_flag() {
        let state = authenticated().apply(AuthEvent::LoggedOut);
        assert_eq!(state, AuthState::default());

        let pending = AuthState::default()
            .apply(AuthEvent::LoginStarted)
            .apply(AuthEvent::LoggedOut);
        assert!(pending.is_loading);
        assert!(!pending.is_authenticated);
    }

    #[test]
    fn test_session_restored_leaves_loading_and_error_alone() {
        let failed = AuthState::default().apply(AuthEvent::LoginFailed {
            message: "stale".to_string(),
        });
        let state = failed.apply(AuthEvent::SessionRestored {
            user: user(),
            token: token(),
        });

        assert!(state.is_authenticated);
        assert_eq!(state.error.as_deref(), Some("stale"));
        assert_invariant(&state);
    }

    #[test]
    fn test_session_missing_clears_stale_session() {
        let state = authenticated().apply(AuthEvent::SessionMissing);
        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert!(!state.is_authenticated);
        assert_invariant(&state);
    }

    #[test]
    fn test_error_cleared_touches_only_error() {
        let failed = AuthState::default().apply(AuthEvent::LoginFailed {
            message: "bad".to_string(),
        });
        let state = failed.apply(AuthEvent::ErrorCleared);
        assert_eq!(state, AuthState::default());

        let state = authenticated().apply(AuthEvent::ErrorCleared);
        assert_eq!(state, authenticated());
    }
}
