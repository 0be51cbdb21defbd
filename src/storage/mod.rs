//! Session storage adapter.
//!
//! The adapter is the only component that touches persistent session state.
//! It keeps the token and user record in keyed durable slots and mirrors the
//! token into a short-lived cookie for server-side route guards.
//!
//! # Overview
//!
//! - [`SessionStorage`]: the capability the store and HTTP client depend on
//! - [`DurableSessionStorage`]: the real adapter over a [`StorageBackend`]
//! - [`NoopSessionStorage`]: for contexts with no durable storage at all
//! - [`MemoryBackend`] / [`FileBackend`]: durable hosts
//! - [`SessionCookie`]: the cookie written on login and expired on logout
//!
//! Storage failures never reach callers. Reads degrade to `None`, writes to
//! nothing, and both are logged.
//!
//! # Example
//!
//! ```rust
//! use wa_console::storage::{DurableSessionStorage, SessionStorage};
//! use wa_console::{SessionToken, User};
//!
//! let storage = DurableSessionStorage::in_memory();
//! let token = SessionToken::new("tok123").unwrap();
//! let user: User = serde_json::from_str(r#"{"id":1,"name":"A"}"#).unwrap();
//!
//! storage.write_session(&token, &user);
//! assert_eq!(storage.read_token(), Some(token));
//! assert_eq!(storage.read_user(), Some(user));
//!
//! storage.clear_session();
//! assert!(!storage.is_authenticated());
//! ```

mod backend;
mod cookie;
mod error;
mod file;

pub use backend::{MemoryBackend, StorageBackend, StoredCookie};
pub use cookie::{SameSite, SessionCookie};
pub use error::StorageError;
pub use file::FileBackend;

use chrono::Duration;

use crate::auth::{SessionToken, User};
use crate::config::{ConsoleConfig, StorageKeys, DEFAULT_COOKIE_MAX_AGE_SECS};

/// Persistent home of the session token and user record.
///
/// Implementations never fail: anything that goes wrong reads as "absent".
pub trait SessionStorage: Send + Sync {
    /// Returns the stored token, if present and non-empty.
    fn read_token(&self) -> Option<SessionToken>;

    /// Returns the stored user record, if present and well-formed.
    fn read_user(&self) -> Option<User>;

    /// Persists a freshly issued session.
    fn write_session(&self, token: &SessionToken, user: &User);

    /// Removes every trace of the session. Safe to call repeatedly.
    fn clear_session(&self);

    /// Returns `true` if a token is stored.
    fn is_authenticated(&self) -> bool {
        self.read_token().is_some()
    }
}

/// Storage for contexts that have no durable storage (e.g. server-side
/// rendering). Every read is absent and every write is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSessionStorage;

impl SessionStorage for NoopSessionStorage {
    fn read_token(&self) -> Option<SessionToken> {
        None
    }

    fn read_user(&self) -> Option<User> {
        None
    }

    fn write_session(&self, _token: &SessionToken, _user: &User) {}

    fn clear_session(&self) {}
}

/// The session adapter over a durable [`StorageBackend`].
#[derive(Debug)]
pub struct DurableSessionStorage<B> {
    backend: B,
    keys: StorageKeys,
    cookie_max_age: Duration,
}

impl DurableSessionStorage<MemoryBackend> {
    /// Creates an adapter over a fresh [`MemoryBackend`] with default keys.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_keys(
            MemoryBackend::new(),
            StorageKeys::default(),
            Duration::seconds(DEFAULT_COOKIE_MAX_AGE_SECS),
        )
    }
}

impl<B: StorageBackend> DurableSessionStorage<B> {
    /// Creates an adapter using the keys and cookie lifetime from `config`.
    #[must_use]
    pub fn new(backend: B, config: &ConsoleConfig) -> Self {
        Self::with_keys(
            backend,
            config.storage_keys().clone(),
            config.cookie_max_age(),
        )
    }

    /// Creates an adapter with explicit keys and cookie lifetime.
    #[must_use]
    pub const fn with_keys(backend: B, keys: StorageKeys, cookie_max_age: Duration) -> Self {
        Self {
            backend,
            keys,
            cookie_max_age,
        }
    }

    /// Returns the underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the slot names in use.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Returns the live session cookie value, percent-encoded as a route
    /// guard would see it.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.backend
            .cookie(self.keys.token())
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read session cookie");
                None
            })
    }

    fn read_slot(&self, key: &str) -> Option<String> {
        match self.backend.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read session storage slot");
                None
            }
        }
    }

    fn try_write(&self, token: &SessionToken, user: &User) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;
        self.backend.set_item(self.keys.token(), token.as_ref())?;
        self.backend.set_item(self.keys.user(), &user_json)?;
        self.backend.set_cookie(&SessionCookie::issue(
            self.keys.token(),
            token.as_ref(),
            self.cookie_max_age,
        ))
    }

    fn try_clear(&self) -> Result<(), StorageError> {
        self.backend.remove_item(self.keys.token())?;
        self.backend.remove_item(self.keys.user())?;
        self.backend.remove_item(self.keys.refresh_token())?;
        self.backend
            .set_cookie(&SessionCookie::expire(self.keys.token()))
    }
}

impl<B: StorageBackend> SessionStorage for DurableSessionStorage<B> {
    fn read_token(&self) -> Option<SessionToken> {
        self.read_slot(self.keys.token()).and_then(SessionToken::new)
    }

    fn read_user(&self) -> Option<User> {
        let text = self.read_slot(self.keys.user())?;
        match serde_json::from_str::<User>(&text) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "Stored user record is not a JSON object");
                None
            }
        }
    }

    fn write_session(&self, token: &SessionToken, user: &User) {
        match self.try_write(token, user) {
            Ok(()) => tracing::debug!("Session written to durable storage"),
            Err(e) => tracing::warn!(error = %e, "Failed to persist session"),
        }
    }

    fn clear_session(&self) {
        match self.try_clear() {
            Ok(()) => tracing::debug!("Session cleared from durable storage"),
            Err(e) => tracing::warn!(error = %e, "Failed to clear session"),
        }
    }
}

// Verify storage types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NoopSessionStorage>();
    assert_send_sync::<DurableSessionStorage<MemoryBackend>>();
    assert_send_sync::<DurableSessionStorage<FileBackend>>();
};
