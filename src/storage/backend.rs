//! Durable key-value hosts for the session adapter.
//!
//! A [`StorageBackend`] plays the role browser-local storage and the cookie
//! jar play in a web page: string slots keyed by name, plus cookies with an
//! expiry. [`MemoryBackend`] keeps everything in process;
//! [`FileBackend`](super::FileBackend) persists it to disk.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cookie::SessionCookie;
use super::error::StorageError;

/// A durable key-value store with a cookie jar.
pub trait StorageBackend: Send + Sync {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Sets a cookie. An expired cookie removes any cookie of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn set_cookie(&self, cookie: &SessionCookie) -> Result<(), StorageError>;

    /// Returns the value of a live cookie, or `None` if it is missing or expired.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn cookie(&self, name: &str) -> Result<Option<String>, StorageError>;
}

/// A cookie as held in a jar: its value and when it stops being sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    /// Cookie value, percent-encoded as it appears in the cookie string.
    pub value: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl StoredCookie {
    /// Returns `true` if the cookie is still live at `now`.
    #[must_use]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// The full contents of a backend: storage slots and cookie jar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StorageDocument {
    #[serde(default)]
    pub(crate) items: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) cookies: BTreeMap<String, StoredCookie>,
}

impl StorageDocument {
    pub(crate) fn apply_cookie(&mut self, cookie: &SessionCookie, now: DateTime<Utc>) {
        if cookie.is_expired() {
            self.cookies.remove(&cookie.name);
            return;
        }
        self.cookies.insert(
            cookie.name.clone(),
            StoredCookie {
                value: cookie.encoded_value(),
                expires_at: now + cookie.max_age,
            },
        );
    }

    pub(crate) fn live_cookie(&self, name: &str, now: DateTime<Utc>) -> Option<String> {
        self.cookies
            .get(name)
            .filter(|cookie| cookie.is_live_at(now))
            .map(|cookie| cookie.value.clone())
    }
}

/// An in-process backend.
///
/// Contents live as long as the value does. Useful for tests and for hosts
/// that only need the session for the lifetime of the process.
///
/// # Example
///
/// ```rust
/// use wa_console::storage::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::new();
/// backend.set_item("k", "v").unwrap();
/// assert_eq!(backend.get_item("k").unwrap(), Some("v".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    document: RwLock<StorageDocument>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable {
            reason: "memory storage lock poisoned".to_string(),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let document = self.document.read().map_err(|_| Self::poisoned())?;
        Ok(document.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut document = self.document.write().map_err(|_| Self::poisoned())?;
        document.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut document = self.document.write().map_err(|_| Self::poisoned())?;
        document.items.remove(key);
        Ok(())
    }

    fn set_cookie(&self, cookie: &SessionCookie) -> Result<(), StorageError> {
        let mut document = self.document.write().map_err(|_| Self::poisoned())?;
        document.apply_cookie(cookie, Utc::now());
        Ok(())
    }

    fn cookie(&self, name: &str) -> Result<Option<String>, StorageError> {
        let document = self.document.read().map_err(|_| Self::poisoned())?;
        Ok(document.live_cookie(name, Utc::now()))
    }
}
