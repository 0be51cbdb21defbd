//! Configuration types for the console client.
//!
//! # Overview
//!
//! - [`ConsoleConfig`]: The main configuration struct holding all client settings
//! - [`ConsoleConfigBuilder`]: A builder for constructing [`ConsoleConfig`] instances
//! - [`ApiBaseUrl`]: A validated base URL for the remote API
//! - [`StorageKeys`]: Names of the durable session storage slots
//!
//! # Example
//!
//! ```rust
//! use wa_console::{ApiBaseUrl, ConsoleConfig};
//!
//! let config = ConsoleConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("https://api.example.com/v1").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.login_path(), "auth/login");
//! ```

mod newtypes;

pub use newtypes::{ApiBaseUrl, StorageKeys};

use crate::error::ConfigError;
use chrono::Duration;

/// Default login endpoint, relative to the API base URL.
pub const DEFAULT_LOGIN_PATH: &str = "auth/login";

/// Default lifetime of the session cookie in seconds (24 hours).
pub const DEFAULT_COOKIE_MAX_AGE_SECS: i64 = 86_400;

/// Configuration for the console client.
///
/// `ConsoleConfig` is `Clone`, `Send`, and `Sync`, so a single instance can be
/// shared by the HTTP client, the login collaborator and the storage adapter.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    api_base_url: ApiBaseUrl,
    storage_keys: StorageKeys,
    cookie_max_age: Duration,
    login_path: String,
    user_agent_prefix: Option<String>,
}

impl ConsoleConfig {
    /// Creates a new builder for constructing a `ConsoleConfig`.
    #[must_use]
    pub fn builder() -> ConsoleConfigBuilder {
        ConsoleConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base_url(&self) -> &ApiBaseUrl {
        &self.api_base_url
    }

    /// Returns the durable storage slot names.
    #[must_use]
    pub const fn storage_keys(&self) -> &StorageKeys {
        &self.storage_keys
    }

    /// Returns the lifetime of the session cookie.
    #[must_use]
    pub const fn cookie_max_age(&self) -> Duration {
        self.cookie_max_age
    }

    /// Returns the login endpoint path, relative to the base URL.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ConsoleConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConsoleConfig>();
};

/// Builder for constructing [`ConsoleConfig`] instances.
///
/// Only `api_base_url` is required.
///
/// # Defaults
///
/// - `storage_keys`: [`StorageKeys::default`]
/// - `cookie_max_age`: 24 hours
/// - `login_path`: `"auth/login"`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use chrono::Duration;
/// use wa_console::{ApiBaseUrl, ConsoleConfig, StorageKeys};
///
/// let config = ConsoleConfig::builder()
///     .api_base_url(ApiBaseUrl::new("https://api.example.com").unwrap())
///     .storage_keys(StorageKeys::new("wa_token", "wa_user", "wa_refresh").unwrap())
///     .cookie_max_age(Duration::hours(8))
///     .login_path("v2/auth/login")
///     .user_agent_prefix("AdminConsole/2.1")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.cookie_max_age().num_seconds(), 8 * 3600);
/// ```
#[derive(Debug, Default)]
pub struct ConsoleConfigBuilder {
    api_base_url: Option<ApiBaseUrl>,
    storage_keys: Option<StorageKeys>,
    cookie_max_age: Option<Duration>,
    login_path: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ConsoleConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn api_base_url(mut self, url: ApiBaseUrl) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Sets the durable storage slot names.
    #[must_use]
    pub fn storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = Some(keys);
        self
    }

    /// Sets the lifetime of the session cookie.
    #[must_use]
    pub const fn cookie_max_age(mut self, max_age: Duration) -> Self {
        self.cookie_max_age = Some(max_age);
        self
    }

    /// Sets the login endpoint path.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ConsoleConfig`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `api_base_url` is not set
    /// - [`ConfigError::InvalidCookieMaxAge`] if the cookie lifetime is not positive
    /// - [`ConfigError::EmptyLoginPath`] if the login path is blank
    pub fn build(self) -> Result<ConsoleConfig, ConfigError> {
        let api_base_url = self
            .api_base_url
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_base_url",
            })?;

        let cookie_max_age = self
            .cookie_max_age
            .unwrap_or_else(|| Duration::seconds(DEFAULT_COOKIE_MAX_AGE_SECS));
        if cookie_max_age <= Duration::zero() {
            return Err(ConfigError::InvalidCookieMaxAge {
                seconds: cookie_max_age.num_seconds(),
            });
        }

        let login_path = self
            .login_path
            .map_or_else(|| DEFAULT_LOGIN_PATH.to_string(), |p| p.trim().to_string());
        if login_path.trim_matches('/').is_empty() {
            return Err(ConfigError::EmptyLoginPath);
        }

        Ok(ConsoleConfig {
            api_base_url,
            storage_keys: self.storage_keys.unwrap_or_default(),
            cookie_max_age,
            login_path,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
