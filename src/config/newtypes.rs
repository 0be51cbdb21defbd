//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A validated base URL for the remote console API.
///
/// The URL must carry a scheme and a host. A trailing slash is stripped so
/// request paths can be joined without doubling separators.
///
/// # Example
///
/// ```rust
/// use wa_console::ApiBaseUrl;
///
/// let url = ApiBaseUrl::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/v1");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.example.com");
/// assert_eq!(url.join("auth/login"), "https://api.example.com/v1/auth/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiBaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBaseUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidApiBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start || url[host_start..host_end].contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a relative request path onto this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for ApiBaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ApiBaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// Names of the durable storage slots owned by the session adapter.
///
/// The token key doubles as the session cookie name, so every key must be a
/// valid cookie name.
///
/// # Example
///
/// ```rust
/// use wa_console::StorageKeys;
///
/// let keys = StorageKeys::default();
/// assert_eq!(keys.token(), "auth_token");
/// assert_eq!(keys.user(), "auth_user");
/// assert_eq!(keys.refresh_token(), "refresh_token");
///
/// let custom = StorageKeys::new("wa_token", "wa_user", "wa_refresh").unwrap();
/// assert_eq!(custom.token(), "wa_token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    token: String,
    user: String,
    refresh_token: String,
}

impl StorageKeys {
    /// Default key for the session token slot and cookie.
    pub const DEFAULT_TOKEN: &'static str = "auth_token";
    /// Default key for the serialized user record.
    pub const DEFAULT_USER: &'static str = "auth_user";
    /// Default key for the auxiliary refresh-token slot.
    pub const DEFAULT_REFRESH_TOKEN: &'static str = "refresh_token";

    /// Creates a validated set of storage keys.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidStorageKey`] if any key is empty or contains
    ///   characters that are not allowed in a cookie name
    /// - [`ConfigError::DuplicateStorageKey`] if two slots share a key
    pub fn new(
        token: impl Into<String>,
        user: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let token = Self::validate("token", token.into())?;
        let user = Self::validate("user", user.into())?;
        let refresh_token = Self::validate("refresh_token", refresh_token.into())?;

        if user == token {
            return Err(ConfigError::DuplicateStorageKey { slot: "user", key: user });
        }
        if refresh_token == token || refresh_token == user {
            return Err(ConfigError::DuplicateStorageKey {
                slot: "refresh_token",
                key: refresh_token,
            });
        }

        Ok(Self {
            token,
            user,
            refresh_token,
        })
    }

    /// Returns the token slot key, which is also the cookie name.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the user record slot key.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the refresh-token slot key.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    fn validate(slot: &'static str, key: String) -> Result<String, ConfigError> {
        let invalid = key.is_empty()
            || key
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '=' | ';' | ','));
        if invalid {
            return Err(ConfigError::InvalidStorageKey { slot, key });
        }
        Ok(key)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: Self::DEFAULT_TOKEN.to_string(),
            user: Self::DEFAULT_USER.to_string(),
            refresh_token: Self::DEFAULT_REFRESH_TOKEN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url_validates_format() {
        let url = ApiBaseUrl::new("https://api.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "api.example.com");

        // With port
        let url = ApiBaseUrl::new("http://localhost:4000/api").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");
        assert_eq!(url.as_ref(), "http://localhost:4000/api");
    }

    #[test]
    fn test_api_base_url_strips_trailing_slash() {
        let url = ApiBaseUrl::new("  https://api.example.com/v1/  ").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com/v1");
    }

    #[test]
    fn test_api_base_url_rejects_invalid() {
        assert!(ApiBaseUrl::new("api.example.com").is_err());
        assert!(ApiBaseUrl::new("https://").is_err());
        assert!(ApiBaseUrl::new("://example.com").is_err());
        assert!(ApiBaseUrl::new("https:///path").is_err());
        assert!(ApiBaseUrl::new("").is_err());
    }

    #[test]
    fn test_api_base_url_join_handles_leading_slash() {
        let url = ApiBaseUrl::new("https://api.example.com/v1").unwrap();
        assert_eq!(url.join("/auth/login"), "https://api.example.com/v1/auth/login");
        assert_eq!(url.join("contacts"), "https://api.example.com/v1/contacts");
    }

    #[test]
    fn test_api_base_url_deserializes_with_validation() {
        let url: ApiBaseUrl = serde_json::from_str(r#""https://api.example.com/""#).unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");

        let result: Result<ApiBaseUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_storage_keys_defaults() {
        let keys = StorageKeys::default();
        assert_eq!(keys.token(), "auth_token");
        assert_eq!(keys.user(), "auth_user");
        assert_eq!(keys.refresh_token(), "refresh_token");
    }

    #[test]
    fn test_storage_keys_reject_cookie_unsafe_names() {
        assert!(matches!(
            StorageKeys::new("", "user", "refresh"),
            Err(ConfigError::InvalidStorageKey { slot: "token", .. })
        ));
        assert!(matches!(
            StorageKeys::new("token", "us er", "refresh"),
            Err(ConfigError::InvalidStorageKey { slot: "user", .. })
        ));
        assert!(StorageKeys::new("tok=en", "user", "refresh").is_err());
        assert!(StorageKeys::new("token", "user", "re;fresh").is_err());
        assert!(StorageKeys::new("tok,en", "user", "refresh").is_err());
    }

    #[test]
    fn test_storage_keys_reject_duplicates() {
        assert!(matches!(
            StorageKeys::new("auth_token", "auth_token", "refresh_token"),
            Err(ConfigError::DuplicateStorageKey { slot: "user", .. })
        ));
        assert!(matches!(
            StorageKeys::new("auth_token", "auth_user", "auth_token"),
            Err(ConfigError::DuplicateStorageKey { slot: "refresh_token", .. })
        ));
        assert!(matches!(
            StorageKeys::new("auth_token", "auth_user", "auth_user"),
            Err(ConfigError::DuplicateStorageKey { slot: "refresh_token", .. })
        ));
    }
}
