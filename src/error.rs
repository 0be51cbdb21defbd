//! Error types for console configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! settings are rejected before any session or network work starts.
//!
//! # Example
//!
//! ```rust
//! use wa_console::{ApiBaseUrl, ConfigError};
//!
//! let result = ApiBaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidApiBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building console configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is malformed.
    #[error("Invalid API base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com/v1').")]
    InvalidApiBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A storage slot name is empty or cannot be used as a cookie name.
    #[error("Invalid storage key '{key}' for the {slot} slot. Keys must be non-empty and contain no whitespace, '=', ';' or ','.")]
    InvalidStorageKey {
        /// Which slot the key was meant for.
        slot: &'static str,
        /// The rejected key.
        key: String,
    },

    /// Two storage slots were given the same key.
    #[error("Storage key '{key}' for the {slot} slot is already used by another slot. Each slot needs its own key.")]
    DuplicateStorageKey {
        /// The slot whose key collides with an earlier one.
        slot: &'static str,
        /// The repeated key.
        key: String,
    },

    /// The session cookie lifetime must be positive.
    #[error("Session cookie max-age must be positive, got {seconds} seconds.")]
    InvalidCookieMaxAge {
        /// The rejected lifetime in seconds.
        seconds: i64,
    },

    /// The login path is empty.
    #[error("Login path cannot be empty.")]
    EmptyLoginPath,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
