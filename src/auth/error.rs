//! Login error types.
//!
//! # Error Types
//!
//! - [`AuthError::Http`]: The login request failed at the HTTP level
//! - [`AuthError::Rejected`]: The API answered with a non-success envelope
//! - [`AuthError::InvalidResponse`]: The API answered with an unusable body
//! - [`AuthError::Transport`]: A collaborator-level fault with a free-form message
//!
//! # Failure Messages
//!
//! [`AuthError::failure_message`] picks the text shown to the user: the
//! server's own message if it sent one, otherwise the error's description,
//! otherwise [`LOGIN_FAILED`].
//!
//! ```rust
//! use wa_console::AuthError;
//!
//! let error = AuthError::Transport { message: String::new() };
//! assert_eq!(error.failure_message(), "Login failed");
//!
//! let error = AuthError::Rejected { message: Some("Account locked".to_string()) };
//! assert_eq!(error.failure_message(), "Account locked");
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Message used when a login failure carries no usable text.
pub const LOGIN_FAILED: &str = "Login failed";

/// Errors that can occur while logging in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login request failed: network error or non-2xx response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The API answered with `success: false`.
    #[error("{}", message.as_deref().unwrap_or(LOGIN_FAILED))]
    Rejected {
        /// The message the API attached, if any.
        message: Option<String>,
    },

    /// The API answered 2xx but the body was not a usable login result.
    #[error("Invalid login response: {reason}")]
    InvalidResponse {
        /// What was wrong with the body.
        reason: String,
    },

    /// A fault raised by a non-HTTP collaborator.
    #[error("{message}")]
    Transport {
        /// Description of the fault. May be empty.
        message: String,
    },
}

impl AuthError {
    /// Returns the message the server supplied, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.server_message(),
            Self::Rejected { message } => message.as_deref(),
            Self::InvalidResponse { .. } | Self::Transport { .. } => None,
        }
        .filter(|m| !m.trim().is_empty())
    }

    /// Returns the most specific human-readable description of the failure.
    #[must_use]
    pub fn failure_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        let description = self.to_string();
        if description.trim().is_empty() {
            LOGIN_FAILED.to_string()
        } else {
            description
        }
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
