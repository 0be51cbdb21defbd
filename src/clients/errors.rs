//! HTTP-specific error types.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// Displays the server-supplied message when the body carried one, and
/// `Request failed with status code {code}` otherwise.
///
/// # Example
///
/// ```rust
/// use wa_console::clients::HttpResponseError;
///
/// let error = HttpResponseError::new(401, None, None);
/// assert_eq!(error.to_string(), "Request failed with status code 401");
///
/// let error = HttpResponseError::new(401, Some("Invalid credentials".to_string()), None);
/// assert_eq!(error.to_string(), "Invalid credentials");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// The `message` (or `error`) string from the response body, if any.
    pub server_message: Option<String>,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

impl HttpResponseError {
    /// Creates a response error, deriving the display message.
    #[must_use]
    pub fn new(code: u16, server_message: Option<String>, error_reference: Option<String>) -> Self {
        let message = server_message
            .clone()
            .unwrap_or_else(|| format!("Request failed with status code {code}"));
        Self {
            code,
            message,
            server_message,
            error_reference,
        }
    }
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Message from the last response.
    pub message: String,
    /// The server-supplied message of the last response, if any.
    pub server_message: Option<String>,
    /// Reference ID for error reporting (from X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A write request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A request must be attempted at least once.
    #[error("Request tries must be at least 1.")]
    ZeroTries,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the message the server put in the response body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Response(e) => e.server_message.as_deref(),
            Self::MaxRetries(e) => e.server_message.as_deref(),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns the HTTP status code, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_falls_back_to_status_message() {
        let error = HttpResponseError::new(404, None, None);
        assert_eq!(error.to_string(), "Request failed with status code 404");
        assert!(error.server_message.is_none());
    }

    #[test]
    fn test_http_response_error_uses_server_message() {
        let error = HttpResponseError::new(
            401,
            Some("Invalid credentials".to_string()),
            Some("abc-123".to_string()),
        );
        assert_eq!(error.to_string(), "Invalid credentials");
        assert_eq!(error.error_reference, Some("abc-123".to_string()));
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 429,
            tries: 3,
            message: "Too many requests".to_string(),
            server_message: Some("Too many requests".to_string()),
            error_reference: None,
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_http_error_exposes_server_message_and_status() {
        let error = HttpError::from(HttpResponseError::new(
            422,
            Some("Email is required".to_string()),
            None,
        ));
        assert_eq!(error.server_message(), Some("Email is required"));
        assert_eq!(error.status(), Some(422));

        let error = HttpError::from(InvalidHttpRequestError::MissingBodyType);
        assert!(error.server_message().is_none());
        assert!(error.status().is_none());
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use post without specifying data.");
        assert_eq!(
            InvalidHttpRequestError::MissingBodyType.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }
}
