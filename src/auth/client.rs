//! The login collaborator.
//!
//! [`AuthApi`] is the seam between the authentication store and the remote
//! API. [`AuthClient`] is its HTTP implementation: one `POST` to the login
//! endpoint, one attempt, no retries.
//!
//! # Response Envelope
//!
//! The login endpoint has been seen answering in two shapes. Both are
//! accepted through [`LoginEnvelope`]:
//!
//! ```text
//! {"user": {...}, "accessToken": "..."}                                  flat
//! {"success": true, "data": {"user": {...}, "token": "..."}, "message": ...}  wrapped
//! ```
//!
//! A wrapped envelope with `"success": false` is a rejection carrying the
//! server's message.

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::auth::error::AuthError;
use crate::auth::session::{LoginCredentials, LoginSession, SessionToken, User};
use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::ConsoleConfig;
use crate::storage::SessionStorage;

/// The remote side of a login.
///
/// Implementations resolve exactly once per call: a session on success, an
/// [`AuthError`] otherwise.
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a user record and session token.
    fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> impl Future<Output = Result<LoginSession, AuthError>> + Send;
}

/// Payload of a wrapped envelope.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    user: Value,
    #[serde(alias = "accessToken")]
    token: String,
}

/// The two response shapes the login endpoint uses.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use wa_console::auth::LoginEnvelope;
///
/// let session = LoginEnvelope::parse(json!({
///     "user": {"id": 1, "name": "A"},
///     "accessToken": "tok123"
/// }))
/// .unwrap();
/// assert_eq!(session.token.as_ref(), "tok123");
///
/// let rejected = LoginEnvelope::parse(json!({
///     "success": false,
///     "message": "Invalid credentials"
/// }));
/// assert!(rejected.is_err());
/// ```
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginEnvelope {
    /// `{user, accessToken}`.
    Flat {
        /// The user record.
        user: Value,
        /// The session token.
        #[serde(rename = "accessToken")]
        access_token: String,
    },
    /// `{success, data: {user, token}, message}`.
    Wrapped {
        /// Whether the login succeeded.
        success: bool,
        /// The session, present on success.
        #[serde(default)]
        data: Option<LoginData>,
        /// A human-readable message.
        #[serde(default)]
        message: Option<String>,
    },
}

impl LoginEnvelope {
    /// Parses a response body into a login session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`] for a wrapped envelope with `success: false`
    /// - [`AuthError::InvalidResponse`] for any other unusable body
    pub fn parse(body: Value) -> Result<LoginSession, AuthError> {
        let envelope: Self =
            serde_json::from_value(body).map_err(|_| AuthError::InvalidResponse {
                reason: "body matches neither the flat nor the wrapped login envelope"
                    .to_string(),
            })?;
        envelope.into_session()
    }

    /// Converts the envelope into a login session.
    ///
    /// # Errors
    ///
    /// See [`LoginEnvelope::parse`].
    pub fn into_session(self) -> Result<LoginSession, AuthError> {
        let (user, token) = match self {
            Self::Flat { user, access_token } => (user, access_token),
            Self::Wrapped {
                success: false,
                message,
                ..
            } => return Err(AuthError::Rejected { message }),
            Self::Wrapped {
                success: true,
                data: Some(data),
                ..
            } => (data.user, data.token),
            Self::Wrapped {
                success: true,
                data: None,
                ..
            } => {
                return Err(AuthError::InvalidResponse {
                    reason: "successful envelope carries no data".to_string(),
                })
            }
        };

        let user = User::from_value(user).ok_or_else(|| AuthError::InvalidResponse {
            reason: "user record is not a JSON object".to_string(),
        })?;
        let token = SessionToken::new(token).ok_or_else(|| AuthError::InvalidResponse {
            reason: "session token is empty".to_string(),
        })?;

        Ok(LoginSession { user, token })
    }
}

/// HTTP implementation of [`AuthApi`].
#[derive(Debug)]
pub struct AuthClient {
    http: HttpClient,
    login_path: String,
}

impl AuthClient {
    /// Creates a login client for the configured API.
    #[must_use]
    pub fn new(config: &ConsoleConfig, storage: Arc<dyn SessionStorage>) -> Self {
        Self::from_http(HttpClient::new(config, storage), config.login_path())
    }

    /// Creates a login client over an existing HTTP client.
    #[must_use]
    pub fn from_http(http: HttpClient, login_path: impl Into<String>) -> Self {
        Self {
            http,
            login_path: login_path.into(),
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the login endpoint path.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }
}

impl AuthApi for AuthClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, AuthError> {
        let body = serde_json::to_value(credentials).map_err(|e| AuthError::Transport {
            message: format!("Failed to encode credentials: {e}"),
        })?;

        let request = HttpRequest::builder(HttpMethod::Post, self.login_path.as_str())
            .body(body)
            .body_type(DataType::Json)
            .tries(1)
            .build()
            .map_err(HttpError::from)?;

        let response = self.http.request(request).await?;
        LoginEnvelope::parse(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiBaseUrl;
    use crate::storage::NoopSessionStorage;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_client(server: &MockServer) -> AuthClient {
        let config = ConsoleConfig::builder()
            .api_base_url(ApiBaseUrl::new(server.uri()).unwrap())
            .build()
            .unwrap();
        AuthClient::new(&config, Arc::new(NoopSessionStorage))
    }

    #[test]
    fn test_flat_envelope_parses() {
        let session = LoginEnvelope::parse(json!({
            "user": {"id": 1, "name": "A"},
            "accessToken": "tok123"
        }))
        .unwrap();

        assert_eq!(session.token.as_ref(), "tok123");
        assert_eq!(session.user.name(), Some("A"));
    }

    #[test]
    fn test_flat_envelope_wins_when_success_flag_is_also_present() {
        let session = LoginEnvelope::parse(json!({
            "success": true,
            "user": {"id": 1},
            "accessToken": "tok"
        }))
        .unwrap();
        assert_eq!(session.token.as_ref(), "tok");
    }

    #[test]
    fn test_wrapped_envelope_parses_token_and_access_token() {
        let session = LoginEnvelope::parse(json!({
            "success": true,
            "data": {"user": {"id": 2}, "token": "wrapped-tok"},
            "message": "Welcome"
        }))
        .unwrap();
        assert_eq!(session.token.as_ref(), "wrapped-tok");

        let session = LoginEnvelope::parse(json!({
            "success": true,
            "data": {"user": {"id": 2}, "accessToken": "alias-tok"}
        }))
        .unwrap();
        assert_eq!(session.token.as_ref(), "alias-tok");
    }

    #[test]
    fn test_wrapped_rejection_carries_message() {
        let result = LoginEnvelope::parse(json!({
            "success": false,
            "message": "Invalid credentials"
        }));

        match result {
            Err(AuthError::Rejected { message }) => {
                assert_eq!(message.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_unusable_bodies_are_invalid_responses() {
        for body in [
            json!({}),
            json!({"raw_body": "<html>"}),
            json!({"success": true}),
            json!({"user": null, "accessToken": "tok"}),
            json!({"user": {"id": 1}, "accessToken": ""}),
            json!({"user": {"id": 1}}),
        ] {
            assert!(
                matches!(
                    LoginEnvelope::parse(body.clone()),
                    Err(AuthError::InvalidResponse { .. })
                ),
                "expected InvalidResponse for {body}"
            );
        }
    }

    #[tokio::test]
    async fn test_login_posts_credentials_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"email": "a@b.com", "password": "x"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"id": 1, "name": "A"},
                "accessToken": "tok123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server);
        let session = client
            .login(&LoginCredentials::new("a@b.com", "x"))
            .await
            .unwrap();

        assert_eq!(session.token.as_ref(), "tok123");
        assert_eq!(session.user.id(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_login_surfaces_server_message_on_401() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let client = create_client(&server);
        let error = client
            .login(&LoginCredentials::new("a@b.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(error, AuthError::Http(HttpError::Response(_))));
        assert_eq!(error.failure_message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&server);
        let error = client
            .login(&LoginCredentials::new("a@b.com", "x"))
            .await
            .unwrap_err();

        assert_eq!(error.failure_message(), "Request failed with status code 500");
    }
}
