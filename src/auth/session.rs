//! Session values exchanged between the login collaborator, the store and
//! the storage adapter.
//!
//! - [`SessionToken`]: the opaque credential, masked in debug output
//! - [`User`]: the authenticated principal, kept as an opaque JSON object
//! - [`LoginCredentials`]: what the caller submits to log in
//! - [`LoginSession`]: what a successful login hands back

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An opaque session token proving an authenticated identity to the API.
///
/// Never empty. The `Debug` implementation masks the value so tokens do not
/// leak into logs.
///
/// # Example
///
/// ```rust
/// use wa_console::SessionToken;
///
/// let token = SessionToken::new("tok123").unwrap();
/// assert_eq!(token.as_ref(), "tok123");
/// assert_eq!(format!("{token:?}"), "SessionToken(*****)");
/// assert!(SessionToken::new("").is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a token string, returning `None` when it is empty.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(*****)")
    }
}

impl<'de> Deserialize<'de> for SessionToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).ok_or_else(|| de::Error::custom("session token cannot be empty"))
    }
}

/// The authenticated principal.
///
/// The record's shape belongs to the remote API, so it is kept as a JSON
/// object. Anything that is not an object (including `null`) is not a user.
///
/// # Example
///
/// ```rust
/// use wa_console::User;
///
/// let user: User = serde_json::from_str(r#"{"id":1,"name":"A"}"#).unwrap();
/// assert_eq!(user.name(), Some("A"));
/// assert!(serde_json::from_str::<User>("null").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    /// Creates a user record from a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Creates a user record from an arbitrary JSON value, if it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Returns a field of the record.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the user id, whether the API sends it as a number or a string.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns the display name, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Returns the email address, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Credentials submitted to the login endpoint.
///
/// Sent on the wire as `{"email": identifier, "password": secret}`. The
/// remote API validates them; nothing is checked locally.
///
/// # Example
///
/// ```rust
/// use wa_console::LoginCredentials;
///
/// let credentials = LoginCredentials::new("a@b.com", "x");
/// let json = serde_json::to_value(&credentials).unwrap();
/// assert_eq!(json["email"], "a@b.com");
/// assert!(!format!("{credentials:?}").contains("\"x\""));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    #[serde(rename = "email")]
    identifier: String,
    #[serde(rename = "password")]
    secret: String,
}

impl LoginCredentials {
    /// Creates a credentials pair.
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Returns the account identifier (the email address).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"*****")
            .finish()
    }
}

/// The outcome of a successful login: who logged in and their token.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginSession {
    /// The authenticated principal.
    pub user: User,
    /// The issued session token.
    pub token: SessionToken,
}

// Verify session values are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionToken>();
    assert_send_sync::<User>();
    assert_send_sync::<LoginCredentials>();
    assert_send_sync::<LoginSession>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_token_rejects_empty() {
        assert!(SessionToken::new("").is_none());
        assert!(SessionToken::new("t").is_some());
    }

    #[test]
    fn test_session_token_masks_value_in_debug() {
        let token = SessionToken::new("super-secret-token").unwrap();
        let debug_output = format!("{token:?}");
        assert_eq!(debug_output, "SessionToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_session_token_deserialization_rejects_empty() {
        let result: Result<SessionToken, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());

        let token: SessionToken = serde_json::from_str(r#""tok""#).unwrap();
        assert_eq!(token.as_ref(), "tok");
    }

    #[test]
    fn test_user_accessors() {
        let user = User::from_value(json!({"id": 1, "name": "A", "email": "a@b.com"})).unwrap();
        assert_eq!(user.id(), Some("1".to_string()));
        assert_eq!(user.name(), Some("A"));
        assert_eq!(user.email(), Some("a@b.com"));

        let user = User::from_value(json!({"id": "u-9"})).unwrap();
        assert_eq!(user.id(), Some("u-9".to_string()));
        assert!(user.name().is_none());
    }

    #[test]
    fn test_user_must_be_an_object() {
        assert!(User::from_value(json!(null)).is_none());
        assert!(User::from_value(json!([1, 2])).is_none());
        assert!(User::from_value(json!("A")).is_none());
        assert!(serde_json::from_str::<User>("42").is_err());
    }

    #[test]
    fn test_user_serializes_as_plain_object() {
        let user = User::from_value(json!({"id": 1, "name": "A"})).unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "A"}));
    }

    #[test]
    fn test_credentials_wire_format() {
        let credentials = LoginCredentials::new("a@b.com", "x");
        let json = serde_json::to_value(&credentials).unwrap();
        assert_eq!(json, json!({"email": "a@b.com", "password": "x"}));
    }

    #[test]
    fn test_credentials_mask_secret_in_debug() {
        let credentials = LoginCredentials::new("a@b.com", "hunter2");
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("a@b.com"));
        assert!(!debug_output.contains("hunter2"));
    }
}
