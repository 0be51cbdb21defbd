//! HTTP client for console API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the console API with automatic retry handling.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiBaseUrl, ConsoleConfig};
use crate::storage::SessionStorage;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the console API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent
/// - `Authorization: Bearer` from the session storage, read on every request
/// - Automatic retry logic for 429 and 500 responses
///
/// Because the token is read per request, a login or logout through the
/// same storage takes effect on the next call without rebuilding the client.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use wa_console::clients::{HttpClient, HttpMethod, HttpRequest};
/// use wa_console::storage::DurableSessionStorage;
///
/// let storage = Arc::new(DurableSessionStorage::in_memory());
/// let client = HttpClient::new(&config, storage);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "contacts")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://api.example.com/v1`).
    base_url: ApiBaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Source of the bearer token.
    storage: Arc<dyn SessionStorage>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ConsoleConfig, storage: Arc<dyn SessionStorage>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}WhatsApp Console Client v{CLIENT_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.api_base_url().clone(),
            default_headers,
            storage,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the `Authorization` header value for the stored session, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.storage
            .read_token()
            .map(|token| format!("Bearer {}", token.as_ref()))
    }

    /// Sends an HTTP request to the console API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(authorization) = self.authorization() {
            headers.insert("Authorization".to_string(), authorization);
        }
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt = tries,
                "Sending console API request"
            );

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Patch => self.client.patch(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let server_message = response.server_message().map(String::from);
            let error_reference = response.request_id().map(String::from);

            let should_retry = code == 429 || code == 500;
            if !should_retry || tries >= request.tries {
                if should_retry && request.tries > 1 {
                    let error = HttpResponseError::new(code, server_message.clone(), None);
                    return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                        code,
                        tries: request.tries,
                        message: error.message,
                        server_message,
                        error_reference,
                    }));
                }
                return Err(HttpError::Response(HttpResponseError::new(
                    code,
                    server_message,
                    error_reference,
                )));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                path = %request.path,
                status = code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying console API request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // 429 honours Retry-After; 500 always waits the fixed delay
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|secs| std::time::Duration::try_from_secs_f64(secs).ok())
            {
                return delay;
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SessionToken, User};
    use crate::storage::{DurableSessionStorage, NoopSessionStorage};

    fn create_test_config(prefix: Option<&str>) -> ConsoleConfig {
        let mut builder = ConsoleConfig::builder()
            .api_base_url(ApiBaseUrl::new("https://api.example.com/v1").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_client_construction_uses_base_url() {
        let client = HttpClient::new(&create_test_config(None), Arc::new(NoopSessionStorage));
        assert_eq!(client.base_url().as_ref(), "https://api.example.com/v1");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config(None), Arc::new(NoopSessionStorage));

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("WhatsApp Console Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = HttpClient::new(
            &create_test_config(Some("AdminConsole/1.0")),
            Arc::new(NoopSessionStorage),
        );

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("AdminConsole/1.0 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config(None), Arc::new(NoopSessionStorage));
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_authorization_follows_storage() {
        let storage = Arc::new(DurableSessionStorage::in_memory());
        let client = HttpClient::new(&create_test_config(None), storage.clone());
        assert!(client.authorization().is_none());

        storage.write_session(&SessionToken::new("tok123").unwrap(), &User::default());
        assert_eq!(client.authorization(), Some("Bearer tok123".to_string()));

        storage.clear_session();
        assert!(client.authorization().is_none());
    }

    #[test]
    fn test_retry_delay_for_429_uses_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["0.5".to_string()]);
        let response = HttpResponse::new(429, headers, serde_json::json!({}));

        assert_eq!(
            HttpClient::calculate_retry_delay(&response, 429),
            std::time::Duration::from_millis(500)
        );
        assert_eq!(
            HttpClient::calculate_retry_delay(&response, 500),
            std::time::Duration::from_secs(RETRY_WAIT_TIME)
        );
    }

    #[test]
    fn test_unrepresentable_retry_after_uses_fixed_delay() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["1e30".to_string()]);
        let response = HttpResponse::new(429, headers, serde_json::json!({}));

        assert_eq!(
            HttpClient::calculate_retry_delay(&response, 429),
            std::time::Duration::from_secs(RETRY_WAIT_TIME)
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
