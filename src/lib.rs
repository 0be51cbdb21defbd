//! # WhatsApp Business Console Core
//!
//! Session and authentication core for a WhatsApp Business administrative
//! console: persistent session storage, a login client, and the state store
//! that the console's pages are guarded by.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ConsoleConfig`] and [`ConsoleConfigBuilder`]
//! - A session storage adapter over durable backends via [`storage`]
//! - A login client speaking both response envelopes via [`auth`]
//! - The authentication store and its pure transitions via [`store`]
//! - An async HTTP client that attaches the session token to every request
//! - Page metadata and route guards for the console via [`console`]
//!
//! ## Quick Start
//!
//! ```rust
//! use wa_console::{ApiBaseUrl, ConsoleConfig};
//!
//! let config = ConsoleConfig::builder()
//!     .api_base_url(ApiBaseUrl::new("http://localhost:3001/api").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.login_path(), "auth/login");
//! ```
//!
//! ## Logging In
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wa_console::storage::{DurableSessionStorage, FileBackend};
//! use wa_console::{AuthClient, AuthStore, LoginCredentials};
//!
//! let storage = Arc::new(DurableSessionStorage::new(FileBackend::new("session.json"), &config));
//! let store = AuthStore::new(AuthClient::new(&config, storage.clone()), storage);
//!
//! // Pick up a session persisted by an earlier run
//! store.check_auth();
//!
//! if !store.state().is_authenticated {
//!     if let Err(e) = store.login(&LoginCredentials::new("admin@example.com", "secret")).await {
//!         // The same message is now in store.state().error
//!         eprintln!("{}", e.failure_message());
//!     }
//! }
//! ```
//!
//! ## Watching State
//!
//! ```rust,ignore
//! let mut rx = store.subscribe();
//! while rx.changed().await.is_ok() {
//!     let state = rx.borrow_and_update().clone();
//!     println!("{:?}", state.phase());
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the store and its collaborators are plain values
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Storage never fails loudly**: unreadable state reads as "no session"
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod console;
pub mod error;
pub mod storage;
pub mod store;

// Re-export public types at crate root for convenience
pub use auth::{
    AuthApi, AuthClient, AuthError, LoginCredentials, LoginEnvelope, LoginSession, SessionToken,
    User, LOGIN_FAILED,
};
pub use config::{ApiBaseUrl, ConsoleConfig, ConsoleConfigBuilder, StorageKeys};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};

// Re-export storage, store and page types
pub use console::{dashboard_stats, ConsolePage, DashboardStat};
pub use storage::{
    DurableSessionStorage, FileBackend, MemoryBackend, NoopSessionStorage, SessionStorage,
    StorageError,
};
pub use store::{AuthEvent, AuthPhase, AuthState, AuthStore};
