//! Authentication types and the login collaborator.
//!
//! # Overview
//!
//! - [`SessionToken`], [`User`]: what a session is made of
//! - [`LoginCredentials`]: what the caller submits
//! - [`AuthApi`]: the seam to the remote login endpoint
//! - [`AuthClient`]: the HTTP implementation of [`AuthApi`]
//! - [`LoginEnvelope`]: the discriminated union over both response shapes
//! - [`AuthError`]: everything that can go wrong during a login
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wa_console::auth::{AuthApi, AuthClient, LoginCredentials};
//! use wa_console::storage::NoopSessionStorage;
//!
//! let client = AuthClient::new(&config, Arc::new(NoopSessionStorage));
//! let session = client.login(&LoginCredentials::new("a@b.com", "secret")).await?;
//! println!("Logged in as {:?}", session.user.name());
//! ```

mod client;
mod error;
pub mod session;

pub use client::{AuthApi, AuthClient, LoginData, LoginEnvelope};
pub use error::{AuthError, LOGIN_FAILED};
pub use session::{LoginCredentials, LoginSession, SessionToken, User};
