//! Storage backend errors.
//!
//! These never reach callers of [`SessionStorage`](super::SessionStorage):
//! the adapter logs them and degrades to "absent".

use thiserror::Error;

/// Errors a [`StorageBackend`](super::StorageBackend) can report.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be encoded or decoded.
    #[error("Storage document is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend cannot serve requests right now.
    #[error("Storage unavailable: {reason}")]
    Unavailable {
        /// Why the backend is unavailable.
        reason: String,
    },
}
