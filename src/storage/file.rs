//! File-backed durable storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use super::backend::{StorageBackend, StorageDocument};
use super::cookie::SessionCookie;
use super::error::StorageError;

/// A backend that keeps slots and cookies in a single JSON file.
///
/// The file is re-read on every access, so separate instances on the same
/// path observe each other's writes with last-writer-wins semantics. Writes
/// go to a sibling temp file that is then renamed over the original.
///
/// A missing file is an empty store. Reading a corrupt file yields
/// [`StorageError::Serialization`]; the next write replaces it.
///
/// # Example
///
/// ```rust,no_run
/// use wa_console::storage::{FileBackend, StorageBackend};
///
/// let backend = FileBackend::new("/var/lib/wa-console/session.json");
/// backend.set_item("auth_token", "tok123").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileBackend {
    /// Creates a backend over `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StorageDocument, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(StorageDocument::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StorageDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, document: &StorageDocument) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(document)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(&self, mutate: impl FnOnce(&mut StorageDocument)) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Unavailable {
            reason: "file storage lock poisoned".to_string(),
        })?;
        let mut document = match self.load() {
            Ok(document) => document,
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding corrupt session storage file"
                );
                StorageDocument::default()
            }
            Err(e) => return Err(e),
        };
        mutate(&mut document);
        self.save(&document)
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.items.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|document| {
            document.items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|document| {
            document.items.remove(key);
        })
    }

    fn set_cookie(&self, cookie: &SessionCookie) -> Result<(), StorageError> {
        let now = Utc::now();
        self.update(|document| document.apply_cookie(cookie, now))
    }

    fn cookie(&self, name: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.live_cookie(name, Utc::now()))
    }
}
