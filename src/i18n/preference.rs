//! Persisted language preference.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Where the user's chosen locale code is kept between sessions.
///
/// Read once at initialization and written once per locale change.
pub trait PreferenceStore: Send + Sync {
    /// The stored code, or `None` if nothing was saved yet.
    fn load(&self) -> BoxFuture<'_, Result<Option<String>>>;

    fn save<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<()>>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    language: String,
}

/// JSON file holding `{"language": "<code>"}`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<String>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored language preference at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        let stored: StoredPreference = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(stored.language))
    }

    async fn write(&self, code: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&StoredPreference {
            language: code.to_string(),
        })?;
        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> BoxFuture<'_, Result<Option<String>>> {
        self.read().boxed()
    }

    fn save<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<()>> {
        self.write(code).boxed()
    }
}

/// Preference kept in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    code: Mutex<Option<String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `code`.
    pub fn with_code(code: &str) -> Self {
        Self {
            code: Mutex::new(Some(code.to_string())),
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.code
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> BoxFuture<'_, Result<Option<String>>> {
        futures::future::ready(Ok(self.stored())).boxed()
    }

    fn save<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<()>> {
        *self.code.lock().unwrap_or_else(PoisonError::into_inner) = Some(code.to_string());
        futures::future::ready(Ok(())).boxed()
    }
}
