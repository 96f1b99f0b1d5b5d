//! Translation catalog loading.
//!
//! The core only consumes flat key -> string maps. How they are stored is
//! up to the [`TranslationLoader`] implementation.

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat translation map for one (locale, namespace) pair.
pub type TranslationMap = HashMap<String, String>;

/// Namespaces the app ships translations for.
pub const DEFAULT_NAMESPACES: &[&str] = &["common", "fleet", "finance", "legal", "contracts", "hr"];

/// Source of translation maps.
pub trait TranslationLoader: Send + Sync {
    fn load<'a>(
        &'a self,
        code: &'a str,
        namespace: &'a str,
    ) -> BoxFuture<'a, Result<TranslationMap>>;
}

/// Reads `<root>/<code>/<namespace>.json`.
///
/// Nested objects are flattened with `.` separators (`{"nav": {"home": ..}}`
/// becomes `nav.home`). Arrays are keyed by index and non-string leaves are
/// stored as their JSON text.
#[derive(Debug, Clone)]
pub struct FsTranslationLoader {
    root: PathBuf,
}

impl FsTranslationLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, code: &str, namespace: &str) -> PathBuf {
        self.root.join(code).join(format!("{}.json", namespace))
    }

    async fn read(&self, code: &str, namespace: &str) -> Result<TranslationMap> {
        let path = self.path_for(code, namespace);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let mut map = TranslationMap::new();
        flatten_into(&mut map, "", &value);
        debug!("Loaded {} keys from {}", map.len(), path.display());
        Ok(map)
    }
}

impl TranslationLoader for FsTranslationLoader {
    fn load<'a>(
        &'a self,
        code: &'a str,
        namespace: &'a str,
    ) -> BoxFuture<'a, Result<TranslationMap>> {
        self.read(code, namespace).boxed()
    }
}

fn flatten_into(map: &mut TranslationMap, prefix: &str, value: &Value) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(entries) => {
            for (key, nested) in entries {
                flatten_into(map, &join(key), nested);
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                flatten_into(map, &join(&index.to_string()), nested);
            }
        }
        Value::String(text) => {
            map.insert(prefix.to_string(), text.clone());
        }
        Value::Null => {
            map.insert(prefix.to_string(), String::new());
        }
        other => {
            map.insert(prefix.to_string(), other.to_string());
        }
    }
}

/// In-memory catalogs keyed by (code, namespace).
///
/// A pair that was never inserted fails to load.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslationLoader {
    catalogs: HashMap<(String, String), TranslationMap>,
}

impl StaticTranslationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<K, V>(
        mut self,
        code: &str,
        namespace: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(code, namespace, entries);
        self
    }

    pub fn insert<K, V>(
        &mut self,
        code: &str,
        namespace: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.catalogs
            .insert((code.to_string(), namespace.to_string()), map);
    }
}

impl TranslationLoader for StaticTranslationLoader {
    fn load<'a>(
        &'a self,
        code: &'a str,
        namespace: &'a str,
    ) -> BoxFuture<'a, Result<TranslationMap>> {
        let found = self
            .catalogs
            .get(&(code.to_string(), namespace.to_string()))
            .cloned()
            .with_context(|| format!("No '{}' catalog for '{}'", namespace, code));
        futures::future::ready(found).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir, code: &str, namespace: &str, body: &str) {
        let locale_dir = dir.path().join(code);
        fs::create_dir_all(&locale_dir).unwrap();
        fs::write(locale_dir.join(format!("{}.json", namespace)), body).unwrap();
    }

    // ==================== Filesystem Loader Tests ====================

    #[tokio::test]
    async fn test_fs_loader_reads_flat_catalog() {
        let dir = TempDir::new().unwrap();
        write_catalog(&dir, "en", "common", r#"{"save": "Save", "cancel": "Cancel"}"#);

        let loader = FsTranslationLoader::new(dir.path());
        let map = loader.load("en", "common").await.unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["save"], "Save");
    }

    #[tokio::test]
    async fn test_fs_loader_flattens_nested_objects() {
        let dir = TempDir::new().unwrap();
        write_catalog(
            &dir,
            "ar",
            "fleet",
            r#"{
                "vehicle": {"plate": "رقم اللوحة", "status": {"active": "نشط"}},
                "tags": ["a", "b"],
                "limit": 5
            }"#,
        );

        let loader = FsTranslationLoader::new(dir.path());
        let map = loader.load("ar", "fleet").await.unwrap();

        assert_eq!(map["vehicle.plate"], "رقم اللوحة");
        assert_eq!(map["vehicle.status.active"], "نشط");
        assert_eq!(map["tags.1"], "b");
        assert_eq!(map["limit"], "5");
    }

    #[tokio::test]
    async fn test_fs_loader_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let loader = FsTranslationLoader::new(dir.path());

        let err = loader.load("fr", "legal").await.unwrap_err();
        assert!(err.to_string().contains("legal.json"));
    }

    #[tokio::test]
    async fn test_fs_loader_invalid_json_fails() {
        let dir = TempDir::new().unwrap();
        write_catalog(&dir, "en", "hr", "{not json");

        let loader = FsTranslationLoader::new(dir.path());
        let err = loader.load("en", "hr").await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    // ==================== Static Loader Tests ====================

    #[tokio::test]
    async fn test_static_loader_returns_inserted_catalog() {
        let loader = StaticTranslationLoader::new().with("en", "common", [("hello", "Hello")]);
        let map = loader.load("en", "common").await.unwrap();
        assert_eq!(map.get("hello").map(String::as_str), Some("Hello"));
    }

    #[tokio::test]
    async fn test_static_loader_unknown_pair_fails() {
        let loader = StaticTranslationLoader::new();
        assert!(loader.load("en", "common").await.is_err());
    }
}
