use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{
    document::model::LayoutDocument,
    foundation::error::{BrandpostError, BrandpostResult},
};

/// Local, durable key-value store holding one serialized document per key.
///
/// Saves may be issued again before a previous one settled; the last write wins.
pub trait PersistenceBridge {
    /// Load the document stored under `key`, if any.
    fn load(&self, key: &str) -> BrandpostResult<Option<LayoutDocument>>;
    /// Store `doc` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, doc: &LayoutDocument) -> BrandpostResult<()>;
}

/// In-memory store for tests and embedding. Documents go through JSON so the store sees the
/// same data a durable backend would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Raw serialized value for `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Seed a raw value, bypassing serialization.
    pub fn insert_raw(&mut self, key: impl Into<String>, json: impl Into<String>) {
        self.entries.insert(key.into(), json.into());
    }
}

impl PersistenceBridge for MemoryStore {
    fn load(&self, key: &str) -> BrandpostResult<Option<LayoutDocument>> {
        self.entries
            .get(key)
            .map(|s| LayoutDocument::from_json_str(s))
            .transpose()
    }

    fn save(&mut self, key: &str, doc: &LayoutDocument) -> BrandpostResult<()> {
        let json = serde_json::to_string(doc)
            .map_err(|e| BrandpostError::serde(format!("serialize layout document: {e}")))?;
        self.entries.insert(key.to_owned(), json);
        self.saves += 1;
        Ok(())
    }
}

/// Directory-backed store: `<root>/<key>.json`, written atomically via a temp file and rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `root` (created lazily on first save).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path used for `key`.
    pub fn path_for(&self, key: &str) -> BrandpostResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !key.starts_with('.');
        if !valid {
            return Err(BrandpostError::validation(format!(
                "storage key \"{key}\" must be non-empty [A-Za-z0-9._-] and not start with '.'"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl PersistenceBridge for JsonFileStore {
    fn load(&self, key: &str) -> BrandpostResult<Option<LayoutDocument>> {
        let path = self.path_for(key)?;
        let s = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BrandpostError::persistence(format!(
                    "read '{}': {e}",
                    path.display()
                )));
            }
        };
        LayoutDocument::from_json_str(&s).map(Some)
    }

    fn save(&mut self, key: &str, doc: &LayoutDocument) -> BrandpostResult<()> {
        let path = self.path_for(key)?;
        let json = doc.to_json_pretty()?;
        std::fs::create_dir_all(&self.root).map_err(|e| {
            BrandpostError::persistence(format!(
                "create store dir '{}': {e}",
                self.root.display()
            ))
        })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| {
            BrandpostError::persistence(format!("write '{}': {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            BrandpostError::persistence(format!("replace '{}': {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "layout document saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
