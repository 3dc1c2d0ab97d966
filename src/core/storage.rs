//! Key/value persistence for the document registry
//!
//! The registry is stored as one JSON array under [`DOCUMENTS_KEY`] and
//! overwritten in full on every change. Last writer wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::document::DocumentRecord;

/// Storage key holding the serialized document list
pub const DOCUMENTS_KEY: &str = "documents";

/// String key/value store
pub trait Storage {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage kept in process memory
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Move an existing item that is not valid JSON to `<key>.json.corrupt`
    fn set_aside_unreadable(&self, path: &Path) -> Result<()> {
        let Ok(existing) = fs::read_to_string(path) else {
            return Ok(());
        };
        if serde_json::from_str::<serde_json::Value>(&existing).is_ok() {
            return Ok(());
        }

        let corrupt = path.with_extension("json.corrupt");
        fs::rename(path, &corrupt)
            .with_context(|| format!("Failed to set aside storage file: {}", path.display()))?;
        tracing::warn!("Moved unreadable storage file to {}", corrupt.display());
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read storage file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create storage directory: {}", self.dir.display()))?;

        let path = self.item_path(key);
        self.set_aside_unreadable(&path)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .with_context(|| format!("Failed to write storage file: {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace storage file: {}", path.display()))?;
        Ok(())
    }
}

/// Load the stored document list
///
/// Read and parse failures are logged and yield an empty list.
pub fn load_documents(storage: &dyn Storage) -> Vec<DocumentRecord> {
    let raw = match storage.get_item(DOCUMENTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read stored documents: {:#}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(documents) => documents,
        Err(e) => {
            tracing::warn!("Ignoring unreadable stored documents: {}", e);
            Vec::new()
        }
    }
}

/// Overwrite the stored document list
pub fn save_documents(storage: &mut dyn Storage, documents: &[DocumentRecord]) -> Result<()> {
    let content = serde_json::to_string(documents)?;
    storage.set_item(DOCUMENTS_KEY, &content)?;
    tracing::info!("Saved {} documents", documents.len());
    Ok(())
}
