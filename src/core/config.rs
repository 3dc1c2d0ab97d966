//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::hash::HashInput;

const MAX_RECENT_DOCUMENTS: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the document store
    pub data_dir: Option<PathBuf>,
    /// Directory receiving copies of uploaded files
    pub uploads_dir: Option<PathBuf>,
    /// Author used when an upload does not name one
    pub default_author: Option<String>,
    /// Registry settings
    pub registry: RegistryConfig,
    /// Recently touched document ids, most recent first
    pub recent_documents: Vec<String>,
}

/// Registry-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// What a version digest is computed over
    pub hash_input: HashInput,
    /// Copy uploaded files into the uploads directory
    pub save_uploads: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            hash_input: HashInput::Content,
            save_uploads: true,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "ddocs", "DDocs")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Write `recent` into the platform config file, keeping its other settings
    pub fn save_recent(recent: &[String]) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::save_recent_to(&path, recent)
    }

    /// Write `recent` into the config at `path`
    ///
    /// A config file that fails to load is left untouched.
    pub fn save_recent_to(path: &Path, recent: &[String]) -> Result<()> {
        let mut config = Self::load_from(path)
            .with_context(|| format!("Not updating unreadable config: {}", path.display()))?;
        config.recent_documents = recent.to_vec();
        config.save_to(path)
    }

    /// Add a document to recent documents
    pub fn add_recent_document(&mut self, id: &str) {
        self.recent_documents.retain(|d| d != id);
        self.recent_documents.insert(0, id.to_string());
        self.recent_documents.truncate(MAX_RECENT_DOCUMENTS);
    }

    /// Get the document store directory
    pub fn get_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("ddocs-data"))
        })
    }

    /// Get the uploads directory
    pub fn get_uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| self.get_data_dir().join("uploads"))
    }
}
