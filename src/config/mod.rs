//! Configuration for Genesis
//!
//! A [`Workspace`] is constructed once at startup and passed into every
//! component; nothing below the CLI layer reads ambient location globals.

pub mod store;

pub use store::Store;

use crate::error::{GenesisError, GenesisResult};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default catalog location
pub const DEFAULT_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/genesis-dev/registry/main/templates.json";

/// Resolved locations for everything Genesis persists or creates.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Per-user configuration directory (config.json, manifest.json)
    config_dir: PathBuf,
    /// Blueprint clone cache, one subdirectory per template ID
    cache_dir: PathBuf,
    /// Directory new projects are created under
    projects_root: PathBuf,
    /// Catalog URL
    manifest_url: String,
}

impl Workspace {
    /// Resolve the default workspace: per-user config/state dirs and the
    /// current directory as the projects root.
    pub fn discover() -> GenesisResult<Self> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("genesis");

        let cache_dir = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("genesis")
            .join("cache");

        let projects_root = std::env::current_dir()
            .map_err(|e| GenesisError::io("getting current directory", e))?;

        Ok(Self {
            config_dir,
            cache_dir,
            projects_root,
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
        })
    }

    /// Root everything under one directory (used by tests)
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            cache_dir: root.join("cache"),
            projects_root: root.join("projects"),
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
        }
    }

    /// Override the catalog URL
    pub fn with_manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    /// Override the projects root
    pub fn with_projects_root(mut self, root: PathBuf) -> Self {
        self.projects_root = root;
        self
    }

    /// Path of the flat key/value config document
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Path of the persisted manifest copy
    pub fn manifest_path(&self) -> PathBuf {
        self.config_dir.join("manifest.json")
    }

    /// Blueprint clone cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Directory new projects are created under
    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    /// Catalog URL
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// Ensure the config and cache directories exist
    pub async fn ensure_dirs(&self) -> GenesisResult<()> {
        for dir in [&self.config_dir, &self.cache_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| GenesisError::DirCreate {
                    path: dir.clone(),
                    source: e,
                })?;
        }
        Ok(())
    }
}
