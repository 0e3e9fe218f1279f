//! Flat key/value configuration store
//!
//! A single JSON document holding string settings (API credentials, model
//! override, etc.). Writes are whole-document, last-writer-wins: callers
//! must serialize their own updates, there is no cross-process locking.

use crate::config::Workspace;
use crate::error::{GenesisError, GenesisResult};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Store key for the generation service credential
pub const KEY_API_KEY: &str = "api_key";
/// Store key for the generation service base URL override
pub const KEY_API_BASE: &str = "api_base";
/// Store key for the model identifier override
pub const KEY_MODEL: &str = "model";
/// Store key for the publish credential
pub const KEY_GITHUB_TOKEN: &str = "github_token";

/// Model used when the store has no override
pub const DEFAULT_MODEL: &str = "gpt-4";

/// The flat key/value config document
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Store {
    /// Load the store, empty if the document does not exist yet
    pub async fn load(workspace: &Workspace) -> GenesisResult<Self> {
        let path = workspace.store_path();

        if !path.exists() {
            debug!("Config store not found, starting empty");
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| GenesisError::io(format!("reading config store {}", path.display()), e))?;

        let values =
            serde_json::from_str(&content).map_err(|e| GenesisError::ConfigInvalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { path, values })
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The stored model identifier, or the default
    pub fn model(&self) -> &str {
        self.get(KEY_MODEL).unwrap_or(DEFAULT_MODEL)
    }

    /// Set a value in memory; call [`Store::save`] to persist
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a value, returning whether it was present
    pub fn unset(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Iterate over all entries
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Persist the whole document (last writer wins)
    pub async fn save(&self) -> GenesisResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GenesisError::io("creating config directory", e))?;
        }

        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content).await.map_err(|e| {
            GenesisError::io(format!("writing config store {}", self.path.display()), e)
        })?;

        Ok(())
    }

    /// The document path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
