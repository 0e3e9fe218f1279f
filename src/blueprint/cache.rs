//! Clone cache and blueprint sources

use crate::blueprint::copy::copy_tree;
use crate::config::Workspace;
use crate::error::{GenesisError, GenesisResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

/// Where blueprint trees come from
///
/// The default implementation shells out to `git clone`; tests substitute
/// a fake so cache behavior is observable without network access.
#[async_trait]
pub trait BlueprintSource: Send + Sync {
    /// Materialize the tree at `url` into `dest`
    async fn fetch(&self, url: &str, dest: &Path) -> GenesisResult<()>;
}

/// Fetches blueprints with `git clone`
pub struct GitSource;

#[async_trait]
impl BlueprintSource for GitSource {
    async fn fetch(&self, url: &str, dest: &Path) -> GenesisResult<()> {
        debug!("Cloning {} into {}", url, dest.display());

        let output = Command::new("git")
            .args(["clone", "--quiet", url])
            .arg(dest)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| GenesisError::command_failed(format!("git clone {url}"), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenesisError::command_exec(
                format!("git clone {url}"),
                stderr.trim(),
            ));
        }

        Ok(())
    }
}

/// Local mirror of blueprint source trees, one entry per template ID
pub struct CloneCache {
    cache_dir: PathBuf,
    source: Box<dyn BlueprintSource>,
}

impl CloneCache {
    /// Cache over the workspace's cache directory, cloning with git
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            cache_dir: workspace.cache_dir().to_path_buf(),
            source: Box::new(GitSource),
        }
    }

    /// Cache with a custom source (used by tests)
    pub fn with_source(cache_dir: PathBuf, source: Box<dyn BlueprintSource>) -> Self {
        Self { cache_dir, source }
    }

    /// The on-disk location of a template's cache entry
    pub fn entry_path(&self, template_id: &str) -> PathBuf {
        self.cache_dir.join(template_id)
    }

    /// Ensure a local copy of the blueprint exists and return its path.
    ///
    /// An existing entry is returned untouched regardless of `url` — the
    /// cache never refreshes. A failed fetch removes the partial entry so
    /// a later invocation can retry.
    pub async fn ensure_cached(&self, template_id: &str, url: &str) -> GenesisResult<PathBuf> {
        let entry = self.entry_path(template_id);

        if entry.exists() {
            debug!("Cache hit for blueprint {}", template_id);
            return Ok(entry);
        }

        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| GenesisError::io("creating cache directory", e))?;

        info!("Downloading blueprint {} to cache", template_id);
        if let Err(e) = self.source.fetch(url, &entry).await {
            let _ = fs::remove_dir_all(&entry).await;
            return Err(GenesisError::CloneFailed {
                template: template_id.to_string(),
                reason: e.to_string(),
            });
        }

        Ok(entry)
    }

    /// Copy the cached tree into `dest`, excluding version-control
    /// metadata.
    ///
    /// Fails before touching anything if `dest` already exists or the
    /// cache entry is missing.
    pub async fn instantiate(&self, template_id: &str, dest: &Path) -> GenesisResult<()> {
        if dest.exists() {
            return Err(GenesisError::ProjectExists(dest.to_path_buf()));
        }

        let entry = self.entry_path(template_id);
        if !entry.exists() {
            return Err(GenesisError::CacheMissing(template_id.to_string()));
        }

        let dest_buf = dest.to_path_buf();
        let dest_for_err = dest_buf.clone();
        tokio::task::spawn_blocking(move || copy_tree(&entry, &dest_buf))
            .await
            .map_err(|e| GenesisError::User(format!("copy task failed: {e}")))?
            .map_err(|e| {
                GenesisError::io(
                    format!("copying blueprint into {}", dest_for_err.display()),
                    e,
                )
            })?;

        Ok(())
    }
}
