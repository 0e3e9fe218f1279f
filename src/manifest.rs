//! Template catalog synchronization
//!
//! The catalog of available blueprints lives at a remote URL. `sync`
//! mirrors it into the workspace and degrades gracefully: commands that
//! list or clone templates keep working offline after one successful sync.

use crate::config::Workspace;
use crate::error::{GenesisError, GenesisResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

/// Timeout for the catalog fetch
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One blueprint in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Project type the blueprint produces (e.g. "web", "ai")
    #[serde(rename = "type")]
    pub kind: String,
    /// Clonable source location
    pub url: String,
}

/// Catalog keyed by template ID
pub type TemplateManifest = BTreeMap<String, TemplateEntry>;

/// Parse a catalog document, skipping entries that do not validate.
///
/// Fails only if the document itself is not a JSON object.
pub fn parse_manifest(body: &str) -> GenesisResult<TemplateManifest> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| GenesisError::ManifestFetch(format!("malformed catalog document: {e}")))?;

    let mut manifest = TemplateManifest::new();
    for (id, value) in raw {
        match serde_json::from_value::<TemplateEntry>(value) {
            Ok(entry) => {
                manifest.insert(id, entry);
            }
            Err(e) => warn!("Skipping malformed catalog entry '{}': {}", id, e),
        }
    }

    Ok(manifest)
}

/// Fetches the catalog and keeps a local mirror of the last good copy
pub struct Synchronizer {
    url: String,
    manifest_path: PathBuf,
}

impl Synchronizer {
    /// Create a synchronizer for the workspace's catalog URL
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            url: workspace.manifest_url().to_string(),
            manifest_path: workspace.manifest_path(),
        }
    }

    /// Refresh the catalog, returning the best available data.
    ///
    /// Never fails: a fetch or parse problem falls back to the last
    /// persisted copy, and with no persisted copy the catalog is empty.
    pub async fn sync(&self) -> TemplateManifest {
        match self.fetch_remote().await {
            Ok((body, manifest)) => {
                if let Err(e) = self.persist(&body).await {
                    warn!("Failed to persist catalog: {}", e);
                }
                manifest
            }
            Err(e) => {
                debug!("Catalog fetch failed ({}), using local copy", e);
                self.load_cached().await.unwrap_or_default()
            }
        }
    }

    /// GET the remote document with a short timeout
    async fn fetch_remote(&self) -> GenesisResult<(String, TemplateManifest)> {
        let url = self.url.clone();

        let body = tokio::task::spawn_blocking(move || -> GenesisResult<String> {
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .timeout_global(Some(FETCH_TIMEOUT))
                .build()
                .into();

            let mut response = agent
                .get(url.as_str())
                .call()
                .map_err(|e| GenesisError::ManifestFetch(e.to_string()))?;

            response
                .body_mut()
                .read_to_string()
                .map_err(|e| GenesisError::ManifestFetch(e.to_string()))
        })
        .await
        .map_err(|e| GenesisError::ManifestFetch(format!("fetch task failed: {e}")))??;

        let manifest = parse_manifest(&body)?;
        Ok((body, manifest))
    }

    /// Persist the fetched document verbatim
    async fn persist(&self, body: &str) -> GenesisResult<()> {
        if let Some(parent) = self.manifest_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GenesisError::io("creating config directory", e))?;
        }

        fs::write(&self.manifest_path, body).await.map_err(|e| {
            GenesisError::io(
                format!("writing manifest {}", self.manifest_path.display()),
                e,
            )
        })
    }

    /// Load the last persisted copy, if any
    async fn load_cached(&self) -> Option<TemplateManifest> {
        let content = fs::read_to_string(&self.manifest_path).await.ok()?;
        parse_manifest(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"{
        "fastapi-starter": {
            "name": "FastAPI Starter",
            "description": "REST API with auth",
            "type": "ai",
            "url": "https://example.com/fastapi-starter.git"
        },
        "nextjs-saas": {
            "name": "Next.js SaaS",
            "description": "SaaS boilerplate",
            "type": "web",
            "url": "https://example.com/nextjs-saas.git"
        }
    }"#;

    // Points at a closed local port so fetch fails fast
    fn offline_workspace(temp: &TempDir) -> Workspace {
        Workspace::with_root(temp.path()).with_manifest_url("http://127.0.0.1:1/templates.json")
    }

    #[test]
    fn parse_valid_catalog() {
        let manifest = parse_manifest(CATALOG).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest["fastapi-starter"].kind, "ai");
        assert_eq!(manifest["nextjs-saas"].name, "Next.js SaaS");
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let body = r#"{
            "good": {"name": "Good", "description": "d", "type": "web", "url": "u"},
            "bad": {"name": "Missing fields"}
        }"#;

        let manifest = parse_manifest(body).unwrap();
        assert_eq!(manifest.len(), 1);
        assert!(manifest.contains_key("good"));
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(parse_manifest("[1, 2, 3]").is_err());
        assert!(parse_manifest("not json").is_err());
    }

    #[tokio::test]
    async fn sync_falls_back_to_persisted_copy() {
        let temp = TempDir::new().unwrap();
        let ws = offline_workspace(&temp);

        std::fs::create_dir_all(temp.path().join("config")).unwrap();
        std::fs::write(ws.manifest_path(), CATALOG).unwrap();

        let manifest = Synchronizer::new(&ws).sync().await;
        assert_eq!(manifest, parse_manifest(CATALOG).unwrap());
    }

    #[tokio::test]
    async fn sync_empty_without_network_or_cache() {
        let temp = TempDir::new().unwrap();
        let ws = offline_workspace(&temp);

        let manifest = Synchronizer::new(&ws).sync().await;
        assert!(manifest.is_empty());
    }

    #[tokio::test]
    async fn persist_writes_body_verbatim() {
        let temp = TempDir::new().unwrap();
        let ws = offline_workspace(&temp);

        let sync = Synchronizer::new(&ws);
        sync.persist(CATALOG).await.unwrap();

        let on_disk = std::fs::read_to_string(ws.manifest_path()).unwrap();
        assert_eq!(on_disk, CATALOG);
    }
}
