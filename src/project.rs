//! Project descriptors
//!
//! Every instantiated or generated project carries a `genesis.json` in its
//! root recording where it came from and what kind of project it is.
//! Downstream tooling classifies projects from this file without touching
//! the blueprint cache.

use crate::error::{GenesisError, GenesisResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Descriptor file name inside a project root
pub const DESCRIPTOR_FILE: &str = "genesis.json";

/// How the project came to exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ProjectSource {
    /// Instantiated from a cached blueprint
    Template { id: String, name: String },
    /// Generated from a build request
    Prompt { request: String },
}

/// Metadata record written into every project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    #[serde(flatten)]
    pub origin: ProjectSource,

    /// Declared project type ("web", "ai", "generated", ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ProjectDescriptor {
    /// Descriptor for a blueprint instantiation
    pub fn from_template(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            origin: ProjectSource::Template {
                id: id.into(),
                name: name.into(),
            },
            kind: kind.into(),
            created_at: Utc::now(),
        }
    }

    /// Descriptor for a generated project
    pub fn from_prompt(request: impl Into<String>) -> Self {
        Self {
            origin: ProjectSource::Prompt {
                request: request.into(),
            },
            kind: "generated".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Write the descriptor into a project root
    pub async fn write(&self, project_dir: &Path) -> GenesisResult<()> {
        let path = project_dir.join(DESCRIPTOR_FILE);
        let content = serde_json::to_string_pretty(self)?;

        fs::write(&path, content)
            .await
            .map_err(|e| GenesisError::io(format!("writing descriptor {}", path.display()), e))
    }

    /// Read a project's descriptor, `None` if absent or unreadable
    pub async fn read(project_dir: &Path) -> Option<Self> {
        let content = fs::read_to_string(project_dir.join(DESCRIPTOR_FILE)).await.ok()?;
        serde_json::from_str(&content).ok()
    }
}

/// A directory found under the projects root
#[derive(Debug)]
pub struct ProjectInfo {
    pub name: String,
    pub descriptor: Option<ProjectDescriptor>,
}

/// Turn a human-entered name into a directory-safe slug
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// List project directories under `root`, newest descriptor first
pub async fn list_projects(root: &Path) -> GenesisResult<Vec<ProjectInfo>> {
    if !root.exists() {
        return Ok(vec![]);
    }

    let mut projects = vec![];
    let mut entries = fs::read_dir(root)
        .await
        .map_err(|e| GenesisError::io("reading projects directory", e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| GenesisError::io("reading projects entry", e))?
    {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let descriptor = ProjectDescriptor::read(&path).await;
        if descriptor.is_none() && !path.join(DESCRIPTOR_FILE).exists() {
            // Not a genesis project, skip silently
            continue;
        }

        projects.push(ProjectInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            descriptor,
        });
    }

    projects.sort_by(|a, b| {
        let at = a.descriptor.as_ref().map(|d| d.created_at);
        let bt = b.descriptor.as_ref().map(|d| d.created_at);
        bt.cmp(&at)
    });

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("Acme Corp"), "acme_corp");
        assert_eq!(slugify("  My  App!  "), "my_app");
        assert_eq!(slugify("already_slugged"), "already_slugged");
        assert_eq!(slugify("Émile's café"), "émile_s_café");
    }

    #[tokio::test]
    async fn descriptor_roundtrip() {
        let temp = TempDir::new().unwrap();

        let descriptor =
            ProjectDescriptor::from_template("fastapi-starter", "FastAPI Starter", "ai");
        descriptor.write(temp.path()).await.unwrap();

        let loaded = ProjectDescriptor::read(temp.path()).await.unwrap();
        assert_eq!(loaded, descriptor);
        assert_eq!(loaded.kind, "ai");
    }

    #[tokio::test]
    async fn prompt_descriptor_kind() {
        let descriptor = ProjectDescriptor::from_prompt("a todo api");
        assert_eq!(descriptor.kind, "generated");
        assert!(matches!(descriptor.origin, ProjectSource::Prompt { .. }));
    }

    #[tokio::test]
    async fn list_skips_non_projects() {
        let temp = TempDir::new().unwrap();

        let with_descriptor = temp.path().join("acme");
        std::fs::create_dir_all(&with_descriptor).unwrap();
        ProjectDescriptor::from_prompt("x")
            .write(&with_descriptor)
            .await
            .unwrap();

        std::fs::create_dir_all(temp.path().join("random_dir")).unwrap();
        std::fs::write(temp.path().join("loose_file.txt"), "x").unwrap();

        let projects = list_projects(temp.path()).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "acme");
    }

    #[tokio::test]
    async fn list_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let projects = list_projects(&temp.path().join("absent")).await.unwrap();
        assert!(projects.is_empty());
    }
}
