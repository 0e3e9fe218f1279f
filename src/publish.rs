//! Publishing a project to a remote hosting platform
//!
//! Creates a private repository over the platform API, then drives git as
//! an opaque external command for the init/commit/push sequence. The
//! build orchestrator treats publish failures as non-fatal: the project
//! stays on disk either way.

use crate::error::{GenesisError, GenesisResult};
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Default hosting platform API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Deserialize)]
struct RemoteRepo {
    html_url: String,
    clone_url: String,
}

/// Creates remote repositories and pushes the initial commit
pub struct Publisher {
    token: String,
    api_url: String,
}

impl Publisher {
    /// Publisher against the default platform API
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Publisher against a custom API endpoint
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: api_url.into(),
        }
    }

    /// Create a private remote repository and push `project_dir` to it.
    ///
    /// Returns the repository's browsable URL.
    pub async fn publish(&self, project_dir: &Path, repo_name: &str) -> GenesisResult<String> {
        let repo = self.create_remote_repo(repo_name).await?;
        info!("Created remote repository {}", repo.html_url);

        for args in [
            vec!["init"],
            vec!["add", "."],
            vec!["commit", "-m", "Initial commit"],
            vec!["branch", "-M", "main"],
            vec!["remote", "add", "origin", repo.clone_url.as_str()],
            vec!["push", "-u", "origin", "main"],
        ] {
            run_git(project_dir, &args).await?;
        }

        Ok(repo.html_url)
    }

    async fn create_remote_repo(&self, name: &str) -> GenesisResult<RemoteRepo> {
        let url = format!("{}/user/repos", self.api_url);
        let auth = format!("Bearer {}", self.token);
        let payload = serde_json::json!({ "name": name, "private": true });

        debug!("Creating remote repository '{}'", name);

        let result = tokio::task::spawn_blocking(move || {
            ureq::post(url.as_str())
                .header("Authorization", auth.as_str())
                .header("Accept", "application/vnd.github+json")
                .header("User-Agent", "genesis-cli")
                .send_json(&payload)
                .and_then(|mut response| response.body_mut().read_json::<RemoteRepo>())
        })
        .await
        .map_err(|e| GenesisError::Publish(format!("request task failed: {e}")))?;

        match result {
            Ok(repo) => Ok(repo),
            Err(ureq::Error::StatusCode(401 | 403)) => Err(GenesisError::PublishAuth),
            Err(e) => Err(GenesisError::Publish(e.to_string())),
        }
    }
}

/// Run one git command inside the project directory
async fn run_git(project_dir: &Path, args: &[&str]) -> GenesisResult<()> {
    debug!("Executing: git {:?}", args);

    let output = Command::new("git")
        .args(args)
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| GenesisError::command_failed(format!("git {args:?}"), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GenesisError::Publish(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&"?"),
            stderr.trim()
        )));
    }

    Ok(())
}
