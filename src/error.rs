//! Error types for Genesis
//!
//! All modules use `GenesisResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Genesis operations
pub type GenesisResult<T> = Result<T, GenesisError>;

/// All errors that can occur in Genesis
#[derive(Error, Debug)]
pub enum GenesisError {
    // Catalog errors
    #[error("Template not found in catalog: {0}")]
    TemplateNotFound(String),

    #[error("Manifest fetch failed: {0}")]
    ManifestFetch(String),

    // Blueprint cache errors
    #[error("Cloning blueprint {template} failed: {reason}")]
    CloneFailed { template: String, reason: String },

    #[error("No cached copy of blueprint: {0}")]
    CacheMissing(String),

    // Project errors
    #[error("Project already exists: {0}")]
    ProjectExists(PathBuf),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    // Generation service errors
    #[error("Generation API key not configured")]
    ApiKeyMissing,

    #[error("Generation service rate limit hit")]
    QuotaExceeded,

    #[error("Generation quota exhausted after {attempts} attempts")]
    QuotaExhausted { attempts: u32 },

    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Planning failed: {0}")]
    Planning(String),

    // Publish errors
    #[error("Publish credential missing or rejected")]
    PublishAuth,

    #[error("Publish failed: {0}")]
    Publish(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create directory {path}: {source}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl GenesisError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether this is the generation service's throttle signal
    pub fn is_quota_signal(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::TemplateNotFound(_) => Some("Run: genesis sync"),
            Self::ApiKeyMissing => Some("Run: genesis config set api_key <KEY>"),
            Self::PublishAuth => Some("Run: genesis config set github_token <TOKEN>"),
            Self::QuotaExhausted { .. } => {
                Some("The generation service is throttling; try again later")
            }
            Self::ProjectExists(_) => Some("Pick a different project name or remove the directory"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GenesisError::TemplateNotFound("fastapi-starter".to_string());
        assert!(err.to_string().contains("fastapi-starter"));
    }

    #[test]
    fn error_hint() {
        let err = GenesisError::ApiKeyMissing;
        assert_eq!(err.hint(), Some("Run: genesis config set api_key <KEY>"));
    }

    #[test]
    fn quota_signal() {
        assert!(GenesisError::QuotaExceeded.is_quota_signal());
        assert!(!GenesisError::QuotaExhausted { attempts: 5 }.is_quota_signal());
        assert!(!GenesisError::ApiKeyMissing.is_quota_signal());
    }

    #[test]
    fn phase_named_in_message() {
        let err = GenesisError::CloneFailed {
            template: "nextjs-saas".to_string(),
            reason: "network unreachable".to_string(),
        };
        assert!(err.to_string().contains("Cloning"));

        let err = GenesisError::Planning("not a JSON array".to_string());
        assert!(err.to_string().contains("Planning"));

        let err = GenesisError::Publish("push rejected".to_string());
        assert!(err.to_string().contains("Publish"));
    }
}
