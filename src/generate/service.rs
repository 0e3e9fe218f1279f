//! Generation service client
//!
//! The external code-generation service is reached through the
//! [`GenerationService`] trait so the planner and executor can be tested
//! against fakes. The default implementation speaks the OpenAI-compatible
//! chat-completions protocol.

use crate::config::store::{Store, KEY_API_BASE, KEY_API_KEY};
use crate::error::{GenesisError, GenesisResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str =
    "You are a senior software engineer. Produce complete, working output with no commentary.";

/// A single logical request to the external generation service
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate text for `instruction` using `model`.
    ///
    /// A throttled call must surface as [`GenesisError::QuotaExceeded`] so
    /// the retry controller can distinguish it from permanent failures.
    async fn generate(&self, model: &str, instruction: &str) -> GenesisResult<String>;
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Chat-completions client for the generation service
pub struct OpenAiService {
    api_key: String,
    base_url: String,
}

impl OpenAiService {
    /// Client against the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    /// Client against a custom endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Build a client from the config store's credential and overrides
    pub fn from_store(store: &Store) -> GenesisResult<Self> {
        let api_key = store.get(KEY_API_KEY).ok_or(GenesisError::ApiKeyMissing)?;
        let base_url = store.get(KEY_API_BASE).unwrap_or(DEFAULT_API_BASE);
        Ok(Self::with_base_url(api_key, base_url))
    }
}

#[async_trait]
impl GenerationService for OpenAiService {
    async fn generate(&self, model: &str, instruction: &str) -> GenesisResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let auth = format!("Bearer {}", self.api_key);
        let payload = serde_json::json!({
            "model": model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": instruction},
            ],
        });

        debug!("Generation request ({} chars) to {}", instruction.len(), url);

        // No explicit timeout here: long generations are expected, and the
        // retry controller bounds the overall attempt count.
        let result = tokio::task::spawn_blocking(move || {
            ureq::post(url.as_str())
                .header("Authorization", auth.as_str())
                .send_json(&payload)
                .and_then(|mut response| response.body_mut().read_json::<ChatResponse>())
        })
        .await
        .map_err(|e| GenesisError::Service(format!("request task failed: {e}")))?;

        match result {
            Ok(response) => response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| GenesisError::Service("empty completion response".to_string())),
            Err(ureq::Error::StatusCode(429)) => Err(GenesisError::QuotaExceeded),
            Err(e) => Err(GenesisError::Service(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Workspace;
    use tempfile::TempDir;

    #[tokio::test]
    async fn from_store_requires_api_key() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::with_root(temp.path());

        let store = Store::load(&ws).await.unwrap();
        let result = OpenAiService::from_store(&store);
        assert!(matches!(result, Err(GenesisError::ApiKeyMissing)));
    }

    #[tokio::test]
    async fn from_store_honors_base_override() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::with_root(temp.path());

        let mut store = Store::load(&ws).await.unwrap();
        store.set(KEY_API_KEY, "sk-test");
        store.set(KEY_API_BASE, "http://localhost:8080/v1");

        let service = OpenAiService::from_store(&store).unwrap();
        assert_eq!(service.base_url, "http://localhost:8080/v1");
    }
}
