//! Completion-service client abstraction.
//!
//! The engine only needs one call: fold the assembled knowledge context into
//! a system prompt and get an answer back. Any failure (transport error,
//! non-2xx, empty content) is reported as an error and recovered upstream by
//! the deterministic fallback.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod external;

pub use external::ExternalProvider;

/// Supported external API providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiProvider {
    OpenAi,
    OpenRouter,
    Ollama,
    Custom { endpoint: String },
}

impl ApiProvider {
    pub fn is_local(&self) -> bool {
        matches!(self, ApiProvider::Ollama)
    }
}

/// Sampling parameters for completion calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 700,
            temperature: 0.3,
            top_p: 0.9,
        }
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Answer the question given a system prompt carrying the assembled
    /// knowledge context. Empty content is an error, never an empty `Ok`.
    async fn complete(&self, system_prompt: &str, question: &str) -> Result<String>;

    /// Tag reported back to the consumer as the answer's `model` field.
    fn model_tag(&self) -> &str;
}
