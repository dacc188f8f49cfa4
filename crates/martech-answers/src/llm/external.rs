//! External API provider for OpenAI-compatible chat-completion endpoints.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{ApiProvider, CompletionProvider, GenerationConfig};

pub struct ExternalProvider {
    provider: ApiProvider,
    api_key: String,
    model: String,
    config: GenerationConfig,
    client: Client,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ExternalProvider {
    pub fn new(provider: ApiProvider, api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(15))
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        tracing::info!(provider = ?provider, model = %model, "Creating ExternalProvider");

        Ok(Self {
            provider,
            api_key,
            model,
            config: GenerationConfig::default(),
            client,
        })
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    fn endpoint(&self) -> String {
        match &self.provider {
            ApiProvider::OpenAi => "https://api.openai.com/v1/chat/completions".to_string(),
            ApiProvider::OpenRouter => "https://openrouter.ai/api/v1/chat/completions".to_string(),
            ApiProvider::Ollama => "http://localhost:11434/v1/chat/completions".to_string(),
            ApiProvider::Custom { endpoint } => endpoint.clone(),
        }
    }

    /// Parse a response body as JSON, returning a clear error if the server
    /// returned HTML (e.g. a gateway error page) instead of valid JSON.
    async fn parse_json_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body from {}: {}", endpoint, e))?;

        let trimmed = body.trim_start();
        if trimmed.starts_with('<') || trimmed.starts_with("<!") {
            let preview: String = trimmed.chars().take(200).collect();
            return Err(anyhow!(
                "Endpoint {} returned HTML instead of JSON (HTTP {}): {}",
                endpoint,
                status,
                preview
            ));
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let preview: String = body.chars().take(300).collect();
            anyhow!(
                "Failed to parse JSON from {} (HTTP {}): {}. Response body: {}",
                endpoint,
                status,
                e,
                preview
            )
        })
    }
}

#[async_trait]
impl CompletionProvider for ExternalProvider {
    async fn complete(&self, system_prompt: &str, question: &str) -> Result<String> {
        let endpoint = self.endpoint();
        tracing::debug!(
            endpoint = %endpoint,
            model = %self.model,
            prompt_len = system_prompt.len(),
            "Sending chat-completion request"
        );

        let request = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": question}
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "top_p": self.config.top_p,
            "stream": false
        });

        let response = self
            .client
            .post(&endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("Request to {} timed out", endpoint)
                } else if e.is_connect() {
                    anyhow!("Failed to connect to {}: {}", endpoint, e)
                } else {
                    anyhow!("Request to {} failed: {}", endpoint, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error = response.text().await.unwrap_or_default();
            tracing::error!(endpoint = %endpoint, status = %status, error = %error, "API returned error");
            return Err(anyhow!("API error ({}): {}", status, error));
        }

        let result: ChatCompletionResponse = Self::parse_json_response(response, &endpoint).await?;

        let content = result
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        if content.is_empty() {
            return Err(anyhow!("Completion returned no content"));
        }

        tracing::debug!("Completion received, {} chars", content.len());
        Ok(content)
    }

    fn model_tag(&self) -> &str {
        &self.model
    }
}
