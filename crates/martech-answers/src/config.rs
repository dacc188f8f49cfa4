use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::llm::ApiProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistConfig {
    /// External completion service; `None` runs deterministic-fallback only.
    pub completion: Option<CompletionConfig>,
    pub limits: AnswerLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub provider: ApiProvider,
    pub api_key: String,
    pub model: String,
}

/// Caps on rendered output sizes. Defaults match the product templates;
/// raising them changes answer wording ("...and N more" boundaries).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerLimits {
    /// Max FAQs folded into an assembled context.
    pub context_faqs: usize,
    /// Max campaigns in a list answer.
    pub list_limit: usize,
    /// Campaigns shown under the "most recent" heading.
    pub recent_limit: usize,
    /// Max matches in a name-search answer.
    pub search_limit: usize,
}

impl Default for AnswerLimits {
    fn default() -> Self {
        Self {
            context_faqs: 3,
            list_limit: 10,
            recent_limit: 5,
            search_limit: 5,
        }
    }
}

impl AssistConfig {
    /// Validate config values, returning errors for clearly broken configurations.
    pub fn validate(&self) -> Result<(), String> {
        if self.limits.context_faqs == 0 {
            return Err("limits.context_faqs must be > 0".into());
        }
        if self.limits.list_limit == 0 {
            return Err("limits.list_limit must be > 0".into());
        }
        if self.limits.recent_limit == 0 {
            return Err("limits.recent_limit must be > 0".into());
        }
        if self.limits.search_limit == 0 {
            return Err("limits.search_limit must be > 0".into());
        }
        if let Some(completion) = &self.completion {
            if completion.model.is_empty() {
                return Err("completion.model must not be empty".into());
            }
            if completion.api_key.is_empty() && !completion.provider.is_local() {
                return Err("completion.api_key must not be empty for remote providers".into());
            }
        }
        Ok(())
    }

    /// Load config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        // Completion is opt-in: only configured when an API key is present in
        // the environment. Without it the engine answers deterministically.
        let completion = std::env::var("OPENAI_API_KEY").ok().map(|api_key| {
            CompletionConfig {
                provider: ApiProvider::OpenAi,
                api_key,
                model: std::env::var("COMPLETION_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            }
        });

        Self {
            completion,
            limits: AnswerLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_templates() {
        let limits = AnswerLimits::default();
        assert_eq!(limits.context_faqs, 3);
        assert_eq!(limits.list_limit, 10);
        assert_eq!(limits.recent_limit, 5);
        assert_eq!(limits.search_limit, 5);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut config = AssistConfig {
            completion: None,
            limits: AnswerLimits::default(),
        };
        config.limits.list_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn remote_provider_requires_api_key() {
        let config = AssistConfig {
            completion: Some(CompletionConfig {
                provider: ApiProvider::OpenAi,
                api_key: String::new(),
                model: "gpt-4o-mini".into(),
            }),
            limits: AnswerLimits::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn local_provider_allows_empty_key() {
        let config = AssistConfig {
            completion: Some(CompletionConfig {
                provider: ApiProvider::Ollama,
                api_key: String::new(),
                model: "llama3".into(),
            }),
            limits: AnswerLimits::default(),
        };
        assert!(config.validate().is_ok());
    }
}
