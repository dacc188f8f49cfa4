//! Answer orchestration.
//!
//! Live-data questions are answered straight from the campaign snapshot.
//! Everything else goes through the knowledge matcher: the assembled context
//! is handed to the completion service when one is configured, and any
//! service failure falls back to the deterministic renderer. The user never
//! sees a raw service error.

use std::sync::Arc;

use crate::config::{AnswerLimits, AssistConfig};
use crate::error::AssistError;
use crate::knowledge::{assemble_context, match_question, render_fallback_answer};
use crate::live::{matches_data_intent, synthesize};
use crate::llm::{CompletionProvider, ExternalProvider};
use crate::types::{Campaign, KnowledgeDocument};

/// Tag for where an answer came from, relayed to the consumer as `model`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    /// Synthesized from the live campaign snapshot.
    LiveData,
    /// Verbatim completion-service answer, tagged with the model name.
    Completion(String),
    /// Deterministic knowledge-base renderer.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// Stateless per-request answer engine. The knowledge document is passed in
/// by the hosting layer, loaded once, and never mutated here.
pub struct AnswerEngine {
    document: KnowledgeDocument,
    provider: Option<Arc<dyn CompletionProvider>>,
    limits: AnswerLimits,
}

const SYSTEM_PROMPT_HEADER: &str = "You are a marketing data assistant for an internal team. \
Answer using only the internal knowledge below. Be concise and use markdown \
bullet points where it helps. If the knowledge does not cover the question, say so.";

impl AnswerEngine {
    pub fn new(document: KnowledgeDocument) -> Self {
        Self {
            document,
            provider: None,
            limits: AnswerLimits::default(),
        }
    }

    /// Build an engine from config: limits always apply, and a completion
    /// provider is attached when one is configured.
    pub fn from_config(document: KnowledgeDocument, config: &AssistConfig) -> Result<Self, String> {
        config.validate()?;
        let mut engine = Self::new(document).with_limits(config.limits.clone());
        if let Some(completion) = &config.completion {
            let provider = ExternalProvider::new(
                completion.provider.clone(),
                completion.api_key.clone(),
                completion.model.clone(),
            )
            .map_err(|e| format!("Failed to create completion provider: {}", e))?;
            engine = engine.with_provider(Arc::new(provider));
        }
        Ok(engine)
    }

    pub fn with_provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_limits(mut self, limits: AnswerLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn document(&self) -> &KnowledgeDocument {
        &self.document
    }

    /// Answer a question, optionally against a live campaign snapshot.
    pub async fn answer(
        &self,
        question: &str,
        live: Option<&[Campaign]>,
    ) -> Result<Answer, AssistError> {
        if question.trim().is_empty() {
            return Err(AssistError::EmptyQuestion);
        }

        // Live snapshot present and the question is clearly data-oriented:
        // the synthesizer answers directly, bypassing the knowledge path.
        let live_answer = live
            .filter(|records| !records.is_empty() && matches_data_intent(question))
            .and_then(|records| synthesize(question, records, &self.limits));

        if let Some(text) = live_answer {
            return Ok(self.finish_live(question, text).await);
        }

        Ok(self.finish_knowledge(question).await)
    }

    /// Deterministic mode returns the live answer as-is. With a completion
    /// service the live summary is folded into the knowledge context and the
    /// service's own answer is preferred when it succeeds.
    async fn finish_live(&self, question: &str, live_text: String) -> Answer {
        let Some(provider) = &self.provider else {
            return Answer {
                text: live_text,
                source: AnswerSource::LiveData,
            };
        };

        let result = match_question(question, &self.document);
        let knowledge = assemble_context(question, &self.document, &result, self.limits.context_faqs);
        let context = format!("{}\n\nLive campaign data:\n{}", knowledge, live_text);

        match self.complete(provider.as_ref(), &context, question).await {
            Some(text) => Answer {
                text,
                source: AnswerSource::Completion(provider.model_tag().to_string()),
            },
            None => Answer {
                text: live_text,
                source: AnswerSource::LiveData,
            },
        }
    }

    async fn finish_knowledge(&self, question: &str) -> Answer {
        let result = match_question(question, &self.document);

        if let Some(provider) = &self.provider {
            let context =
                assemble_context(question, &self.document, &result, self.limits.context_faqs);
            if let Some(text) = self.complete(provider.as_ref(), &context, question).await {
                return Answer {
                    text,
                    source: AnswerSource::Completion(provider.model_tag().to_string()),
                };
            }
        }

        Answer {
            text: render_fallback_answer(question, &self.document, &result),
            source: AnswerSource::Fallback,
        }
    }

    /// One completion attempt; no retries. Errors and empty content are
    /// logged and reported as `None` so callers fall back deterministically.
    async fn complete(
        &self,
        provider: &dyn CompletionProvider,
        context: &str,
        question: &str,
    ) -> Option<String> {
        let system_prompt = format!("{}\n\n{}", SYSTEM_PROMPT_HEADER, context);
        match provider.complete(&system_prompt, question).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                tracing::warn!("Completion service returned empty content, using fallback");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Completion service failed, using fallback");
                None
            }
        }
    }
}
