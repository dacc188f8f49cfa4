//! Deterministic Q&A engine over a curated marketing knowledge base.
//!
//! Given a free-text question, an immutable knowledge document, and an
//! optional snapshot of live campaign records, the engine produces a
//! markdown answer: live-data questions are synthesized from the snapshot,
//! knowledge questions are matched lexically against FAQs and routed to
//! topical document sections, and an optional external completion service
//! answers over the assembled context with the deterministic renderer as
//! its fallback.

pub mod config;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod live;
pub mod llm;
pub mod types;

// Re-export primary types for convenience
pub use config::{AnswerLimits, AssistConfig, CompletionConfig};
pub use engine::{Answer, AnswerEngine, AnswerSource};
pub use error::AssistError;
pub use knowledge::{assemble_context, load_document, match_question, render_fallback_answer};
pub use live::{matches_data_intent, synthesize, DataIntent};
pub use llm::{ApiProvider, CompletionProvider, ExternalProvider, GenerationConfig};
pub use types::{Campaign, Faq, KnowledgeDocument, MatchResult, MatchStrength, TopicTag};
