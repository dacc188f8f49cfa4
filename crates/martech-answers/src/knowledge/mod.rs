//! Knowledge matcher: FAQ scoring, topic routing, context assembly, and the
//! deterministic fallback renderer over the curated knowledge document.

pub mod context;
pub mod fallback;
pub mod loader;
pub mod matcher;

pub use context::{assemble_context, render_full_document};
pub use fallback::render_fallback_answer;
pub use loader::load_document;
pub use matcher::{find_best_faq, match_question, route_topics, significant_tokens};
