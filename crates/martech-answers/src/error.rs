//! Error taxonomy for the answer engine.
//!
//! Only two failures ever cross the crate boundary: a missing knowledge
//! document and an empty question. Completion-service failures are recovered
//! internally by the deterministic fallback and a malformed live snapshot is
//! treated as "no live data", so neither appears here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    /// The knowledge document could not be loaded or parsed. The engine
    /// cannot run without it; maps to a 5xx at the HTTP boundary.
    #[error("knowledge document unavailable: {source}")]
    DocumentUnavailable {
        #[source]
        source: anyhow::Error,
    },

    /// The caller passed an empty or whitespace-only question.
    #[error("question must not be empty")]
    EmptyQuestion,
}
