//! Live-data synthesizer: intent detection and templated answers over the
//! per-request campaign snapshot.

pub mod intent;
pub mod synthesizer;

pub use intent::{matches_data_intent, DataIntent};
pub use synthesizer::synthesize;
