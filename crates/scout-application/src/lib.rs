//! Application layer for Scout.
//!
//! Use cases that drive the text-generation service: batch player analysis
//! and the conversational responder. Both read and write the process-wide
//! shared memory and an explicitly passed `SessionState`.

pub mod analysis;
pub mod chat;
pub mod prompts;

#[cfg(test)]
mod test_support;

pub use analysis::{AnalysisEvent, AnalysisOrchestrator, BatchOutcome};
pub use chat::ChatResponder;
pub use prompts::PromptBuilder;
