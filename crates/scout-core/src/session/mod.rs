//! Session domain module.
//!
//! A session is one interactive user connection. Its state is an explicit
//! value handed to every handler; nothing here is global.
//!
//! # Module Structure
//!
//! - `message`: transcript types (`MessageRole`, `TranscriptEntry`)
//! - `state`: per-session selection, analysis results and transcript

mod message;
mod state;

pub use message::{MessageRole, TranscriptEntry};
pub use state::{ActiveTab, AnalysisResult, SessionState};
