//! Conversational responder.
//!
//! Every reply is grounded in the shared memory, the current batch results
//! and the tail of the transcript. A failed call still yields a reply: the
//! chat must always produce an assistant turn.

use crate::prompts::{ChatPromptInput, PromptBuilder};
use scout_core::config::DEFAULT_TRANSCRIPT_WINDOW;
use scout_core::error::ScoutError;
use scout_core::generation::TextGenerator;
use scout_core::memory::SharedMemoryHandle;
use scout_core::session::{SessionState, TranscriptEntry};
use std::sync::Arc;

pub struct ChatResponder {
    generator: Arc<dyn TextGenerator>,
    memory: SharedMemoryHandle,
    prompts: PromptBuilder,
    transcript_window: usize,
}

impl ChatResponder {
    pub fn new(generator: Arc<dyn TextGenerator>, memory: SharedMemoryHandle) -> Self {
        Self {
            generator,
            memory,
            prompts: PromptBuilder::new(),
            transcript_window: DEFAULT_TRANSCRIPT_WINDOW,
        }
    }

    /// Number of trailing transcript entries included in each prompt.
    pub fn with_transcript_window(mut self, window: usize) -> Self {
        self.transcript_window = window;
        self
    }

    /// Builds the composite prompt and returns the generated text verbatim.
    ///
    /// Never fails: errors come back as `"Sorry, I encountered an error: <cause>"`.
    pub async fn respond(&self, state: &SessionState, message: &str) -> String {
        match self.try_respond(state, message).await {
            Ok(text) => text,
            Err(cause) => {
                let err = ScoutError::ResponderCallFailed {
                    cause: cause.clone(),
                };
                tracing::warn!("[Chat] {}", err);
                format!("Sorry, I encountered an error: {cause}")
            }
        }
    }

    /// Records the user's message, replies, and records the reply.
    ///
    /// The new message is already in the transcript when the prompt is built,
    /// so it counts toward the recent-history window.
    pub async fn handle_message(&self, state: &mut SessionState, message: &str) -> String {
        state.push_transcript(TranscriptEntry::user(message));
        let reply = self.respond(state, message).await;
        state.push_transcript(TranscriptEntry::assistant(reply.clone()));
        reply
    }

    async fn try_respond(&self, state: &SessionState, message: &str) -> Result<String, String> {
        let prompt = {
            let memory = self.memory.read().await;
            self.prompts
                .chat(&ChatPromptInput {
                    results: &state.analysis_results,
                    has_team_analysis: state.team_analysis.is_some(),
                    memory: &memory,
                    history: state.recent_transcript(self.transcript_window),
                    message,
                })
                .map_err(|e| e.to_string())?
        };

        tracing::debug!("[Chat] Prompt built ({} chars)", prompt.len());
        self.generator
            .generate(&prompt)
            .await
            .map_err(|e| e.to_string())
    }
}
