//! Scripted text generator shared by the use-case tests.

use async_trait::async_trait;
use scout_core::generation::{GenerationError, TextGenerator};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued results in order and records every prompt it receives.
///
/// When the queue runs dry it answers with `"reply #<n>"`.
#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(results: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("reply #{call}")))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
