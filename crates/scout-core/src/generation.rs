//! Text-generation service seam.
//!
//! The analysis and chat use cases only need "prompt in, text out". Concrete
//! vendors live in `scout-interaction`; tests plug in scripted generators.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a text-generation backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request never produced an HTTP response (connect, timeout, TLS...)
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The service answered but returned no text
    #[error("no text in response")]
    EmptyResponse,

    /// The response body could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A service that turns a prompt into plain text.
///
/// Implementations make exactly one upstream call per `generate` and never
/// retry; callers decide what a failure means for their unit of work.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a full text completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}
