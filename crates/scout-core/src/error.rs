//! Error types for the Scout application.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Scout application.
///
/// Analysis failures are values, not faults: the orchestrator collects
/// `PlayerAnalysisFailed` and `TeamAnalysisFailed` into the batch outcome and
/// keeps going, and the responder turns `ResponderCallFailed` into a reply.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ScoutError {
    /// No API credential is configured for the text-generation service
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The text-generation call for a single player failed
    #[error("Analysis failed for player '{player_id}': {cause}")]
    PlayerAnalysisFailed { player_id: String, cause: String },

    /// The aggregate team-summary call failed
    #[error("Team analysis failed: {cause}")]
    TeamAnalysisFailed { cause: String },

    /// The chat call failed
    #[error("Responder call failed: {cause}")]
    ResponderCallFailed { cause: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScoutError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MissingCredential error
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::MissingCredential(message.into())
    }

    /// Creates a PlayerAnalysisFailed error
    pub fn player_analysis_failed(player_id: impl Into<String>, cause: impl ToString) -> Self {
        Self::PlayerAnalysisFailed {
            player_id: player_id.into(),
            cause: cause.to_string(),
        }
    }

    /// Creates a TeamAnalysisFailed error
    pub fn team_analysis_failed(cause: impl ToString) -> Self {
        Self::TeamAnalysisFailed {
            cause: cause.to_string(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a MissingCredential error
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }

    /// Check if this error came from a single player's analysis
    pub fn is_player_failure(&self) -> bool {
        matches!(self, Self::PlayerAnalysisFailed { .. })
    }

    /// Check if this error came from the team summary
    pub fn is_team_failure(&self) -> bool {
        matches!(self, Self::TeamAnalysisFailed { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ScoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ScoutError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at binary edges)
impl From<anyhow::Error> for ScoutError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ScoutError>`.
pub type Result<T> = std::result::Result<T, ScoutError>;
