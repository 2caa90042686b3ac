//! Configuration models.
//!
//! `AppConfig` is read from `config.toml`; `SecretConfig` from `secret.json`.
//! Every field has a default so a missing or partial file still loads.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_DATASET_PATH: &str = "data.json";
pub const DEFAULT_TRANSCRIPT_WINDOW: usize = 4;

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
///
/// Only the key lives here; the model comes from `config.toml` or `--model`.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: String,
}

impl SecretConfig {
    /// Returns the Gemini API key when one is configured and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.as_str())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Application configuration (config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model identifier passed to the text-generation service
    pub model: String,
    /// Path of the JSON player dataset
    pub dataset_path: String,
    /// Number of trailing transcript entries included in chat prompts
    pub transcript_window: usize,
    /// Pause between analyzed players, in milliseconds (progress animation only)
    pub pacing_ms: u64,
    /// Position grouping keywords
    pub positions: PositionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            transcript_window: DEFAULT_TRANSCRIPT_WINDOW,
            pacing_ms: 0,
            positions: PositionConfig::default(),
        }
    }
}

/// Keyword sets used to bucket free-text position labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Labels that mean "goalkeeper", matched exactly
    pub goalkeeper_labels: Vec<String>,
    /// Substrings that mark a defensive position, matched case-insensitively
    pub defence_keywords: Vec<String>,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            goalkeeper_labels: vec!["حارس".to_string(), "Goalkeeper".to_string()],
            defence_keywords: vec![
                "دفاع".to_string(),
                "ظهير".to_string(),
                "defence".to_string(),
                "defender".to_string(),
                "back".to_string(),
            ],
        }
    }
}
