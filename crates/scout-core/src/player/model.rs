//! Player record as loaded from the dataset.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Position label used when a record has none.
pub const UNKNOWN_POSITION: &str = "Unknown";

/// A player's age as it appears in the dataset.
///
/// Most datasets carry a number, some carry a label such as "U21". Anything
/// that is not a whole number of years is kept as its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerAge {
    Years(u32),
    Label(String),
}

impl fmt::Display for PlayerAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAge::Years(years) => write!(f, "{years}"),
            PlayerAge::Label(label) => f.write_str(label),
        }
    }
}

/// A single player from the dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Stable identifier; optional in the dataset, numeric ids become text
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<PlayerAge>,
    #[serde(default = "default_position", deserialize_with = "lenient_position")]
    pub position: String,
    #[serde(default)]
    pub club_name: Option<String>,
    /// Opaque per-player statistics, passed verbatim into prompts
    #[serde(default)]
    pub performance_data: serde_json::Value,
}

fn default_position() -> String {
    UNKNOWN_POSITION.to_string()
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(id) => Some(id),
        other => Some(other.to_string()),
    })
}

fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PlayerAge>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(
            n.as_u64()
                .and_then(|years| u32::try_from(years).ok())
                .map(PlayerAge::Years)
                .unwrap_or_else(|| PlayerAge::Label(n.to_string())),
        ),
        Value::String(label) => Some(PlayerAge::Label(label)),
        other => Some(PlayerAge::Label(other.to_string())),
    })
}

fn lenient_position<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => default_position(),
        Value::String(label) => label,
        other => other.to_string(),
    })
}

impl PlayerRecord {
    /// Creates a record with no id, club or performance data.
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            age: None,
            position: position.into(),
            club_name: None,
            performance_data: serde_json::Value::Null,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_age(mut self, years: u32) -> Self {
        self.age = Some(PlayerAge::Years(years));
        self
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club_name = Some(club.into());
        self
    }

    pub fn with_performance_data(mut self, data: serde_json::Value) -> Self {
        self.performance_data = data;
        self
    }

    /// Identity used for deduplication and selection: the id, else the name.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Age for display, `N/A` when unknown.
    pub fn age_label(&self) -> String {
        self.age
            .as_ref()
            .map(PlayerAge::to_string)
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Club for display, `Unknown` when absent.
    pub fn club_label(&self) -> &str {
        self.club_name.as_deref().unwrap_or("Unknown")
    }

    /// Performance data rendered as compact JSON for prompt embedding.
    pub fn performance_summary(&self) -> String {
        match &self.performance_data {
            serde_json::Value::Null => "{}".to_string(),
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
