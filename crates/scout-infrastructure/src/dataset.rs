//! JSON player dataset loader.
//!
//! The dataset is a document with a top-level `data` array of player
//! objects. It is read once at startup and never written.

use scout_core::error::{Result, ScoutError};
use scout_core::player::{PlayerCatalog, PlayerRecord};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    data: Vec<PlayerRecord>,
}

/// Reads players from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonPlayerDataset {
    path: PathBuf,
}

impl JsonPlayerDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every player record in dataset order.
    pub async fn load(&self) -> Result<Vec<PlayerRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ScoutError::io(format!("failed to read dataset {}: {}", self.path.display(), e))
        })?;
        let players = Self::parse(&content)?;
        tracing::info!(
            "[Dataset] Loaded {} players from {:?}",
            players.len(),
            self.path
        );
        Ok(players)
    }

    /// Loads the dataset and builds the position catalog.
    pub async fn load_catalog(&self) -> Result<PlayerCatalog> {
        Ok(PlayerCatalog::from_players(self.load().await?))
    }

    /// Parses a dataset document.
    pub fn parse(content: &str) -> Result<Vec<PlayerRecord>> {
        let document: DatasetDocument = serde_json::from_str(content)?;
        Ok(document.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": [
            {"id": "1", "name": "Hany", "age": 24, "position": "حارس",
             "clubName": "Zamalek", "performanceData": {"saves": 5}},
            {"name": "Omar", "age": 19, "position": "Winger",
             "clubName": "Al Ahly", "performanceData": {"dribbles": 7}}
        ]
    }"#;

    #[test]
    fn test_parse_reads_data_array() {
        let players = JsonPlayerDataset::parse(SAMPLE).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].key(), "1");
        assert_eq!(players[1].key(), "Omar");
        assert_eq!(players[1].club_label(), "Al Ahly");
    }

    #[test]
    fn test_missing_data_field_is_empty() {
        let players = JsonPlayerDataset::parse(r#"{"meta": {}}"#).unwrap();
        assert!(players.is_empty());
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let players = JsonPlayerDataset::parse(
            r#"{"data": [{"id": 7, "name": "Ziad", "position": "Winger"}]}"#,
        )
        .unwrap();
        assert_eq!(players[0].key(), "7");
    }

    #[test]
    fn test_fractional_age_is_kept_as_text() {
        let players = JsonPlayerDataset::parse(
            r#"{"data": [{"name": "Ziad", "age": 24.5, "position": "Winger"}]}"#,
        )
        .unwrap();
        assert_eq!(players[0].age_label(), "24.5");
    }

    #[test]
    fn test_null_position_is_unknown() {
        let players =
            JsonPlayerDataset::parse(r#"{"data": [{"name": "Ziad", "position": null}]}"#).unwrap();
        assert_eq!(players[0].position, scout_core::player::UNKNOWN_POSITION);
    }

    #[test]
    fn test_one_loose_record_does_not_drop_the_rest() {
        let players = JsonPlayerDataset::parse(
            r#"{"data": [
                {"id": 1, "name": "Hany", "age": 24, "position": "حارس"},
                {"id": "2", "name": "Omar", "age": "U21", "position": null}
            ]}"#,
        )
        .unwrap();
        let catalog = PlayerCatalog::from_players(players);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position_labels(), &["حارس", "Unknown"]);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = JsonPlayerDataset::parse("[").unwrap_err();
        assert!(matches!(err, ScoutError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = JsonPlayerDataset::new(&path).load_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position_labels(), &["حارس", "Winger"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonPlayerDataset::new(dir.path().join("absent.json"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Io { .. }));
    }
}
