//! Position label bucketing for the selection surface.
//!
//! Dataset labels are free text in more than one language, so grouping is
//! keyword driven: goalkeeper labels match exactly, defence keywords match as
//! case-insensitive substrings, and everything else stays under its own label.

use super::catalog::PlayerCatalog;
use super::model::PlayerRecord;
use crate::config::PositionConfig;
use std::fmt;

/// Selection bucket a position label falls into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PositionGroup {
    Goalkeepers,
    Defenders,
    Other(String),
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionGroup::Goalkeepers => f.write_str("Goalkeepers"),
            PositionGroup::Defenders => f.write_str("Defenders"),
            PositionGroup::Other(label) => f.write_str(label),
        }
    }
}

/// Players of one bucket together with the labels that fed it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerGroup {
    pub group: PositionGroup,
    pub labels: Vec<String>,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct PositionClassifier {
    goalkeeper_labels: Vec<String>,
    defence_keywords: Vec<String>,
}

impl PositionClassifier {
    pub fn new(config: &PositionConfig) -> Self {
        Self {
            goalkeeper_labels: config.goalkeeper_labels.clone(),
            defence_keywords: config
                .defence_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    pub fn classify(&self, label: &str) -> PositionGroup {
        if self.goalkeeper_labels.iter().any(|gk| gk == label) {
            return PositionGroup::Goalkeepers;
        }
        let lowered = label.to_lowercase();
        if self.defence_keywords.iter().any(|k| lowered.contains(k.as_str())) {
            PositionGroup::Defenders
        } else {
            PositionGroup::Other(label.to_string())
        }
    }

    /// Buckets the catalog: goalkeepers, then defenders, then one group per
    /// remaining label. Empty goalkeeper/defender buckets are omitted.
    pub fn group(&self, catalog: &PlayerCatalog) -> Vec<PlayerGroup> {
        let mut groups = Vec::new();

        // Goalkeepers follow the configured label order, not dataset order.
        let keeper_labels: Vec<String> = self
            .goalkeeper_labels
            .iter()
            .filter(|label| !catalog.players_by_position(label).is_empty())
            .cloned()
            .collect();
        if !keeper_labels.is_empty() {
            groups.push(Self::collect(PositionGroup::Goalkeepers, keeper_labels, catalog));
        }

        let defence_labels: Vec<String> = catalog
            .position_labels()
            .iter()
            .filter(|label| self.classify(label) == PositionGroup::Defenders)
            .cloned()
            .collect();
        if !defence_labels.is_empty() {
            groups.push(Self::collect(PositionGroup::Defenders, defence_labels, catalog));
        }

        for label in catalog.position_labels() {
            if let group @ PositionGroup::Other(_) = self.classify(label) {
                groups.push(Self::collect(group, vec![label.clone()], catalog));
            }
        }

        groups
    }

    fn collect(group: PositionGroup, labels: Vec<String>, catalog: &PlayerCatalog) -> PlayerGroup {
        let players = labels
            .iter()
            .flat_map(|label| catalog.players_by_position(label).iter().cloned())
            .collect();
        PlayerGroup {
            group,
            labels,
            players,
        }
    }
}
