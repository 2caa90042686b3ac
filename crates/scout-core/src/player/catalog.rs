use super::model::PlayerRecord;
use std::collections::HashMap;

/// Read-only view of the loaded dataset, grouped by position label.
///
/// Labels keep the order in which they first appear; players keep dataset
/// order within their group.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    players: Vec<PlayerRecord>,
    labels: Vec<String>,
    by_position: HashMap<String, Vec<PlayerRecord>>,
}

impl PlayerCatalog {
    /// Builds the catalog once from an already-loaded list of players.
    pub fn from_players(players: Vec<PlayerRecord>) -> Self {
        let mut labels = Vec::new();
        let mut by_position: HashMap<String, Vec<PlayerRecord>> = HashMap::new();

        for player in &players {
            let group = by_position.entry(player.position.clone()).or_insert_with(|| {
                labels.push(player.position.clone());
                Vec::new()
            });
            group.push(player.clone());
        }

        Self {
            players,
            labels,
            by_position,
        }
    }

    /// Players with exactly this position label, in dataset order.
    pub fn players_by_position(&self, label: &str) -> &[PlayerRecord] {
        self.by_position
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All distinct position labels, in first-seen order.
    pub fn position_labels(&self) -> &[String] {
        &self.labels
    }

    pub fn all(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// Looks a player up by key (id, else name).
    pub fn find(&self, key: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.key() == key)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerCatalog {
        PlayerCatalog::from_players(vec![
            PlayerRecord::new("Hany", "Goalkeeper").with_id("1"),
            PlayerRecord::new("Omar", "Winger").with_id("2"),
            PlayerRecord::new("Ziad", "Goalkeeper").with_id("3"),
            PlayerRecord::new("Tarek", "Centre Back"),
        ])
    }

    #[test]
    fn test_groups_preserve_insertion_order() {
        let catalog = sample();

        assert_eq!(
            catalog.position_labels(),
            &["Goalkeeper", "Winger", "Centre Back"]
        );
        let keepers: Vec<&str> = catalog
            .players_by_position("Goalkeeper")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(keepers, vec!["Hany", "Ziad"]);
    }

    #[test]
    fn test_unknown_label_is_empty() {
        let catalog = sample();
        assert!(catalog.players_by_position("Striker").is_empty());
    }

    #[test]
    fn test_find_by_id_or_name() {
        let catalog = sample();
        assert_eq!(catalog.find("2").map(|p| p.name.as_str()), Some("Omar"));
        assert_eq!(catalog.find("Tarek").map(|p| p.position.as_str()), Some("Centre Back"));
        assert!(catalog.find("missing").is_none());
        assert_eq!(catalog.len(), 4);
    }
}
