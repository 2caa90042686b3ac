//! Shared analysis memory.
//!
//! One `SharedMemory` lives for the whole process and is shared by the
//! analysis orchestrator (writer) and the chat responder (reader). It
//! accumulates analyzed players, deduplicated by id, and team-level insight
//! strings, deduplicated by exact text.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use strum::{Display, EnumIter, EnumString};
use tokio::sync::RwLock;

/// Process-wide handle to the shared memory.
pub type SharedMemoryHandle = Arc<RwLock<SharedMemory>>;

/// Creates an empty shared memory behind a lock.
pub fn shared() -> SharedMemoryHandle {
    Arc::new(RwLock::new(SharedMemory::new()))
}

/// A player the analysis tool has already analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedPlayerEntry {
    pub id: String,
    pub name: String,
    pub position: String,
    pub age: String,
    pub analysis_summary: String,
}

/// Top-level fields of the memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MemoryKey {
    AnalyzedPlayers,
    TeamInsights,
    PositionDistribution,
    /// Reserved; nothing populates it today
    AgePatterns,
}

/// Value of one memory field, as returned by `get` and accepted by `set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum MemoryValue {
    AnalyzedPlayers(Vec<AnalyzedPlayerEntry>),
    TeamInsights(Vec<String>),
    PositionDistribution(BTreeMap<String, usize>),
    AgePatterns(Vec<String>),
}

impl MemoryValue {
    /// The field this value belongs to.
    pub fn key(&self) -> MemoryKey {
        match self {
            MemoryValue::AnalyzedPlayers(_) => MemoryKey::AnalyzedPlayers,
            MemoryValue::TeamInsights(_) => MemoryKey::TeamInsights,
            MemoryValue::PositionDistribution(_) => MemoryKey::PositionDistribution,
            MemoryValue::AgePatterns(_) => MemoryKey::AgePatterns,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MemoryValue::AnalyzedPlayers(v) => v.is_empty(),
            MemoryValue::TeamInsights(v) => v.is_empty(),
            MemoryValue::PositionDistribution(m) => m.is_empty(),
            MemoryValue::AgePatterns(v) => v.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MemoryValue::AnalyzedPlayers(v) => v.len(),
            MemoryValue::TeamInsights(v) => v.len(),
            MemoryValue::PositionDistribution(m) => m.len(),
            MemoryValue::AgePatterns(v) => v.len(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SharedMemory {
    analyzed_players: Vec<AnalyzedPlayerEntry>,
    /// id -> index into `analyzed_players`
    player_index: HashMap<String, usize>,
    team_insights: Vec<String>,
    position_distribution: BTreeMap<String, usize>,
    age_patterns: Vec<String>,
}

impl SharedMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new analyzed player or replaces the one with the same id.
    ///
    /// A replacement keeps the entry's position in the list and leaves the
    /// position distribution untouched; only first inserts are counted.
    pub fn upsert_analyzed_player(&mut self, entry: AnalyzedPlayerEntry) {
        if let Some(&index) = self.player_index.get(&entry.id) {
            self.analyzed_players[index] = entry;
            return;
        }

        *self
            .position_distribution
            .entry(entry.position.clone())
            .or_insert(0) += 1;
        self.player_index
            .insert(entry.id.clone(), self.analyzed_players.len());
        self.analyzed_players.push(entry);
    }

    /// Appends a team insight unless the exact same text is already stored.
    pub fn add_team_insight(&mut self, insight: impl Into<String>) {
        let insight = insight.into();
        if !self.team_insights.contains(&insight) {
            self.team_insights.push(insight);
        }
    }

    /// Returns a copy of one field. Never fails; absent data is an empty container.
    pub fn get(&self, key: MemoryKey) -> MemoryValue {
        match key {
            MemoryKey::AnalyzedPlayers => MemoryValue::AnalyzedPlayers(self.analyzed_players.clone()),
            MemoryKey::TeamInsights => MemoryValue::TeamInsights(self.team_insights.clone()),
            MemoryKey::PositionDistribution => {
                MemoryValue::PositionDistribution(self.position_distribution.clone())
            }
            MemoryKey::AgePatterns => MemoryValue::AgePatterns(self.age_patterns.clone()),
        }
    }

    /// Replaces one field wholesale.
    ///
    /// Analyzed players are deduplicated by id: a repeated id keeps the slot
    /// of its first occurrence and the value of its last.
    pub fn set(&mut self, value: MemoryValue) {
        match value {
            MemoryValue::AnalyzedPlayers(players) => {
                self.analyzed_players = Vec::with_capacity(players.len());
                self.player_index = HashMap::with_capacity(players.len());
                for player in players {
                    match self.player_index.get(&player.id) {
                        Some(&index) => self.analyzed_players[index] = player,
                        None => {
                            self.player_index
                                .insert(player.id.clone(), self.analyzed_players.len());
                            self.analyzed_players.push(player);
                        }
                    }
                }
            }
            MemoryValue::TeamInsights(insights) => self.team_insights = insights,
            MemoryValue::PositionDistribution(distribution) => {
                self.position_distribution = distribution
            }
            MemoryValue::AgePatterns(patterns) => self.age_patterns = patterns,
        }
    }

    /// Resets all four fields.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn analyzed_players(&self) -> &[AnalyzedPlayerEntry] {
        &self.analyzed_players
    }

    pub fn team_insights(&self) -> &[String] {
        &self.team_insights
    }

    pub fn position_distribution(&self) -> &BTreeMap<String, usize> {
        &self.position_distribution
    }

    pub fn age_patterns(&self) -> &[String] {
        &self.age_patterns
    }

    pub fn is_empty(&self) -> bool {
        self.analyzed_players.is_empty()
            && self.team_insights.is_empty()
            && self.position_distribution.is_empty()
            && self.age_patterns.is_empty()
    }
}
