use super::message::TranscriptEntry;
use crate::player::PlayerRecord;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which view the session is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Chat,
    Database,
}

/// Outcome of analyzing one player in the current batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name: String,
    pub position: String,
    pub analysis: String,
}

/// State owned by a single interactive session. Never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    /// Players picked for the next (or running) batch, in selection order
    pub selected_players: Vec<PlayerRecord>,
    /// Results recorded so far for the current batch
    pub analysis_results: Vec<AnalysisResult>,
    pub team_analysis: Option<String>,
    pub active_tab: ActiveTab,
    pub analysis_in_progress: bool,
    /// Append-only conversation history
    pub transcript: Vec<TranscriptEntry>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            selected_players: Vec::new(),
            analysis_results: Vec::new(),
            team_analysis: None,
            active_tab: ActiveTab::Chat,
            analysis_in_progress: false,
            transcript: Vec::new(),
        }
    }

    /// Adds a player to the selection unless one with the same key is already there.
    ///
    /// Returns `true` if the player was added.
    pub fn select(&mut self, player: PlayerRecord) -> bool {
        if self.is_selected(player.key()) {
            return false;
        }
        self.selected_players.push(player);
        true
    }

    /// Removes the player with `key` from the selection.
    ///
    /// Returns `true` if a player was removed.
    pub fn deselect(&mut self, key: &str) -> bool {
        let before = self.selected_players.len();
        self.selected_players.retain(|p| p.key() != key);
        before != self.selected_players.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected_players.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected_players.iter().any(|p| p.key() == key)
    }

    pub fn push_transcript(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }

    /// The last `n` transcript entries, oldest first.
    pub fn recent_transcript(&self, n: usize) -> &[TranscriptEntry] {
        let start = self.transcript.len().saturating_sub(n);
        &self.transcript[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MessageRole;
    use std::str::FromStr;

    #[test]
    fn test_select_is_idempotent_per_key() {
        let mut state = SessionState::new();
        assert!(state.select(PlayerRecord::new("Omar", "Winger").with_id("1")));
        assert!(!state.select(PlayerRecord::new("Omar B", "Winger").with_id("1")));
        assert!(state.select(PlayerRecord::new("Omar", "Striker")));
        assert_eq!(state.selected_players.len(), 2);

        assert!(state.deselect("1"));
        assert!(!state.deselect("1"));
        assert!(state.is_selected("Omar"));
    }

    #[test]
    fn test_recent_transcript_window() {
        let mut state = SessionState::new();
        assert!(state.recent_transcript(4).is_empty());

        for i in 0..6 {
            state.push_transcript(TranscriptEntry::user(format!("m{i}")));
        }
        let recent: Vec<&str> = state
            .recent_transcript(4)
            .iter()
            .map(|e| e.content.as_str())
            .collect();
        assert_eq!(recent, vec!["m2", "m3", "m4", "m5"]);
        assert_eq!(state.recent_transcript(10).len(), 6);
        assert_eq!(state.transcript[0].role, MessageRole::User);
    }

    #[test]
    fn test_active_tab_names() {
        assert_eq!(ActiveTab::default(), ActiveTab::Chat);
        assert_eq!(ActiveTab::from_str("database").unwrap(), ActiveTab::Database);
        assert_eq!(ActiveTab::Chat.to_string(), "chat");
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        assert_ne!(SessionState::new().session_id, SessionState::new().session_id);
    }
}
