//! REPL command parsing and selection handling.

use scout_core::error::{Result, ScoutError};
use scout_core::player::{PlayerCatalog, PositionClassifier, PositionGroup};
use scout_core::session::SessionState;

/// Slash commands offered for completion.
pub const COMMANDS: &[&str] = &[
    "/players", "/select", "/deselect", "/analyze", "/chat", "/database", "/memory", "/reset",
    "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Players,
    Select(String),
    Deselect(String),
    Analyze,
    Chat,
    Database,
    Memory,
    Reset,
    Help,
    Quit,
    /// Free text sent to the responder
    Message(String),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line == "quit" || line == "exit" {
            return Some(Command::Quit);
        }
        if !line.starts_with('/') {
            return Some(Command::Message(line.to_string()));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match (name, arg.is_empty()) {
            ("/players", _) => Command::Players,
            ("/select", false) => Command::Select(arg.to_string()),
            ("/deselect", false) => Command::Deselect(arg.to_string()),
            ("/analyze", _) => Command::Analyze,
            ("/chat", _) => Command::Chat,
            ("/database", _) => Command::Database,
            ("/memory", _) => Command::Memory,
            ("/reset", _) => Command::Reset,
            ("/help", _) => Command::Help,
            ("/quit", _) | ("/exit", _) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Adds players to the selection.
///
/// `target` is `all`, `gk`, `defence`, a player id or name, or a position
/// label. Returns how many players were newly selected.
pub fn select(
    state: &mut SessionState,
    catalog: &PlayerCatalog,
    classifier: &PositionClassifier,
    target: &str,
) -> Result<usize> {
    let players: Vec<_> = match target.to_lowercase().as_str() {
        "all" => catalog.all().to_vec(),
        "gk" | "gks" | "goalkeepers" => group_players(catalog, classifier, PositionGroup::Goalkeepers),
        "defence" | "defense" | "defenders" => {
            group_players(catalog, classifier, PositionGroup::Defenders)
        }
        _ => {
            if let Some(player) = catalog.find(target) {
                vec![player.clone()]
            } else if !catalog.players_by_position(target).is_empty() {
                catalog.players_by_position(target).to_vec()
            } else {
                return Err(ScoutError::not_found("player or position", target));
            }
        }
    };

    Ok(players.into_iter().filter(|p| state.select(p.clone())).count())
}

/// Removes a player (or `all`) from the selection. Returns how many were removed.
pub fn deselect(state: &mut SessionState, target: &str) -> Result<usize> {
    if target.eq_ignore_ascii_case("all") {
        let count = state.selected_players.len();
        state.clear_selection();
        return Ok(count);
    }
    if state.deselect(target) {
        Ok(1)
    } else {
        Err(ScoutError::not_found("selected player", target))
    }
}

fn group_players(
    catalog: &PlayerCatalog,
    classifier: &PositionClassifier,
    wanted: PositionGroup,
) -> Vec<scout_core::player::PlayerRecord> {
    classifier
        .group(catalog)
        .into_iter()
        .find(|g| g.group == wanted)
        .map(|g| g.players)
        .unwrap_or_default()
}
