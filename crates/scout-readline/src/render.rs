//! Plain-text views printed by the REPL.

use scout_core::memory::SharedMemory;
use scout_core::player::{PlayerCatalog, PlayerGroup};
use scout_core::session::{SessionState, TranscriptEntry};

const DATABASE_HEADERS: [&str; 4] = ["Name", "Age", "Position", "Club"];

/// Position groups with `[x]` marks for selected players.
pub fn player_groups(groups: &[PlayerGroup], state: &SessionState) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("{} ({})\n", group.group, group.players.len()));
        for player in &group.players {
            let mark = if state.is_selected(player.key()) { "x" } else { " " };
            out.push_str(&format!(
                "  [{}] {} | {} | {}\n",
                mark,
                player.key(),
                player.name,
                player.position
            ));
        }
    }
    out
}

/// Name / Age / Position / Club table with padded columns.
pub fn database_table(catalog: &PlayerCatalog) -> String {
    let rows: Vec<[String; 4]> = catalog
        .all()
        .iter()
        .map(|p| {
            [
                p.name.clone(),
                p.age_label(),
                p.position.clone(),
                p.club_label().to_string(),
            ]
        })
        .collect();

    let mut widths = DATABASE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format_row(&DATABASE_HEADERS.map(String::from), &widths);
    out.push_str(&format_row(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

/// The whole conversation, one `Speaker: content` turn per block.
pub fn transcript(entries: &[TranscriptEntry]) -> String {
    if entries.is_empty() {
        return "No messages yet. Ask a question or run /analyze.\n".to_string();
    }

    let turns: Vec<String> = entries
        .iter()
        .map(|entry| format!("{}: {}\n", entry.role.speaker(), entry.content))
        .collect();
    turns.join("\n")
}

pub fn memory_summary(memory: &SharedMemory) -> String {
    if memory.is_empty() {
        return "Shared memory is empty.\n".to_string();
    }

    let mut out = format!("Analyzed players: {}\n", memory.analyzed_players().len());
    for player in memory.analyzed_players() {
        out.push_str(&format!(
            "  - {} ({}, age {})\n",
            player.name, player.position, player.age
        ));
    }
    out.push_str(&format!("Team insights: {}\n", memory.team_insights().len()));
    if !memory.position_distribution().is_empty() {
        let tally: Vec<String> = memory
            .position_distribution()
            .iter()
            .map(|(position, count)| format!("{position}: {count}"))
            .collect();
        out.push_str(&format!("Position distribution: {}\n", tally.join(", ")));
    }
    if !memory.age_patterns().is_empty() {
        out.push_str(&format!("Age patterns: {}\n", memory.age_patterns().len()));
    }
    out
}
