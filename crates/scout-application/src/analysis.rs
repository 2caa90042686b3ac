//! Batch player analysis.
//!
//! `AnalysisOrchestrator` walks the session's selected players one at a
//! time, asks the text-generation service for an assessment of each, records
//! the results in the shared memory and the session transcript, and finishes
//! with a single team-level summary when more than one player was selected.
//!
//! Failures never abort the batch: a failed player is skipped, a failed team
//! summary leaves the batch without one. Nothing is retried.

use crate::prompts::PromptBuilder;
use scout_core::error::ScoutError;
use scout_core::generation::TextGenerator;
use scout_core::memory::{AnalyzedPlayerEntry, SharedMemoryHandle};
use scout_core::player::PlayerRecord;
use scout_core::session::{ActiveTab, AnalysisResult, SessionState, TranscriptEntry};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    BatchStarted {
        remaining: usize,
        total: usize,
    },
    /// `index` is 0-based within the whole selection
    PlayerStarted {
        index: usize,
        total: usize,
        name: String,
        position: String,
    },
    PlayerCompleted {
        index: usize,
        name: String,
        analysis: String,
    },
    PlayerFailed {
        index: usize,
        player_id: String,
        cause: String,
    },
    TeamStarted {
        player_count: usize,
    },
    TeamCompleted {
        summary: String,
    },
    TeamFailed {
        cause: String,
    },
    BatchCompleted {
        analyzed: usize,
        total: usize,
    },
}

/// What one call to `run_analysis` produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Results recorded during this run (not those from an earlier partial run)
    pub per_player_results: Vec<AnalysisResult>,
    pub team_summary: Option<String>,
    /// `PlayerAnalysisFailed` / `TeamAnalysisFailed` conditions, in order
    pub failures: Vec<ScoutError>,
}

impl BatchOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn player_failures(&self) -> impl Iterator<Item = &ScoutError> {
        self.failures.iter().filter(|e| e.is_player_failure())
    }
}

pub struct AnalysisOrchestrator {
    generator: Arc<dyn TextGenerator>,
    memory: SharedMemoryHandle,
    prompts: PromptBuilder,
    events: Option<UnboundedSender<AnalysisEvent>>,
    pacing: Duration,
}

impl AnalysisOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, memory: SharedMemoryHandle) -> Self {
        Self {
            generator,
            memory,
            prompts: PromptBuilder::new(),
            events: None,
            pacing: Duration::ZERO,
        }
    }

    /// Sends progress events to `sender`. A closed receiver is ignored.
    pub fn with_events(mut self, sender: UnboundedSender<AnalysisEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Pauses between players. Purely cosmetic; defaults to none.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Starts a fresh batch over the current selection.
    ///
    /// Drops the previous run's results and team analysis, so the next
    /// `run_analysis` begins at the first selected player.
    pub fn begin_batch(state: &mut SessionState) {
        state.analysis_results.clear();
        state.team_analysis = None;
        state.analysis_in_progress = true;
        state.active_tab = ActiveTab::Chat;
    }

    /// Analyzes the selected players that have no recorded result yet.
    ///
    /// Resumes at index `state.analysis_results.len()`. The selection is not
    /// compared against the batch that produced those results.
    pub async fn run_analysis(&self, state: &mut SessionState) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let selected = state.selected_players.clone();
        let total = selected.len();
        let already_done = state.analysis_results.len();

        if already_done > total {
            tracing::warn!(
                "[Analysis] {} recorded results exceed {} selected players",
                already_done,
                total
            );
        }

        let remaining = selected.get(already_done..).unwrap_or(&[]);
        if remaining.is_empty() {
            tracing::debug!("[Analysis] Nothing left to analyze ({} selected)", total);
            self.finish(state, &outcome, total);
            return outcome;
        }

        tracing::info!(
            "[Analysis] Analyzing {} remaining of {} players (model: {})",
            remaining.len(),
            total,
            self.generator.model()
        );
        self.emit(AnalysisEvent::BatchStarted {
            remaining: remaining.len(),
            total,
        });

        for (offset, player) in remaining.iter().enumerate() {
            let index = already_done + offset;
            self.emit(AnalysisEvent::PlayerStarted {
                index,
                total,
                name: player.name.clone(),
                position: player.position.clone(),
            });

            match self.analyze_player(player).await {
                Ok(analysis) => {
                    self.record_player(state, player, &analysis).await;
                    let result = AnalysisResult {
                        name: player.name.clone(),
                        position: player.position.clone(),
                        analysis: analysis.clone(),
                    };
                    state.analysis_results.push(result.clone());
                    outcome.per_player_results.push(result);
                    self.emit(AnalysisEvent::PlayerCompleted {
                        index,
                        name: player.name.clone(),
                        analysis,
                    });
                }
                Err(err) => {
                    tracing::warn!("[Analysis] {}", err);
                    if let ScoutError::PlayerAnalysisFailed { player_id, cause } = &err {
                        self.emit(AnalysisEvent::PlayerFailed {
                            index,
                            player_id: player_id.clone(),
                            cause: cause.clone(),
                        });
                    }
                    outcome.failures.push(err);
                }
            }

            if !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        if total > 1 {
            self.emit(AnalysisEvent::TeamStarted {
                player_count: total,
            });
            match self.analyze_team(&selected).await {
                Ok(summary) => {
                    self.memory.write().await.add_team_insight(summary.clone());
                    state.push_transcript(TranscriptEntry::user(format!(
                        "Analyze team composition for selected {} players",
                        total
                    )));
                    state.push_transcript(TranscriptEntry::assistant(summary.clone()));
                    state.team_analysis = Some(summary.clone());
                    outcome.team_summary = Some(summary.clone());
                    self.emit(AnalysisEvent::TeamCompleted { summary });
                }
                Err(err) => {
                    tracing::warn!("[Analysis] {}", err);
                    if let ScoutError::TeamAnalysisFailed { cause } = &err {
                        self.emit(AnalysisEvent::TeamFailed {
                            cause: cause.clone(),
                        });
                    }
                    outcome.failures.push(err);
                }
            }
        }

        self.finish(state, &outcome, total);
        outcome
    }

    async fn analyze_player(&self, player: &PlayerRecord) -> Result<String, ScoutError> {
        let failed = |cause: &dyn std::fmt::Display| {
            ScoutError::player_analysis_failed(player.key(), cause)
        };
        let prompt = self.prompts.player_analysis(player).map_err(|e| failed(&e))?;
        self.generator
            .generate(&prompt)
            .await
            .map_err(|e| failed(&e))
    }

    async fn analyze_team(&self, players: &[PlayerRecord]) -> Result<String, ScoutError> {
        let prompt = self
            .prompts
            .team_analysis(players)
            .map_err(ScoutError::team_analysis_failed)?;
        self.generator
            .generate(&prompt)
            .await
            .map_err(ScoutError::team_analysis_failed)
    }

    async fn record_player(&self, state: &mut SessionState, player: &PlayerRecord, analysis: &str) {
        self.memory
            .write()
            .await
            .upsert_analyzed_player(AnalyzedPlayerEntry {
                id: player.key().to_string(),
                name: player.name.clone(),
                position: player.position.clone(),
                age: player.age_label(),
                analysis_summary: analysis.to_string(),
            });

        state.push_transcript(TranscriptEntry::user(format!(
            "Analyze player: {} ({})",
            player.name, player.position
        )));
        state.push_transcript(TranscriptEntry::assistant(analysis));
    }

    fn finish(&self, state: &mut SessionState, outcome: &BatchOutcome, total: usize) {
        state.clear_selection();
        state.analysis_in_progress = false;
        tracing::info!(
            "[Analysis] Batch complete: {} analyzed, {} failures",
            outcome.per_player_results.len(),
            outcome.failures.len()
        );
        self.emit(AnalysisEvent::BatchCompleted {
            analyzed: outcome.per_player_results.len(),
            total,
        });
    }

    fn emit(&self, event: AnalysisEvent) {
        if let Some(sender) = &self.events {
            // Non-blocking send - if the receiver is dropped, we just skip
            let _ = sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedGenerator;
    use scout_core::generation::GenerationError;
    use scout_core::memory;
    use scout_core::session::MessageRole;
    use tokio::sync::mpsc;

    fn player(id: &str, name: &str, position: &str) -> PlayerRecord {
        PlayerRecord::new(name, position).with_id(id).with_age(21)
    }

    fn state_with(players: Vec<PlayerRecord>) -> SessionState {
        let mut state = SessionState::new();
        for p in players {
            state.select(p);
        }
        state
    }

    fn failure() -> Result<String, GenerationError> {
        Err(GenerationError::Http {
            status: 500,
            message: "boom".to_string(),
        })
    }

    #[tokio::test]
    async fn test_middle_failure_is_skipped_and_team_still_runs() {
        let generator = Arc::new(ScriptedGenerator::with_results(vec![
            Ok("first".to_string()),
            failure(),
            Ok("third".to_string()),
            Ok("team".to_string()),
        ]));
        let memory = memory::shared();
        let orchestrator = AnalysisOrchestrator::new(generator.clone(), memory.clone());
        let mut state = state_with(vec![
            player("1", "Hany", "Goalkeeper"),
            player("2", "Omar", "Winger"),
            player("3", "Ziad", "Striker"),
        ]);

        let outcome = orchestrator.run_analysis(&mut state).await;

        let names: Vec<&str> = outcome
            .per_player_results
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Hany", "Ziad"]);
        assert_eq!(
            outcome.failures,
            vec![ScoutError::PlayerAnalysisFailed {
                player_id: "2".to_string(),
                cause: "HTTP 500: boom".to_string(),
            }]
        );
        assert_eq!(outcome.team_summary.as_deref(), Some("team"));

        // Team prompt covers all three selected players.
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[3].contains("Players Analyzed: 3"));
        assert!(prompts[3].contains("- Omar (21): Winger"));

        let memory = memory.read().await;
        assert_eq!(memory.analyzed_players().len(), 2);
        assert_eq!(memory.team_insights(), &["team"]);
        assert!(state.selected_players.is_empty());
        assert!(!state.analysis_in_progress);
        assert_eq!(state.team_analysis.as_deref(), Some("team"));
    }

    #[tokio::test]
    async fn test_single_player_skips_team_summary() {
        let generator = Arc::new(ScriptedGenerator::new());
        let orchestrator = AnalysisOrchestrator::new(generator.clone(), memory::shared());
        let mut state = state_with(vec![player("1", "Hany", "Goalkeeper")]);

        let outcome = orchestrator.run_analysis(&mut state).await;

        assert_eq!(generator.call_count(), 1);
        assert_eq!(outcome.per_player_results.len(), 1);
        assert!(outcome.team_summary.is_none());
        assert!(state.team_analysis.is_none());
    }

    #[tokio::test]
    async fn test_resume_only_calls_remaining_players() {
        let generator = Arc::new(ScriptedGenerator::new());
        let orchestrator = AnalysisOrchestrator::new(generator.clone(), memory::shared());
        let mut state = state_with(vec![
            player("1", "P0", "Winger"),
            player("2", "P1", "Winger"),
            player("3", "P2", "Winger"),
            player("4", "P3", "Winger"),
            player("5", "P4", "Winger"),
        ]);
        for name in ["P0", "P1"] {
            state.analysis_results.push(AnalysisResult {
                name: name.to_string(),
                position: "Winger".to_string(),
                analysis: "earlier".to_string(),
            });
        }

        let outcome = orchestrator.run_analysis(&mut state).await;

        let prompts = generator.prompts();
        let player_prompts: Vec<&String> = prompts
            .iter()
            .filter(|p| p.contains("Analyze this football player's"))
            .collect();
        assert_eq!(player_prompts.len(), 3);
        assert!(player_prompts[0].contains("Player: P2"));
        assert!(player_prompts[1].contains("Player: P3"));
        assert!(player_prompts[2].contains("Player: P4"));
        assert!(prompts.iter().all(|p| !p.contains("Player: P0") && !p.contains("Player: P1")));

        assert_eq!(outcome.per_player_results.len(), 3);
        assert_eq!(state.analysis_results.len(), 5);
    }

    #[tokio::test]
    async fn test_transcript_records_pairs() {
        let generator = Arc::new(ScriptedGenerator::with_results(vec![
            Ok("a1".to_string()),
            Ok("a2".to_string()),
            Ok("summary".to_string()),
        ]));
        let orchestrator = AnalysisOrchestrator::new(generator, memory::shared());
        let mut state = state_with(vec![
            player("1", "Hany", "Goalkeeper"),
            player("2", "Omar", "Winger"),
        ]);

        orchestrator.run_analysis(&mut state).await;

        let lines: Vec<(MessageRole, &str)> = state
            .transcript
            .iter()
            .map(|e| (e.role, e.content.as_str()))
            .collect();
        assert_eq!(
            lines,
            vec![
                (MessageRole::User, "Analyze player: Hany (Goalkeeper)"),
                (MessageRole::Assistant, "a1"),
                (MessageRole::User, "Analyze player: Omar (Winger)"),
                (MessageRole::Assistant, "a2"),
                (MessageRole::User, "Analyze team composition for selected 2 players"),
                (MessageRole::Assistant, "summary"),
            ]
        );
    }

    #[tokio::test]
    async fn test_team_failure_still_completes_batch() {
        let generator = Arc::new(ScriptedGenerator::with_results(vec![
            Ok("a1".to_string()),
            Ok("a2".to_string()),
            Err(GenerationError::Request("timeout".to_string())),
        ]));
        let memory = memory::shared();
        let orchestrator = AnalysisOrchestrator::new(generator, memory.clone());
        let mut state = state_with(vec![
            player("1", "Hany", "Goalkeeper"),
            player("2", "Omar", "Winger"),
        ]);

        let outcome = orchestrator.run_analysis(&mut state).await;

        assert!(outcome.team_summary.is_none());
        assert_eq!(
            outcome.failures,
            vec![ScoutError::TeamAnalysisFailed {
                cause: "request failed: timeout".to_string(),
            }]
        );
        assert_eq!(outcome.player_failures().count(), 0);
        assert!(memory.read().await.team_insights().is_empty());
        assert!(state.selected_players.is_empty());
        assert_eq!(state.transcript.len(), 4);
    }

    #[tokio::test]
    async fn test_reanalysis_updates_memory_in_place() {
        let generator = Arc::new(ScriptedGenerator::with_results(vec![
            Ok("old".to_string()),
            Ok("new".to_string()),
        ]));
        let memory = memory::shared();
        let orchestrator = AnalysisOrchestrator::new(generator, memory.clone());

        let mut state = state_with(vec![player("1", "Hany", "Goalkeeper")]);
        orchestrator.run_analysis(&mut state).await;

        state.select(player("1", "Hany", "Goalkeeper"));
        AnalysisOrchestrator::begin_batch(&mut state);
        orchestrator.run_analysis(&mut state).await;

        let memory = memory.read().await;
        assert_eq!(memory.analyzed_players().len(), 1);
        assert_eq!(memory.analyzed_players()[0].analysis_summary, "new");
        assert_eq!(memory.position_distribution().get("Goalkeeper"), Some(&1));
    }

    #[tokio::test]
    async fn test_begin_batch_resets_previous_results() {
        let mut state = state_with(vec![player("1", "Hany", "Goalkeeper")]);
        state.analysis_results.push(AnalysisResult {
            name: "x".to_string(),
            position: "y".to_string(),
            analysis: "z".to_string(),
        });
        state.team_analysis = Some("old".to_string());
        state.active_tab = ActiveTab::Database;

        AnalysisOrchestrator::begin_batch(&mut state);

        assert!(state.analysis_results.is_empty());
        assert!(state.team_analysis.is_none());
        assert!(state.analysis_in_progress);
        assert_eq!(state.active_tab, ActiveTab::Chat);
        assert_eq!(state.selected_players.len(), 1);
    }

    #[tokio::test]
    async fn test_events_follow_progress() {
        let generator = Arc::new(ScriptedGenerator::with_results(vec![
            Ok("a1".to_string()),
            failure(),
            Ok("team".to_string()),
        ]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let orchestrator =
            AnalysisOrchestrator::new(generator, memory::shared()).with_events(tx);
        let mut state = state_with(vec![
            player("1", "Hany", "Goalkeeper"),
            player("2", "Omar", "Winger"),
        ]);

        orchestrator.run_analysis(&mut state).await;
        drop(orchestrator);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(
            events.first(),
            Some(&AnalysisEvent::BatchStarted {
                remaining: 2,
                total: 2
            })
        );
        assert!(events.contains(&AnalysisEvent::PlayerFailed {
            index: 1,
            player_id: "2".to_string(),
            cause: "HTTP 500: boom".to_string(),
        }));
        assert!(events.contains(&AnalysisEvent::TeamCompleted {
            summary: "team".to_string()
        }));
        assert_eq!(
            events.last(),
            Some(&AnalysisEvent::BatchCompleted {
                analyzed: 1,
                total: 2
            })
        );
    }

    #[tokio::test]
    async fn test_empty_selection_makes_no_calls() {
        let generator = Arc::new(ScriptedGenerator::new());
        let orchestrator = AnalysisOrchestrator::new(generator.clone(), memory::shared());
        let mut state = SessionState::new();
        state.analysis_in_progress = true;

        let outcome = orchestrator.run_analysis(&mut state).await;

        assert_eq!(outcome, BatchOutcome::default());
        assert_eq!(generator.call_count(), 0);
        assert!(!state.analysis_in_progress);
    }
}
