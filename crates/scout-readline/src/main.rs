mod commands;
mod render;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use scout_application::{AnalysisEvent, AnalysisOrchestrator, ChatResponder};
use scout_core::config::AppConfig;
use scout_core::generation::TextGenerator;
use scout_core::memory::{self, SharedMemoryHandle};
use scout_core::player::{PlayerCatalog, PositionClassifier};
use scout_core::session::{ActiveTab, SessionState};
use scout_infrastructure::{ConfigService, JsonPlayerDataset, SecretServiceImpl};
use scout_interaction::GeminiApiAgent;

use commands::{Command, COMMANDS};

/// Interactive football scouting assistant.
#[derive(Debug, Parser)]
#[command(name = "scout", version, about)]
struct Args {
    /// Player dataset (JSON with a top-level `data` array)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/scout/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model identifier for the text-generation service
    #[arg(long)]
    model: Option<String>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Everything one REPL session works with.
struct Repl {
    config: AppConfig,
    catalog: PlayerCatalog,
    classifier: PositionClassifier,
    memory: SharedMemoryHandle,
    /// `None` when no credential was found; analysis and chat are refused.
    generator: Option<Arc<dyn TextGenerator>>,
    state: SessionState,
}

impl Repl {
    /// Runs one command. Returns `false` when the session should end.
    async fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Players => {
                let groups = self.classifier.group(&self.catalog);
                print_block(&render::player_groups(&groups, &self.state));
                println!(
                    "{}",
                    format!("{} selected", self.state.selected_players.len()).bright_black()
                );
            }
            Command::Select(target) => {
                match commands::select(&mut self.state, &self.catalog, &self.classifier, &target) {
                    Ok(added) => println!(
                        "{}",
                        format!(
                            "Selected {} player(s), {} in total",
                            added,
                            self.state.selected_players.len()
                        )
                        .green()
                    ),
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            Command::Deselect(target) => match commands::deselect(&mut self.state, &target) {
                Ok(removed) => {
                    println!("{}", format!("Deselected {} player(s)", removed).green())
                }
                Err(e) => eprintln!("{}", e.to_string().red()),
            },
            Command::Analyze => self.analyze().await,
            Command::Chat => {
                self.state.active_tab = ActiveTab::Chat;
                print_block(&render::transcript(&self.state.transcript));
            }
            Command::Database => {
                self.state.active_tab = ActiveTab::Database;
                print_block(&render::database_table(&self.catalog));
            }
            Command::Memory => {
                let memory = self.memory.read().await;
                print_block(&render::memory_summary(&memory));
            }
            Command::Reset => {
                self.memory.write().await.clear();
                println!("{}", "Shared memory cleared.".bright_green());
            }
            Command::Help => print_help(),
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                return false;
            }
            Command::Message(text) => self.chat(&text).await,
            Command::Unknown(line) => {
                println!("{}", format!("Unknown command: {line}").bright_black());
            }
        }
        true
    }

    async fn analyze(&mut self) {
        let Some(generator) = self.generator.clone() else {
            eprintln!("{}", "Analysis unavailable: no API key configured.".red());
            return;
        };
        if self.state.selected_players.is_empty() {
            println!("{}", "Select players first (see /players).".yellow());
            return;
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let orchestrator = AnalysisOrchestrator::new(generator, self.memory.clone())
            .with_events(tx)
            .with_pacing(Duration::from_millis(self.config.pacing_ms));

        let printer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                print_event(&event);
            }
        });

        // A previous batch that stopped part-way resumes where it left off.
        if !self.state.analysis_in_progress {
            AnalysisOrchestrator::begin_batch(&mut self.state);
        }
        let outcome = orchestrator.run_analysis(&mut self.state).await;
        drop(orchestrator);
        let _ = printer.await;

        if outcome.has_failures() {
            println!(
                "{}",
                format!("{} step(s) failed; see messages above.", outcome.failures.len())
                    .yellow()
            );
        }
    }

    async fn chat(&mut self, message: &str) {
        let Some(generator) = self.generator.clone() else {
            eprintln!("{}", "Chat unavailable: no API key configured.".red());
            return;
        };
        self.state.active_tab = ActiveTab::Chat;

        let responder = ChatResponder::new(generator, self.memory.clone())
            .with_transcript_window(self.config.transcript_window);
        let reply = responder.handle_message(&mut self.state, message).await;
        for line in reply.lines() {
            println!("{}", line.bright_blue());
        }
    }
}

fn print_event(event: &AnalysisEvent) {
    match event {
        AnalysisEvent::BatchStarted { remaining, total } => {
            println!(
                "{}",
                format!("Analyzing {remaining} of {total} player(s)...").bright_yellow()
            );
        }
        AnalysisEvent::PlayerStarted {
            index,
            total,
            name,
            position,
        } => {
            println!(
                "{}",
                format!("[{}/{}] {} ({})", index + 1, total, name, position).yellow()
            );
        }
        AnalysisEvent::PlayerCompleted { name, analysis, .. } => {
            println!("{}", format!("[{name}]").bright_magenta());
            for line in analysis.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
        AnalysisEvent::PlayerFailed {
            player_id, cause, ..
        } => {
            eprintln!(
                "{}",
                format!("Analysis failed for {player_id}: {cause}").red()
            );
        }
        AnalysisEvent::TeamStarted { player_count } => {
            println!(
                "{}",
                format!("Team analysis over {player_count} player(s)...").bright_yellow()
            );
        }
        AnalysisEvent::TeamCompleted { summary } => {
            println!("{}", "[Team]".bright_magenta());
            for line in summary.lines() {
                println!("{}", line.bright_blue());
            }
            println!();
        }
        AnalysisEvent::TeamFailed { cause } => {
            eprintln!("{}", format!("Team analysis failed: {cause}").red());
        }
        AnalysisEvent::BatchCompleted { analyzed, total } => {
            println!(
                "{}",
                format!("Done: {analyzed}/{total} player(s) analyzed.").bright_green()
            );
        }
    }
}

fn print_block(text: &str) {
    for line in text.lines() {
        println!("{line}");
    }
}

fn print_help() {
    let lines = [
        "/players                  list players by position group",
        "/select <key|position>    select a player or a whole position",
        "/select all|gk|defence    select everyone, goalkeepers or defenders",
        "/deselect <key>|all       remove from the selection",
        "/analyze                  analyze the selected players",
        "/database                 show the player table",
        "/chat                     switch back to chat and show the conversation",
        "/memory                   show what has been learned so far",
        "/reset                    clear the shared memory",
        "/quit                     exit",
        "anything else             ask the analyst",
    ];
    for line in lines {
        println!("{}", line.bright_black());
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    // ===== Configuration =====
    let config_service = ConfigService::with_path(args.config.clone());
    let mut config = match &args.config {
        Some(path) => config_service
            .load()
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => config_service.get_config(),
    };
    if let Some(model) = args.model {
        config.model = model;
    }
    let dataset_path = args
        .data
        .unwrap_or_else(|| PathBuf::from(&config.dataset_path));

    // ===== Player dataset =====
    let catalog = JsonPlayerDataset::new(&dataset_path)
        .load_catalog()
        .await
        .with_context(|| format!("failed to load players from {}", dataset_path.display()))?;

    // ===== Text generation =====
    let secrets = SecretServiceImpl::default();
    let generator: Option<Arc<dyn TextGenerator>> =
        match GeminiApiAgent::from_secret_service(&secrets, Some(&config.model)).await {
            Ok(agent) => Some(Arc::new(agent)),
            Err(e) if e.is_missing_credential() => {
                eprintln!("{}", format!("Error: {e}").red());
                None
            }
            Err(e) => return Err(e.into()),
        };

    let mut repl = Repl {
        classifier: PositionClassifier::new(&config.positions),
        config,
        catalog,
        memory: memory::shared(),
        generator,
        state: SessionState::new(),
    };

    tracing::info!(
        "[Scout] Session {} started with {} players",
        repl.state.session_id,
        repl.catalog.len()
    );

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Scout ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "{} players loaded. Type '/help' for commands or 'quit' to exit.",
            repl.catalog.len()
        )
        .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let Some(command) = Command::parse(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.as_str());
                if !repl.dispatch(command).await {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
