//! Prompt templates for player analysis, team analysis and chat.

use minijinja::Environment;
use scout_core::error::{Result, ScoutError};
use scout_core::memory::SharedMemory;
use scout_core::player::PlayerRecord;
use scout_core::session::{AnalysisResult, TranscriptEntry};
use serde::Serialize;

/// Persona and grounding rules for the chat assistant.
pub const SYSTEM_PROMPT: &str = "You are an expert football analyst specializing in player development and team composition analysis.
Be wise, friendly, and helpful in your responses without introducing yourself.
Provide practical, age-appropriate insights and recommendations.
Consider both individual potential and team-wide patterns.
Maintain a balanced perspective between immediate performance and long-term development.
Your knowledge comes from previously analyzed players and insights in the shared memory.";

const PLAYER_TEMPLATE: &str = r#"Analyze this football player's data considering age and performance metrics:

Player: {{ name }}
Age: {{ age }}
Position: {{ position }}
Performance Data: {{ performance_data }}

Consider:
1. Age-appropriate performance expectations
2. Position-specific requirements
3. Standout metrics and areas for improvement
4. Development potential based on age

Provide analysis in this format:
- Overall Assessment
- Key Strengths (2-3 points)
- Development Areas (2-3 points)
- Age-Specific Recommendations"#;

const TEAM_TEMPLATE: &str = r#"Analyze this football team based on the following player data:

Players Analyzed: {{ player_count }}
Position Distribution: {% for entry in distribution %}{{ entry.position }}: {{ entry.count }}{% if not loop.last %}, {% endif %}{% endfor %}


Individual Players:
{% for player in players %}
- {{ player.name }} ({{ player.age }}): {{ player.position }}
{% endfor %}

Provide:
1. Overall team composition assessment
2. Key strengths and gaps
3. Age distribution insights
4. Development recommendations
5. Position coverage analysis

Focus on practical, actionable insights."#;

const CHAT_TEMPLATE: &str = r#"{{ system_prompt }}

{% if results %}
Recent analysis results:
{% for result in results %}
- Analysis of {{ result.name }} ({{ result.position }})
{% endfor %}
{% endif %}
{% if has_team_analysis %}
Recent team analysis is also available.
{% endif %}
{% if analyzed_players %}
Previously analyzed players:
{% for player in analyzed_players %}
- {{ player.name }} ({{ player.position }})
{% endfor %}
{% endif %}
{% if team_insights %}
Team insights:
{% for insight in team_insights %}
- {{ insight }}
{% endfor %}
{% endif %}
{% if history %}
Recent conversation:
{% for line in history %}
{{ line.speaker }}: {{ line.content }}
{% endfor %}
{% endif %}

User query: {{ message }}"#;

#[derive(Serialize)]
struct PlayerLine<'a> {
    name: &'a str,
    age: String,
    position: &'a str,
}

#[derive(Serialize)]
struct PositionCount<'a> {
    position: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct PlayerMention<'a> {
    name: &'a str,
    position: &'a str,
}

#[derive(Serialize)]
struct HistoryLine<'a> {
    speaker: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatContext<'a> {
    system_prompt: &'static str,
    results: &'a [AnalysisResult],
    has_team_analysis: bool,
    analyzed_players: Vec<PlayerMention<'a>>,
    team_insights: &'a [String],
    history: Vec<HistoryLine<'a>>,
    message: &'a str,
}

/// Everything the chat prompt is built from.
pub struct ChatPromptInput<'a> {
    pub results: &'a [AnalysisResult],
    pub has_team_analysis: bool,
    pub memory: &'a SharedMemory,
    pub history: &'a [TranscriptEntry],
    pub message: &'a str,
}

/// Renders the fixed prompt templates.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        Self { env }
    }

    /// Prompt asking for a single player's assessment.
    pub fn player_analysis(&self, player: &PlayerRecord) -> Result<String> {
        self.render(
            PLAYER_TEMPLATE,
            minijinja::context! {
                name => &player.name,
                age => player.age_label(),
                position => &player.position,
                performance_data => player.performance_summary(),
            },
        )
    }

    /// Prompt asking for an aggregate view over a whole batch.
    ///
    /// The position tally covers only `players`, in first-seen order.
    pub fn team_analysis(&self, players: &[PlayerRecord]) -> Result<String> {
        let mut distribution: Vec<PositionCount<'_>> = Vec::new();
        for player in players {
            match distribution.iter_mut().find(|e| e.position == player.position) {
                Some(entry) => entry.count += 1,
                None => distribution.push(PositionCount {
                    position: &player.position,
                    count: 1,
                }),
            }
        }

        let lines: Vec<PlayerLine<'_>> = players
            .iter()
            .map(|p| PlayerLine {
                name: &p.name,
                age: p.age_label(),
                position: &p.position,
            })
            .collect();

        self.render(
            TEAM_TEMPLATE,
            minijinja::context! {
                player_count => players.len(),
                distribution => distribution,
                players => lines,
            },
        )
    }

    /// Composite chat prompt: persona, batch context, memory, history, query.
    pub fn chat(&self, input: &ChatPromptInput<'_>) -> Result<String> {
        let context = ChatContext {
            system_prompt: SYSTEM_PROMPT,
            results: input.results,
            has_team_analysis: input.has_team_analysis,
            analyzed_players: input
                .memory
                .analyzed_players()
                .iter()
                .map(|p| PlayerMention {
                    name: &p.name,
                    position: &p.position,
                })
                .collect(),
            team_insights: input.memory.team_insights(),
            history: input
                .history
                .iter()
                .map(|entry| HistoryLine {
                    speaker: entry.role.speaker(),
                    content: &entry.content,
                })
                .collect(),
            message: input.message,
        };
        self.render(CHAT_TEMPLATE, context)
    }

    fn render<S: Serialize>(&self, template: &str, context: S) -> Result<String> {
        self.env
            .render_str(template, context)
            .map_err(|e| ScoutError::internal(format!("prompt template failed: {e}")))
    }
}
