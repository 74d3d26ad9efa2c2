//! Workflow phase of the active draft.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Where the two-stage workflow currently stands.
///
/// ```text
/// Idle ──generate──▶ Generating ──ok──▶ PromptReady ──execute──▶ Executing ──ok──▶ Complete
///                       │                                            │
///                       └──err──▶ (phase before the request) ◀──err──┘
/// ```
///
/// `NewProject` returns to `Idle` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SessionPhase {
    Idle,
    Generating,
    PromptReady,
    Executing,
    Complete,
}

impl SessionPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Generating | SessionPhase::Executing)
    }
}

/// Which output the result pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OutputTab {
    #[default]
    Prompt,
    Result,
}

impl OutputTab {
    /// File name used when exporting this tab's text.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            OutputTab::Prompt => "vertex_architect_prompt.md",
            OutputTab::Result => "vertex_architect_result.md",
        }
    }
}

impl std::str::FromStr for OutputTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(OutputTab::Prompt),
            "result" => Ok(OutputTab::Result),
            other => Err(format!("unknown tab '{other}' (expected 'prompt' or 'result')")),
        }
    }
}
