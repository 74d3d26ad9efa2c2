//! History entry domain model.

use crate::prompt::{CreativityLevel, PromptStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static ATTACHMENT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \[\d+ file\(s\)\]$").expect("valid attachment suffix pattern"));

/// A persisted record of one generation (and optionally its execution).
///
/// Entries are immutable apart from `final_result`, which is filled in when
/// the bound prompt is executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch
    #[serde(rename = "timestamp")]
    pub created_at: i64,
    /// Idea text, annotated with the attachment count when files were used
    #[serde(rename = "idea")]
    pub idea_summary: String,
    pub style: PromptStyle,
    pub creativity: CreativityLevel,
    pub generated_prompt: String,
    /// Empty until the prompt is executed
    #[serde(default)]
    pub final_result: String,
}

impl HistoryEntry {
    /// Creates an entry for a freshly generated super prompt.
    pub fn new(
        idea: &str,
        attachment_count: usize,
        style: PromptStyle,
        creativity: CreativityLevel,
        generated_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
            idea_summary: summarize_idea(idea, attachment_count),
            style,
            creativity,
            generated_prompt: generated_prompt.into(),
            final_result: String::new(),
        }
    }

    /// The idea text without the attachment annotation.
    pub fn idea(&self) -> &str {
        strip_attachment_suffix(&self.idea_summary)
    }

    pub fn has_result(&self) -> bool {
        !self.final_result.is_empty()
    }

    /// Local time of creation, formatted `HH:MM`.
    pub fn created_time_label(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.created_at)
            .map(|utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%H:%M")
                    .to_string()
            })
            .unwrap_or_default()
    }
}

pub fn summarize_idea(idea: &str, attachment_count: usize) -> String {
    if attachment_count > 0 {
        format!("{idea} [{attachment_count} file(s)]")
    } else {
        idea.to_string()
    }
}

pub fn strip_attachment_suffix(summary: &str) -> &str {
    match ATTACHMENT_SUFFIX.find(summary) {
        Some(m) => &summary[..m.start()],
        None => summary,
    }
}
