//! Prompt style selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// The domain the super prompt is tailored for.
///
/// Stored values that do not match any variant fall back to [`PromptStyle::General`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case")]
pub enum PromptStyle {
    #[default]
    General,
    Coding,
    DataAnalysis,
    SalesMarketing,
    Academic,
    VertexExpert,
}

impl PromptStyle {
    /// Label shown to users and sent to the model.
    pub fn label(&self) -> &'static str {
        match self {
            PromptStyle::General => "General / Creative",
            PromptStyle::Coding => "Software Development",
            PromptStyle::DataAnalysis => "Data Analysis",
            PromptStyle::SalesMarketing => "Sales & Marketing",
            PromptStyle::Academic => "Academic / Research",
            PromptStyle::VertexExpert => "Vertex AI System Prompt",
        }
    }

    /// First word of the label, used for compact history badges.
    pub fn badge(&self) -> &'static str {
        self.label().split(' ').next().unwrap_or("General")
    }

    /// Parses a style leniently, accepting variant names in any case or
    /// separator style as well as the display label.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        let normalized = normalize(value);
        PromptStyle::iter().find(|style| {
            normalize(&style.to_string()) == normalized || normalize(style.label()) == normalized
        })
    }
}

impl From<String> for PromptStyle {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value).unwrap_or_default()
    }
}

pub(crate) fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
