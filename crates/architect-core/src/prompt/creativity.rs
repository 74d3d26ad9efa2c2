//! Creativity level and its sampling temperature.

use super::style::normalize;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Coarse user-facing control mapped to a sampling temperature.
///
/// Unrecognized stored values fall back to [`CreativityLevel::Medium`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case")]
pub enum CreativityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl CreativityLevel {
    pub fn temperature(&self) -> f32 {
        match self {
            CreativityLevel::Low => 0.2,
            CreativityLevel::Medium => 0.5,
            CreativityLevel::High => 0.9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CreativityLevel::Low => "Low (Precise)",
            CreativityLevel::Medium => "Medium (Balanced)",
            CreativityLevel::High => "High (Creative)",
        }
    }

    pub fn parse_lenient(value: &str) -> Option<Self> {
        let normalized = normalize(value);
        CreativityLevel::iter().find(|level| {
            normalize(&level.to_string()) == normalized || normalize(level.label()) == normalized
        })
    }
}

impl From<String> for CreativityLevel {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value).unwrap_or_default()
    }
}
