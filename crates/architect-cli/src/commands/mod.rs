pub mod estimate;
pub mod export;
pub mod generate;
pub mod history;
pub mod key;

use anyhow::{Result, bail};
use architect_core::error::ArchitectError;
use architect_core::history::HistoryEntry;

/// Finds the entry whose ID equals or uniquely starts with `id`.
pub fn resolve_entry<'a>(entries: &'a [HistoryEntry], id: &str) -> Result<&'a HistoryEntry> {
    let id = id.trim();
    if let Some(entry) = entries.iter().find(|entry| entry.id == id) {
        return Ok(entry);
    }
    if id.is_empty() {
        return Err(ArchitectError::not_found("HistoryEntry", id).into());
    }

    let mut matches = entries.iter().filter(|entry| entry.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Ok(entry),
        (Some(_), Some(_)) => bail!("ID prefix '{}' matches more than one entry", id),
        (None, _) => Err(ArchitectError::not_found("HistoryEntry", id).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_core::prompt::{CreativityLevel, PromptStyle};

    fn entry(id: &str) -> HistoryEntry {
        let mut entry = HistoryEntry::new("idea", 0, PromptStyle::General, CreativityLevel::Medium, "p");
        entry.id = id.to_string();
        entry
    }

    #[test]
    fn resolves_exact_and_unique_prefix() {
        let entries = vec![entry("abc123"), entry("abd456")];
        assert_eq!(resolve_entry(&entries, "abc123").unwrap().id, "abc123");
        assert_eq!(resolve_entry(&entries, "abd").unwrap().id, "abd456");
    }

    #[test]
    fn ambiguous_or_missing_prefix_fails() {
        let entries = vec![entry("abc123"), entry("abd456")];
        assert!(resolve_entry(&entries, "ab").is_err());
        let missing = resolve_entry(&entries, "zzz").unwrap_err();
        assert!(missing.downcast_ref::<ArchitectError>().unwrap().is_not_found());
        assert!(resolve_entry(&entries, "").is_err());
    }
}
