//! Markdown export of prompt and result text.

use architect_core::error::{ArchitectError, Result};
use architect_core::session::OutputTab;
use std::path::{Path, PathBuf};

/// Writes `content` to `<dir>/<tab file name>` and returns the path.
///
/// Empty content is refused, since there is nothing to download.
pub async fn export_markdown(dir: &Path, tab: OutputTab, content: &str) -> Result<PathBuf> {
    if content.is_empty() {
        return Err(ArchitectError::not_found("export content", tab.to_string()));
    }

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(tab.export_file_name());
    tokio::fs::write(&path, content).await?;
    tracing::info!("Exported {} to {}", tab, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_tab_specific_file() {
        let temp_dir = TempDir::new().unwrap();

        let prompt = export_markdown(temp_dir.path(), OutputTab::Prompt, "[PERSONA]")
            .await
            .unwrap();
        let result = export_markdown(temp_dir.path(), OutputTab::Result, "answer")
            .await
            .unwrap();

        assert_eq!(prompt.file_name().unwrap(), "vertex_architect_prompt.md");
        assert_eq!(result.file_name().unwrap(), "vertex_architect_result.md");
        assert_eq!(std::fs::read_to_string(prompt).unwrap(), "[PERSONA]");
        assert_eq!(std::fs::read_to_string(result).unwrap(), "answer");
    }

    #[tokio::test]
    async fn test_empty_content_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let err = export_markdown(temp_dir.path(), OutputTab::Result, "")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
