use super::resolve_entry;
use crate::bootstrap::AppContext;
use crate::render;
use anyhow::{Result, bail};
use architect_core::session::OutputTab;
use architect_infrastructure::export::export_markdown;
use std::path::{Path, PathBuf};

pub async fn export(app: &AppContext, id: &str, tab: OutputTab, out: Option<&Path>) -> Result<()> {
    let entries = app.studio.history().entries().await;
    let entry = resolve_entry(&entries, id)?;
    let content = match tab {
        OutputTab::Prompt => &entry.generated_prompt,
        OutputTab::Result => &entry.final_result,
    };

    let path = write(app, tab, content, out).await?;
    render::success(&format!("Exported to {}", path.display()));
    Ok(())
}

/// Writes `content` for `tab` into `out` or the default exports directory.
pub async fn write(
    app: &AppContext,
    tab: OutputTab,
    content: &str,
    out: Option<&Path>,
) -> Result<PathBuf> {
    if content.is_empty() {
        bail!("Nothing to export on the {} tab", tab);
    }
    let dir = out.unwrap_or(app.settings.exports_dir.as_path());
    Ok(export_markdown(dir, tab, content).await?)
}
