use super::resolve_entry;
use crate::bootstrap::AppContext;
use crate::render;
use anyhow::Result;

pub async fn list(app: &AppContext) -> Result<()> {
    let entries = app.studio.history().entries().await;
    render::history_list(&entries);
    Ok(())
}

pub async fn show(app: &AppContext, id: &str) -> Result<()> {
    let entries = app.studio.history().entries().await;
    let entry = resolve_entry(&entries, id)?;
    render::history_entry(entry);
    Ok(())
}

pub async fn delete(app: &AppContext, id: &str) -> Result<()> {
    let entries = app.studio.history().entries().await;
    let id = resolve_entry(&entries, id)?.id.clone();
    app.studio.delete_history(&id).await?;
    render::success(&format!("Deleted {}", render::short_id(&id)));
    Ok(())
}
