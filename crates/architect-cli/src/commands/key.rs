use crate::bootstrap::AppContext;
use crate::render;
use anyhow::{Result, bail};

pub async fn set(app: &AppContext, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        bail!("API key must not be empty (use `key clear` to remove it)");
    }
    app.studio.set_api_key(key).await?;
    render::success("API key saved");
    Ok(())
}

pub async fn clear(app: &AppContext) -> Result<()> {
    app.studio.set_api_key("").await?;
    render::success("Stored API key removed");
    if app.studio.has_api_key().await {
        render::hint("A key is still available from GEMINI_API_KEY.");
    }
    Ok(())
}

pub async fn status(app: &AppContext) -> Result<()> {
    if app.studio.has_api_key().await {
        render::success("API key: configured");
    } else {
        render::hint("API key: not configured (run `vertex-architect key set <KEY>`)");
    }
    Ok(())
}
