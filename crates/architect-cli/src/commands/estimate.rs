use super::generate::report_attachments;
use crate::bootstrap::AppContext;
use crate::render;
use anyhow::Result;
use std::path::PathBuf;

pub async fn estimate(app: &AppContext, idea: &str, attachments: &[PathBuf]) -> Result<()> {
    app.studio.set_idea(idea).await;
    if !attachments.is_empty() {
        let report = app.studio.attach_files(attachments).await;
        report_attachments(&report);
    }

    let snapshot = app.studio.snapshot().await;
    render::estimate("Input", &snapshot.input_estimate);
    Ok(())
}
