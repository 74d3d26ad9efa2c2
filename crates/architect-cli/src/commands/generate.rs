use super::resolve_entry;
use crate::GenerateArgs;
use crate::bootstrap::AppContext;
use crate::render;
use anyhow::Result;
use architect_application::AttachReport;
use colored::Colorize;

pub async fn generate(app: &AppContext, args: GenerateArgs) -> Result<()> {
    let studio = &app.studio;
    studio.set_idea(args.idea).await;
    studio.set_style(args.style).await;
    studio.set_creativity(args.creativity).await;

    if !args.attachments.is_empty() {
        let report = studio.attach_files(&args.attachments).await;
        report_attachments(&report);
    }

    let snapshot = studio.snapshot().await;
    render::estimate("Input", &snapshot.input_estimate);
    render::hint("Generating super prompt...");

    let Some(entry) = studio.generate().await? else {
        return Ok(());
    };
    let snapshot = studio.snapshot().await;
    render::section("Super prompt", &entry.generated_prompt);
    render::estimate("Output", &snapshot.output_estimate);
    render::hint(&format!("Saved as {}", render::short_id(&entry.id)));

    if args.run {
        execute(app).await?;
    }
    Ok(())
}

/// Loads entry `id` and executes its super prompt.
pub async fn run_entry(app: &AppContext, id: &str) -> Result<()> {
    let entries = app.studio.history().entries().await;
    let id = resolve_entry(&entries, id)?.id.clone();
    app.studio.load_from_history(&id).await?;
    execute(app).await
}

async fn execute(app: &AppContext) -> Result<()> {
    render::hint("Executing super prompt...");
    if let Some(result) = app.studio.execute().await? {
        let snapshot = app.studio.snapshot().await;
        render::section("Result", &result);
        render::estimate("Output", &snapshot.output_estimate);
    }
    Ok(())
}

pub fn report_attachments(report: &AttachReport) {
    for name in &report.added {
        println!("{}", format!("+ {name}").green());
    }
    for (path, reason) in &report.rejected {
        println!("{}", format!("! {}: {}", path.display(), reason).yellow());
    }
}
