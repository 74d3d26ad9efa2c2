//! Terminal output helpers.

use architect_application::StudioSnapshot;
use architect_core::estimate::Estimate;
use architect_core::history::HistoryEntry;
use architect_core::prompt::{CreativityLevel, PromptStyle};
use architect_core::session::{Notice, NoticeLevel, OutputTab};
use colored::Colorize;
use strum::IntoEnumIterator;

/// Length of the ID prefix shown in listings.
pub const SHORT_ID_LEN: usize = 8;

pub fn error(err: &anyhow::Error) {
    tracing::debug!("Command failed: {:#}", err);
    eprintln!("{}", format!("Error: {err}").red());
}

pub fn success(message: &str) {
    println!("{}", message.bright_green());
}

pub fn hint(message: &str) {
    println!("{}", message.bright_black());
}

pub fn notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", format!("✓ {}", notice.message).bright_green()),
        NoticeLevel::Warning => println!("{}", format!("! {}", notice.message).yellow()),
    }
}

pub fn style_names() -> String {
    PromptStyle::iter()
        .map(|style| style.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn styles() {
    for style in PromptStyle::iter() {
        println!("  {} {}", format!("{:<16}", style.to_string()).cyan(), style.label());
    }
}

pub fn creativity_levels() {
    for level in CreativityLevel::iter() {
        println!(
            "  {} {} (temperature {})",
            format!("{:<16}", level.to_string()).cyan(),
            level.label(),
            level.temperature()
        );
    }
}

pub fn estimate(label: &str, estimate: &Estimate) {
    println!(
        "{} {} chars · ~{} tokens · {}",
        format!("{label}:").bright_black(),
        estimate.characters,
        estimate.tokens,
        estimate.cost.bright_yellow()
    );
}

/// Hides all but the last four characters of a key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn history_list(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        hint("No history yet.");
        return;
    }

    for entry in entries {
        let status = if entry.has_result() {
            format!("{:<6}", "done").green()
        } else {
            format!("{:<6}", "prompt").yellow()
        };
        println!(
            "{}  {}  {:<10} {}  {}",
            short_id(&entry.id).cyan(),
            entry.created_time_label().bright_black(),
            entry.style.badge(),
            status,
            entry.idea_summary
        );
    }
}

pub fn history_entry(entry: &HistoryEntry) {
    println!("{} {}", "ID:".bright_black(), entry.id);
    println!("{} {}", "Created:".bright_black(), entry.created_time_label());
    println!("{} {}", "Idea:".bright_black(), entry.idea_summary);
    println!(
        "{} {} / {}",
        "Style:".bright_black(),
        entry.style.label(),
        entry.creativity.label()
    );
    section("Super prompt", &entry.generated_prompt);
    if entry.has_result() {
        section("Result", &entry.final_result);
    }
}

pub fn section(title: &str, body: &str) {
    println!();
    println!("{}", format!("── {title} ──").bright_magenta().bold());
    println!("{body}");
}

/// Draft summary shown by the studio's `/show`.
pub fn snapshot(snapshot: &StudioSnapshot) {
    let draft = &snapshot.draft;
    println!("{} {}", "Phase:".bright_black(), snapshot.phase);
    println!(
        "{} {}",
        "Idea:".bright_black(),
        if draft.idea.is_empty() {
            "(empty)".bright_black().to_string()
        } else {
            draft.idea.clone()
        }
    );
    println!(
        "{} {} / {}",
        "Style:".bright_black(),
        draft.style.label(),
        draft.creativity.label()
    );
    for (index, attachment) in draft.attachments.iter().enumerate() {
        println!(
            "  [{}] {} ({}, {} bytes)",
            index,
            attachment.name,
            attachment.mime_type,
            attachment.size()
        );
    }
    estimate("Input", &snapshot.input_estimate);

    if let Some(error) = &draft.error {
        println!("{}", error.red());
    }

    if !snapshot.displayed_text().is_empty() {
        let title = match draft.displayed_tab {
            OutputTab::Prompt => "Super prompt",
            OutputTab::Result => "Result",
        };
        section(title, snapshot.displayed_text());
        estimate("Output", &snapshot.output_estimate);
    }
}
