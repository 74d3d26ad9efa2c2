//! Interactive studio on top of rustyline.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use architect_core::session::{Notice, OutputTab};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::bootstrap::AppContext;
use crate::commands::{self, generate::report_attachments};
use crate::{parse_creativity, parse_style, render};

const COMMANDS: [&str; 17] = [
    "/new",
    "/idea",
    "/style",
    "/creativity",
    "/attach",
    "/detach",
    "/generate",
    "/run",
    "/tab",
    "/history",
    "/load",
    "/delete",
    "/show",
    "/export",
    "/key",
    "/help",
    "/quit",
];

#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    New,
    Idea(String),
    Style(Option<String>),
    Creativity(Option<String>),
    Attach(Vec<PathBuf>),
    Detach(usize),
    Generate,
    Run,
    Tab(OutputTab),
    History,
    Load(String),
    Delete(String),
    Show,
    Export(Option<PathBuf>),
    Key(String),
    Help,
    Quit,
    Invalid(String),
}

/// Parses one input line. Text without a leading `/` replaces the idea.
fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if !line.starts_with('/') {
        return ReplCommand::Idea(line.to_string());
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    match command {
        "/new" => ReplCommand::New,
        "/idea" => ReplCommand::Idea(rest.to_string()),
        "/style" => ReplCommand::Style(argument),
        "/creativity" => ReplCommand::Creativity(argument),
        "/attach" if rest.is_empty() => ReplCommand::Invalid("Usage: /attach <PATH>...".into()),
        "/attach" => ReplCommand::Attach(rest.split_whitespace().map(PathBuf::from).collect()),
        "/detach" => match rest.parse() {
            Ok(index) => ReplCommand::Detach(index),
            Err(_) => ReplCommand::Invalid("Usage: /detach <INDEX>".into()),
        },
        "/generate" => ReplCommand::Generate,
        "/run" => ReplCommand::Run,
        "/tab" => match rest.parse() {
            Ok(tab) => ReplCommand::Tab(tab),
            Err(e) => ReplCommand::Invalid(e),
        },
        "/history" => ReplCommand::History,
        "/load" if rest.is_empty() => ReplCommand::Invalid("Usage: /load <ID>".into()),
        "/load" => ReplCommand::Load(rest.to_string()),
        "/delete" if rest.is_empty() => ReplCommand::Invalid("Usage: /delete <ID>".into()),
        "/delete" => ReplCommand::Delete(rest.to_string()),
        "/show" => ReplCommand::Show,
        "/export" => ReplCommand::Export(argument.map(PathBuf::from)),
        "/key" => ReplCommand::Key(rest.to_string()),
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        other => ReplCommand::Invalid(format!("Unknown command: {other} (try /help)")),
    }
}

/// Rustyline helper providing slash-command completion and hints.
struct StudioHelper;

impl Helper for StudioHelper {}

impl Completer for StudioHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for StudioHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for StudioHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for StudioHelper {}

pub async fn run(app: &AppContext) -> Result<()> {
    let mut rl: Editor<StudioHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(StudioHelper));

    println!("{}", "=== Vertex Architect Studio ===".bright_magenta().bold());
    render::hint("Type your idea, then /generate. /help lists all commands.");
    if !app.studio.has_api_key().await {
        render::hint("No API key configured yet: /key <KEY>");
    }
    println!();

    let mut last_notice: Option<Notice> = None;

    loop {
        match rl.readline("architect> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let command = parse_command(&line);
                if command == ReplCommand::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if let Err(e) = dispatch(app, command).await {
                    render::error(&e);
                }

                if let Some(notice) = app.studio.snapshot().await.notice
                    && last_notice.as_ref() != Some(&notice)
                {
                    render::notice(&notice);
                    last_notice = Some(notice);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn dispatch(app: &AppContext, command: ReplCommand) -> Result<()> {
    let studio = &app.studio;

    match command {
        ReplCommand::New => studio.new_project().await,
        ReplCommand::Idea(idea) => {
            studio.set_idea(idea).await;
            let snapshot = studio.snapshot().await;
            render::estimate("Input", &snapshot.input_estimate);
        }
        ReplCommand::Style(None) => render::styles(),
        ReplCommand::Style(Some(value)) => {
            let style = parse_style(&value).map_err(anyhow::Error::msg)?;
            studio.set_style(style).await;
            render::success(&format!("Style: {}", style.label()));
        }
        ReplCommand::Creativity(None) => render::creativity_levels(),
        ReplCommand::Creativity(Some(value)) => {
            let level = parse_creativity(&value).map_err(anyhow::Error::msg)?;
            studio.set_creativity(level).await;
            render::success(&format!("Creativity: {}", level.label()));
        }
        ReplCommand::Attach(paths) => {
            let report = studio.attach_files(&paths).await;
            report_attachments(&report);
            let snapshot = studio.snapshot().await;
            render::estimate("Input", &snapshot.input_estimate);
        }
        ReplCommand::Detach(index) => match studio.remove_attachment(index).await {
            Some(attachment) => render::success(&format!("Removed {}", attachment.name)),
            None => render::hint(&format!("No attachment at index {index}")),
        },
        ReplCommand::Generate => {
            render::hint("Generating super prompt...");
            if let Some(entry) = studio.generate().await? {
                let snapshot = studio.snapshot().await;
                render::section("Super prompt", &entry.generated_prompt);
                render::estimate("Output", &snapshot.output_estimate);
            }
        }
        ReplCommand::Run => {
            render::hint("Executing super prompt...");
            if let Some(result) = studio.execute().await? {
                let snapshot = studio.snapshot().await;
                render::section("Result", &result);
                render::estimate("Output", &snapshot.output_estimate);
            }
        }
        ReplCommand::Tab(tab) => {
            studio.show_tab(tab).await;
            render::snapshot(&studio.snapshot().await);
        }
        ReplCommand::History => render::history_list(&studio.history().entries().await),
        ReplCommand::Load(id) => {
            let entries = studio.history().entries().await;
            let id = commands::resolve_entry(&entries, &id)?.id.clone();
            studio.load_from_history(&id).await?;
            render::snapshot(&studio.snapshot().await);
        }
        ReplCommand::Delete(id) => {
            let entries = studio.history().entries().await;
            let id = commands::resolve_entry(&entries, &id)?.id.clone();
            studio.delete_history(&id).await?;
            render::success(&format!("Deleted {}", render::short_id(&id)));
        }
        ReplCommand::Show => render::snapshot(&studio.snapshot().await),
        ReplCommand::Export(out) => {
            let snapshot = studio.snapshot().await;
            let path = commands::export::write(
                app,
                snapshot.draft.displayed_tab,
                snapshot.displayed_text(),
                out.as_deref(),
            )
            .await?;
            render::success(&format!("Exported to {}", path.display()));
        }
        ReplCommand::Key(key) => studio.set_api_key(&key).await?,
        ReplCommand::Help => help(),
        ReplCommand::Invalid(message) => render::hint(&message),
        ReplCommand::Quit => {}
    }
    Ok(())
}

fn help() {
    let lines = [
        ("<text>", "Replace the idea"),
        ("/idea <text>", "Replace the idea"),
        ("/style [NAME]", "Show or set the prompt style"),
        ("/creativity [LEVEL]", "Show or set the creativity level"),
        ("/attach <PATH>...", "Attach images or PDFs"),
        ("/detach <INDEX>", "Remove an attachment"),
        ("/generate", "Generate the super prompt"),
        ("/run", "Execute the super prompt"),
        ("/tab prompt|result", "Switch the displayed output"),
        ("/show", "Show the current draft"),
        ("/export [DIR]", "Save the displayed output as markdown"),
        ("/history", "List saved sessions"),
        ("/load <ID>", "Load a saved session"),
        ("/delete <ID>", "Delete a saved session"),
        ("/new", "Start a new project"),
        ("/key <KEY>", "Save the API key (empty removes it)"),
        ("/quit", "Exit"),
    ];
    for (usage, description) in lines {
        println!("  {} {}", format!("{usage:<22}").cyan(), description);
    }
}
