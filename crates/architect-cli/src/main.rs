use anyhow::Result;
use architect_core::prompt::{CreativityLevel, PromptStyle};
use architect_core::session::OutputTab;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod bootstrap;
mod commands;
mod logging;
mod render;
mod repl;

#[derive(Parser)]
#[command(name = "vertex-architect", version)]
#[command(about = "Vertex Architect - turn a rough idea into a structured super prompt", long_about = None)]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep config, history and logs under this directory
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Fallback API key when none is stored
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Generate a super prompt from an idea and/or files
    Generate(GenerateArgs),
    /// Execute the super prompt of a history entry
    Run {
        /// History entry ID
        id: String,
    },
    /// Browse saved sessions
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Estimate input tokens and cost without calling the model
    Estimate {
        #[arg(long, default_value = "")]
        idea: String,
        #[arg(long = "attach", value_name = "PATH")]
        attachments: Vec<PathBuf>,
    },
    /// Write a history entry's prompt or result to a markdown file
    Export {
        /// History entry ID
        id: String,
        #[arg(long, default_value = "prompt", value_parser = parse_tab)]
        tab: OutputTab,
        /// Target directory (defaults to the exports directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Interactive studio
    Studio,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Set { key: String },
    /// Remove the stored API key
    Clear,
    /// Show whether a key is configured
    Status,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List,
    /// Print an entry's prompt and result
    Show { id: String },
    /// Permanently delete an entry
    Delete { id: String },
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// The rough idea
    #[arg(long, default_value = "")]
    pub idea: String,
    #[arg(long, default_value = "general", value_parser = parse_style)]
    pub style: PromptStyle,
    #[arg(long, default_value = "medium", value_parser = parse_creativity)]
    pub creativity: CreativityLevel,
    /// Image or PDF to include (repeatable)
    #[arg(long = "attach", value_name = "PATH")]
    pub attachments: Vec<PathBuf>,
    /// Execute the generated prompt right away
    #[arg(long)]
    pub run: bool,
}

pub(crate) fn parse_style(value: &str) -> Result<PromptStyle, String> {
    PromptStyle::parse_lenient(value).ok_or_else(|| {
        format!("unknown style '{value}' (expected one of: {})", render::style_names())
    })
}

pub(crate) fn parse_creativity(value: &str) -> Result<CreativityLevel, String> {
    CreativityLevel::parse_lenient(value)
        .ok_or_else(|| format!("unknown creativity '{value}' (expected low, medium or high)"))
}

fn parse_tab(value: &str) -> Result<OutputTab, String> {
    value.parse()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            render::error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = bootstrap::Settings::resolve(cli.config.as_deref(), cli.data_dir.as_deref())?;
    let _log_guard = logging::init(cli.verbose, &settings)?;
    let app = bootstrap::AppContext::build(settings, cli.api_key).await?;

    match cli.command {
        Commands::Key { action } => match action {
            KeyAction::Set { key } => commands::key::set(&app, &key).await,
            KeyAction::Clear => commands::key::clear(&app).await,
            KeyAction::Status => commands::key::status(&app).await,
        },
        Commands::Generate(args) => commands::generate::generate(&app, args).await,
        Commands::Run { id } => commands::generate::run_entry(&app, &id).await,
        Commands::History { action } => match action {
            HistoryAction::List => commands::history::list(&app).await,
            HistoryAction::Show { id } => commands::history::show(&app, &id).await,
            HistoryAction::Delete { id } => commands::history::delete(&app, &id).await,
        },
        Commands::Estimate { idea, attachments } => {
            commands::estimate::estimate(&app, &idea, &attachments).await
        }
        Commands::Export { id, tab, out } => {
            commands::export::export(&app, &id, tab, out.as_deref()).await
        }
        Commands::Studio => repl::run(&app).await,
    }
}
