//! Tracing setup: console on stderr plus a daily rolling file.

use crate::bootstrap::Settings;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_FILE_PREFIX: &str = "vertex-architect.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides both layers. Otherwise the file records `info` (or
/// the configured `log_level`), the console only warnings, and `-v` raises
/// both to `debug`. The returned guard flushes the file writer on drop.
pub fn init(verbose: bool, settings: &Settings) -> Result<Option<WorkerGuard>> {
    let file_level = if verbose {
        "debug"
    } else {
        settings.config.log_level.as_deref().unwrap_or("info")
    };
    let console_level = if verbose { "debug" } else { "warn" };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter_or(console_level));

    let mut file_error = None;
    let (file_layer, guard) = match std::fs::create_dir_all(&settings.logs_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&settings.logs_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter_or(file_level));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            file_error = Some(e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(e) = file_error {
        tracing::warn!(
            "File logging disabled, cannot create {}: {}",
            settings.logs_dir.display(),
            e
        );
    }
    tracing::debug!("Logging initialized");
    Ok(guard)
}

fn env_filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
