//! File logging
//!
//! The terminal belongs to the UI, so every event goes to a daily rolling
//! file under the log directory. Production writes JSON lines.

use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "registro_tui=info,registro_client=info";

/// Daily files kept before the oldest is removed
const MAX_LOG_FILES: usize = 14;

/// Install the global subscriber; keep the guard alive until exit
pub fn init_file_logger(
    default_filter: &str,
    json_format: bool,
    log_dir: &Path,
) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("registro-tui")
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let registry = tracing_subscriber::registry().with(env_filter);
    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(writer),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init()?;
    }
    Ok(guard)
}
