use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

const DEFAULT_DIRECTIVE: &str = "pantheon_api=info";

/// Initializes console logging, plus a daily-rotated JSON file when
/// `log_dir` is configured.
///
/// The returned guard must be kept alive so buffered file logs are flushed on exit.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_deref().unwrap_or(DEFAULT_DIRECTIVE)));

    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) => {
            let _ = fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, "pantheon_api.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
