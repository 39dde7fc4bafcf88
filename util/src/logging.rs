//! Tracing subscriber setup shared by the grader binary.

use std::fs;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory the rolling log files are written into.
pub const LOG_DIR: &str = "logs";

/// Installs the global subscriber: a daily-rolling file layer, plus the console when requested.
///
/// The filter is read from `LOG_LEVEL` and falls back to `default_filter`.
/// Keep the returned guard alive for the life of the process or buffered lines are lost.
pub fn init_logging(log_file: &str, default_filter: &str, log_to_stdout: bool) -> WorkerGuard {
    fs::create_dir_all(LOG_DIR).ok();

    let file_appender = rolling::daily(LOG_DIR, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if log_to_stdout {
        // stderr, so stdout stays reserved for the payload echo.
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true);
        registry.with(console_layer).init();
    } else {
        registry.init();
    }

    guard
}
