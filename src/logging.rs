use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

use crate::constants::{DEFAULT_LOG_DIRECTIVE, LOG_FILE_PREFIX};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

// stdout carries the run summary, so console logs go to stderr
fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_writer(std::io::stderr)
}

/// Initializes logging: console output, plus daily-rotated JSON files when a
/// log directory is configured.
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// for the lifetime of the process.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(console_layer())
            .init();
        return None;
    };

    if let Err(e) = fs::create_dir_all(dir) {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(console_layer())
            .init();
        tracing::warn!("Could not create log directory {}: {}", dir.display(), e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer())
        .with(file_layer)
        .init();

    Some(guard)
}
