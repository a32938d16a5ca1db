//! `tracing` setup.
//!
//! [`init`] installs the process-wide subscriber for applications.
//! [`dispatch`] builds a standalone one that can be handed to a window
//! manager so its output goes somewhere other than the global default.

use std::path::PathBuf;

use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Keeps the background log writer alive. Drop it last.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> Option<&std::path::Path> {
        self.log_dir.as_deref()
    }
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber.
///
/// With `config.directory` set, output goes to a daily rolling file in that
/// directory; otherwise to stderr. Returns `None` if a global subscriber is
/// already installed or the directory cannot be created.
pub fn init(config: &LoggingConfig) -> Option<LoggingGuard> {
    let filter = env_filter(&config.filter);
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let guard = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir).ok()?;
            let file_appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_writer(non_blocking).with_ansi(false))
                .try_init()
                .ok()?;
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_writer(std::io::stderr))
                .try_init()
                .ok()?;
            None
        }
    };

    tracing::info!(log_dir = ?config.directory, "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir: config.directory.clone(),
    })
}

/// A subscriber for `filter` writing to stderr, not installed globally.
pub fn dispatch(filter: &str) -> Dispatch {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        );
    Dispatch::new(subscriber)
}
