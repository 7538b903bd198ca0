use std::io;
use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Skin};

const LOG_FILE_PREFIX: &str = "screener.log";
// hyper and rustls are chatty at debug, keep them out of the file by default
const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,reqwest=warn,rustls=warn";

/// Where log lines go for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogOptions {
    pub(crate) dir: PathBuf,
    pub(crate) stderr: bool,
    /// `--log-to-stderr` was given but the TUI owns the terminal.
    pub(crate) stderr_refused: bool,
}

impl LogOptions {
    pub(crate) fn from_args(args: &Args) -> Self {
        let terminal_busy = args.skin == Skin::Tui && !args.check_health;
        let stderr_refused = args.log_to_stderr && terminal_busy;
        Self {
            dir: args.log_dir.clone(),
            stderr: args.log_to_stderr && !stderr_refused,
            stderr_refused,
        }
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// JSON lines into a daily `screener.log`, plus compact human lines on stderr
/// when allowed. The guard must outlive every log call.
pub(crate) fn init_tracing(options: &LogOptions) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&options.dir)
        .with_context(|| format!("failed to create log dir {}", options.dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&options.dir, LOG_FILE_PREFIX);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(false)
        .json();
    let stderr_layer = options.stderr.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(default_filter())
        .with(file_layer)
        .with(stderr_layer)
        .init();

    if options.stderr_refused {
        warn!("--log-to-stderr ignored while the tui skin is drawing");
    }
    Ok(file_guard)
}
