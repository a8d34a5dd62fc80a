//! Diagnostics for weeklytool.
//!
//! `weeklytool paste` hands its result to the editor over stdout, so log
//! records must never land there. They go to an append-only file in the
//! per-user state dir (`~/.local/state/weeklytool/weeklytool.log`); stderr is
//! only used when that file cannot be opened. `RUST_LOG` overrides the filter.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Library and binary at debug, everything else at info.
const DEFAULT_FILTER: &str = "info,weekly_core=debug,weeklytool=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Location of the log file; the state dir is created if missing.
pub fn log_file_path() -> Result<PathBuf> {
    let state_dir = xdg::BaseDirectories::with_prefix("weeklytool")?.get_state_home();
    fs::create_dir_all(&state_dir)
        .with_context(|| format!("create state dir {}", state_dir.display()))?;
    Ok(state_dir.join("weeklytool.log"))
}

/// Hands out clones of the log file handle. A failed clone drops to stderr for
/// that record rather than losing it or touching stdout.
struct LogFile(File);

enum LogSink {
    File(File),
    Stderr(io::Stderr),
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr(e) => e.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => LogSink::File(f),
            Err(_) => LogSink::Stderr(io::stderr()),
        }
    }
}

/// Installs the file subscriber. Returns Err (without installing anything) if
/// the log file cannot be opened, so the caller can use [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(LogFile(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing init: {}", e))?;

    tracing::debug!("logging to {}", path.display());
    Ok(())
}

/// Stderr-only subscriber for when the state dir is unusable.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
