//! Logging init: append to a caller-chosen log file, or fall back to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,urlharvest_core=debug,urlharvest=debug";

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(std::fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(std::fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open (creating parent directories) the log file in append mode.
fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create log dir {}", parent.display()))?;
        }
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Initialize structured logging appending to `path`.
///
/// Returns Err only when the log file cannot be created or opened. If a global
/// subscriber is already installed (e.g. a second harvest in the same process)
/// the existing one is kept and this still succeeds.
pub fn init_logging(path: &Path) -> Result<PathBuf> {
    let file = open_log_file(path)?;
    let writer: BoxMakeWriter = BoxMakeWriter::new(FileMakeWriter(file));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("urlharvest logging initialized at {}", path.display());
    } else {
        tracing::debug!("global subscriber already set; keeping it");
    }

    Ok(path.to_path_buf())
}

fn stderr_subscriber() -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .finish()
}

/// Initialize logging to stderr only (no file), for commands that never open
/// a log file. Keeps an already installed subscriber.
pub fn init_logging_stderr() {
    if tracing::subscriber::set_global_default(stderr_subscriber()).is_err() {
        tracing::debug!("global subscriber already set; keeping it");
    }
}

/// Runs `f` with a stderr subscriber as the thread's default.
///
/// Covers work done before the log file is known (config loading), without
/// taking the global slot the file logger needs later.
pub fn with_stderr_logging<T>(f: impl FnOnce() -> T) -> T {
    tracing::subscriber::with_default(stderr_subscriber(), f)
}
