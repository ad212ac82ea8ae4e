//! Run-scoped execution context: project root, log directory, timeout.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

/// Prefix for the temporary directory holding one run's logs.
pub const LOG_DIR_PREFIX: &str = "gdev-setup";

/// Process-wide state shared by every step of one run.
///
/// The log directory is never cleaned up here; it outlives the run so users can
/// inspect failing output.
#[derive(Debug)]
pub struct ExecutionContext {
    project_root: PathBuf,
    log_dir: PathBuf,
    timeout: Option<Duration>,
    last_stamp: Cell<i64>,
}

impl ExecutionContext {
    pub fn new(project_root: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            log_dir: log_dir.into(),
            timeout: None,
            last_stamp: Cell::new(0),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Path for the next log file, `<unix-millis>-<key>.log`.
    ///
    /// Stamps strictly increase within a context, so two attempts inside the same
    /// millisecond still get distinct files.
    pub fn next_log_path(&self, key: &str) -> PathBuf {
        let now = chrono::Utc::now().timestamp_millis();
        let stamp = now.max(self.last_stamp.get() + 1);
        self.last_stamp.set(stamp);
        self.log_dir.join(format!("{stamp}-{key}.log"))
    }
}

/// Create a fresh, persistent temporary directory for this run's logs.
pub fn create_log_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(LOG_DIR_PREFIX)
        .tempdir()
        .context("create log output directory")?
        .keep();
    debug!(dir = %dir.display(), "created log directory");
    Ok(dir)
}
