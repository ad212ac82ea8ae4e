//! Shared deterministic types for the setup core.
//!
//! These types define stable contracts between the executors, the retry loop and
//! the presentation layer. They carry no I/O.

use std::fmt;
use std::process::ExitStatus;

use serde::Serialize;

/// How a child process finished once it was successfully started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandStatus {
    /// Process exited on its own with this code.
    Exited { code: i32 },
    /// Process was terminated by a signal and has no exit code.
    Terminated,
    /// Process outlived the configured timeout and was killed.
    TimedOut { secs: u64 },
}

impl CommandStatus {
    pub fn from_exit_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::Exited { code },
            None => Self::Terminated,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, Self::Exited { code: 0 })
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited { code } => write!(f, "exit status {code}"),
            Self::Terminated => f.write_str("terminated by signal"),
            Self::TimedOut { secs } => write!(f, "timed out after {secs}s"),
        }
    }
}

/// Classification of a completed fix command.
///
/// Fix scripts signal their result through the exit code: `0` means the fix was
/// applied, `1` means it does not apply to the current situation, anything else
/// (including signals and timeouts) means it tried and failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixOutcome {
    Success,
    Skipped,
    Failed,
}

impl FixOutcome {
    pub fn classify(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Exited { code: 0 } => Self::Success,
            CommandStatus::Exited { code: 1 } => Self::Skipped,
            _ => Self::Failed,
        }
    }

    /// Whether this outcome consumes the fix for the rest of the step's lifetime.
    pub fn consumes_fix(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}
