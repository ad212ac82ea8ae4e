//! Terminal errors returned by the setup runner.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::CommandStatus;

/// A command ran but did not exit cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("command finished with {status}")]
pub struct RuntimeFailure {
    pub status: CommandStatus,
}

#[derive(Debug, Error)]
pub enum SetupError {
    /// The command could not even be attempted (log file or process spawn).
    /// Never retried.
    #[error("{subject}: {action}")]
    Preparation {
        subject: String,
        action: String,
        #[source]
        source: io::Error,
    },
    /// Every eligible fix was tried and the step still fails.
    #[error("step '{step}' failed to run (log: {})", log_path.display())]
    Exhausted {
        step: String,
        log_path: PathBuf,
        #[source]
        failure: RuntimeFailure,
    },
}

impl SetupError {
    pub fn preparation(
        subject: impl Into<String>,
        action: impl Into<String>,
        source: io::Error,
    ) -> Self {
        Self::Preparation {
            subject: subject.into(),
            action: action.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn exhausted_keeps_runtime_failure_as_source() {
        let err = SetupError::Exhausted {
            step: "baz".to_string(),
            log_path: PathBuf::from("/tmp/logs/1-baz.log"),
            failure: RuntimeFailure {
                status: CommandStatus::Exited { code: 1 },
            },
        };

        assert_eq!(
            err.to_string(),
            "step 'baz' failed to run (log: /tmp/logs/1-baz.log)"
        );
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "command finished with exit status 1");
    }

    #[test]
    fn preparation_chain_renders_with_anyhow() {
        let err = SetupError::preparation(
            "step 'foo'",
            "create log file /missing/1-foo.log",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );

        let rendered = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(
            rendered,
            "step 'foo': create log file /missing/1-foo.log: no such directory"
        );
    }
}
