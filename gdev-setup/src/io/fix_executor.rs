//! Run a fix command against a failed step and classify the result.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::core::types::{CommandStatus, FixOutcome};
use crate::error::SetupError;
use crate::io::context::ExecutionContext;
use crate::io::process::{CommandRequest, CommandRunner};
use crate::plan::{FixDefinition, StepDefinition};

/// Environment variable exposing the failing step's latest log to fix scripts.
pub const STEP_LOG_PATH_VAR: &str = "STEP_LOG_PATH";

/// Classified result of one fix invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixExecution {
    pub outcome: FixOutcome,
    pub status: CommandStatus,
    /// Log file holding the fix's own output.
    pub log_path: PathBuf,
}

/// Run `fix.command` for `step`, exposing `step_log_path` as `STEP_LOG_PATH`.
///
/// Exit 0 is [`FixOutcome::Success`], exit 1 is [`FixOutcome::Skipped`], anything
/// else is [`FixOutcome::Failed`]. Failing to start is a [`SetupError::Preparation`].
#[instrument(skip_all, fields(step = %step.key, fix = %fix.key))]
pub fn execute_fix<R: CommandRunner>(
    runner: &R,
    context: &ExecutionContext,
    step: &StepDefinition,
    fix: &FixDefinition,
    step_log_path: &Path,
) -> Result<FixExecution, SetupError> {
    let subject = format!("fix '{}' for step '{}'", fix.key, step.key);
    let step_log_path = std::path::absolute(step_log_path).map_err(|err| {
        SetupError::preparation(
            subject.as_str(),
            format!("resolve step log path {}", step_log_path.display()),
            err,
        )
    })?;

    let log_path = context.next_log_path(&format!("{}.{}", step.key, fix.key));
    let log_file = File::create(&log_path).map_err(|err| {
        SetupError::preparation(
            subject.as_str(),
            format!("create log file {}", log_path.display()),
            err,
        )
    })?;

    let request = CommandRequest {
        command: fix.command.clone(),
        workdir: context.project_root().to_path_buf(),
        env: vec![(
            STEP_LOG_PATH_VAR.to_string(),
            OsString::from(step_log_path),
        )],
        timeout: context.timeout(),
    };
    let status = runner
        .run(&request, log_file)
        .map_err(|err| SetupError::preparation(subject.as_str(), "run command", err))?;

    let outcome = FixOutcome::classify(status);
    debug!(%status, ?outcome, "fix finished");
    Ok(FixExecution {
        outcome,
        status,
        log_path,
    })
}
