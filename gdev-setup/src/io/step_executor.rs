//! Run a step command once, logging its output to a fresh file.

use std::fs::File;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::core::types::CommandStatus;
use crate::error::{RuntimeFailure, SetupError};
use crate::io::context::ExecutionContext;
use crate::io::process::{CommandRequest, CommandRunner};
use crate::plan::StepDefinition;

/// Result of one step attempt that could be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepExecutionResult {
    /// Log file holding this attempt's combined output.
    pub log_path: PathBuf,
    /// `None` when the command exited 0.
    pub failure: Option<RuntimeFailure>,
}

/// Run `step.command` in the project root with the inherited environment.
///
/// Returns [`SetupError::Preparation`] if the log file cannot be created or the
/// process cannot be started.
#[instrument(skip_all, fields(step = %step.key))]
pub fn execute_step<R: CommandRunner>(
    runner: &R,
    context: &ExecutionContext,
    step: &StepDefinition,
) -> Result<StepExecutionResult, SetupError> {
    let subject = format!("step '{}'", step.key);
    let log_path = context.next_log_path(&step.key);
    let log_file = File::create(&log_path).map_err(|err| {
        SetupError::preparation(
            subject.as_str(),
            format!("create log file {}", log_path.display()),
            err,
        )
    })?;

    let request = CommandRequest {
        command: step.command.clone(),
        workdir: context.project_root().to_path_buf(),
        env: Vec::new(),
        timeout: context.timeout(),
    };
    let status = runner
        .run(&request, log_file)
        .map_err(|err| SetupError::preparation(subject.as_str(), "run command", err))?;

    debug!(%status, log_path = %log_path.display(), "step attempt finished");
    Ok(StepExecutionResult {
        log_path,
        failure: classify(status),
    })
}

fn classify(status: CommandStatus) -> Option<RuntimeFailure> {
    if status.success() {
        None
    } else {
        Some(RuntimeFailure { status })
    }
}
