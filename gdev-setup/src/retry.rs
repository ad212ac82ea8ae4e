//! Fix-and-retry state machine for a single step.
//!
//! A step runs; if it fails, its fixes are tried in declared order. The first fix
//! that succeeds triggers a fresh attempt of the step, and a new failure starts a
//! new cycle over the fixes that are still eligible. Fixes that succeeded or
//! failed are consumed for the rest of the step's resolution; skipped fixes stay
//! eligible. When a cycle ends without a successful fix the step is exhausted.
//!
//! The retry is an explicit loop so the number of cycles never grows the stack.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::core::attempts::StepAttemptState;
use crate::core::events::SetupEvent;
use crate::core::types::FixOutcome;
use crate::error::SetupError;
use crate::io::context::ExecutionContext;
use crate::io::fix_executor::execute_fix;
use crate::io::process::CommandRunner;
use crate::io::step_executor::execute_step;
use crate::known_issues::report_known_issues;
use crate::plan::StepDefinition;

/// Summary of a step that resolved successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResolution {
    pub step: String,
    /// Number of times the step command ran (1 when it passed straight away).
    pub attempts: u32,
    /// Fixes that succeeded along the way, in the order they ran.
    pub applied_fixes: Vec<String>,
}

/// How a failure cycle over the fix list ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleEnd {
    /// A fix succeeded; run the step again.
    Retry,
    /// No eligible fix succeeded.
    Exhausted,
}

/// Run `step` until it succeeds or no eligible fix remains.
///
/// Returns [`SetupError::Exhausted`] carrying the last failure once fixes run out
/// (after reporting known issues), or [`SetupError::Preparation`] immediately if
/// any command cannot be started.
#[instrument(skip_all, fields(step = %step.key))]
pub fn resolve_step<R: CommandRunner, F: FnMut(&SetupEvent)>(
    runner: &R,
    context: &ExecutionContext,
    step: &StepDefinition,
    on_event: &mut F,
) -> Result<StepResolution, SetupError> {
    let mut state = StepAttemptState::default();
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        on_event(&SetupEvent::StepStarted {
            step: step.key.clone(),
            attempt,
        });

        let result = execute_step(runner, context, step)?;
        let Some(failure) = result.failure else {
            info!(attempt, "step resolved");
            on_event(&SetupEvent::StepSucceeded {
                step: step.key.clone(),
                attempt,
            });
            return Ok(StepResolution {
                step: step.key.clone(),
                attempts: attempt,
                applied_fixes: state.applied().map(str::to_string).collect(),
            });
        };

        debug!(attempt, status = %failure.status, "step failed, entering fix cycle");
        on_event(&SetupEvent::StepFailed {
            step: step.key.clone(),
            attempt,
            status: failure.status,
            log_path: result.log_path.clone(),
        });

        match run_fix_cycle(runner, context, step, &result.log_path, &mut state, on_event)? {
            CycleEnd::Retry => {
                on_event(&SetupEvent::StepRetrying {
                    step: step.key.clone(),
                });
            }
            CycleEnd::Exhausted => {
                warn!(
                    attempt,
                    status = %failure.status,
                    consumed_fixes = ?state.attempted().collect::<Vec<_>>(),
                    log_path = %result.log_path.display(),
                    "step exhausted its fixes"
                );
                report_known_issues(step, on_event);
                return Err(SetupError::Exhausted {
                    step: step.key.clone(),
                    log_path: result.log_path,
                    failure,
                });
            }
        }
    }
}

/// Visit eligible fixes in declared order until one succeeds.
fn run_fix_cycle<R: CommandRunner, F: FnMut(&SetupEvent)>(
    runner: &R,
    context: &ExecutionContext,
    step: &StepDefinition,
    step_log_path: &Path,
    state: &mut StepAttemptState,
    on_event: &mut F,
) -> Result<CycleEnd, SetupError> {
    for fix in &step.fixes {
        if state.was_attempted(&fix.key) {
            debug!(fix = %fix.key, "fix already consumed");
            continue;
        }

        let execution = execute_fix(runner, context, step, fix, step_log_path)?;
        state.record(&fix.key, execution.outcome);
        match execution.outcome {
            FixOutcome::Success => {
                on_event(&SetupEvent::FixSucceeded {
                    step: step.key.clone(),
                    fix: fix.key.clone(),
                });
                return Ok(CycleEnd::Retry);
            }
            FixOutcome::Skipped => {
                on_event(&SetupEvent::FixSkipped {
                    step: step.key.clone(),
                    fix: fix.key.clone(),
                });
            }
            FixOutcome::Failed => {
                on_event(&SetupEvent::FixFailed {
                    step: step.key.clone(),
                    fix: fix.key.clone(),
                    status: execution.status,
                });
            }
        }
    }
    Ok(CycleEnd::Exhausted)
}
