//! Plan runner: resolve every step of a setup plan in order.

use tracing::{info, instrument};

use crate::core::events::SetupEvent;
use crate::error::SetupError;
use crate::io::context::ExecutionContext;
use crate::io::process::CommandRunner;
use crate::plan::SetupPlan;
use crate::retry::{StepResolution, resolve_step};

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    /// One entry per step, in plan order.
    pub steps: Vec<StepResolution>,
}

impl SetupOutcome {
    /// Total number of fixes that succeeded across all steps.
    pub fn fixes_applied(&self) -> usize {
        self.steps.iter().map(|step| step.applied_fixes.len()).sum()
    }
}

/// Resolve each step in declared order, stopping at the first step that is
/// exhausted or cannot be prepared. Completed steps are not rolled back.
#[instrument(skip_all, fields(steps = plan.steps.len()))]
pub fn run_plan<R: CommandRunner, F: FnMut(&SetupEvent)>(
    runner: &R,
    context: &ExecutionContext,
    plan: &SetupPlan,
    mut on_event: F,
) -> Result<SetupOutcome, SetupError> {
    let mut steps = Vec::with_capacity(plan.steps.len());
    for step in &plan.steps {
        let resolution = resolve_step(runner, context, step, &mut on_event)?;
        steps.push(resolution);
    }

    let outcome = SetupOutcome { steps };
    info!(fixes_applied = outcome.fixes_applied(), "setup plan completed");
    Ok(outcome)
}
