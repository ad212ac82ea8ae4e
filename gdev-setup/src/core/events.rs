//! Progress events emitted while a plan runs.
//!
//! The orchestrator never formats text. It reports what happened through
//! [`SetupEvent`]s and a presentation layer (`render`) decides how to show them.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::types::CommandStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SetupEvent {
    /// A step command is about to run. `attempt` is 1-based.
    StepStarted { step: String, attempt: u32 },
    StepSucceeded { step: String, attempt: u32 },
    /// The step ran but did not exit cleanly; a fix cycle follows.
    StepFailed {
        step: String,
        attempt: u32,
        status: CommandStatus,
        log_path: PathBuf,
    },
    FixSucceeded { step: String, fix: String },
    FixSkipped { step: String, fix: String },
    FixFailed {
        step: String,
        fix: String,
        status: CommandStatus,
    },
    /// A fix succeeded and the step is run again.
    StepRetrying { step: String },
    /// The step ran out of fixes; documented issues follow.
    KnownIssues {
        step: String,
        issues: Vec<NumberedIssue>,
    },
}

impl SetupEvent {
    pub fn step(&self) -> &str {
        match self {
            Self::StepStarted { step, .. }
            | Self::StepSucceeded { step, .. }
            | Self::StepFailed { step, .. }
            | Self::FixSucceeded { step, .. }
            | Self::FixSkipped { step, .. }
            | Self::FixFailed { step, .. }
            | Self::StepRetrying { step }
            | Self::KnownIssues { step, .. } => step,
        }
    }
}

/// Known issue with its 1-based display number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedIssue {
    pub number: usize,
    pub key: String,
    pub problem: String,
    pub solution: String,
}
