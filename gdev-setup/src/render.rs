//! Terminal presentation of setup events.

use std::io::{self, Write};

use clap::ValueEnum;

use crate::core::events::SetupEvent;
use crate::core::types::CommandStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress lines.
    Text,
    /// One JSON object per event (JSON Lines).
    Json,
}

/// Writes events to `out` in the selected format.
#[derive(Debug)]
pub struct EventPrinter<W: Write> {
    format: OutputFormat,
    out: W,
}

impl<W: Write> EventPrinter<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn print(&mut self, event: &SetupEvent) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                for line in render_text(event) {
                    writeln!(self.out, "{line}")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, event)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Text lines for one event. Bookkeeping events render nothing.
pub fn render_text(event: &SetupEvent) -> Vec<String> {
    match event {
        SetupEvent::StepStarted { .. } => Vec::new(),
        SetupEvent::StepSucceeded { step, .. } => vec![format!("Step '{step}' ran successfully")],
        SetupEvent::StepFailed { step, .. } => {
            vec![format!("Step '{step}' failed to run, trying fixes 🛠️")]
        }
        SetupEvent::FixSucceeded { fix, .. } => vec![format!("- Fix '{fix}' ran successfully")],
        SetupEvent::FixSkipped { fix, .. } => vec![format!("- Fix '{fix}' was skipped")],
        SetupEvent::FixFailed { fix, status, .. } => match status {
            CommandStatus::Exited { code } => {
                vec![format!("- Fix '{fix}' failed with exit code {code}")]
            }
            other => vec![format!("- Fix '{fix}' failed: {other}")],
        },
        SetupEvent::StepRetrying { step } => vec![format!("- Trying step '{step}' again 🤞")],
        SetupEvent::KnownIssues { step, issues } => {
            let mut lines = vec![format!("Step '{step}' has the following known issues:")];
            for issue in issues {
                lines.push(format!("Problem ({}): {}", issue.number, issue.problem));
                lines.push(format!("Solution ({}): {}", issue.number, issue.solution));
            }
            lines
        }
    }
}
