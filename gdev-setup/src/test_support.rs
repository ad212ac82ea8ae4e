//! Test-only helpers: plan builders and a scripted command runner.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::core::events::SetupEvent;
use crate::core::types::CommandStatus;
use crate::error::SetupError;
use crate::io::context::ExecutionContext;
use crate::io::process::{CommandRequest, CommandRunner};
use crate::plan::{FixDefinition, KnownIssue, StepDefinition};
use crate::retry::{StepResolution, resolve_step};

/// Create a step with no fixes or known issues.
pub fn step(key: &str, command: &str) -> StepDefinition {
    StepDefinition {
        key: key.to_string(),
        command: command.to_string(),
        fixes: Vec::new(),
        known_issues: Vec::new(),
    }
}

pub fn fix(key: &str, command: &str) -> FixDefinition {
    FixDefinition {
        key: key.to_string(),
        command: command.to_string(),
    }
}

pub fn known_issue(key: &str, problem: &str, solution: &str) -> KnownIssue {
    KnownIssue {
        key: key.to_string(),
        problem: problem.to_string(),
        solution: solution.to_string(),
    }
}

impl StepDefinition {
    pub fn with_fixes(mut self, fixes: Vec<FixDefinition>) -> Self {
        self.fixes = fixes;
        self
    }

    pub fn with_known_issues(mut self, known_issues: Vec<KnownIssue>) -> Self {
        self.known_issues = known_issues;
        self
    }
}

/// One scripted invocation result.
#[derive(Debug, Clone)]
pub struct ScriptedRun {
    result: Result<CommandStatus, io::ErrorKind>,
    output: String,
}

impl ScriptedRun {
    pub fn exit(code: i32) -> Self {
        Self::status(CommandStatus::Exited { code })
    }

    pub fn status(status: CommandStatus) -> Self {
        Self {
            result: Ok(status),
            output: String::new(),
        }
    }

    /// The command cannot be started.
    pub fn spawn_error() -> Self {
        Self {
            result: Err(io::ErrorKind::NotFound),
            output: String::new(),
        }
    }

    /// Bytes written to the log sink before the command "finishes".
    pub fn with_output(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }
}

/// Command runner returning queued results per command string.
///
/// Every invocation is recorded. Running a command with no queued result left
/// panics, so tests also catch unexpected extra invocations.
#[derive(Debug, Default)]
pub struct ScriptedCommandRunner {
    scripts: RefCell<HashMap<String, VecDeque<ScriptedRun>>>,
    calls: RefCell<Vec<CommandRequest>>,
}

impl ScriptedCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue results for `command`, consumed in order.
    pub fn on(self, command: &str, runs: impl IntoIterator<Item = ScriptedRun>) -> Self {
        self.scripts
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .extend(runs);
        self
    }

    pub fn calls(&self) -> Vec<CommandRequest> {
        self.calls.borrow().clone()
    }

    pub fn invoked_commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.command.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedCommandRunner {
    fn run(&self, request: &CommandRequest, mut output: File) -> io::Result<CommandStatus> {
        self.calls.borrow_mut().push(request.clone());
        let run = self
            .scripts
            .borrow_mut()
            .get_mut(&request.command)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("unexpected invocation of `{}`", request.command));
        output.write_all(run.output.as_bytes())?;
        run.result.map_err(io::Error::from)
    }
}

/// Resolve `step` with a context rooted (and logging) in `root`, collecting events.
pub fn resolve_collecting<R: CommandRunner>(
    runner: &R,
    root: &Path,
    step: &StepDefinition,
) -> (Result<StepResolution, SetupError>, Vec<SetupEvent>) {
    let context = ExecutionContext::new(root, root);
    let mut events = Vec::new();
    let result = resolve_step(runner, &context, step, &mut |event: &SetupEvent| {
        events.push(event.clone());
    });
    (result, events)
}
