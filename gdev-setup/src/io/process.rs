//! Shell command execution with combined output captured to a log file.
//!
//! The [`CommandRunner`] trait decouples step/fix orchestration from real process
//! spawning. Tests use scripted runners that return predetermined statuses.

use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

use crate::core::types::CommandStatus;

/// Parameters for a single command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// Shell snippet, run as `<shell> -c <command>`.
    pub command: String,
    /// Working directory for the child process.
    pub workdir: PathBuf,
    /// Variables added on top of the inherited environment.
    pub env: Vec<(String, OsString)>,
    /// Kill the child if it runs longer than this.
    pub timeout: Option<Duration>,
}

/// Abstraction over command execution backends.
pub trait CommandRunner {
    /// Run the command to completion, writing stdout and stderr to `output`.
    ///
    /// `Err` means the command could not be run at all (spawn or wait failure).
    /// A command that ran and failed is reported through [`CommandStatus`].
    fn run(&self, request: &CommandRequest, output: File) -> io::Result<CommandStatus>;
}

/// Runner that spawns `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    shell: String,
}

impl ShellCommandRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl CommandRunner for ShellCommandRunner {
    #[instrument(skip_all, fields(shell = %self.shell, workdir = %request.workdir.display()))]
    fn run(&self, request: &CommandRequest, output: File) -> io::Result<CommandStatus> {
        // Both streams share one file handle so their bytes interleave in write order.
        let stderr = output.try_clone()?;
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(&request.command)
            .current_dir(&request.workdir)
            .envs(request.env.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::null())
            .stdout(Stdio::from(output))
            .stderr(Stdio::from(stderr));

        debug!("spawning child process");
        let mut child = match cmd.spawn() {
            Ok(c) => c,
            Err(e) => {
                error!(err = %e, "failed to spawn command");
                return Err(e);
            }
        };

        let status = match request.timeout {
            None => child.wait()?,
            Some(timeout) => match child.wait_timeout(timeout)? {
                Some(status) => status,
                None => {
                    warn!(
                        timeout_secs = timeout.as_secs(),
                        "command timed out, killing"
                    );
                    child.kill()?;
                    child.wait()?;
                    return Ok(CommandStatus::TimedOut {
                        secs: timeout.as_secs(),
                    });
                }
            },
        };

        let status = CommandStatus::from_exit_status(status);
        debug!(%status, "command finished");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn request(command: &str, workdir: &Path) -> CommandRequest {
        CommandRequest {
            command: command.to_string(),
            workdir: workdir.to_path_buf(),
            env: Vec::new(),
            timeout: None,
        }
    }

    fn run_logged(runner: &ShellCommandRunner, req: &CommandRequest, log: &Path) -> CommandStatus {
        let file = File::create(log).expect("create log");
        runner.run(req, file).expect("run")
    }

    #[test]
    fn captures_stdout_and_stderr_in_one_log() {
        let temp = tempfile::tempdir().expect("tempdir");
        let log = temp.path().join("out.log");
        let runner = ShellCommandRunner::new("sh");

        let status = run_logged(&runner, &request("echo out; echo err >&2", temp.path()), &log);

        assert!(status.success());
        assert_eq!(fs::read_to_string(&log).expect("read log"), "out\nerr\n");
    }

    #[test]
    fn preserves_non_zero_exit_code() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = ShellCommandRunner::new("sh");

        let status = run_logged(
            &runner,
            &request("exit 42", temp.path()),
            &temp.path().join("out.log"),
        );

        assert_eq!(status, CommandStatus::Exited { code: 42 });
    }

    #[test]
    fn runs_in_workdir_with_extra_env() {
        let temp = tempfile::tempdir().expect("tempdir");
        let log = temp.path().join("out.log");
        let runner = ShellCommandRunner::new("sh");
        let mut req = request("printf '%s' \"$EXTRA_VALUE\" > marker.txt", temp.path());
        req.env.push(("EXTRA_VALUE".to_string(), OsString::from("hello")));

        let status = run_logged(&runner, &req, &log);

        assert!(status.success());
        let marker = fs::read_to_string(temp.path().join("marker.txt")).expect("marker");
        assert_eq!(marker, "hello");
    }

    #[test]
    fn kills_command_after_timeout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = ShellCommandRunner::new("sh");
        let mut req = request("sleep 5", temp.path());
        req.timeout = Some(Duration::from_millis(100));

        let status = run_logged(&runner, &req, &temp.path().join("out.log"));

        assert_eq!(status, CommandStatus::TimedOut { secs: 0 });
    }

    #[test]
    fn missing_shell_is_a_spawn_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = ShellCommandRunner::new("definitely-not-a-shell-binary");
        let file = File::create(temp.path().join("out.log")).expect("create log");

        let err = runner.run(&request("true", temp.path()), file).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
