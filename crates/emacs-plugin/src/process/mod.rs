//! Blocking subprocess execution for the emacsclient bridge.
//!
//! [`SystemExecutor`] spawns the external process with a discrete argument
//! vector, captures both output streams, and blocks until exit. The
//! [`CommandExecutor`] trait is the seam test code implements to avoid
//! spawning real processes.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::ToolError;

/// Tracing target for process operations.
const PROCESS_TARGET: &str = "emacs_plugin::process";

/// Captured result of a completed subprocess.
///
/// Produced once per execution and consumed immediately by the caller;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ExecutionOutcome {
    /// Creates an outcome from an exit code and captured streams.
    #[must_use]
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns the process exit code (`-1` when terminated by a signal).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns the captured standard output.
    #[must_use]
    pub const fn stdout(&self) -> &str {
        self.stdout.as_str()
    }

    /// Returns the captured standard error.
    #[must_use]
    pub const fn stderr(&self) -> &str {
        self.stderr.as_str()
    }

    /// Returns `true` when the process exited with status zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait abstracting subprocess execution for testability.
///
/// The production implementation is [`SystemExecutor`]. Test code can
/// implement this trait to inject pre-configured outcomes without spawning
/// real processes.
pub trait CommandExecutor {
    /// Runs `executable` with the given argument vector and captures its
    /// output.
    ///
    /// A non-zero exit is not an error at this layer; it is reported
    /// through [`ExecutionOutcome::exit_code`]. Only a failure to start the
    /// process at all is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Spawn`] when the process cannot be started.
    fn execute(&self, executable: &Path, args: &[String]) -> Result<ExecutionOutcome, ToolError>;
}

/// Executes commands with [`std::process::Command`], blocking until exit.
///
/// Arguments are passed to the kernel as discrete tokens; no shell is ever
/// involved, so payload text cannot smuggle in extra commands. There is
/// deliberately no timeout: an unresponsive external process blocks the
/// calling thread until it exits or is terminated externally. This is a
/// documented limitation of the boundary contract, not an oversight.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, executable: &Path, args: &[String]) -> Result<ExecutionOutcome, ToolError> {
        debug!(
            target: PROCESS_TARGET,
            executable = %executable.display(),
            arg_count = args.len(),
            "spawning process"
        );

        let output = Command::new(executable)
            .args(args)
            .output()
            .map_err(ToolError::spawn)?;

        let exit_code = output.status.code().unwrap_or(-1);
        // Streams that fail UTF-8 decoding become empty strings; the exit
        // status must survive even when the output does not.
        let stdout = String::from_utf8(output.stdout).unwrap_or_default();
        let stderr = String::from_utf8(output.stderr).unwrap_or_default();

        debug!(
            target: PROCESS_TARGET,
            exit_code,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "process exited"
        );

        Ok(ExecutionOutcome::new(exit_code, stdout, stderr))
    }
}
