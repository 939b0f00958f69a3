//! The `execute_emacs_lisp_code` capability handler.
//!
//! Decodes the invocation payload, resolves the client binary, runs
//! `emacsclient --eval <code>`, and folds every failure into a
//! [`ToolResult`] value. Nothing raises past [`ExecuteElispTool::run`];
//! from the dispatch layer's perspective every call succeeds and carries
//! either a result or a semantic error.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::ToolError;
use crate::locator::{EmacsclientLocator, ExecutableLocator};
use crate::process::{CommandExecutor, SystemExecutor};
use crate::protocol::ToolResult;

/// Tracing target for capability handling.
const TOOL_TARGET: &str = "emacs_plugin::tool";

/// Stable identifier of the single capability this plugin exposes.
pub const TOOL_ID: &str = "execute_emacs_lisp_code";

/// Flag instructing emacsclient to evaluate its argument as Lisp.
const EVAL_FLAG: &str = "--eval";

/// Decoded invocation arguments. `code` is required; a missing or
/// mistyped field is a terminal decode error for the request.
#[derive(Debug, Deserialize)]
struct ToolArgs {
    code: String,
    emacsclient_path: Option<String>,
}

/// Capability handler executing Emacs Lisp through `emacsclient`.
///
/// Generic over the locator and executor seams so tests can run the full
/// handler without touching the filesystem or spawning processes.
///
/// # Example
///
/// ```no_run
/// use emacs_plugin::tool::ExecuteElispTool;
///
/// let tool = ExecuteElispTool::new();
/// let outcome = tool.run(r#"{"code": "(+ 1 2)"}"#);
/// assert!(!outcome.to_json().is_empty());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecuteElispTool<L = EmacsclientLocator, E = SystemExecutor> {
    locator: L,
    executor: E,
}

impl ExecuteElispTool {
    /// Creates the production handler backed by the real locator and
    /// executor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            locator: EmacsclientLocator::new(),
            executor: SystemExecutor,
        }
    }
}

impl<L, E> ExecuteElispTool<L, E> {
    /// Creates a handler from explicit locator and executor parts.
    #[must_use]
    pub const fn from_parts(locator: L, executor: E) -> Self {
        Self { locator, executor }
    }
}

impl<L: ExecutableLocator, E: CommandExecutor> ExecuteElispTool<L, E> {
    /// Handles one invocation payload.
    ///
    /// Spawns exactly one external process per call (plus at most one
    /// `PATH` probe when no explicit path is supplied). The resolved path
    /// is not cached across calls; each call re-resolves unless
    /// `emacsclient_path` was given.
    #[must_use]
    pub fn run(&self, payload: &str) -> ToolResult {
        ToolResult::from(self.try_run(payload))
    }

    fn try_run(&self, payload: &str) -> Result<String, ToolError> {
        let args: ToolArgs =
            serde_json::from_str(payload).map_err(|_| ToolError::InvalidArguments)?;

        let executable = args
            .emacsclient_path
            .map(PathBuf::from)
            .or_else(|| self.locator.find())
            .ok_or(ToolError::ExecutableNotFound)?;

        debug!(
            target: TOOL_TARGET,
            executable = %executable.display(),
            code_bytes = args.code.len(),
            "evaluating Lisp through emacsclient"
        );

        let outcome = self
            .executor
            .execute(&executable, &[EVAL_FLAG.to_owned(), args.code])?;

        if outcome.is_success() {
            Ok(outcome.stdout().trim().to_owned())
        } else {
            Err(ToolError::non_zero_exit(
                outcome.exit_code(),
                outcome.stderr(),
            ))
        }
    }
}
