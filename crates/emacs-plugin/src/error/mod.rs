//! Domain errors raised while servicing a tool invocation.
//!
//! The `Display` strings of [`ToolError`] are the exact messages the host
//! sees inside `{"error": …}` result documents, so the taxonomy and the
//! wire contract cannot drift apart. I/O errors are wrapped in `Arc` to
//! satisfy the `result_large_err` Clippy lint.

use std::sync::Arc;

use thiserror::Error;

/// Failures that can occur while handling an `execute_emacs_lisp_code`
/// invocation.
///
/// Every variant is converted into a
/// [`ToolResult::Error`](crate::protocol::ToolResult) value before it
/// reaches the dispatch layer; none of these unwind past the boundary.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The invocation payload was not valid JSON or lacked the required
    /// `code` field.
    #[error("Invalid arguments: expected 'code' field")]
    InvalidArguments,

    /// No `emacsclient` binary was supplied or discovered.
    #[error(
        "Could not find emacsclient. Please provide emacsclient_path or ensure it's in PATH."
    )]
    ExecutableNotFound,

    /// The resolved executable exists but could not be spawned.
    #[error("Failed to execute emacsclient: {source}")]
    Spawn {
        /// Underlying I/O error from the spawn attempt.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// `emacsclient` ran to completion but exited with a non-zero status.
    #[error("{message}")]
    NonZeroExit {
        /// Process exit status.
        status: i32,
        /// Trimmed stderr, or an exit-code fallback when stderr was empty.
        message: String,
    },
}

impl ToolError {
    /// Builds a [`ToolError::Spawn`] from an I/O error.
    #[must_use]
    pub fn spawn(source: std::io::Error) -> Self {
        Self::Spawn {
            source: Arc::new(source),
        }
    }

    /// Builds a [`ToolError::NonZeroExit`], preferring the trimmed stderr
    /// text and falling back to an exit-code message when stderr carries
    /// nothing useful.
    #[must_use]
    pub fn non_zero_exit(status: i32, stderr: &str) -> Self {
        let trimmed = stderr.trim();
        let message = if trimmed.is_empty() {
            format!("emacsclient exited with code {status}")
        } else {
            trimmed.to_owned()
        };
        Self::NonZeroExit { status, message }
    }
}
