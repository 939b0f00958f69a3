//! Invocation routing for the host-facing dispatch surface.
//!
//! [`PluginContext`] is the per-instance state behind each opaque handle
//! the host holds. It carries no per-call state, so concurrent invocations
//! against one context are safe without any internal locking.

use tracing::warn;

use crate::locator::{EmacsclientLocator, ExecutableLocator};
use crate::manifest;
use crate::process::{CommandExecutor, SystemExecutor};
use crate::protocol::ToolResult;
use crate::tool::{ExecuteElispTool, TOOL_ID};

/// Tracing target for dispatch routing.
const DISPATCH_TARGET: &str = "emacs_plugin::dispatch";

/// Capability type under which tools are routed.
pub const CAPABILITY_TYPE_TOOL: &str = "tool";

/// Error message returned for unrecognized `(type, id)` pairs.
const UNKNOWN_CAPABILITY: &str = "Unknown capability";

/// Per-instance plugin state routing invocations to capability handlers.
///
/// Exactly one route is recognized today: `("tool",
/// "execute_emacs_lisp_code")`. Any other pair yields an error document,
/// never a failure of the call itself.
///
/// # Example
///
/// ```
/// use emacs_plugin::dispatch::PluginContext;
///
/// let context = PluginContext::new();
/// let response = context.invoke("tool", "no_such_tool", "{}");
/// assert_eq!(response, r#"{"error":"Unknown capability"}"#);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PluginContext<L = EmacsclientLocator, E = SystemExecutor> {
    tool: ExecuteElispTool<L, E>,
}

impl PluginContext {
    /// Creates a context backed by the production locator and executor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tool: ExecuteElispTool::new(),
        }
    }
}

impl<L, E> PluginContext<L, E> {
    /// Creates a context around an explicit tool handler.
    #[must_use]
    pub const fn with_tool(tool: ExecuteElispTool<L, E>) -> Self {
        Self { tool }
    }

    /// Returns the serialized manifest. Identical bytes on every call
    /// within a process lifetime.
    #[must_use]
    pub fn manifest_json(&self) -> &'static str {
        manifest::manifest_json()
    }
}

impl<L: ExecutableLocator, E: CommandExecutor> PluginContext<L, E> {
    /// Routes one invocation to the capability identified by
    /// `(capability_type, capability_id)` and returns the serialized
    /// result document.
    ///
    /// Nothing unwinds out of this method; every failure arrives as a
    /// parseable `{"error": …}` document.
    #[must_use]
    pub fn invoke(&self, capability_type: &str, capability_id: &str, payload: &str) -> String {
        if capability_type == CAPABILITY_TYPE_TOOL && capability_id == TOOL_ID {
            return self.tool.run(payload).to_json();
        }

        warn!(
            target: DISPATCH_TARGET,
            capability_type,
            capability_id,
            "unknown capability requested"
        );
        ToolResult::Error(UNKNOWN_CAPABILITY.to_owned()).to_json()
    }
}
