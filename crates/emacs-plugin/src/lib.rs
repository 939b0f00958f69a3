//! Host-plugin capability bridge executing Emacs Lisp through `emacsclient`.
//!
//! This crate implements the core of the Osaurus Emacs plugin: it
//! advertises a fixed manifest of callable tools, decodes structured
//! invocation payloads, delegates to the external `emacsclient` binary,
//! and encodes structured results or errors. The C-ABI surface the host
//! actually loads lives in the sibling `emacs-plugin-abi` crate; this
//! crate is pure safe Rust and fully unit-testable.
//!
//! # Architecture
//!
//! An invocation flows through four stages, each behind a trait seam:
//! [`dispatch::PluginContext`] routes on `(capability type, id)`,
//! [`tool::ExecuteElispTool`] decodes and orchestrates,
//! [`locator::EmacsclientLocator`] resolves the client binary, and
//! [`process::SystemExecutor`] runs it with a discrete argument vector.
//! Every failure is folded into the [`protocol::ToolResult`] union before
//! it reaches the dispatch layer; nothing unwinds across the boundary.
//!
//! # Example
//!
//! ```no_run
//! use emacs_plugin::PluginContext;
//!
//! let context = PluginContext::new();
//! let manifest = context.manifest_json();
//! let response = context.invoke(
//!     "tool",
//!     "execute_emacs_lisp_code",
//!     r#"{"code": "(+ 1 2)"}"#,
//! );
//! # let _ = (manifest, response);
//! ```

pub mod dispatch;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod process;
pub mod protocol;
pub mod tool;


pub use self::dispatch::{CAPABILITY_TYPE_TOOL, PluginContext};
pub use self::error::ToolError;
pub use self::locator::{EmacsclientLocator, ExecutableLocator, FsProbe, PathProbe};
pub use self::manifest::{PLUGIN_ID, PluginManifest, manifest, manifest_json};
pub use self::process::{CommandExecutor, ExecutionOutcome, SystemExecutor};
pub use self::protocol::ToolResult;
pub use self::tool::{ExecuteElispTool, TOOL_ID};
