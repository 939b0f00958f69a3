//! Wire types for the capability invocation result union.
//!
//! A tool invocation always produces exactly one of `{"result": …}` or
//! `{"error": …}`. The union is modelled as an externally tagged serde
//! enum whose JSON rendering is exactly that wire shape; `serde_json`
//! escaping guarantees backslashes, quotes, and newlines embedded in a
//! payload survive a round trip.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Fallback document used when serialization itself fails. Kept parseable
/// so the host never sees a partial buffer.
const SERIALIZE_FAILURE_JSON: &str = r#"{"error":"internal serialization failure"}"#;

/// Externally visible outcome of a capability invocation.
///
/// Exactly one variant is ever populated; there is no "both" or "neither"
/// state to defend against.
///
/// # Example
///
/// ```
/// use emacs_plugin::ToolResult;
///
/// let ok = ToolResult::Result(String::from("3"));
/// assert_eq!(ok.to_json(), r#"{"result":"3"}"#);
///
/// let failed = ToolResult::Error(String::from("boom"));
/// assert_eq!(failed.to_json(), r#"{"error":"boom"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolResult {
    /// Successful invocation payload.
    Result(String),
    /// Failure description.
    Error(String),
}

impl ToolResult {
    /// Returns `true` for the error variant.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the payload string of whichever variant is populated.
    #[must_use]
    pub const fn payload(&self) -> &str {
        match self {
            Self::Result(payload) | Self::Error(payload) => payload.as_str(),
        }
    }

    /// Renders the `{"result": …}` / `{"error": …}` wire document.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| SERIALIZE_FAILURE_JSON.to_owned())
    }
}

impl From<ToolError> for ToolResult {
    fn from(error: ToolError) -> Self {
        Self::Error(error.to_string())
    }
}

impl From<Result<String, ToolError>> for ToolResult {
    fn from(outcome: Result<String, ToolError>) -> Self {
        outcome.map_or_else(Self::from, Self::Result)
    }
}
