//! Static self-description of the plugin's capabilities.
//!
//! The manifest is the only contract the host has for what fields an
//! invocation payload must contain, so its parameter schema must stay in
//! lockstep with the handler's validation in [`crate::tool`]. The document
//! is pure data: built deterministically, rendered exactly once per
//! process, and byte-identical on every retrieval.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::tool::TOOL_ID;

/// Stable plugin identifier presented to the host.
pub const PLUGIN_ID: &str = "osaurus.emacs";

const PLUGIN_DESCRIPTION: &str = "Execute Emacs Lisp code in a running Emacs instance";

const TOOL_DESCRIPTION: &str = "Execute Emacs Lisp code in a running Emacs instance via \
    emacsclient. Requires Emacs server to be running (M-x server-start).";

const CODE_DESCRIPTION: &str = "The Emacs Lisp code to execute";

const CLIENT_PATH_DESCRIPTION: &str =
    "Optional path to emacsclient binary. Auto-detected if not provided.";

/// Serialized manifest, rendered exactly once per process lifetime.
static MANIFEST_JSON: LazyLock<String> = LazyLock::new(|| {
    // Serialization of a fully owned, string-keyed document cannot fail;
    // the fallback keeps the boundary parseable regardless.
    serde_json::to_string(&manifest()).unwrap_or_else(|_| String::from("{}"))
});

/// Consent requirement the host must enforce before invoking a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionPolicy {
    /// The host must obtain user consent before each invocation.
    Ask,
}

/// Schema of a single named tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    kind: String,
    description: String,
}

impl PropertySchema {
    fn string(description: &str) -> Self {
        Self {
            kind: String::from("string"),
            description: description.to_owned(),
        }
    }

    /// Returns the JSON-Schema type name.
    #[must_use]
    pub const fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Returns the human-readable parameter description.
    #[must_use]
    pub const fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// JSON-Schema-style description of a tool's parameter object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    kind: String,
    properties: BTreeMap<String, PropertySchema>,
    required: Vec<String>,
}

impl ParameterSchema {
    /// Returns the names of required parameters.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns the schema of the named property, if declared.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.get(name)
    }
}

/// Descriptor of one host-discoverable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    id: String,
    description: String,
    parameters: ParameterSchema,
    requirements: Vec<String>,
    permission_policy: PermissionPolicy,
}

impl ToolDescriptor {
    /// Returns the stable tool identifier.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the human-readable tool description.
    #[must_use]
    pub const fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the parameter schema.
    #[must_use]
    pub const fn parameters(&self) -> &ParameterSchema {
        &self.parameters
    }

    /// Returns the runtime requirements (always empty today).
    #[must_use]
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Returns the consent policy the host must enforce.
    #[must_use]
    pub const fn permission_policy(&self) -> PermissionPolicy {
        self.permission_policy
    }
}

/// Capability groups advertised by the plugin. Only tools exist today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    tools: Vec<ToolDescriptor>,
}

impl Capabilities {
    /// Returns the advertised tool descriptors.
    #[must_use]
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }
}

/// Top-level manifest document handed to the host for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    plugin_id: String,
    version: String,
    description: String,
    capabilities: Capabilities,
}

impl PluginManifest {
    /// Returns the stable plugin identifier.
    #[must_use]
    pub const fn plugin_id(&self) -> &str {
        self.plugin_id.as_str()
    }

    /// Returns the plugin version.
    #[must_use]
    pub const fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the human-readable plugin description.
    #[must_use]
    pub const fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the advertised capability groups.
    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

/// Builds the manifest document. Pure and deterministic; every call within
/// a process produces an identical value.
#[must_use]
pub fn manifest() -> PluginManifest {
    let mut properties = BTreeMap::new();
    properties.insert(
        String::from("code"),
        PropertySchema::string(CODE_DESCRIPTION),
    );
    properties.insert(
        String::from("emacsclient_path"),
        PropertySchema::string(CLIENT_PATH_DESCRIPTION),
    );

    PluginManifest {
        plugin_id: PLUGIN_ID.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        description: PLUGIN_DESCRIPTION.to_owned(),
        capabilities: Capabilities {
            tools: vec![ToolDescriptor {
                id: TOOL_ID.to_owned(),
                description: TOOL_DESCRIPTION.to_owned(),
                parameters: ParameterSchema {
                    kind: String::from("object"),
                    properties,
                    required: vec![String::from("code")],
                },
                requirements: Vec::new(),
                permission_policy: PermissionPolicy::Ask,
            }],
        },
    }
}

/// Returns the serialized manifest JSON.
///
/// Rendered once into a process-wide cache; repeated calls return the same
/// allocation, so the output is byte-identical across a context lifetime.
///
/// # Example
///
/// ```
/// let json = emacs_plugin::manifest::manifest_json();
/// assert!(json.contains(r#""plugin_id":"osaurus.emacs""#));
/// ```
#[must_use]
pub fn manifest_json() -> &'static str {
    MANIFEST_JSON.as_str()
}
