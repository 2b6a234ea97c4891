//! Hook payload describing an action the agent is about to take.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// JSON payload handed to the hook by the agent runtime.
///
/// Both the short `tool` key and the longer `tool_name` key are accepted.
/// Unknown keys (session ids, transcript paths, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct HookPayload {
    /// Name of the tool being invoked (`Write`, `Bash`, ...)
    #[serde(default, alias = "tool_name")]
    pub tool: Option<String>,

    /// Tool arguments
    #[serde(default)]
    pub tool_input: ToolInput,
}

/// Arguments of the intercepted tool call that warden cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ToolInput {
    /// Target path of a file write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Full content of a file write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Shell command about to run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl HookPayload {
    /// Parse a payload from its JSON text.
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build the payload of a `Write` tool call.
    pub fn write(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool: Some("Write".to_string()),
            tool_input: ToolInput {
                file_path: Some(file_path.into()),
                content: Some(content.into()),
                command: None,
            },
        }
    }

    /// Build the payload of a `Bash` tool call.
    pub fn bash(command: impl Into<String>) -> Self {
        Self {
            tool: Some("Bash".to_string()),
            tool_input: ToolInput {
                command: Some(command.into()),
                ..Default::default()
            },
        }
    }

    /// Whether this payload is a write of a file with exactly `file_name`.
    pub fn is_write_of(&self, file_name: &str) -> bool {
        self.tool.as_deref() == Some("Write")
            && self
                .tool_input
                .file_path
                .as_deref()
                .and_then(|path| Path::new(path).file_name())
                .is_some_and(|name| name == file_name)
    }

    /// The command of a shell invocation, if one is present and non-blank.
    pub fn command(&self) -> Option<&str> {
        self.tool_input
            .command
            .as_deref()
            .filter(|command| !command.trim().is_empty())
    }
}
