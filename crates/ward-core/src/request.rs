//! Invocation request types received from the agent runtime.

use serde::{Deserialize, Serialize};

/// Name of the shell-execution tool.
pub const SHELL_TOOL: &str = "Bash";

/// Tools whose input carries a `file_path` field.
pub const PATH_TOOLS: [&str; 4] = ["Read", "Edit", "MultiEdit", "Write"];

/// One tool invocation, as supplied by the agent runtime before execution.
///
/// `tool_input` is kept as loose JSON because its shape depends on
/// `tool_name`: shell execution carries a `command` string, file tools a
/// `file_path` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Tool being invoked (e.g. "Bash", "Read").
    #[serde(default)]
    pub tool_name: String,
    /// Tool-specific input mapping.
    #[serde(default)]
    pub tool_input: serde_json::Value,
}

impl InvocationRequest {
    /// Parse a request from the JSON record the runtime writes to the gate.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Whether this request executes a shell command.
    pub fn is_shell_tool(&self) -> bool {
        self.tool_name == SHELL_TOOL
    }

    /// Whether this request targets a file through a `file_path` field.
    pub fn is_path_tool(&self) -> bool {
        PATH_TOOLS.contains(&self.tool_name.as_str())
    }

    /// Whether this request can touch files at all (path tools or shell).
    pub fn is_file_tool(&self) -> bool {
        self.is_shell_tool() || self.is_path_tool()
    }

    /// The shell command string, for shell-execution requests.
    pub fn command(&self) -> Option<&str> {
        self.tool_input.get("command")?.as_str()
    }

    /// The target file path, for path-bearing file tools.
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.get("file_path")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_request() {
        let request =
            InvocationRequest::from_json(r#"{"tool_name":"Bash","tool_input":{"command":"ls"}}"#)
                .unwrap();
        assert!(request.is_shell_tool());
        assert!(request.is_file_tool());
        assert!(!request.is_path_tool());
        assert_eq!(request.command(), Some("ls"));
        assert_eq!(request.file_path(), None);
    }

    #[test]
    fn test_parse_path_request() {
        let request = InvocationRequest::from_json(
            r#"{"tool_name":"Read","tool_input":{"file_path":"src/main.rs"}}"#,
        )
        .unwrap();
        assert!(request.is_path_tool());
        assert_eq!(request.file_path(), Some("src/main.rs"));
        assert_eq!(request.command(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let request = InvocationRequest::from_json("{}").unwrap();
        assert_eq!(request.tool_name, "");
        assert!(!request.is_file_tool());
        assert_eq!(request.command(), None);
    }

    #[test]
    fn test_non_file_tool() {
        let request = InvocationRequest::from_json(
            r#"{"tool_name":"WebFetch","tool_input":{"url":"https://example.com"}}"#,
        )
        .unwrap();
        assert!(!request.is_file_tool());
    }

    #[test]
    fn test_malformed_input_is_error() {
        assert!(InvocationRequest::from_json("not json").is_err());
        assert!(InvocationRequest::from_json("").is_err());
    }
}
