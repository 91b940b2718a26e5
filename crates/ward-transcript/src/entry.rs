//! Transcript entry types for line-delimited session logs.

use serde::Deserialize;

/// A single record in a session transcript.
///
/// Each line of the log is one `TranscriptEntry` serialized as JSON,
/// discriminated by `type`. Record types this formatter does not know
/// deserialize to [`TranscriptEntry::Unknown`] and render nothing, so a
/// newer log never aborts the pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TranscriptEntry {
    /// A user turn, or a wrapped tool result delivered as a user turn.
    #[serde(rename = "user")]
    User {
        #[serde(default)]
        message: Option<ChatMessage>,
        /// Present when the wrapped tool result came from a subagent run.
        #[serde(default, rename = "toolUseResult")]
        tool_use_result: Option<serde_json::Value>,
        #[serde(default)]
        slug: Option<String>,
    },

    /// An assistant turn: thinking, text, and tool invocations.
    #[serde(rename = "assistant")]
    Assistant {
        #[serde(default)]
        message: Option<ChatMessage>,
    },

    /// Runtime bookkeeping; never rendered.
    #[serde(rename = "system")]
    System {
        #[serde(default)]
        subtype: Option<String>,
    },

    /// An in-place file edit.
    #[serde(rename = "edit")]
    Edit {
        #[serde(default)]
        edit: Option<FileEdit>,
    },

    /// A whole-file write.
    #[serde(rename = "write")]
    Write {
        #[serde(default)]
        write: Option<FileWrite>,
    },

    /// A subagent being spawned with a prompt.
    #[serde(rename = "subagent_spawn")]
    SubagentSpawn {
        #[serde(default)]
        subagent_type: Option<String>,
        #[serde(default)]
        prompt: Option<String>,
    },

    /// A subagent's final response.
    #[serde(rename = "subagent_response")]
    SubagentResponse {
        #[serde(default)]
        response: Option<serde_json::Value>,
    },

    /// File-state snapshot; never rendered.
    #[serde(rename = "file-history-snapshot")]
    FileHistorySnapshot,

    #[serde(other)]
    Unknown,
}

/// The message payload carried by user and assistant records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessage {
    /// Either a plain string or a list of content blocks.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl ChatMessage {
    /// Content blocks, when the content is a block list.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        match &self.content {
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Content as display text: the string itself, or compact JSON.
    pub fn content_text(&self) -> String {
        match &self.content {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// One block within a message's content list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "thinking")]
    Thinking {
        #[serde(default)]
        thinking: String,
    },

    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },

    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },

    #[serde(rename = "tool_result")]
    ToolResult {
        #[serde(default)]
        tool_use_id: Option<String>,
        #[serde(default)]
        content: serde_json::Value,
    },

    #[serde(other)]
    Unknown,
}

/// Payload of an `edit` record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileEdit {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub old_string: Option<String>,
    #[serde(default)]
    pub new_string: Option<String>,
}

/// Payload of a `write` record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileWrite {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Parse one transcript line.
pub fn parse_line(line: &str) -> Result<TranscriptEntry, serde_json::Error> {
    serde_json::from_str(line)
}
