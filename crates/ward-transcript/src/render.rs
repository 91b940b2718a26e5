//! Per-type rendering of transcript entries to plain text.

use crate::entry::{ChatMessage, ContentBlock, FileEdit, FileWrite, TranscriptEntry};
use serde_json::Value;

/// Banner printed before the rendered entries.
pub const TRANSCRIPT_HEADER: &str = "=== Agent Session Transcript ===";

/// Banner printed after the rendered entries.
pub const TRANSCRIPT_FOOTER: &str = "=== End of Transcript ===";

/// Character budget for tool result content.
const TOOL_RESULT_BUDGET: usize = 500;
/// Character budget for edit/write previews.
const PREVIEW_BUDGET: usize = 100;
/// Character budget for subagent prompts.
const SUBAGENT_PROMPT_BUDGET: usize = 200;
/// Character budget for subagent responses.
const SUBAGENT_RESPONSE_BUDGET: usize = 300;

/// Render one entry as output lines. Sections begin with an empty line;
/// entries that produce no output return an empty vector.
pub fn render_entry(entry: &TranscriptEntry) -> Vec<String> {
    match entry {
        TranscriptEntry::User {
            message,
            tool_use_result,
            slug,
        } => render_user(message.as_ref(), tool_use_result.as_ref(), slug.as_deref()),
        TranscriptEntry::Assistant { message } => render_assistant(message.as_ref()),
        // local_command and internal subtypes are filtered; other system
        // records have no rendering either.
        TranscriptEntry::System { .. } => Vec::new(),
        TranscriptEntry::Edit { edit } => render_edit(edit.as_ref()),
        TranscriptEntry::Write { write } => render_write(write.as_ref()),
        TranscriptEntry::SubagentSpawn {
            subagent_type,
            prompt,
        } => render_subagent_spawn(subagent_type.as_deref(), prompt.as_deref()),
        TranscriptEntry::SubagentResponse { response } => {
            render_subagent_response(response.as_ref())
        }
        TranscriptEntry::FileHistorySnapshot | TranscriptEntry::Unknown => Vec::new(),
    }
}

fn render_user(
    message: Option<&ChatMessage>,
    tool_use_result: Option<&Value>,
    slug: Option<&str>,
) -> Vec<String> {
    let Some(message) = message else {
        return Vec::new();
    };

    let blocks = message.blocks();
    if !matches!(blocks.first(), Some(ContentBlock::ToolResult { .. })) {
        return vec![
            String::new(),
            format!("User: {}", message.content_text().trim()),
        ];
    }

    let from_subagent = tool_use_result
        .and_then(|value| value.get("agentId"))
        .is_some();

    let mut out = Vec::new();
    for block in &blocks {
        let ContentBlock::ToolResult {
            tool_use_id,
            content,
        } = block
        else {
            continue;
        };
        let id = tool_use_id.as_deref().unwrap_or("unknown");

        if from_subagent {
            out.push(String::new());
            out.push(format!("Subagent Response ({}):", slug.unwrap_or(id)));
            for text in result_text_items(content) {
                out.push(format!("  {}", text.trim()));
            }
        } else {
            out.push(String::new());
            out.push(format!("Tool Result: {id}"));
            let content_str = match content {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            let truncated =
                truncate_chars(&content_str, TOOL_RESULT_BUDGET, "\n  ... (truncated)");
            out.push(format!("  {}", truncated.trim()));
        }
    }
    out
}

fn render_assistant(message: Option<&ChatMessage>) -> Vec<String> {
    let Some(message) = message else {
        return Vec::new();
    };
    let blocks = message.blocks();
    let mut out = Vec::new();

    for block in &blocks {
        if let ContentBlock::Thinking { thinking } = block {
            if !thinking.is_empty() {
                out.push(String::new());
                out.push(format!("Thinking: {}", thinking.trim()));
            }
        }
    }
    for block in &blocks {
        if let ContentBlock::Text { text } = block {
            if !text.is_empty() {
                out.push(String::new());
                out.push(format!("Assistant: {}", text.trim()));
            }
        }
    }
    for block in &blocks {
        if let ContentBlock::ToolUse { name, input } = block {
            out.push(String::new());
            out.push(format!("Tool Use: {name}"));
            if !input.is_null() {
                let pretty = serde_json::to_string_pretty(input)
                    .unwrap_or_else(|_| input.to_string());
                out.push(format!("  Input: {pretty}"));
            }
        }
    }
    out
}

fn render_edit(edit: Option<&FileEdit>) -> Vec<String> {
    let Some(edit) = edit else {
        return Vec::new();
    };
    let mut out = vec![String::new(), format!("File Edit: {}", edit.file_path)];
    if let (Some(old), Some(new)) = (&edit.old_string, &edit.new_string) {
        out.push(format!(
            "  Changed: \"{}...\" -> \"{}...\"",
            truncate_chars(old, PREVIEW_BUDGET, ""),
            truncate_chars(new, PREVIEW_BUDGET, "")
        ));
    }
    out
}

fn render_write(write: Option<&FileWrite>) -> Vec<String> {
    let Some(write) = write else {
        return Vec::new();
    };
    let preview = write.content.as_deref().unwrap_or("");
    vec![
        String::new(),
        format!("File Write: {}", write.file_path),
        format!(
            "  Content preview: {}...",
            truncate_chars(preview, PREVIEW_BUDGET, "")
        ),
    ]
}

fn render_subagent_spawn(subagent_type: Option<&str>, prompt: Option<&str>) -> Vec<String> {
    let mut out = vec![
        String::new(),
        format!("Subagent Spawned: {}", subagent_type.unwrap_or("unknown")),
    ];
    if let Some(prompt) = prompt {
        out.push(format!(
            "  Prompt: {}...",
            truncate_chars(prompt, SUBAGENT_PROMPT_BUDGET, "")
        ));
    }
    out
}

fn render_subagent_response(response: Option<&Value>) -> Vec<String> {
    let mut out = vec![String::new(), "Subagent Response:".to_string()];
    if let Some(response) = response {
        let text = match response {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        out.push(format!(
            "  {}...",
            truncate_chars(&text, SUBAGENT_RESPONSE_BUDGET, "")
        ));
    }
    out
}

/// Text items from a tool result's content: the text of each text block,
/// or the content itself when it is a plain string.
fn result_text_items(content: &Value) -> Vec<String> {
    match content {
        Value::Array(items) => items
            .iter()
            .filter_map(
                |item| match serde_json::from_value::<ContentBlock>(item.clone()).ok()? {
                    ContentBlock::Text { text } if !text.is_empty() => Some(text),
                    _ => None,
                },
            )
            .collect(),
        Value::String(text) => vec![text.clone()],
        _ => Vec::new(),
    }
}

/// First `budget` characters of `text`, with `marker` appended when the
/// text was actually cut.
fn truncate_chars(text: &str, budget: usize, marker: &str) -> String {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => format!("{}{}", &text[..idx], marker),
        None => text.to_string(),
    }
}
