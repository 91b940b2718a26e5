//! ward-transcript: Render line-delimited session logs as plain text.

pub mod entry;
pub mod render;

pub use entry::{parse_line, ChatMessage, ContentBlock, FileEdit, FileWrite, TranscriptEntry};
pub use render::{render_entry, TRANSCRIPT_FOOTER, TRANSCRIPT_HEADER};
