//! Rendering TOC entries to JSON, plain text and Markdown.

mod json;
mod markdown;
mod text;

pub use json::{report_to_json, to_json, JsonFormat};
pub use markdown::to_markdown;
pub use text::to_text;

/// Indentation unit for one nesting level in text outputs.
const INDENT: &str = "  ";

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}
