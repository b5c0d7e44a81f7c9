//! Markdown rendering for TOC entries.

use crate::model::TocEntry;

use super::indent;

/// Render entries as a nested Markdown list.
pub fn to_markdown(entries: &[TocEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        output.push_str(&indent(entry.level));
        output.push_str("- ");
        output.push_str(&escape_markdown(&entry.title));
        if let Some(page) = entry.page_number {
            output.push_str(&format!(" (p. {})", page));
        }
        output.push('\n');
    }
    output
}

/// Escape characters that would otherwise start inline formatting.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
