//! Plain text rendering for TOC entries.

use crate::model::TocEntry;

use super::indent;

/// Render entries as an indented list, one per line.
///
/// ```text
/// Introduction - Page 1
///   Background - Page 2
/// Appendix - Unknown page
/// ```
pub fn to_text(entries: &[TocEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        output.push_str(&indent(entry.level));
        output.push_str(&entry.title);
        match entry.page_number {
            Some(page) => output.push_str(&format!(" - Page {}", page)),
            None => output.push_str(" - Unknown page"),
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        let entries = vec![
            TocEntry::bookmark("Introduction", Some(1), 0),
            TocEntry::bookmark("Background", Some(2), 1),
            TocEntry::bookmark("Appendix", None, 0),
        ];
        assert_eq!(
            to_text(&entries),
            "Introduction - Page 1\n  Background - Page 2\nAppendix - Unknown page\n"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_text(&[]), "");
    }
}
