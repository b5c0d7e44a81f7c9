//! Integration tests for document sources and the extraction chain.

use std::io::Write;

use pdftoc::error::{Error, Result};
use pdftoc::render::{to_markdown, to_text};
use pdftoc::{
    extract_toc_from_json, Capabilities, DocumentSource, IssueKind, MemoryDocument, OutlineNode,
    TextElement, TocEntry, TocExtractor, TocStrategy,
};
use tempfile::NamedTempFile;

/// Source whose outline and first page always fail.
struct FlakySource;

impl DocumentSource for FlakySource {
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn page_count(&self) -> u32 {
        2
    }

    fn extract_text_elements(&self) -> Result<Vec<TextElement>> {
        Err(Error::SourceUnavailable("no layout".to_string()))
    }

    fn extract_outline(&self) -> Result<Vec<OutlineNode>> {
        Err(Error::SourceUnavailable("outline is corrupt".to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        match page {
            2 => Ok("Introduction.........1\nMethods.........5\nResults.........9".to_string()),
            _ => Err(Error::SourceUnavailable("encrypted page".to_string())),
        }
    }
}

fn write_json(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_extract_outline_from_json_file() {
    let file = write_json(
        r#"{
            "outline": [
                {"kind": "destination", "title": "Intro", "page_ref": 0, "children": [
                    {"kind": "destination", "title": "Scope", "page_ref": 2}
                ]},
                {"kind": "destination", "title": "Appendix"}
            ]
        }"#,
    );

    let result = extract_toc_from_json(file.path()).unwrap();
    assert_eq!(result.strategy, TocStrategy::Outline);
    assert_eq!(
        result.entries,
        vec![
            TocEntry::bookmark("Intro", Some(1), 0),
            TocEntry::bookmark("Scope", Some(3), 1),
            TocEntry::bookmark("Appendix", None, 0),
        ]
    );

    assert_eq!(
        to_text(&result.entries),
        "Intro - Page 1\n  Scope - Page 3\nAppendix - Unknown page\n"
    );
}

#[test]
fn test_extract_pages_from_json_file() {
    let file = write_json(
        r#"{
            "pages": [
                "Title page of a long report",
                "Overview.........3\nDesign.........8\nTesting.........15"
            ]
        }"#,
    );

    let result = extract_toc_from_json(file.path()).unwrap();
    assert_eq!(result.strategy, TocStrategy::PagePatterns);
    let titles: Vec<&str> = result.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Overview", "Design", "Testing"]);
    assert_eq!(
        to_markdown(&result.entries),
        "- Overview (p. 3)\n- Design (p. 8)\n- Testing (p. 15)\n"
    );
}

#[test]
fn test_missing_json_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = extract_toc_from_json(dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_source_failures_become_diagnostics() {
    let result = TocExtractor::new()
        .with_diagnostics()
        .sequential()
        .extract(&FlakySource)
        .unwrap();

    assert_eq!(result.strategy, TocStrategy::PagePatterns);
    assert_eq!(result.entries.len(), 3);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.starts_with("outline unavailable")));
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.starts_with("page 1 skipped")));
}

#[test]
fn test_diagnostics_off_by_default() {
    let result = TocExtractor::new().sequential().extract(&FlakySource).unwrap();
    assert!(result.diagnostics.is_empty());
    assert!(!result.is_empty());
}

#[test]
fn test_elements_feed_heading_strategy() {
    let doc = MemoryDocument::new().with_elements(vec![
        TextElement::new("Chapter 1 Basics", 1, 72.0, 60.0, 20.0),
        TextElement::new("Body text explains the basics at some length for the reader.", 1, 72.0, 200.0, 10.0),
        TextElement::new("More body text follows in the same small size as before.", 1, 72.0, 240.0, 10.0),
    ]);
    let result = TocExtractor::new().extract(&doc).unwrap();
    assert_eq!(result.strategy, TocStrategy::Headings);
    assert_eq!(result.entries[0].title, "Chapter 1 Basics");
    assert!(result.validate(0.5).valid);
}

#[test]
fn test_result_validated_with_min_confidence() {
    let doc = MemoryDocument::new()
        .with_page_text("Introduction.........1\nMethods.........5\nResults.........9");

    let lenient = TocExtractor::new().sequential().extract(&doc).unwrap();
    assert_eq!(lenient.validation.issues_of(IssueKind::LowConfidence).count(), 0);
    assert_eq!(lenient.validation.statistics.total_entries, 3);

    // Introduction earns the keyword bonus; Methods and Results stay at 0.8.
    let strict = TocExtractor::new()
        .with_min_confidence(0.85)
        .sequential()
        .extract(&doc)
        .unwrap();
    let flagged: Vec<Option<usize>> = strict
        .validation
        .issues_of(IssueKind::LowConfidence)
        .map(|issue| issue.index)
        .collect();
    assert_eq!(flagged, vec![Some(1), Some(2)]);
    assert!(strict.validation.valid);
}

#[test]
fn test_extractor_rejects_invalid_min_confidence() {
    let result = TocExtractor::new()
        .with_min_confidence(1.5)
        .extract(&MemoryDocument::new());
    assert!(matches!(result, Err(Error::ConfigurationInvalid(_))));
}
