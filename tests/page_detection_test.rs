//! Integration tests for printed TOC page detection.

use pdftoc::analysis::TocPageScanner;
use pdftoc::{detect_toc_from_pages, validate, IssueKind};

const PROSE: &str = "This report was prepared for the board.\n\
                     It summarises the work done during the year.\n\
                     Nothing on this page is a table of contents.";

const CONTENTS: &str = "Contents\n\
                        1 Introduction.........1\n\
                        1.1 Background.........2\n\
                        1.2 Scope.........4\n\
                        2 Methods.........7";

#[test]
fn test_contents_page_after_prose() {
    let toc = detect_toc_from_pages(&[PROSE, CONTENTS], 0.5, 10).unwrap();

    let titles: Vec<&str> = toc.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Introduction", "Background", "Scope", "Methods"]);

    let levels: Vec<usize> = toc.iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![0, 1, 1, 0]);

    let pages: Vec<Option<u32>> = toc.iter().map(|e| e.page_number).collect();
    assert_eq!(pages, vec![Some(1), Some(2), Some(4), Some(7)]);

    assert!(toc.iter().all(|e| e.method() == "dot_leader"));
    assert!(toc.iter().all(|e| e.confidence.unwrap_or(0.0) > 0.5));
}

#[test]
fn test_detected_toc_validates_cleanly() {
    let toc = detect_toc_from_pages(&[CONTENTS], 0.5, 10).unwrap();
    let report = validate(&toc, 0.5);
    assert!(report.valid);
    assert_eq!(report.issues_of(IssueKind::PageOrder).count(), 0);
    assert_eq!(report.issues_of(IssueKind::LevelGap).count(), 0);
    assert_eq!(report.statistics.total_entries, 4);
}

#[test]
fn test_space_aligned_page() {
    let page = "Preface    3\nOverview    5\nDetails    9";
    let results = TocPageScanner::new().sequential().scan(&[page]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].page_number, 1);
    assert_eq!(results[0].format_type, "space_aligned");
    assert_eq!(results[0].entries.len(), 3);
}

#[test]
fn test_page_window_is_respected() {
    let pages = [PROSE, PROSE, CONTENTS];
    assert!(detect_toc_from_pages(&pages, 0.5, 2).unwrap().is_empty());
    assert_eq!(detect_toc_from_pages(&pages, 0.5, 3).unwrap().len(), 4);
}

#[test]
fn test_toc_split_across_pages() {
    let entries = [
        ("Alpha Systems", 2),
        ("Beta Networks", 10),
        ("Gamma Storage", 20),
        ("Delta Protocols", 30),
        ("Epsilon Caching", 40),
        ("Zeta Parsing", 50),
    ];
    let pages: Vec<String> = entries
        .iter()
        .map(|(title, page)| {
            format!(
                "{}.........{}\nSome notes about this part of the document\nThe reader may skip them",
                title, page
            )
        })
        .collect();

    let results = TocPageScanner::new().sequential().scan(&pages);

    assert_eq!(results.len(), 1);
    let combined = &results[0];
    assert!(combined.is_multi_page());
    assert_eq!(combined.format_type, "multi_page");
    assert_eq!(combined.method_used, "combined_analysis");
    assert!((combined.confidence - 0.7).abs() < 1e-6);

    let titles: Vec<&str> = combined.entries.iter().map(|e| e.title.as_str()).collect();
    let expected: Vec<&str> = entries.iter().map(|(title, _)| *title).collect();
    assert_eq!(titles, expected);

    let toc = detect_toc_from_pages(&pages, 0.5, 10).unwrap();
    assert_eq!(toc.len(), 6);
}

#[test]
fn test_weak_accepted_pages_yield_nothing() {
    let filler = "A line of ordinary prose without numbers\n".repeat(8);
    let pages: Vec<String> = [(3, 9), (14, 20), (27, 33)]
        .iter()
        .map(|(a, b)| format!("First Topic.........{}\n{}Second Topic.........{}", a, filler, b))
        .collect();

    assert!(TocPageScanner::new().sequential().scan(&pages).is_empty());
    assert!(detect_toc_from_pages(&pages, 0.5, 10).unwrap().is_empty());
}

#[test]
fn test_page_threshold_applies_to_best_page() {
    // 3 entries among 4 lines: 1.0 after clamping, so any threshold passes.
    let page = "Contents\nOverview.........3\nDesign.........8\nTesting.........15";
    assert_eq!(detect_toc_from_pages(&[page], 0.9, 10).unwrap().len(), 3);

    // 2 entries among 5 lines: 0.8 + 0.05, kept at 0.5 but not at 0.9.
    let sparse = "Overview.........3\nOne line of prose\nAnother line of prose\nA third line of prose\nDesign.........8";
    assert_eq!(detect_toc_from_pages(&[sparse], 0.5, 10).unwrap().len(), 2);
    assert!(detect_toc_from_pages(&[sparse], 0.9, 10).unwrap().is_empty());
}

#[test]
fn test_scan_blocks_merges_overlaps() {
    let blocks = [
        "Introduction.........1\nMethods.........5",
        "Introduction Overview.........1\nResults.........9",
    ];
    let entries = TocPageScanner::new().scan_blocks(&blocks);
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Introduction", "Methods", "Results"]);
}

#[test]
fn test_parallel_matches_sequential() {
    let pages = [PROSE, CONTENTS, PROSE];
    let parallel = TocPageScanner::new().scan(&pages);
    let sequential = TocPageScanner::new().sequential().scan(&pages);
    assert_eq!(parallel, sequential);
}
