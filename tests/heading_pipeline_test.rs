//! Integration tests for heading-based TOC generation.

use pdftoc::model::{DetectionMethod, DetectionMethods, Position};
use pdftoc::{
    analyze_heading_patterns, generate_toc_from_headings_with_options, render, validate,
    FontUsage, Heading, HierarchyAssigner, IssueKind, JsonFormat, TextElement, TocEntry,
    TocOptions, TocTreeBuilder,
};

fn heading(title: &str, page: u32, x: f32, font_size: f32) -> Heading {
    let detection_method: DetectionMethods = [DetectionMethod::FontSize].into_iter().collect();
    Heading {
        title: title.to_string(),
        page,
        position: Position { x, y: 60.0 },
        font_size,
        confidence: 0.9,
        detection_method,
    }
}

fn paragraph(text: &str, page: u32, y: f32) -> TextElement {
    TextElement::new(text, page, 72.0, y, 10.0)
}

#[test]
fn test_numbering_drives_levels() {
    let headings = vec![
        heading("1 Introduction", 1, 72.0, 18.0),
        heading("1.1 Setup", 2, 72.0, 14.0),
        heading("1.2 Config", 3, 72.0, 14.0),
        heading("2 Advanced", 4, 72.0, 18.0),
    ];
    let leveled = HierarchyAssigner::new(4).assign_levels(&headings);
    let levels: Vec<usize> = leveled.iter().map(|h| h.level).collect();
    assert_eq!(levels, vec![0, 1, 1, 0]);

    let tree = TocTreeBuilder::new(4).build(&leveled);
    assert_eq!(tree.roots().len(), 2);
    assert_eq!(tree.children(tree.roots()[0]).len(), 2);
    assert!(tree.children(tree.roots()[1]).is_empty());

    let flat = tree.flatten();
    let titles: Vec<&str> = flat.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["1 Introduction", "1.1 Setup", "1.2 Config", "2 Advanced"]);
    assert_eq!(flat[0].method(), "font_size");
}

#[test]
fn test_levels_are_clamped() {
    let headings = vec![
        heading("1 Top", 1, 72.0, 18.0),
        heading("1.1.1.1 Very deep", 1, 72.0, 10.0),
    ];
    let leveled = HierarchyAssigner::new(2).assign_levels(&headings);
    assert!(leveled.iter().all(|h| h.level < 2));
}

#[test]
fn test_options_pipeline_is_deterministic() {
    let elements = vec![
        TextElement::new("Chapter 1 Foundations", 1, 72.0, 60.0, 20.0),
        paragraph("The foundations chapter is long and explains the basic ideas in detail.", 1, 200.0),
        paragraph("It keeps going for a while so the body size dominates the statistics.", 1, 240.0),
        TextElement::new("Chapter 2 Practice", 2, 72.0, 60.0, 20.0),
        paragraph("Practice makes the ideas concrete through a long series of worked cases.", 2, 200.0),
        paragraph("Each case is described in ordinary body text at the usual small size.", 2, 240.0),
    ];
    let options = TocOptions::new().sequential();

    let first = generate_toc_from_headings_with_options(&elements, &options).unwrap();
    let second = generate_toc_from_headings_with_options(&elements, &options).unwrap();
    assert_eq!(
        render::to_json(&first, JsonFormat::Pretty).unwrap(),
        render::to_json(&second, JsonFormat::Pretty).unwrap()
    );

    let titles: Vec<&str> = first.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Chapter 1 Foundations", "Chapter 2 Practice"]);
    assert!(first.iter().all(|e| e.level == 0));
}

#[test]
fn test_validation_flags_page_order() {
    let entries = vec![
        TocEntry::detected("First", 5, 0, 0.9, "font_size"),
        TocEntry::detected("Second", 3, 0, 0.9, "font_size"),
        TocEntry::detected("Third", 8, 0, 0.9, "font_size"),
    ];
    let report = validate(&entries, 0.7);
    let issues: Vec<_> = report.issues_of(IssueKind::PageOrder).collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].index, Some(1));
    assert!(report.valid);

    let json = render::report_to_json(&report, JsonFormat::Compact).unwrap();
    assert!(json.contains("\"valid\":true"));
}

#[test]
fn test_header_footer_filter_drops_running_header() {
    let mut elements = Vec::new();
    for (page, heading) in [(1, "1 Introduction"), (2, "2 Methods")] {
        elements.push(TextElement::new("RUNNING HEADER", page, 72.0, 20.0, 12.0));
        elements.push(TextElement::new(heading, page, 72.0, 200.0, 18.0));
        elements.push(paragraph("A long paragraph of body text that runs across the whole line.", page, 400.0));
        elements.push(paragraph("Another paragraph of body text continuing the same discussion.", page, 600.0));
        elements.push(paragraph("Confidential draft", page, 780.0));
    }

    let options = TocOptions::new().with_confidence_threshold(0.35).sequential();
    let unfiltered = generate_toc_from_headings_with_options(&elements, &options).unwrap();
    assert!(unfiltered.iter().any(|e| e.title == "RUNNING HEADER"));

    let filtered = generate_toc_from_headings_with_options(
        &elements,
        &options.with_header_footer_filter(true),
    )
    .unwrap();
    let titles: Vec<&str> = filtered.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["1 Introduction", "2 Methods"]);
}

#[test]
fn test_formatting_groups_agree_with_font_usage() {
    let bold = |text: &str, page: u32, y: f32| {
        TextElement::new(text, page, 72.0, y, 16.0).with_font_name("Helvetica-Bold")
    };
    let elements = vec![
        bold("1 Getting", 1, 80.0),
        bold("Started", 1, 100.0),
        paragraph("Installing the tool takes a single command on most systems.", 1, 200.0),
        paragraph("The rest of this chapter walks through a first session.", 1, 220.0),
        bold("2 Usage", 2, 80.0),
        paragraph("Usage is driven by a small configuration file.", 2, 200.0),
    ];

    let (headings, stats) = analyze_heading_patterns(&elements);
    let titles: Vec<&str> = headings.iter().map(|h| h.element.text.as_str()).collect();
    assert_eq!(titles, vec!["1 Getting Started", "2 Usage"]);
    assert!(headings.iter().all(|h| h.pattern_type == "number_pattern|bold_format"));
    assert_eq!(stats.groups, 4);

    let usage = FontUsage::from_elements(&elements);
    assert_eq!(usage.heading_sizes, vec![16.0]);
    assert!(headings
        .iter()
        .all(|h| usage.heading_sizes.contains(&h.element.font_size)));
    // Three lines each; the tie goes to the name sorting first.
    assert_eq!(usage.dominant_font(), Some("Helvetica-Bold"));
}
