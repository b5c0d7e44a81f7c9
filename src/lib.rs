//! # pdftoc
//!
//! Table-of-contents inference for PDF documents without a usable outline.
//!
//! The library reads text that an external PDF backend already extracted
//! and infers a TOC from it, either by scoring headings (font size, text
//! patterns, structure, position) or by recognising printed TOC pages
//! (dot leaders, tab stops, aligned page numbers, ...).
//!
//! ## Quick Start
//!
//! ```
//! use pdftoc::detect_toc_from_pages;
//!
//! fn main() -> pdftoc::Result<()> {
//!     let page = "Chapter 1 Introduction.........12\n\
//!                 Chapter 2 Methods.........34\n\
//!                 Chapter 3 Conclusion.........56";
//!     let toc = detect_toc_from_pages(&[page], 0.5, 10)?;
//!     assert_eq!(toc.len(), 3);
//!     println!("{}", pdftoc::render::to_text(&toc));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bookmark path**: embedded outlines are flattened as-is
//! - **Printed TOC detection**: six line formats with per-entry confidence
//! - **Heading inference**: font statistics, numbering and indentation
//! - **Parallel processing**: pages are scanned with Rayon
//! - **Validation**: advisory report on ordering and hierarchy problems

pub mod analysis;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use analysis::{
    analyze_heading_patterns, validate, DocumentPreset, FontStatistics, FontUsage,
    HeadingDetector, HierarchyAssigner, LinePatternMatcher, PresetConfig, TocOptions,
    TocPageScanner, TocTree, TocTreeBuilder,
};
pub use error::{Error, Result};
pub use model::{
    outline_to_entries, FontWeight, Glyph, Heading, IssueKind, LeveledHeading, OutlineNode,
    Severity, TextElement, TocEntry, TocPageResult, ValidationIssue, ValidationReport,
};
pub use render::JsonFormat;
pub use source::{Capabilities, DocumentSource, MemoryDocument};

use std::path::Path;

use serde::Serialize;

use analysis::{dedup_exact, sort_by_page};

/// Generate a TOC from heading candidates among text elements.
///
/// # Arguments
///
/// * `elements` - Positioned text elements of the whole document
/// * `confidence_threshold` - Minimum heading confidence in [0, 1]
///
/// # Example
///
/// ```
/// use pdftoc::{generate_toc_from_headings, TextElement};
///
/// let elements = vec![
///     TextElement::new("1 Introduction", 1, 72.0, 60.0, 18.0),
///     TextElement::new("Body text that goes on for quite a while, as body text does.", 1, 72.0, 300.0, 10.0),
///     TextElement::new("More body text in the same small size as the paragraph above.", 1, 72.0, 340.0, 10.0),
/// ];
/// let toc = generate_toc_from_headings(&elements, 0.7)?;
/// assert_eq!(toc[0].title, "1 Introduction");
/// # Ok::<(), pdftoc::Error>(())
/// ```
pub fn generate_toc_from_headings(
    elements: &[TextElement],
    confidence_threshold: f32,
) -> Result<Vec<TocEntry>> {
    let options = TocOptions::new().with_confidence_threshold(confidence_threshold);
    generate_toc_from_headings_with_options(elements, &options)
}

/// Generate a TOC from headings with custom options.
pub fn generate_toc_from_headings_with_options(
    elements: &[TextElement],
    options: &TocOptions,
) -> Result<Vec<TocEntry>> {
    options.validate()?;

    let filtered;
    let elements = if options.filter_headers_footers {
        filtered = layout::filter_headers_footers(elements.to_vec());
        filtered.as_slice()
    } else {
        elements
    };

    let detector = HeadingDetector::with_config(options.heading_config());
    let headings = detector.detect(elements);
    let leveled = HierarchyAssigner::new(options.max_level).assign_levels(&headings);
    let tree = TocTreeBuilder::new(options.max_level).build(&leveled);

    let mut entries = dedup_exact(tree.flatten());
    sort_by_page(&mut entries);

    log::debug!(
        "generate_toc_from_headings: {} headings -> {} entries",
        headings.len(),
        entries.len()
    );
    Ok(entries)
}

/// Detect a printed TOC in the leading pages of a document.
///
/// # Arguments
///
/// * `pages` - Raw page text; `pages[0]` is page 1
/// * `page_confidence_threshold` - Minimum page confidence in [0, 1]
/// * `max_pages` - Number of leading pages to scan
///
/// Returns the entries of the best page result, deduplicated and sorted by
/// page number, or an empty list when no page looks like a TOC.
pub fn detect_toc_from_pages<S: AsRef<str> + Sync>(
    pages: &[S],
    page_confidence_threshold: f32,
    max_pages: usize,
) -> Result<Vec<TocEntry>> {
    let options = TocOptions::new()
        .with_page_confidence_threshold(page_confidence_threshold)
        .with_max_pages(max_pages);
    detect_toc_from_pages_with_options(pages, &options)
}

/// Detect a printed TOC with custom options.
pub fn detect_toc_from_pages_with_options<S: AsRef<str> + Sync>(
    pages: &[S],
    options: &TocOptions,
) -> Result<Vec<TocEntry>> {
    options.validate()?;

    let scanner = TocPageScanner::new()
        .with_max_pages(options.max_pages)
        .with_parallel(options.parallel);

    let best = scanner
        .scan(pages)
        .into_iter()
        .find(|result| result.confidence >= options.page_confidence_threshold);

    let Some(best) = best else {
        log::debug!("detect_toc_from_pages: no TOC page found");
        return Ok(Vec::new());
    };

    log::debug!(
        "detect_toc_from_pages: page {} ({}) with confidence {:.2}",
        best.page_number,
        best.format_type,
        best.confidence
    );
    let mut entries = dedup_exact(best.entries);
    sort_by_page(&mut entries);
    Ok(entries)
}

/// Load a pre-extracted document from JSON and extract its TOC.
///
/// # Example
///
/// ```no_run
/// use pdftoc::extract_toc_from_json;
///
/// let result = extract_toc_from_json("document.json")?;
/// println!("{} entries via {:?}", result.entries.len(), result.strategy);
/// # Ok::<(), pdftoc::Error>(())
/// ```
pub fn extract_toc_from_json<P: AsRef<Path>>(path: P) -> Result<TocResult> {
    let document = MemoryDocument::from_json_path(path)?;
    TocExtractor::new().extract(&document)
}

/// Strategy that produced a TOC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TocStrategy {
    /// Embedded bookmarks
    Outline,
    /// Printed TOC pages
    PagePatterns,
    /// Inferred headings
    Headings,
    /// Nothing found
    NotFound,
}

/// Outcome of [`TocExtractor::extract`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocResult {
    /// TOC entries in document order
    pub entries: Vec<TocEntry>,
    /// Strategy that produced the entries
    pub strategy: TocStrategy,
    /// Skipped pages and collaborator failures (when enabled)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
    /// Validation of `entries` against the extractor's `min_confidence`
    pub validation: ValidationReport,
}

impl TocResult {
    /// Whether no entries were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate the entries against a different minimum confidence.
    pub fn validate(&self, min_confidence: f32) -> ValidationReport {
        validate(&self.entries, min_confidence)
    }
}

/// Builder running the bookmark, page-pattern and heading strategies in turn.
///
/// # Example
///
/// ```
/// use pdftoc::{MemoryDocument, TocExtractor, TocStrategy};
///
/// let doc = MemoryDocument::new().with_page_text(
///     "Introduction.........1\nMethods.........5\nResults.........9",
/// );
/// let result = TocExtractor::new().sequential().extract(&doc)?;
/// assert_eq!(result.strategy, TocStrategy::PagePatterns);
/// # Ok::<(), pdftoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TocExtractor {
    options: TocOptions,
}

impl TocExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    pub fn with_options(mut self, options: TocOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the heading confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_confidence_threshold(threshold);
        self
    }

    /// Set the page confidence threshold.
    pub fn with_page_confidence_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_page_confidence_threshold(threshold);
        self
    }

    /// Set how many leading pages are scanned.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.options = self.options.with_max_pages(max_pages);
        self
    }

    /// Set the confidence below which validation flags an entry.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.options = self.options.with_min_confidence(min_confidence);
        self
    }

    /// Apply a document-type preset.
    pub fn with_preset(mut self, preset: DocumentPreset) -> Self {
        self.options = self.options.with_preset(preset);
        self
    }

    /// Record skipped pages and collaborator failures.
    pub fn with_diagnostics(mut self) -> Self {
        self.options = self.options.with_diagnostics(true);
        self
    }

    /// Disable parallel page scanning.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The options in use.
    pub fn options(&self) -> &TocOptions {
        &self.options
    }

    /// Extract a TOC, trying the embedded outline first, then printed TOC
    /// pages, then inferred headings.
    ///
    /// Source failures never abort extraction: the failing strategy is
    /// skipped. Only invalid options are reported as an error.
    pub fn extract(&self, source: &dyn DocumentSource) -> Result<TocResult> {
        self.options.validate()?;

        let capabilities = source.capabilities();
        let mut diagnostics = Vec::new();

        if capabilities.outline {
            match source.extract_outline() {
                Ok(outline) => {
                    let entries = outline_to_entries(&outline);
                    if !entries.is_empty() {
                        return Ok(self.finish(entries, TocStrategy::Outline, diagnostics));
                    }
                }
                Err(e) => self.note(&mut diagnostics, format!("outline unavailable: {}", e)),
            }
        }

        if capabilities.page_text {
            let count = (source.page_count() as usize).min(self.options.max_pages);
            let mut pages = Vec::with_capacity(count);
            for page in 1..=count as u32 {
                match source.extract_page_text(page) {
                    Ok(text) => pages.push(text),
                    Err(e) => {
                        self.note(&mut diagnostics, format!("page {} skipped: {}", page, e));
                        pages.push(String::new());
                    }
                }
            }

            let entries = detect_toc_from_pages_with_options(&pages, &self.options)?;
            if !entries.is_empty() {
                return Ok(self.finish(entries, TocStrategy::PagePatterns, diagnostics));
            }
        }

        if capabilities.text_elements {
            match source.extract_text_elements() {
                Ok(elements) => {
                    let entries = generate_toc_from_headings_with_options(&elements, &self.options)?;
                    if !entries.is_empty() {
                        return Ok(self.finish(entries, TocStrategy::Headings, diagnostics));
                    }
                }
                Err(e) => {
                    self.note(&mut diagnostics, format!("text elements unavailable: {}", e))
                }
            }
        }

        Ok(self.finish(Vec::new(), TocStrategy::NotFound, diagnostics))
    }

    fn note(&self, diagnostics: &mut Vec<String>, message: String) {
        log::warn!("TocExtractor: {}", message);
        if self.options.diagnostics {
            diagnostics.push(message);
        }
    }

    fn finish(
        &self,
        entries: Vec<TocEntry>,
        strategy: TocStrategy,
        diagnostics: Vec<String>,
    ) -> TocResult {
        log::debug!(
            "TocExtractor: {:?} strategy produced {} entries",
            strategy,
            entries.len()
        );
        let validation = validate(&entries, self.options.min_confidence);
        TocResult {
            entries,
            strategy,
            diagnostics,
            validation,
        }
    }
}
