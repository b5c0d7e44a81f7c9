//! Table of contents entries, the shape every strategy emits.

use serde::{Deserialize, Serialize};

/// A single TOC entry.
///
/// Serialized as `{"title", "pageNumber", "level"}` plus `confidence` and
/// `detection_method` for generated entries. Bookmark entries carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Entry title
    pub title: String,

    /// Target page (1-indexed), `None` when it could not be resolved
    #[serde(rename = "pageNumber")]
    pub page_number: Option<u32>,

    /// Nesting level (0 = top level)
    pub level: usize,

    /// Confidence in [0, 1] for detected entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// How the entry was found (e.g., "dot_leader", "font_size|position")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_method: Option<String>,
}

impl TocEntry {
    /// Create an entry from an embedded bookmark.
    pub fn bookmark(title: impl Into<String>, page_number: Option<u32>, level: usize) -> Self {
        Self {
            title: title.into(),
            page_number,
            level,
            confidence: None,
            detection_method: None,
        }
    }

    /// Create a detected entry. Confidence is clamped to [0, 1].
    pub fn detected(
        title: impl Into<String>,
        page_number: u32,
        level: usize,
        confidence: f32,
        detection_method: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            page_number: Some(page_number),
            level,
            confidence: Some(confidence.clamp(0.0, 1.0)),
            detection_method: Some(detection_method.into()),
        }
    }

    /// Detection method or `unknown`.
    pub fn method(&self) -> &str {
        self.detection_method.as_deref().unwrap_or("unknown")
    }
}

/// Outcome of scanning one page (or a group of pages) for a printed TOC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocPageResult {
    /// Page number (1-indexed); 0 for a combined multi-page result
    pub page_number: u32,
    /// Likelihood that this page is a TOC page, in [0, 1]
    pub confidence: f32,
    /// Entries extracted from the page, in line order
    pub entries: Vec<TocEntry>,
    /// Line format that matched (e.g., "dot_leader", "multi_page")
    pub format_type: String,
    /// Analysis that produced the result
    pub method_used: String,
}

impl TocPageResult {
    /// Whether this is the synthetic multi-page aggregate.
    pub fn is_multi_page(&self) -> bool {
        self.page_number == 0
    }
}
