//! Document access used by the TOC strategies.
//!
//! A [`DocumentSource`] stands in for the PDF backend: it hands out the
//! embedded outline, raw page text and positioned text elements. What a
//! source can provide is reported once through [`Capabilities`].
//!
//! # Example
//!
//! ```
//! use pdftoc::source::{DocumentSource, MemoryDocument};
//!
//! let doc = MemoryDocument::new()
//!     .with_page_text("Introduction.........1\nMethods.........5\nResults.........9");
//! assert!(doc.capabilities().page_text);
//! assert_eq!(doc.page_count(), 1);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{elements_from_words, group_glyphs_into_lines};
use crate::model::{Glyph, OutlineNode, TextElement};

/// What a document source is able to provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Embedded bookmark tree
    pub outline: bool,
    /// Raw per-page text
    pub page_text: bool,
    /// Positioned text elements with font metadata
    pub text_elements: bool,
}

impl Capabilities {
    /// Every capability available.
    pub fn all() -> Self {
        Self {
            outline: true,
            page_text: true,
            text_elements: true,
        }
    }

    /// Nothing available.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Trait for document backends.
///
/// Implement this trait to feed a new extraction library into the TOC
/// strategies. Methods for capabilities the source does not report may
/// return [`Error::SourceUnavailable`].
pub trait DocumentSource: Send + Sync {
    /// What this source can provide. Queried once per extraction.
    fn capabilities(&self) -> Capabilities;

    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text elements of the whole document, grouped into lines.
    fn extract_text_elements(&self) -> Result<Vec<TextElement>>;

    /// Embedded bookmark tree; page references are 0-indexed.
    fn extract_outline(&self) -> Result<Vec<OutlineNode>>;

    /// Raw text of one page (1-indexed), newline-delimited.
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Glyph-level (or word-level) data of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub page: u32,
    /// Individual glyphs; grouped into lines when present
    #[serde(default)]
    pub glyphs: Vec<Glyph>,
    /// Words, used only when no glyphs are available
    #[serde(default)]
    pub words: Vec<Glyph>,
}

/// A document held entirely in memory, typically loaded from JSON
/// produced by an external extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    /// Raw text per page; `pages[0]` is page 1
    #[serde(default)]
    pub pages: Vec<String>,
    /// Ready-made line elements
    #[serde(default)]
    pub elements: Vec<TextElement>,
    /// Glyph or word data per page, used when `elements` is empty
    #[serde(default)]
    pub layout: Vec<PageLayout>,
    /// Embedded bookmark tree
    #[serde(default)]
    pub outline: Vec<OutlineNode>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Append the text of the next page.
    pub fn with_page_text(mut self, text: impl Into<String>) -> Self {
        self.pages.push(text.into());
        self
    }

    /// Set the line elements.
    pub fn with_elements(mut self, elements: Vec<TextElement>) -> Self {
        self.elements = elements;
        self
    }

    /// Add glyph data for a page.
    pub fn with_glyphs(mut self, page: u32, glyphs: Vec<Glyph>) -> Self {
        self.layout.push(PageLayout {
            page,
            glyphs,
            words: Vec::new(),
        });
        self
    }

    /// Add word data for a page.
    pub fn with_words(mut self, page: u32, words: Vec<Glyph>) -> Self {
        self.layout.push(PageLayout {
            page,
            glyphs: Vec::new(),
            words,
        });
        self
    }

    /// Set the bookmark tree.
    pub fn with_outline(mut self, outline: Vec<OutlineNode>) -> Self {
        self.outline = outline;
        self
    }
}

impl DocumentSource for MemoryDocument {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            outline: !self.outline.is_empty(),
            page_text: !self.pages.is_empty(),
            text_elements: !self.elements.is_empty() || !self.layout.is_empty(),
        }
    }

    fn page_count(&self) -> u32 {
        let from_layout = self.layout.iter().map(|l| l.page).max().unwrap_or(0);
        let from_elements = self.elements.iter().map(|e| e.page).max().unwrap_or(0);
        u32::try_from(self.pages.len())
            .unwrap_or(u32::MAX)
            .max(from_layout)
            .max(from_elements)
    }

    fn extract_text_elements(&self) -> Result<Vec<TextElement>> {
        if !self.elements.is_empty() {
            return Ok(self.elements.clone());
        }
        if self.layout.is_empty() {
            return Err(Error::SourceUnavailable(
                "document has no text elements".to_string(),
            ));
        }

        let mut layout: Vec<&PageLayout> = self.layout.iter().collect();
        layout.sort_by_key(|l| l.page);

        let mut elements = Vec::new();
        for page in layout {
            if page.glyphs.is_empty() {
                elements.extend(elements_from_words(page.page, &page.words));
            } else {
                elements.extend(group_glyphs_into_lines(page.page, &page.glyphs));
            }
        }
        Ok(elements)
    }

    fn extract_outline(&self) -> Result<Vec<OutlineNode>> {
        Ok(self.outline.clone())
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let count = u32::try_from(self.pages.len()).unwrap_or(u32::MAX);
        if page == 0 || page > count {
            return Err(Error::PageOutOfRange(page, count));
        }
        Ok(self.pages[(page - 1) as usize].clone())
    }
}
