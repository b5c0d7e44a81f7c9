//! Inference options and document-type presets.

use crate::error::{Error, Result};

/// Default maximum TOC depth.
pub const DEFAULT_MAX_LEVEL: usize = 4;

/// Default number of leading pages searched for a printed TOC.
pub const DEFAULT_MAX_PAGES: usize = 10;

/// Options for TOC inference.
#[derive(Debug, Clone)]
pub struct TocOptions {
    /// Minimum heading confidence for the font/pattern path
    pub confidence_threshold: f32,

    /// Minimum page confidence for the page-pattern path
    pub page_confidence_threshold: f32,

    /// Confidence below which validation flags an entry
    pub min_confidence: f32,

    /// Maximum nesting depth (levels are 0..max_level-1)
    pub max_level: usize,

    /// Number of leading pages searched for a printed TOC
    pub max_pages: usize,

    /// Whether to scan pages in parallel
    pub parallel: bool,

    /// Whether skipped pages and collaborator failures are recorded
    pub diagnostics: bool,

    /// Drop running headers and footers before heading detection
    pub filter_headers_footers: bool,

    /// Document-type preset, overriding `confidence_threshold`
    pub preset: Option<DocumentPreset>,
}

impl TocOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the page confidence threshold.
    pub fn with_page_confidence_threshold(mut self, threshold: f32) -> Self {
        self.page_confidence_threshold = threshold;
        self
    }

    /// Set the validation minimum confidence.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set how many leading pages are scanned.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable or disable parallel page scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page scanning.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable diagnostics collection.
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Enable or disable header/footer removal before heading detection.
    pub fn with_header_footer_filter(mut self, enabled: bool) -> Self {
        self.filter_headers_footers = enabled;
        self
    }

    /// Apply a document-type preset.
    pub fn with_preset(mut self, preset: DocumentPreset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Heading configuration after applying the preset, if any.
    pub fn heading_config(&self) -> PresetConfig {
        match self.preset {
            Some(preset) => preset.config(),
            None => PresetConfig {
                confidence_threshold: self.confidence_threshold,
                ..PresetConfig::default()
            },
        }
    }

    /// Reject out-of-range values before any processing.
    pub fn validate(&self) -> Result<()> {
        check_unit("confidence_threshold", self.confidence_threshold)?;
        check_unit("page_confidence_threshold", self.page_confidence_threshold)?;
        check_unit("min_confidence", self.min_confidence)?;
        if self.max_level < 1 {
            return Err(Error::ConfigurationInvalid(
                "max_level must be at least 1".to_string(),
            ));
        }
        if self.max_pages < 1 {
            return Err(Error::ConfigurationInvalid(
                "max_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            page_confidence_threshold: 0.5,
            min_confidence: 0.7,
            max_level: DEFAULT_MAX_LEVEL,
            max_pages: DEFAULT_MAX_PAGES,
            parallel: true,
            diagnostics: false,
            filter_headers_footers: false,
            preset: None,
        }
    }
}

/// Ensure a threshold lies in [0, 1].
pub(crate) fn check_unit(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::ConfigurationInvalid(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

/// Document types with tuned heading detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentPreset {
    /// Journal or conference paper
    AcademicPaper,
    /// Technical report or manual
    TechnicalReport,
    /// Book
    Book,
    /// Article without numbered sections
    Article,
}

impl DocumentPreset {
    /// The immutable settings for this preset.
    pub fn config(self) -> PresetConfig {
        match self {
            DocumentPreset::AcademicPaper => PresetConfig {
                confidence_threshold: 0.7,
                enable_number_detection: true,
                enable_section_detection: true,
                min_font_size_multiplier: 1.1,
            },
            DocumentPreset::TechnicalReport => PresetConfig {
                confidence_threshold: 0.65,
                enable_number_detection: true,
                enable_section_detection: true,
                min_font_size_multiplier: 1.0,
            },
            DocumentPreset::Book => PresetConfig {
                confidence_threshold: 0.8,
                enable_number_detection: true,
                enable_section_detection: true,
                min_font_size_multiplier: 1.2,
            },
            DocumentPreset::Article => PresetConfig {
                confidence_threshold: 0.75,
                enable_number_detection: false,
                enable_section_detection: true,
                min_font_size_multiplier: 1.1,
            },
        }
    }
}

/// Heading detection settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetConfig {
    /// Minimum heading confidence
    pub confidence_threshold: f32,
    /// Match numeric outline prefixes (`1.2 Title`)
    pub enable_number_detection: bool,
    /// Match chapter/section keywords and common section names
    pub enable_section_detection: bool,
    /// Font size must reach `median × multiplier` to count as large
    pub min_font_size_multiplier: f32,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            enable_number_detection: true,
            enable_section_detection: true,
            min_font_size_multiplier: 1.0,
        }
    }
}
