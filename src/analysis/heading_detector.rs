//! Heading detection over all text elements of a document.

use std::cmp::Ordering;

use crate::model::{Heading, Position, TextElement};

use super::font_stats::FontStatistics;
use super::options::{DocumentPreset, PresetConfig};
use super::scorer::HeadingScorer;

/// Detects headings by scoring every element and keeping confident ones.
#[derive(Debug, Clone)]
pub struct HeadingDetector {
    scorer: HeadingScorer,
    threshold: f32,
}

impl HeadingDetector {
    /// Create a detector with the given confidence threshold.
    pub fn new(threshold: f32) -> Self {
        Self::with_config(PresetConfig {
            confidence_threshold: threshold,
            ..PresetConfig::default()
        })
    }

    /// Create a detector from explicit settings.
    pub fn with_config(config: PresetConfig) -> Self {
        Self {
            threshold: config.confidence_threshold,
            scorer: HeadingScorer::with_config(config),
        }
    }

    /// Create a detector tuned for a document type.
    pub fn with_preset(preset: DocumentPreset) -> Self {
        Self::with_config(preset.config())
    }

    /// Minimum confidence a heading must reach.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The scorer used by this detector.
    pub fn scorer(&self) -> &HeadingScorer {
        &self.scorer
    }

    /// Detect headings, computing font statistics from the same elements.
    pub fn detect(&self, elements: &[TextElement]) -> Vec<Heading> {
        let stats = FontStatistics::from_elements(elements);
        self.detect_with_stats(elements, &stats)
    }

    /// Detect headings against precomputed font statistics.
    ///
    /// The result is sorted by page, then y, then x.
    pub fn detect_with_stats(&self, elements: &[TextElement], stats: &FontStatistics) -> Vec<Heading> {
        if elements.is_empty() {
            return Vec::new();
        }

        let mut headings: Vec<Heading> = elements
            .iter()
            .filter(|e| !e.text.trim().is_empty())
            .filter_map(|element| {
                let score = self.scorer.score(element, stats);
                if score.confidence >= self.threshold {
                    Some(Heading {
                        title: element.text.trim().to_string(),
                        page: element.page,
                        position: Position {
                            x: element.x,
                            y: element.y,
                        },
                        font_size: element.font_size,
                        confidence: score.confidence,
                        detection_method: score.methods,
                    })
                } else {
                    None
                }
            })
            .collect();

        headings.sort_by(compare_reading_order);

        log::debug!(
            "HeadingDetector: {} of {} elements passed threshold {:.2}",
            headings.len(),
            elements.len(),
            self.threshold
        );

        headings
    }
}

impl Default for HeadingDetector {
    fn default() -> Self {
        Self::with_config(PresetConfig::default())
    }
}

/// Order by page, then top to bottom, then left to right.
pub(crate) fn compare_reading_order(a: &Heading, b: &Heading) -> Ordering {
    a.page
        .cmp(&b.page)
        .then_with(|| a.position.y.total_cmp(&b.position.y))
        .then_with(|| a.position.x.total_cmp(&b.position.x))
}
