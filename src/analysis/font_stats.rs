//! Document-wide font size statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::TextElement;

/// Number of largest sizes reported by [`FontUsage`].
pub const LARGEST_SIZES: usize = 5;

/// Font size distribution of a document.
///
/// Recomputed for every document and never persisted. An empty input
/// yields the default value, for which [`FontStatistics::is_empty`] holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontStatistics {
    /// Median font size over all elements
    pub median_size: f32,
    /// Sample standard deviation of font sizes (0 with fewer than two distinct sizes)
    pub std_dev_size: f32,
    /// Largest font size
    pub max_size: f32,
    /// Smallest font size
    pub min_size: f32,
    /// `median + std_dev`, or `median` when there is no spread
    pub heading_threshold: f32,
    /// 85% of the largest size
    pub large_threshold: f32,
    /// Observed sizes (tenths of a point) with their frequency
    pub size_histogram: BTreeMap<i32, usize>,
    /// Number of sizes observed
    pub sample_count: usize,
}

impl FontStatistics {
    /// Analyze the font sizes of the given elements.
    pub fn from_elements(elements: &[TextElement]) -> Self {
        Self::from_sizes(elements.iter().map(|e| e.font_size))
    }

    /// Analyze a sequence of font sizes.
    ///
    /// Non-finite and non-positive sizes are ignored.
    pub fn from_sizes<I: IntoIterator<Item = f32>>(sizes: I) -> Self {
        let mut sizes: Vec<f32> = sizes
            .into_iter()
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        if sizes.is_empty() {
            return Self::default();
        }

        sizes.sort_by(|a, b| a.total_cmp(b));

        let mut size_histogram = BTreeMap::new();
        for size in &sizes {
            *size_histogram.entry(size_key(*size)).or_insert(0) += 1;
        }

        let median_size = median(&sizes);
        let min_size = sizes[0];
        let max_size = sizes[sizes.len() - 1];

        let std_dev_size = if size_histogram.len() < 2 {
            0.0
        } else {
            sample_std_dev(&sizes)
        };

        let heading_threshold = if std_dev_size > 0.0 {
            median_size + std_dev_size
        } else {
            median_size
        };

        Self {
            median_size,
            std_dev_size,
            max_size,
            min_size,
            heading_threshold,
            large_threshold: max_size * 0.85,
            size_histogram,
            sample_count: sizes.len(),
        }
    }

    /// Whether no font sizes were observed.
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// Number of distinct sizes (at 0.1pt precision).
    pub fn distinct_sizes(&self) -> usize {
        self.size_histogram.len()
    }

    /// How often a size occurs (at 0.1pt precision).
    pub fn frequency(&self, size: f32) -> usize {
        self.size_histogram
            .get(&size_key(size))
            .copied()
            .unwrap_or(0)
    }
}

/// Which fonts and sizes a document uses.
///
/// Sizes are distinct values at 0.1pt precision. Unlike
/// [`FontStatistics::median_size`], `median_size` here is the median of the
/// distinct sizes, so rare large sizes weigh as much as the body size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontUsage {
    /// Element count per font name
    pub fonts: BTreeMap<String, usize>,
    /// Up to five largest distinct sizes, largest first
    pub largest_sizes: Vec<f32>,
    /// Median of the distinct sizes
    pub median_size: f32,
    /// Distinct sizes above `median_size`, largest first
    pub heading_sizes: Vec<f32>,
}

impl FontUsage {
    /// Tally fonts and sizes of the given elements.
    pub fn from_elements(elements: &[TextElement]) -> Self {
        let mut fonts: BTreeMap<String, usize> = BTreeMap::new();
        let mut keys: Vec<i32> = Vec::new();
        for element in elements {
            *fonts.entry(element.font_name.clone()).or_insert(0) += 1;
            if element.font_size.is_finite() && element.font_size > 0.0 {
                keys.push(size_key(element.font_size));
            }
        }
        keys.sort_unstable();
        keys.dedup();
        if keys.is_empty() {
            return Self {
                fonts,
                ..Self::default()
            };
        }

        let ascending: Vec<f32> = keys.iter().map(|k| *k as f32 / 10.0).collect();
        let median_size = median(&ascending);
        let descending: Vec<f32> = ascending.iter().rev().copied().collect();

        Self {
            fonts,
            largest_sizes: descending.iter().take(LARGEST_SIZES).copied().collect(),
            median_size,
            heading_sizes: descending
                .iter()
                .copied()
                .filter(|s| *s > median_size)
                .collect(),
        }
    }

    /// The most used font name; ties go to the name sorting first.
    pub fn dominant_font(&self) -> Option<&str> {
        let mut best: Option<(&String, usize)> = None;
        for (name, count) in &self.fonts {
            if best.map_or(true, |(_, c)| *count > c) {
                best = Some((name, *count));
            }
        }
        best.map(|(name, _)| name.as_str())
    }
}

/// Round a font size to 0.1pt precision for bucketing.
pub(crate) fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

fn median(sorted: &[f32]) -> f32 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_std_dev(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|v| *v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let d = *v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / (n - 1.0);
    variance.sqrt() as f32
}
