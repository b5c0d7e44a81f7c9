//! Heading confidence scoring.
//!
//! Four independent signals are combined into one weighted score:
//!
//! | Signal         | Weight | Fires above |
//! |----------------|--------|-------------|
//! | font size      | 0.35   | 0.3         |
//! | text pattern   | 0.35   | 0.5         |
//! | text structure | 0.20   | 0.3         |
//! | position       | 0.10   | 0.2         |

use regex::Regex;

use crate::model::{DetectionMethod, DetectionMethods, TextElement};

use super::font_stats::FontStatistics;
use super::options::PresetConfig;

const FONT_SIZE_WEIGHT: f32 = 0.35;
const TEXT_PATTERN_WEIGHT: f32 = 0.35;
const TEXT_STRUCTURE_WEIGHT: f32 = 0.20;
const POSITION_WEIGHT: f32 = 0.10;

const FONT_SIZE_ACTIVATION: f32 = 0.3;
const TEXT_PATTERN_ACTIVATION: f32 = 0.5;
const TEXT_STRUCTURE_ACTIVATION: f32 = 0.3;
const POSITION_ACTIVATION: f32 = 0.2;

/// Elements above this y offset count as top of page.
const TOP_OF_PAGE: f32 = 100.0;

/// Per-signal scores for one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FactorScores {
    /// Font size factor in [0, 1]
    pub font_size: f32,
    /// Text pattern factor in [0, 1]
    pub text_pattern: f32,
    /// Text structure factor in [0, 0.5]
    pub text_structure: f32,
    /// Position factor in [0, 0.3]
    pub position: f32,
}

impl FactorScores {
    /// Weighted sum, clamped to [0, 1].
    pub fn weighted(&self) -> f32 {
        let sum = self.font_size * FONT_SIZE_WEIGHT
            + self.text_pattern * TEXT_PATTERN_WEIGHT
            + self.text_structure * TEXT_STRUCTURE_WEIGHT
            + self.position * POSITION_WEIGHT;
        sum.clamp(0.0, 1.0)
    }

    /// Signals whose individual score passed its activation threshold.
    pub fn methods(&self) -> DetectionMethods {
        let mut methods = DetectionMethods::empty();
        if self.font_size > FONT_SIZE_ACTIVATION {
            methods.insert(DetectionMethod::FontSize);
        }
        if self.text_pattern > TEXT_PATTERN_ACTIVATION {
            methods.insert(DetectionMethod::TextPattern);
        }
        if self.text_structure > TEXT_STRUCTURE_ACTIVATION {
            methods.insert(DetectionMethod::TextStructure);
        }
        if self.position > POSITION_ACTIVATION {
            methods.insert(DetectionMethod::Position);
        }
        methods
    }
}

/// Full scoring result for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingScore {
    /// Combined confidence in [0, 1]
    pub confidence: f32,
    /// Individual signal scores
    pub factors: FactorScores,
    /// Signals that fired
    pub methods: DetectionMethods,
}

/// Scores how likely a text element is to be a heading.
#[derive(Debug, Clone)]
pub struct HeadingScorer {
    config: PresetConfig,
    /// Numeric outline prefix: `1`, `1.2`, `1.2.3`
    number_pattern: Regex,
    /// Chapter/section keywords and common section names
    section_patterns: Vec<Regex>,
    /// Uppercase Roman numerals and lettered items (`IV `, `A. `)
    enumeration_patterns: Vec<Regex>,
}

impl HeadingScorer {
    /// Create a scorer with default settings.
    pub fn new() -> Self {
        Self::with_config(PresetConfig::default())
    }

    /// Create a scorer with preset settings.
    pub fn with_config(config: PresetConfig) -> Self {
        Self {
            config,
            number_pattern: compile(r"^\d+(\.\d+)*\s+"),
            section_patterns: vec![
                compile(r"(?i)^(chapter|chap|ch\.|section|sect\.|§\s*\d+)"),
                compile(
                    r"(?i)^(introduction|overview|summary|conclusion|appendix|references?|bibliography)",
                ),
            ],
            enumeration_patterns: vec![compile(r"^[IVXLCDM]+\s+"), compile(r"(?i)^[A-Z]\.\s+")],
        }
    }

    /// The settings this scorer was built with.
    pub fn config(&self) -> &PresetConfig {
        &self.config
    }

    /// Score an element against the document's font statistics.
    pub fn score(&self, element: &TextElement, stats: &FontStatistics) -> HeadingScore {
        let factors = FactorScores {
            font_size: self.score_font_size(element.font_size, stats),
            text_pattern: self.score_text_pattern(&element.text),
            text_structure: score_text_structure(&element.text),
            position: score_position(element.y),
        };
        HeadingScore {
            confidence: factors.weighted(),
            factors,
            methods: factors.methods(),
        }
    }

    /// Combined confidence only.
    pub fn confidence(&self, element: &TextElement, stats: &FontStatistics) -> f32 {
        self.score(element, stats).confidence
    }

    /// Font size factor: 0 below the heading threshold, otherwise 0.5 at the
    /// threshold rising linearly to 1.0 at the largest size.
    pub fn score_font_size(&self, font_size: f32, stats: &FontStatistics) -> f32 {
        if stats.is_empty() || !font_size.is_finite() {
            return 0.0;
        }
        if font_size < stats.heading_threshold
            || font_size < stats.median_size * self.config.min_font_size_multiplier
        {
            return 0.0;
        }
        let span = stats.max_size - stats.heading_threshold;
        if span > 0.0 {
            let ratio = (font_size - stats.heading_threshold) / span;
            (0.5 + ratio * 0.5).min(1.0)
        } else {
            0.8
        }
    }

    /// Text pattern factor.
    pub fn score_text_pattern(&self, text: &str) -> f32 {
        let text = text.trim();
        if text.is_empty() {
            return 0.0;
        }

        if self.matches_heading_pattern(text) {
            return 0.9;
        }

        let words = text.split_whitespace().count();
        if words <= 5 && is_upper_case(text) {
            return 0.7;
        }
        if words <= 4 && is_title_case(text) {
            return 0.6;
        }
        0.0
    }

    fn matches_heading_pattern(&self, text: &str) -> bool {
        if self.config.enable_number_detection && self.number_pattern.is_match(text) {
            return true;
        }
        if self.config.enable_section_detection
            && self.section_patterns.iter().any(|re| re.is_match(text))
        {
            return true;
        }
        self.enumeration_patterns.iter().any(|re| re.is_match(text))
    }
}

impl Default for HeadingScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Text structure factor: short, unpunctuated, at most one sentence.
pub fn score_text_structure(text: &str) -> f32 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;
    let words = text.split_whitespace().count();
    if (1..=10).contains(&words) {
        score += 0.2;
    }
    if !text.ends_with(&['.', '?', '!', ':', ';', ','][..]) {
        score += 0.2;
    }
    if text.matches('.').count() <= 1 {
        score += 0.1;
    }
    score
}

/// Position factor: headings often open a page.
pub fn score_position(y: f32) -> f32 {
    if y < TOP_OF_PAGE {
        0.3
    } else {
        0.0
    }
}

/// At least one cased character and no lowercase ones.
pub(crate) fn is_upper_case(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase()) && !text.chars().any(|c| c.is_lowercase())
}

/// Every word starts uppercase and continues lowercase.
pub(crate) fn is_title_case(text: &str) -> bool {
    let mut seen_cased = false;
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else {
            previous_cased = false;
        }
    }
    seen_cased
}

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::options::DocumentPreset;

    fn stats() -> FontStatistics {
        FontStatistics::from_sizes([10.0, 10.0, 10.0, 10.0, 12.0, 18.0])
    }

    #[test]
    fn test_font_size_factor() {
        let scorer = HeadingScorer::new();
        let stats = stats();

        assert_eq!(scorer.score_font_size(10.0, &stats), 0.0);
        assert!((scorer.score_font_size(18.0, &stats) - 1.0).abs() < 1e-6);

        let at_threshold = scorer.score_font_size(stats.heading_threshold, &stats);
        assert!((at_threshold - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_font_size_factor_flat_when_no_spread() {
        let scorer = HeadingScorer::new();
        let stats = FontStatistics::from_sizes([12.0, 12.0]);
        assert_eq!(scorer.score_font_size(12.0, &stats), 0.8);
        assert_eq!(scorer.score_font_size(12.0, &FontStatistics::default()), 0.0);
    }

    #[test]
    fn test_font_size_multiplier_gate() {
        // median 10, threshold about 10.6
        let stats = FontStatistics::from_sizes([10.0, 10.0, 10.0, 10.0, 10.0, 11.5]);
        assert!(11.5 >= stats.heading_threshold);

        let default = HeadingScorer::new();
        assert!((default.score_font_size(11.5, &stats) - 1.0).abs() < 1e-6);

        // Book requires 1.2 x median = 12
        let book = HeadingScorer::with_config(DocumentPreset::Book.config());
        assert_eq!(book.score_font_size(11.5, &stats), 0.0);
    }

    #[test]
    fn test_text_pattern_factor() {
        let scorer = HeadingScorer::new();
        assert_eq!(scorer.score_text_pattern("1.2 Background"), 0.9);
        assert_eq!(scorer.score_text_pattern("Chapter 3"), 0.9);
        assert_eq!(scorer.score_text_pattern("References"), 0.9);
        assert_eq!(scorer.score_text_pattern("IV Results"), 0.9);
        assert_eq!(scorer.score_text_pattern("B. Secondary findings"), 0.9);
        assert_eq!(scorer.score_text_pattern("EXPERIMENTAL SETUP"), 0.7);
        assert_eq!(scorer.score_text_pattern("Related Work"), 0.6);
        assert_eq!(
            scorer.score_text_pattern("the results were inconclusive overall"),
            0.0
        );
        assert_eq!(scorer.score_text_pattern("   "), 0.0);
    }

    #[test]
    fn test_lowercase_words_are_not_roman_numerals() {
        let scorer = HeadingScorer::new();
        assert_eq!(scorer.score_text_pattern("did you know this"), 0.0);
    }

    #[test]
    fn test_number_detection_toggle() {
        let config = PresetConfig {
            enable_number_detection: false,
            ..PresetConfig::default()
        };
        let scorer = HeadingScorer::with_config(config);
        assert_eq!(scorer.score_text_pattern("2 results of the survey"), 0.0);
        assert_eq!(scorer.score_text_pattern("Conclusion"), 0.9);
    }

    #[test]
    fn test_text_structure_factor() {
        assert!((score_text_structure("Introduction") - 0.5).abs() < 1e-6);
        assert!((score_text_structure("This ends with a period.") - 0.3).abs() < 1e-6);
        assert!(
            (score_text_structure("One. Two. Three. And many more words than ten here now.")
                - 0.0)
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn test_position_factor() {
        assert_eq!(score_position(40.0), 0.3);
        assert_eq!(score_position(400.0), 0.0);
    }

    #[test]
    fn test_case_helpers() {
        assert!(is_upper_case("METHODS AND DATA"));
        assert!(!is_upper_case("Methods"));
        assert!(!is_upper_case("123"));
        assert!(is_title_case("Related Work"));
        assert!(is_title_case("2. Related Work"));
        assert!(!is_title_case("Related work"));
        assert!(!is_title_case("McDonald"));
        assert!(!is_title_case("42"));
    }

    #[test]
    fn test_score_combines_factors() {
        let scorer = HeadingScorer::new();
        let stats = stats();
        let heading = TextElement::new("1 Introduction", 1, 72.0, 50.0, 18.0);
        let score = scorer.score(&heading, &stats);

        // 1.0 * 0.35 + 0.9 * 0.35 + 0.5 * 0.2 + 0.3 * 0.1
        assert!((score.confidence - 0.795).abs() < 1e-5);
        assert_eq!(
            score.methods.to_string(),
            "font_size|text_pattern|text_structure|position"
        );

        let body = TextElement::new(
            "This paragraph explains the approach in considerable detail and then continues for a while.",
            1,
            72.0,
            300.0,
            10.0,
        );
        let score = scorer.score(&body, &stats);
        assert!(score.confidence < 0.2);
        assert!(score.methods.is_empty());
        assert_eq!(score.methods.to_string(), "unknown");
    }
}
