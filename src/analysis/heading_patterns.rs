//! Heading candidates from runs of identically formatted lines.
//!
//! A complement to [`HeadingDetector`](super::HeadingDetector): instead of
//! scoring every element against document statistics, consecutive lines in
//! one format are treated as a unit and judged by the first line.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::layout::group_by_formatting;
use crate::model::TextElement;

use super::scorer::compile;

/// Groups whose first line is at least this large count as headings
/// even without a textual cue.
pub const LARGE_GROUP_FONT_SIZE: f32 = 14.0;

/// Textual and typographic cues found on a group's first line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternCues {
    /// Starts with `1`, `2.3` or similar followed by whitespace
    pub number: bool,
    /// Starts with a chapter or section word
    pub chapter: bool,
    /// At most five words, all cased letters uppercase
    pub short_uppercase: bool,
    /// Set in a bold face
    pub bold: bool,
}

impl PatternCues {
    /// Number of cues present.
    pub fn count(&self) -> usize {
        [self.number, self.chapter, self.short_uppercase, self.bold]
            .iter()
            .filter(|c| **c)
            .count()
    }

    /// `|`-joined cue names, or `size_based` when none fired.
    pub fn pattern_type(&self) -> String {
        let names: Vec<&str> = [
            (self.number, "number_pattern"),
            (self.chapter, "chapter_pattern"),
            (self.short_uppercase, "short_uppercase"),
            (self.bold, "bold_format"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();
        if names.is_empty() {
            "size_based".to_string()
        } else {
            names.join("|")
        }
    }
}

/// A heading built from one formatting group.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternHeading {
    /// The group merged into one element (text joined by spaces, first line's metrics)
    pub element: TextElement,
    /// See [`PatternCues::pattern_type`]
    pub pattern_type: String,
    /// `0.5 + 0.15` per cue, capped at 0.95
    pub confidence: f32,
    /// Number of lines merged
    pub group_size: usize,
}

/// Counters collected while analyzing groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternStatistics {
    /// Groups per format (`"{size}_{font}"`)
    pub formatting_patterns: BTreeMap<String, usize>,
    /// Heading groups per pattern type
    pub pattern_types: BTreeMap<String, usize>,
    /// Total number of groups
    pub groups: usize,
}

/// Finds heading groups by their first line's cues.
#[derive(Debug, Clone)]
pub struct HeadingPatternAnalyzer {
    number: Regex,
    chapter: Regex,
}

impl HeadingPatternAnalyzer {
    /// Create an analyzer with the built-in cue patterns.
    pub fn new() -> Self {
        Self {
            number: compile(r"^\d+(\.\d+)*\s+"),
            chapter: compile(r"(?i)^(chapter|chap|ch\.|section|sect\.)"),
        }
    }

    /// Cues present on one element.
    pub fn cues(&self, element: &TextElement) -> PatternCues {
        let text = element.text.as_str();
        PatternCues {
            number: self.number.is_match(text),
            chapter: self.chapter.is_match(text),
            short_uppercase: is_short_uppercase(text),
            bold: element.is_bold(),
        }
    }

    /// Group the elements by format and keep the groups that read as headings.
    pub fn analyze(&self, elements: &[TextElement]) -> (Vec<PatternHeading>, PatternStatistics) {
        let mut stats = PatternStatistics::default();
        let mut headings = Vec::new();

        for group in group_by_formatting(elements) {
            let Some(first) = group.first() else {
                continue;
            };
            stats.groups += 1;
            *stats
                .formatting_patterns
                .entry(format!("{:.1}_{}", first.font_size, first.font_name))
                .or_insert(0) += 1;

            let cues = self.cues(first);
            if cues.count() == 0 && first.font_size <= LARGE_GROUP_FONT_SIZE {
                continue;
            }

            let pattern_type = cues.pattern_type();
            *stats.pattern_types.entry(pattern_type.clone()).or_insert(0) += 1;
            headings.push(PatternHeading {
                confidence: (0.5 + cues.count() as f32 * 0.15).min(0.95),
                pattern_type,
                group_size: group.len(),
                element: merge_group(&group),
            });
        }

        log::debug!(
            "HeadingPatternAnalyzer: {} of {} groups are headings",
            headings.len(),
            stats.groups
        );
        (headings, stats)
    }
}

impl Default for HeadingPatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyze heading patterns with the default analyzer.
pub fn analyze_heading_patterns(
    elements: &[TextElement],
) -> (Vec<PatternHeading>, PatternStatistics) {
    HeadingPatternAnalyzer::new().analyze(elements)
}

fn is_short_uppercase(text: &str) -> bool {
    let has_cased = text.chars().any(|c| c.is_uppercase() || c.is_lowercase());
    has_cased && !text.chars().any(char::is_lowercase) && text.split_whitespace().count() <= 5
}

fn merge_group(group: &[TextElement]) -> TextElement {
    let mut merged = group[0].clone();
    if group.len() > 1 {
        let texts: Vec<&str> = group.iter().map(|e| e.text.as_str()).collect();
        merged.text = texts.join(" ").trim().to_string();
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontWeight;

    fn line(text: &str, y: f32, size: f32, font: &str) -> TextElement {
        TextElement::new(text, 1, 72.0, y, size).with_font_name(font)
    }

    #[test]
    fn test_cues() {
        let analyzer = HeadingPatternAnalyzer::new();

        let numbered = analyzer.cues(&line("2.1 Scope", 0.0, 12.0, "Times"));
        assert!(numbered.number && !numbered.chapter && !numbered.bold);
        assert_eq!(numbered.pattern_type(), "number_pattern");

        let chapter = analyzer.cues(&line("CHAPTER ONE", 0.0, 12.0, "Times-Bold"));
        assert!(chapter.chapter && chapter.short_uppercase && chapter.bold);
        assert_eq!(chapter.count(), 3);
        assert_eq!(
            chapter.pattern_type(),
            "chapter_pattern|short_uppercase|bold_format"
        );

        let weighted = line("Summary", 0.0, 12.0, "Times").with_weight(FontWeight::Numeric(700.0));
        assert!(analyzer.cues(&weighted).bold);

        let plain = analyzer.cues(&line("plain words here", 0.0, 12.0, "Times"));
        assert_eq!(plain.count(), 0);
        assert_eq!(plain.pattern_type(), "size_based");
    }

    #[test]
    fn test_short_uppercase_needs_letters() {
        assert!(is_short_uppercase("RESULTS AND DISCUSSION"));
        assert!(!is_short_uppercase("2024"));
        assert!(!is_short_uppercase("A VERY LONG SHOUTED LINE OF TEXT"));
    }

    #[test]
    fn test_groups_merge_into_headings() {
        let elements = vec![
            line("1 Introduction to", 100.0, 12.0, "Times-Bold"),
            line("the Problem", 115.0, 12.0, "Times-Bold"),
            line("Body text that explains the problem at length.", 140.0, 10.0, "Times"),
            line("More body text in the same face.", 152.0, 10.0, "Times"),
            line("Large Plain Title", 200.0, 18.0, "Times"),
            line("Closing body text.", 240.0, 10.0, "Times"),
        ];
        let (headings, stats) = analyze_heading_patterns(&elements);

        let texts: Vec<&str> = headings.iter().map(|h| h.element.text.as_str()).collect();
        assert_eq!(texts, vec!["1 Introduction to the Problem", "Large Plain Title"]);

        assert_eq!(headings[0].group_size, 2);
        assert_eq!(headings[0].element.y, 100.0);
        assert_eq!(headings[0].pattern_type, "number_pattern|bold_format");
        assert!((headings[0].confidence - 0.8).abs() < 1e-6);

        assert_eq!(headings[1].pattern_type, "size_based");
        assert!((headings[1].confidence - 0.5).abs() < 1e-6);

        assert_eq!(stats.groups, 4);
        assert_eq!(stats.formatting_patterns["10.0_Times"], 2);
        assert_eq!(stats.formatting_patterns["12.0_Times-Bold"], 1);
        assert_eq!(stats.pattern_types["size_based"], 1);
    }

    #[test]
    fn test_confidence_is_capped() {
        let element = line("1 CHAPTER", 0.0, 12.0, "Arial-Black");
        let (headings, _) = analyze_heading_patterns(&[element]);
        // number, short_uppercase and bold fire; chapter needs the word first.
        assert!((headings[0].confidence - 0.95).abs() < 1e-6);
        assert_eq!(analyze_heading_patterns(&[]).1.groups, 0);
    }
}
