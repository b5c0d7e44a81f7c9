//! Nesting level assignment for detected headings.

use std::collections::HashMap;

use regex::Regex;

use crate::model::{Heading, LeveledHeading};

use super::font_stats::size_key;
use super::options::DEFAULT_MAX_LEVEL;
use super::scorer::compile;

/// Level used for font sizes outside the ranked set.
const BASELINE_LEVEL: usize = 1;

/// Horizontal offset from the page's leftmost heading that counts as indented.
const INDENT_THRESHOLD: f32 = 20.0;

/// Numbering patterns per level, checked from level 0 down.
const LEVEL_PATTERNS: [&[&str]; 4] = [
    &[
        r"(?i)^chapter\s+\d+",
        r"(?i)^part\s+\w+",
        r"^[IVXLCDM]+[\s\.]",
        r"^\d+\.?(\s|$)",
        r"(?i)^(introduction|preface|foreword)",
    ],
    &[
        r"^\d+\.\d+\.?(\s|$)",
        r"(?i)^section\s+\d+",
        r"^[A-Z]\.[\s\.]?",
        r"^i+[\.\)]\s",
        r"(?i)^(overview|background)",
    ],
    &[
        r"^\d+\.\d+\.\d+\.?(\s|$)",
        r"^\([a-z]\)",
        r"(?i)^(subsection|subheading)",
    ],
    &[r"^\d+\.\d+\.\d+\.\d+", r"^-\s*.+\s*-$"],
];

/// Assigns nesting levels from font size rank, numbering and indentation.
#[derive(Debug, Clone)]
pub struct HierarchyAssigner {
    max_level: usize,
    level_patterns: Vec<Vec<Regex>>,
}

impl HierarchyAssigner {
    /// Create an assigner producing levels in `0..max_level`.
    pub fn new(max_level: usize) -> Self {
        Self {
            max_level: max_level.max(1),
            level_patterns: LEVEL_PATTERNS
                .iter()
                .map(|patterns| patterns.iter().map(|p| compile(p)).collect())
                .collect(),
        }
    }

    /// Number of levels this assigner produces.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Level implied by the numbering of a title, if any.
    pub fn pattern_level(&self, title: &str) -> Option<usize> {
        let title = title.trim();
        self.level_patterns
            .iter()
            .position(|patterns| patterns.iter().any(|re| re.is_match(title)))
    }

    /// Assign a level to every heading, keeping input order.
    ///
    /// A numbering pattern overrides the font-size rank. Headings without
    /// one are pushed one level down when indented more than 20 units past
    /// the leftmost heading on their page.
    pub fn assign_levels(&self, headings: &[Heading]) -> Vec<LeveledHeading> {
        if headings.len() == 1 {
            return vec![LeveledHeading {
                heading: headings[0].clone(),
                level: 0,
            }];
        }

        let size_levels = self.rank_font_sizes(headings);

        let mut page_min_x: HashMap<u32, f32> = HashMap::new();
        for heading in headings {
            page_min_x
                .entry(heading.page)
                .and_modify(|x| *x = x.min(heading.position.x))
                .or_insert(heading.position.x);
        }

        let deepest = self.max_level - 1;
        headings
            .iter()
            .map(|heading| {
                let by_size = size_levels
                    .get(&size_key(heading.font_size))
                    .copied()
                    .unwrap_or(BASELINE_LEVEL);

                let level = match self.pattern_level(&heading.title) {
                    Some(level) => level,
                    None => {
                        let min_x = page_min_x
                            .get(&heading.page)
                            .copied()
                            .unwrap_or(heading.position.x);
                        if heading.position.x - min_x > INDENT_THRESHOLD {
                            (by_size + 1).min(deepest)
                        } else {
                            by_size
                        }
                    }
                };

                LeveledHeading {
                    heading: heading.clone(),
                    level: level.min(deepest),
                }
            })
            .collect()
    }

    /// Map the largest `max_level` distinct font sizes to levels 0, 1, ...
    fn rank_font_sizes(&self, headings: &[Heading]) -> HashMap<i32, usize> {
        let mut sizes: Vec<i32> = headings.iter().map(|h| size_key(h.font_size)).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();
        sizes
            .into_iter()
            .take(self.max_level)
            .enumerate()
            .map(|(level, size)| (size, level))
            .collect()
    }
}

impl Default for HierarchyAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL)
    }
}
