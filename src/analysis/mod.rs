//! Heuristic TOC inference.
//!
//! Two independent paths produce [`TocEntry`](crate::model::TocEntry) lists:
//!
//! - **Headings**: [`FontStatistics`] → [`HeadingScorer`] / [`HeadingDetector`]
//!   → [`HierarchyAssigner`] → [`TocTreeBuilder`]. [`HeadingPatternAnalyzer`]
//!   offers a second opinion over runs of identically formatted lines.
//! - **Printed TOC pages**: [`LinePatternMatcher`] → [`TocPageScanner`].
//!
//! Both end in [`dedup`] and [`validate`].

pub mod dedup;
pub(crate) mod font_stats;
mod heading_detector;
mod heading_patterns;
mod hierarchy;
mod line_pattern;
mod options;
mod page_scanner;
mod scorer;
mod tree;
mod validation;

pub use dedup::{dedup_exact, merge_fuzzy, sort_by_page, TitleMerger};
pub use font_stats::{FontStatistics, FontUsage};
pub use heading_detector::HeadingDetector;
pub use heading_patterns::{
    analyze_heading_patterns, HeadingPatternAnalyzer, PatternCues, PatternHeading,
    PatternStatistics,
};
pub use hierarchy::HierarchyAssigner;
pub use line_pattern::{
    resolve_page_token, FormatFamily, LineGrammar, LineMatch, LinePatternMatcher, MAX_LINE_LEVEL,
};
pub use options::{DocumentPreset, PresetConfig, TocOptions, DEFAULT_MAX_LEVEL, DEFAULT_MAX_PAGES};
pub use page_scanner::{page_confidence, TocPageScanner, MIN_PAGE_LINES};
pub use scorer::{score_position, score_text_structure, FactorScores, HeadingScore, HeadingScorer};
pub use tree::{NodeId, TocNode, TocTree, TocTreeBuilder};
pub use validation::{statistics, validate};
