//! Data model for TOC inference.
//!
//! Text elements come in from the extraction collaborator, headings and
//! page results are intermediate products, and [`TocEntry`] is the single
//! output shape shared by every strategy.

mod element;
mod entry;
mod heading;
mod outline;
mod report;

pub use element::{FontWeight, Glyph, NamedWeight, TextElement};
pub use entry::{TocEntry, TocPageResult};
pub use heading::{DetectionMethod, DetectionMethods, Heading, LeveledHeading, Position};
pub use outline::{outline_to_entries, OutlineNode};
pub use report::{IssueKind, Severity, TocStatistics, ValidationIssue, ValidationReport};
