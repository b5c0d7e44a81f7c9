//! Advisory validation report for a finished TOC.

use std::collections::BTreeMap;

use serde::Serialize;

/// Kind of consistency issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Entry points to an earlier page than its predecessor
    PageOrder,
    /// Level increases by more than one step
    LevelGap,
    /// Entry confidence below the configured minimum
    LowConfidence,
    /// Level distribution looks wrong (too few or too many top-level entries)
    Hierarchy,
    /// Average confidence across all entries is low
    LowAverageConfidence,
}

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only
    Info,
    /// Probably worth a look
    Warning,
    /// The TOC is unusable
    Error,
}

/// One consistency issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Issue kind
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Severity
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// Index of the offending entry, for per-entry issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl ValidationIssue {
    /// Create an issue tied to an entry.
    pub fn at(kind: IssueKind, severity: Severity, message: impl Into<String>, index: usize) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            index: Some(index),
        }
    }

    /// Create an issue about the TOC as a whole.
    pub fn global(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            index: None,
        }
    }
}

/// Shape statistics of a TOC.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TocStatistics {
    /// Number of entries
    pub total_entries: usize,
    /// Share of distinct titles, in [0, 1]
    pub uniqueness: f32,
    /// Entry count per level; levels deeper than 3 are counted at 3
    pub level_distribution: BTreeMap<usize, usize>,
}

/// Result of validating a TOC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// False only when an error-severity issue was found
    pub valid: bool,
    /// Issues in the order they were found
    pub issues: Vec<ValidationIssue>,
    /// Mean confidence of entries that carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f32>,
    /// Shape statistics
    pub statistics: TocStatistics,
}

impl ValidationReport {
    /// Issues of the given kind.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}
