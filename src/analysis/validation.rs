//! Advisory consistency checks over a finished TOC.

use std::collections::{BTreeMap, HashSet};

use crate::model::{IssueKind, Severity, TocEntry, TocStatistics, ValidationIssue, ValidationReport};

/// Level-0 share below which the TOC has too few main sections.
const MIN_TOP_LEVEL_SHARE: f32 = 0.1;

/// Level-0 share above which the TOC looks flat.
const MAX_TOP_LEVEL_SHARE: f32 = 0.7;

/// Average confidence below which the whole TOC is flagged.
const MIN_AVERAGE_CONFIDENCE: f32 = 0.6;

/// Deepest level tracked separately in the level distribution.
const MAX_DISTRIBUTION_LEVEL: usize = 3;

/// Check entries for ordering, level and confidence problems.
///
/// Issues never abort validation; the report is only marked invalid when
/// an error-severity issue is present.
pub fn validate(entries: &[TocEntry], min_confidence: f32) -> ValidationReport {
    let mut issues = Vec::new();

    let mut prev_page: Option<u32> = None;
    let mut prev_level: Option<usize> = None;
    for (index, entry) in entries.iter().enumerate() {
        if let Some(page) = entry.page_number {
            if let Some(prev) = prev_page {
                if page < prev {
                    issues.push(ValidationIssue::at(
                        IssueKind::PageOrder,
                        Severity::Warning,
                        format!(
                            "Entry '{}' on page {} appears after page {}",
                            entry.title, page, prev
                        ),
                        index,
                    ));
                }
            }
            prev_page = Some(page);
        }

        let allowed = prev_level.map_or(0, |level| level + 1);
        if entry.level > allowed {
            let from = prev_level.map_or_else(|| "start".to_string(), |level| level.to_string());
            issues.push(ValidationIssue::at(
                IssueKind::LevelGap,
                Severity::Info,
                format!("Level jump from {} to {}", from, entry.level),
                index,
            ));
        }
        prev_level = Some(entry.level);

        if let Some(confidence) = entry.confidence {
            if confidence < min_confidence {
                issues.push(ValidationIssue::at(
                    IssueKind::LowConfidence,
                    Severity::Warning,
                    format!("Low confidence {:.2} for '{}'", confidence, entry.title),
                    index,
                ));
            }
        }
    }

    if entries.len() > 3 {
        let top_level = entries.iter().filter(|e| e.level == 0).count();
        let share = top_level as f32 / entries.len() as f32;
        if share < MIN_TOP_LEVEL_SHARE {
            issues.push(ValidationIssue::global(
                IssueKind::Hierarchy,
                Severity::Warning,
                "Too few main sections",
            ));
        } else if share > MAX_TOP_LEVEL_SHARE {
            issues.push(ValidationIssue::global(
                IssueKind::Hierarchy,
                Severity::Info,
                "Possible flat structure",
            ));
        }
    }

    let confidences: Vec<f32> = entries.iter().filter_map(|e| e.confidence).collect();
    let average_confidence = if confidences.is_empty() {
        None
    } else {
        Some(confidences.iter().sum::<f32>() / confidences.len() as f32)
    };
    if let Some(average) = average_confidence {
        if average < MIN_AVERAGE_CONFIDENCE {
            issues.push(ValidationIssue::global(
                IssueKind::LowAverageConfidence,
                Severity::Warning,
                format!("Low average confidence: {:.2}", average),
            ));
        }
    }

    let valid = !issues.iter().any(|issue| issue.severity == Severity::Error);
    log::debug!(
        "validate: {} entries, {} issues",
        entries.len(),
        issues.len()
    );

    ValidationReport {
        valid,
        issues,
        average_confidence,
        statistics: statistics(entries),
    }
}

/// Shape statistics of a TOC.
pub fn statistics(entries: &[TocEntry]) -> TocStatistics {
    if entries.is_empty() {
        return TocStatistics::default();
    }

    let distinct: HashSet<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    let mut level_distribution = BTreeMap::new();
    for entry in entries {
        *level_distribution
            .entry(entry.level.min(MAX_DISTRIBUTION_LEVEL))
            .or_insert(0) += 1;
    }

    TocStatistics {
        total_entries: entries.len(),
        uniqueness: distinct.len() as f32 / entries.len() as f32,
        level_distribution,
    }
}
