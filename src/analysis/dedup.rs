//! Duplicate removal and final ordering of TOC entries.

use std::collections::HashSet;

use regex::Regex;

use crate::model::TocEntry;

use super::scorer::compile;

/// Normalized titles at or below this length never absorb other entries.
const MIN_MERGE_KEY_LEN: usize = 5;

/// Drop entries whose `(title, page)` pair was already seen, keeping the
/// first occurrence in place.
pub fn dedup_exact(entries: Vec<TocEntry>) -> Vec<TocEntry> {
    let mut seen: HashSet<(String, Option<u32>)> = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert((entry.title.clone(), entry.page_number)))
        .collect()
}

/// Stable sort by page number; entries without a page go last.
pub fn sort_by_page(entries: &mut [TocEntry]) {
    entries.sort_by_key(|entry| (entry.page_number.is_none(), entry.page_number));
}

/// Merges entries collected from independently scanned text blocks.
///
/// Titles are compared after removing non-word characters and
/// lowercasing. A new entry is skipped when its key is a substring of (or
/// contains) the key of an accepted entry longer than five characters.
#[derive(Debug, Clone)]
pub struct TitleMerger {
    non_word: Regex,
}

impl TitleMerger {
    /// Create a merger.
    pub fn new() -> Self {
        Self {
            non_word: compile(r"\W+"),
        }
    }

    /// Comparison key for a title.
    pub fn key(&self, title: &str) -> String {
        self.non_word.replace_all(&title.to_lowercase(), "").into_owned()
    }

    /// Merge overlapping entries, preserving the order of the survivors.
    pub fn merge(&self, entries: Vec<TocEntry>) -> Vec<TocEntry> {
        let mut accepted_keys: Vec<String> = Vec::new();
        let mut merged = Vec::with_capacity(entries.len());

        for entry in entries {
            let key = self.key(&entry.title);
            if key.is_empty() {
                continue;
            }

            let overlaps = accepted_keys.iter().any(|accepted| {
                accepted.chars().count() > MIN_MERGE_KEY_LEN
                    && (accepted.contains(key.as_str()) || key.contains(accepted.as_str()))
            });
            if overlaps {
                log::debug!("TitleMerger: skipping overlapping entry '{}'", entry.title);
                continue;
            }

            accepted_keys.push(key);
            merged.push(entry);
        }

        merged
    }
}

impl Default for TitleMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge overlapping entries with a fresh [`TitleMerger`].
pub fn merge_fuzzy(entries: Vec<TocEntry>) -> Vec<TocEntry> {
    TitleMerger::new().merge(entries)
}
