//! Detection of printed table-of-contents pages.
//!
//! Every page in the leading window is analysed on its own (in parallel
//! when enabled). When no page qualifies, entries from all moderately
//! TOC-like pages are combined into one synthetic multi-page result.

use rayon::prelude::*;
use regex::Regex;

use crate::model::{TocEntry, TocPageResult};

use super::dedup::TitleMerger;
use super::line_pattern::{FormatFamily, LinePatternMatcher};
use super::options::DEFAULT_MAX_PAGES;
use super::scorer::compile;

/// Minimum number of non-blank lines for a page to be considered.
pub const MIN_PAGE_LINES: usize = 3;

const MIN_FAMILY_ENTRIES: usize = 2;
const MIN_BASIC_ENTRIES: usize = 3;
const ENTRY_CONFIDENCE_FLOOR: f32 = 0.5;
const BLOCK_ENTRY_FLOOR: f32 = 0.3;
const COMBINED_PAGE_FLOOR: f32 = 0.3;
const COMBINED_MIN_ENTRIES: usize = 5;
const COMBINED_CONFIDENCE: f32 = 0.7;
const RESULT_FLOOR: f32 = 0.5;
const BASIC_MAX_PAGE: u32 = 999;
const BASIC_MIN_TITLE_LEN: usize = 3;
const ACADEMIC_CONTEXT: usize = 20;

const ACADEMIC_SECTIONS: [&str; 6] = [
    "abstract",
    "introduction",
    "methods",
    "results",
    "discussion",
    "conclusion",
];

/// Format type and method names reported in results.
pub const BASIC_HEURISTIC: &str = "basic_heuristic";
pub const ACADEMIC_SECTIONS_METHOD: &str = "academic_sections";
pub const PAGE_ANALYSIS: &str = "page_analysis";
pub const MULTI_PAGE: &str = "multi_page";
pub const COMBINED_ANALYSIS: &str = "combined_analysis";

/// Scans the first pages of a document for a printed TOC.
#[derive(Debug, Clone)]
pub struct TocPageScanner {
    matcher: LinePatternMatcher,
    merger: TitleMerger,
    trailing_number: Regex,
    first_number: Regex,
    academic: Vec<Regex>,
    max_pages: usize,
    parallel: bool,
}

/// Entries found on one page before acceptance rules are applied.
struct PageCandidates {
    entries: Vec<TocEntry>,
    format_type: String,
    line_count: usize,
}

impl TocPageScanner {
    /// Create a scanner with default settings.
    pub fn new() -> Self {
        Self {
            matcher: LinePatternMatcher::new(),
            merger: TitleMerger::new(),
            trailing_number: compile(r"(\d+)$"),
            first_number: compile(r"\d+"),
            academic: ACADEMIC_SECTIONS
                .iter()
                .map(|name| compile(&format!(r"(?i)\b{}\b", name)))
                .collect(),
            max_pages: DEFAULT_MAX_PAGES,
            parallel: true,
        }
    }

    /// Set how many leading pages are scanned.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable or disable parallel page analysis.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Analyse pages one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// The line matcher used by this scanner.
    pub fn matcher(&self) -> &LinePatternMatcher {
        &self.matcher
    }

    /// Scan the leading pages and return TOC page candidates, best first.
    ///
    /// `pages[0]` is page 1. The combined multi-page scan runs only when no
    /// single page is accepted. Only results with confidence above 0.5 are
    /// returned; a combined result has page number 0.
    pub fn scan<S: AsRef<str> + Sync>(&self, pages: &[S]) -> Vec<TocPageResult> {
        let window = &pages[..pages.len().min(self.max_pages)];

        let analysed: Vec<Option<TocPageResult>> = if self.parallel {
            window
                .par_iter()
                .enumerate()
                .map(|(i, text)| self.analyze_page(page_number(i), text.as_ref()))
                .collect()
        } else {
            window
                .iter()
                .enumerate()
                .map(|(i, text)| self.analyze_page(page_number(i), text.as_ref()))
                .collect()
        };

        let mut results: Vec<TocPageResult> = analysed.into_iter().flatten().collect();
        log::debug!(
            "TocPageScanner: {} of {} pages accepted",
            results.len(),
            window.len()
        );

        if results.is_empty() {
            results = self.scan_combined(window).into_iter().collect();
        }

        results.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| b.entries.len().cmp(&a.entries.len()))
        });
        results.retain(|r| r.confidence > RESULT_FLOOR);
        results
    }

    /// Analyse one page.
    ///
    /// Returns `None` when the page has fewer than three lines or when
    /// neither a line family nor the basic heuristic yields enough entries.
    pub fn analyze_page(&self, page_number: u32, text: &str) -> Option<TocPageResult> {
        let candidates = self.collect_candidates(text, true)?;
        let confidence = page_confidence(&candidates.entries, candidates.line_count);
        Some(TocPageResult {
            page_number,
            confidence,
            entries: candidates.entries,
            format_type: candidates.format_type,
            method_used: PAGE_ANALYSIS.to_string(),
        })
    }

    /// Confidence a page would get even if it fails the acceptance rules.
    fn best_effort(&self, text: &str) -> Option<(Vec<TocEntry>, f32)> {
        let candidates = self.collect_candidates(text, false)?;
        let confidence = page_confidence(&candidates.entries, candidates.line_count);
        Some((candidates.entries, confidence))
    }

    fn collect_candidates(&self, text: &str, strict: bool) -> Option<PageCandidates> {
        let lines = page_lines(text);
        if strict && lines.len() < MIN_PAGE_LINES {
            return None;
        }
        if lines.is_empty() {
            return None;
        }

        let (min_family, min_basic) = if strict {
            (MIN_FAMILY_ENTRIES, MIN_BASIC_ENTRIES)
        } else {
            (1, 1)
        };

        for family in FormatFamily::ALL {
            let entries: Vec<TocEntry> = lines
                .iter()
                .filter_map(|line| self.matcher.match_family(line, family))
                .filter(|m| m.confidence > ENTRY_CONFIDENCE_FLOOR)
                .map(|m| m.into_entry())
                .collect();
            if entries.len() >= min_family {
                return Some(PageCandidates {
                    entries,
                    format_type: family.as_str().to_string(),
                    line_count: lines.len(),
                });
            }
        }

        let entries = self.basic_entries(&lines);
        if entries.len() >= min_basic {
            return Some(PageCandidates {
                entries,
                format_type: BASIC_HEURISTIC.to_string(),
                line_count: lines.len(),
            });
        }

        None
    }

    /// Lines ending in a page number between 1 and 999.
    fn basic_entries(&self, lines: &[&str]) -> Vec<TocEntry> {
        lines
            .iter()
            .filter_map(|line| {
                let line = line.trim();
                let caps = self.trailing_number.captures(line)?;
                let number = caps.get(1)?;
                let page = number.as_str().parse::<u32>().ok()?;
                let title = line[..number.start()].trim();
                if title.chars().count() > BASIC_MIN_TITLE_LEN && (1..=BASIC_MAX_PAGE).contains(&page) {
                    Some(TocEntry::detected(title, page, 0, 0.5, BASIC_HEURISTIC))
                } else {
                    None
                }
            })
            .collect()
    }

    fn scan_combined<S: AsRef<str> + Sync>(&self, window: &[S]) -> Option<TocPageResult> {
        let mut entries = Vec::new();
        for (i, text) in window.iter().enumerate() {
            match self.best_effort(text.as_ref()) {
                Some((page_entries, confidence)) if confidence > COMBINED_PAGE_FLOOR => {
                    entries.extend(page_entries);
                }
                Some(_) => {}
                None => log::debug!("TocPageScanner: page {} has no TOC lines", page_number(i)),
            }
        }

        if entries.len() < COMBINED_MIN_ENTRIES {
            return None;
        }

        let entries = self.merger.merge(entries);
        log::debug!(
            "TocPageScanner: combined scan produced {} entries",
            entries.len()
        );

        Some(TocPageResult {
            page_number: 0,
            confidence: COMBINED_CONFIDENCE,
            entries,
            format_type: MULTI_PAGE.to_string(),
            method_used: COMBINED_ANALYSIS.to_string(),
        })
    }

    /// Extract entries from independently scanned text blocks.
    ///
    /// Each block uses the line family matching the largest share of its
    /// lines. Blocks without such a family fall back to locating common
    /// academic section names next to a number. Overlapping titles across
    /// blocks are merged.
    pub fn scan_blocks<S: AsRef<str>>(&self, blocks: &[S]) -> Vec<TocEntry> {
        let mut entries = Vec::new();
        for block in blocks {
            let block = block.as_ref();
            match self.dominant_family(block) {
                Some(family) => entries.extend(
                    page_lines(block)
                        .into_iter()
                        .filter_map(|line| self.matcher.match_family(line, family))
                        .filter(|m| m.confidence > BLOCK_ENTRY_FLOOR)
                        .map(|m| m.into_entry()),
                ),
                None => entries.extend(self.academic_sections(block)),
            }
        }
        self.merger.merge(entries)
    }

    /// Family with the highest match ratio among those matching two lines or more.
    fn dominant_family(&self, block: &str) -> Option<FormatFamily> {
        let lines = page_lines(block);
        if lines.is_empty() {
            return None;
        }

        let mut best: Option<(FormatFamily, f32)> = None;
        for family in FormatFamily::ALL {
            let matched = lines
                .iter()
                .filter(|line| self.matcher.match_family(line, family).is_some())
                .count();
            if matched < MIN_FAMILY_ENTRIES {
                continue;
            }
            let ratio = matched as f32 / lines.len() as f32;
            if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
                best = Some((family, ratio));
            }
        }
        best.map(|(family, _)| family)
    }

    fn academic_sections(&self, text: &str) -> Vec<TocEntry> {
        let mut entries = Vec::new();
        for (i, (name, pattern)) in ACADEMIC_SECTIONS.iter().zip(&self.academic).enumerate() {
            let page = pattern.find_iter(text).find_map(|m| {
                let context = surrounding(text, m.start(), m.end(), ACADEMIC_CONTEXT);
                self.first_number
                    .find(context)
                    .and_then(|n| n.as_str().parse::<u32>().ok())
            });
            match page {
                Some(page) if page > 0 => {
                    let level = if i < 2 { 1 } else { 2 };
                    entries.push(TocEntry::detected(
                        title_case(name),
                        page,
                        level,
                        0.8,
                        ACADEMIC_SECTIONS_METHOD,
                    ));
                }
                _ => {}
            }
        }
        entries
    }
}

impl Default for TocPageScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn page_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Non-blank lines with trailing whitespace removed; indentation is kept.
fn page_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Likelihood that a set of entries found among `total_lines` lines is a TOC.
pub fn page_confidence(entries: &[TocEntry], total_lines: usize) -> f32 {
    if entries.is_empty() {
        return 0.0;
    }

    let ratio = entries.len() as f32 / total_lines.max(1) as f32;
    let mut confidence = (ratio * 2.0).min(1.0);

    let mut pages: Vec<u32> = entries.iter().filter_map(|e| e.page_number).collect();
    if pages.len() > 1 {
        pages.sort_unstable();
        let consecutive = pages.windows(2).filter(|w| w[1] == w[0] + 1).count();
        if consecutive > pages.len() / 2 {
            confidence += 0.1;
        }
    }

    let first_method = entries[0].method();
    if entries.iter().all(|e| e.method() == first_method) {
        confidence += 0.05;
    }

    confidence.min(1.0)
}

/// Slice of `text` extending `radius` bytes around a match, snapped to char boundaries.
fn surrounding(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let mut from = start.saturating_sub(radius);
    while !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + radius).min(text.len());
    while !text.is_char_boundary(to) {
        to += 1;
    }
    &text[from..to]
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
