//! Line grammars for printed table-of-contents pages.
//!
//! Each TOC line format ("family") has one or more equivalent regular
//! expressions tried in priority order (`primary`, then `variant1..`).
//! A match yields a title, a page token and a nesting level; lines whose
//! page token does not resolve to a positive page number are dropped.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::TocEntry;

use super::scorer::compile;

/// Deepest level a TOC line can be assigned.
pub const MAX_LINE_LEVEL: usize = 3;

/// Indentation width of one nesting step.
const INDENT_STEP: usize = 4;

/// Page token of the primary dot-leader and tab grammars: arabic numbers,
/// lowercase Roman numerals and section-prefixed numbers (`A-12`).
const PAGE_TOKEN: &str = r"(\d+[a-z]*|[ivx]+|[A-Z]+-\d+)";

/// Titles equal to one of these get a small confidence bonus.
const STRUCTURAL_KEYWORDS: [&str; 4] = ["introduction", "conclusion", "references", "appendix"];

/// TOC line format families, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    /// `Title ........ 12`
    DotLeader,
    /// `Title<TAB>12`
    TabBased,
    /// `Title      12`
    SpaceAligned,
    /// `1.2 Title   12`
    NumberedOrdinal,
    /// `- Title  12`
    MarkedList,
    /// `Title 12` (link-like page references)
    Hyperlink,
}

impl FormatFamily {
    /// All families in priority order.
    pub const ALL: [FormatFamily; 6] = [
        FormatFamily::DotLeader,
        FormatFamily::TabBased,
        FormatFamily::SpaceAligned,
        FormatFamily::NumberedOrdinal,
        FormatFamily::MarkedList,
        FormatFamily::Hyperlink,
    ];

    /// Stable identifier used as detection method and format type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatFamily::DotLeader => "dot_leader",
            FormatFamily::TabBased => "tab_based",
            FormatFamily::SpaceAligned => "space_aligned",
            FormatFamily::NumberedOrdinal => "numbered_ordinal",
            FormatFamily::MarkedList => "marked_list",
            FormatFamily::Hyperlink => "hyperlink",
        }
    }

    fn confidence_bonus(&self) -> f32 {
        match self {
            FormatFamily::DotLeader => 0.1,
            FormatFamily::NumberedOrdinal => 0.15,
            _ => 0.0,
        }
    }
}

/// One regular expression of a family.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    /// Family this grammar belongs to
    pub family: FormatFamily,
    /// Variant name (`primary`, `variant1`, ...)
    pub variant: &'static str,
    regex: Regex,
    number_group: Option<usize>,
    title_group: usize,
    page_group: usize,
}

impl LineGrammar {
    fn new(family: FormatFamily, variant: &'static str, pattern: &str) -> Self {
        Self {
            family,
            variant,
            regex: compile(pattern),
            number_group: None,
            title_group: 1,
            page_group: 2,
        }
    }

    fn numbered(family: FormatFamily, variant: &'static str, pattern: &str) -> Self {
        Self {
            family,
            variant,
            regex: compile(pattern),
            number_group: Some(1),
            title_group: 2,
            page_group: 3,
        }
    }

    /// The underlying pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// A TOC line candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMatch {
    /// Normalized title
    pub title: String,
    /// Page token as it appeared in the line
    pub raw_page_token: String,
    /// Resolved page number
    pub page_number: u32,
    /// Nesting level in [0, 3]
    pub level: usize,
    /// Entry confidence in [0, 1]
    pub confidence: f32,
    /// Family that matched
    pub family: FormatFamily,
    /// Variant that matched
    pub variant: &'static str,
}

impl LineMatch {
    /// Convert into a TOC entry tagged with the family name.
    pub fn into_entry(self) -> TocEntry {
        TocEntry::detected(
            self.title,
            self.page_number,
            self.level,
            self.confidence,
            self.family.as_str(),
        )
    }
}

/// Matches single lines against the TOC grammar library.
#[derive(Debug, Clone)]
pub struct LinePatternMatcher {
    grammars: Vec<LineGrammar>,
    whitespace: Regex,
    leading_outline: Regex,
    trailing_dots: Regex,
    outline_prefix: Regex,
    embedded_outline: Regex,
    roman_prefix: Regex,
}

impl LinePatternMatcher {
    /// Create a matcher with the built-in grammar library.
    pub fn new() -> Self {
        use FormatFamily::*;

        let grammars = vec![
            LineGrammar::new(DotLeader, "primary", &format!(r"^(.*?)\.{{3,}}\s*{}$", PAGE_TOKEN)),
            LineGrammar::new(DotLeader, "variant1", r"^(.*?)\s+\.+\s+(\d+)$"),
            LineGrammar::new(DotLeader, "variant2", r"^(.*?)\x{00A0}+\.+\s*(\d+)$"),
            LineGrammar::new(DotLeader, "variant3", r"^(.*?) +\.+\s*(\d+)$"),
            LineGrammar::new(TabBased, "primary", &format!(r"^(.*?)\t+{}$", PAGE_TOKEN)),
            LineGrammar::new(TabBased, "variant1", r"^(.*?)\t+\s*(\d+)$"),
            LineGrammar::new(TabBased, "variant2", r"^(.*?)\s+\t+(\d+)$"),
            LineGrammar::new(SpaceAligned, "primary", r"^(.*?)\s{4,}(\d+[a-z]*)$"),
            LineGrammar::new(SpaceAligned, "variant1", r"^(.*?)\s+\s{3,}(\d+)$"),
            LineGrammar::numbered(
                NumberedOrdinal,
                "primary",
                r"^(\d+\.\d*)\s+(.*?)\s+\.*\s*(\d+[a-z]*)$",
            ),
            LineGrammar::numbered(NumberedOrdinal, "variant1", r"^(\d+)\.?\s+(.*?)\s+\.*\s*(\d+)$"),
            LineGrammar::numbered(
                NumberedOrdinal,
                "variant2",
                r"^(\d+\.\d+\.\d*)\s+(.*?)\s+\.*\s*(\d+)$",
            ),
            LineGrammar::new(MarkedList, "primary", r"^[-*+]\s+(.*?)\s+\.*\s*(\d+[a-z]*)$"),
            LineGrammar::new(MarkedList, "variant1", r"^\d+\.\s+(.*?)\s+\.*\s*(\d+)$"),
            LineGrammar::new(Hyperlink, "primary", r"^(.*?)\s+\.*\s*(\d+)(?:\s+goto)?$"),
        ];

        Self {
            grammars,
            whitespace: compile(r"\s+"),
            leading_outline: compile(r"^\d+(?:\.\d+)*\.?\s+"),
            trailing_dots: compile(r"\s*\.+$"),
            outline_prefix: compile(r"^(\d+(?:\.\d+)*)"),
            embedded_outline: compile(r"\d+\.\d+"),
            roman_prefix: compile(r"^[IVX]+\s"),
        }
    }

    /// Grammars of one family in priority order.
    pub fn grammars(&self, family: FormatFamily) -> impl Iterator<Item = &LineGrammar> + '_ {
        self.grammars.iter().filter(move |g| g.family == family)
    }

    /// Match a line against every family in priority order.
    pub fn match_line(&self, line: &str) -> Option<LineMatch> {
        FormatFamily::ALL
            .iter()
            .find_map(|family| self.match_family(line, *family))
    }

    /// Match a line against the grammars of one family.
    ///
    /// Leading whitespace of `line` counts towards the nesting level.
    pub fn match_family(&self, line: &str, family: FormatFamily) -> Option<LineMatch> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.grammars(family)
            .find_map(|grammar| self.apply(grammar, line, trimmed))
    }

    fn apply(&self, grammar: &LineGrammar, line: &str, trimmed: &str) -> Option<LineMatch> {
        let caps = grammar.regex.captures(trimmed)?;
        let raw_title = caps.get(grammar.title_group)?.as_str();
        let raw_page_token = caps.get(grammar.page_group)?.as_str();
        let number = grammar
            .number_group
            .and_then(|group| caps.get(group))
            .map(|m| m.as_str());

        let page_number = resolve_page_token(raw_page_token)?;

        let title = self.normalize_title(raw_title);
        if title.is_empty() {
            return None;
        }

        // Outline numbers captured separately still count as part of the title.
        let full_title = match number {
            Some(number) => format!("{} {}", number, raw_title.trim()),
            None => raw_title.trim().to_string(),
        };

        let level = self.level_for(line, &full_title, &title);
        let confidence = self.entry_confidence(&title, &full_title, grammar.family);

        Some(LineMatch {
            title,
            raw_page_token: raw_page_token.to_string(),
            page_number,
            level,
            confidence,
            family: grammar.family,
            variant: grammar.variant,
        })
    }

    /// Normalize a raw title: NFC, collapsed whitespace, no leading outline
    /// number and no trailing dot run.
    pub fn normalize_title(&self, raw: &str) -> String {
        let nfc: String = raw.nfc().collect();
        let collapsed = self.whitespace.replace_all(nfc.trim(), " ");
        let without_number = self.leading_outline.replace(&collapsed, "");
        let without_dots = self.trailing_dots.replace(&without_number, "");
        without_dots.trim().to_string()
    }

    /// Nesting level from the outline number, indentation and Roman prefix.
    pub fn level_for(&self, line: &str, raw_title: &str, title: &str) -> usize {
        let indent_level = indentation_width(line) / INDENT_STEP;

        let outline_level = self
            .outline_prefix
            .captures(raw_title.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().split('.').filter(|p| !p.is_empty()).count())
            .map(|parts| parts.saturating_sub(1))
            .unwrap_or(0);

        let mut level = indent_level.max(outline_level);
        if self.roman_prefix.is_match(title) {
            level += 1;
        }
        level.min(MAX_LINE_LEVEL)
    }

    /// Confidence of a single entry.
    pub fn entry_confidence(&self, title: &str, raw_title: &str, family: FormatFamily) -> f32 {
        let mut confidence: f32 = 0.6;

        let length = title.chars().count();
        if (3..=120).contains(&length) {
            confidence += 0.1;
        }
        if length < 3 {
            confidence -= 0.2;
        }
        if length > 150 {
            confidence -= 0.1;
        }

        if self.embedded_outline.is_match(raw_title) {
            confidence += 0.2;
        }
        let lowered = title.to_lowercase();
        if STRUCTURAL_KEYWORDS.contains(&lowered.as_str()) {
            confidence += 0.1;
        }

        confidence += family.confidence_bonus();
        confidence.clamp(0.0, 1.0)
    }
}

impl Default for LinePatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a page token to a positive page number.
///
/// Plain integers parse directly, `i`..`v` map to 1..5, and tokens with a
/// hyphen use the numeric part after it (`A-12` is page 12).
pub fn resolve_page_token(token: &str) -> Option<u32> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }

    let page = if let Ok(number) = token.parse::<u32>() {
        Some(number)
    } else {
        match token.as_str() {
            "i" => Some(1),
            "ii" => Some(2),
            "iii" => Some(3),
            "iv" => Some(4),
            "v" => Some(5),
            _ => token
                .split_once('-')
                .and_then(|(_, suffix)| suffix.trim().parse::<u32>().ok()),
        }
    };

    page.filter(|p| *p > 0)
}

/// Leading whitespace width, with tabs counting as one indentation step.
fn indentation_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { INDENT_STEP } else { 1 })
        .sum()
}
