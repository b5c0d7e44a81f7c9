//! Turning raw glyphs and words into line-level text elements.
//!
//! These helpers sit on the extraction side: a PDF backend hands over
//! positioned glyphs (or only words, when glyph data is missing) and gets
//! back the [`TextElement`]s the heading detector consumes.

use std::collections::{BTreeMap, HashMap};

use crate::analysis::font_stats::size_key;
use crate::model::{FontWeight, Glyph, TextElement};

/// Font size assumed for words that do not report one.
pub const DEFAULT_WORD_FONT_SIZE: f32 = 12.0;

/// Share of a page's vertical text extent treated as header or footer.
pub const HEADER_FOOTER_BAND: f32 = 0.15;

/// Group the glyphs of one page into line elements.
///
/// Glyphs whose `y` agrees to 0.1 units form a line. Lines are returned
/// top to bottom; within a line glyphs are ordered by `x`. The line takes
/// the font of the majority of its glyphs.
pub fn group_glyphs_into_lines(page: u32, glyphs: &[Glyph]) -> Vec<TextElement> {
    let mut rows: BTreeMap<i64, Vec<&Glyph>> = BTreeMap::new();
    for glyph in glyphs {
        if glyph.text.trim().is_empty() && glyph.width <= 0.0 {
            continue;
        }
        rows.entry(row_key(glyph.y)).or_default().push(glyph);
    }

    let lines: Vec<TextElement> = rows
        .into_iter()
        .filter_map(|(key, mut row)| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            line_element(page, key as f32 / 10.0, &row)
        })
        .collect();

    log::debug!(
        "group_glyphs_into_lines: page {}: {} glyphs -> {} lines",
        page,
        glyphs.len(),
        lines.len()
    );
    lines
}

/// Build elements directly from words when glyph data is unavailable.
pub fn elements_from_words(page: u32, words: &[Glyph]) -> Vec<TextElement> {
    words
        .iter()
        .filter(|word| !word.text.trim().is_empty())
        .map(|word| {
            let font_size = if word.font_size.is_finite() && word.font_size > 0.0 {
                word.font_size
            } else {
                DEFAULT_WORD_FONT_SIZE
            };
            let element = TextElement::new(word.text.trim(), page, word.x, word.y, font_size);
            if word.font_name.is_empty() {
                element
            } else {
                element.with_font_name(word.font_name.clone())
            }
        })
        .collect()
}

/// Drop elements in the top and bottom bands of each page.
///
/// The bands cover [`HEADER_FOOTER_BAND`] of the vertical range spanned by
/// that page's elements, boundaries included.
pub fn filter_headers_footers(elements: Vec<TextElement>) -> Vec<TextElement> {
    let mut extents: HashMap<u32, (f32, f32)> = HashMap::new();
    for element in &elements {
        extents
            .entry(element.page)
            .and_modify(|(min, max)| {
                *min = min.min(element.y);
                *max = max.max(element.y);
            })
            .or_insert((element.y, element.y));
    }

    let before = elements.len();
    let kept: Vec<TextElement> = elements
        .into_iter()
        .filter(|element| match extents.get(&element.page) {
            Some(&(min, max)) => {
                let band = (max - min) * HEADER_FOOTER_BAND;
                let in_header = element.y <= min + band;
                let in_footer = element.y >= max - band;
                !(in_header || in_footer)
            }
            None => true,
        })
        .collect();

    log::debug!(
        "filter_headers_footers: removed {} of {} elements",
        before - kept.len(),
        before
    );
    kept
}

/// Split elements into runs of consecutive lines sharing a format.
///
/// Elements are put in reading order (page, then `y`, then `x`) first. A run
/// continues while the font size (at 0.1pt precision) and the font name stay
/// the same.
pub fn group_by_formatting(elements: &[TextElement]) -> Vec<Vec<TextElement>> {
    let mut ordered: Vec<&TextElement> = elements.iter().collect();
    ordered.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.y.total_cmp(&b.y))
            .then(a.x.total_cmp(&b.x))
    });

    let mut groups: Vec<Vec<TextElement>> = Vec::new();
    for element in ordered {
        match groups.last_mut() {
            Some(group) if same_format(&group[group.len() - 1], element) => {
                group.push(element.clone())
            }
            _ => groups.push(vec![element.clone()]),
        }
    }

    log::debug!(
        "group_by_formatting: {} elements -> {} groups",
        elements.len(),
        groups.len()
    );
    groups
}

fn same_format(a: &TextElement, b: &TextElement) -> bool {
    size_key(a.font_size) == size_key(b.font_size) && a.font_name == b.font_name
}

fn row_key(y: f32) -> i64 {
    (y * 10.0).round() as i64
}

fn line_element(page: u32, y: f32, row: &[&Glyph]) -> Option<TextElement> {
    let first = row.first()?;
    let text = join_glyphs(row);
    if text.trim().is_empty() {
        return None;
    }

    // Majority font by glyph count; ties go to the leftmost font.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for glyph in row {
        match counts.iter_mut().find(|(name, _)| *name == glyph.font_name) {
            Some((_, count)) => *count += 1,
            None => counts.push((glyph.font_name.as_str(), 1)),
        }
    }
    let mut primary = counts[0];
    for candidate in &counts[1..] {
        if candidate.1 > primary.1 {
            primary = *candidate;
        }
    }
    let primary_font = primary.0;

    let in_font: Vec<&&Glyph> = row.iter().filter(|g| g.font_name == primary_font).collect();
    let font_size = in_font
        .last()
        .map(|g| g.font_size)
        .unwrap_or(first.font_size);
    let weights: Vec<f32> = in_font.iter().filter_map(|g| g.weight).collect();

    let mut element = TextElement::new(text.trim(), page, first.x, y, font_size);
    if !primary_font.is_empty() {
        element = element.with_font_name(primary_font);
    }
    if !weights.is_empty() {
        let mean = weights.iter().sum::<f32>() / weights.len() as f32;
        element = element.with_weight(FontWeight::Numeric(mean));
    }
    Some(element)
}

/// Concatenate glyph text, inserting a space across visible gaps.
fn join_glyphs(row: &[&Glyph]) -> String {
    let mut text = String::new();
    for (i, glyph) in row.iter().enumerate() {
        if i > 0 {
            let prev = row[i - 1];
            if needs_space(prev, glyph) {
                text.push(' ');
            }
        }
        text.push_str(&glyph.text);
    }
    text
}

fn needs_space(prev: &Glyph, current: &Glyph) -> bool {
    if prev.width <= 0.0 {
        return false;
    }
    if prev.text.ends_with(char::is_whitespace) || current.text.starts_with(char::is_whitespace) {
        return false;
    }

    let gap = current.x - (prev.x + prev.width);
    let char_count = current.text.chars().count();
    let avg_char_width = if char_count > 0 && current.width > 0.0 {
        current.width / char_count as f32
    } else {
        current.font_size * 0.5
    };
    if gap <= avg_char_width * 0.2 {
        return false;
    }

    let prev_spaceless = prev.text.chars().last().map_or(false, is_spaceless_script_char);
    let curr_spaceless = current
        .text
        .chars()
        .next()
        .map_or(false, is_spaceless_script_char);
    !(prev_spaceless && curr_spaceless)
}

/// Characters of scripts written without word spaces (Han, kana).
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}
