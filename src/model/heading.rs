//! Detected headings and the signals that produced them.

use std::fmt;

use serde::{Serialize, Serializer};

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset (top-left origin)
    pub y: f32,
}

/// An individual heading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionMethod {
    /// Font size above the document's heading threshold
    FontSize,
    /// Text matches a heading pattern (numbering, keyword, caps)
    TextPattern,
    /// Short, unpunctuated, single-sentence text
    TextStructure,
    /// Near the top of the page
    Position,
}

impl DetectionMethod {
    /// All methods in reporting order.
    pub const ALL: [DetectionMethod; 4] = [
        DetectionMethod::FontSize,
        DetectionMethod::TextPattern,
        DetectionMethod::TextStructure,
        DetectionMethod::Position,
    ];

    /// Stable identifier used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::FontSize => "font_size",
            DetectionMethod::TextPattern => "text_pattern",
            DetectionMethod::TextStructure => "text_structure",
            DetectionMethod::Position => "position",
        }
    }

    fn bit(self) -> u8 {
        match self {
            DetectionMethod::FontSize => 1,
            DetectionMethod::TextPattern => 1 << 1,
            DetectionMethod::TextStructure => 1 << 2,
            DetectionMethod::Position => 1 << 3,
        }
    }
}

/// A set of detection methods.
///
/// Displays as the `|`-joined method names, or `unknown` when empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DetectionMethods {
    bits: u8,
}

impl DetectionMethods {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a method to the set.
    pub fn insert(&mut self, method: DetectionMethod) {
        self.bits |= method.bit();
    }

    /// Check whether a method is in the set.
    pub fn contains(&self, method: DetectionMethod) -> bool {
        self.bits & method.bit() != 0
    }

    /// Check whether no method fired.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of methods in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate over the methods in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = DetectionMethod> + '_ {
        DetectionMethod::ALL
            .into_iter()
            .filter(move |m| self.contains(*m))
    }
}

impl FromIterator<DetectionMethod> for DetectionMethods {
    fn from_iter<I: IntoIterator<Item = DetectionMethod>>(iter: I) -> Self {
        let mut set = Self::empty();
        for method in iter {
            set.insert(method);
        }
        set
    }
}

impl fmt::Display for DetectionMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("unknown");
        }
        let names: Vec<&str> = self.iter().map(|m| m.as_str()).collect();
        f.write_str(&names.join("|"))
    }
}

impl Serialize for DetectionMethods {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A text element believed to start a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    /// Trimmed heading text
    pub title: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Position of the source element
    pub position: Position,
    /// Font size of the source element
    pub font_size: f32,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Signals that fired for this heading
    pub detection_method: DetectionMethods,
}

/// A heading with its assigned nesting level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeveledHeading {
    /// The heading
    #[serde(flatten)]
    pub heading: Heading,
    /// Nesting level (0 = top level)
    pub level: usize,
}
