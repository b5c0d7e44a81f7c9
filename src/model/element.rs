//! Positioned text as delivered by the PDF extraction collaborator.

use serde::{Deserialize, Serialize};

/// Font weight, either numeric (CSS-style 100-900) or named.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    /// Numeric weight (400 = normal, 700 = bold)
    Numeric(f32),
    /// Named weight
    Named(NamedWeight),
}

/// Named font weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedWeight {
    /// Regular text
    #[default]
    Normal,
    /// Bold text
    Bold,
}

impl FontWeight {
    /// Whether this weight reads as bold.
    pub fn is_bold(&self) -> bool {
        match self {
            FontWeight::Numeric(w) => *w >= 600.0,
            FontWeight::Named(name) => *name == NamedWeight::Bold,
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::Named(NamedWeight::Normal)
    }
}

/// One line (or word cluster) of text with font and position metadata.
///
/// Coordinates use a top-left origin: `y` grows downwards, so smaller
/// values are closer to the top of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// The text content
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// X position (left edge)
    pub x: f32,
    /// Y position (distance from the top of the page)
    pub y: f32,
    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Font weight
    #[serde(default)]
    pub font_weight: FontWeight,
}

impl TextElement {
    /// Create a new text element with a default font.
    pub fn new(text: impl Into<String>, page: u32, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            page,
            x,
            y,
            font_name: String::from("Unknown"),
            font_size,
            font_weight: FontWeight::default(),
        }
    }

    /// Set the font name.
    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the font weight.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Check if the element appears to be set in a bold face.
    pub fn is_bold(&self) -> bool {
        let name = self.font_name.to_lowercase();
        self.font_weight.is_bold()
            || name.contains("bold")
            || name.contains("black")
            || name.contains("heavy")
    }
}

/// A single positioned glyph (or glyph run) before line grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// The glyph text
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (distance from the top of the page)
    pub y: f32,
    /// Advance width
    #[serde(default)]
    pub width: f32,
    /// Font name
    #[serde(default)]
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Numeric weight, if the extractor reports one
    #[serde(default)]
    pub weight: Option<f32>,
}
