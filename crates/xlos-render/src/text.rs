//! Text styling.
//!
//! Text is drawn as a single run anchored at its top-left corner. Layout beyond
//! explicit newlines is up to the caller.

use crate::types::Color;

/// Generic font families understood by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontFamily {
    /// Proportional sans-serif text.
    #[default]
    SansSerif,
    /// Fixed-width text.
    Monospace,
}

impl FontFamily {
    pub(crate) fn to_cosmic(self) -> cosmic_text::Family<'static> {
        match self {
            FontFamily::SansSerif => cosmic_text::Family::SansSerif,
            FontFamily::Monospace => cosmic_text::Family::Monospace,
        }
    }
}

/// How a run of text should look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Text color.
    pub color: Color,
    /// Font family.
    pub family: FontFamily,
}

impl TextStyle {
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT_FACTOR: f32 = 1.25;

    /// Create a sans-serif style.
    #[inline]
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            family: FontFamily::SansSerif,
        }
    }

    /// Create a monospace style.
    #[inline]
    pub fn monospace(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            family: FontFamily::Monospace,
        }
    }

    /// Return a copy with a different color.
    #[inline]
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    /// Height of one line of text.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.size * Self::LINE_HEIGHT_FACTOR
    }

    /// Rough advance of one character, used to lay out text without shaping.
    #[inline]
    pub fn approx_char_width(&self) -> f32 {
        match self.family {
            FontFamily::Monospace => self.size * 0.6,
            FontFamily::SansSerif => self.size * 0.55,
        }
    }

    /// Rough width of `text` on a single line.
    pub fn approx_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.approx_char_width()
    }

    /// How many characters fit into `width`, at least one.
    pub fn chars_fitting(&self, width: f32) -> usize {
        ((width / self.approx_char_width()).floor() as usize).max(1)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0, Color::BLACK)
    }
}
