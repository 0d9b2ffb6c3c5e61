//! Stroke and shadow styles.

use crate::types::{Color, Rect};

/// Stroke style for outlines and lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given color and width.
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width: width.max(0.0),
        }
    }

    /// Half of the stroke width.
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }
}

/// A soft shadow cast by a (rounded) rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    /// Shadow color (with alpha for transparency).
    pub color: Color,
    /// Horizontal offset in pixels. Positive moves shadow right.
    pub offset_x: f32,
    /// Vertical offset in pixels. Positive moves shadow down.
    pub offset_y: f32,
    /// Blur radius in pixels. Larger values create softer shadows.
    pub blur_radius: f32,
    /// Spread radius in pixels. Expands the shadow shape before blurring.
    pub spread_radius: f32,
    /// Corner radius of the casting shape.
    pub corner_radius: f32,
}

impl BoxShadow {
    /// Create a new box shadow with the given color.
    ///
    /// Default values: no offset, no blur, no spread, sharp corners.
    #[inline]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            offset_x: 0.0,
            offset_y: 0.0,
            blur_radius: 0.0,
            spread_radius: 0.0,
            corner_radius: 0.0,
        }
    }

    /// Set the shadow offset.
    #[inline]
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the blur radius.
    #[inline]
    pub fn with_blur(mut self, radius: f32) -> Self {
        self.blur_radius = radius.max(0.0);
        self
    }

    /// Set the spread radius.
    #[inline]
    pub fn with_spread(mut self, radius: f32) -> Self {
        self.spread_radius = radius;
        self
    }

    /// Set the corner radius of the casting shape.
    #[inline]
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// The shape the shadow is drawn from, before blurring.
    #[inline]
    pub fn shape_rect(&self, rect: Rect) -> Rect {
        rect.offset(self.offset_x, self.offset_y)
            .inflate(self.spread_radius)
    }

    /// The bounds touched when drawing this shadow for `rect`.
    #[inline]
    pub fn expanded_bounds(&self, rect: Rect) -> Rect {
        self.shape_rect(rect).inflate(self.blur_radius)
    }
}
