//! Core renderer trait defining the 2D drawing interface.
//!
//! The desktop draws everything through [`Renderer`]. The trait is object safe
//! so windows and applications can take a `&mut dyn Renderer` and stay unaware
//! of whether pixels are being rasterized or commands recorded.

use crate::paint::{BoxShadow, Stroke};
use crate::text::TextStyle;
use crate::types::{Color, Point, Rect, RoundedRect, Size};

/// Statistics from a frame render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of draw calls submitted.
    pub draw_calls: u32,
    /// Number of draw calls skipped because they fell outside the clip.
    pub culled: u32,
}

/// The core 2D rendering trait.
///
/// # Frame Lifecycle
///
/// A typical frame looks like:
///
/// ```ignore
/// renderer.begin_frame(clear_color, viewport_size);
///
/// renderer.save();
/// renderer.clip_rect(content);
/// renderer.fill_rect(rect, Color::RED);
/// renderer.restore();
///
/// let stats = renderer.end_frame();
/// ```
///
/// Coordinates are always in surface pixels; there is no transform stack.
pub trait Renderer {
    /// Begin a new frame, clearing the surface to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// Finish the frame and report statistics.
    fn end_frame(&mut self) -> FrameStats;

    // ========================================================================
    // State Management
    // ========================================================================

    /// Save the current clip state.
    fn save(&mut self);

    /// Restore the most recently saved clip state.
    fn restore(&mut self);

    /// Intersect the current clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Current clip bounds, if any clip is active.
    fn clip_bounds(&self) -> Option<Rect>;

    // ========================================================================
    // Shapes
    // ========================================================================

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    /// Stroke the outline of a rectangle. The stroke is centered on the edge.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw a straight line segment with round ends.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Fill a closed polygon using the even-odd rule.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke);

    /// Draw a soft shadow behind `rect`.
    fn draw_box_shadow(&mut self, rect: Rect, shadow: &BoxShadow);

    // ========================================================================
    // Text
    // ========================================================================

    /// Draw `text` with its top-left corner at `position`.
    ///
    /// Newlines start a new line; no other wrapping is performed.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    // ========================================================================
    // Convenience
    // ========================================================================

    /// Draw a polyline made of consecutive segments.
    fn draw_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], stroke);
        }
    }

    /// Draw `text` centered inside `rect` on a single line.
    fn draw_text_centered(&mut self, text: &str, rect: Rect, style: &TextStyle) {
        let width = style.approx_width(text);
        let position = Point::new(
            rect.center().x - width / 2.0,
            rect.center().y - style.line_height() / 2.0,
        );
        self.draw_text(text, position, style);
    }
}

/// Saved renderer state for save/restore operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    /// Clip rect at this state. `Some(Rect::ZERO)` clips everything.
    pub clip: Option<Rect>,
}

/// Common state management for renderers.
///
/// This struct provides a reusable implementation of save/restore and clip
/// intersection that renderer implementations can use.
#[derive(Debug, Clone, Default)]
pub struct RenderStateStack {
    /// Stack of saved states.
    stack: Vec<RenderState>,
    /// Current state.
    current: RenderState,
}

impl RenderStateStack {
    /// Create a new state stack with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state.
    #[inline]
    pub fn current(&self) -> &RenderState {
        &self.current
    }

    /// Save the current state.
    pub fn save(&mut self) {
        self.stack.push(self.current.clone());
    }

    /// Restore the previously saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.current = state;
        }
    }

    /// Reset to default state and clear the stack.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = RenderState::default();
    }

    /// Set a clip rect, intersecting with any existing clip.
    pub fn clip_rect(&mut self, rect: Rect) {
        self.current.clip = Some(match self.current.clip {
            Some(existing) => existing.intersect(&rect).unwrap_or(Rect::ZERO),
            None => rect,
        });
    }

    /// Get the current clip bounds.
    #[inline]
    pub fn clip_bounds(&self) -> Option<Rect> {
        self.current.clip
    }

    /// Get the stack depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_state_default() {
        let state = RenderState::default();
        assert!(state.clip.is_none());
    }

    #[test]
    fn test_render_state_stack() {
        let mut stack = RenderStateStack::new();

        stack.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        stack.save();
        stack.clip_rect(Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.clip_bounds(), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));

        stack.restore();
        assert_eq!(stack.clip_bounds(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

        // Unbalanced restore keeps the current state.
        stack.restore();
        assert_eq!(stack.depth(), 0);
        assert!(stack.clip_bounds().is_some());
    }

    #[test]
    fn test_clip_intersection() {
        let mut stack = RenderStateStack::new();

        stack.clip_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

        stack.clip_rect(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        stack.clip_rect(Rect::new(500.0, 500.0, 10.0, 10.0));
        assert_eq!(stack.clip_bounds(), Some(Rect::ZERO));
    }
}
