//! A renderer that records draw calls instead of rasterizing them.
//!
//! [`DisplayList`] is what headless sessions and tests render into: every call
//! is kept, in order, together with the clip that was active when it was made.

use crate::paint::{BoxShadow, Stroke};
use crate::renderer::{FrameStats, RenderStateStack, Renderer};
use crate::text::TextStyle;
use crate::types::{Color, Point, Rect, RoundedRect, Size};

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
        size: Size,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundedRect {
        rect: RoundedRect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f32,
        stroke: Stroke,
    },
    Shadow {
        rect: Rect,
        shadow: BoxShadow,
    },
    Text {
        text: String,
        position: Point,
        style: TextStyle,
    },
}

/// A recorded draw call and the clip in effect when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub command: DrawCommand,
    pub clip: Option<Rect>,
}

/// An in-memory recording of one frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
    state: RenderStateStack,
    stats: FrameStats,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded items in submission order.
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Recorded commands without their clip.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.items.iter().map(|item| &item.command)
    }

    /// Number of recorded items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every text run drawn this frame, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any text run contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    /// Index of the first text run containing `needle`.
    pub fn position_of_text(&self, needle: &str) -> Option<usize> {
        self.items.iter().position(|item| {
            matches!(&item.command, DrawCommand::Text { text, .. } if text.contains(needle))
        })
    }

    /// The item with the text run containing `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&DisplayItem> {
        self.position_of_text(needle).map(|index| &self.items[index])
    }

    /// Rectangles filled with exactly `color`.
    pub fn filled_rects_with(&self, color: Color) -> Vec<Rect> {
        self.commands()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                DrawCommand::FillRoundedRect { rect, color: c } if *c == color => Some(rect.rect),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, command: DrawCommand) {
        if matches!(self.state.clip_bounds(), Some(clip) if clip.is_empty()) {
            self.stats.culled += 1;
            return;
        }
        self.stats.draw_calls += 1;
        self.items.push(DisplayItem {
            command,
            clip: self.state.clip_bounds(),
        });
    }
}

impl Renderer for DisplayList {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.items.clear();
        self.state.reset();
        self.stats = FrameStats::default();
        self.record(DrawCommand::Clear {
            color: clear_color,
            size: viewport_size,
        });
    }

    fn end_frame(&mut self) -> FrameStats {
        self.stats.clone()
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip_bounds()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.record(DrawCommand::FillRoundedRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.record(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.record(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.record(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.record(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        self.record(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn draw_box_shadow(&mut self, rect: Rect, shadow: &BoxShadow) {
        self.record(DrawCommand::Shadow {
            rect,
            shadow: *shadow,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.record(DrawCommand::Text {
            text: text.to_owned(),
            position,
            style: *style,
        });
    }
}
