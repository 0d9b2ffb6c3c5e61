//! Freehand drawing pad.

use xlos_render::{Color, Point, Rect, Renderer, RoundedRect, Stroke, TextStyle};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::input::RawEvent;

const LINE_WIDTH: f32 = 2.0;

/// Ink colors selectable with the R, G and B keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ink {
    Red,
    Green,
    #[default]
    Blue,
}

impl Ink {
    /// The ink selected by a typed character.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Ink::Red),
            'g' => Some(Ink::Green),
            'b' => Some(Ink::Blue),
            _ => None,
        }
    }

    /// The drawing color.
    pub fn color(self) -> Color {
        match self {
            Ink::Red => Color::from_rgb8(200, 60, 60),
            Ink::Green => Color::from_rgb8(60, 200, 100),
            Ink::Blue => Color::from_rgb8(60, 100, 200),
        }
    }
}

/// One straight piece of a stroke, relative to the content origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub ink: Ink,
}

/// Draws connected line segments while the left button is held.
///
/// Segments are stored relative to the content origin so the drawing moves
/// with its window.
#[derive(Debug, Default)]
pub struct Sketch {
    segments: Vec<Segment>,
    /// Last pointer position of the stroke in progress.
    pen: Option<Point>,
    ink: Ink,
}

impl Sketch {
    /// Create a blank pad.
    pub fn new() -> Self {
        Self::default()
    }

    /// All segments drawn so far.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Ink used for new segments.
    pub fn ink(&self) -> Ink {
        self.ink
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.pen.is_some()
    }
}

impl App for Sketch {
    fn name(&self) -> &str {
        "Sketch"
    }

    fn handle_event(&mut self, event: &RawEvent, content: Rect) -> Option<AppAction> {
        match event {
            RawEvent::PointerMove { position } => {
                if let Some(pen) = self.pen {
                    let to = position.offset_from(content.origin);
                    self.segments.push(Segment {
                        from: pen,
                        to,
                        ink: self.ink,
                    });
                    self.pen = Some(to);
                }
            }
            _ => {
                if let Some(position) = event.left_press() {
                    if content.contains(position) {
                        self.pen = Some(position.offset_from(content.origin));
                    }
                } else if event.left_release().is_some() {
                    self.pen = None;
                } else if let Some(ink) = event
                    .typed_text()
                    .and_then(|text| text.chars().next())
                    .and_then(Ink::from_char)
                {
                    self.ink = ink;
                }
            }
        }
        None
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, config: &RenderConfig) {
        let palette = config.palette();
        renderer.fill_rounded_rect(RoundedRect::new(content, 8.0), palette.panel);

        let origin = content.origin;
        for segment in &self.segments {
            renderer.draw_line(
                segment.from.translate(origin.x, origin.y),
                segment.to.translate(origin.x, origin.y),
                &Stroke::new(segment.ink.color(), LINE_WIDTH),
            );
        }

        renderer.draw_text(
            "Sketch: press R/G/B to change color",
            Point::new(content.left() + 10.0, content.bottom() - 22.0),
            &TextStyle::new(12.0, palette.text_muted),
        );
    }
}
