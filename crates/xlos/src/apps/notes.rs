//! In-memory plain text editor.

use xlos_render::{Point, Rect, Renderer, RoundedRect, TextStyle};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::input::{Key, RawEvent};

const PADDING: f32 = 8.0;
const FONT_SIZE: f32 = 16.0;
const LINE_SPACING: f32 = 4.0;

/// A single-buffer text editor with a caret.
///
/// The caret is a byte offset that always sits on a character boundary.
#[derive(Debug, Default)]
pub struct Notes {
    text: String,
    cursor: usize,
}

impl Notes {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor holding `text`, with the caret at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Current buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret position as a byte offset into [`text`](Self::text).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn insert(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Line index and column (in characters) of the caret.
    fn caret_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let col = before
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count());
        (line, col)
    }
}

impl App for Notes {
    fn name(&self) -> &str {
        "Notes"
    }

    fn handle_event(&mut self, event: &RawEvent, _content: Rect) -> Option<AppAction> {
        match event.pressed_key() {
            Some(Key::Backspace) => self.backspace(),
            Some(Key::Enter) => self.insert("\n"),
            Some(Key::ArrowLeft) => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            Some(Key::ArrowRight) => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
            }
            Some(_) => {
                if let Some(text) = event.typed_text() {
                    self.insert(text);
                }
            }
            None => {}
        }
        None
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, config: &RenderConfig) {
        let palette = config.palette();
        renderer.fill_rounded_rect(RoundedRect::new(content, 8.0), palette.panel);

        let area = content.deflate(PADDING);
        let style = TextStyle::monospace(FONT_SIZE, palette.text);
        let line_height = style.line_height() + LINE_SPACING;

        let mut y = area.top();
        for line in self.text.split('\n') {
            renderer.draw_text(line, Point::new(area.left() + 4.0, y), &style);
            y += line_height;
            if y > area.bottom() {
                break;
            }
        }

        let (line, col) = self.caret_line_col();
        let caret = Rect::new(
            area.left() + 4.0 + col as f32 * style.approx_char_width(),
            area.top() + line as f32 * line_height,
            2.0,
            style.line_height(),
        );
        if area.contains(caret.origin) {
            renderer.fill_rect(caret, palette.accent);
        }

        renderer.draw_text(
            "Notes",
            Point::new(content.right() - 60.0, content.bottom() - 22.0),
            &TextStyle::new(12.0, palette.text_muted),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlos_render::{Color, DisplayList, Size};

    fn content() -> Rect {
        Rect::new(0.0, 32.0, 520.0, 328.0)
    }

    fn type_str(notes: &mut Notes, s: &str) {
        for c in s.chars() {
            notes.handle_event(&RawEvent::char(c), content());
        }
    }

    #[test]
    fn test_typing_and_editing() {
        let mut notes = Notes::new();
        type_str(&mut notes, "helo");
        notes.handle_event(&RawEvent::key(Key::ArrowLeft), content());
        type_str(&mut notes, "l");
        assert_eq!(notes.text(), "hello");
        assert_eq!(notes.cursor(), 4);

        notes.handle_event(&RawEvent::key(Key::ArrowRight), content());
        notes.handle_event(&RawEvent::key(Key::Enter), content());
        type_str(&mut notes, "world");
        assert_eq!(notes.text(), "hello\nworld");

        notes.handle_event(&RawEvent::key(Key::Backspace), content());
        assert_eq!(notes.text(), "hello\nworl");
    }

    #[test]
    fn test_caret_stays_in_bounds() {
        let mut notes = Notes::with_text("ab");
        for _ in 0..5 {
            notes.handle_event(&RawEvent::key(Key::ArrowRight), content());
        }
        assert_eq!(notes.cursor(), 2);
        for _ in 0..5 {
            notes.handle_event(&RawEvent::key(Key::ArrowLeft), content());
        }
        assert_eq!(notes.cursor(), 0);
        notes.handle_event(&RawEvent::key(Key::Backspace), content());
        assert_eq!(notes.cursor(), 0);
        assert_eq!(notes.text(), "ab");
    }

    #[test]
    fn test_multibyte_text() {
        let mut notes = Notes::new();
        type_str(&mut notes, "héllo");
        notes.handle_event(&RawEvent::key(Key::ArrowLeft), content());
        notes.handle_event(&RawEvent::key(Key::ArrowLeft), content());
        notes.handle_event(&RawEvent::key(Key::ArrowLeft), content());
        notes.handle_event(&RawEvent::key(Key::Backspace), content());
        assert_eq!(notes.text(), "hllo");
    }

    #[test]
    fn test_pointer_events_ignored() {
        let mut notes = Notes::with_text("x");
        assert_eq!(
            notes.handle_event(&RawEvent::pointer_down(10.0, 50.0), content()),
            None
        );
        assert_eq!(notes.text(), "x");
    }

    #[test]
    fn test_draw_lines() {
        let mut notes = Notes::with_text("first\nsecond");
        let mut list = DisplayList::new();
        list.begin_frame(Color::BLACK, Size::new(1280.0, 720.0));
        notes.draw(&mut list, content(), &RenderConfig::default());
        assert!(list.contains_text("first"));
        assert!(list.contains_text("second"));
    }
}
