//! A chat window with a bot that always says the same thing.

use xlos_render::{Color, Point, Rect, Renderer, Stroke, TextStyle};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::input::{Key, RawEvent};

/// The bot's only reply.
pub const BOT_REPLY: &str = "I'm just a robot, lol!";
const VISIBLE_MESSAGES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    You,
    Bot,
}

impl Sender {
    fn label(self) -> &'static str {
        match self {
            Sender::You => "You",
            Sender::Bot => "Bot",
        }
    }
}

#[derive(Debug, Default)]
pub struct Chat {
    messages: Vec<(Sender, String)>,
    input: String,
}

impl Chat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[(Sender, String)] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn send(&mut self) {
        let text = self.input.trim();
        if text.is_empty() {
            return;
        }
        self.messages.push((Sender::You, text.to_owned()));
        self.messages.push((Sender::Bot, BOT_REPLY.to_owned()));
        self.input.clear();
    }
}

impl App for Chat {
    fn name(&self) -> &str {
        "Chat"
    }

    fn handle_event(&mut self, event: &RawEvent, _content: Rect) -> Option<AppAction> {
        match event.pressed_key()? {
            Key::Backspace => {
                self.input.pop();
            }
            Key::Enter => self.send(),
            _ => {
                if let Some(text) = event.typed_text() {
                    self.input.push_str(text);
                }
            }
        }
        None
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, _config: &RenderConfig) {
        renderer.fill_rect(content, Color::from_rgb8(30, 30, 30));
        renderer.stroke_rect(content, &Stroke::new(Color::from_rgb8(60, 60, 60), 2.0));

        let style = TextStyle::new(13.0, Color::WHITE);
        let start = self.messages.len().saturating_sub(VISIBLE_MESSAGES);
        let mut y = content.top() + 10.0;
        for (sender, text) in &self.messages[start..] {
            renderer.draw_text(
                &format!("{}: {text}", sender.label()),
                Point::new(content.left() + 10.0, y),
                &style,
            );
            y += 20.0;
        }

        let input_box = Rect::new(
            content.left() + 10.0,
            content.bottom() - 35.0,
            content.width() - 20.0,
            25.0,
        );
        renderer.fill_rect(input_box, Color::from_rgb8(50, 50, 50));
        renderer.draw_text(
            &self.input,
            Point::new(input_box.left() + 2.0, input_box.top() + 2.0),
            &style,
        );
    }
}
