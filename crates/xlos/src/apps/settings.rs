//! Theme and wallpaper chooser.

use xlos_render::{Point, Rect, Renderer, RoundedRect, TextStyle};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::input::{Key, RawEvent};

/// Edits a draft of the appearance settings and applies it on Enter.
///
/// The draft starts from whatever configuration the window was first drawn
/// with. Applying does not change anything directly; it asks the desktop's
/// owner to adopt the draft through [`AppAction::ApplySettings`].
#[derive(Debug, Default)]
pub struct Settings {
    draft: Option<RenderConfig>,
}

impl Settings {
    /// Create a settings panel with no draft yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a settings panel editing `config`.
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            draft: Some(config),
        }
    }

    /// The pending configuration, if the panel has been shown or edited.
    pub fn draft(&self) -> Option<RenderConfig> {
        self.draft
    }

    fn draft_mut(&mut self) -> &mut RenderConfig {
        self.draft.get_or_insert_with(RenderConfig::default)
    }
}

impl App for Settings {
    fn name(&self) -> &str {
        "Settings"
    }

    fn handle_event(&mut self, event: &RawEvent, _content: Rect) -> Option<AppAction> {
        let key = event.pressed_key()?;
        let draft = self.draft_mut();
        match key {
            Key::Character('t') => *draft = draft.toggled_theme(),
            Key::ArrowLeft => *draft = draft.previous_wallpaper(),
            Key::ArrowRight => *draft = draft.next_wallpaper(),
            Key::Enter => return Some(AppAction::ApplySettings(*draft)),
            _ => {}
        }
        None
    }

    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, config: &RenderConfig) {
        let draft = *self.draft.get_or_insert(*config);
        let palette = config.palette();
        renderer.fill_rounded_rect(RoundedRect::new(content, 8.0), palette.panel);

        let p = content.deflate(12.0);
        let body = TextStyle::new(13.0, palette.text);
        renderer.draw_text(
            "Settings",
            Point::new(p.left() + 8.0, p.top() + 8.0),
            &TextStyle::new(20.0, palette.text),
        );
        renderer.draw_text(
            &format!("Theme (T): {}", draft.theme),
            Point::new(p.left() + 8.0, p.top() + 56.0),
            &body,
        );
        renderer.draw_text(
            &format!("Wallpaper ←/→ : {}", draft.wallpaper_index),
            Point::new(p.left() + 8.0, p.top() + 84.0),
            &body,
        );
        renderer.fill_rounded_rect(
            RoundedRect::new(Rect::new(p.left() + 180.0, p.top() + 82.0, 40.0, 18.0), 4.0),
            draft.wallpaper(),
        );
        renderer.draw_text(
            "Enter to apply",
            Point::new(p.left() + 8.0, p.bottom() - 28.0),
            &TextStyle::new(13.0, palette.text_muted),
        );
    }
}
