//! The contract between windows and the content they host.
//!
//! An [`App`] knows nothing about window mechanics. Its window hands it input
//! events together with the rectangle it occupies, asks it to draw into that
//! rectangle, and ticks it once per frame through [`App::update`].

mod registry;

pub use registry::{AppFactory, AppRegistry, RegistryError};

use xlos_render::{Rect, Renderer};
use xlos_style::RenderConfig;

use crate::input::RawEvent;

/// A request an app makes of its host.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Replace the desktop's appearance settings.
    ApplySettings(RenderConfig),
}

/// Content hosted inside a window.
///
/// Events arrive in desktop coordinates; `content` is the app's area in the
/// same coordinate space.
pub trait App {
    /// Display name, used as the window title.
    fn name(&self) -> &str;

    /// React to an input event delivered to the hosting window.
    fn handle_event(&mut self, event: &RawEvent, content: Rect) -> Option<AppAction>;

    /// Advance time-driven state. Called once per frame, before [`draw`](App::draw).
    fn update(&mut self, _content: Rect) {}

    /// Draw the app's content. Drawing is clipped to `content`.
    fn draw(&mut self, renderer: &mut dyn Renderer, content: Rect, config: &RenderConfig);
}
