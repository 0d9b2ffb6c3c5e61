//! Managed windows.
//!
//! A [`Window`] is one frame on the desktop hosting exactly one [`App`]. It
//! owns the frame geometry, the lifecycle state (normal, minimized,
//! maximized) and any drag or resize in progress. All geometry is clamped
//! through [`WindowBounds`]; no operation here can fail.

mod bounds;

pub use bounds::WindowBounds;

use std::fmt;

use xlos_core::logging::targets;
use xlos_render::{
    BoxShadow, Point, Rect, Renderer, RoundedRect, Size, TextStyle,
};
use xlos_style::RenderConfig;

use crate::app::{App, AppAction};
use crate::config::ChromeConfig;
use crate::input::{MouseButton, RawEvent};

/// Stable window identity, assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    /// Create an id from its raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Window lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Normal,
    Minimized,
    Maximized,
}

/// Pointer interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    /// Moving the window. `anchor` is the pointer offset from the frame origin.
    Dragging { anchor: Point },
    /// Resizing from the grip. `anchor` is the pointer offset from the frame origin.
    Resizing { anchor: Point },
}

/// Title bar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeButton {
    Close,
    MaximizeToggle,
    Minimize,
}

impl ChromeButton {
    /// Buttons in right-to-left order.
    pub const ALL: [ChromeButton; 3] = [
        ChromeButton::Close,
        ChromeButton::MaximizeToggle,
        ChromeButton::Minimize,
    ];

    fn slot(self) -> f32 {
        match self {
            ChromeButton::Close => 0.0,
            ChromeButton::MaximizeToggle => 1.0,
            ChromeButton::Minimize => 2.0,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            ChromeButton::Close => "x",
            ChromeButton::MaximizeToggle => "□",
            ChromeButton::Minimize => "–",
        }
    }
}

/// A frame on the desktop hosting one app.
pub struct Window {
    id: WindowId,
    title: String,
    frame: Rect,
    lifecycle: LifecycleState,
    /// Frame before maximizing. Kept while a maximized window is minimized so
    /// restoring it returns to the maximized state.
    pre_maximize_frame: Option<Rect>,
    interaction: Interaction,
    chrome: ChromeConfig,
    app: Box<dyn App>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("frame", &self.frame)
            .field("lifecycle", &self.lifecycle)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Wrap `app` in a new window. The frame is grown to the minimum size if needed.
    pub fn new(id: WindowId, app: Box<dyn App>, frame: Rect, chrome: ChromeConfig) -> Self {
        let frame = frame.with_size(Size::new(
            frame.width().max(chrome.min_size.width),
            frame.height().max(chrome.min_size.height),
        ));
        Self {
            id,
            title: app.name().to_owned(),
            frame,
            lifecycle: LifecycleState::Normal,
            pre_maximize_frame: None,
            interaction: Interaction::Idle,
            chrome,
            app,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Window id.
    #[inline]
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Title shown in the title bar and taskbar.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current frame in desktop coordinates.
    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Current lifecycle state.
    #[inline]
    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Whether the window is minimized.
    #[inline]
    pub fn is_minimized(&self) -> bool {
        self.lifecycle == LifecycleState::Minimized
    }

    /// Whether the window is maximized.
    #[inline]
    pub fn is_maximized(&self) -> bool {
        self.lifecycle == LifecycleState::Maximized
    }

    /// The frame to restore when leaving the maximized state.
    #[inline]
    pub fn pre_maximize_frame(&self) -> Option<Rect> {
        self.pre_maximize_frame
    }

    /// Pointer interaction in progress.
    #[inline]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Whether a drag or resize is in progress.
    #[inline]
    pub fn is_interacting(&self) -> bool {
        self.interaction != Interaction::Idle
    }

    /// The hosted app.
    pub fn app(&self) -> &dyn App {
        self.app.as_ref()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The title bar band at the top of the frame.
    pub fn title_bar_rect(&self) -> Rect {
        Rect::new(
            self.frame.left(),
            self.frame.top(),
            self.frame.width(),
            self.chrome.title_bar_height,
        )
    }

    /// The area handed to the app: the frame below the title bar.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.frame.left(),
            self.frame.top() + self.chrome.title_bar_height,
            self.frame.width(),
            self.frame.height() - self.chrome.title_bar_height,
        )
    }

    /// The square resize grip in the bottom-right corner.
    pub fn resize_grip_rect(&self) -> Rect {
        let grip = self.chrome.resize_grip;
        Rect::new(
            self.frame.right() - grip,
            self.frame.bottom() - grip,
            grip,
            grip,
        )
    }

    /// Rectangle of one title bar button.
    pub fn chrome_button_rect(&self, button: ChromeButton) -> Rect {
        let title = self.title_bar_rect();
        let size = self.chrome.button_size;
        let x = title.right() - self.chrome.button_right_offset - button.slot() * self.chrome.button_pitch;
        Rect::new(x, title.top() + self.chrome.button_inset_top, size.width, size.height)
    }

    /// Which title bar button, if any, is under `point`.
    pub fn hit_test_chrome_button(&self, point: Point) -> Option<ChromeButton> {
        if self.is_minimized() || !self.title_bar_rect().contains(point) {
            return None;
        }
        ChromeButton::ALL
            .into_iter()
            .find(|button| self.chrome_button_rect(*button).contains(point))
    }

    // =========================================================================
    // Drag and resize
    // =========================================================================

    /// Start dragging if `point` is on the title bar. Returns whether a drag began.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        if self.is_minimized() || !self.title_bar_rect().contains(point) {
            return false;
        }
        self.interaction = Interaction::Dragging {
            anchor: point.offset_from(self.frame.origin),
        };
        tracing::trace!(target: targets::WINDOW, id = %self.id, "drag started");
        true
    }

    /// Start resizing if `point` is on the grip. Returns whether a resize began.
    pub fn begin_resize(&mut self, point: Point) -> bool {
        if self.is_minimized() || !self.resize_grip_rect().contains(point) {
            return false;
        }
        self.interaction = Interaction::Resizing {
            anchor: point.offset_from(self.frame.origin),
        };
        tracing::trace!(target: targets::WINDOW, id = %self.id, "resize started");
        true
    }

    /// Move the frame so the drag anchor follows `point`.
    pub fn update_drag(&mut self, point: Point, bounds: &WindowBounds) {
        let Interaction::Dragging { anchor } = self.interaction else {
            return;
        };
        let requested = Point::new(point.x - anchor.x, point.y - anchor.y);
        self.frame.origin = bounds.clamp_origin(requested, self.frame.size);
    }

    /// Resize the frame so its bottom-right corner follows `point`.
    pub fn update_resize(&mut self, point: Point, bounds: &WindowBounds) {
        if !matches!(self.interaction, Interaction::Resizing { .. }) {
            return;
        }
        self.frame.size = bounds.clamp_size(self.frame.origin, point);
    }

    /// Finish any drag or resize.
    pub fn end_interaction(&mut self) {
        self.interaction = Interaction::Idle;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Maximize a normal window or restore a maximized one.
    ///
    /// Minimized windows are left alone.
    pub fn toggle_maximize(&mut self, bounds: &WindowBounds) {
        self.interaction = Interaction::Idle;
        match self.lifecycle {
            LifecycleState::Normal => {
                self.pre_maximize_frame = Some(self.frame);
                self.frame = bounds.maximized_frame();
                self.lifecycle = LifecycleState::Maximized;
                tracing::debug!(target: targets::WINDOW, id = %self.id, "maximized");
            }
            LifecycleState::Maximized => {
                if let Some(frame) = self.pre_maximize_frame.take() {
                    self.frame = frame;
                }
                self.lifecycle = LifecycleState::Normal;
                tracing::debug!(target: targets::WINDOW, id = %self.id, "restored");
            }
            LifecycleState::Minimized => {}
        }
    }

    /// Minimize or restore the window. Repeating the current state is a no-op.
    pub fn set_minimized(&mut self, minimized: bool) {
        if minimized == self.is_minimized() {
            return;
        }
        self.interaction = Interaction::Idle;
        self.lifecycle = if minimized {
            LifecycleState::Minimized
        } else if self.pre_maximize_frame.is_some() {
            LifecycleState::Maximized
        } else {
            LifecycleState::Normal
        };
        tracing::debug!(target: targets::WINDOW, id = %self.id, minimized, "minimize state changed");
    }

    /// Fit the frame to new bounds after the surface changed size. A
    /// maximized window also fits the frame it will restore to.
    pub fn reclamp(&mut self, bounds: &WindowBounds) {
        if let Some(pre) = self.pre_maximize_frame {
            self.pre_maximize_frame = Some(bounds.clamp_frame(pre));
            self.frame = bounds.maximized_frame();
        } else {
            self.frame = bounds.clamp_frame(self.frame);
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Deliver an event to this window.
    ///
    /// Title bar presses start a drag, grip presses start a resize, and
    /// pointer motion or release during either is consumed. Presses on the
    /// title bar buttons are left to the desktop. Everything else reaches
    /// the app, after the window's own bookkeeping for the event is done.
    pub fn dispatch(&mut self, event: &RawEvent, bounds: &WindowBounds) -> Option<AppAction> {
        if self.is_minimized() {
            return None;
        }
        match event {
            RawEvent::PointerDown {
                button: MouseButton::Left,
                position,
            } => {
                if self.hit_test_chrome_button(*position).is_some()
                    || self.begin_drag(*position)
                    || self.begin_resize(*position)
                {
                    return None;
                }
            }
            RawEvent::PointerMove { position } => match self.interaction {
                Interaction::Dragging { .. } => {
                    self.update_drag(*position, bounds);
                    return None;
                }
                Interaction::Resizing { .. } => {
                    self.update_resize(*position, bounds);
                    return None;
                }
                Interaction::Idle => {}
            },
            RawEvent::PointerUp {
                button: MouseButton::Left,
                ..
            } if self.is_interacting() => {
                self.end_interaction();
                return None;
            }
            _ => {}
        }
        tracing::trace!(target: targets::WINDOW, id = %self.id, ?event, "forwarded to app");
        self.app.handle_event(event, self.content_rect())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw the window and its app. Minimized windows draw nothing.
    pub fn render(&mut self, renderer: &mut dyn Renderer, config: &RenderConfig, focused: bool) {
        if self.is_minimized() {
            return;
        }
        let palette = config.palette();
        let radius = self.chrome.corner_radius;

        let shadow = BoxShadow::new(palette.shadow)
            .with_spread(self.chrome.shadow_spread)
            .with_blur(4.0)
            .with_corner_radius(radius + self.chrome.shadow_spread);
        renderer.draw_box_shadow(self.frame, &shadow);
        renderer.fill_rounded_rect(RoundedRect::new(self.frame, radius), palette.panel);

        let title_bar = self.title_bar_rect();
        renderer.fill_rounded_rect(RoundedRect::new(title_bar, radius), palette.alt);
        let title_color = if focused {
            palette.text
        } else {
            palette.text_muted
        };
        renderer.draw_text(
            &self.title,
            Point::new(title_bar.left() + 10.0, title_bar.top() + 6.0),
            &TextStyle::new(18.0, title_color),
        );
        for button in ChromeButton::ALL {
            let rect = self.chrome_button_rect(button);
            renderer.fill_rounded_rect(RoundedRect::new(rect, 4.0), palette.panel);
            renderer.draw_text_centered(button.glyph(), rect, &TextStyle::new(14.0, palette.text));
        }

        let content = self.content_rect();
        renderer.fill_rounded_rect(RoundedRect::new(content, radius), palette.alt);
        renderer.save();
        renderer.clip_rect(content);
        self.app.update(content);
        self.app.draw(renderer, content, config);
        renderer.restore();

        let (right, bottom) = (self.frame.right(), self.frame.bottom());
        let grip = self.chrome.resize_grip;
        renderer.fill_polygon(
            &[
                Point::new(right - grip + 2.0, bottom - 2.0),
                Point::new(right - 2.0, bottom - 2.0),
                Point::new(right - 2.0, bottom - grip + 2.0),
            ],
            palette.grip,
        );
    }
}

#[cfg(test)]
mod tests;
