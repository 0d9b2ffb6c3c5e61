//! The window and desktop manager.
//!
//! [`Desktop`] owns every window in stacking order, the desktop icons, the
//! taskbar and the overlays (start menu, power dialog, sleep). It receives
//! raw events one at a time from the event loop and routes each through a
//! fixed priority chain:
//!
//! 1. Sleep: any press wakes the desktop and is swallowed.
//! 2. Power dialog: modal; only its buttons and `Escape` do anything.
//! 3. Global keys: `Escape` closes the start menu, `Alt+Tab` cycles windows.
//! 4. Left presses: start button, start menu, icons, taskbar buttons, then
//!    windows from the top down.
//! 5. Motion and releases: an icon drag, then the window holding the
//!    pointer grab, then the window under the pointer. A press the desktop
//!    consumed itself also consumes its motion and release.
//! 6. Keys: the focused window.
//!
//! Routing never fails. Requests the desktop cannot satisfy itself (applying
//! settings, shutting down) are handed back as a [`DesktopRequest`].
//!
//! # Example
//!
//! ```
//! use xlos::apps::builtin_registry;
//! use xlos::config::DesktopConfig;
//! use xlos::desktop::Desktop;
//! use xlos::input::RawEvent;
//!
//! let mut desktop = Desktop::new(DesktopConfig::default(), builtin_registry());
//! let notes = desktop.spawn_window("Notes");
//! let sketch = desktop.spawn_window("Sketch");
//! assert_eq!(desktop.z_order(), vec![notes, sketch]);
//!
//! // Clicking inside the Notes window brings it to the front.
//! desktop.handle_event(&RawEvent::pointer_down(185.0, 300.0));
//! assert_eq!(desktop.focused(), Some(notes));
//! ```

mod layout;
mod render;

pub use layout::{Layout, PowerAction};

use std::time::Duration;

use xlos_core::logging::{span_names, targets};
use xlos_core::{Clock, SystemClock};
use xlos_render::{Point, Rect, Size};
use xlos_style::RenderConfig;

use crate::app::{AppAction, AppRegistry};
use crate::config::DesktopConfig;
use crate::input::{Key, MouseButton, RawEvent};
use crate::window::{ChromeButton, Window, WindowBounds, WindowId};

/// Something the desktop needs its owner to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DesktopRequest {
    /// Adopt new appearance settings for subsequent frames.
    ApplySettings(RenderConfig),
    /// The user chose Shutdown in the power dialog.
    Shutdown,
    /// The event loop delivered `Quit`.
    Quit,
}

/// An app launcher on the desktop background.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopIcon {
    /// Registry name of the app it launches.
    pub name: String,
    pub rect: Rect,
    /// Time of the last single click, while it can still become a double click.
    last_click: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct IconDrag {
    index: usize,
    /// Pointer offset from the icon origin.
    offset: Point,
}

/// The desktop: windows, icons, taskbar and overlays.
pub struct Desktop {
    config: DesktopConfig,
    registry: AppRegistry,
    clock: Box<dyn Clock>,
    surface: Size,
    /// Stacking order, bottom first. The last non-minimized window has focus.
    windows: Vec<Window>,
    next_window_id: u64,
    icons: Vec<DesktopIcon>,
    icon_drag: Option<IconDrag>,
    /// Window that received the last left press; it gets motion and the
    /// release until the button comes up.
    pointer_grab: Option<WindowId>,
    /// The left button went down on something other than window content;
    /// motion and the release are swallowed until it comes up.
    press_claimed: bool,
    start_menu_open: bool,
    power_dialog_open: bool,
    sleeping: bool,
    /// The surface changed size since windows were last fitted to it.
    needs_reclamp: bool,
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("surface", &self.surface)
            .field("windows", &self.windows)
            .field("start_menu_open", &self.start_menu_open)
            .field("power_dialog_open", &self.power_dialog_open)
            .field("sleeping", &self.sleeping)
            .finish_non_exhaustive()
    }
}

impl Desktop {
    /// Create an empty desktop timed by the system clock.
    ///
    /// One icon is laid out per registered app. No window is open; call
    /// [`spawn_welcome_window`](Self::spawn_welcome_window) for the usual
    /// startup state.
    pub fn new(config: DesktopConfig, registry: AppRegistry) -> Self {
        Self::with_clock(config, registry, Box::new(SystemClock::new()))
    }

    /// Create an empty desktop timed by `clock`.
    pub fn with_clock(config: DesktopConfig, registry: AppRegistry, clock: Box<dyn Clock>) -> Self {
        let surface = config.screen.size();
        let icons = {
            let layout = Layout::new(&config, surface);
            registry
                .names()
                .enumerate()
                .map(|(index, name)| DesktopIcon {
                    name: name.to_owned(),
                    rect: layout.icon_slot(index),
                    last_click: None,
                })
                .collect()
        };
        Self {
            config,
            registry,
            clock,
            surface,
            windows: Vec::new(),
            next_window_id: 1,
            icons,
            icon_drag: None,
            pointer_grab: None,
            press_claimed: false,
            start_menu_open: false,
            power_dialog_open: false,
            sleeping: false,
            needs_reclamp: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Current surface size.
    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Geometry of the desktop surfaces at the current size.
    pub fn layout(&self) -> Layout {
        Layout::new(&self.config, self.surface)
    }

    fn bounds(&self) -> WindowBounds {
        WindowBounds::new(&self.config, self.surface)
    }

    /// Windows in stacking order, bottom first.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Window ids in stacking order, bottom first.
    pub fn z_order(&self) -> Vec<WindowId> {
        self.windows.iter().map(Window::id).collect()
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }

    /// The window that receives keyboard input: the top-most one that is
    /// not minimized.
    pub fn focused(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .rev()
            .find(|w| !w.is_minimized())
            .map(Window::id)
    }

    /// Windows in taskbar order (creation order).
    pub fn taskbar_windows(&self) -> Vec<&Window> {
        let mut windows: Vec<&Window> = self.windows.iter().collect();
        windows.sort_by_key(|w| w.id());
        windows
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn is_start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn is_power_dialog_open(&self) -> bool {
        self.power_dialog_open
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    // =========================================================================
    // Window management
    // =========================================================================

    /// Open a window for the app registered as `name` at the next cascade
    /// position with the default size. The new window is on top.
    ///
    /// # Panics
    ///
    /// Panics if no app is registered under `name`. The registry is fixed at
    /// startup, so an unknown name is a routing bug.
    pub fn spawn_window(&mut self, name: &str) -> WindowId {
        let size = self.config.windows.default_size;
        self.spawn_window_sized(name, size)
    }

    /// [`spawn_window`](Self::spawn_window) with an explicit size.
    ///
    /// # Panics
    ///
    /// Panics if no app is registered under `name`.
    pub fn spawn_window_sized(&mut self, name: &str, size: Size) -> WindowId {
        let app = match self.registry.create(name) {
            Ok(app) => app,
            Err(err) => panic!("cannot spawn window: {err}"),
        };
        let id = WindowId::from_raw(self.next_window_id);
        self.next_window_id += 1;

        let origin = self.layout().cascade_origin(self.windows.len());
        let frame = self.bounds().clamp_frame(Rect { origin, size });
        self.windows
            .push(Window::new(id, app, frame, self.config.chrome));
        tracing::debug!(target: targets::DESKTOP, %id, app = name, ?frame, "window spawned");
        id
    }

    /// Open the configured welcome window.
    pub fn spawn_welcome_window(&mut self) -> WindowId {
        let windows = &self.config.windows;
        let (name, size) = (windows.welcome_app.clone(), windows.welcome_size);
        self.spawn_window_sized(&name, size)
    }

    /// Close a window and drop its app. Returns whether it was open.
    pub fn close_window(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.windows.remove(index);
        if self.pointer_grab == Some(id) {
            self.pointer_grab = None;
        }
        tracing::debug!(target: targets::DESKTOP, %id, "window closed");
        true
    }

    /// Raise a window to the top. Returns whether it exists.
    pub fn focus(&mut self, id: WindowId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index + 1 != self.windows.len() {
            let window = self.windows.remove(index);
            self.windows.push(window);
            tracing::debug!(target: targets::DESKTOP, %id, "window focused");
        }
        true
    }

    /// Minimize or restore a window. Restoring also raises it.
    pub fn set_minimized(&mut self, id: WindowId, minimized: bool) -> bool {
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.set_minimized(minimized);
        if self.pointer_grab == Some(id) {
            self.pointer_grab = None;
        }
        if !minimized {
            self.focus(id);
        }
        true
    }

    /// Maximize or restore a window and raise it.
    pub fn toggle_maximize(&mut self, id: WindowId) -> bool {
        let bounds = self.bounds();
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.toggle_maximize(&bounds);
        self.focus(id);
        true
    }

    /// Move the bottom window to the top.
    pub fn cycle_windows(&mut self) {
        if self.windows.len() > 1 {
            let window = self.windows.remove(0);
            tracing::debug!(target: targets::DESKTOP, id = %window.id(), "cycled to front");
            self.windows.push(window);
        }
    }

    /// Top-most visible window whose frame contains `point`.
    pub fn window_at(&self, point: Point) -> Option<WindowId> {
        self.windows
            .iter()
            .rev()
            .find(|w| !w.is_minimized() && w.frame().contains(point))
            .map(Window::id)
    }

    fn reclamp_windows(&mut self) {
        let bounds = self.bounds();
        for window in &mut self.windows {
            window.reclamp(&bounds);
        }
        self.needs_reclamp = false;
        tracing::debug!(target: targets::DESKTOP, surface = ?self.surface, "windows fitted to surface");
    }

    // =========================================================================
    // Event routing
    // =========================================================================

    /// Route one raw event.
    pub fn handle_event(&mut self, event: &RawEvent) -> Option<DesktopRequest> {
        let _span = tracing::trace_span!(span_names::ROUTE).entered();
        match event {
            RawEvent::Quit => return Some(DesktopRequest::Quit),
            RawEvent::SurfaceResize { width, height } => {
                self.surface = Size::new(*width as f32, *height as f32);
                self.needs_reclamp = true;
                tracing::debug!(target: targets::DESKTOP, width, height, "surface resized");
                return None;
            }
            _ => {}
        }
        if self.needs_reclamp {
            self.reclamp_windows();
        }

        if event.left_press().is_some() {
            self.pointer_grab = None;
            self.press_claimed = true;
        } else if self.press_claimed
            && self.icon_drag.is_none()
            && matches!(event, RawEvent::PointerMove { .. } | RawEvent::PointerUp { .. })
        {
            if event.left_release().is_some() {
                self.press_claimed = false;
            }
            return None;
        }

        if self.sleeping {
            if matches!(event, RawEvent::PointerDown { .. } | RawEvent::KeyDown { .. }) {
                self.sleeping = false;
                tracing::debug!(target: targets::DESKTOP, "woke from sleep");
            }
            return None;
        }
        if self.power_dialog_open {
            return self.handle_power_dialog(event);
        }

        match event {
            RawEvent::PointerDown {
                button: MouseButton::Left,
                position,
            } => self.handle_left_press(*position, event),
            RawEvent::PointerDown { position, .. } => {
                let id = self.window_at(*position)?;
                self.dispatch_to(id, event)
            }
            RawEvent::PointerMove { .. } | RawEvent::PointerUp { .. } => self.handle_pointer(event),
            RawEvent::KeyDown { key, modifiers, .. } => {
                if *key == Key::Escape && self.start_menu_open {
                    self.start_menu_open = false;
                    tracing::debug!(target: targets::DESKTOP, "start menu closed");
                    return None;
                }
                if *key == Key::Tab && modifiers.alt {
                    self.cycle_windows();
                    return None;
                }
                let id = self.focused()?;
                self.dispatch_to(id, event)
            }
            RawEvent::KeyUp { .. } => {
                let id = self.focused()?;
                self.dispatch_to(id, event)
            }
            RawEvent::Quit | RawEvent::SurfaceResize { .. } => None,
        }
    }

    fn handle_power_dialog(&mut self, event: &RawEvent) -> Option<DesktopRequest> {
        let action = match event {
            RawEvent::KeyDown {
                key: Key::Escape, ..
            } => PowerAction::Cancel,
            _ => {
                let point = event.left_press()?;
                self.layout().power_action_at(point)?
            }
        };
        self.power_dialog_open = false;
        tracing::debug!(target: targets::DESKTOP, ?action, "power action");
        match action {
            PowerAction::Shutdown => return Some(DesktopRequest::Shutdown),
            PowerAction::Restart => self.restart(),
            PowerAction::Sleep => {
                for window in &mut self.windows {
                    window.set_minimized(true);
                }
                self.pointer_grab = None;
                self.sleeping = true;
            }
            PowerAction::Cancel => {}
        }
        None
    }

    /// Drop every window and reopen the welcome window.
    fn restart(&mut self) {
        self.windows.clear();
        self.pointer_grab = None;
        self.icon_drag = None;
        for icon in &mut self.icons {
            icon.last_click = None;
        }
        self.start_menu_open = false;
        self.spawn_welcome_window();
    }

    fn handle_left_press(&mut self, point: Point, event: &RawEvent) -> Option<DesktopRequest> {
        let layout = self.layout();
        let start_button = layout.start_button();
        let taskbar = layout.taskbar();

        if start_button.contains(point) {
            self.start_menu_open = !self.start_menu_open;
            tracing::debug!(target: targets::DESKTOP, open = self.start_menu_open, "start menu toggled");
            return None;
        }

        if self.start_menu_open {
            let menu = layout.start_menu(self.registry.len());
            let item = self
                .registry
                .names()
                .enumerate()
                .find(|(index, _)| layout.start_menu_item(menu, *index).contains(point))
                .map(|(_, name)| name.to_owned());
            let on_power = layout.power_button(menu).contains(point);
            if let Some(name) = item {
                self.start_menu_open = false;
                self.spawn_window(&name);
            } else if on_power {
                self.start_menu_open = false;
                self.power_dialog_open = true;
                tracing::debug!(target: targets::DESKTOP, "power dialog opened");
            } else if !menu.contains(point) {
                self.start_menu_open = false;
            }
            return None;
        }

        if !taskbar.contains(point)
            && self.window_at(point).is_none()
            && let Some(index) = self.icons.iter().rposition(|icon| icon.rect.contains(point))
        {
            self.click_icon(index, point);
            return None;
        }

        if taskbar.contains(point) {
            let target = self
                .taskbar_windows()
                .iter()
                .enumerate()
                .find(|(slot, _)| layout.task_button(*slot).contains(point))
                .map(|(_, w)| w.id());
            if let Some(id) = target {
                self.click_task_button(id);
            }
            return None;
        }

        let id = self.window_at(point)?;
        let chrome = self.window(id)?.hit_test_chrome_button(point);
        match chrome {
            Some(ChromeButton::Close) => {
                self.close_window(id);
                None
            }
            Some(ChromeButton::Minimize) => {
                self.set_minimized(id, true);
                None
            }
            Some(ChromeButton::MaximizeToggle) => {
                self.toggle_maximize(id);
                None
            }
            None => {
                self.focus(id);
                self.press_claimed = false;
                self.pointer_grab = Some(id);
                self.dispatch_to(id, event)
            }
        }
    }

    fn click_icon(&mut self, index: usize, point: Point) {
        let now = self.clock.now();
        let interval = self.config.icons.double_click_interval();
        match self.icons[index].last_click {
            Some(at) if now.saturating_sub(at) < interval => {
                self.icons[index].last_click = None;
                let name = self.icons[index].name.clone();
                tracing::debug!(target: targets::DESKTOP, icon = %name, "icon opened");
                self.spawn_window(&name);
            }
            _ => {
                self.icons[index].last_click = Some(now);
                self.icon_drag = Some(IconDrag {
                    index,
                    offset: point.offset_from(self.icons[index].rect.origin),
                });
            }
        }
    }

    fn click_task_button(&mut self, id: WindowId) {
        let Some(window) = self.window(id) else {
            return;
        };
        if window.is_minimized() {
            self.set_minimized(id, false);
        } else if self.focused() == Some(id) {
            self.set_minimized(id, true);
        } else {
            self.focus(id);
        }
    }

    fn handle_pointer(&mut self, event: &RawEvent) -> Option<DesktopRequest> {
        if let Some(drag) = self.icon_drag {
            match event {
                RawEvent::PointerMove { position } => self.move_icon(drag, *position),
                RawEvent::PointerUp {
                    button: MouseButton::Left,
                    ..
                } => {
                    self.icon_drag = None;
                    self.press_claimed = false;
                }
                _ => {}
            }
            return None;
        }

        if let Some(id) = self.pointer_grab {
            if event.left_release().is_some() {
                self.pointer_grab = None;
            }
            return self.dispatch_to(id, event);
        }

        let id = self.window_at(event.position()?)?;
        self.dispatch_to(id, event)
    }

    fn move_icon(&mut self, drag: IconDrag, pointer: Point) {
        let usable = Size::new(
            self.surface.width,
            self.surface.height - self.config.taskbar.height,
        );
        let Some(icon) = self.icons.get_mut(drag.index) else {
            return;
        };
        let x = (pointer.x - drag.offset.x)
            .min(usable.width - icon.rect.width())
            .max(0.0);
        let y = (pointer.y - drag.offset.y)
            .min(usable.height - icon.rect.height())
            .max(0.0);
        icon.rect.origin = Point::new(x, y);
    }

    fn dispatch_to(&mut self, id: WindowId, event: &RawEvent) -> Option<DesktopRequest> {
        let bounds = self.bounds();
        let action = self.window_mut(id)?.dispatch(event, &bounds)?;
        match action {
            AppAction::ApplySettings(config) => {
                tracing::debug!(target: targets::DESKTOP, %id, ?config, "settings requested");
                Some(DesktopRequest::ApplySettings(config))
            }
        }
    }
}
