//! Geometry of the desktop's own surfaces.
//!
//! Everything here is derived from the configuration and the current surface
//! size, so hit-testing and drawing always agree on where things are.

use xlos_render::{Point, Rect, Size};

use crate::config::{DesktopConfig, IconsConfig, TaskbarConfig};

const MENU_WIDTH: f32 = 260.0;
const MENU_MIN_HEIGHT: f32 = 340.0;
const MENU_LEFT: f32 = 10.0;
/// Gap between the menu's bottom edge and the taskbar.
const MENU_GAP: f32 = 6.0;
const MENU_HEADER: f32 = 58.0;
const MENU_FOOTER: f32 = 72.0;
const MENU_ITEM_PITCH: f32 = 44.0;
const MENU_ITEM_HEIGHT: f32 = 36.0;
const MENU_PADDING: f32 = 12.0;
const POWER_BUTTON_HEIGHT: f32 = 44.0;
const POWER_BUTTON_BOTTOM: f32 = 64.0;

const DIALOG_SIZE: Size = Size::new(420.0, 180.0);
const DIALOG_BUTTON_SIZE: Size = Size::new(92.0, 40.0);
const DIALOG_BUTTON_LEFT: f32 = 24.0;
const DIALOG_BUTTON_TOP: f32 = 64.0;
const DIALOG_BUTTON_GAP: f32 = 12.0;

/// The choices offered by the power dialog, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAction {
    Shutdown,
    Restart,
    Sleep,
    Cancel,
}

impl PowerAction {
    pub const ALL: [PowerAction; 4] = [
        PowerAction::Shutdown,
        PowerAction::Restart,
        PowerAction::Sleep,
        PowerAction::Cancel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerAction::Shutdown => "Shutdown",
            PowerAction::Restart => "Restart",
            PowerAction::Sleep => "Sleep",
            PowerAction::Cancel => "Cancel",
        }
    }

    fn slot(self) -> f32 {
        match self {
            PowerAction::Shutdown => 0.0,
            PowerAction::Restart => 1.0,
            PowerAction::Sleep => 2.0,
            PowerAction::Cancel => 3.0,
        }
    }
}

/// Desktop geometry for one surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    taskbar: TaskbarConfig,
    icons: IconsConfig,
    cascade_origin: Point,
    cascade_step: Point,
    surface: Size,
}

impl Layout {
    pub fn new(config: &DesktopConfig, surface: Size) -> Self {
        Self {
            taskbar: config.taskbar,
            icons: config.icons,
            cascade_origin: config.windows.cascade_origin,
            cascade_step: config.windows.cascade_step,
            surface,
        }
    }

    // =========================================================================
    // Taskbar
    // =========================================================================

    /// The bar along the bottom edge.
    pub fn taskbar(&self) -> Rect {
        let height = self.taskbar.height;
        Rect::new(0.0, self.surface.height - height, self.surface.width, height)
    }

    pub fn start_button(&self) -> Rect {
        let taskbar = &self.taskbar;
        Rect::new(
            taskbar.start_button_x,
            self.taskbar().top() + taskbar.inset,
            taskbar.start_button_width,
            taskbar.height - taskbar.inset * 2.0,
        )
    }

    /// The button of the `slot`-th window, counting from the left.
    pub fn task_button(&self, slot: usize) -> Rect {
        let taskbar = &self.taskbar;
        let x = self.start_button().right()
            + taskbar.start_gap
            + slot as f32 * (taskbar.task_button_width + taskbar.task_button_gap);
        Rect::new(
            x,
            self.taskbar().top() + taskbar.inset,
            taskbar.task_button_width,
            taskbar.task_button_height,
        )
    }

    /// Where the clock text starts.
    pub fn clock_position(&self) -> Point {
        Point::new(
            self.surface.width - self.taskbar.clock_offset,
            self.taskbar().top() + 12.0,
        )
    }

    // =========================================================================
    // Start menu
    // =========================================================================

    /// The start menu panel when it lists `items` apps.
    ///
    /// The panel grows upwards so every item and the power button fit.
    pub fn start_menu(&self, items: usize) -> Rect {
        let height = (MENU_HEADER + items as f32 * MENU_ITEM_PITCH + MENU_FOOTER).max(MENU_MIN_HEIGHT);
        let bottom = self.taskbar().top() - MENU_GAP;
        Rect::new(MENU_LEFT, bottom - height, MENU_WIDTH, height)
    }

    pub fn start_menu_item(&self, menu: Rect, index: usize) -> Rect {
        Rect::new(
            menu.left() + MENU_PADDING,
            menu.top() + MENU_HEADER + index as f32 * MENU_ITEM_PITCH,
            menu.width() - MENU_PADDING * 2.0,
            MENU_ITEM_HEIGHT,
        )
    }

    pub fn power_button(&self, menu: Rect) -> Rect {
        Rect::new(
            menu.left() + MENU_PADDING,
            menu.bottom() - POWER_BUTTON_BOTTOM,
            menu.width() - MENU_PADDING * 2.0,
            POWER_BUTTON_HEIGHT,
        )
    }

    // =========================================================================
    // Power dialog
    // =========================================================================

    /// The power dialog, centered on the surface.
    pub fn power_dialog(&self) -> Rect {
        Rect::from_center(
            Point::new(
                (self.surface.width / 2.0).floor(),
                (self.surface.height / 2.0).floor(),
            ),
            DIALOG_SIZE,
        )
    }

    pub fn power_action(&self, action: PowerAction) -> Rect {
        let dialog = self.power_dialog();
        Rect::new(
            dialog.left()
                + DIALOG_BUTTON_LEFT
                + action.slot() * (DIALOG_BUTTON_SIZE.width + DIALOG_BUTTON_GAP),
            dialog.top() + DIALOG_BUTTON_TOP,
            DIALOG_BUTTON_SIZE.width,
            DIALOG_BUTTON_SIZE.height,
        )
    }

    pub fn power_action_at(&self, point: Point) -> Option<PowerAction> {
        PowerAction::ALL
            .into_iter()
            .find(|action| self.power_action(*action).contains(point))
    }

    // =========================================================================
    // Icons and windows
    // =========================================================================

    /// Initial position of the `index`-th desktop icon.
    pub fn icon_slot(&self, index: usize) -> Rect {
        let icons = &self.icons;
        let pitch = icons.size + icons.padding;
        let columns = icons.columns.max(1);
        Rect::new(
            icons.origin.x + (index % columns) as f32 * pitch,
            icons.origin.y + (index / columns) as f32 * pitch,
            icons.size,
            icons.size,
        )
    }

    /// Cascaded origin for a window spawned while `open` windows exist.
    pub fn cascade_origin(&self, open: usize) -> Point {
        Point::new(
            self.cascade_origin.x + open as f32 * self.cascade_step.x,
            self.cascade_origin.y + open as f32 * self.cascade_step.y,
        )
    }
}
