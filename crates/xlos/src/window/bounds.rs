//! Limits that keep window frames usable on the current surface.

use xlos_render::{Point, Rect, Size};

use crate::config::DesktopConfig;

/// Where windows may go on the current surface.
///
/// Rebuilt by the desktop from its configuration whenever the surface size
/// changes. All clamping goes through `min` then `max`, so a lower bound
/// always wins when a surface is too small to honour both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowBounds {
    /// Current surface size.
    pub surface: Size,
    /// Height of the taskbar along the bottom edge.
    pub taskbar_height: f32,
    /// Horizontal extent of a window that always stays on screen.
    pub keep_visible: f32,
    /// Gap kept between a resized window and the right/bottom limits.
    pub resize_margin: f32,
    /// Gap kept around a maximized window.
    pub maximize_margin: f32,
    /// Smallest permitted frame size.
    pub min_size: Size,
    /// Height of the title bar.
    pub title_bar_height: f32,
}

impl WindowBounds {
    /// Bounds for `surface` using the limits in `config`.
    pub fn new(config: &DesktopConfig, surface: Size) -> Self {
        Self {
            surface,
            taskbar_height: config.taskbar.height,
            keep_visible: config.windows.keep_visible,
            resize_margin: config.windows.resize_margin,
            maximize_margin: config.windows.maximize_margin,
            min_size: config.chrome.min_size,
            title_bar_height: config.chrome.title_bar_height,
        }
    }

    /// Height above the taskbar.
    #[inline]
    pub fn usable_height(&self) -> f32 {
        self.surface.height - self.taskbar_height
    }

    /// Clamp a requested frame origin for a frame of `size`.
    ///
    /// At least `keep_visible` pixels stay on screen horizontally, and the
    /// title bar never leaves the area between the top edge and the taskbar.
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let x = origin
            .x
            .min(self.surface.width - self.keep_visible)
            .max(self.keep_visible - size.width);
        let y = origin
            .y
            .min(self.usable_height() - self.title_bar_height)
            .max(0.0);
        Point::new(x, y)
    }

    /// Frame size for a resize whose bottom-right corner follows `pointer`.
    pub fn clamp_size(&self, origin: Point, pointer: Point) -> Size {
        let width = (pointer.x - origin.x)
            .min(self.surface.width - origin.x - self.resize_margin)
            .max(self.min_size.width);
        let height = (pointer.y - origin.y)
            .min(self.usable_height() - origin.y - self.resize_margin)
            .max(self.min_size.height);
        Size::new(width, height)
    }

    /// The frame of a maximized window.
    pub fn maximized_frame(&self) -> Rect {
        let m = self.maximize_margin;
        Rect::new(
            m,
            m,
            (self.surface.width - m * 2.0).max(self.min_size.width),
            (self.usable_height() - m * 2.0).max(self.min_size.height),
        )
    }

    /// Bring an existing frame back within bounds, keeping it as close to
    /// unchanged as possible.
    pub fn clamp_frame(&self, frame: Rect) -> Rect {
        let size = Size::new(
            frame.width().max(self.min_size.width),
            frame.height().max(self.min_size.height),
        );
        let origin = self.clamp_origin(frame.origin, size);
        let size = self.clamp_size(origin, Point::new(origin.x + size.width, origin.y + size.height));
        Rect { origin, size }
    }
}
