//! Render configuration passed into every draw call.

use serde::{Deserialize, Serialize};
use xlos_render::Color;

use crate::theme::{ColorPalette, ThemeName};
use crate::wallpaper::{WALLPAPER_COUNT, wallpaper};

/// The user-visible appearance settings.
///
/// This is a plain value: whoever owns the settings hands a copy to the
/// desktop each frame, and nothing below the desktop can change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Active theme.
    pub theme: ThemeName,
    /// Index into the wallpaper list. Wraps when out of range.
    pub wallpaper_index: usize,
}

impl RenderConfig {
    /// Create a configuration.
    pub fn new(theme: ThemeName, wallpaper_index: usize) -> Self {
        Self {
            theme,
            wallpaper_index: wallpaper_index % WALLPAPER_COUNT,
        }
    }

    /// The palette of the active theme.
    pub fn palette(&self) -> ColorPalette {
        self.theme.palette()
    }

    /// The active wallpaper color.
    pub fn wallpaper(&self) -> Color {
        wallpaper(self.wallpaper_index)
    }

    /// Same settings with the next wallpaper selected.
    pub fn next_wallpaper(self) -> Self {
        Self {
            wallpaper_index: (self.wallpaper_index + 1) % WALLPAPER_COUNT,
            ..self
        }
    }

    /// Same settings with the previous wallpaper selected.
    pub fn previous_wallpaper(self) -> Self {
        Self {
            wallpaper_index: (self.wallpaper_index % WALLPAPER_COUNT + WALLPAPER_COUNT - 1)
                % WALLPAPER_COUNT,
            ..self
        }
    }

    /// Same settings with the other theme.
    pub fn toggled_theme(self) -> Self {
        Self {
            theme: self.theme.toggled(),
            ..self
        }
    }
}
