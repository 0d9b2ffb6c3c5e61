//! Theme names and color palettes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use xlos_render::Color;

use crate::error::StyleError;

/// The two built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }

    /// Display name, as shown in the Settings app.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dark => "Dark",
            ThemeName::Light => "Light",
        }
    }

    /// The palette for this theme.
    pub fn palette(self) -> ColorPalette {
        match self {
            ThemeName::Dark => ColorPalette::dark(),
            ThemeName::Light => ColorPalette::light(),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeName::Dark),
            "light" => Ok(ThemeName::Light),
            _ => Err(StyleError::UnknownTheme(s.to_owned())),
        }
    }
}

/// A color palette for theming.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    // Surfaces
    /// Window frames, taskbar buttons and dialogs.
    pub panel: Color,
    /// Title bars, content areas, the taskbar itself.
    pub alt: Color,

    // Text
    /// Primary text color.
    pub text: Color,
    /// Secondary/muted text color.
    pub text_muted: Color,

    // Accents
    /// Highlight for the focused window and selections.
    pub accent: Color,
    /// Destructive actions (power button).
    pub danger: Color,
    /// The triangular resize grip.
    pub grip: Color,

    /// Translucent wash drawn over the wallpaper.
    pub vignette: Color,
    /// Window drop shadow.
    pub shadow: Color,
}

impl ColorPalette {
    /// Create a dark theme palette.
    pub fn dark() -> Self {
        Self {
            panel: Color::from_rgb8(32, 35, 48),
            alt: Color::from_rgb8(40, 44, 60),

            text: Color::from_rgb8(235, 240, 245),
            text_muted: Color::from_rgb8(160, 160, 160),

            accent: Color::from_rgb8(10, 132, 255),
            danger: Color::from_rgb8(180, 40, 40),
            grip: Color::from_rgb8(120, 120, 120),

            vignette: Color::from_rgba8(0, 0, 0, 70),
            shadow: Color::from_rgba8(0, 0, 0, 100),
        }
    }

    /// Create a light theme palette.
    pub fn light() -> Self {
        Self {
            panel: Color::from_rgb8(230, 230, 235),
            alt: Color::from_rgb8(245, 245, 248),

            text: Color::from_rgb8(20, 20, 20),
            text_muted: Color::from_rgb8(108, 117, 125),

            accent: Color::from_rgb8(0, 122, 255),
            danger: Color::from_rgb8(180, 40, 40),
            grip: Color::from_rgb8(120, 120, 120),

            vignette: Color::from_rgba8(255, 255, 255, 40),
            shadow: Color::from_rgba8(0, 0, 0, 100),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::dark()
    }
}
