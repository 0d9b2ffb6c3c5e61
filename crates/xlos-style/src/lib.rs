//! Appearance settings for XLOS.
//!
//! Two themes, a handful of solid wallpapers and the [`RenderConfig`] value
//! that carries the current choice into rendering.

mod config;
mod error;
pub mod theme;
pub mod wallpaper;

pub use config::RenderConfig;
pub use error::{StyleError, StyleResult};
pub use theme::{ColorPalette, ThemeName};
pub use wallpaper::{WALLPAPER_COUNT, WALLPAPERS, wallpaper};
