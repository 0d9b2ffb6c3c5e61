//! Desktop configuration.
//!
//! Every size, margin and timing the desktop uses lives here. The defaults
//! reproduce the stock 1280x720 layout; a TOML file can override any subset:
//!
//! ```toml
//! [screen]
//! width = 1024
//! height = 768
//!
//! [icons]
//! double_click_ms = 500
//!
//! [settings]
//! theme = "Light"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xlos_core::TickRate;
use xlos_core::logging::targets;
use xlos_render::{Point, Size};
use xlos_style::RenderConfig;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range.
    #[error("invalid config value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Initial host surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl ScreenConfig {
    /// The surface size in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Window decoration geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Height of the title bar band at the top of every window.
    pub title_bar_height: f32,
    /// Side of the square resize grip in the bottom-right corner.
    pub resize_grip: f32,
    /// Size of each title bar button.
    pub button_size: Size,
    /// Horizontal distance between consecutive buttons.
    pub button_pitch: f32,
    /// Distance from the title bar top to the buttons.
    pub button_inset_top: f32,
    /// Distance from the right edge of the window to the close button.
    pub button_right_offset: f32,
    /// Smallest permitted window size.
    pub min_size: Size,
    /// Corner radius of frames and title bars.
    pub corner_radius: f32,
    /// How far the drop shadow extends past the frame.
    pub shadow_spread: f32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            title_bar_height: 32.0,
            resize_grip: 12.0,
            button_size: Size::new(22.0, 18.0),
            button_pitch: 26.0,
            button_inset_top: 6.0,
            button_right_offset: 28.0,
            min_size: Size::new(220.0, 140.0),
            corner_radius: 8.0,
            shadow_spread: 6.0,
        }
    }
}

/// Taskbar geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskbarConfig {
    pub height: f32,
    /// Left edge of the start button.
    pub start_button_x: f32,
    pub start_button_width: f32,
    /// Vertical inset of buttons from the taskbar top.
    pub inset: f32,
    pub task_button_width: f32,
    pub task_button_height: f32,
    /// Gap between consecutive task buttons.
    pub task_button_gap: f32,
    /// Gap between the start button and the first task button.
    pub start_gap: f32,
    /// Distance from the right edge to the clock text.
    pub clock_offset: f32,
}

impl Default for TaskbarConfig {
    fn default() -> Self {
        Self {
            height: 44.0,
            start_button_x: 8.0,
            start_button_width: 120.0,
            inset: 6.0,
            task_button_width: 160.0,
            task_button_height: 36.0,
            task_button_gap: 6.0,
            start_gap: 8.0,
            clock_offset: 110.0,
        }
    }
}

/// Window placement and movement limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowsConfig {
    /// Position of the first spawned window.
    pub cascade_origin: Point,
    /// Offset added per already-open window.
    pub cascade_step: Point,
    /// Size of newly spawned windows.
    pub default_size: Size,
    /// App opened at startup and after a restart.
    pub welcome_app: String,
    /// Size of the welcome window.
    pub welcome_size: Size,
    /// Gap kept around a maximized window.
    pub maximize_margin: f32,
    /// Horizontal extent that always stays on screen while dragging.
    pub keep_visible: f32,
    /// Gap kept between a resized window and the screen/taskbar edge.
    pub resize_margin: f32,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            cascade_origin: Point::new(180.0, 120.0),
            cascade_step: Point::new(16.0, 12.0),
            default_size: Size::new(520.0, 360.0),
            welcome_app: "Notes".to_owned(),
            welcome_size: Size::new(540.0, 420.0),
            maximize_margin: 8.0,
            keep_visible: 60.0,
            resize_margin: 10.0,
        }
    }
}

/// Desktop icon grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    pub size: f32,
    pub origin: Point,
    /// Space between neighbouring icons.
    pub padding: f32,
    pub columns: usize,
    /// Two clicks closer together than this open the icon's app.
    pub double_click_ms: u64,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            size: 64.0,
            origin: Point::new(24.0, 24.0),
            padding: 24.0,
            columns: 2,
            double_click_ms: 350,
        }
    }
}

impl IconsConfig {
    /// The double-click interval.
    pub fn double_click_interval(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }
}

/// Scripted session pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Ticks per second of the simulated event loop.
    pub tick_rate: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { tick_rate: 60 }
    }
}

/// Complete desktop configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub screen: ScreenConfig,
    pub chrome: ChromeConfig,
    pub taskbar: TaskbarConfig,
    pub windows: WindowsConfig,
    pub icons: IconsConfig,
    pub session: SessionConfig,
    /// Appearance at startup.
    pub settings: RenderConfig,
}

impl DesktopConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DesktopConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Check that the values describe a usable desktop.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(invalid(
                "screen",
                format!(
                    "surface must be non-empty, got {}x{}",
                    self.screen.width, self.screen.height
                ),
            ));
        }
        let min = self.chrome.min_size;
        if min.width <= 0.0 || min.height <= self.chrome.title_bar_height {
            return Err(invalid(
                "chrome.min_size",
                format!(
                    "minimum window must be positive and taller than the title bar, got {}x{}",
                    min.width, min.height
                ),
            ));
        }
        let usable = self.screen.size();
        if min.width > usable.width || min.height > usable.height - self.taskbar.height {
            return Err(invalid(
                "chrome.min_size",
                format!(
                    "minimum window {}x{} does not fit on a {}x{} screen",
                    min.width, min.height, self.screen.width, self.screen.height
                ),
            ));
        }
        if self.taskbar.height <= 0.0 || self.taskbar.height >= usable.height {
            return Err(invalid(
                "taskbar.height",
                format!("must be between 0 and the screen height, got {}", self.taskbar.height),
            ));
        }
        if self.icons.columns == 0 {
            return Err(invalid("icons.columns", "must be at least 1".to_owned()));
        }
        self.tick_rate()?;
        Ok(())
    }

    /// The session tick rate.
    pub fn tick_rate(&self) -> ConfigResult<TickRate> {
        TickRate::new(self.session.tick_rate).map_err(|err| ConfigError::Invalid {
            field: "session.tick_rate",
            message: err.to_string(),
        })
    }
}

fn invalid(field: &'static str, message: String) -> ConfigError {
    ConfigError::Invalid { field, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlos_style::ThemeName;

    #[test]
    fn test_defaults_are_valid() {
        let config = DesktopConfig::default();
        config.validate().unwrap();
        assert_eq!(config.screen.size(), Size::new(1280.0, 720.0));
        assert_eq!(config.chrome.min_size, Size::new(220.0, 140.0));
        assert_eq!(
            config.icons.double_click_interval(),
            Duration::from_millis(350)
        );
        assert_eq!(config.tick_rate().unwrap().per_second(), 60);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xlos.toml");
        std::fs::write(
            &path,
            r#"
            [screen]
            width = 1024
            height = 768

            [windows]
            default_size = { width = 300, height = 200 }

            [settings]
            theme = "Light"
            wallpaper_index = 3
            "#,
        )
        .unwrap();

        let config = DesktopConfig::load(&path).unwrap();
        assert_eq!(config.screen.width, 1024);
        assert_eq!(config.windows.default_size, Size::new(300.0, 200.0));
        assert_eq!(config.windows.welcome_app, "Notes");
        assert_eq!(config.settings.theme, ThemeName::Light);
        assert_eq!(config.settings.wallpaper_index, 3);
        assert_eq!(config.chrome, ChromeConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DesktopConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[screen]\nwidth = \"wide\"\n").unwrap();
        let err = DesktopConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = DesktopConfig::default();
        config.session.tick_rate = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "session.tick_rate", .. })
        ));

        let mut config = DesktopConfig::default();
        config.screen.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "screen", .. })
        ));

        let mut config = DesktopConfig::default();
        config.chrome.min_size = Size::new(2000.0, 140.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "chrome.min_size", .. })
        ));
    }
}
