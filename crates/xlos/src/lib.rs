//! XLOS - a simulated multi-window desktop.
//!
//! The crate is built around [`Desktop`], a window and desktop manager that
//! consumes [`RawEvent`]s and draws through any
//! [`Renderer`](xlos_render::Renderer). It owns overlapping windows with
//! title bars, drag, resize, minimize and maximize, plus desktop icons, a
//! taskbar, a start menu and a power dialog. Window content is supplied by
//! [`App`] implementations looked up by name in an [`AppRegistry`].
//!
//! - [`input`]: raw events from the host event loop
//! - [`window`]: a single window and its chrome
//! - [`desktop`]: stacking, focus, routing and overlays
//! - [`app`] and [`apps`]: the app contract and the bundled apps
//! - [`config`]: every size and timing, loadable from TOML
//! - [`session`]: a deterministic tick-by-tick driver for scripts
//!
//! # Example
//!
//! ```
//! use xlos::prelude::*;
//! use xlos_render::DisplayList;
//! use xlos_style::RenderConfig;
//!
//! let mut desktop = Desktop::new(DesktopConfig::default(), builtin_registry());
//! desktop.spawn_welcome_window();
//!
//! // Open the start menu.
//! desktop.handle_event(&RawEvent::pointer_down(20.0, 690.0));
//! assert!(desktop.is_start_menu_open());
//!
//! let mut frame = DisplayList::new();
//! desktop.draw(&mut frame, &RenderConfig::default(), chrono::NaiveTime::MIN);
//! assert!(frame.contains_text("XLOS Pro"));
//! ```

pub mod app;
pub mod apps;
pub mod config;
pub mod desktop;
pub mod input;
pub mod session;
pub mod window;

pub use app::{App, AppAction, AppRegistry, RegistryError};
pub use config::{ConfigError, DesktopConfig};
pub use desktop::{Desktop, DesktopRequest};
pub use input::{Key, KeyboardModifiers, MouseButton, RawEvent};
pub use session::{Session, SessionError, SessionScript};
pub use window::{Window, WindowId};

/// The types most programs need.
pub mod prelude {
    pub use crate::app::{App, AppAction, AppRegistry};
    pub use crate::apps::builtin_registry;
    pub use crate::config::DesktopConfig;
    pub use crate::desktop::{Desktop, DesktopRequest};
    pub use crate::input::{Key, KeyboardModifiers, MouseButton, RawEvent};
    pub use crate::window::WindowId;
}
