//! 2D drawing for the XLOS desktop.
//!
//! This crate provides the geometry and color types shared by the whole
//! desktop, the object-safe [`Renderer`] trait, and two implementations:
//!
//! - [`DisplayList`] records draw calls, for headless sessions and tests.
//! - [`SoftwareRenderer`] rasterizes on the CPU and can export PNG frames.
//!
//! ```
//! use xlos_render::{Color, DisplayList, Point, Rect, Renderer, Size, TextStyle};
//!
//! let mut list = DisplayList::new();
//! list.begin_frame(Color::BLACK, Size::new(320.0, 200.0));
//! list.fill_rect(Rect::new(10.0, 10.0, 50.0, 20.0), Color::WHITE);
//! list.draw_text("Hello", Point::new(12.0, 12.0), &TextStyle::default());
//! list.end_frame();
//!
//! assert!(list.contains_text("Hello"));
//! ```

pub mod display_list;
mod error;
pub mod paint;
mod renderer;
pub mod software;
pub mod text;
mod types;

pub use display_list::{DisplayItem, DisplayList, DrawCommand};
pub use error::{RenderError, RenderResult};
pub use paint::{BoxShadow, Stroke};
pub use renderer::{FrameStats, RenderState, RenderStateStack, Renderer};
pub use software::SoftwareRenderer;
pub use text::{FontFamily, TextStyle};
pub use types::{Color, CornerRadii, Point, Rect, RoundedRect, Size};
