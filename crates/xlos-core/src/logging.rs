//! Logging facilities for XLOS.
//!
//! XLOS uses the `tracing` crate for instrumentation. Library crates only
//! emit events; installing a subscriber is left to the binary:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("xlos=debug"))
//!     .init();
//! ```
//!
//! Every event carries one of the targets below so logs can be filtered per
//! subsystem, e.g. `RUST_LOG=xlos::desktop=trace`.

/// Span names used throughout XLOS for tracing.
pub mod span_names {
    /// One tick of the session loop (event batch plus frame).
    pub const TICK: &str = "xlos::tick";
    /// Routing of a single raw event through the desktop.
    pub const ROUTE: &str = "xlos::route";
    /// Drawing of one frame.
    pub const FRAME: &str = "xlos::frame";
}

/// Target names for log filtering.
pub mod targets {
    /// Desktop-level routing, overlays and stacking.
    pub const DESKTOP: &str = "xlos::desktop";
    /// Per-window chrome, drag and resize.
    pub const WINDOW: &str = "xlos::window";
    /// Scripted session driver.
    pub const SESSION: &str = "xlos::session";
    /// Software rasterizer and frame capture.
    pub const RENDER: &str = "xlos::render";
    /// Configuration loading.
    pub const CONFIG: &str = "xlos::config";
}

/// The default filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "xlos=info";
