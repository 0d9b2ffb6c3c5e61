//! Core systems for XLOS.
//!
//! This crate provides the pieces of the desktop that are independent of
//! geometry and rendering:
//!
//! - **Clocks**: [`Clock`] with a real [`SystemClock`] and a driver-controlled
//!   [`ManualClock`]
//! - **Frame pacing**: [`TickRate`] for the fixed-rate external event loop
//! - **Logging**: tracing targets and span names shared by every crate

pub mod clock;
pub mod error;
pub mod logging;

pub use clock::{Clock, ManualClock, SystemClock, TickRate};
pub use error::{CoreError, Result};
