//! Error types for XLOS core systems.

use thiserror::Error;

/// Errors raised by the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A tick rate of zero (or otherwise unusable) was requested.
    #[error("invalid tick rate: {0} ticks per second")]
    InvalidTickRate(u32),
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
