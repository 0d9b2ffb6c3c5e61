//! Monotonic clocks and frame pacing.
//!
//! The desktop never reads the system time directly. Anything time-dependent
//! (double-click detection, frame ticks) goes through a [`Clock`], so the same
//! code runs against the real monotonic clock or against a [`ManualClock`]
//! that a scripted session or a test advances explicitly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::{CoreError, Result};

/// A source of monotonic time.
///
/// The returned value is the time elapsed since an arbitrary, fixed epoch
/// chosen by the clock. Only differences between two readings are meaningful.
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;
}

/// A clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is the moment of creation.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Cloning a `ManualClock` yields a handle to the same underlying time, so a
/// driver can keep one handle and give another to the desktop.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use xlos_core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// clock.advance(Duration::from_millis(16));
/// assert_eq!(handle.now(), Duration::from_millis(16));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&self, to: Duration) {
        let mut now = self.now.lock();
        if to > *now {
            *now = to;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// A fixed tick rate for the external event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRate {
    per_second: u32,
}

impl TickRate {
    /// Create a tick rate. Zero ticks per second is rejected.
    pub fn new(per_second: u32) -> Result<Self> {
        if per_second == 0 {
            return Err(CoreError::InvalidTickRate(per_second));
        }
        Ok(Self { per_second })
    }

    /// Ticks per second.
    #[inline]
    pub fn per_second(&self) -> u32 {
        self.per_second
    }

    /// Duration of a single tick.
    #[inline]
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.per_second
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self { per_second: 60 }
    }
}
