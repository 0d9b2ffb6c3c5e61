//! Scripted sessions.
//!
//! A [`Session`] plays the part of the host event loop: once per tick it
//! advances its [`ManualClock`] by one tick period, feeds a batch of raw
//! events to the [`Desktop`], acts on whatever the desktop asks for, and
//! draws a frame. Because time only moves when the session says so, a
//! script replays identically every time.
//!
//! Scripts are TOML:
//!
//! ```toml
//! welcome = true
//! open = ["Calculator"]
//!
//! [[ticks]]
//! events = [
//!     { type = "PointerDown", position = { x = 20, y = 690 } },
//!     { type = "PointerUp", position = { x = 20, y = 690 } },
//! ]
//!
//! [[ticks]]
//! events = [{ type = "KeyDown", key = "Escape" }]
//! idle = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveTime, Timelike};
use serde::Deserialize;
use thiserror::Error;
use xlos_core::logging::{span_names, targets};
use xlos_core::{Clock, ManualClock, TickRate};
use xlos_render::{FrameStats, RenderError, Renderer, SoftwareRenderer};
use xlos_style::RenderConfig;

use crate::app::{AppRegistry, RegistryError};
use crate::config::{ConfigError, DesktopConfig};
use crate::desktop::{Desktop, DesktopRequest};
use crate::input::RawEvent;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Errors raised while loading or running a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The script file could not be read.
    #[error("failed to read session script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script is not valid TOML for this schema.
    #[error("invalid session script: {0}")]
    Script(#[from] toml::de::Error),

    /// The frame output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script opens an app that is not registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for sessions.
pub type SessionResult<T> = Result<T, SessionError>;

// ============================================================================
// Script
// ============================================================================

/// One entry of a script's `[[ticks]]` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TickScript {
    /// Events delivered, in order, during this tick.
    pub events: Vec<RawEvent>,
    /// Empty ticks that follow this one.
    pub idle: u32,
}

/// A parsed session script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionScript {
    /// Open the welcome window before the first tick.
    pub welcome: bool,
    /// Apps opened, in order, before the first tick.
    pub open: Vec<String>,
    /// Appearance at startup, overriding the configuration.
    pub settings: Option<RenderConfig>,
    pub ticks: Vec<TickScript>,
}

impl Default for SessionScript {
    fn default() -> Self {
        Self {
            welcome: true,
            open: Vec::new(),
            settings: None,
            ticks: Vec::new(),
        }
    }
}

impl SessionScript {
    /// Parse a script from TOML text.
    pub fn parse(text: &str) -> SessionResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::parse(&text)?;
        tracing::debug!(
            target: targets::SESSION,
            path = %path.display(),
            ticks = script.tick_count(),
            "script loaded"
        );
        Ok(script)
    }

    /// Total number of ticks the script spans, idle ticks included.
    pub fn tick_count(&self) -> u64 {
        self.ticks.iter().map(|t| 1 + u64::from(t.idle)).sum()
    }

    /// Event batches, one per tick.
    fn batches(&self) -> impl Iterator<Item = &[RawEvent]> {
        self.ticks.iter().flat_map(|tick| {
            std::iter::once(tick.events.as_slice())
                .chain(std::iter::repeat_n(<&[RawEvent]>::default(), tick.idle as usize))
        })
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Where and how often [`Session::run`] captures frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Directory receiving `frame_NNNN.png` files. Nothing is written
    /// when unset.
    pub out_dir: Option<PathBuf>,
    /// Capture every n-th tick. The last frame is always captured.
    pub every: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            out_dir: None,
            every: 1,
        }
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The script ran out of ticks.
    Finished,
    /// Shutdown was chosen in the power dialog.
    Shutdown,
    /// The script delivered `Quit`.
    Quit,
}

/// Summary of a completed [`Session::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub end: SessionEnd,
    /// Ticks executed.
    pub ticks: u64,
    /// Frames written, in order.
    pub frames: Vec<PathBuf>,
    /// Appearance in effect when the session stopped.
    pub settings: RenderConfig,
}

/// A desktop driven tick by tick on simulated time.
#[derive(Debug)]
pub struct Session {
    desktop: Desktop,
    clock: ManualClock,
    tick_rate: TickRate,
    settings: RenderConfig,
    start_time: NaiveTime,
    ticks: u64,
}

impl Session {
    /// Create a session over an empty desktop.
    pub fn new(config: DesktopConfig, registry: AppRegistry) -> SessionResult<Self> {
        config.validate()?;
        let tick_rate = config.tick_rate()?;
        let settings = config.settings;
        let clock = ManualClock::new();
        let desktop = Desktop::with_clock(config, registry, Box::new(clock.clone()));
        Ok(Self {
            desktop,
            clock,
            tick_rate,
            settings,
            start_time: NaiveTime::MIN,
            ticks: 0,
        })
    }

    /// Wall-clock time shown by the taskbar at tick zero.
    pub fn with_start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut Desktop {
        &mut self.desktop
    }

    /// Appearance used for the next frame.
    pub fn settings(&self) -> RenderConfig {
        self.settings
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.clock.now()
    }

    /// The taskbar clock reading for the current tick.
    pub fn wall_time(&self) -> NaiveTime {
        let start = u64::from(self.start_time.num_seconds_from_midnight());
        let seconds = (start + self.elapsed().as_secs()) % SECONDS_PER_DAY;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Advance the clock by one tick and route `events` in order.
    ///
    /// Returns how the session ended if an event stopped it; events after
    /// the stopping one are dropped.
    pub fn tick(&mut self, events: &[RawEvent]) -> Option<SessionEnd> {
        let _span = tracing::trace_span!(span_names::TICK, tick = self.ticks).entered();
        self.clock.advance(self.tick_rate.period());
        self.ticks += 1;

        for event in events {
            match self.desktop.handle_event(event) {
                None => {}
                Some(DesktopRequest::ApplySettings(settings)) => {
                    tracing::info!(target: targets::SESSION, ?settings, "settings applied");
                    self.settings = settings;
                }
                Some(DesktopRequest::Shutdown) => {
                    tracing::info!(target: targets::SESSION, tick = self.ticks, "shutdown requested");
                    return Some(SessionEnd::Shutdown);
                }
                Some(DesktopRequest::Quit) => {
                    tracing::info!(target: targets::SESSION, tick = self.ticks, "quit");
                    return Some(SessionEnd::Quit);
                }
            }
        }
        None
    }

    /// Draw the current state with the session's settings.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) -> FrameStats {
        let time = self.wall_time();
        self.desktop.draw(renderer, &self.settings, time)
    }

    /// Play `script` to the end, drawing a frame after every tick.
    pub fn run(
        &mut self,
        script: &SessionScript,
        capture: &CaptureOptions,
    ) -> SessionResult<SessionReport> {
        for name in &script.open {
            if !self.desktop.registry().contains(name) {
                return Err(RegistryError::UnknownApp(name.clone()).into());
            }
        }
        if let Some(settings) = script.settings {
            self.settings = settings;
        }
        if script.welcome {
            self.desktop.spawn_welcome_window();
        }
        for name in &script.open {
            self.desktop.spawn_window(name);
        }

        if let Some(dir) = &capture.out_dir {
            std::fs::create_dir_all(dir).map_err(|source| SessionError::OutputDir {
                path: dir.clone(),
                source,
            })?;
        }

        let surface = self.desktop.surface();
        let mut renderer = SoftwareRenderer::new(surface.width as u32, surface.height as u32)?;
        let every = u64::from(capture.every.max(1));
        let total = script.tick_count();
        let mut frames = Vec::new();
        let mut end = SessionEnd::Finished;

        tracing::info!(target: targets::SESSION, ticks = total, "session started");
        for events in script.batches() {
            if let Some(stop) = self.tick(events) {
                end = stop;
                break;
            }
            self.draw(&mut renderer);

            let last = self.ticks == total;
            if let Some(dir) = &capture.out_dir
                && (self.ticks % every == 0 || last)
            {
                let path = dir.join(format!("frame_{:04}.png", self.ticks));
                renderer.save_png(&path)?;
                frames.push(path);
            }
        }
        tracing::info!(
            target: targets::SESSION,
            ?end,
            ticks = self.ticks,
            frames = frames.len(),
            "session finished"
        );

        Ok(SessionReport {
            end,
            ticks: self.ticks,
            frames,
            settings: self.settings,
        })
    }
}
