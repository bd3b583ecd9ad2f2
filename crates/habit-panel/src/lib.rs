//! Refresh pipeline for the habit e-paper panel
//!
//! One refresh reads the store, analyses the recent history, renders the
//! month page and splits it into the panel's black and red planes:
//!
//! ```text
//! HabitSource ──► mood + streak ──► render_month ──► split_black_red ──► PlaneSink
//! ```
//!
//! # Example
//!
//! ```
//! use habit_core::{CalendarDate, HabitKind, MemoryHabitStore};
//! use habit_panel::{refresh, PanelConfig};
//!
//! let today: CalendarDate = "2026-10-18".parse().unwrap();
//! let mut store = MemoryHabitStore::new();
//! store.set_habit(today, HabitKind::Read, true);
//!
//! let frame = refresh(&store, today, &PanelConfig::DEFAULT, None).unwrap();
//! assert_eq!(frame.today_completed, 1);
//! assert_eq!(frame.planes.dimensions(), (800, 480));
//! ```

mod config;
mod refresh;

pub use config::{PanelConfig, DISABLE_DISPLAY_ENV};
pub use refresh::{mood_window, present, present_if, refresh, RefreshFrame};

use std::convert::Infallible;
use std::path::PathBuf;

use eink_planes::{SinkError, SplitError};
use habit_core::{CalendarError, StoreError};
use habit_render::{AssetError, RenderError};
use thiserror::Error;

/// Refresh pipeline errors
#[derive(Debug, Error)]
pub enum PanelError {
    /// Habit store could not be read
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Date arithmetic left the calendar
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    /// Page could not be drawn
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Illustration cache could not be filled
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Page could not be split into planes
    #[error(transparent)]
    Split(#[from] SplitError),
    /// Planes could not be delivered
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// Config file unreadable
    #[error("config {}: {source}", .path.display())]
    ConfigIo {
        /// File that failed
        path: PathBuf,
        /// Cause
        source: std::io::Error,
    },
    /// Canvas size differs from the panel
    #[error("canvas is {}x{}, panel {panel} needs {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    CanvasMismatch {
        /// Panel name
        panel: &'static str,
        /// Panel resolution
        expected: (u32, u32),
        /// Configured canvas
        found: (u32, u32),
    },
    /// Config file is not a JSON object
    #[error("config {}: {source}", .path.display())]
    ConfigJson {
        /// File that failed
        path: PathBuf,
        /// Cause
        source: serde_json::Error,
    },
}

impl From<Infallible> for PanelError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
