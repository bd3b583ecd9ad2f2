//! Month calendar renderer for the habit e-paper summary
//!
//! Draws one RGB page per month using only the panel's three colours:
//! title and year-to-date totals, a streak/today widget, the quarter's
//! character, and a Sunday-first grid with one glyph per completed habit.
//!
//! # Example
//!
//! ```
//! use habit_core::{CalendarDate, MonthData, MoodLevel, StreakStats, YtdTotals};
//! use habit_render::{render_month, MonthSnapshot, RenderConfig};
//!
//! let days = MonthData::new(2026, 2).unwrap();
//! let snapshot = MonthSnapshot {
//!     year: 2026,
//!     month: 2,
//!     days: &days,
//!     totals: YtdTotals::default(),
//!     mood: MoodLevel::saturating_from(6),
//!     today: CalendarDate::new(2026, 2, 14).unwrap(),
//!     streak: StreakStats::default(),
//!     today_completed: 0,
//! };
//! let image = render_month(&snapshot, &RenderConfig::DEFAULT).unwrap();
//! assert_eq!(image.dimensions(), (800, 480));
//! ```

pub mod assets;
mod canvas;
pub mod character;
mod config;
mod fonts;
pub mod icons;
pub mod layout;
mod month;

pub use assets::{AssetError, IllustrationAssets, MaterializeReport};
pub use canvas::RgbCanvas;
pub use character::{Character, Illustration, CATALOG_VERSION};
pub use config::{Palette, RenderConfig};
pub use fonts::FontSet;
pub use layout::MonthLayout;
pub use month::{render_month, MonthSnapshot, Renderer};

use habit_core::CalendarError;
use thiserror::Error;

/// Rendering errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Year or month outside the calendar
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    /// Canvas cannot fit the page layout
    #[error("canvas {width}x{height} is too small for the month layout")]
    CanvasTooSmall {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
    },
    /// Canvas dimensions exceed the drawing coordinate range
    #[error("canvas {width}x{height} is too large")]
    CanvasTooLarge {
        /// Configured width
        width: u32,
        /// Configured height
        height: u32,
    },
    /// Month data belongs to a different month than requested
    #[error("month data is for {}-{:02}, page is {}-{:02}", .found.0, .found.1, .expected.0, .expected.1)]
    MonthMismatch {
        /// Page year and month
        expected: (i32, u8),
        /// Data year and month
        found: (i32, u8),
    },
}
