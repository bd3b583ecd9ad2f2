//! Habit history and the analysis that feeds the e-paper summary.
//!
//! - [`calendar`]: validated dates, leap years, Sunday-first month grids
//! - [`record`]: per-day flags, gap-free histories, month and year aggregates
//! - [`mood`]: weighted 0..=9 mood level with manual override
//! - [`streak`]: current/best runs of fully-complete days
//! - [`source`]: the persistence boundary and an in-memory store
//!
//! # Example
//!
//! ```
//! use habit_core::{compute_mood_level, compute_streak_stats, streak_window};
//! use habit_core::{CalendarDate, HabitKind, HabitSource, MemoryHabitStore};
//!
//! let today: CalendarDate = "2026-10-18".parse().unwrap();
//! let mut store = MemoryHabitStore::new();
//! for kind in HabitKind::ALL {
//!     store.set_habit(today, kind, true);
//! }
//!
//! let (start, end) = streak_window(today);
//! let history = store.history(start, end).unwrap();
//! let streak = compute_streak_stats(history.records());
//! assert_eq!((streak.current, streak.best), (1, 1));
//!
//! let mood = compute_mood_level(history.last_days(14), None);
//! assert_eq!(mood.get(), 1);
//! ```

pub mod calendar;
pub mod mood;
pub mod record;
pub mod source;
pub mod streak;

pub use calendar::{CalendarDate, CalendarError, Weekday};
pub use mood::{compute_mood_level, MoodLevel, MOOD_WINDOW_DAYS};
pub use record::{
    HabitFlags, HabitHistory, HabitKind, HabitParseError, HabitRecord, HistoryError, MonthData,
    YtdTotals,
};
pub use source::{HabitSource, MemoryHabitStore, StoreError, StoreSnapshot};
pub use streak::{compute_streak_stats, streak_window, StreakStats};
