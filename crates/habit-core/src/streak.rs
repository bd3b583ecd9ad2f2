//! Runs of fully-complete days.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::record::HabitRecord;

/// Current and best streak lengths, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Run of complete days ending at the last evaluated day
    pub current: u32,
    /// Longest run inside the evaluated window
    pub best: u32,
}

/// Scan `history` (oldest first) for runs of days where every habit is done.
///
/// `current` is the running counter after the final entry, so it is 0 when
/// the final day is incomplete.
pub fn compute_streak_stats(history: &[HabitRecord]) -> StreakStats {
    history
        .iter()
        .fold(StreakStats::default(), |mut stats, record| {
            if record.flags.is_complete() {
                stats.current = stats.current.saturating_add(1);
                stats.best = stats.best.max(stats.current);
            } else {
                stats.current = 0;
            }
            stats
        })
}

/// Streak window for `today`: January 1st through `today` inclusive.
pub const fn streak_window(today: CalendarDate) -> (CalendarDate, CalendarDate) {
    (today.start_of_year(), today)
}
