//! Habit records, gap-free histories and month/year aggregates.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{days_in_month, CalendarDate, CalendarError};

/// Habit name parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HabitParseError {
    /// Name is not one of the tracked habits.
    #[error("invalid habit {0:?}; expected read, journal or workout")]
    UnknownHabit(String),
    /// Manual mood override outside 0..=9.
    #[error("mood override {0} is outside 0..=9")]
    OverrideOutOfRange(i64),
}

/// History construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// `start` is after `end`.
    #[error("history range {start}..={end} is inverted")]
    InvertedRange {
        /// Requested first day
        start: CalendarDate,
        /// Requested last day
        end: CalendarDate,
    },
    /// Records are not one-per-day consecutive.
    #[error("history has a gap: expected {expected}, found {found}")]
    Gap {
        /// Day that should have come next
        expected: CalendarDate,
        /// Day that was found instead
        found: CalendarDate,
    },
    /// Date arithmetic left the supported calendar range.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// The three tracked habits, in icon-slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    /// Habit A
    Read,
    /// Habit B
    Journal,
    /// Habit C
    Workout,
}

impl HabitKind {
    /// All habits in slot order.
    pub const ALL: [HabitKind; 3] = [HabitKind::Read, HabitKind::Journal, HabitKind::Workout];

    /// Lower-case storage key.
    pub const fn key(self) -> &'static str {
        match self {
            HabitKind::Read => "read",
            HabitKind::Journal => "journal",
            HabitKind::Workout => "workout",
        }
    }

    /// Capitalised label used on the totals line.
    pub const fn label(self) -> &'static str {
        match self {
            HabitKind::Read => "Read",
            HabitKind::Journal => "Journal",
            HabitKind::Workout => "Workout",
        }
    }

    /// Zero-based icon slot.
    pub const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for HabitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for HabitKind {
    type Err = HabitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HabitKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| HabitParseError::UnknownHabit(s.to_string()))
    }
}

/// Completion flags for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitFlags {
    /// Habit A done
    #[serde(default)]
    pub read: bool,
    /// Habit B done
    #[serde(default)]
    pub journal: bool,
    /// Habit C done
    #[serde(default)]
    pub workout: bool,
}

impl HabitFlags {
    /// Nothing done.
    pub const NONE: Self = Self {
        read: false,
        journal: false,
        workout: false,
    };

    /// Everything done.
    pub const ALL: Self = Self {
        read: true,
        journal: true,
        workout: true,
    };

    /// Build from positional flags (read, journal, workout).
    pub const fn new(read: bool, journal: bool, workout: bool) -> Self {
        Self {
            read,
            journal,
            workout,
        }
    }

    /// Flag for `kind`.
    pub const fn get(&self, kind: HabitKind) -> bool {
        match kind {
            HabitKind::Read => self.read,
            HabitKind::Journal => self.journal,
            HabitKind::Workout => self.workout,
        }
    }

    /// Set the flag for `kind`.
    pub fn set(&mut self, kind: HabitKind, value: bool) {
        match kind {
            HabitKind::Read => self.read = value,
            HabitKind::Journal => self.journal = value,
            HabitKind::Workout => self.workout = value,
        }
    }

    /// Number of habits done (0..=3).
    pub fn count(&self) -> u8 {
        HabitKind::ALL
            .into_iter()
            .map(|kind| u8::from(self.get(kind)))
            .fold(0, u8::saturating_add)
    }

    /// All three habits done.
    pub fn is_complete(&self) -> bool {
        self.read && self.journal && self.workout
    }
}

/// One calendar day and its completion flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitRecord {
    /// The day
    pub day: CalendarDate,
    /// What was done that day
    #[serde(flatten)]
    pub flags: HabitFlags,
}

impl HabitRecord {
    /// Record with the given flags.
    pub const fn new(day: CalendarDate, flags: HabitFlags) -> Self {
        Self { day, flags }
    }

    /// Record with nothing done.
    pub const fn empty(day: CalendarDate) -> Self {
        Self::new(day, HabitFlags::NONE)
    }
}

/// Consecutive, gap-free run of days, oldest first.
///
/// Every constructor enforces one record per calendar day with no holes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitHistory {
    records: Vec<HabitRecord>,
}

impl HabitHistory {
    /// Materialise every day in `start..=end`.
    ///
    /// Days present in `stored` keep their flags, absent days become all-false
    /// records. Stored records outside the range are ignored; when a day is
    /// stored twice the later entry wins.
    pub fn gap_filled(
        start: CalendarDate,
        end: CalendarDate,
        stored: impl IntoIterator<Item = HabitRecord>,
    ) -> Result<Self, HistoryError> {
        if start > end {
            return Err(HistoryError::InvertedRange { start, end });
        }
        let by_day: BTreeMap<CalendarDate, HabitFlags> = stored
            .into_iter()
            .filter(|r| r.day >= start && r.day <= end)
            .map(|r| (r.day, r.flags))
            .collect();

        let span = start.days_until(&end);
        let mut records = Vec::with_capacity(usize::try_from(span).unwrap_or(0).saturating_add(1));
        let mut day = start;
        loop {
            let flags = by_day.get(&day).copied().unwrap_or(HabitFlags::NONE);
            records.push(HabitRecord::new(day, flags));
            if day == end {
                break;
            }
            day = day.checked_add_days(1)?;
        }
        tracing::trace!(
            start = %start,
            end = %end,
            stored = by_day.len(),
            materialised = records.len().saturating_sub(by_day.len()),
            "gap-filled habit history"
        );
        Ok(Self { records })
    }

    /// Wrap records that are already consecutive.
    pub fn from_contiguous(records: Vec<HabitRecord>) -> Result<Self, HistoryError> {
        for pair in records.windows(2) {
            if let [prev, next] = pair {
                let expected = prev.day.checked_add_days(1)?;
                if next.day != expected {
                    return Err(HistoryError::Gap {
                        expected,
                        found: next.day,
                    });
                }
            }
        }
        Ok(Self { records })
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[HabitRecord] {
        &self.records
    }

    /// The most recent `n` records (all of them when shorter).
    pub fn last_days(&self, n: usize) -> &[HabitRecord] {
        let skip = self.records.len().saturating_sub(n);
        self.records.get(skip..).unwrap_or(&[])
    }

    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when no day is covered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First (oldest) day.
    pub fn first_day(&self) -> Option<CalendarDate> {
        self.records.first().map(|r| r.day)
    }

    /// Last (most recent) day.
    pub fn last_day(&self) -> Option<CalendarDate> {
        self.records.last().map(|r| r.day)
    }
}

/// One month's flags keyed by day-of-month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthData {
    year: i32,
    month: u8,
    days: BTreeMap<u8, HabitFlags>,
}

impl MonthData {
    /// Empty month (every day all-false).
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        days_in_month(year, month)?;
        Ok(Self {
            year,
            month,
            days: BTreeMap::new(),
        })
    }

    /// Collect the records that fall in `year`/`month`.
    pub fn from_records<'a>(
        year: i32,
        month: u8,
        records: impl IntoIterator<Item = &'a HabitRecord>,
    ) -> Result<Self, CalendarError> {
        let mut data = Self::new(year, month)?;
        for record in records {
            if record.day.year() == year && record.day.month() == month {
                data.days.insert(record.day.day(), record.flags);
            }
        }
        Ok(data)
    }

    /// Set the flags for `day`.
    pub fn insert(&mut self, day: u8, flags: HabitFlags) -> Result<(), CalendarError> {
        CalendarDate::new(self.year, self.month, day)?;
        self.days.insert(day, flags);
        Ok(())
    }

    /// Flags for `day`; unknown days are all-false.
    pub fn flags(&self, day: u8) -> HabitFlags {
        self.days.get(&day).copied().unwrap_or(HabitFlags::NONE)
    }

    /// Year of this month.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number (1..=12).
    pub const fn month(&self) -> u8 {
        self.month
    }
}

/// Per-habit completion counts for a year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YtdTotals {
    /// Days with reading done
    pub read: u32,
    /// Days with journaling done
    pub journal: u32,
    /// Days with a workout done
    pub workout: u32,
}

impl YtdTotals {
    /// Build from explicit counts.
    pub const fn new(read: u32, journal: u32, workout: u32) -> Self {
        Self {
            read,
            journal,
            workout,
        }
    }

    /// Count completions among records that fall in `year`.
    pub fn for_year<'a>(year: i32, records: impl IntoIterator<Item = &'a HabitRecord>) -> Self {
        records
            .into_iter()
            .filter(|r| r.day.year() == year)
            .fold(Self::default(), |mut acc, r| {
                acc.read = acc.read.saturating_add(u32::from(r.flags.read));
                acc.journal = acc.journal.saturating_add(u32::from(r.flags.journal));
                acc.workout = acc.workout.saturating_add(u32::from(r.flags.workout));
                acc
            })
    }

    /// Count for `kind`.
    pub const fn get(&self, kind: HabitKind) -> u32 {
        match kind {
            HabitKind::Read => self.read,
            HabitKind::Journal => self.journal,
            HabitKind::Workout => self.workout,
        }
    }
}
