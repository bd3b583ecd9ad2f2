//! Persistence boundary.
//!
//! [`HabitSource`] is what the refresh pipeline reads from. The stored form
//! is sparse (only days that were ever touched); every read through the trait
//! returns the gap-filled view.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{CalendarDate, CalendarError};
use crate::record::{
    HabitFlags, HabitHistory, HabitKind, HabitParseError, HabitRecord, HistoryError, MonthData,
    YtdTotals,
};

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// History range could not be built.
    #[error(transparent)]
    History(#[from] HistoryError),
    /// Invalid calendar input.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    /// Invalid habit or override value.
    #[error(transparent)]
    Parse(#[from] HabitParseError),
    /// Snapshot could not be (de)serialised.
    #[error("history snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// Snapshot file could not be read or written.
    #[error("history file: {0}")]
    Io(#[from] io::Error),
}

/// Read side of habit persistence.
pub trait HabitSource {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Gap-filled history for `start..=end`.
    fn history(&self, start: CalendarDate, end: CalendarDate) -> Result<HabitHistory, Self::Error>;

    /// Flags for every day of `year`/`month`.
    fn month(&self, year: i32, month: u8) -> Result<MonthData, Self::Error>;

    /// Per-habit completion counts for `year`.
    fn ytd_totals(&self, year: i32) -> Result<YtdTotals, Self::Error>;

    /// Raw stored mood override, if any.
    fn mood_override(&self) -> Result<Option<String>, Self::Error>;
}

/// JSON form of a store.
///
/// ```json
/// { "days": [{ "day": "2026-10-18", "read": true, "journal": false, "workout": true }],
///   "mood_override": "6" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Stored days, oldest first
    #[serde(default)]
    pub days: Vec<HabitRecord>,
    /// Raw override value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_override: Option<String>,
}

/// In-memory habit store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHabitStore {
    days: BTreeMap<CalendarDate, HabitFlags>,
    mood_override: Option<String>,
}

impl MemoryHabitStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `records`; later duplicates win.
    pub fn from_records(records: impl IntoIterator<Item = HabitRecord>) -> Self {
        Self {
            days: records.into_iter().map(|r| (r.day, r.flags)).collect(),
            mood_override: None,
        }
    }

    /// Set one habit flag, creating the day if needed.
    pub fn set_habit(&mut self, day: CalendarDate, kind: HabitKind, value: bool) {
        self.days.entry(day).or_default().set(kind, value);
        tracing::debug!(%day, habit = %kind, value, "habit set");
    }

    /// Flip one habit flag, creating the day if needed. Returns the new value.
    pub fn toggle_habit(&mut self, day: CalendarDate, kind: HabitKind) -> bool {
        let flags = self.days.entry(day).or_default();
        let value = !flags.get(kind);
        flags.set(kind, value);
        tracing::debug!(%day, habit = %kind, value, "habit toggled");
        value
    }

    /// Flags stored for `day` (all-false when absent).
    pub fn flags(&self, day: CalendarDate) -> HabitFlags {
        self.days.get(&day).copied().unwrap_or_default()
    }

    /// Store a manual mood level.
    pub fn set_mood_override(&mut self, level: i64) -> Result<(), HabitParseError> {
        if !(0..=9).contains(&level) {
            return Err(HabitParseError::OverrideOutOfRange(level));
        }
        self.mood_override = Some(level.to_string());
        Ok(())
    }

    /// Remove the manual mood level.
    pub fn clear_mood_override(&mut self) {
        self.mood_override = None;
    }

    /// Number of stored days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sparse snapshot of the store.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            days: self
                .days
                .iter()
                .map(|(&day, &flags)| HabitRecord::new(day, flags))
                .collect(),
            mood_override: self.mood_override.clone(),
        }
    }

    /// Rebuild a store from a snapshot. The override is kept verbatim.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self::from_records(snapshot.days);
        store.mood_override = snapshot.mood_override;
        store
    }

    /// Parse a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Pretty JSON snapshot.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Load a snapshot file; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no history file, starting empty");
                Ok(Self::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write a snapshot file.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl HabitSource for MemoryHabitStore {
    type Error = StoreError;

    fn history(&self, start: CalendarDate, end: CalendarDate) -> Result<HabitHistory, StoreError> {
        let stored = self
            .days
            .range(start..=end)
            .map(|(&day, &flags)| HabitRecord::new(day, flags));
        Ok(HabitHistory::gap_filled(start, end, stored)?)
    }

    fn month(&self, year: i32, month: u8) -> Result<MonthData, StoreError> {
        let mut data = MonthData::new(year, month)?;
        for (day, flags) in &self.days {
            if day.year() == year && day.month() == month {
                data.insert(day.day(), *flags)?;
            }
        }
        Ok(data)
    }

    fn ytd_totals(&self, year: i32) -> Result<YtdTotals, StoreError> {
        let records: Vec<HabitRecord> = self
            .days
            .iter()
            .filter(|(day, _)| day.year() == year)
            .map(|(&day, &flags)| HabitRecord::new(day, flags))
            .collect();
        Ok(YtdTotals::for_year(year, &records))
    }

    fn mood_override(&self) -> Result<Option<String>, StoreError> {
        Ok(self.mood_override.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn toggle_creates_and_flips() {
        let mut store = MemoryHabitStore::new();
        let day = date(2026, 10, 18);
        assert!(store.toggle_habit(day, HabitKind::Read));
        assert!(store.flags(day).read);
        assert!(!store.toggle_habit(day, HabitKind::Read));
        assert_eq!(store.flags(day), HabitFlags::NONE);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn history_is_gap_filled() {
        let mut store = MemoryHabitStore::new();
        store.set_habit(date(2026, 10, 16), HabitKind::Workout, true);
        let history = store.history(date(2026, 10, 14), date(2026, 10, 18)).unwrap();
        assert_eq!(history.len(), 5);
        assert!(history.records()[2].flags.workout);
        assert_eq!(history.records()[4].flags, HabitFlags::NONE);
    }

    #[test]
    fn month_and_totals() {
        let mut store = MemoryHabitStore::new();
        store.set_habit(date(2026, 2, 3), HabitKind::Read, true);
        store.set_habit(date(2026, 3, 3), HabitKind::Read, true);
        store.set_habit(date(2025, 3, 3), HabitKind::Journal, true);

        let feb = store.month(2026, 2).unwrap();
        assert!(feb.flags(3).read);
        assert!(!feb.flags(4).read);

        assert_eq!(store.ytd_totals(2026).unwrap(), YtdTotals::new(2, 0, 0));
        assert_eq!(store.ytd_totals(2025).unwrap(), YtdTotals::new(0, 1, 0));
        assert!(store.month(2026, 13).is_err());
    }

    #[test]
    fn override_range_is_enforced() {
        let mut store = MemoryHabitStore::new();
        assert_eq!(
            store.set_mood_override(10),
            Err(HabitParseError::OverrideOutOfRange(10))
        );
        store.set_mood_override(4).unwrap();
        assert_eq!(store.mood_override().unwrap().as_deref(), Some("4"));
        store.clear_mood_override();
        assert_eq!(store.mood_override().unwrap(), None);
    }

    #[test]
    fn json_snapshot_survives_reload() {
        let mut store = MemoryHabitStore::new();
        store.set_habit(date(2026, 10, 1), HabitKind::Journal, true);
        store.set_mood_override(7).unwrap();

        let json = store.to_json().unwrap();
        let back = MemoryHabitStore::from_json(&json).unwrap();
        assert_eq!(back, store);
    }

    #[test]
    fn snapshot_accepts_raw_overrides() {
        let json = r#"{"days":[{"day":"2026-10-18","read":true}],"mood_override":"abc"}"#;
        let store = MemoryHabitStore::from_json(json).unwrap();
        assert_eq!(store.mood_override().unwrap().as_deref(), Some("abc"));
        assert!(store.flags(date(2026, 10, 18)).read);
    }

    #[test]
    fn bad_date_in_snapshot_is_rejected() {
        let json = r#"{"days":[{"day":"2026-02-30"}]}"#;
        assert!(matches!(MemoryHabitStore::from_json(json), Err(StoreError::Json(_))));
    }

    #[test]
    fn file_round_trip_and_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        assert!(MemoryHabitStore::load(&path).unwrap().is_empty());

        let mut store = MemoryHabitStore::new();
        store.set_habit(date(2026, 10, 18), HabitKind::Workout, true);
        store.save(&path).unwrap();
        assert_eq!(MemoryHabitStore::load(&path).unwrap(), store);
    }
}
