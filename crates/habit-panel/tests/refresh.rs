//! End-to-end refresh tests over an in-memory store

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::io;

use eink_planes::{InkColor, NullSink, PngPlaneSink};
use habit_core::{
    CalendarDate, HabitHistory, HabitKind, HabitSource, MemoryHabitStore, MonthData, MoodLevel,
    StoreError, YtdTotals,
};
use habit_panel::{present, present_if, refresh, PanelConfig, PanelError};
use habit_render::{Character, RenderConfig};

fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

/// Every habit done on `days` consecutive days ending at `last`.
fn complete_run(store: &mut MemoryHabitStore, last: CalendarDate, days: i64) {
    for back in 0..days {
        let day = last.checked_add_days(-back).unwrap();
        for kind in HabitKind::ALL {
            store.set_habit(day, kind, true);
        }
    }
}

#[test]
fn test_frame_reflects_history() {
    let today = date("2026-10-18");
    let mut store = MemoryHabitStore::new();
    complete_run(&mut store, today, 9);
    // an older, longer run earlier in the year
    complete_run(&mut store, date("2026-03-20"), 12);

    let frame = refresh(&store, today, &PanelConfig::DEFAULT, None).unwrap();
    assert_eq!(frame.streak.current, 9);
    assert_eq!(frame.streak.best, 12);
    // days 5..=13 empty (weights 1..5), days 10..=18 complete (weights 6..14)
    assert_eq!(frame.mood.get(), 8);
    assert_eq!(frame.today_completed, 3);
    assert_eq!(frame.character, Character::Robot);
    assert_eq!(frame.image.dimensions(), (800, 480));
}

#[test]
fn test_streak_ignores_previous_year() {
    let today = date("2026-01-03");
    let mut store = MemoryHabitStore::new();
    complete_run(&mut store, today, 10);

    let frame = refresh(&store, today, &PanelConfig::DEFAULT, None).unwrap();
    assert_eq!(frame.streak.current, 3);
    assert_eq!(frame.streak.best, 3);
}

#[test]
fn test_override_wins_over_history() {
    let today = date("2026-10-18");
    let mut store = MemoryHabitStore::new();
    store.set_mood_override(9).unwrap();

    let frame = refresh(&store, today, &PanelConfig::DEFAULT, None).unwrap();
    assert_eq!(frame.mood, MoodLevel::MAX);
    assert_eq!(frame.today_completed, 0);
}

#[test]
fn test_malformed_override_is_level_zero() {
    let mut store = MemoryHabitStore::from_json(r#"{ "days": [], "mood_override": "happy" }"#).unwrap();
    complete_run(&mut store, date("2026-10-18"), 14);

    let frame = refresh(&store, date("2026-10-18"), &PanelConfig::DEFAULT, None).unwrap();
    assert_eq!(frame.mood, MoodLevel::MIN);
}

#[test]
fn test_planes_carry_both_inks() {
    let today = date("2026-02-11");
    let mut store = MemoryHabitStore::new();
    store.set_habit(today, HabitKind::Journal, true);

    let frame = refresh(&store, today, &PanelConfig::DEFAULT, None).unwrap();
    assert!(frame.planes.black.ink_count() > 0);
    assert!(frame.planes.red.ink_count() > 0);

    let (width, height) = frame.planes.dimensions();
    for y in (0..height).step_by(7) {
        for x in (0..width).step_by(5) {
            let expected = match frame.image.get_pixel(x, y).0 {
                [0, 0, 0] => InkColor::Black,
                [200, 0, 0] => InkColor::Red,
                _ => InkColor::White,
            };
            assert_eq!(frame.planes.ink_at(x, y), Some(expected));
        }
    }
}

#[test]
fn test_assets_from_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = PanelConfig {
        asset_dir: Some(dir.path().join("assets")),
        ..PanelConfig::DEFAULT
    };
    let assets = config.illustration_assets().unwrap().unwrap();
    assert!(assets.load(Character::Robot).is_some());

    let today = date("2026-10-18");
    let store = MemoryHabitStore::new();
    let with = refresh(&store, today, &config, Some(&assets)).unwrap();
    let without = refresh(&store, today, &config, None).unwrap();
    assert_ne!(with.image, without.image);

    // Q1 has no picture; the asset cache changes nothing
    let q1 = date("2026-02-11");
    let with = refresh(&store, q1, &config, Some(&assets)).unwrap();
    let without = refresh(&store, q1, &config, None).unwrap();
    assert_eq!(with.image, without.image);
}

#[test]
fn test_present_to_png_sink() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = MemoryHabitStore::new();
    let config = PanelConfig::DEFAULT;
    let frame = refresh(&store, date("2026-10-18"), &config, None).unwrap();

    let mut sink = PngPlaneSink::new(dir.path()).for_panel(config.panel());
    // independent of HABIT_PAPER_DISABLE_DISPLAY in the test environment
    let active = config.display_active_with(None);
    assert!(present_if(&frame, &mut sink, active).unwrap());
    assert_eq!(sink.frames(), 1);
    assert!(dir.path().join(PngPlaneSink::BLACK_FILE).exists());
    assert!(dir.path().join(PngPlaneSink::RED_FILE).exists());
}

#[test]
fn test_disabled_display_skips_sink() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = MemoryHabitStore::new();
    let config = PanelConfig {
        display_enabled: false,
        ..PanelConfig::DEFAULT
    };
    let frame = refresh(&store, date("2026-10-18"), &config, None).unwrap();

    let mut sink = PngPlaneSink::new(dir.path().join("out"));
    assert!(!present(&frame, &mut sink, &config).unwrap());
    assert_eq!(sink.frames(), 0);
    assert!(!dir.path().join("out").exists());

    assert!(!present(&frame, &mut NullSink, &config).unwrap());
    assert!(!present_if(&frame, &mut sink, false).unwrap());
    assert_eq!(sink.frames(), 0);
}

#[test]
fn test_canvas_that_does_not_fit_the_panel_is_rejected() {
    let config = PanelConfig {
        render: RenderConfig {
            width: 640,
            height: 384,
            ..RenderConfig::DEFAULT
        },
        ..PanelConfig::DEFAULT
    };
    let err = refresh(&MemoryHabitStore::new(), date("2026-10-18"), &config, None).unwrap_err();
    assert!(matches!(
        err,
        PanelError::CanvasMismatch { expected: (800, 480), found: (640, 384), .. }
    ));
}

struct OfflineStore;

impl HabitSource for OfflineStore {
    type Error = StoreError;

    fn history(&self, _: CalendarDate, _: CalendarDate) -> Result<HabitHistory, StoreError> {
        Err(io::Error::other("offline").into())
    }

    fn month(&self, year: i32, month: u8) -> Result<MonthData, StoreError> {
        Ok(MonthData::new(year, month)?)
    }

    fn ytd_totals(&self, _: i32) -> Result<YtdTotals, StoreError> {
        Ok(YtdTotals::default())
    }

    fn mood_override(&self) -> Result<Option<String>, StoreError> {
        Ok(None)
    }
}

#[test]
fn test_store_errors_propagate() {
    let err = refresh(&OfflineStore, date("2026-10-18"), &PanelConfig::DEFAULT, None).unwrap_err();
    assert!(matches!(err, PanelError::Store(StoreError::Io(_))));
}

#[test]
fn test_illustration_assets_disabled_without_dir() {
    assert!(PanelConfig::DEFAULT.illustration_assets().unwrap().is_none());
}
