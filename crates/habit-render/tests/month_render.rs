//! Month page rendering tests
//!
//! Pixel-level checks on full 800×480 pages.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use habit_core::{CalendarDate, HabitFlags, MonthData, MoodLevel, StreakStats, YtdTotals};
use habit_render::layout::{Bounds, CHARACTER_SIZE};
use habit_render::{
    render_month, Character, IllustrationAssets, MonthSnapshot, Palette, RenderConfig,
    RenderError, Renderer,
};
use image::{Rgb, RgbImage};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([200, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn date(y: i32, m: u8, d: u8) -> CalendarDate {
    CalendarDate::new(y, m, d).unwrap()
}

fn snapshot(days: &MonthData, today: CalendarDate) -> MonthSnapshot<'_> {
    MonthSnapshot {
        year: days.year(),
        month: days.month(),
        days,
        totals: YtdTotals::new(100, 80, 60),
        mood: MoodLevel::saturating_from(6),
        today,
        streak: StreakStats { current: 3, best: 12 },
        today_completed: 2,
    }
}

fn px(img: &RgbImage, x: i32, y: i32) -> Rgb<u8> {
    *img.get_pixel(u32::try_from(x).unwrap(), u32::try_from(y).unwrap())
}

fn count_in(img: &RgbImage, b: Bounds, color: Rgb<u8>) -> usize {
    let mut n = 0;
    for y in b.y0..=b.y1 {
        for x in b.x0..=b.x1 {
            if px(img, x, y) == color {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn test_february_non_leap_grid() {
    let days = MonthData::new(2026, 2).unwrap();
    let today = date(2026, 2, 11);
    let renderer = Renderer::new(RenderConfig::DEFAULT);
    let img = renderer.render(&snapshot(&days, today)).unwrap();
    let layout = renderer.layout(2026, 2).unwrap();

    let cells: Vec<_> = layout.day_cells().collect();
    assert_eq!(cells.len(), 28);
    let mut columns: Vec<_> = cells.iter().map(|c| c.column).collect();
    columns.sort_unstable();
    columns.dedup();
    assert_eq!(columns, (0..7).collect::<Vec<_>>());

    for cell in &cells {
        let b = cell.bounds;
        // day number
        let number = Bounds { x0: b.x0 + 4, y0: b.y0 + 4, x1: b.x0 + 30, y1: b.y0 + 18 };
        assert!(count_in(&img, number, BLACK) > 0, "day {} has no number", cell.day);

        // today outline probes: top edge middle and left edge middle
        let top = px(&img, b.x0 + layout.cell_width / 2, b.y0 + 1);
        let left = px(&img, b.x0 + 1, b.y0 + layout.cell_height / 2);
        if cell.day == today.day() {
            assert_eq!((top, left), (RED, RED), "today not outlined");
            assert_eq!(px(&img, b.x0 + layout.cell_width / 2, b.y0 + 2), RED);
            assert_eq!(px(&img, b.x0 + layout.cell_width / 2, b.y0 + 3), WHITE);
        } else {
            assert_eq!((top, left), (WHITE, WHITE), "day {} outlined", cell.day);
        }
    }

    // grid lines
    for x in layout.column_lines() {
        assert_eq!(px(&img, x, layout.rows_top() + 5), BLACK);
    }
}

#[test]
fn test_page_uses_only_palette_colors() {
    let mut days = MonthData::new(2026, 8).unwrap();
    for d in 1..=31 {
        days.insert(d, HabitFlags::new(d % 2 == 1, d % 3 == 0, d % 5 == 0)).unwrap();
    }
    let img = render_month(&snapshot(&days, date(2026, 8, 31)), &RenderConfig::DEFAULT).unwrap();
    assert_eq!(img.dimensions(), (800, 480));
    assert!(img.pixels().all(|p| *p == BLACK || *p == RED || *p == WHITE));
}

#[test]
fn test_icons_follow_flags() {
    let mut days = MonthData::new(2026, 2).unwrap();
    days.insert(3, HabitFlags::new(true, false, false)).unwrap();
    days.insert(4, HabitFlags::new(false, true, false)).unwrap();
    days.insert(5, HabitFlags::ALL).unwrap();

    let renderer = Renderer::new(RenderConfig::DEFAULT);
    let img = renderer.render(&snapshot(&days, date(2026, 2, 20))).unwrap();
    let layout = renderer.layout(2026, 2).unwrap();
    let cell = |day: u8| layout.day_cells().find(|c| c.day == day).unwrap().bounds;
    let slots = |day: u8| habit_core::HabitKind::ALL.map(|k| layout.icon_slot(&cell(day), k));

    let [read, journal, workout] = slots(3);
    assert!(count_in(&img, read, BLACK) > 0);
    assert_eq!(count_in(&img, journal, RED), 0);
    assert_eq!(count_in(&img, workout, BLACK), 0);

    let [read, journal, workout] = slots(4);
    assert_eq!(count_in(&img, read, BLACK), 0);
    assert!(count_in(&img, journal, RED) > 0);
    assert_eq!(count_in(&img, workout, BLACK), 0);

    let [read, journal, workout] = slots(5);
    assert!(count_in(&img, read, BLACK) > 0);
    assert!(count_in(&img, journal, RED) > 0);
    assert!(count_in(&img, workout, BLACK) > 0);

    let [read, journal, workout] = slots(6);
    assert_eq!(count_in(&img, read, BLACK) + count_in(&img, journal, RED) + count_in(&img, workout, BLACK), 0);
}

#[test]
fn test_today_fraction_color() {
    let days = MonthData::new(2026, 2).unwrap();
    let renderer = Renderer::new(RenderConfig::DEFAULT);
    let widget = renderer.layout(2026, 2).unwrap().widget();
    let value_row = Bounds { x0: widget.x0 + 60, y0: widget.y0 + 26, x1: widget.x1 - 2, y1: widget.y1 - 2 };

    let mut snap = snapshot(&days, date(2026, 2, 20));
    let incomplete = renderer.render(&snap).unwrap();
    assert!(count_in(&incomplete, value_row, RED) > 0);

    snap.today_completed = 3;
    let complete = renderer.render(&snap).unwrap();
    assert_eq!(count_in(&complete, value_row, RED), 0);
    assert!(count_in(&complete, value_row, BLACK) > 0);
}

#[test]
fn test_face_follows_mood() {
    // Q1 2026 is the anchor quarter: the procedural face.
    let days = MonthData::new(2026, 2).unwrap();
    let renderer = Renderer::new(RenderConfig::DEFAULT);
    let face = renderer.layout(2026, 2).unwrap().character();

    let mut snap = snapshot(&days, date(2026, 2, 20));
    snap.mood = MoodLevel::MAX;
    let happy = renderer.render(&snap).unwrap();
    snap.mood = MoodLevel::MIN;
    let sad = renderer.render(&snap).unwrap();

    assert!(count_in(&happy, face, BLACK) > 0);
    let differs = (face.y0..=face.y1)
        .flat_map(|y| (face.x0..=face.x1).map(move |x| (x, y)))
        .any(|(x, y)| px(&happy, x, y) != px(&sad, x, y));
    assert!(differs);
}

#[test]
fn test_asset_character_is_blitted() {
    let dir = tempfile::TempDir::new().unwrap();
    let assets = IllustrationAssets::new(dir.path());
    assets.ensure_materialized().unwrap();
    let cat = assets.load(Character::Cat).unwrap();

    // 2026 Q2 → second catalog entry
    let days = MonthData::new(2026, 5).unwrap();
    let renderer = Renderer::new(RenderConfig::DEFAULT).with_assets(assets);
    let img = renderer.render(&snapshot(&days, date(2026, 5, 10))).unwrap();
    let b = renderer.layout(2026, 5).unwrap().character();

    for y in 0..CHARACTER_SIZE {
        for x in 0..CHARACTER_SIZE {
            let page = px(&img, b.x0 + i32::try_from(x).unwrap(), b.y0 + i32::try_from(y).unwrap());
            assert_eq!(page, *cat.get_pixel(x, y));
        }
    }
}

#[test]
fn test_missing_assets_fall_back_to_face() {
    let dir = tempfile::TempDir::new().unwrap();
    let days = MonthData::new(2026, 5).unwrap();
    let snap = snapshot(&days, date(2026, 5, 10));

    let without = Renderer::new(RenderConfig::DEFAULT).render(&snap).unwrap();
    let empty_dir = Renderer::new(RenderConfig::DEFAULT)
        .with_assets(IllustrationAssets::new(dir.path()))
        .render(&snap)
        .unwrap();
    assert_eq!(without, empty_dir);
}

#[test]
fn test_unknown_font_still_renders() {
    let cfg = RenderConfig { preferred_font: "Comic Sans".into(), ..RenderConfig::DEFAULT };
    let renderer = Renderer::new(cfg);
    assert_eq!(renderer.fonts().family, "builtin");
    let days = MonthData::new(2026, 2).unwrap();
    let img = renderer.render(&snapshot(&days, date(2026, 2, 1))).unwrap();
    assert!(img.pixels().any(|p| *p == BLACK));
}

#[test]
fn test_custom_palette() {
    let cfg = RenderConfig { red: [255, 0, 0], ..RenderConfig::DEFAULT };
    assert_ne!(cfg.palette(), Palette::DEFAULT);
    let days = MonthData::new(2026, 2).unwrap();
    let img = render_month(&snapshot(&days, date(2026, 2, 1)), &cfg).unwrap();
    assert!(img.pixels().any(|p| *p == Rgb([255, 0, 0])));
    assert!(!img.pixels().any(|p| *p == RED));
}

#[test]
fn test_input_errors() {
    let days = MonthData::new(2026, 2).unwrap();
    let mut snap = snapshot(&days, date(2026, 2, 1));
    snap.month = 3;
    assert!(matches!(
        render_month(&snap, &RenderConfig::DEFAULT),
        Err(RenderError::MonthMismatch { .. })
    ));
    snap.month = 0;
    assert!(matches!(
        render_month(&snap, &RenderConfig::DEFAULT),
        Err(RenderError::Calendar(_))
    ));
}
