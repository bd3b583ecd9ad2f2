//! xtask preview: render the demonstration month without any stored history.
//!
//! Days 1..=28 cycle through the habits so every icon and combination shows
//! up on one page.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use eink_planes::{split_black_red, PlaneSink, PngPlaneSink, SplitThresholds};
use habit_core::{CalendarDate, HabitFlags, MonthData, MoodLevel, StreakStats, YtdTotals};
use habit_render::{render_month, Character, MonthSnapshot, RenderConfig};

const DEMO_DAYS: u8 = 28;

/// Entry point called from main.rs
pub fn run(year: i32, month: u8, today: CalendarDate, out: &Path) -> Result<()> {
    let days = demo_month(year, month)?;
    let today_completed = if (today.year(), today.month()) == (year, month) {
        days.flags(today.day()).count()
    } else {
        0
    };
    let snapshot = MonthSnapshot {
        year,
        month,
        days: &days,
        totals: YtdTotals::new(100, 80, 60),
        mood: MoodLevel::saturating_from(6),
        today,
        streak: StreakStats::default(),
        today_completed,
    };

    let image = render_month(&snapshot, &RenderConfig::DEFAULT).context("Failed to render preview")?;
    let planes = split_black_red(&image, &SplitThresholds::DEFAULT)?;

    let mut sink = PngPlaneSink::new(out);
    let color = sink.save_color(&image)?;
    sink.present(&planes)?;

    println!("{}", format!("✓ Preview of {year}-{month:02} written").green().bold());
    println!("  {}", color.display());
    println!("  {}", out.join(PngPlaneSink::BLACK_FILE).display());
    println!("  {}", out.join(PngPlaneSink::RED_FILE).display());
    println!("  character: {}", Character::for_date(today));
    Ok(())
}

/// `read = d % 2`, `journal = (d + 1) % 2`, `workout = (d + 2) % 2` for days 1..=28.
fn demo_month(year: i32, month: u8) -> Result<MonthData> {
    let mut days = MonthData::new(year, month)?;
    for day in 1..=DEMO_DAYS {
        let odd = day % 2 == 1;
        days.insert(day, HabitFlags::new(odd, !odd, odd))?;
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_pattern() {
        let days = demo_month(2026, 2).unwrap();
        assert_eq!(days.flags(1), HabitFlags::new(true, false, true));
        assert_eq!(days.flags(2), HabitFlags::new(false, true, false));
        assert_eq!(days.flags(28).count(), 1);
    }

    #[test]
    fn test_preview_writes_three_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let today = CalendarDate::new(2026, 2, 11).unwrap();
        run(2026, 2, today, dir.path()).unwrap();
        for file in [PngPlaneSink::COLOR_FILE, PngPlaneSink::BLACK_FILE, PngPlaneSink::RED_FILE] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
    }
}
