//! xtask refresh: run the panel pipeline over a history file and write the
//! planes as PNG.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use eink_planes::PngPlaneSink;
use habit_core::{CalendarDate, MemoryHabitStore};
use habit_panel::{present, refresh, PanelConfig};

/// Entry point called from main.rs
pub fn run(history: &Path, today: CalendarDate, config: Option<&Path>, out: &Path) -> Result<()> {
    let config = match config {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    let store = MemoryHabitStore::load(history)
        .with_context(|| format!("Failed to read history {}", history.display()))?;
    let assets = config.illustration_assets()?;

    let frame = refresh(&store, today, &config, assets.as_ref())?;

    let mut sink = PngPlaneSink::new(out).for_panel(config.panel());
    sink.save_color(&frame.image)?;
    let shown = present(&frame, &mut sink, &config)?;

    println!("{}", format!("✓ Refreshed for {today}").green().bold());
    println!(
        "  mood {}  streak {}d (best {}d)  today {}/3  character {}",
        frame.mood, frame.streak.current, frame.streak.best, frame.today_completed, frame.character
    );
    if shown {
        println!("  planes in {}", out.display());
    } else {
        println!("{}", "  display disabled, planes not written".yellow());
    }
    Ok(())
}
