//! xtask toggle / set / mood: edit a history JSON file in place.
//!
//! A missing file starts an empty history.

use std::path::Path;

use anyhow::{Context, Result};
use habit_core::{CalendarDate, HabitKind, MemoryHabitStore};

fn open(path: &Path) -> Result<MemoryHabitStore> {
    MemoryHabitStore::load(path).with_context(|| format!("Failed to read history {}", path.display()))
}

fn save(store: &MemoryHabitStore, path: &Path) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("Failed to write history {}", path.display()))
}

/// Flip `habit` on `day`.
pub fn toggle(path: &Path, habit: HabitKind, day: CalendarDate) -> Result<()> {
    let mut store = open(path)?;
    let value = store.toggle_habit(day, habit);
    save(&store, path)?;
    println!("{day} {habit} = {}", u8::from(value));
    Ok(())
}

/// Set `habit` on `day`.
pub fn set(path: &Path, habit: HabitKind, value: bool, day: CalendarDate) -> Result<()> {
    let mut store = open(path)?;
    store.set_habit(day, habit, value);
    save(&store, path)?;
    println!("{day} {habit} = {}", u8::from(value));
    Ok(())
}

/// Pin the mood to `level`, or clear the override when `None`.
pub fn mood(path: &Path, level: Option<i64>) -> Result<()> {
    let mut store = open(path)?;
    match level {
        Some(level) => {
            store.set_mood_override(level)?;
            println!("mood pinned at {level}");
        }
        None => {
            store.clear_mood_override();
            println!("mood override cleared");
        }
    }
    save(&store, path)
}
