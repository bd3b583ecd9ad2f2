// Desktop tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod assets;
mod history;
mod preview;
mod refresh;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use habit_core::{CalendarDate, HabitKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Habit paper development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demonstration month to color.png, black.png and red.png
    Preview {
        /// Year shown (defaults to today's)
        #[arg(long)]
        year: Option<i32>,
        /// Month shown (defaults to today's)
        #[arg(long)]
        month: Option<u8>,
        /// Highlighted day, YYYY-MM-DD (defaults to the current UTC date)
        #[arg(long)]
        today: Option<CalendarDate>,
        /// Output directory
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
    /// Run the full refresh pipeline over a history file
    Refresh {
        /// History JSON file
        #[arg(long)]
        history: PathBuf,
        /// Refresh date, YYYY-MM-DD (defaults to the current UTC date)
        #[arg(long)]
        today: Option<CalendarDate>,
        /// Panel config JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where black.png / red.png / color.png go
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
    /// Write the character illustration files
    Assets {
        /// Asset directory
        #[arg(long)]
        dir: PathBuf,
    },
    /// Flip one habit for a day
    Toggle {
        /// History JSON file
        #[arg(long)]
        history: PathBuf,
        /// read, journal or workout
        #[arg(long)]
        habit: HabitKind,
        /// Day, YYYY-MM-DD (defaults to the current UTC date)
        #[arg(long)]
        day: Option<CalendarDate>,
    },
    /// Set one habit for a day
    Set {
        /// History JSON file
        #[arg(long)]
        history: PathBuf,
        /// read, journal or workout
        #[arg(long)]
        habit: HabitKind,
        /// Non-zero marks the habit done
        #[arg(long)]
        value: i64,
        /// Day, YYYY-MM-DD (defaults to the current UTC date)
        #[arg(long)]
        day: Option<CalendarDate>,
    },
    /// Pin or clear the mood level
    Mood {
        /// History JSON file
        #[arg(long)]
        history: PathBuf,
        /// Level 0..=9
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        level: Option<i64>,
        /// Go back to the computed mood
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            year,
            month,
            today,
            out,
        } => {
            let today = resolve_day(today)?;
            preview::run(year.unwrap_or(today.year()), month.unwrap_or(today.month()), today, &out)
        }
        Commands::Refresh {
            history,
            today,
            config,
            out,
        } => refresh::run(&history, resolve_day(today)?, config.as_deref(), &out),
        Commands::Assets { dir } => assets::run(&dir),
        Commands::Toggle { history, habit, day } => history::toggle(&history, habit, resolve_day(day)?),
        Commands::Set {
            history,
            habit,
            value,
            day,
        } => history::set(&history, habit, value != 0, resolve_day(day)?),
        // clap guarantees exactly one of --level / --clear
        Commands::Mood { history, level, .. } => history::mood(&history, level),
    }
}

/// `day`, or the current UTC date.
fn resolve_day(day: Option<CalendarDate>) -> Result<CalendarDate> {
    if let Some(day) = day {
        return Ok(day);
    }
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before 1970")?
        .as_secs();
    let days = i64::try_from(secs / 86_400).context("system clock out of range")?;
    CalendarDate::from_day_number(days).context("system clock out of range")
}
