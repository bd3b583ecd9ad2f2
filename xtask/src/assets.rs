//! xtask assets: write the character illustrations into an asset directory.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use habit_render::{IllustrationAssets, CATALOG_VERSION};

/// Entry point called from main.rs
pub fn run(dir: &Path) -> Result<()> {
    let report = IllustrationAssets::new(dir).ensure_materialized()?;

    println!(
        "{}",
        format!("✓ Illustrations v{CATALOG_VERSION} in {}", dir.display()).green().bold()
    );
    for path in &report.written {
        println!("  {} {}", "written".green(), path.display());
    }
    for path in &report.existing {
        println!("  {} {}", "kept".dimmed(), path.display());
    }
    Ok(())
}
