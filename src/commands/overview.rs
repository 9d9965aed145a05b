//! Overview command implementation

use crate::{core::config::AppConfig, storage::TableCounts, Result};

/// Handle the overview command
pub fn handle_overview(config: &AppConfig) -> Result<()> {
    let db = config.open_database()?;
    let counts = db.count_all()?;

    println!("Database: {}", config.database_path.display());
    print!("{}", format_counts(&counts));

    if config.api.is_none() {
        println!();
        println!("No API key configured; live and player commands are unavailable.");
    }

    Ok(())
}

/// One line per table
pub fn format_counts(counts: &TableCounts) -> String {
    format!(
        "Players:    {}\nMatches:    {}\nScorecards: {}\n",
        counts.players, counts.matches, counts.scorecards
    )
}
