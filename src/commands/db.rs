//! Database maintenance commands

use crate::{core::config::AppConfig, Result};

use super::common::confirmed;

/// Create the tables if they are missing
pub fn handle_db_init(config: &AppConfig) -> Result<()> {
    // Opening the database initializes the schema
    let db = config.open_database()?;
    let counts = db.count_all()?;
    println!(
        "✓ Database ready at {} ({} players, {} matches, {} scorecard rows)",
        config.database_path.display(),
        counts.players,
        counts.matches,
        counts.scorecards
    );
    Ok(())
}

/// Delete every row of every table
pub fn handle_db_wipe(config: &AppConfig, yes: bool) -> Result<()> {
    if !confirmed(yes, "This deletes all players, matches and scorecards.")? {
        println!("Aborted.");
        return Ok(());
    }

    let mut db = config.open_database()?;
    db.wipe_all()?;
    println!("✓ Database cleared successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::Player, PlayerId};

    #[test]
    fn test_wipe_with_yes_empties_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new(dir.path().join("stats.db"), None);

        handle_db_init(&config).unwrap();
        {
            let mut db = config.open_database().unwrap();
            db.create_player(&Player::new(PlayerId::new(1), "A"))
                .unwrap();
        }

        handle_db_wipe(&config, true).unwrap();
        let db = config.open_database().unwrap();
        assert_eq!(db.count_all().unwrap().players, 0);
    }
}
