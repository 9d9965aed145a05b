//! Player create/read/update/delete commands

use crate::{
    cli::PlayerFields,
    core::config::AppConfig,
    error::CricketError,
    storage::{CricketDatabase, Player},
    PlayerId, Result,
};

use super::common::{confirmed, or_missing, render_players};

/// Print the id `crud create` would assign
pub fn handle_crud_next_id(config: &AppConfig) -> Result<()> {
    let db = config.open_database()?;
    println!("Next available player id: {}", db.next_player_id()?);
    Ok(())
}

/// List players, optionally filtered
pub fn handle_crud_list(config: &AppConfig, filter: Option<&str>, as_json: bool) -> Result<()> {
    let db = config.open_database()?;
    let players = db.list_players(filter)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&players)?);
    } else if players.is_empty() {
        println!("No players found.");
    } else {
        print!("{}", render_players(&players));
        println!("\n{} players", players.len());
    }
    Ok(())
}

/// Show one player
pub fn handle_crud_read(config: &AppConfig, player_id: PlayerId) -> Result<()> {
    let db = config.open_database()?;
    match db.get_player(player_id)? {
        Some(player) => print!("{}", format_player(&player)),
        None => println!("No player with id {}.", player_id),
    }
    Ok(())
}

/// Create a player, assigning the next free id when none is given
pub fn handle_crud_create(
    config: &AppConfig,
    id: Option<PlayerId>,
    name: &str,
    fields: PlayerFields,
) -> Result<()> {
    let mut db = config.open_database()?;
    let player = create_player(&mut db, id, name, fields)?;
    println!(
        "✓ Player created successfully with id {}",
        player.player_id
    );
    Ok(())
}

/// Update the given fields of a player
pub fn handle_crud_update(
    config: &AppConfig,
    player_id: PlayerId,
    name: Option<String>,
    fields: PlayerFields,
) -> Result<()> {
    let mut db = config.open_database()?;
    match update_player(&mut db, player_id, name, fields)? {
        Some(player) => {
            println!("✓ Player updated successfully!");
            print!("{}", format_player(&player));
        }
        None => println!("No player with id {}; nothing updated.", player_id),
    }
    Ok(())
}

/// Delete a player after confirmation
pub fn handle_crud_delete(config: &AppConfig, player_id: PlayerId, yes: bool) -> Result<()> {
    let mut db = config.open_database()?;
    let Some(player) = db.get_player(player_id)? else {
        println!("No player with id {}.", player_id);
        return Ok(());
    };

    let prompt = format!(
        "Delete {} (id {})? This action cannot be undone.",
        player.name, player_id
    );
    if !confirmed(yes, &prompt)? {
        println!("Aborted.");
        return Ok(());
    }

    db.delete_player(player_id)?;
    println!("✓ Player deleted successfully!");
    Ok(())
}

/// Validate and insert a new player. Blank optional fields are stored as NULL.
pub fn create_player(
    db: &mut CricketDatabase,
    id: Option<PlayerId>,
    name: &str,
    fields: PlayerFields,
) -> Result<Player> {
    let name = required_name(name)?;
    let player_id = match id {
        Some(id) => id,
        None => db.next_player_id()?,
    };

    let player = Player {
        player_id,
        name,
        country: non_blank(fields.country),
        role: non_blank(fields.role),
        batting_style: non_blank(fields.batting_style),
        bowling_style: non_blank(fields.bowling_style),
    };
    db.create_player(&player)?;
    Ok(player)
}

/// Merge the given fields over the stored player and write it back.
/// Returns `None` when there is no such player.
pub fn update_player(
    db: &mut CricketDatabase,
    player_id: PlayerId,
    name: Option<String>,
    fields: PlayerFields,
) -> Result<Option<Player>> {
    let Some(current) = db.get_player(player_id)? else {
        return Ok(None);
    };

    let updated = Player {
        player_id,
        name: match name {
            Some(name) => required_name(&name)?,
            None => current.name,
        },
        country: merge(fields.country, current.country),
        role: merge(fields.role, current.role),
        batting_style: merge(fields.batting_style, current.batting_style),
        bowling_style: merge(fields.bowling_style, current.bowling_style),
    };

    if db.update_player(&updated)? == 0 {
        return Ok(None);
    }
    Ok(Some(updated))
}

pub fn format_player(player: &Player) -> String {
    format!(
        "ID:            {}\nName:          {}\nCountry:       {}\nRole:          {}\nBatting Style: {}\nBowling Style: {}\n",
        player.player_id,
        player.name,
        or_missing(player.country.as_deref()),
        or_missing(player.role.as_deref()),
        or_missing(player.batting_style.as_deref()),
        or_missing(player.bowling_style.as_deref()),
    )
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CricketError::invalid_input("name is required"));
    }
    Ok(name.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// A flag that was given replaces the stored value; a blank flag clears it
fn merge(given: Option<String>, current: Option<String>) -> Option<String> {
    match given {
        Some(value) => non_blank(Some(value)),
        None => current,
    }
}
