//! Player search, profile and career stats commands

use crate::{
    core::config::AppConfig,
    cricbuzz::{types::player_search_hits, PlayerProfile, StatsTable},
    error::CricketError,
    sync::{
        bulk::{import_team_players, save_player_profile},
        PlayerDefaults,
    },
    PlayerId, Result, TeamId,
};

use super::common::{api_client, confirmed, or_missing, render_table, report_auto_sync};

/// Shortest search text the API is queried with
pub const MIN_SEARCH_LEN: usize = 3;

/// Headline batting statistics shown per format
pub const BATTING_HEADLINES: &[(&str, &str)] = &[
    ("Matches", "Matches"),
    ("Runs", "Runs"),
    ("Average", "Avg"),
    ("SR", "SR"),
];

/// Headline bowling statistics shown per format
pub const BOWLING_HEADLINES: &[(&str, &str)] = &[
    ("Matches", "Matches"),
    ("Wickets", "Wickets"),
    ("Avg", "Avg"),
    ("Eco", "Economy"),
];

/// Which career table to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerKind {
    Batting,
    Bowling,
}

impl CareerKind {
    fn headlines(self) -> &'static [(&'static str, &'static str)] {
        match self {
            CareerKind::Batting => BATTING_HEADLINES,
            CareerKind::Bowling => BOWLING_HEADLINES,
        }
    }

    fn title(self) -> &'static str {
        match self {
            CareerKind::Batting => "Batting Statistics",
            CareerKind::Bowling => "Bowling Statistics",
        }
    }
}

/// Search players by name
pub async fn handle_players_search(config: &AppConfig, query: &str) -> Result<()> {
    let query = query.trim();
    if query.chars().count() < MIN_SEARCH_LEN {
        return Err(CricketError::invalid_input(format!(
            "type at least {} characters to search",
            MIN_SEARCH_LEN
        )));
    }

    let client = api_client(config)?;
    let results = client.search_players(query).await?;
    let hits = player_search_hits(&results);

    if hits.is_empty() {
        println!("No players found for '{}'.", query);
        println!("Try the full name, e.g. 'Virat Kohli' instead of 'Virat'.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = hits
        .iter()
        .map(|h| vec![h.id.to_string(), h.label()])
        .collect();
    print!("{}", render_table(&["ID", "Player"], &rows));
    Ok(())
}

/// Show a player profile and save the player locally
pub async fn handle_players_profile(config: &AppConfig, player_id: PlayerId) -> Result<()> {
    let client = api_client(config)?;
    let info = client.player_info(player_id).await?;

    let mut db = config.open_database()?;
    report_auto_sync("player", save_player_profile(&mut db, &info));

    print!("{}", format_profile(&PlayerProfile::from_payload(&info)));
    Ok(())
}

/// Show career batting or bowling statistics
pub async fn handle_players_career(
    config: &AppConfig,
    player_id: PlayerId,
    kind: CareerKind,
) -> Result<()> {
    let client = api_client(config)?;
    let payload = match kind {
        CareerKind::Batting => client.player_batting(player_id).await?,
        CareerKind::Bowling => client.player_bowling(player_id).await?,
    };

    let table = StatsTable::from_payload(&payload)?;
    if table.is_empty() {
        // Unknown shape: show what came back
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!("{}", format_career(&table, kind));
    Ok(())
}

/// Import a team roster
pub async fn handle_players_import(
    config: &AppConfig,
    team_id: TeamId,
    country: &str,
) -> Result<()> {
    let client = api_client(config)?;
    let mut db = config.open_database()?;

    println!("Importing players of team {}...", team_id);
    let count =
        import_team_players(&client, &mut db, team_id, &PlayerDefaults::for_roster(country))
            .await?;
    println!("✓ Imported {} players!", count);
    Ok(())
}

/// Delete every player row
pub fn handle_players_clear(config: &AppConfig, yes: bool) -> Result<()> {
    if !confirmed(yes, "This deletes every player.")? {
        println!("Aborted.");
        return Ok(());
    }

    let mut db = config.open_database()?;
    let deleted = db.clear_all_players()?;
    println!("✓ Deleted {} players", deleted);
    Ok(())
}

pub fn format_profile(profile: &PlayerProfile) -> String {
    let mut out = format!("{}\n", profile.name);
    if let Some(nickname) = &profile.nickname {
        out.push_str(&format!("Nickname: {}\n", nickname));
    }

    let fields = [
        ("Role", &profile.role),
        ("Batting Style", &profile.batting_style),
        ("Bowling Style", &profile.bowling_style),
        ("International Team", &profile.intl_team),
        ("DOB", &profile.date_of_birth),
        ("Birthplace", &profile.birth_place),
        ("Height", &profile.height),
    ];
    out.push('\n');
    for (label, value) in fields {
        out.push_str(&format!(
            "{:<20} {}\n",
            format!("{}:", label),
            or_missing(value.as_deref())
        ));
    }

    if !profile.teams.is_empty() {
        out.push_str("\nTeams Played For\n");
        for team in &profile.teams {
            out.push_str(&format!("  • {}\n", team));
        }
    }

    if let Some(url) = &profile.profile_url {
        out.push_str(&format!("\nFull profile: {}\n", url));
    }
    out
}

/// Headline numbers per format, then the full table
pub fn format_career(table: &StatsTable, kind: CareerKind) -> String {
    let mut out = format!("{}\n\n", kind.title());

    let headlines = kind.headlines();
    let mut headers = vec!["Format".to_string()];
    headers.extend(headlines.iter().map(|(_, label)| label.to_string()));
    let overview: Vec<Vec<String>> = table
        .formats
        .iter()
        .enumerate()
        .map(|(idx, format)| {
            let mut row = vec![format.clone()];
            row.extend(
                headlines
                    .iter()
                    .map(|(stat, _)| or_missing(table.value(stat, idx)).to_string()),
            );
            row
        })
        .collect();
    out.push_str(&render_table(&headers, &overview));

    let mut headers = vec!["Statistic".to_string()];
    headers.extend(table.formats.iter().cloned());
    let detail: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.stat.clone()];
            cells.extend(row.values.iter().cloned());
            cells
        })
        .collect();
    out.push('\n');
    out.push_str(&render_table(&headers, &detail));
    out
}
