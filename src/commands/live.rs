//! Live match commands

use serde_json::Value;

use crate::{
    core::config::AppConfig,
    cricbuzz::{build_match_options, CricbuzzClient, InningsDetail, MatchOption},
    error::CricketError,
    sync::{
        bulk::{save_match_info, save_scorecard, sync_matches},
        mapping::first_text,
    },
    MatchId, Result,
};

use super::common::{api_client, or_missing, render_table, report_auto_sync};

async fn fetch_match_options(client: &CricbuzzClient) -> Result<Vec<MatchOption>> {
    let feed = client.live_matches().await?;
    build_match_options(&feed)
}

/// List the matches of the live feed
pub async fn handle_live_list(config: &AppConfig) -> Result<()> {
    let client = api_client(config)?;
    let options = fetch_match_options(&client).await?;

    if options.is_empty() {
        println!("No live matches right now.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = options
        .iter()
        .map(|o| vec![o.match_id.to_string(), o.label.clone()])
        .collect();
    print!("{}", render_table(&["Match ID", "Match"], &rows));
    Ok(())
}

/// Show one live match, saving it and its scorecard along the way.
///
/// Without `full` a missing scorecard is only reported; with `full` it is an
/// error.
pub async fn handle_live_show(config: &AppConfig, match_id: MatchId, full: bool) -> Result<()> {
    let client = api_client(config)?;
    let options = fetch_match_options(&client).await?;
    let selected = options
        .into_iter()
        .find(|o| o.match_id == match_id)
        .ok_or_else(|| {
            CricketError::invalid_input(format!("match {} is not in the live feed", match_id))
        })?;

    let mut db = config.open_database()?;
    report_auto_sync("match", save_match_info(&mut db, &selected.info));

    print!("{}", format_match_details(&selected.info));

    let fetched = match client.scorecard(match_id).await {
        Ok(fetched) => fetched,
        Err(e) if !full => {
            log::warn!("scorecard for match {} unavailable: {}", match_id, e);
            println!();
            println!("Scorecard not available yet.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    log::debug!("scorecard served by {}", fetched.url);
    report_auto_sync(
        "scorecard",
        save_scorecard(&mut db, match_id, &fetched.data),
    );

    let innings = InningsDetail::list_from_scorecard(&fetched.data);
    if innings.is_empty() {
        println!();
        println!("No innings found in scorecard response.");
        return Ok(());
    }

    println!();
    println!("Current Score");
    print!("{}", format_score_summary(&innings));

    if full {
        for (idx, inn) in innings.iter().enumerate() {
            println!();
            print!("{}", format_innings_detail(idx + 1, inn));
        }
    }

    Ok(())
}

/// Save every live match and its scorecard
pub async fn handle_live_sync(config: &AppConfig) -> Result<()> {
    let client = api_client(config)?;
    let options = fetch_match_options(&client).await?;
    if options.is_empty() {
        println!("No live matches right now.");
        return Ok(());
    }

    println!("Syncing {} matches...", options.len());
    let mut db = config.open_database()?;
    let report = sync_matches(&client, &mut db, &options).await?;

    println!(
        "✓ Synced {} matches and {} innings!",
        report.matches, report.innings
    );
    for failure in &report.failures {
        println!("⚠ Match {}: {}", failure.match_id, failure.error);
    }
    Ok(())
}

/// Teams, series, venue and status of a `matchInfo` object
pub fn format_match_details(info: &Value) -> String {
    let team = |key: &str, fallback: &str| {
        info.get(key)
            .and_then(|t| first_text(t, &["teamName"]))
            .unwrap_or_else(|| fallback.to_string())
    };
    let text = |keys: &[&str]| first_text(info, keys);
    let venue = info.get("venueInfo").unwrap_or(&Value::Null);

    let mut out = format!("{} vs {}\n", team("team1", "Team 1"), team("team2", "Team 2"));
    let fields = [
        ("Series", text(&["seriesName"])),
        ("Match", text(&["matchDesc"])),
        ("Format", text(&["matchFormat"])),
        ("Venue", first_text(venue, &["ground"])),
        ("City", first_text(venue, &["city"])),
        ("Status", text(&["status"])),
        ("State", text(&["state"])),
    ];
    for (label, value) in fields {
        out.push_str(&format!("  {:<8} {}\n", label, or_missing(value.as_deref())));
    }
    out
}

/// One row per innings: runs, wickets, overs and run rate
pub fn format_score_summary(innings: &[InningsDetail]) -> String {
    let rows: Vec<Vec<String>> = innings
        .iter()
        .map(|inn| {
            vec![
                inn.bat_team.clone(),
                inn.score.clone(),
                inn.wickets.clone(),
                inn.overs.clone(),
                inn.run_rate.clone(),
            ]
        })
        .collect();
    render_table(&["Team", "Runs", "Wickets", "Overs", "Run Rate"], &rows)
}

/// Score line, extras, batsmen and bowlers of one innings
pub fn format_innings_detail(number: usize, inn: &InningsDetail) -> String {
    let mut out = format!("Innings {} - {}\n", number, inn.bat_team);
    out.push_str(&format!(
        "{} {}/{} ({} ov) | Run Rate: {}\n",
        inn.bat_team, inn.score, inn.wickets, inn.overs, inn.run_rate
    ));

    let e = &inn.extras;
    out.push_str(&format!(
        "Extras: {} (b {}, lb {}, w {}, nb {}, p {})\n",
        e.total, e.byes, e.leg_byes, e.wides, e.no_balls, e.penalty
    ));

    out.push_str("\nBatsmen\n");
    if inn.batsmen.is_empty() {
        out.push_str("No batsmen data found.\n");
    } else {
        let rows: Vec<Vec<String>> = inn
            .batsmen
            .iter()
            .map(|b| {
                vec![
                    b.name.clone(),
                    b.runs.clone(),
                    b.balls.clone(),
                    b.fours.clone(),
                    b.sixes.clone(),
                    b.strike_rate.clone(),
                    b.dismissal.clone(),
                ]
            })
            .collect();
        out.push_str(&render_table(
            &["Name", "Runs", "Balls", "4s", "6s", "SR", "Status"],
            &rows,
        ));
    }

    out.push_str("\nBowlers\n");
    if inn.bowlers.is_empty() {
        out.push_str("No bowlers data found.\n");
    } else {
        let rows: Vec<Vec<String>> = inn
            .bowlers
            .iter()
            .map(|b| {
                vec![
                    b.name.clone(),
                    b.overs.clone(),
                    b.maidens.clone(),
                    b.runs.clone(),
                    b.wickets.clone(),
                    b.economy.clone(),
                ]
            })
            .collect();
        out.push_str(&render_table(
            &["Name", "Overs", "Maidens", "Runs", "Wickets", "Economy"],
            &rows,
        ));
    }

    out
}
