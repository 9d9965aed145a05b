//! Named analytical queries over the local tables.
//!
//! The statements are fixed and run verbatim. Operators can also run their
//! own SQL through [`run_ad_hoc`], which is executed unsanitized.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::{models::QueryResult, schema::CricketDatabase};
use crate::{error::CricketError, Result};

/// A named, pre-built statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogQuery {
    /// Short key, `q1`..`q25`
    pub key: &'static str,
    pub title: &'static str,
    pub sql: &'static str,
}

/// A query result plus how long it took
#[derive(Debug, Clone, Serialize)]
pub struct TimedResult {
    pub result: QueryResult,
    pub elapsed: Duration,
}

pub const QUERY_CATALOG: &[CatalogQuery] = &[
    CatalogQuery {
        key: "q1",
        title: "Players by Country",
        sql: "SELECT player_id, name, role, batting_style, bowling_style FROM players WHERE country = 'India' ORDER BY name;",
    },
    CatalogQuery {
        key: "q2",
        title: "Recent Matches",
        sql: "SELECT match_id, match_desc, team1, team2, venue_ground, venue_city, start_date FROM matches ORDER BY start_date DESC LIMIT 20;",
    },
    CatalogQuery {
        key: "q3",
        title: "Top 10 Run Scorers",
        sql: "SELECT bat_team, SUM(runs) AS total_runs, ROUND(AVG(runs), 2) AS avg_runs FROM scorecards GROUP BY bat_team ORDER BY total_runs DESC LIMIT 10;",
    },
    CatalogQuery {
        key: "q4",
        title: "Matches by City",
        sql: "SELECT venue_city, COUNT(*) AS match_count FROM matches WHERE venue_city IS NOT NULL GROUP BY venue_city ORDER BY match_count DESC;",
    },
    CatalogQuery {
        key: "q5",
        title: "Team Match Count",
        sql: "SELECT team1, COUNT(*) AS matches_played FROM matches GROUP BY team1 ORDER BY matches_played DESC;",
    },
    CatalogQuery {
        key: "q6",
        title: "Players by Role Count",
        sql: "SELECT role, COUNT(*) AS player_count FROM players WHERE role IS NOT NULL GROUP BY role ORDER BY player_count DESC;",
    },
    CatalogQuery {
        key: "q7",
        title: "Matches by Format",
        sql: "SELECT match_format, COUNT(*) AS total_matches FROM matches WHERE match_format IS NOT NULL GROUP BY match_format ORDER BY total_matches DESC;",
    },
    CatalogQuery {
        key: "q8",
        title: "Series by Name",
        sql: "SELECT DISTINCT series_name, COUNT(*) AS series_count FROM matches GROUP BY series_name ORDER BY series_count DESC;",
    },
    CatalogQuery {
        key: "q9",
        title: "All Matches Played",
        sql: "SELECT match_id, series_name, team1, team2, match_format, venue_city FROM matches ORDER BY match_id DESC LIMIT 50;",
    },
    CatalogQuery {
        key: "q10",
        title: "Scorecard Details",
        sql: "SELECT match_id, innings_id, bat_team, runs, wickets, overs, runrate FROM scorecards ORDER BY match_id DESC, innings_id LIMIT 50;",
    },
    CatalogQuery {
        key: "q11",
        title: "High Scoring Innings (50+)",
        sql: "SELECT match_id, bat_team, runs, wickets, overs FROM scorecards WHERE runs >= 50 ORDER BY runs DESC LIMIT 30;",
    },
    CatalogQuery {
        key: "q12",
        title: "Matches by Team",
        sql: "SELECT team1, COUNT(*) AS matches_as_team1, (SELECT COUNT(*) FROM matches m2 WHERE m2.team2 = matches.team1) AS matches_as_team2 FROM matches GROUP BY team1 ORDER BY matches_as_team1 DESC;",
    },
    CatalogQuery {
        key: "q13",
        title: "Average Runs by Team",
        sql: "SELECT bat_team, ROUND(AVG(runs), 2) AS avg_runs, COUNT(*) AS innings_count FROM scorecards GROUP BY bat_team ORDER BY avg_runs DESC;",
    },
    CatalogQuery {
        key: "q14",
        title: "Wickets Lost Analysis",
        sql: "SELECT bat_team, ROUND(AVG(wickets), 2) AS avg_wickets_lost, COUNT(*) AS innings_count FROM scorecards GROUP BY bat_team ORDER BY avg_wickets_lost DESC;",
    },
    CatalogQuery {
        key: "q15",
        title: "Economy Rate Analysis",
        sql: "SELECT bat_team, ROUND(AVG(runrate), 2) AS avg_run_rate FROM scorecards GROUP BY bat_team ORDER BY avg_run_rate DESC;",
    },
    CatalogQuery {
        key: "q16",
        title: "Match Format Distribution",
        sql: "SELECT match_format, COUNT(*) AS total_matches FROM matches WHERE match_format IS NOT NULL GROUP BY match_format;",
    },
    CatalogQuery {
        key: "q17",
        title: "Players per Country",
        sql: "SELECT country, COUNT(*) AS player_count FROM players WHERE country IS NOT NULL GROUP BY country ORDER BY player_count DESC;",
    },
    CatalogQuery {
        key: "q18",
        title: "Player Roles Distribution",
        sql: "SELECT role, COUNT(*) AS total_players FROM players GROUP BY role ORDER BY total_players DESC;",
    },
    CatalogQuery {
        key: "q19",
        title: "Batting Styles",
        sql: "SELECT batting_style, COUNT(*) AS count FROM players WHERE batting_style IS NOT NULL GROUP BY batting_style ORDER BY count DESC;",
    },
    CatalogQuery {
        key: "q20",
        title: "Bowling Styles",
        sql: "SELECT bowling_style, COUNT(*) AS count FROM players WHERE bowling_style IS NOT NULL GROUP BY bowling_style ORDER BY count DESC;",
    },
    CatalogQuery {
        key: "q21",
        title: "Highest Individual Score",
        sql: "SELECT match_id, bat_team, MAX(runs) AS highest_score FROM scorecards GROUP BY match_id ORDER BY highest_score DESC LIMIT 20;",
    },
    CatalogQuery {
        key: "q22",
        title: "Best Run Rates",
        sql: "SELECT bat_team, match_id, runrate FROM scorecards ORDER BY runrate DESC LIMIT 20;",
    },
    CatalogQuery {
        key: "q23",
        title: "Close Matches (Low Wickets)",
        sql: "SELECT match_id, team1, team2, COUNT(*) AS innings_with_low_wickets FROM (SELECT m.match_id, m.team1, m.team2 FROM matches m JOIN scorecards s ON m.match_id = s.match_id WHERE s.wickets < 3) GROUP BY match_id, team1, team2 LIMIT 30;",
    },
    CatalogQuery {
        key: "q24",
        title: "Teams Performance",
        sql: "SELECT team1, COUNT(*) AS team1_matches FROM matches GROUP BY team1 UNION SELECT team2, COUNT(*) AS team2_matches FROM matches GROUP BY team2 ORDER BY 2 DESC;",
    },
    CatalogQuery {
        key: "q25",
        title: "Complete Match Overview",
        sql: "SELECT m.match_id, m.series_name, m.team1, m.team2, m.match_format, m.venue_city, COUNT(s.innings_id) AS total_innings, SUM(s.runs) AS total_runs FROM matches m LEFT JOIN scorecards s ON m.match_id = s.match_id GROUP BY m.match_id ORDER BY m.match_id DESC LIMIT 30;",
    },
];

/// Look up a catalog query by key (`q3`), number (`3`) or title, ignoring case
pub fn find_query(name: &str) -> Result<&'static CatalogQuery> {
    let needle = name.trim().to_lowercase();
    let as_key = if needle.chars().all(|c| c.is_ascii_digit()) {
        format!("q{}", needle)
    } else {
        needle.clone()
    };

    QUERY_CATALOG
        .iter()
        .find(|q| q.key == as_key || q.title.to_lowercase() == needle)
        .ok_or_else(|| CricketError::UnknownQuery {
            name: name.to_string(),
        })
}

/// Run a catalog statement and time it
pub fn run_catalog_query(db: &CricketDatabase, query: &CatalogQuery) -> Result<TimedResult> {
    log::debug!("running catalog query {} ({})", query.key, query.title);
    run_ad_hoc(db, query.sql)
}

/// Run operator-supplied SQL as-is and time it
pub fn run_ad_hoc(db: &CricketDatabase, sql: &str) -> Result<TimedResult> {
    let started = Instant::now();
    let result = db.run_query(sql)?;
    Ok(TimedResult {
        result,
        elapsed: started.elapsed(),
    })
}
