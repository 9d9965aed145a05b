//! Common utilities and helper functions shared across commands.

use std::io::{self, BufRead, Write};

use crate::{
    core::config::AppConfig,
    cricbuzz::CricbuzzClient,
    storage::{Player, QueryResult},
    Result,
};

/// Placeholder printed for missing values
pub const MISSING: &str = "-";

/// Build an API client from the configured credentials.
/// Fails with [`crate::CricketError::MissingApiKey`] when no key is set.
pub fn api_client(config: &AppConfig) -> Result<CricbuzzClient> {
    CricbuzzClient::new(config.require_api()?)
}

/// Log a failed best-effort save and carry on.
///
/// Viewing a match or profile also stores it; a failure there must not stop
/// the data from being shown.
pub fn report_auto_sync<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => {
            log::debug!("auto-saved {}", what);
            Some(value)
        }
        Err(e) => {
            log::warn!("could not save {}: {}", what, e);
            None
        }
    }
}

/// Ask the operator to type `yes`. Anything else declines.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, mut input: R, mut output: W) -> Result<bool> {
    write!(output, "{} Type 'yes' to continue: ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

/// `true` straight away when `--yes` was given, otherwise prompt on stdin
pub fn confirmed(skip_prompt: bool, prompt: &str) -> Result<bool> {
    if skip_prompt {
        return Ok(true);
    }
    confirm(prompt, io::stdin().lock(), io::stdout())
}

/// Text of an optional field, or [`MISSING`]
pub fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

/// Render rows as a left-aligned text table with a dashed rule under the header
pub fn render_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.iter().map(|h| h.as_ref()).collect()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

/// Render a query result; `NULL` cells print empty
pub fn render_query_result(result: &QueryResult) -> String {
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    render_table(&result.columns, &rows)
}

/// Render players as a table
pub fn render_players(players: &[Player]) -> String {
    let headers = [
        "ID",
        "Name",
        "Country",
        "Role",
        "Batting Style",
        "Bowling Style",
    ];
    let rows: Vec<Vec<String>> = players
        .iter()
        .map(|p| {
            vec![
                p.player_id.to_string(),
                p.name.clone(),
                or_missing(p.country.as_deref()).to_string(),
                or_missing(p.role.as_deref()).to_string(),
                or_missing(p.batting_style.as_deref()).to_string(),
                or_missing(p.bowling_style.as_deref()).to_string(),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CricketError, PlayerId};
    use std::io::Cursor;

    #[test]
    fn test_confirm_accepts_yes_only() {
        let mut out = Vec::new();
        assert!(confirm("Delete?", Cursor::new("yes\n"), &mut out).unwrap());
        assert!(confirm("Delete?", Cursor::new("  YES \n"), &mut out).unwrap());
        assert!(!confirm("Delete?", Cursor::new("y\n"), &mut out).unwrap());
        assert!(!confirm("Delete?", Cursor::new(""), &mut out).unwrap());

        let prompt = String::from_utf8(out).unwrap();
        assert!(prompt.starts_with("Delete? Type 'yes' to continue: "));
    }

    #[test]
    fn test_confirmed_skips_prompt() {
        assert!(confirmed(true, "unused").unwrap());
    }

    #[test]
    fn test_report_auto_sync() {
        assert_eq!(report_auto_sync("match", Ok(3)), Some(3));
        let failed: Result<i32> = Err(CricketError::NoPlayers);
        assert_eq!(report_auto_sync("roster", failed), None);
    }

    #[test]
    fn test_or_missing() {
        assert_eq!(or_missing(Some("India")), "India");
        assert_eq!(or_missing(Some("  ")), MISSING);
        assert_eq!(or_missing(None), MISSING);
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &["ID", "Name"],
            &[
                vec!["1".to_string(), "Virat Kohli".to_string()],
                vec!["1413".to_string(), "X".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID    Name");
        assert_eq!(lines[1], "----  -----------");
        assert_eq!(lines[2], "1     Virat Kohli");
        assert_eq!(lines[3], "1413  X");
    }

    #[test]
    fn test_render_players_shows_missing_fields() {
        let table = render_players(&[Player::new(PlayerId::new(7), "MS Dhoni")]);
        let last = table.lines().last().unwrap();
        assert!(last.starts_with("7   MS Dhoni"));
        assert!(last.ends_with('-'));
    }
}
