//! Analytics commands: the query catalog and ad hoc SQL

use std::{io::Write, path::Path};

use crate::{
    core::config::AppConfig,
    storage::{
        find_query, run_ad_hoc, run_catalog_query, QueryResult, TimedResult, QUERY_CATALOG,
    },
    Result,
};

use super::common::{render_query_result, render_table};

/// What `analytics run` should execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    Named(String),
    AdHoc(String),
}

/// Print the catalog
pub fn handle_analytics_list() -> Result<()> {
    let rows: Vec<Vec<String>> = QUERY_CATALOG
        .iter()
        .map(|q| vec![q.key.to_uppercase(), q.title.to_string()])
        .collect();
    print!("{}", render_table(&["Key", "Query"], &rows));
    Ok(())
}

/// Run a named or ad hoc query, print it and optionally export it as CSV
pub fn handle_analytics_run(
    config: &AppConfig,
    source: QuerySource,
    as_json: bool,
    csv_path: Option<&Path>,
) -> Result<()> {
    let db = config.open_database()?;

    let (heading, timed) = match &source {
        QuerySource::Named(name) => {
            let query = find_query(name)?;
            (
                format!("{} - {}", query.key.to_uppercase(), query.title),
                run_catalog_query(&db, query)?,
            )
        }
        QuerySource::AdHoc(sql) => ("Custom query".to_string(), run_ad_hoc(&db, sql)?),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&timed.result.to_records())?);
    } else {
        println!("{}", heading);
        println!();
        print!("{}", format_timed(&timed));
    }

    if let Some(path) = csv_path {
        export_csv(&timed.result, path)?;
        println!("✓ Wrote {} rows to {}", timed.result.len(), path.display());
    }

    Ok(())
}

/// Table followed by row count and execution time
pub fn format_timed(timed: &TimedResult) -> String {
    let mut out = if timed.result.is_empty() {
        "No results found.\n".to_string()
    } else {
        render_query_result(&timed.result)
    };
    out.push_str(&format!(
        "\n{} rows in {:.2} ms\n",
        timed.result.len(),
        timed.elapsed.as_secs_f64() * 1000.0
    ));
    out
}

/// Write the header and rows of `result` as CSV
pub fn write_csv<W: Write>(result: &QueryResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&result.columns)?;
    for row in &result.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `result` to a CSV file, creating parent directories as needed
pub fn export_csv(result: &QueryResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_csv(result, file)
}
