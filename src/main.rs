//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use cricket_stats::{
    cli::{AnalyticsCmd, Commands, CricketStats, CrudCmd, DbCmd, LiveCmd, PlayersCmd},
    commands::{
        analytics::{handle_analytics_list, handle_analytics_run, QuerySource},
        crud::{
            handle_crud_create, handle_crud_delete, handle_crud_list, handle_crud_next_id,
            handle_crud_read, handle_crud_update,
        },
        db::{handle_db_init, handle_db_wipe},
        live::{handle_live_list, handle_live_show, handle_live_sync},
        overview::handle_overview,
        players::{
            handle_players_career, handle_players_clear, handle_players_import,
            handle_players_profile, handle_players_search, CareerKind,
        },
    },
    core::config::AppConfig,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = CricketStats::parse();

    let default_level = if app.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = AppConfig::from_env(app.db).context("Failed to resolve configuration")?;
    log::debug!("using database {}", config.database_path.display());

    match app.command {
        Commands::Overview => handle_overview(&config).context("Overview failed")?,

        Commands::Db { cmd } => match cmd {
            DbCmd::Init => handle_db_init(&config).context("Database init failed")?,
            DbCmd::Wipe { yes } => {
                handle_db_wipe(&config, yes).context("Database wipe failed")?
            }
        },

        Commands::Live { cmd } => match cmd {
            LiveCmd::List => handle_live_list(&config)
                .await
                .context("Failed to fetch live matches")?,
            LiveCmd::Show { match_id, full } => handle_live_show(&config, match_id, full)
                .await
                .with_context(|| format!("Failed to show match {}", match_id))?,
            LiveCmd::Sync => handle_live_sync(&config).await.context("Sync failed")?,
        },

        Commands::Players { cmd } => match cmd {
            PlayersCmd::Search { query } => handle_players_search(&config, &query)
                .await
                .context("Player search failed")?,
            PlayersCmd::Profile { player_id } => handle_players_profile(&config, player_id)
                .await
                .context("Failed to load player profile")?,
            PlayersCmd::Batting { player_id } => {
                handle_players_career(&config, player_id, CareerKind::Batting)
                    .await
                    .context("Failed to load batting stats")?
            }
            PlayersCmd::Bowling { player_id } => {
                handle_players_career(&config, player_id, CareerKind::Bowling)
                    .await
                    .context("Failed to load bowling stats")?
            }
            PlayersCmd::Import { team_id, country } => {
                handle_players_import(&config, team_id, &country)
                    .await
                    .context("Import failed")?
            }
            PlayersCmd::Clear { yes } => {
                handle_players_clear(&config, yes).context("Failed to clear players")?
            }
        },

        Commands::Analytics { cmd } => match cmd {
            AnalyticsCmd::List => handle_analytics_list()?,
            AnalyticsCmd::Run {
                name,
                sql,
                json,
                csv,
            } => {
                let source = match (sql, name) {
                    (Some(sql), _) => QuerySource::AdHoc(sql),
                    (None, Some(name)) => QuerySource::Named(name),
                    (None, None) => anyhow::bail!("Give a query name or --sql"),
                };
                handle_analytics_run(&config, source, json, csv.as_deref())
                    .context("Query failed")?
            }
        },

        Commands::Crud { cmd } => match cmd {
            CrudCmd::NextId => handle_crud_next_id(&config)?,
            CrudCmd::List { filter, json } => {
                handle_crud_list(&config, filter.as_deref(), json).context("Read failed")?
            }
            CrudCmd::Read { player_id } => {
                handle_crud_read(&config, player_id).context("Read failed")?
            }
            CrudCmd::Create { id, name, fields } => {
                handle_crud_create(&config, id, &name, fields).context("Create failed")?
            }
            CrudCmd::Update {
                player_id,
                name,
                fields,
            } => handle_crud_update(&config, player_id, name, fields).context("Update failed")?,
            CrudCmd::Delete { player_id, yes } => {
                handle_crud_delete(&config, player_id, yes).context("Delete failed")?
            }
        },
    }

    Ok(())
}
