mod assistant;
mod cli;
mod config;
mod db;
mod geo;
mod ledger;
mod models;
mod prayer_times;
mod share;
mod status;
mod tui;
mod utils;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::PrefsRepo;
use geo::locate::ReverseGeocoder;
use models::District;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Setup) => {
            let current = startup_district(&conn, &config)?;
            handlers::handle_setup(&conn, &config, current)?;
        }
        Some(Commands::Times { day, district }) => {
            handlers::handle_times(&conn, &config, day, district.as_deref())?;
        }
        Some(Commands::Calendar { district }) => {
            handlers::handle_calendar(&conn, &config, district.as_deref())?;
        }
        Some(Commands::Status) => {
            let district = startup_district(&conn, &config)?;
            handlers::handle_status(&config, &district)?;
        }
        Some(Commands::District { action }) => {
            handlers::handle_district(&conn, &config, &action)?;
        }
        Some(Commands::Donate { name, amount, cause, payment, image }) => {
            handlers::handle_donate(
                &conn,
                &name,
                &amount,
                cause.as_deref(),
                payment.as_deref(),
                image.as_deref(),
            )?;
        }
        Some(Commands::Donations) => {
            handlers::handle_donations(&conn, &config)?;
        }
        Some(Commands::Card { kind }) => {
            let district = startup_district(&conn, &config)?;
            handlers::handle_card(&conn, &config, &district, &kind)?;
        }
        Some(Commands::Quote) => {
            handlers::handle_quote(&conn, &config)?;
        }
        Some(Commands::Ask { question }) => {
            handlers::handle_ask(&config, &question)?;
        }
        Some(Commands::Chat { admin }) => {
            handlers::handle_chat(&config, admin)?;
        }
        Some(Commands::Theme { name }) => {
            handlers::handle_theme(&conn, name.as_deref())?;
        }

        // No subcommand → launch TUI
        None => {
            let district = startup_district(&conn, &config)?;
            tui::app::run(conn, config, district)?;
        }
    }

    Ok(())
}

/// Saved district if there is one. Otherwise try the configured coordinates
/// once, and fall back to Dhaka. A failed lookup is only logged.
fn startup_district(conn: &Connection, config: &AppConfig) -> Result<District> {
    if let Some(saved) = PrefsRepo::district(conn)? {
        return Ok(saved);
    }

    let location = &config.location;
    if let (true, Some(lat), Some(lon)) = (location.auto_locate, location.latitude, location.longitude) {
        let geocoder = ReverseGeocoder::new(
            &location.reverse_geocode_url,
            Duration::from_secs(location.timeout_secs),
        );
        match geocoder.locate(lat, lon) {
            Ok(district) => {
                log::info!("Located district {}", district.name);
                PrefsRepo::set_district(conn, &district)?;
                return Ok(district);
            }
            Err(e) => log::warn!("Auto-locate failed: {}", e),
        }
    }

    Ok(geo::default_district())
}
