//! Slide Puzzle - Unified CLI
//!
//! Terminal game, HTTP API, and level listing.

use anyhow::Result;
use clap::Parser;
use slide_puzzle::{AppConfig, Cli, Command, TracingHost, serve, spawn_engine, tui};
use slide_puzzle_engine::Level;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_seed(cli.seed);

    match cli.command {
        Command::Play { level } => run_play(config, level).await,
        Command::Serve { port, host } => run_serve(config, host, port).await,
        Command::Levels => run_levels(),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to a file so output does not tear the terminal UI.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Run the terminal game
async fn run_play(config: AppConfig, level: u8) -> Result<()> {
    init_file_tracing(config.log_file())?;
    let level = Level::try_from(level)?;
    let (engine, _task) = spawn_engine(Box::new(TracingHost), config.engine_options());
    tui::run_tui(engine, level).await
}

/// Run the HTTP game server
#[instrument(skip(config))]
async fn run_serve(config: AppConfig, host: String, port: u16) -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    info!(seed = ?config.seed(), "Starting slide puzzle HTTP server");
    let (engine, _task) = spawn_engine(Box::new(TracingHost), config.engine_options());
    serve(engine, &host, port).await
}

/// Print the level table
fn run_levels() -> Result<()> {
    println!("{:<6} {:<18} {:>5} {:>7}  asset", "level", "name", "size", "limit");
    for level in Level::iter() {
        let config = level.config();
        println!(
            "{:<6} {:<18} {:>5} {:>7}  {}",
            config.level(),
            config.display_name(),
            format!("{0}x{0}", config.size()),
            format!(
                "{}:{:02}",
                config.time_limit_seconds() / 60,
                config.time_limit_seconds() % 60
            ),
            config.asset_ref()
        );
    }
    Ok(())
}
