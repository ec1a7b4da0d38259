//! Slide Puzzle - timed three-level sliding tile puzzle
//!
//! Hosts the [`slide_puzzle_engine`] state machine behind two frontends.
//!
//! # Architecture
//!
//! - **Driver**: a tokio task owning the engine, fed by a command queue
//! - **Server**: JSON HTTP API over the driver (axum)
//! - **TUI**: terminal frontend over the driver (ratatui)
//! - **Config**: TOML settings for seeds and bonuses
//!
//! # Example
//!
//! ```no_run
//! use slide_puzzle::{AppConfig, TracingHost, spawn_engine};
//! use slide_puzzle_engine::Level;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let (engine, _task) = spawn_engine(Box::new(TracingHost), config.engine_options());
//! let state = engine.start_game(Level::One, true).await?;
//! assert_eq!(state.time_remaining, 240);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod driver;
mod host;
mod server;
pub mod tui;

pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use driver::{
    EngineCommand, EngineHandle, EngineStopped, MoveReply, TICK_PERIOD, TokioTickScheduler,
    spawn_engine, spawn_engine_with_period,
};
pub use host::TracingHost;
pub use server::{ApiError, MoveRequest, StartRequest, router, serve};
