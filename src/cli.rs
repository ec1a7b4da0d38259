//! Command-line interface for slide_puzzle.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Slide Puzzle - Timed three-level sliding tile puzzle
#[derive(Parser, Debug)]
#[command(name = "slide_puzzle")]
#[command(about = "Timed sliding tile puzzle with a terminal UI and HTTP API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fixed shuffle seed (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Level to start on (1-3)
        #[arg(short, long, default_value = "1")]
        level: u8,
    },

    /// Run the HTTP game server
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Print the level table
    Levels,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["slide_puzzle", "serve"]).unwrap();
        match cli.command {
            Command::Serve { port, host } => {
                assert_eq!(port, 3000);
                assert_eq!(host, "127.0.0.1");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_play_with_globals() {
        let cli = Cli::try_parse_from([
            "slide_puzzle",
            "play",
            "--level",
            "2",
            "--seed",
            "7",
            "--config",
            "puzzle.toml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Play { level: 2 }));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.config, Some(PathBuf::from("puzzle.toml")));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
