//! Command-line interface for geratrix.

use clap::{Parser, Subcommand};
use geratrix_core::Difficulty;

/// Geratrix - claim the grid, trap your opponent
#[derive(Parser, Debug)]
#[command(name = "geratrix")]
#[command(about = "Two-player grid pursuit game with computer opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Path to match configuration file
        #[arg(short, long, default_value = "geratrix.toml")]
        config: std::path::PathBuf,

        /// Bot strength (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Two humans sharing the keyboard instead of a bot
        #[arg(long)]
        two_players: bool,

        /// Seed for boards and bot choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run bot-vs-bot matches and print statistics
    Simulate {
        /// Path to match configuration file
        #[arg(short, long, default_value = "geratrix.toml")]
        config: std::path::PathBuf,

        /// Bot strength (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Number of matches
        #[arg(short = 'n', long, default_value = "100")]
        matches: u32,

        /// Seed of the first match; match i uses seed + i
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the rules
    Rules,
}
