//! Geratrix - terminal shell around `geratrix_core`
//!
//! The core crate holds the game; this crate adds what a playable program
//! needs around it.
//!
//! # Architecture
//!
//! - **Config**: TOML match settings with command-line overrides
//! - **Input**: text commands mapped to round inputs
//! - **Display**: plain-text scoreboard, grid and prompts
//! - **Orchestrator**: 60 Hz frame clock feeding the match and notifying the UI
//! - **Simulate**: seeded bot-vs-bot batches with aggregate statistics
//!
//! # Example
//!
//! ```
//! use geratrix::{simulate, Difficulty, MatchConfig};
//!
//! let report = simulate(&MatchConfig::versus_bot(Difficulty::Easy), 2, 1);
//! assert_eq!(report.match_wins[0] + report.match_wins[1], 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod display;
mod input;
mod orchestrator;
mod simulate;

// Crate-level exports - Configuration
pub use config::{ConfigError, ConfigOverrides, load_config};

// Crate-level exports - Terminal shell
pub use display::{player_label, render};
pub use input::{InputError, parse_line};
pub use orchestrator::{FRAME_INTERVAL, GameEvent, Orchestrator};

// Crate-level exports - Simulation
pub use simulate::{SimulationReport, simulate};

// Crate-level exports - Game core
pub use geratrix_core::{
    Board, Difficulty, InputEvent, Match, MatchConfig, MatchScore, MatchStatus, PlayerId,
    Position, RULES, Round, RoundPhase, RoundResult, Seat,
};
