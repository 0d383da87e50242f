//! Match configuration.

use crate::board::{MAX_DIMENSION, MIN_DIMENSION};
use crate::error::InvalidConfig;
use crate::policy::Difficulty;
use crate::types::PlayerId;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Who supplies a player's moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Seat {
    /// Moves arrive as input events.
    #[default]
    Human,
    /// Moves come from the match's difficulty policy.
    Bot,
}

/// Settings fixed for one match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Round wins needed to take the match.
    win_threshold: u32,

    /// Game time the bot waits before playing, in milliseconds.
    bot_delay_ms: u64,

    /// Smallest generated board dimension.
    min_dimension: usize,

    /// Largest generated board dimension.
    max_dimension: usize,

    /// Opponent strength.
    difficulty: Difficulty,

    /// Seat of the first and second player.
    seats: [Seat; 2],

    /// Seed for the match's random source; entropy when absent.
    seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            win_threshold: 3,
            bot_delay_ms: 500,
            min_dimension: MIN_DIMENSION,
            max_dimension: MAX_DIMENSION,
            difficulty: Difficulty::default(),
            seats: [Seat::Human, Seat::Bot],
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Creates the default configuration (human vs medium bot, first to 3).
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Player 1 vs Player 2, both human.
    #[instrument]
    pub fn versus_human() -> Self {
        Self::default().with_seats([Seat::Human, Seat::Human])
    }

    /// Player 1 vs a bot of the given strength.
    #[instrument]
    pub fn versus_bot(difficulty: Difficulty) -> Self {
        Self::default().with_difficulty(difficulty)
    }

    /// Sets the seats.
    pub fn with_seats(mut self, seats: [Seat; 2]) -> Self {
        self.seats = seats;
        self
    }

    /// Sets the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the win threshold (at least 1).
    pub fn with_win_threshold(mut self, win_threshold: u32) -> Self {
        self.win_threshold = win_threshold.max(1);
        self
    }

    /// Sets the bot delay.
    pub fn with_bot_delay(mut self, delay: Duration) -> Self {
        self.bot_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the board dimension range, clamped into `[7, 11]`.
    pub fn with_dimensions(mut self, min: usize, max: usize) -> Self {
        let min = min.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self.min_dimension = min;
        self.max_dimension = max.clamp(min, MAX_DIMENSION);
        self
    }

    /// Rejects settings that deserialization let through unclamped.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let allowed = MIN_DIMENSION..=MAX_DIMENSION;
        if self.min_dimension > self.max_dimension
            || !allowed.contains(&self.min_dimension)
            || !allowed.contains(&self.max_dimension)
        {
            return Err(InvalidConfig::DimensionRange {
                min: self.min_dimension,
                max: self.max_dimension,
                min_allowed: MIN_DIMENSION,
                max_allowed: MAX_DIMENSION,
            });
        }
        if self.win_threshold == 0 {
            return Err(InvalidConfig::ZeroWinThreshold);
        }
        Ok(())
    }

    /// The bot delay as a duration.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// The seat of `player`.
    pub fn seat(&self, player: PlayerId) -> Seat {
        self.seats[player.index()]
    }
}
