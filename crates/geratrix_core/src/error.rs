//! Error types for the game engine.
//!
//! None of these are fatal. The step loop absorbs them as no-ops; the direct
//! entry points return them so callers can tell why an input was ignored.

use crate::types::{PlayerId, Position};

/// Explicit board construction failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// A dimension falls outside the playable range.
    #[display("Board dimensions {rows}x{cols} outside {min}..={max}")]
    InvalidDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
        /// Smallest allowed dimension.
        min: usize,
        /// Largest allowed dimension.
        max: usize,
    },
}

/// A start position was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// The first player may not start on the exact center.
    #[display("Cannot start on the center cell {}", _0)]
    CenterForbidden(Position),

    /// The position lies outside the board.
    #[display("Position {} is off the board", _0)]
    OutOfBounds(Position),

    /// The cell is already claimed.
    #[display("Position {} is already occupied", _0)]
    Occupied(Position),

    /// The round is not waiting for a start position.
    #[display("Round is not awaiting placement")]
    NotPlacing,

    /// Another player is placing right now.
    #[display("It's not {}'s placement", _0)]
    WrongPlayer(PlayerId),
}

impl std::error::Error for PlacementError {}

/// A move input was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The round is not in its turn phase.
    #[display("Round is not in progress")]
    NotInProgress,

    /// Turn processing is suspended.
    #[display("Round is paused")]
    Paused,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(PlayerId),

    /// Bot seats take their turns from the policy, not from input.
    #[display("{} is played by the computer", _0)]
    BotSeat(PlayerId),

    /// The destination is off the board or already claimed.
    #[display("Cannot move onto {:?}", _0)]
    Illegal(Option<Position>),
}

impl std::error::Error for MoveError {}

/// A match-level request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatchError {
    /// Difficulty is fixed once the first round has started.
    #[display("Difficulty is fixed once the match has started")]
    DifficultyLocked,

    /// The match already has a winner or was abandoned.
    #[display("Match is over")]
    MatchOver,

    /// No round is being played.
    #[display("No active round")]
    NoActiveRound,

    /// A round is still being played.
    #[display("A round is already in progress")]
    RoundInProgress,
}

/// A match configuration that cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidConfig {
    /// The dimension range is inverted or leaves `[min_allowed, max_allowed]`.
    #[display("Dimension range {min}..={max} must lie within {min_allowed}..={max_allowed}")]
    DimensionRange {
        /// Configured smallest dimension.
        min: usize,
        /// Configured largest dimension.
        max: usize,
        /// Smallest playable dimension.
        min_allowed: usize,
        /// Largest playable dimension.
        max_allowed: usize,
    },

    /// A match needs at least one round win to finish.
    #[display("Win threshold must be at least 1")]
    ZeroWinThreshold,
}
