//! Geratrix core - pure game logic.
//!
//! Two players each stand on one cell of a random 7-11 × 7-11 grid and take
//! turns stepping orthogonally onto unclaimed cells, claiming every cell they
//! visit. A player with no legal step loses the round; the first to win three
//! rounds wins the match.
//!
//! # Architecture
//!
//! - **Board**: grid occupancy, random generation, center and mirror cells, legality
//! - **Reachability**: flood-fill territory counting for the bots
//! - **Policies**: easy, medium and hard computer opponents
//! - **Round**: placement, turns, pause and cancellation as a step-driven state machine
//! - **Match**: score keeping up to the win threshold
//!
//! No rendering, input polling or I/O lives here. A shell feeds
//! [`InputEvent`]s and elapsed time into [`Match::step`] and draws the
//! snapshots it gets back.
//!
//! # Example
//!
//! ```
//! use geratrix_core::{Match, MatchConfig, Seat};
//! use std::time::Duration;
//!
//! let config = MatchConfig::new()
//!     .with_seats([Seat::Bot, Seat::Bot])
//!     .with_bot_delay(Duration::ZERO)
//!     .with_seed(Some(7));
//! let mut game = Match::new(config);
//! while !game.is_over() {
//!     game.new_round().unwrap();
//!     while game.step(None, Duration::ZERO).unwrap().is_none() {}
//! }
//! assert_eq!(game.score().max(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod error;
mod invariants;
mod match_controller;
mod policy;
mod reachability;
mod round;
mod rules;
mod timer;
mod types;

// Crate-level exports - Board
pub use board::{Board, MAX_DIMENSION, MIN_DIMENSION};

// Crate-level exports - Domain types
pub use types::{Cell, Delta, Direction, PlayerId, Position};

// Crate-level exports - Reachability
pub use reachability::{count_reachable, territory};

// Crate-level exports - Policies
pub use policy::{
    Difficulty, EasyPolicy, GREEDY_PROBABILITY, HardPolicy, HardWeights, MediumPolicy,
    MovePolicy, PolicyContext,
};

// Crate-level exports - Round and match state machines
pub use match_controller::{Match, MatchScore, MatchSnapshot, MatchStatus};
pub use round::{InputEvent, Round, RoundPhase, RoundResult, RoundSnapshot};
pub use timer::BotTimer;

// Crate-level exports - Invariants
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, PathContiguousInvariant, PathOwnedInvariant,
    PositionAtPathEndInvariant, RoundInvariants,
};

// Crate-level exports - Configuration, rules and errors
pub use config::{MatchConfig, Seat};
pub use error::{BoardError, InvalidConfig, MatchError, MoveError, PlacementError};
pub use rules::RULES;
