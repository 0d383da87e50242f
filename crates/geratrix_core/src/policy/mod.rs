//! Computer-opponent move selection.
//!
//! Every tier is a pure decision over the current board: it reads the board,
//! the two positions and the opponent's last step, and returns the cell to
//! move to. `None` means the mover has no legal move, which the round treats
//! as the end of the round rather than as an error.
//!
//! Randomness is injected through a caller-supplied [`Rng`] so that seeded
//! generators make every tier deterministic under test.

mod easy;
mod hard;
mod medium;

pub use easy::EasyPolicy;
pub use hard::{HardPolicy, HardWeights};
pub use medium::{GREEDY_PROBABILITY, MediumPolicy};

use crate::board::Board;
use crate::types::{Delta, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What a policy gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    /// The live board (policies never mutate it).
    pub board: &'a Board,
    /// The mover's current cell.
    pub own: Position,
    /// The opponent's current cell.
    pub opponent: Position,
    /// The opponent's most recent movement vector, if known.
    pub last_opponent_delta: Option<Delta>,
}

impl<'a> PolicyContext<'a> {
    /// Creates a new context.
    pub fn new(
        board: &'a Board,
        own: Position,
        opponent: Position,
        last_opponent_delta: Option<Delta>,
    ) -> Self {
        Self {
            board,
            own,
            opponent,
            last_opponent_delta,
        }
    }

    /// Legal destinations from the mover's cell, in neighbour order.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.own)
    }
}

/// A strategy for choosing the next cell.
pub trait MovePolicy {
    /// Picks a destination, or `None` when no legal move exists.
    fn choose_move<R: Rng + ?Sized>(&self, ctx: &PolicyContext<'_>, rng: &mut R)
    -> Option<Position>;
}

/// Opponent strength, fixed for a whole match.
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
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random legal step.
    Easy,
    /// Mostly greedy on territory, sometimes random.
    #[default]
    Medium,
    /// Weighted heuristic with trap avoidance and mirroring.
    Hard,
}

impl Difficulty {
    /// Dispatches to the policy for this tier.
    #[instrument(skip(ctx, rng), fields(own = %ctx.own, opponent = %ctx.opponent))]
    pub fn choose_move<R: Rng + ?Sized>(
        self,
        ctx: &PolicyContext<'_>,
        rng: &mut R,
    ) -> Option<Position> {
        match self {
            Difficulty::Easy => EasyPolicy.choose_move(ctx, rng),
            Difficulty::Medium => MediumPolicy.choose_move(ctx, rng),
            Difficulty::Hard => HardPolicy::default().choose_move(ctx, rng),
        }
    }
}
