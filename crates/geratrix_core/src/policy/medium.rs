//! Medium tier: greedy on territory most of the time, random otherwise.

use super::{MovePolicy, PolicyContext};
use crate::reachability::territory;
use crate::types::{PlayerId, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Chance that the medium tier plays its greedy move.
///
/// The remaining 34% pick uniformly among legal moves. The mixture keeps the
/// tier beatable and must stay as is.
pub const GREEDY_PROBABILITY: f64 = 0.66;

/// Greedy/random mixture over the legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediumPolicy;

impl MediumPolicy {
    /// The greedy half on its own: the move leaving the most reachable
    /// territory, first in neighbour order on ties.
    pub fn greedy(ctx: &PolicyContext<'_>, candidates: &[Position]) -> Option<Position> {
        let mut best: Option<(Position, usize)> = None;
        for &candidate in candidates {
            let mut hypothetical = ctx.board.clone();
            // Ownership is irrelevant to reachability; the second seat is
            // the conventional bot.
            hypothetical.apply_move(candidate, PlayerId::Second);
            let score = territory(&hypothetical, candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best.map(|(pos, _)| pos)
    }
}

impl MovePolicy for MediumPolicy {
    fn choose_move<R: Rng + ?Sized>(
        &self,
        ctx: &PolicyContext<'_>,
        rng: &mut R,
    ) -> Option<Position> {
        let candidates = ctx.legal_moves();
        if candidates.is_empty() {
            return None;
        }
        if rng.random_bool(GREEDY_PROBABILITY) {
            let chosen = Self::greedy(ctx, &candidates);
            debug!(?chosen, "Medium policy played greedy");
            chosen
        } else {
            let chosen = candidates.choose(rng).copied();
            debug!(?chosen, "Medium policy played random");
            chosen
        }
    }
}
