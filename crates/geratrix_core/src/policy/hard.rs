//! Hard tier: a weighted one-ply heuristic.
//!
//! Each candidate is scored on a hypothetical board where the mover has
//! stepped onto it:
//!
//! | term            | measure                                         | weight |
//! |-----------------|-------------------------------------------------|--------|
//! | self mobility   | legal steps from the candidate, or a penalty    | 1.0    |
//! | containment     | minus the opponent's legal steps                | 0.7    |
//! | territory       | empty cells still reachable from the candidate  | 0.5    |
//! | mirroring       | candidate repeats the opponent's last step, negated | 0.3 × 5.0 |
//!
//! The self-trap penalty outweighs every other term combined on any legal
//! board, so a move leaving zero exits is only played when nothing else is
//! available.

use super::medium::MediumPolicy;
use super::{MovePolicy, PolicyContext};
use crate::reachability::territory;
use crate::types::{PlayerId, Position};
use rand::Rng;
use tracing::{debug, instrument, trace};

/// Coefficients of the hard tier's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardWeights {
    /// Weight on the mover's own exits after the move.
    pub self_mobility: f64,
    /// Score used in place of own exits when there are none.
    pub self_trap_penalty: f64,
    /// Weight on the negated opponent exit count.
    pub containment: f64,
    /// Weight on reachable territory.
    pub territory: f64,
    /// Weight on the mirroring bonus.
    pub mirroring: f64,
    /// Bonus unit awarded when the candidate mirrors the opponent.
    pub mirror_bonus: f64,
}

impl Default for HardWeights {
    fn default() -> Self {
        Self {
            self_mobility: 1.0,
            self_trap_penalty: -1000.0,
            containment: 0.7,
            territory: 0.5,
            mirroring: 0.3,
            mirror_bonus: 5.0,
        }
    }
}

/// Weighted heuristic over the legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardPolicy {
    weights: HardWeights,
}

impl HardPolicy {
    /// Creates a policy with custom weights.
    pub fn with_weights(weights: HardWeights) -> Self {
        Self { weights }
    }

    /// The cell reached by undoing the opponent's last step from the mover's
    /// cell, if it is on the board and empty.
    pub fn mirror_target(ctx: &PolicyContext<'_>) -> Option<Position> {
        let delta = ctx.last_opponent_delta?;
        ctx.own
            .offset(delta.negate())
            .filter(|&target| ctx.board.is_legal(target))
    }

    /// Scores one legal candidate.
    #[instrument(skip(self, ctx))]
    pub fn score(
        &self,
        ctx: &PolicyContext<'_>,
        candidate: Position,
        mirror_target: Option<Position>,
    ) -> f64 {
        let w = &self.weights;
        let mut hypothetical = ctx.board.clone();
        hypothetical.apply_move(candidate, PlayerId::Second);

        let own_exits = hypothetical.mobility(candidate);
        let self_term = if own_exits == 0 {
            w.self_trap_penalty
        } else {
            own_exits as f64
        };
        let opponent_exits = hypothetical.mobility(ctx.opponent);
        let reach = territory(&hypothetical, candidate);
        let mirrored = mirror_target == Some(candidate);

        let mut score = w.self_mobility * self_term;
        score += w.containment * -(opponent_exits as f64);
        score += w.territory * reach as f64;
        if mirrored {
            score += w.mirroring * w.mirror_bonus;
        }
        trace!(own_exits, opponent_exits, reach, mirrored, score, "Scored candidate");
        score
    }
}

impl MovePolicy for HardPolicy {
    fn choose_move<R: Rng + ?Sized>(
        &self,
        ctx: &PolicyContext<'_>,
        rng: &mut R,
    ) -> Option<Position> {
        let candidates = ctx.legal_moves();
        if candidates.is_empty() {
            return None;
        }
        let mirror_target = Self::mirror_target(ctx);

        let mut best: Option<(Position, f64)> = None;
        for candidate in candidates {
            let score = self.score(ctx, candidate, mirror_target);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((chosen, score)) => {
                debug!(%chosen, score, "Hard policy chose");
                Some(chosen)
            }
            // Unreachable with a non-empty candidate list; kept as a safety net.
            None => MediumPolicy.choose_move(ctx, rng),
        }
    }
}
