//! Easy tier: a random legal step.

use super::{MovePolicy, PolicyContext};
use crate::types::{Direction, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Shuffles the four directions and takes the first legal one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasyPolicy;

impl MovePolicy for EasyPolicy {
    fn choose_move<R: Rng + ?Sized>(
        &self,
        ctx: &PolicyContext<'_>,
        rng: &mut R,
    ) -> Option<Position> {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        let chosen = directions
            .into_iter()
            .filter_map(|direction| ctx.own.step(direction))
            .find(|&next| ctx.board.is_legal(next));
        debug!(?chosen, "Easy policy chose");
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::PlayerId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_single_exit_is_always_taken() {
        let mut board = Board::new(7, 7).unwrap();
        let own = Position::new(0, 0);
        board.apply_move(own, PlayerId::Second);
        board.apply_move(Position::new(0, 1), PlayerId::First);
        let ctx = PolicyContext::new(&board, own, Position::new(0, 1), None);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(
                EasyPolicy.choose_move(&ctx, &mut rng),
                Some(Position::new(1, 0))
            );
        }
    }

    #[test]
    fn test_open_cell_spreads_over_all_directions() {
        let mut board = Board::new(7, 7).unwrap();
        let own = Position::new(3, 3);
        board.apply_move(own, PlayerId::Second);
        let ctx = PolicyContext::new(&board, own, Position::new(0, 0), None);
        let mut rng = StdRng::seed_from_u64(5);
        let mut counts: HashMap<Position, usize> = HashMap::new();
        let trials = 4000;
        for _ in 0..trials {
            let chosen = EasyPolicy.choose_move(&ctx, &mut rng).unwrap();
            *counts.entry(chosen).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            // Each direction expected ~1000 times.
            assert!((800..1200).contains(count), "skewed count {count}");
        }
    }
}
