//! Path invariants: a player's trail is exactly their claimed territory.

use super::Invariant;
use crate::board::Board;
use crate::round::Round;
use crate::types::{Cell, PlayerId};

/// Every cell on a player's path is owned by them, and they own nothing else.
///
/// Together with monotonic claiming this means cells are never vacated.
pub struct PathOwnedInvariant;

impl Invariant<Round> for PathOwnedInvariant {
    fn holds(round: &Round) -> bool {
        PlayerId::BOTH.into_iter().all(|player| {
            let path = round.path(player);
            path.iter()
                .all(|&pos| round.board().get(pos) == Some(Cell::Owned(player)))
                && round.board().owned_by(player) == path.len()
        })
    }

    fn description() -> &'static str {
        "Each player owns exactly the cells on their path"
    }
}

/// Consecutive path cells are orthogonal neighbours.
pub struct PathContiguousInvariant;

impl Invariant<Round> for PathContiguousInvariant {
    fn holds(round: &Round) -> bool {
        PlayerId::BOTH.into_iter().all(|player| {
            round
                .path(player)
                .windows(2)
                .all(|pair| Board::neighbors(pair[0]).contains(&Some(pair[1])))
        })
    }

    fn description() -> &'static str {
        "Players move one orthogonal step at a time"
    }
}

/// A player's current position is the last cell of their path.
pub struct PositionAtPathEndInvariant;

impl Invariant<Round> for PositionAtPathEndInvariant {
    fn holds(round: &Round) -> bool {
        PlayerId::BOTH
            .into_iter()
            .all(|player| round.position(player) == round.path(player).last().copied())
    }

    fn description() -> &'static str {
        "Current position is the end of the path"
    }
}
