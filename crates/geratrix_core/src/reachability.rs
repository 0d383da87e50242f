//! Flood-fill reachability over empty cells.
//!
//! Both functions are pure: they read a (possibly hypothetical) board and
//! keep their own visited set, never touching the board itself.

use crate::board::Board;
use crate::types::Position;
use std::collections::VecDeque;
use tracing::instrument;

/// Counts empty cells orthogonally connected to `start`, including `start`.
///
/// Returns 0 if `start` is off the board or already claimed.
#[instrument(skip(board))]
pub fn count_reachable(board: &Board, start: Position) -> usize {
    if !board.is_legal(start) {
        return 0;
    }
    flood(board, start, true)
}

/// Counts empty cells a player standing on `from` could still walk to.
///
/// `from` itself is never counted and may be claimed, which is exactly the
/// situation after a hypothetical move onto it.
#[instrument(skip(board))]
pub fn territory(board: &Board, from: Position) -> usize {
    if !board.in_bounds(from) {
        return 0;
    }
    flood(board, from, false)
}

fn flood(board: &Board, start: Position, count_start: bool) -> usize {
    let mut visited = vec![false; board.rows() * board.cols()];
    let mut queue = VecDeque::new();

    visited[start.row * board.cols() + start.col] = true;
    queue.push_back(start);
    let mut count = 0;

    while let Some(pos) = queue.pop_front() {
        if pos != start || count_start {
            count += 1;
        }
        for next in Board::neighbors(pos).into_iter().flatten() {
            if !board.is_legal(next) {
                continue;
            }
            let i = next.row * board.cols() + next.col;
            if visited[i] {
                continue;
            }
            visited[i] = true;
            queue.push_back(next);
        }
    }

    count
}
