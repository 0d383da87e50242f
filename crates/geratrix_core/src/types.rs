//! Core domain types for geratrix.

use serde::{Deserialize, Serialize};

/// One of the two players in a round.
///
/// Identity is stable for the whole match; only turn ownership alternates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum PlayerId {
    /// Player 1 (places first, conventionally the human).
    First,
    /// Player 2 (starts on the mirrored cell, conventionally the bot).
    Second,
}

impl PlayerId {
    /// Both players, in seat order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    /// Index into per-player arrays (`0` for first, `1` for second).
    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has stood here yet.
    Empty,
    /// Claimed territory; never reverts to empty within a round.
    Owned(PlayerId),
}

impl Cell {
    /// Returns true if the cell is unclaimed.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A `(row, col)` coordinate.
///
/// Positions carry no bounds of their own; they are checked against the
/// board that consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based row, top to bottom.
    pub row: usize,
    /// Zero-based column, left to right.
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell one step away in `direction`, or `None` when that would
    /// leave the non-negative quadrant. Upper bounds are the board's concern.
    pub fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction.delta())
    }

    /// Applies an arbitrary delta, `None` on underflow.
    pub fn offset(self, delta: Delta) -> Option<Self> {
        let row = self.row.checked_add_signed(delta.d_row)?;
        let col = self.col.checked_add_signed(delta.d_col)?;
        Some(Self { row, col })
    }

    /// The movement vector from `self` to `to`.
    pub fn delta_to(self, to: Position) -> Delta {
        Delta {
            d_row: to.row as isize - self.row as isize,
            d_col: to.col as isize - self.col as isize,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A movement vector `(dRow, dCol)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    /// Row change.
    pub d_row: isize,
    /// Column change.
    pub d_col: isize,
}

impl Delta {
    /// Creates a new delta.
    pub const fn new(d_row: isize, d_col: isize) -> Self {
        Self { d_row, d_col }
    }

    /// The opposite vector.
    pub fn negate(self) -> Self {
        Self {
            d_row: -self.d_row,
            d_col: -self.d_col,
        }
    }
}

/// An orthogonal step.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// Row - 1.
    Up,
    /// Row + 1.
    Down,
    /// Col - 1.
    Left,
    /// Col + 1.
    Right,
}

impl Direction {
    /// Every direction in neighbour-enumeration order.
    ///
    /// The order is load-bearing: the easy policy, tie-breaking in the greedy
    /// policies and the termination check all walk it in this sequence.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The unit vector of this direction.
    pub fn delta(self) -> Delta {
        match self {
            Direction::Up => Delta::new(-1, 0),
            Direction::Down => Delta::new(1, 0),
            Direction::Left => Delta::new(0, -1),
            Direction::Right => Delta::new(0, 1),
        }
    }
}
