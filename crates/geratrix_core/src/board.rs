//! The rectangular grid of claimed and unclaimed cells.

use crate::error::BoardError;
use crate::types::{Cell, Direction, PlayerId, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Smallest rows/cols a generated board can have.
pub const MIN_DIMENSION: usize = 7;
/// Largest rows/cols a generated board can have.
pub const MAX_DIMENSION: usize = 11;

/// The playing grid.
///
/// Dimensions are fixed for the lifetime of a round and a cell, once owned,
/// is never emptied again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Generates an empty board with rows and cols each drawn uniformly
    /// from `[7, 11]`.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate_within(rng, MIN_DIMENSION, MAX_DIMENSION)
    }

    /// Generates an empty board with dimensions drawn from `[min, max]`.
    ///
    /// The range is clamped into `[7, 11]` and an inverted range collapses
    /// to `min`.
    #[instrument(skip(rng))]
    pub fn generate_within<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> Self {
        let min = min.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let max = max.clamp(min, MAX_DIMENSION);
        let rows = rng.random_range(min..=max);
        let cols = rng.random_range(min..=max);
        debug!(rows, cols, "Generated board");
        Self::empty(rows, cols)
    }

    /// Creates an empty board of an explicit size within `[7, 11]`.
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let in_range = |d: usize| (MIN_DIMENSION..=MAX_DIMENSION).contains(&d);
        if !in_range(rows) || !in_range(cols) {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            });
        }
        Ok(Self::empty(rows, cols))
    }

    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if `pos` lies on the board.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.row * self.cols + pos.col)
    }

    /// Gets the cell at `pos`, `None` when off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Iterates rows of cells, top to bottom.
    pub fn grid(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// All empty positions in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| Position::new(row, col)))
            .filter(|&pos| self.is_legal(pos))
            .collect()
    }

    /// Number of cells owned by `player`.
    pub fn owned_by(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Owned(player))
            .count()
    }

    /// The exact center cell, which exists only when both dimensions are odd.
    #[instrument(skip(self), fields(rows = self.rows, cols = self.cols))]
    pub fn center(&self) -> Option<Position> {
        (self.rows % 2 == 1 && self.cols % 2 == 1)
            .then(|| Position::new(self.rows / 2, self.cols / 2))
    }

    /// Reflects `pos` through the board's geometric center.
    ///
    /// The centroid sits at `((rows-1)/2, (cols-1)/2)`, so the reflection is
    /// `(rows-1-row, cols-1-col)`. That value is always integral, which makes
    /// the rounding step a no-op: even dimensions reflect onto the cell whose
    /// distance to the far edge equals `pos`'s distance to the near edge.
    /// Returns `None` when `pos` itself is off the board.
    #[instrument(skip(self), fields(rows = self.rows, cols = self.cols))]
    pub fn mirror(&self, pos: Position) -> Option<Position> {
        let row = (self.rows - 1).checked_sub(pos.row)?;
        let col = (self.cols - 1).checked_sub(pos.col)?;
        let mirrored = Position::new(row, col);
        self.in_bounds(mirrored).then_some(mirrored)
    }

    /// True iff `pos` is on the board and empty.
    pub fn is_legal(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Claims `pos` for `player`.
    ///
    /// The caller must have checked [`Board::is_legal`]; claiming an occupied
    /// or off-board cell is a programming error.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, pos: Position, player: PlayerId) {
        debug_assert!(self.is_legal(pos), "apply_move onto illegal cell {pos}");
        if let Some(i) = self.index(pos) {
            self.cells[i] = Cell::Owned(player);
        }
    }

    /// The four orthogonal neighbours of `pos` in [`Direction::ALL`] order.
    ///
    /// Entries are `None` where the step would underflow; entries past the
    /// far edges are returned as-is and fail [`Board::is_legal`].
    pub fn neighbors(pos: Position) -> [Option<Position>; 4] {
        Direction::ALL.map(|direction| pos.step(direction))
    }

    /// Legal destinations from `pos` in neighbour order.
    pub fn legal_moves(&self, pos: Position) -> Vec<Position> {
        Self::neighbors(pos)
            .into_iter()
            .flatten()
            .filter(|&next| self.is_legal(next))
            .collect()
    }

    /// Number of legal destinations from `pos`.
    pub fn mobility(&self, pos: Position) -> usize {
        Self::neighbors(pos)
            .into_iter()
            .flatten()
            .filter(|&next| self.is_legal(next))
            .count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// `.` is empty, `1`/`2` are claimed cells, and the optional markers
    /// (`A`/`B`) show where each player currently stands.
    pub fn display(&self, positions: [Option<Position>; 2]) -> String {
        let mut result = String::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let symbol = if positions[0] == Some(pos) {
                    'A'
                } else if positions[1] == Some(pos) {
                    'B'
                } else {
                    match self.cells[row * self.cols + col] {
                        Cell::Empty => '.',
                        Cell::Owned(PlayerId::First) => '1',
                        Cell::Owned(PlayerId::Second) => '2',
                    }
                };
                result.push(symbol);
                if col + 1 < self.cols {
                    result.push(' ');
                }
            }
            if row + 1 < self.rows {
                result.push('\n');
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_within_clamps_bad_ranges() {
        let mut rng = StdRng::seed_from_u64(12);
        for (min, max) in [(12, 9), (0, 0), (3, 30), (11, 7)] {
            for _ in 0..20 {
                let board = Board::generate_within(&mut rng, min, max);
                assert!((MIN_DIMENSION..=MAX_DIMENSION).contains(&board.rows()));
                assert!((MIN_DIMENSION..=MAX_DIMENSION).contains(&board.cols()));
            }
        }
        let board = Board::generate_within(&mut rng, 12, 9);
        assert_eq!((board.rows(), board.cols()), (11, 11));
    }

    #[test]
    fn test_generated_dimensions_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let board = Board::generate(&mut rng);
            assert!((MIN_DIMENSION..=MAX_DIMENSION).contains(&board.rows()));
            assert!((MIN_DIMENSION..=MAX_DIMENSION).contains(&board.cols()));
            assert_eq!(board.empty_cells().len(), board.rows() * board.cols());
        }
    }

    #[test]
    fn test_generation_covers_every_dimension() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; MAX_DIMENSION + 1];
        for _ in 0..500 {
            seen[Board::generate(&mut rng).rows()] = true;
        }
        assert!((MIN_DIMENSION..=MAX_DIMENSION).all(|d| seen[d]));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Board::new(6, 7).is_err());
        assert!(Board::new(7, 12).is_err());
        assert!(Board::new(7, 11).is_ok());
    }

    #[test]
    fn test_center_only_for_odd_odd() {
        assert_eq!(Board::new(7, 7).unwrap().center(), Some(Position::new(3, 3)));
        assert_eq!(Board::new(9, 11).unwrap().center(), Some(Position::new(4, 5)));
        assert_eq!(Board::new(8, 9).unwrap().center(), None);
        assert_eq!(Board::new(9, 8).unwrap().center(), None);
        assert_eq!(Board::new(10, 10).unwrap().center(), None);
    }

    #[test]
    fn test_mirror_corner_on_even_rows() {
        let board = Board::new(8, 9).unwrap();
        assert_eq!(board.mirror(Position::new(0, 0)), Some(Position::new(7, 8)));
    }

    #[test]
    fn test_mirror_pinned_values_even_by_even() {
        // Centroid (4.5, 4.5): reflections land on integral cells, never on a tie.
        let board = Board::new(10, 10).unwrap();
        assert_eq!(board.mirror(Position::new(4, 4)), Some(Position::new(5, 5)));
        assert_eq!(board.mirror(Position::new(4, 5)), Some(Position::new(5, 4)));
        assert_eq!(board.mirror(Position::new(2, 9)), Some(Position::new(7, 0)));
    }

    #[test]
    fn test_mirror_center_is_fixed_point() {
        let board = Board::new(7, 7).unwrap();
        assert_eq!(board.mirror(Position::new(3, 3)), Some(Position::new(3, 3)));
    }

    #[test]
    fn test_mirror_off_board_is_none() {
        let board = Board::new(7, 8).unwrap();
        assert_eq!(board.mirror(Position::new(7, 0)), None);
        assert_eq!(board.mirror(Position::new(0, 8)), None);
    }

    #[test]
    fn test_mirror_is_involution() {
        for (rows, cols) in [(7, 7), (7, 8), (8, 9), (10, 11), (11, 11)] {
            let board = Board::new(rows, cols).unwrap();
            for pos in board.empty_cells() {
                let mirrored = board.mirror(pos).unwrap();
                assert_eq!(board.mirror(mirrored), Some(pos));
            }
        }
    }

    #[test]
    fn test_apply_move_claims_cell() {
        let mut board = Board::new(7, 7).unwrap();
        let pos = Position::new(2, 3);
        assert!(board.is_legal(pos));
        board.apply_move(pos, PlayerId::Second);
        assert_eq!(board.get(pos), Some(Cell::Owned(PlayerId::Second)));
        assert!(!board.is_legal(pos));
        assert_eq!(board.owned_by(PlayerId::Second), 1);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_apply_move_onto_owned_cell_panics_in_debug() {
        let mut board = Board::new(7, 7).unwrap();
        board.apply_move(Position::new(0, 0), PlayerId::First);
        board.apply_move(Position::new(0, 0), PlayerId::Second);
    }

    #[test]
    fn test_legal_moves_follow_neighbor_order() {
        let mut board = Board::new(7, 7).unwrap();
        let here = Position::new(3, 3);
        assert_eq!(
            board.legal_moves(here),
            vec![
                Position::new(2, 3),
                Position::new(4, 3),
                Position::new(3, 2),
                Position::new(3, 4),
            ]
        );
        board.apply_move(Position::new(4, 3), PlayerId::First);
        assert_eq!(board.mobility(here), 3);
        assert_eq!(board.mobility(Position::new(0, 0)), 2);
    }

    #[test]
    fn test_display_marks_positions() {
        let mut board = Board::new(7, 7).unwrap();
        board.apply_move(Position::new(0, 0), PlayerId::First);
        board.apply_move(Position::new(0, 1), PlayerId::First);
        board.apply_move(Position::new(6, 6), PlayerId::Second);
        let text = board.display([Some(Position::new(0, 1)), Some(Position::new(6, 6))]);
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, "1 A . . . . .");
        assert!(text.lines().last().unwrap().ends_with('B'));
    }
}
