//! The round state machine.
//!
//! ```text
//! AwaitingPlacement(First) ─▶ AwaitingPlacement(Second) ─▶ InProgress(current) ─▶ Finished(result)
//!            └──────────── mirrored start available ──────────────▲
//! ```
//!
//! `paused` is an orthogonal flag: it freezes turn processing and the bot
//! timer without touching the phase or the board. Cancellation is accepted
//! in any unfinished phase.

use crate::board::Board;
use crate::config::{MatchConfig, Seat};
use crate::error::{MoveError, PlacementError};
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::policy::{Difficulty, PolicyContext};
use crate::timer::BotTimer;
use crate::types::{Cell, Delta, Direction, PlayerId, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundResult {
    /// This player still had a move when the other did not.
    Winner(PlayerId),
    /// Ended by an external cancel; counts for nobody.
    Aborted,
}

impl RoundResult {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            RoundResult::Winner(player) => Some(*player),
            RoundResult::Aborted => None,
        }
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundResult::Winner(player) => write!(f, "{player} wins the round"),
            RoundResult::Aborted => write!(f, "Round aborted"),
        }
    }
}

/// Where the round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for this player's start cell.
    AwaitingPlacement(PlayerId),
    /// Turns are being played; the payload is the player to move.
    InProgress(PlayerId),
    /// Terminal.
    Finished(RoundResult),
}

/// Inputs from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Choose a start cell for the player currently placing.
    Place(Position),
    /// Step the given player one cell.
    Move {
        /// Who is moving.
        player: PlayerId,
        /// Which way.
        direction: Direction,
    },
    /// Suspend turn processing.
    Pause,
    /// Resume turn processing.
    Resume,
    /// Pause if running, resume if paused.
    TogglePause,
    /// Quit the round.
    Cancel,
}

/// Read-only view of a round for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub cols: usize,
    /// Cell occupancy, row by row.
    pub cells: Vec<Vec<Cell>>,
    /// Where each player stands, once placed.
    pub positions: [Option<Position>; 2],
    /// Lifecycle phase.
    pub phase: RoundPhase,
    /// Pause flag.
    pub paused: bool,
    /// Legal destinations for the player to move.
    pub legal_moves: Vec<Position>,
}

/// One round on a freshly generated board.
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    phase: RoundPhase,
    paused: bool,
    positions: [Option<Position>; 2],
    paths: [Vec<Position>; 2],
    last_first_delta: Option<Delta>,
    seats: [Seat; 2],
    difficulty: Difficulty,
    bot_timer: BotTimer,
    rng: StdRng,
}

impl Round {
    /// Starts a round on a board generated from `config`'s dimension range.
    ///
    /// Bot seats place immediately, so the returned round is already waiting
    /// on a human (or in progress when both seats are bots).
    #[instrument(skip(config, rng))]
    pub fn new(config: &MatchConfig, mut rng: StdRng) -> Self {
        let board = Board::generate_within(
            &mut rng,
            *config.min_dimension(),
            *config.max_dimension(),
        );
        Self::with_board(board, config, rng)
    }

    /// Starts a round on an explicit board.
    #[instrument(skip(board, config, rng), fields(rows = board.rows(), cols = board.cols()))]
    pub fn with_board(board: Board, config: &MatchConfig, rng: StdRng) -> Self {
        let mut round = Self {
            board,
            phase: RoundPhase::AwaitingPlacement(PlayerId::First),
            paused: false,
            positions: [None, None],
            paths: [Vec::new(), Vec::new()],
            last_first_delta: None,
            seats: *config.seats(),
            difficulty: *config.difficulty(),
            bot_timer: BotTimer::new(config.bot_delay()),
            rng,
        };
        info!(
            rows = round.board.rows(),
            cols = round.board.cols(),
            "Round started"
        );
        round.resolve_bot_placements();
        round
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The lifecycle phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// True while suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Both positions, `None` until placed.
    pub fn positions(&self) -> [Option<Position>; 2] {
        self.positions
    }

    /// One player's position.
    pub fn position(&self, player: PlayerId) -> Option<Position> {
        self.positions[player.index()]
    }

    /// Every cell `player` has stood on, start first.
    pub fn path(&self, player: PlayerId) -> &[Position] {
        &self.paths[player.index()]
    }

    /// The first player's most recent movement vector.
    pub fn last_first_delta(&self) -> Option<Delta> {
        self.last_first_delta
    }

    /// The player to move, if turns are being played.
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.phase {
            RoundPhase::InProgress(player) => Some(player),
            _ => None,
        }
    }

    /// The player whose start cell is awaited, if placing.
    pub fn placing_player(&self) -> Option<PlayerId> {
        match self.phase {
            RoundPhase::AwaitingPlacement(player) => Some(player),
            _ => None,
        }
    }

    /// The result once finished.
    pub fn result(&self) -> Option<RoundResult> {
        match self.phase {
            RoundPhase::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// True once the round has a result.
    pub fn is_finished(&self) -> bool {
        self.result().is_some()
    }

    /// The cell the first player may not start on.
    pub fn forbidden_start(&self) -> Option<Position> {
        self.board.center()
    }

    /// The seat of `player`.
    pub fn seat(&self, player: PlayerId) -> Seat {
        self.seats[player.index()]
    }

    /// The bot countdown.
    pub fn bot_timer(&self) -> &BotTimer {
        &self.bot_timer
    }

    /// Legal destinations for the player to move (empty outside play).
    pub fn legal_moves(&self) -> Vec<Position> {
        self.current_player()
            .and_then(|player| self.position(player))
            .map(|pos| self.board.legal_moves(pos))
            .unwrap_or_default()
    }

    /// A read-only copy for rendering.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells: self.board.grid().map(<[Cell]>::to_vec).collect(),
            positions: self.positions,
            phase: self.phase,
            paused: self.paused,
            legal_moves: self.legal_moves(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Placement
    // ─────────────────────────────────────────────────────────────

    /// Places the awaiting player's start cell.
    ///
    /// The first player may not take the center; the second player's fallback
    /// start may not be the first player's cell. Refusals leave the round
    /// untouched.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn place(&mut self, pos: Position) -> Result<(), PlacementError> {
        let player = self.placing_player().ok_or(PlacementError::NotPlacing)?;
        if self.seat(player) == Seat::Bot {
            return Err(PlacementError::WrongPlayer(player));
        }
        if !self.board.in_bounds(pos) {
            return Err(PlacementError::OutOfBounds(pos));
        }
        if !self.board.is_legal(pos) {
            return Err(PlacementError::Occupied(pos));
        }
        if player == PlayerId::First && self.board.center() == Some(pos) {
            return Err(PlacementError::CenterForbidden(pos));
        }
        self.commit_placement(player, pos);
        self.resolve_bot_placements();
        Ok(())
    }

    fn commit_placement(&mut self, player: PlayerId, pos: Position) {
        self.board.apply_move(pos, player);
        self.positions[player.index()] = Some(pos);
        self.paths[player.index()].push(pos);
        debug!(%player, %pos, "Start placed");

        match player {
            PlayerId::First => match self.board.mirror(pos) {
                Some(mirrored) if self.board.is_legal(mirrored) => {
                    self.commit_placement(PlayerId::Second, mirrored);
                }
                _ => {
                    debug!(%pos, "Mirrored start unavailable, falling back");
                    self.phase = RoundPhase::AwaitingPlacement(PlayerId::Second);
                }
            },
            PlayerId::Second => {
                self.phase = RoundPhase::InProgress(PlayerId::First);
                info!("Both players placed, turns begin");
                self.check_termination(PlayerId::First);
            }
        }
    }

    /// Places bot seats with a uniform choice among eligible empty cells.
    fn resolve_bot_placements(&mut self) {
        while let Some(player) = self.placing_player() {
            if self.seat(player) != Seat::Bot {
                return;
            }
            let forbidden = match player {
                PlayerId::First => self.board.center(),
                PlayerId::Second => self.position(PlayerId::First),
            };
            let choices: Vec<Position> = self
                .board
                .empty_cells()
                .into_iter()
                .filter(|&pos| Some(pos) != forbidden)
                .collect();
            let Some(&pos) = choices.choose(&mut self.rng) else {
                warn!(%player, "No cell left for bot placement");
                return;
            };
            self.commit_placement(player, pos);
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Turns
    // ─────────────────────────────────────────────────────────────

    /// Applies a human move.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn try_move(&mut self, player: PlayerId, direction: Direction) -> Result<(), MoveError> {
        let current = self.current_player().ok_or(MoveError::NotInProgress)?;
        if self.paused {
            return Err(MoveError::Paused);
        }
        if player != current {
            return Err(MoveError::WrongPlayer(player));
        }
        if self.seat(player) == Seat::Bot {
            return Err(MoveError::BotSeat(player));
        }
        let destination = self
            .position(player)
            .and_then(|from| from.step(direction));
        match destination {
            Some(to) if self.board.is_legal(to) => {
                self.apply_turn(player, to);
                Ok(())
            }
            _ => Err(MoveError::Illegal(destination)),
        }
    }

    fn apply_turn(&mut self, player: PlayerId, to: Position) {
        let Some(from) = self.position(player) else {
            warn!(%player, "Turn for unplaced player ignored");
            return;
        };
        self.board.apply_move(to, player);
        self.positions[player.index()] = Some(to);
        self.paths[player.index()].push(to);
        if player == PlayerId::First {
            self.last_first_delta = Some(from.delta_to(to));
        }
        debug!(%player, %from, %to, "Move applied");

        if let Err(violations) = RoundInvariants::check_all(self) {
            warn!(?violations, "Round invariants violated after move");
            debug_assert!(false, "Round invariants violated after move");
        }

        let next = player.opponent();
        self.phase = RoundPhase::InProgress(next);
        self.bot_timer.cancel();
        self.check_termination(next);
    }

    /// Ends the round if `current` has no legal step; otherwise arms the bot
    /// timer when `current` is a bot.
    fn check_termination(&mut self, current: PlayerId) {
        let stuck = self
            .position(current)
            .is_none_or(|pos| self.board.mobility(pos) == 0);
        if stuck {
            let result = RoundResult::Winner(current.opponent());
            info!(loser = %current, %result, "Round over");
            self.phase = RoundPhase::Finished(result);
            self.bot_timer.cancel();
        } else if self.seat(current) == Seat::Bot {
            self.bot_timer.arm();
        }
    }

    /// Advances the bot countdown and plays the bot's move when it expires.
    ///
    /// Returns true if a move was applied.
    fn advance_bot(&mut self, dt: Duration) -> bool {
        let Some(current) = self.current_player() else {
            return false;
        };
        if self.paused || self.seat(current) != Seat::Bot {
            return false;
        }
        self.bot_timer.arm();
        if !self.bot_timer.advance(dt) {
            return false;
        }
        match self.decide(current) {
            Some(to) => {
                self.apply_turn(current, to);
                true
            }
            None => {
                // Termination is checked before every bot turn, so this only
                // fires if a policy misbehaves.
                warn!(%current, "Bot found no move");
                self.phase = RoundPhase::Finished(RoundResult::Winner(current.opponent()));
                true
            }
        }
    }

    /// Runs the difficulty policy for `player` without applying the result.
    #[instrument(skip(self))]
    pub fn decide(&mut self, player: PlayerId) -> Option<Position> {
        let own = self.position(player)?;
        let opponent = self.position(player.opponent())?;
        let last_opponent_delta = match player {
            PlayerId::Second => self.last_first_delta,
            PlayerId::First => None,
        };
        let ctx = PolicyContext::new(&self.board, own, opponent, last_opponent_delta);
        self.difficulty.choose_move(&ctx, &mut self.rng)
    }

    // ─────────────────────────────────────────────────────────────
    //  Pause and cancellation
    // ─────────────────────────────────────────────────────────────

    /// Suspends turn processing.
    pub fn pause(&mut self) {
        if !self.is_finished() && !self.paused {
            info!("Round paused");
            self.paused = true;
        }
    }

    /// Resumes exactly where the round was paused.
    pub fn resume(&mut self) {
        if self.paused {
            info!("Round resumed");
            self.paused = false;
        }
    }

    /// Ends the round without a winner.
    #[instrument(skip(self))]
    pub fn abort(&mut self) {
        if !self.is_finished() {
            info!("Round aborted");
            self.phase = RoundPhase::Finished(RoundResult::Aborted);
            self.bot_timer.cancel();
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Step loop
    // ─────────────────────────────────────────────────────────────

    /// Processes at most one input and at most one game action.
    ///
    /// `dt` is the game time since the previous step; it only feeds the bot
    /// countdown. Refused inputs are logged and ignored. Returns the result
    /// once the round is over.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn step(&mut self, input: Option<InputEvent>, dt: Duration) -> Option<RoundResult> {
        if self.is_finished() {
            return self.result();
        }

        let mut acted = false;
        match input {
            Some(InputEvent::Cancel) => {
                self.abort();
                return self.result();
            }
            Some(InputEvent::Pause) => self.pause(),
            Some(InputEvent::Resume) => self.resume(),
            Some(InputEvent::TogglePause) => {
                if self.paused {
                    self.resume();
                } else {
                    self.pause();
                }
            }
            Some(InputEvent::Place(pos)) => match self.place(pos) {
                Ok(()) => acted = true,
                Err(e) => debug!(error = %e, "Placement ignored"),
            },
            Some(InputEvent::Move { player, direction }) => {
                match self.try_move(player, direction) {
                    Ok(()) => acted = true,
                    Err(e) => debug!(error = %e, "Move ignored"),
                }
            }
            None => {}
        }

        if !acted {
            self.advance_bot(dt);
        }
        self.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn human_config() -> MatchConfig {
        MatchConfig::versus_human()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn board(rows: usize, cols: usize) -> Board {
        Board::new(rows, cols).unwrap()
    }

    #[test]
    fn test_center_start_rejected() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        assert_eq!(round.forbidden_start(), Some(Position::new(3, 3)));
        assert_eq!(
            round.place(Position::new(3, 3)),
            Err(PlacementError::CenterForbidden(Position::new(3, 3)))
        );
        assert_eq!(round.phase(), RoundPhase::AwaitingPlacement(PlayerId::First));
        assert_eq!(round.board().empty_cells().len(), 49);
    }

    #[test]
    fn test_mirrored_start_is_automatic() {
        let mut round = Round::with_board(board(8, 9), &human_config(), rng());
        round.place(Position::new(0, 0)).unwrap();
        assert_eq!(round.position(PlayerId::Second), Some(Position::new(7, 8)));
        assert_eq!(round.phase(), RoundPhase::InProgress(PlayerId::First));
    }

    #[test]
    fn test_placement_out_of_bounds_rejected() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        assert_eq!(
            round.place(Position::new(7, 0)),
            Err(PlacementError::OutOfBounds(Position::new(7, 0)))
        );
    }

    #[test]
    fn test_moves_rejected_before_play() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        assert_eq!(
            round.try_move(PlayerId::First, Direction::Up),
            Err(MoveError::NotInProgress)
        );
    }

    #[test]
    fn test_turns_alternate_and_record_first_delta() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        round.place(Position::new(0, 0)).unwrap();
        assert_eq!(
            round.try_move(PlayerId::Second, Direction::Up),
            Err(MoveError::WrongPlayer(PlayerId::Second))
        );
        round.try_move(PlayerId::First, Direction::Right).unwrap();
        assert_eq!(round.last_first_delta(), Some(Delta::new(0, 1)));
        assert_eq!(round.current_player(), Some(PlayerId::Second));

        round.try_move(PlayerId::Second, Direction::Up).unwrap();
        assert_eq!(round.last_first_delta(), Some(Delta::new(0, 1)));
        assert_eq!(round.position(PlayerId::Second), Some(Position::new(5, 6)));
        assert_eq!(
            round.board().get(Position::new(6, 6)),
            Some(Cell::Owned(PlayerId::Second))
        );
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        round.place(Position::new(0, 0)).unwrap();
        let before = round.snapshot();
        assert!(matches!(
            round.try_move(PlayerId::First, Direction::Up),
            Err(MoveError::Illegal(None))
        ));
        assert_eq!(round.step(
            Some(InputEvent::Move { player: PlayerId::First, direction: Direction::Left }),
            Duration::ZERO,
        ), None);
        assert_eq!(round.snapshot(), before);
    }

    #[test]
    fn test_pause_blocks_moves_and_resume_restores() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        round.place(Position::new(0, 0)).unwrap();
        round.step(Some(InputEvent::Pause), Duration::ZERO);
        let paused = round.snapshot();
        assert!(paused.paused);
        assert_eq!(
            round.try_move(PlayerId::First, Direction::Down),
            Err(MoveError::Paused)
        );
        round.step(Some(InputEvent::TogglePause), Duration::ZERO);
        assert!(!round.is_paused());
        assert_eq!(round.current_player(), Some(PlayerId::First));
        assert_eq!(round.snapshot().cells, paused.cells);
        round.try_move(PlayerId::First, Direction::Down).unwrap();
    }

    #[test]
    fn test_cancel_aborts_from_any_phase() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        assert_eq!(
            round.step(Some(InputEvent::Cancel), Duration::ZERO),
            Some(RoundResult::Aborted)
        );
        // Finished rounds ignore further input.
        assert_eq!(
            round.step(Some(InputEvent::Place(Position::new(0, 0))), Duration::ZERO),
            Some(RoundResult::Aborted)
        );
    }

    #[test]
    fn test_invariants_hold_through_play() {
        let mut round = Round::with_board(board(7, 7), &human_config(), rng());
        round.place(Position::new(1, 1)).unwrap();
        for (player, direction) in [
            (PlayerId::First, Direction::Down),
            (PlayerId::Second, Direction::Up),
            (PlayerId::First, Direction::Right),
            (PlayerId::Second, Direction::Left),
        ] {
            round.try_move(player, direction).unwrap();
            assert!(RoundInvariants::check_all(&round).is_ok());
        }
    }
}
