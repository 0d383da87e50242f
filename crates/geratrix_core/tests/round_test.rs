//! Tests for the round state machine driven through `step`.

use geratrix_core::{
    Board, Difficulty, Direction, InputEvent, MatchConfig, PlacementError, PlayerId, Position,
    Round, RoundPhase, RoundResult,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn go(player: PlayerId, direction: Direction) -> Option<InputEvent> {
    Some(InputEvent::Move { player, direction })
}

/// 7×7 board with only the top-left corridor (0,0)-(0,2) left empty.
fn corridor_board() -> Board {
    let mut board = Board::new(7, 7).unwrap();
    for pos in board.empty_cells() {
        if pos.row > 0 || pos.col > 2 {
            board.apply_move(pos, PlayerId::First);
        }
    }
    board
}

#[test]
fn test_center_placement_rejected_through_step() {
    let mut round = Round::with_board(Board::new(7, 7).unwrap(), &MatchConfig::versus_human(), rng());
    assert_eq!(round.forbidden_start(), Some(Position::new(3, 3)));
    round.step(Some(InputEvent::Place(Position::new(3, 3))), Duration::ZERO);
    assert_eq!(round.phase(), RoundPhase::AwaitingPlacement(PlayerId::First));
    assert_eq!(
        round.place(Position::new(3, 3)),
        Err(PlacementError::CenterForbidden(Position::new(3, 3)))
    );
}

#[test]
fn test_mirrored_start_places_both() {
    let mut round = Round::with_board(Board::new(8, 9).unwrap(), &MatchConfig::versus_human(), rng());
    round.step(Some(InputEvent::Place(Position::new(0, 0))), Duration::ZERO);
    assert_eq!(
        round.positions(),
        [Some(Position::new(0, 0)), Some(Position::new(7, 8))]
    );
    assert_eq!(round.phase(), RoundPhase::InProgress(PlayerId::First));
}

#[test]
fn test_last_shared_cell_decides_the_round() {
    let config = MatchConfig::versus_human();
    let mut round = Round::with_board(corridor_board(), &config, rng());

    // The mirror (6,6) is taken, so the second player picks their own start.
    round.step(Some(InputEvent::Place(Position::new(0, 0))), Duration::ZERO);
    assert_eq!(round.phase(), RoundPhase::AwaitingPlacement(PlayerId::Second));
    assert_eq!(
        round.place(Position::new(0, 0)),
        Err(PlacementError::Occupied(Position::new(0, 0)))
    );
    round.step(Some(InputEvent::Place(Position::new(0, 2))), Duration::ZERO);
    assert_eq!(round.phase(), RoundPhase::InProgress(PlayerId::First));

    let result = round.step(go(PlayerId::First, Direction::Right), Duration::ZERO);
    assert_eq!(result, Some(RoundResult::Winner(PlayerId::First)));
    assert_eq!(round.board().empty_cells(), Vec::<Position>::new());
}

#[test]
fn test_illegal_and_out_of_turn_moves_are_ignored() {
    let mut round = Round::with_board(Board::new(7, 7).unwrap(), &MatchConfig::versus_human(), rng());
    round.place(Position::new(0, 0)).unwrap();
    let before = round.board().clone();

    assert_eq!(round.step(go(PlayerId::First, Direction::Up), Duration::ZERO), None);
    assert_eq!(round.step(go(PlayerId::Second, Direction::Up), Duration::ZERO), None);
    assert_eq!(round.board(), &before);
    assert_eq!(round.current_player(), Some(PlayerId::First));
}

#[test]
fn test_pause_freezes_bot_countdown() {
    let config = MatchConfig::versus_bot(Difficulty::Easy).with_bot_delay(Duration::from_millis(500));
    let mut round = Round::with_board(Board::new(7, 7).unwrap(), &config, rng());
    round.place(Position::new(0, 0)).unwrap();
    round.step(go(PlayerId::First, Direction::Right), Duration::ZERO);
    assert_eq!(round.current_player(), Some(PlayerId::Second));

    round.step(None, Duration::from_millis(300));
    round.step(Some(InputEvent::Pause), Duration::from_millis(50));
    round.step(None, Duration::from_secs(10));
    assert!(round.is_paused());
    assert_eq!(round.current_player(), Some(PlayerId::Second));
    assert_eq!(round.bot_timer().elapsed(), Some(Duration::from_millis(300)));

    round.step(Some(InputEvent::Resume), Duration::from_millis(100));
    assert_eq!(round.current_player(), Some(PlayerId::Second));
    round.step(None, Duration::from_millis(100));
    assert_eq!(round.current_player(), Some(PlayerId::First));
    assert_eq!(round.path(PlayerId::Second).len(), 2);
}

#[test]
fn test_paused_round_ignores_moves_but_accepts_cancel() {
    let mut round = Round::with_board(Board::new(7, 7).unwrap(), &MatchConfig::versus_human(), rng());
    round.place(Position::new(1, 1)).unwrap();
    round.step(Some(InputEvent::TogglePause), Duration::ZERO);
    round.step(go(PlayerId::First, Direction::Down), Duration::ZERO);
    assert_eq!(round.position(PlayerId::First), Some(Position::new(1, 1)));

    let result = round.step(Some(InputEvent::Cancel), Duration::ZERO);
    assert_eq!(result, Some(RoundResult::Aborted));
    assert!(round.is_finished());
}

#[test]
fn test_snapshot_reflects_state() {
    let mut round = Round::with_board(Board::new(7, 8).unwrap(), &MatchConfig::versus_human(), rng());
    round.place(Position::new(2, 2)).unwrap();
    let snapshot = round.snapshot();
    assert_eq!((snapshot.rows, snapshot.cols), (7, 8));
    assert_eq!(snapshot.positions, round.positions());
    assert_eq!(snapshot.phase, RoundPhase::InProgress(PlayerId::First));
    assert!(!snapshot.paused);
    assert_eq!(snapshot.legal_moves.len(), 4);
}
