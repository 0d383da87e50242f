//! Text commands for the terminal shell.
//!
//! | input                        | event                          |
//! |------------------------------|--------------------------------|
//! | `w` `a` `s` `d`, `up` ...    | player 1 step                  |
//! | `i` `j` `k` `l`              | player 2 step                  |
//! | `3 4`, `3,4`                 | place start at row 3, col 4    |
//! | `p`, `pause`                 | toggle pause                   |
//! | `q`, `quit`, `esc`           | cancel the round               |

use derive_more::Display;
use geratrix_core::{Direction, InputEvent, PlayerId, Position};
use tracing::instrument;

/// A line that does not map to any command.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// Nothing was typed.
    #[display("Empty input")]
    Empty,
    /// Unrecognised text.
    #[display("Unknown command: {}", _0)]
    Unknown(String),
}

impl std::error::Error for InputError {}

/// Parses one input line.
#[instrument]
pub fn parse_line(line: &str) -> Result<InputEvent, InputError> {
    let text = line.trim().to_lowercase();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    let event = match text.as_str() {
        "p" | "pause" => InputEvent::TogglePause,
        "q" | "quit" | "esc" => InputEvent::Cancel,
        "w" => step(PlayerId::First, Direction::Up),
        "s" => step(PlayerId::First, Direction::Down),
        "a" => step(PlayerId::First, Direction::Left),
        "d" => step(PlayerId::First, Direction::Right),
        "i" => step(PlayerId::Second, Direction::Up),
        "k" => step(PlayerId::Second, Direction::Down),
        "j" => step(PlayerId::Second, Direction::Left),
        "l" => step(PlayerId::Second, Direction::Right),
        other => {
            if let Ok(direction) = other.parse::<Direction>() {
                step(PlayerId::First, direction)
            } else if let Some(pos) = parse_position(other) {
                InputEvent::Place(pos)
            } else {
                return Err(InputError::Unknown(line.trim().to_string()));
            }
        }
    };
    Ok(event)
}

fn step(player: PlayerId, direction: Direction) -> InputEvent {
    InputEvent::Move { player, direction }
}

fn parse_position(text: &str) -> Option<Position> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_players() {
        assert_eq!(
            parse_line("w").unwrap(),
            step(PlayerId::First, Direction::Up)
        );
        assert_eq!(
            parse_line(" L ").unwrap(),
            step(PlayerId::Second, Direction::Right)
        );
        assert_eq!(
            parse_line("left").unwrap(),
            step(PlayerId::First, Direction::Left)
        );
    }

    #[test]
    fn test_positions() {
        assert_eq!(parse_line("3 4").unwrap(), InputEvent::Place(Position::new(3, 4)));
        assert_eq!(parse_line("0,10").unwrap(), InputEvent::Place(Position::new(0, 10)));
        assert!(parse_line("1 2 3").is_err());
        assert!(parse_line("-1 2").is_err());
    }

    #[test]
    fn test_control_commands() {
        assert_eq!(parse_line("p").unwrap(), InputEvent::TogglePause);
        assert_eq!(parse_line("ESC").unwrap(), InputEvent::Cancel);
        assert_eq!(parse_line("   "), Err(InputError::Empty));
        assert!(matches!(parse_line("jump"), Err(InputError::Unknown(_))));
    }
}
