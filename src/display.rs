//! Plain-text rendering of a match.

use geratrix_core::{Match, MatchStatus, PlayerId, Round, RoundPhase, RoundResult, Seat};

/// Short name of a player as shown on screen.
pub fn player_label(game: &Match, player: PlayerId) -> &'static str {
    match (game.versus_bot(), player) {
        (true, PlayerId::First) => "You",
        (true, PlayerId::Second) => "Bot",
        (false, PlayerId::First) => "P1",
        (false, PlayerId::Second) => "P2",
    }
}

/// Renders the scoreboard, the grid and a status line.
pub fn render(game: &Match) -> String {
    let mut out = String::new();
    out.push_str(&game.score().line(game.versus_bot()));
    out.push_str(&format!("    [{}]\n", game.difficulty()));

    if let Some(round) = game.round() {
        out.push('\n');
        out.push_str(&round.board().display(round.positions()));
        out.push('\n');
        out.push_str(&status_line(game, round));
        out.push('\n');
    }

    match game.status() {
        MatchStatus::Playing => {}
        MatchStatus::Won(_) => {
            if let Some(text) = game.announcement() {
                out.push_str(text);
                out.push('\n');
            }
        }
        MatchStatus::Abandoned => out.push_str("Match abandoned\n"),
    }
    out
}

fn status_line(game: &Match, round: &Round) -> String {
    if round.is_paused() {
        return "Paused (p to resume)".to_string();
    }
    match round.phase() {
        RoundPhase::AwaitingPlacement(player) => {
            let mut line = format!(
                "{}: choose a start cell as \"row col\"",
                player_label(game, player)
            );
            if let Some(center) = round.forbidden_start() {
                line.push_str(&format!(" (not the center {})", center));
            }
            line
        }
        RoundPhase::InProgress(player) => {
            let keys = match player {
                PlayerId::First => "w/a/s/d",
                PlayerId::Second => "i/j/k/l",
            };
            if round.seat(player) == Seat::Bot {
                format!("{} is thinking...", player_label(game, player))
            } else {
                format!("{} to move ({})", player_label(game, player), keys)
            }
        }
        RoundPhase::Finished(RoundResult::Winner(winner)) => {
            format!("Round to {}", player_label(game, winner))
        }
        RoundPhase::Finished(RoundResult::Aborted) => "Round cancelled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geratrix_core::MatchConfig;

    #[test]
    fn test_render_before_first_round() {
        let game = Match::new(MatchConfig::new().with_seed(Some(1)));
        let text = render(&game);
        assert!(text.starts_with("You: 0 - Bot: 0"));
        assert!(text.contains("[medium]"));
    }

    #[test]
    fn test_render_placement_prompt() {
        let mut game = Match::new(MatchConfig::versus_human().with_seed(Some(1)));
        game.new_round().unwrap();
        let text = render(&game);
        assert!(text.starts_with("P1: 0 - P2: 0"));
        assert!(text.contains("P1: choose a start cell"));
    }

    #[test]
    fn test_render_abandoned() {
        let mut game = Match::new(MatchConfig::versus_human().with_seed(Some(1)));
        game.new_round().unwrap();
        game.quit();
        let text = render(&game);
        assert!(text.contains("Round cancelled"));
        assert!(text.ends_with("Match abandoned\n"));
    }
}
