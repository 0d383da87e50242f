//! Headless bot-vs-bot matches for balancing the policies.

use geratrix_core::{Match, MatchConfig, MatchStatus, PlayerId, Seat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Aggregate results of a batch of simulated matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Matches played.
    pub matches: u32,
    /// Matches won by the first and second seat.
    pub match_wins: [u32; 2],
    /// Rounds won by the first and second seat.
    pub round_wins: [u32; 2],
    /// Rounds played across all matches.
    pub rounds: u32,
    /// Moves per round, placements excluded.
    pub average_moves: f64,
}

impl SimulationReport {
    /// Share of matches won by `player`, in `[0, 1]`.
    pub fn match_win_rate(&self, player: PlayerId) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        f64::from(self.match_wins[player.index()]) / f64::from(self.matches)
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Matches:       {}", self.matches)?;
        writeln!(
            f,
            "Match wins:    P1 {} ({:.1}%) / P2 {} ({:.1}%)",
            self.match_wins[0],
            self.match_win_rate(PlayerId::First) * 100.0,
            self.match_wins[1],
            self.match_win_rate(PlayerId::Second) * 100.0,
        )?;
        writeln!(
            f,
            "Round wins:    P1 {} / P2 {}",
            self.round_wins[0], self.round_wins[1]
        )?;
        writeln!(f, "Rounds:        {}", self.rounds)?;
        write!(f, "Average moves: {:.1}", self.average_moves)
    }
}

/// Plays `matches` bot-vs-bot matches with seeds `base_seed + i`.
///
/// Seats and bot delay in `config` are overridden; everything else is kept.
#[instrument(skip(config), fields(difficulty = %config.difficulty()))]
pub fn simulate(config: &MatchConfig, matches: u32, base_seed: u64) -> SimulationReport {
    let mut report = SimulationReport {
        matches,
        ..SimulationReport::default()
    };
    let mut total_moves: u64 = 0;

    for i in 0..matches {
        let seed = base_seed.wrapping_add(u64::from(i));
        let config = config
            .clone()
            .with_seats([Seat::Bot, Seat::Bot])
            .with_bot_delay(Duration::ZERO)
            .with_seed(Some(seed));
        let mut game = Match::new(config);

        while !game.is_over() {
            if game.new_round().is_err() {
                break;
            }
            while let Ok(None) = game.step(None, Duration::ZERO) {}
            if let Some(round) = game.round() {
                let moves = PlayerId::BOTH
                    .iter()
                    .map(|player| round.path(*player).len().saturating_sub(1))
                    .sum::<usize>();
                total_moves += moves as u64;
            }
        }

        if let MatchStatus::Won(winner) = game.status() {
            report.match_wins[winner.index()] += 1;
        }
        let score = game.score();
        for player in PlayerId::BOTH {
            report.round_wins[player.index()] += score.get(player);
        }
        report.rounds += game.rounds_played();
        debug!(seed, score = ?score.as_tuple(), "Simulated match finished");
    }

    if report.rounds > 0 {
        report.average_moves = total_moves as f64 / f64::from(report.rounds);
    }
    info!(
        matches,
        rounds = report.rounds,
        match_wins = ?report.match_wins,
        "Simulation complete"
    );
    report
}
