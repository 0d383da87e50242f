//! Match controller: rounds until one player reaches the win threshold.

use crate::config::{MatchConfig, Seat};
use crate::error::MatchError;
use crate::policy::Difficulty;
use crate::round::{InputEvent, Round, RoundResult, RoundSnapshot};
use crate::types::PlayerId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Round wins per player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    wins: [u32; 2],
}

impl MatchScore {
    /// Round wins of `player`.
    pub fn get(&self, player: PlayerId) -> u32 {
        self.wins[player.index()]
    }

    /// `(first, second)`.
    pub fn as_tuple(&self) -> (u32, u32) {
        (self.wins[0], self.wins[1])
    }

    /// The larger of the two counts.
    pub fn max(&self) -> u32 {
        self.wins[0].max(self.wins[1])
    }

    /// The strictly leading player, if any.
    pub fn leader(&self) -> Option<PlayerId> {
        match self.wins[0].cmp(&self.wins[1]) {
            std::cmp::Ordering::Greater => Some(PlayerId::First),
            std::cmp::Ordering::Less => Some(PlayerId::Second),
            std::cmp::Ordering::Equal => None,
        }
    }

    fn record(&mut self, winner: PlayerId) {
        self.wins[winner.index()] += 1;
    }

    /// Scoreboard text, e.g. `"You: 2 - Bot: 1"` against a bot.
    pub fn line(&self, vs_bot: bool) -> String {
        let (first, second) = self.as_tuple();
        if vs_bot {
            format!("You: {first} - Bot: {second}")
        } else {
            format!("P1: {first} - P2: {second}")
        }
    }
}

/// Where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Rounds are still being played.
    Playing,
    /// This player reached the threshold.
    Won(PlayerId),
    /// A round was cancelled, ending the match with no winner.
    Abandoned,
}

/// Read-only view of the match for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Round wins so far.
    pub score: MatchScore,
    /// Match status.
    pub status: MatchStatus,
    /// Opponent strength.
    pub difficulty: Difficulty,
    /// Completed (non-aborted) rounds.
    pub rounds_played: u32,
    /// The current or most recent round.
    pub round: Option<RoundSnapshot>,
}

/// A sequence of rounds sharing one score.
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    score: MatchScore,
    status: MatchStatus,
    round: Option<Round>,
    round_recorded: bool,
    rounds_played: u32,
    rng: StdRng,
}

impl Match {
    /// Creates a match with a zero score and no round yet.
    #[instrument(skip(config), fields(difficulty = %config.difficulty(), threshold = config.win_threshold()))]
    pub fn new(config: MatchConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        info!("Match created");
        Self {
            config,
            score: MatchScore::default(),
            status: MatchStatus::Playing,
            round: None,
            round_recorded: false,
            rounds_played: 0,
            rng,
        }
    }

    /// Changes the opponent strength; only allowed before the first round.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), MatchError> {
        if self.round.is_some() {
            return Err(MatchError::DifficultyLocked);
        }
        self.config = self.config.clone().with_difficulty(difficulty);
        Ok(())
    }

    /// Starts the next round on a fresh board.
    #[instrument(skip(self), fields(score = ?self.score.as_tuple()))]
    pub fn new_round(&mut self) -> Result<&mut Round, MatchError> {
        self.sync_result();
        if self.status != MatchStatus::Playing {
            return Err(MatchError::MatchOver);
        }
        if self.round.as_ref().is_some_and(|round| !round.is_finished()) {
            return Err(MatchError::RoundInProgress);
        }
        let rng = StdRng::from_rng(&mut self.rng);
        self.round_recorded = false;
        self.round = Some(Round::new(&self.config, rng));
        debug!(rounds_played = self.rounds_played, "Next round started");
        self.sync_result();
        self.round.as_mut().ok_or(MatchError::NoActiveRound)
    }

    /// Feeds one step into the active round and records its result once.
    #[instrument(skip(self))]
    pub fn step(
        &mut self,
        input: Option<InputEvent>,
        dt: Duration,
    ) -> Result<Option<RoundResult>, MatchError> {
        let round = self.round.as_mut().ok_or(MatchError::NoActiveRound)?;
        let result = round.step(input, dt);
        self.sync_result();
        Ok(result)
    }

    /// Records the active round's result if it finished and was not yet counted.
    fn sync_result(&mut self) {
        if self.round_recorded {
            return;
        }
        let Some(result) = self.round.as_ref().and_then(Round::result) else {
            return;
        };
        self.round_recorded = true;
        match result {
            RoundResult::Winner(winner) => {
                self.score.record(winner);
                self.rounds_played += 1;
                info!(%winner, score = ?self.score.as_tuple(), "Round recorded");
                if self.score.get(winner) >= *self.config.win_threshold() {
                    self.status = MatchStatus::Won(winner);
                    info!(%winner, "Match won");
                }
            }
            RoundResult::Aborted => {
                self.status = MatchStatus::Abandoned;
                info!("Match abandoned");
            }
        }
    }

    /// Abandons the match by cancelling the active round.
    pub fn quit(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.abort();
            self.sync_result();
        } else {
            self.status = MatchStatus::Abandoned;
        }
    }

    /// The active or most recent round.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Mutable access to the active or most recent round.
    ///
    /// Results reached through direct round calls are recorded on the next
    /// [`Match::step`] or [`Match::new_round`].
    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    /// Round wins so far.
    pub fn score(&self) -> MatchScore {
        self.score
    }

    /// Match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// True once won or abandoned.
    pub fn is_over(&self) -> bool {
        self.status != MatchStatus::Playing
    }

    /// The match winner, once decided.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            MatchStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Opponent strength.
    pub fn difficulty(&self) -> Difficulty {
        *self.config.difficulty()
    }

    /// The match configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Completed (non-aborted) rounds.
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// True when the second seat is a bot and the first is not.
    pub fn versus_bot(&self) -> bool {
        self.config.seat(PlayerId::First) == Seat::Human
            && self.config.seat(PlayerId::Second) == Seat::Bot
    }

    /// Final announcement text, once the match is won.
    pub fn announcement(&self) -> Option<&'static str> {
        let winner = self.winner()?;
        Some(match (self.versus_bot(), winner) {
            (true, PlayerId::First) => "You Win!",
            (true, PlayerId::Second) => "You Lose!",
            (false, PlayerId::First) => "P1 Wins!",
            (false, PlayerId::Second) => "P2 Wins!",
        })
    }

    /// A read-only copy for rendering.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            score: self.score,
            status: self.status,
            difficulty: self.difficulty(),
            rounds_played: self.rounds_played,
            round: self.round.as_ref().map(Round::snapshot),
        }
    }
}
