//! Frame clock driving a match.
//!
//! The orchestrator owns the [`Match`], polls at most one input per frame
//! and reports what changed to the UI over a channel. All game rules live
//! in `geratrix_core`; this loop only measures time and relays events.

use crate::display;
use anyhow::Result;
use geratrix_core::{
    InputEvent, Match, MatchError, MatchStatus, PlayerId, RoundPhase, RoundResult, Seat,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// Frame period of the game loop (60 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Rendered match state.
    StateChanged(String),
    /// A bot seat started its countdown.
    BotThinking(PlayerId),
    /// A round ended.
    RoundOver {
        /// How it ended.
        result: RoundResult,
        /// `(first, second)` round wins after recording it.
        score: (u32, u32),
    },
    /// The match ended.
    MatchOver {
        /// Final status.
        status: MatchStatus,
        /// Announcement text, when there is a winner.
        announcement: Option<String>,
    },
}

/// Runs one match against a stream of inputs.
pub struct Orchestrator {
    game: Match,
    input_rx: mpsc::UnboundedReceiver<InputEvent>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    frame_interval: Duration,
    last_render: Option<String>,
    thinking: Option<PlayerId>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        game: Match,
        input_rx: mpsc::UnboundedReceiver<InputEvent>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game,
            input_rx,
            event_tx,
            frame_interval: FRAME_INTERVAL,
            last_render: None,
            thinking: None,
        }
    }

    /// Overrides the frame period.
    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// The match being played.
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Runs the frame loop until the match is over and returns it.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<Match> {
        info!("Starting game orchestration");

        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();

        loop {
            interval.tick().await;
            let now = Instant::now();
            let dt = now.duration_since(last);
            last = now;

            let input = match self.input_rx.try_recv() {
                Ok(input) => Some(input),
                Err(mpsc::error::TryRecvError::Empty) => None,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    if self.needs_human() {
                        info!("Input closed, quitting match");
                        Some(InputEvent::Cancel)
                    } else {
                        None
                    }
                }
            };

            if !self.tick(input, dt)? {
                return Ok(self.game);
            }
        }
    }

    /// Advances the match by one frame.
    ///
    /// Starts the next round when none is running. Returns `false` once the
    /// match is over.
    #[instrument(skip(self))]
    pub fn tick(&mut self, input: Option<InputEvent>, dt: Duration) -> Result<bool> {
        if self.game.is_over() {
            return Ok(false);
        }

        if self.game.round().is_none_or(|round| round.is_finished()) {
            self.game.new_round()?;
            debug!(rounds_played = self.game.rounds_played(), "Round opened");
            self.publish_state()?;
            if self.game.is_over() {
                return self.finish();
            }
        }

        let result = match self.game.step(input, dt) {
            Ok(result) => result,
            Err(MatchError::NoActiveRound) => None,
            Err(e) => return Err(e.into()),
        };

        self.publish_thinking()?;
        self.publish_state()?;

        if let Some(result) = result {
            self.thinking = None;
            self.event_tx.send(GameEvent::RoundOver {
                result,
                score: self.game.score().as_tuple(),
            })?;
            if self.game.is_over() {
                return self.finish();
            }
        }
        Ok(true)
    }

    fn finish(&mut self) -> Result<bool> {
        let status = self.game.status();
        info!(?status, score = ?self.game.score().as_tuple(), "Match finished");
        self.event_tx.send(GameEvent::MatchOver {
            status,
            announcement: self.game.announcement().map(str::to_string),
        })?;
        Ok(false)
    }

    /// True when any seat is driven by input.
    fn needs_human(&self) -> bool {
        PlayerId::BOTH
            .iter()
            .any(|player| self.game.config().seat(*player) == Seat::Human)
    }

    fn publish_thinking(&mut self) -> Result<()> {
        let waiting_bot = self.game.round().and_then(|round| match round.phase() {
            RoundPhase::InProgress(player) if round.bot_timer().is_armed() => Some(player),
            _ => None,
        });
        if waiting_bot != self.thinking {
            self.thinking = waiting_bot;
            if let Some(player) = waiting_bot {
                self.event_tx.send(GameEvent::BotThinking(player))?;
            }
        }
        Ok(())
    }

    fn publish_state(&mut self) -> Result<()> {
        let rendered = display::render(&self.game);
        if self.last_render.as_deref() != Some(rendered.as_str()) {
            self.event_tx.send(GameEvent::StateChanged(rendered.clone()))?;
            self.last_render = Some(rendered);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geratrix_core::MatchConfig;

    fn channels() -> (
        mpsc::UnboundedSender<InputEvent>,
        mpsc::UnboundedReceiver<InputEvent>,
        mpsc::UnboundedSender<GameEvent>,
        mpsc::UnboundedReceiver<GameEvent>,
    ) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (input_tx, input_rx, event_tx, event_rx)
    }

    #[test]
    fn test_tick_starts_a_round() {
        let (_input_tx, input_rx, event_tx, mut event_rx) = channels();
        let game = Match::new(MatchConfig::versus_human().with_seed(Some(5)));
        let mut orchestrator = Orchestrator::new(game, input_rx, event_tx);

        assert!(orchestrator.tick(None, Duration::ZERO).unwrap());
        assert!(orchestrator.game().round().is_some());
        assert!(matches!(event_rx.try_recv(), Ok(GameEvent::StateChanged(_))));
    }

    #[test]
    fn test_cancel_ends_match() {
        let (_input_tx, input_rx, event_tx, mut event_rx) = channels();
        let game = Match::new(MatchConfig::versus_human().with_seed(Some(5)));
        let mut orchestrator = Orchestrator::new(game, input_rx, event_tx);

        orchestrator.tick(None, Duration::ZERO).unwrap();
        assert!(!orchestrator.tick(Some(InputEvent::Cancel), Duration::ZERO).unwrap());

        let events: Vec<_> = std::iter::from_fn(|| event_rx.try_recv().ok()).collect();
        assert!(events.contains(&GameEvent::RoundOver {
            result: RoundResult::Aborted,
            score: (0, 0),
        }));
        assert_eq!(
            events.last(),
            Some(&GameEvent::MatchOver {
                status: MatchStatus::Abandoned,
                announcement: None,
            })
        );
    }

    #[tokio::test]
    async fn test_bot_match_runs_to_completion() {
        let (_input_tx, input_rx, event_tx, mut event_rx) = channels();
        let config = MatchConfig::new()
            .with_seats([Seat::Bot, Seat::Bot])
            .with_bot_delay(Duration::ZERO)
            .with_seed(Some(11));
        let game = Orchestrator::new(Match::new(config), input_rx, event_tx)
            .with_frame_interval(Duration::from_millis(1))
            .run()
            .await
            .unwrap();

        assert_eq!(game.score().max(), 3);
        let events: Vec<_> = std::iter::from_fn(|| event_rx.try_recv().ok()).collect();
        let rounds = events
            .iter()
            .filter(|event| matches!(event, GameEvent::RoundOver { .. }))
            .count() as u32;
        assert_eq!(rounds, game.rounds_played());
        assert!(matches!(events.last(), Some(GameEvent::MatchOver { .. })));
    }
}
