//! The bot's "thinking" delay.
//!
//! The decision itself is instantaneous; this gate only holds it back until
//! enough game time has passed so a human can see the turn happen. Time is
//! fed in explicitly by the step loop, so a paused round simply stops
//! feeding it and the countdown resumes where it left off.

use std::time::Duration;
use tracing::trace;

/// A one-shot countdown driven by explicit elapsed-time ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotTimer {
    delay: Duration,
    elapsed: Option<Duration>,
}

impl BotTimer {
    /// Creates a disarmed timer that fires `delay` after being armed.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: None,
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// True while a countdown is running.
    pub fn is_armed(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Game time accumulated since arming, if armed.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Starts a countdown unless one is already running.
    pub fn arm(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(Duration::ZERO);
        }
    }

    /// Abandons any running countdown.
    pub fn cancel(&mut self) {
        self.elapsed = None;
    }

    /// Adds `dt` to a running countdown and reports whether it has expired.
    ///
    /// An expired timer disarms itself. A disarmed timer never fires.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(elapsed) = self.elapsed.as_mut() else {
            return false;
        };
        *elapsed = elapsed.saturating_add(dt);
        trace!(elapsed_ms = elapsed.as_millis() as u64, "Bot timer advanced");
        if *elapsed >= self.delay {
            self.elapsed = None;
            true
        } else {
            false
        }
    }
}
