//! Countdown for confirming the removal of a picked place.
//!
//! ```text
//! Idle --arm--> Armed --elapsed/confirm--> Idle (removal applied)
//!               Armed --cancel-----------> Idle (removal discarded)
//! ```
//!
//! Each time the countdown is armed it gets a new [`Generation`].
//! Deferred expiry notifications must present the generation they
//! were scheduled for and are ignored if the countdown has been
//! re-armed or disarmed in the meantime.

use crate::entities::Id;
use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Armed {
        place_id: Id,
        started_at: Instant,
        generation: Generation,
    },
}

#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    state: State,
    last_generation: u64,
}

impl Countdown {
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: State::Idle,
            last_generation: 0,
        }
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts a new countdown and discards a running one.
    pub fn arm(&mut self, place_id: Id, now: Instant) -> Generation {
        self.last_generation += 1;
        let generation = Generation(self.last_generation);
        if let State::Armed { place_id: prev, .. } = &self.state {
            log::debug!("Resetting removal countdown of '{prev}'");
        }
        log::debug!("Removal countdown set for '{place_id}'");
        self.state = State::Armed {
            place_id,
            started_at: now,
            generation,
        };
        generation
    }

    /// Stops the countdown and returns the pending place id, if any.
    pub fn disarm(&mut self) -> Option<Id> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::Armed { place_id, .. } => {
                log::debug!("Cleaning up removal countdown of '{place_id}'");
                Some(place_id)
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }

    pub fn pending(&self) -> Option<&Id> {
        match &self.state {
            State::Idle => None,
            State::Armed { place_id, .. } => Some(place_id),
        }
    }

    pub fn generation(&self) -> Option<Generation> {
        match self.state {
            State::Idle => None,
            State::Armed { generation, .. } => Some(generation),
        }
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation() == Some(generation)
    }

    /// Remaining time until the countdown elapses.
    ///
    /// Decreases monotonically while armed and saturates at zero.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            State::Idle => None,
            State::Armed { started_at, .. } => Some(
                self.duration
                    .saturating_sub(now.saturating_duration_since(started_at)),
            ),
        }
    }

    /// Fraction of the remaining time in the range `0.0..=1.0`.
    pub fn remaining_ratio(&self, now: Instant) -> Option<f64> {
        let remaining = self.remaining(now)?;
        if self.duration.is_zero() {
            return Some(0.0);
        }
        Some(remaining.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn is_elapsed(&self, now: Instant) -> bool {
        self.remaining(now).is_some_and(|r| r.is_zero())
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}
