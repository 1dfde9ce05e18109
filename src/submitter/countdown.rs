use std::time::{Duration, Instant};

/// Length of one countdown step.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Wall-clock schedule for acknowledgment ticks.
///
/// Dropping the value cancels the countdown; the submitter holds at most one.
#[derive(Debug)]
pub(crate) struct Countdown {
    next_tick: Instant,
}

impl Countdown {
    pub(crate) fn start(now: Instant) -> Self {
        Self {
            next_tick: now + TICK_INTERVAL,
        }
    }

    pub(crate) fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Consume one due tick, returning `false` once `now` is before the next deadline.
    pub(crate) fn take_due(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.next_tick += TICK_INTERVAL;
        true
    }
}
