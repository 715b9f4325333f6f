// Coalescing rate limiter shared by pointer and zoom handling.
//
// Idle: a scheduled value runs immediately and starts a cooldown. During cooldown the
// latest value is kept and released once by `poll` when the cooldown ends; values it
// superseded are dropped. Releasing a pending value starts a new cooldown.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Throttle<T> {
    window: Duration,
    cooldown_until: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            cooldown_until: None,
            pending: None,
        }
    }

    fn cooling(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    /// Returns the value when it should run now; otherwise keeps it as the pending value.
    pub fn schedule(&mut self, now: Instant, value: T) -> Option<T> {
        if self.cooling(now) {
            self.pending = Some(value);
            return None;
        }
        self.pending = None;
        self.cooldown_until = Some(now + self.window);
        Some(value)
    }

    /// Releases the pending value once the cooldown has ended.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.cooling(now) {
            return None;
        }
        let value = self.pending.take()?;
        self.cooldown_until = Some(now + self.window);
        Some(value)
    }

    /// When `poll` has something to release.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and(self.cooldown_until)
    }
}
