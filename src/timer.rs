//! Fire-once, cancelable deferred callbacks.
//!
//! The painter never sleeps or spawns. It asks a [`Scheduler`] for a timer and
//! later expects the host to call back into
//! [`Painter::fire_timer`](crate::engine::Painter::fire_timer) with the id once
//! the delay elapses, on the same event loop as pointer events. [`ManualClock`]
//! is a deterministic scheduler for hosts that poll and for tests.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::time::Duration;

/// Handle of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Source of fire-once timers.
pub trait Scheduler {
    /// Schedule a timer `delay` from now and return its handle.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// A scheduler driven by explicit calls to [`ManualClock::advance`].
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<(TimerId, Duration)>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move time forward and return the timers that came due, earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        self.now += dt;
        let now = self.now;
        let mut due: Vec<(TimerId, Duration)> = Vec::new();
        self.pending.retain(|&(id, deadline)| {
            if deadline <= now {
                due.push((id, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, deadline)| (deadline, id));
        due.into_iter().map(|(id, _)| id).collect()
    }

    /// Whether `id` is scheduled and has not fired or been cancelled.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|&(p, _)| p == id)
    }

    /// Number of timers still waiting.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for ManualClock {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push((id, self.now + delay));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|&(p, _)| p != id);
        self.pending.len() != before
    }
}
