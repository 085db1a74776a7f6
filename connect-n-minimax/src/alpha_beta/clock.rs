use std::{
    cell::Cell,
    fmt::Debug,
    time::{Duration, Instant},
};

/// A monotonic time source the search polls at every node
///
/// Swapping the clock lets tests and benches run the time budget logic deterministically.
pub trait Clock: Debug {
    /// The current instant
    fn now(&self) -> Instant;
}

/// The real monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A fake clock that moves forward by a fixed step every time it is polled
///
/// The amount of work done before a budget runs out depends only on how often the search looks
/// at the clock, so two identical searches always do identical work.
#[derive(Debug, Clone)]
pub struct TickingClock {
    origin: Instant,
    step: Duration,
    ticks: Cell<u32>,
}

impl TickingClock {
    /// Create a clock that advances `step` on every poll
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            step,
            ticks: Cell::new(0),
        }
    }

    /// How many times the clock has been polled
    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }
}

impl Clock for TickingClock {
    fn now(&self) -> Instant {
        let ticks = self.ticks.get();
        self.ticks.set(ticks.saturating_add(1));

        self.origin + self.step * ticks
    }
}

/// The wall clock budget of one top level decision
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started_at: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start the budget now according to `clock`
    pub fn start(clock: &impl Clock, budget: Duration) -> Self {
        Self {
            started_at: clock.now(),
            budget,
        }
    }

    /// Whether more than the budget has elapsed since the start
    pub fn expired(&self, clock: &impl Clock) -> bool {
        clock.now().saturating_duration_since(self.started_at) > self.budget
    }

    /// Time spent since the start
    pub fn elapsed(&self, clock: &impl Clock) -> Duration {
        clock.now().saturating_duration_since(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticking_clock_expires_after_budget() {
        let clock = TickingClock::new(Duration::from_millis(10));
        let deadline = Deadline::start(&clock, Duration::from_millis(25));

        assert!(!deadline.expired(&clock)); // 10ms
        assert!(!deadline.expired(&clock)); // 20ms
        assert!(deadline.expired(&clock)); // 30ms
        assert_eq!(clock.ticks(), 4);
    }

    #[test]
    fn test_unbounded_budget_never_expires() {
        let clock = TickingClock::new(Duration::from_secs(3600));
        let deadline = Deadline::start(&clock, Duration::MAX);

        for _ in 0..100 {
            assert!(!deadline.expired(&clock));
        }
    }
}
