use std::thread;
use std::time::Duration;
use std::time::Instant;

/// A repeating timer that drives the run loop.
///
/// Ticks never overlap: the loop calls [`Ticker::wait`], does its work, then waits again.
pub trait Ticker {
    /// Block until the next tick is due. Returns `false` if the timer will never fire again.
    fn wait(&mut self) -> bool;

    /// Stop the timer. No tick fires after this.
    fn cancel(&mut self);
}

/// Fires once every `interval`, measured from the start of the previous tick.
///
/// The time spent doing work between two ticks is subtracted from the sleep, so a slow frame
/// doesn't push every following frame back. The first tick fires immediately.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,

    /// When the previous tick fired
    last_tick: Option<Instant>,

    /// Ticks fired so far
    ticks: u64,

    /// Stop after this many ticks
    limit: Option<u64>,

    cancelled: bool,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            ticks: 0,
            limit: None,
            cancelled: false,
        }
    }

    /// Fire at most `limit` times
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) -> bool {
        if self.cancelled {
            return false;
        }

        if self.limit.is_some_and(|limit| self.ticks >= limit) {
            tracing::debug!(ticks = self.ticks, "tick limit reached");
            return false;
        }

        if let Some(last_tick) = self.last_tick {
            let time_left = self.interval.saturating_sub(last_tick.elapsed());
            thread::sleep(time_left);
        }

        self.last_tick = Some(Instant::now());
        self.ticks += 1;

        true
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}
