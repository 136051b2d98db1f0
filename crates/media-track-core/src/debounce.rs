use std::time::{Duration, Instant};

/// Coalesces bursts of input into one action after a quiet period.
///
/// Every `schedule` or `cancel` advances a sequence number; work started for
/// an older sequence is stale and its result must be dropped.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    seq: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            seq: 0,
        }
    }

    /// Restarts the quiet period from `now`, superseding anything pending.
    pub fn schedule(&mut self, now: Instant) -> u64 {
        self.seq += 1;
        self.deadline = Some(now + self.delay);
        self.seq
    }

    /// Drops the pending deadline and invalidates in-flight work.
    pub fn cancel(&mut self) {
        self.seq += 1;
        self.deadline = None;
    }

    /// Returns the sequence to run once the deadline has passed, at most once.
    pub fn fire(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.seq)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.seq == seq
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}
