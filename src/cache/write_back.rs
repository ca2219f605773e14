use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// Coalescing set of prefixes waiting to be written to the persistent cache.
///
/// Every schedule re-arms a single deadline, so a burst of composites produces one drain.
/// The queue stores prefixes only; the owner re-reads variant state when draining.
#[derive(Clone, Debug)]
pub struct WriteBackQueue {
    pending: BTreeSet<String>,
    deadline: Option<Instant>,
    delay: Duration,
}

impl WriteBackQueue {
    /// Empty queue with the given idle delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: BTreeSet::new(),
            deadline: None,
            delay,
        }
    }

    /// Idle delay between the last schedule and the drain.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current deadline, if anything is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Mark `prefix` dirty and push the deadline to `now + delay`.
    pub fn schedule(&mut self, prefix: &str, now: Instant) {
        self.pending.insert(prefix.to_string());
        self.deadline = Some(now + self.delay);
    }

    /// Return `true` when prefixes are waiting.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Return `true` when the deadline has passed at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Drain pending prefixes if the deadline has passed; otherwise return nothing.
    pub fn take_due(&mut self, now: Instant) -> Vec<String> {
        if !self.is_due(now) {
            return Vec::new();
        }
        self.take_all()
    }

    /// Drain pending prefixes regardless of the deadline.
    pub fn take_all(&mut self) -> Vec<String> {
        self.deadline = None;
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Forget a prefix, e.g. after its variant was evicted.
    pub fn discard(&mut self, prefix: &str) {
        self.pending.remove(prefix);
        if self.pending.is_empty() {
            self.deadline = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/write_back.rs"]
mod tests;
