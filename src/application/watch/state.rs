//! Debounce state machine

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Debounce interval in milliseconds
pub const DEBOUNCE_MS: u64 = 50;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No pending work
    Idle,
    /// Changes observed, waiting for the timer
    Debouncing,
}

/// Source roots changed since the last pass.
pub type DirtySet = BTreeSet<PathBuf>;

/// Fixed-cadence debounce timer over a [`DirtySet`].
///
/// A change re-arms the timer. When the timer fires, the dirty keys are
/// handed out and the timer re-arms for the next interval whether or not
/// anything was pending. Time is passed in so callers and tests control it.
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    deadline: Instant,
    dirty: DirtySet,
}

impl Debouncer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            deadline: now + interval,
            dirty: DirtySet::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        if self.dirty.is_empty() {
            SchedulerState::Idle
        } else {
            SchedulerState::Debouncing
        }
    }

    /// Record a change under `key` and re-arm the timer.
    pub fn mark_dirty(&mut self, key: PathBuf, now: Instant) {
        self.dirty.insert(key);
        self.deadline = now + self.interval;
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time left before the timer fires.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// On expiry, drain the dirty set and re-arm.
    ///
    /// Returns `None` while the timer is running, or when it fired with
    /// nothing pending.
    pub fn take_due(&mut self, now: Instant) -> Option<Vec<PathBuf>> {
        if !self.is_due(now) {
            return None;
        }
        self.deadline = now + self.interval;
        if self.dirty.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.dirty).into_iter().collect())
    }

    pub fn pending(&self) -> &DirtySet {
        &self.dirty
    }
}
