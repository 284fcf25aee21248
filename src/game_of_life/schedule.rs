//! Deferred tick scheduling for auto-play

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

/// Something that can arrange for a tick to be delivered after a delay.
///
/// Ticks are delivered by the owner of the event loop, never from another
/// thread, so at most one step runs at a time.
pub trait Scheduler {
    fn schedule_tick(&mut self, delay: Duration);
}

/// Single-threaded queue of pending ticks ordered by due time
#[derive(Debug, Default)]
pub struct TickQueue {
    pending: BinaryHeap<Reverse<Instant>>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks waiting to fire
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.peek().map(|Reverse(due)| *due)
    }

    /// Remove the earliest tick regardless of whether it is due
    pub fn pop_next(&mut self) -> Option<Instant> {
        self.pending.pop().map(|Reverse(due)| due)
    }

    /// Remove the earliest tick if it is due at `now`
    pub fn pop_due(&mut self, now: Instant) -> Option<Instant> {
        match self.next_due() {
            Some(due) if due <= now => self.pop_next(),
            _ => None,
        }
    }

    /// Block until the earliest tick is due, then remove it
    pub fn wait_next(&mut self) -> Option<Instant> {
        let due = self.next_due()?;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        self.pop_next()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Scheduler for TickQueue {
    fn schedule_tick(&mut self, delay: Duration) {
        self.pending.push(Reverse(Instant::now() + delay));
    }
}
