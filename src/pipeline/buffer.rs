use super::config::BackpressurePolicy;
use crate::domain::LogEvent;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome of handing one event to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Appended with room to spare.
    Stored,
    /// Appended after evicting the oldest buffered event (`DropOldest`).
    StoredEvictedOldest,
    /// Discarded without insertion (`DropNewest`).
    DroppedNewest,
}

/// The bounded, ordered queue of pending events.
///
/// Owned exclusively by the pipeline worker; all mutation is serialized
/// there, which is what preserves exact FIFO order of events as they arrive
/// at the buffer. `len() <= capacity` holds at every point outside `push`.
pub struct EventBuffer {
    entries: VecDeque<LogEvent>,
    capacity: usize,
    policy: BackpressurePolicy,
    dropped: Arc<AtomicU64>,
}

impl EventBuffer {
    pub fn new(capacity: usize, policy: BackpressurePolicy, dropped: Arc<AtomicU64>) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            policy,
            dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `event`, applying the backpressure policy at capacity.
    pub fn push(&mut self, event: LogEvent) -> PushOutcome {
        if self.entries.len() >= self.capacity {
            match self.policy {
                BackpressurePolicy::DropOldest => {
                    self.entries.pop_front();
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    self.entries.push_back(event);
                    return PushOutcome::StoredEvictedOldest;
                }
                BackpressurePolicy::DropNewest => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    return PushOutcome::DroppedNewest;
                }
            }
        }
        self.entries.push_back(event);
        PushOutcome::Stored
    }

    /// Takes the entire buffered contents in arrival order, leaving the
    /// buffer empty. Allocated capacity is kept for reuse.
    pub fn drain(&mut self) -> Vec<LogEvent> {
        self.entries.drain(..).collect()
    }
}
