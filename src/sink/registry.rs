use super::Sink;
use parking_lot::RwLock;
use std::sync::Arc;

/// The ordered, mutable list of destinations.
///
/// Read-mostly: every flush takes a snapshot; administrative writes are
/// rare. Writers are exclusive, so a snapshot always observes either the old
/// list or the new one in full, never a partial update.
pub struct SinkRegistry {
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self {
            sinks: RwLock::new(Vec::new()),
        }
    }

    pub fn add(&self, sink: Arc<dyn Sink>) {
        self.sinks.write().push(sink);
    }

    pub fn replace_all(&self, sinks: Vec<Arc<dyn Sink>>) {
        *self.sinks.write() = sinks;
    }

    pub fn snapshot(&self) -> Vec<Arc<dyn Sink>> {
        self.sinks.read().clone()
    }

    pub fn len(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
