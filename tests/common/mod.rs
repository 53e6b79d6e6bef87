#![allow(dead_code)]

use logsluice::domain::LogEvent;
use logsluice::sink::Sink;
use parking_lot::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs a subscriber so the crate's own diagnostics (absorbed sink
/// errors, worker lifecycle) are visible when a test runs with RUST_LOG set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Records every delivered event for later assertions.
pub struct RecordingSink {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|event| event.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for RecordingSink {
    fn write(&self, event: &LogEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Records events after sleeping per write, to simulate a pathological sink.
pub struct SlowSink {
    delay: Duration,
    inner: RecordingSink,
}

impl SlowSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: RecordingSink::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl Sink for SlowSink {
    fn write(&self, event: &LogEvent) {
        std::thread::sleep(self.delay);
        self.inner.write(event);
    }
}
