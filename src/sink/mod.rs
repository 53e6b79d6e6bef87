//! Sinks: pluggable destinations for flushed events, plus the registry the
//! dispatcher snapshots on every flush.

pub mod console;
pub mod file;
pub mod registry;

pub use self::console::ConsoleSink;
pub use self::file::FileSink;
pub use self::registry::SinkRegistry;

use crate::domain::LogEvent;
use chrono::Local;

/// A pluggable destination.
///
/// `write` is invoked once per event per flush, synchronously, on the
/// dispatcher's task. The signature is infallible on purpose: a sink absorbs
/// its own I/O failures (the bundled sinks report them via `tracing`) and
/// must not panic the dispatcher or abort the rest of the fan-out.
pub trait Sink: Send + Sync {
    fn write(&self, event: &LogEvent);
}

/// Standard line rendering shared by the bundled sinks:
/// `timestamp LEVEL file:line function → message {metadata}`.
pub(crate) fn render_line(event: &LogEvent) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let mut line = format!(
        "{timestamp} {:7} {} → {}",
        event.level, event.location, event.message
    );
    if let Some(metadata) = &event.metadata {
        if let Ok(rendered) = serde_json::to_string(metadata) {
            line.push(' ');
            line.push_str(&rendered);
        }
    }
    line
}
