use super::{Sink, render_line};
use crate::domain::LogEvent;

/// Writes each event as one formatted line to stdout.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, event: &LogEvent) {
        println!("{}", render_line(event));
    }
}
