use super::buffer::EventBuffer;
use crate::domain::LogEvent;
use crate::sink::SinkRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

/// Commands accepted by the pipeline worker. Everything that touches the
/// buffer goes through this channel, so buffer mutation and flush draining
/// are serialized on a single task and flushes can never interleave.
pub(crate) enum Command {
    Ingest(LogEvent),
    Flush(oneshot::Sender<()>),
    CancelTimer,
    OverrideBatchFlushSize(Option<usize>),
}

/// The single consumer that owns the buffer.
///
/// Append, size-triggered flush, timer-triggered flush, and explicit flush
/// all execute here, in command-arrival order. A slow sink therefore delays
/// later buffer work; producers keep enqueueing through the channel
/// regardless.
pub(crate) struct Worker {
    buffer: EventBuffer,
    registry: Arc<SinkRegistry>,
    batch_flush_size: usize,
    batch_flush_override: Option<usize>,
    flush_interval: Duration,
    timer_canceled: bool,
}

impl Worker {
    pub(crate) fn new(
        buffer: EventBuffer,
        registry: Arc<SinkRegistry>,
        batch_flush_size: usize,
        flush_interval: Duration,
    ) -> Self {
        Self {
            buffer,
            registry,
            batch_flush_size,
            batch_flush_override: None,
            flush_interval,
            timer_canceled: false,
        }
    }

    pub(crate) async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let start = time::Instant::now() + self.flush_interval;
        let mut ticker = time::interval_at(start, self.flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Ingest(event)) => {
                        self.buffer.push(event);
                        if self.buffer.len() >= self.effective_batch_flush_size() {
                            self.flush();
                        }
                    }
                    Some(Command::Flush(ack)) => {
                        self.flush();
                        // Receiver may have given up waiting
                        let _ = ack.send(());
                    }
                    Some(Command::CancelTimer) => {
                        self.timer_canceled = true;
                    }
                    Some(Command::OverrideBatchFlushSize(size)) => {
                        self.batch_flush_override = size;
                    }
                    None => {
                        // All handles dropped: deliver what we have and stop.
                        self.flush();
                        trace!("pipeline worker exiting");
                        return;
                    }
                },
                _ = ticker.tick(), if !self.timer_canceled => {
                    self.flush();
                }
            }
        }
    }

    fn effective_batch_flush_size(&self) -> usize {
        self.batch_flush_override.unwrap_or(self.batch_flush_size)
    }

    /// Drains the buffer and delivers every event to every registered sink,
    /// events in arrival order, sinks in registration order. No-op when the
    /// buffer is empty.
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let batch = self.buffer.drain();
        let sinks = self.registry.snapshot();
        trace!(events = batch.len(), sinks = sinks.len(), "flushing");

        for event in &batch {
            for sink in &sinks {
                sink.write(event);
            }
        }
    }
}
