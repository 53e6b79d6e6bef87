//! The batching/backpressure engine.
//!
//! Producers call [`LogPipeline::log`] (or a per-level wrapper) from any
//! thread. The level gate and redaction run synchronously on the producer;
//! the admitted event is then handed over a channel to a single worker task
//! that owns the bounded buffer and all flush draining.

pub(crate) mod buffer;
pub mod config;
pub(crate) mod worker;

pub use self::config::{BackpressurePolicy, PipelineConfig};

use self::buffer::EventBuffer;
use self::worker::{Command, Worker};
use crate::domain::{LogEvent, LogLevel, PipelineError, SourceLocation};
use crate::redact::{RedactRule, Redactor};
use crate::sink::{ConsoleSink, Sink, SinkRegistry};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};

struct ConfigState {
    minimum_level: LogLevel,
    redactor: Arc<Redactor>,
}

/// Handle to a running pipeline.
///
/// Cheap to clone; clones share the worker, buffer, sinks, and
/// configuration. The worker stops (after a final drain) once every handle
/// has been dropped. There is no process-wide instance: construct one at the
/// composition root and pass it to call sites.
#[derive(Clone)]
pub struct LogPipeline {
    commands: mpsc::UnboundedSender<Command>,
    config: Arc<Mutex<ConfigState>>,
    registry: Arc<SinkRegistry>,
    dropped: Arc<AtomicU64>,
}

impl LogPipeline {
    /// Spawns the pipeline worker on the current tokio runtime.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;

        let dropped = Arc::new(AtomicU64::new(0));
        let registry = Arc::new(SinkRegistry::new());
        let buffer = EventBuffer::new(
            config.max_buffer_size,
            config.backpressure_policy,
            Arc::clone(&dropped),
        );

        let (commands, receiver) = mpsc::unbounded_channel();
        let worker = Worker::new(
            buffer,
            Arc::clone(&registry),
            config.batch_flush_size,
            config.flush_interval,
        );
        tokio::spawn(worker.run(receiver));

        Ok(Self {
            commands,
            config: Arc::new(Mutex::new(ConfigState {
                minimum_level: config.minimum_level,
                redactor: Arc::new(Redactor::with_default_rules()),
            })),
            registry,
            dropped,
        })
    }

    /// Composition-root convenience: default configuration at `minimum_level`,
    /// optionally pre-wired with a console sink.
    pub fn standalone(
        minimum_level: LogLevel,
        include_console: bool,
    ) -> Result<Self, PipelineError> {
        let pipeline = Self::new(PipelineConfig {
            minimum_level,
            ..PipelineConfig::default()
        })?;
        if include_console {
            pipeline.add_sink(Arc::new(ConsoleSink::new()));
        }
        Ok(pipeline)
    }

    /// The single ingestion entry point.
    ///
    /// The level gate runs first; `message` is invoked at most once, and only
    /// if the gate admits the event. Redaction happens here, on the caller's
    /// thread, so nothing unredacted ever reaches the buffer. Never blocks
    /// and never fails: an event that cannot be handed to the worker is
    /// counted as dropped.
    pub fn log<F>(
        &self,
        level: LogLevel,
        message: F,
        metadata: Option<HashMap<String, String>>,
        location: SourceLocation,
    ) where
        F: FnOnce() -> String,
    {
        // One lock acquisition covers the gate check and the enqueue-time
        // redactor; the closure runs after the lock is released.
        let redactor = {
            let state = self.config.lock();
            if level < state.minimum_level {
                return;
            }
            Arc::clone(&state.redactor)
        };

        let message = redactor.redact(&message());
        let metadata = redactor.redact_metadata(metadata);
        let event = LogEvent {
            level,
            message,
            metadata,
            location,
        };

        if self.commands.send(Command::Ingest(event)).is_err() {
            // Worker is gone (runtime shut down); ingestion stays infallible.
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn verbose<F>(&self, message: F, metadata: Option<HashMap<String, String>>, location: SourceLocation)
    where
        F: FnOnce() -> String,
    {
        self.log(LogLevel::Verbose, message, metadata, location);
    }

    pub fn debug<F>(&self, message: F, metadata: Option<HashMap<String, String>>, location: SourceLocation)
    where
        F: FnOnce() -> String,
    {
        self.log(LogLevel::Debug, message, metadata, location);
    }

    pub fn info<F>(&self, message: F, metadata: Option<HashMap<String, String>>, location: SourceLocation)
    where
        F: FnOnce() -> String,
    {
        self.log(LogLevel::Info, message, metadata, location);
    }

    pub fn warning<F>(&self, message: F, metadata: Option<HashMap<String, String>>, location: SourceLocation)
    where
        F: FnOnce() -> String,
    {
        self.log(LogLevel::Warning, message, metadata, location);
    }

    pub fn error<F>(&self, message: F, metadata: Option<HashMap<String, String>>, location: SourceLocation)
    where
        F: FnOnce() -> String,
    {
        self.log(LogLevel::Error, message, metadata, location);
    }

    pub fn minimum_level(&self) -> LogLevel {
        self.config.lock().minimum_level
    }

    pub fn set_minimum_level(&self, level: LogLevel) {
        self.config.lock().minimum_level = level;
    }

    /// Replaces the active redaction rule set as a whole. Events already
    /// enqueued keep the redaction they were given at enqueue time.
    pub fn set_privacy_rules(&self, rules: Vec<Box<dyn RedactRule>>) {
        self.config.lock().redactor = Arc::new(Redactor::new(rules));
    }

    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.registry.add(sink);
    }

    pub fn replace_sinks(&self, sinks: Vec<Arc<dyn Sink>>) {
        self.registry.replace_all(sinks);
    }

    /// Forces a drain and waits for it to complete, including every command
    /// submitted before it.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.commands.send(Command::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }

    /// Stops the periodic flush timer. Idempotent; size-triggered and
    /// explicit flushes are unaffected.
    pub fn cancel_periodic_flush(&self) {
        let _ = self.commands.send(Command::CancelTimer);
    }

    /// Overrides the eager-flush threshold (`None` restores the configured
    /// value). The backpressure cap is not affected.
    pub fn override_batch_flush_size(&self, size: Option<usize>) {
        let _ = self.commands.send(Command::OverrideBatchFlushSize(size));
    }

    /// Cumulative number of events discarded by the backpressure policy (or
    /// lost because the worker was gone) since construction.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
