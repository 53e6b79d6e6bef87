use thiserror::Error;

/// Errors surfaced when constructing a pipeline.
///
/// Steady-state ingestion is infallible by design: a rejected or dropped
/// event is signaled only through the dropped-event counter, never as an
/// error to the producer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Invalid buffer capacity: {capacity}")]
    InvalidCapacity { capacity: usize },

    #[error("Batch flush size {batch_flush_size} exceeds buffer capacity {capacity}")]
    InvalidBatchSize {
        batch_flush_size: usize,
        capacity: usize,
    },
}
