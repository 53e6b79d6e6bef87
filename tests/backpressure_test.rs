mod common;

use common::RecordingSink;
use logsluice::{BackpressurePolicy, LogPipeline, PipelineConfig, source_location};
use std::collections::HashSet;
use std::sync::Arc;

/// A pipeline whose buffer can overflow without any intervening flush:
/// timer canceled and the eager-flush threshold raised beyond the insert
/// count used by these tests.
fn overflow_pipeline(policy: BackpressurePolicy) -> LogPipeline {
    let pipeline = LogPipeline::new(PipelineConfig {
        backpressure_policy: policy,
        ..PipelineConfig::default()
    })
    .expect("valid config");
    pipeline.cancel_periodic_flush();
    pipeline.override_batch_flush_size(Some(1_000));
    pipeline
}

#[tokio::test]
async fn drop_oldest_keeps_the_newest_capacity_events() {
    let sink = Arc::new(RecordingSink::new());
    let pipeline = overflow_pipeline(BackpressurePolicy::DropOldest);
    pipeline.add_sink(sink.clone());

    // 600 inserts against the default capacity of 500
    for i in 0..600 {
        pipeline.info(move || format!("log {i}"), None, source_location!());
    }
    pipeline.flush().await;

    let messages = sink.messages();
    assert_eq!(messages.len(), 500);
    assert_eq!(messages.first().map(String::as_str), Some("log 100"));
    assert_eq!(messages.last().map(String::as_str), Some("log 599"));
    // Survivors run 100..=599 in submission order
    for (offset, message) in messages.iter().enumerate() {
        assert_eq!(message, &format!("log {}", offset + 100));
    }
    assert_eq!(pipeline.dropped_count(), 100);
}

#[tokio::test]
async fn drop_newest_keeps_the_oldest_capacity_events() {
    let sink = Arc::new(RecordingSink::new());
    let pipeline = overflow_pipeline(BackpressurePolicy::DropNewest);
    pipeline.add_sink(sink.clone());

    for i in 0..600 {
        pipeline.info(move || format!("log {i}"), None, source_location!());
    }
    pipeline.flush().await;

    let messages = sink.messages();
    assert_eq!(messages.len(), 500);
    assert_eq!(messages.first().map(String::as_str), Some("log 0"));
    assert_eq!(messages.last().map(String::as_str), Some("log 499"));
    assert_eq!(pipeline.dropped_count(), 100);
}

#[tokio::test]
async fn override_does_not_change_capacity() {
    let sink = Arc::new(RecordingSink::new());
    let pipeline = overflow_pipeline(BackpressurePolicy::DropOldest);
    pipeline.add_sink(sink.clone());

    // The raised threshold must not let the buffer grow past capacity
    for i in 0..700 {
        pipeline.info(move || format!("log {i}"), None, source_location!());
    }
    pipeline.flush().await;

    assert_eq!(sink.len(), 500);
    assert_eq!(pipeline.dropped_count(), 200);
}

#[tokio::test]
async fn restoring_the_default_threshold_reenables_eager_flush() {
    let sink = Arc::new(RecordingSink::new());
    let pipeline = overflow_pipeline(BackpressurePolicy::DropOldest);
    pipeline.add_sink(sink.clone());
    pipeline.override_batch_flush_size(None);

    // Default threshold is 50, so the 50th insert flushes eagerly
    for i in 0..50 {
        pipeline.info(move || format!("log {i}"), None, source_location!());
    }
    pipeline.flush().await;

    assert_eq!(sink.len(), 50);
    assert_eq!(pipeline.dropped_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_producers_lose_and_duplicate_nothing() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 50;

    let sink = Arc::new(RecordingSink::new());
    let pipeline = overflow_pipeline(BackpressurePolicy::DropOldest);
    pipeline.add_sink(sink.clone());

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    pipeline.info(
                        move || format!("producer {producer} msg {i}"),
                        None,
                        source_location!(),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer thread");
    }
    pipeline.flush().await;

    // 400 submissions fit in the 500-capacity buffer: nothing dropped,
    // nothing duplicated.
    let messages = sink.messages();
    assert_eq!(
        messages.len() as u64 + pipeline.dropped_count(),
        (PRODUCERS * PER_PRODUCER) as u64
    );
    let unique: HashSet<&String> = messages.iter().collect();
    assert_eq!(unique.len(), messages.len());
    assert_eq!(pipeline.dropped_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn observed_plus_dropped_always_equals_submitted() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 300;

    let sink = Arc::new(RecordingSink::new());
    let pipeline = overflow_pipeline(BackpressurePolicy::DropNewest);
    pipeline.add_sink(sink.clone());

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    pipeline.info(
                        move || format!("producer {producer} msg {i}"),
                        None,
                        source_location!(),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer thread");
    }
    pipeline.flush().await;

    // 1200 submissions overflow the buffer; the accounting identity still
    // holds exactly.
    assert_eq!(
        sink.len() as u64 + pipeline.dropped_count(),
        (PRODUCERS * PER_PRODUCER) as u64
    );
    assert!(pipeline.dropped_count() >= (PRODUCERS * PER_PRODUCER - 500) as u64);
}

#[tokio::test]
async fn per_producer_order_is_preserved() {
    let sink = Arc::new(RecordingSink::new());
    let pipeline = overflow_pipeline(BackpressurePolicy::DropOldest);
    pipeline.add_sink(sink.clone());

    for i in 0..100 {
        pipeline.info(move || format!("log {i}"), None, source_location!());
    }
    pipeline.flush().await;

    let messages = sink.messages();
    for (i, message) in messages.iter().enumerate() {
        assert_eq!(message, &format!("log {i}"));
    }
}
