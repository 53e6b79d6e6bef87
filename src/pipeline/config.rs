use crate::domain::{LogLevel, PipelineError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy applied when an event arrives while the buffer is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackpressurePolicy {
    /// Evict the single oldest buffered event to make room for the new one.
    #[default]
    DropOldest,
    /// Discard the incoming event; the buffer is left untouched.
    DropNewest,
}

/// Tunables for a [`LogPipeline`](crate::pipeline::LogPipeline).
///
/// `batch_flush_size` controls eager flushing only and is independent of
/// `max_buffer_size`, the backpressure cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Backpressure cap: the buffer never holds more events than this.
    pub max_buffer_size: usize,
    /// Eager-flush threshold; must not exceed `max_buffer_size`.
    pub batch_flush_size: usize,
    /// Period of the background flush timer.
    #[serde(with = "duration_millis")]
    pub flush_interval: Duration,
    pub backpressure_policy: BackpressurePolicy,
    /// Initial minimum level; adjustable at runtime.
    pub minimum_level: LogLevel,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: 500,
            batch_flush_size: 50,
            flush_interval: Duration::from_secs(2),
            backpressure_policy: BackpressurePolicy::DropOldest,
            minimum_level: LogLevel::Verbose,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_buffer_size == 0 {
            return Err(PipelineError::InvalidCapacity {
                capacity: self.max_buffer_size,
            });
        }
        if self.batch_flush_size == 0 || self.batch_flush_size > self.max_buffer_size {
            return Err(PipelineError::InvalidBatchSize {
                batch_flush_size: self.batch_flush_size,
                capacity: self.max_buffer_size,
            });
        }
        Ok(())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = PipelineConfig {
            max_buffer_size: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(PipelineError::InvalidCapacity { capacity: 0 })
        );
    }

    #[test]
    fn batch_size_above_capacity_is_rejected() {
        let config = PipelineConfig {
            max_buffer_size: 10,
            batch_flush_size: 11,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidBatchSize { .. })
        ));
    }
}
