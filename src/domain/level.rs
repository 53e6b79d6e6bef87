use serde::{Deserialize, Serialize};

/// Severity of a log event.
///
/// Levels are totally ordered by ordinal: `Verbose < Debug < Info < Warning
/// < Error`. The level gate admits an event iff its level is `>=` the
/// configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Upper-case display name, used by the bundled sinks.
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad rather than write_str so sinks can column-align levels
        f.pad(self.name())
    }
}
