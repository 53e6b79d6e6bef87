//! Domain layer for logsluice.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEvent`: The pipeline's core data type
//! - `LogLevel`: Ordered log severity (Verbose/Debug/Info/Warning/Error)
//! - `SourceLocation`: Call-site capture carried on every event
//! - `PipelineError`: Construction-time error type

pub mod error;
pub mod event;
pub mod level;

pub use self::error::PipelineError;
pub use self::event::{LogEvent, SourceLocation};
pub use self::level::LogLevel;
