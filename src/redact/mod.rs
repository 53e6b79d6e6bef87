//! Redaction pipeline: ordered text transforms applied to message and
//! metadata values on the producer's thread, before an event is buffered.
//! Nothing unredacted ever reaches the buffer or a sink.

pub mod redactor;
pub mod rules;

pub use self::redactor::Redactor;
pub use self::rules::{EmailRule, PhoneRule, TokenRule};

/// A single redaction rule: a pure `text -> text` transform.
///
/// Rules run in the order they were installed, each consuming the previous
/// rule's output. A rule should tolerate re-application (running twice must
/// not corrupt already-redacted text); the pipeline does not enforce this.
pub trait RedactRule: Send + Sync {
    fn redact(&self, input: &str) -> String;
}
