use super::RedactRule;
use super::rules::{EmailRule, PhoneRule, TokenRule};
use std::collections::HashMap;

/// An ordered set of redaction rules, applied as a sequential composition:
/// each rule consumes the previous rule's output.
///
/// A `Redactor` is immutable once built; replacing the active rule set swaps
/// the whole redactor atomically, so every event is redacted with the rule
/// set that was active when it was enqueued.
pub struct Redactor {
    rules: Vec<Box<dyn RedactRule>>,
}

impl Redactor {
    pub fn new(rules: Vec<Box<dyn RedactRule>>) -> Self {
        Self { rules }
    }

    /// The default rule set: emails, 10-digit phone numbers, and
    /// `token=`/`apikey=`/`secret=` values.
    pub fn with_default_rules() -> Self {
        Self::new(vec![
            Box::new(EmailRule::new()),
            Box::new(PhoneRule::new()),
            Box::new(TokenRule::new()),
        ])
    }

    pub fn redact(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_owned(), |partial, rule| rule.redact(&partial))
    }

    /// Redacts metadata values; keys are untouched and `None` stays `None`.
    pub fn redact_metadata(
        &self,
        metadata: Option<HashMap<String, String>>,
    ) -> Option<HashMap<String, String>> {
        metadata.map(|map| {
            map.into_iter()
                .map(|(key, value)| {
                    let redacted = self.redact(&value);
                    (key, redacted)
                })
                .collect()
        })
    }
}
