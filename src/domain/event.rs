use super::level::LogLevel;
use std::collections::HashMap;

/// Call site of a log statement.
///
/// Captured at the call site with [`source_location!`](crate::source_location),
/// or supplied explicitly where a macro is inconvenient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
}

impl SourceLocation {
    /// Final path component of `file`, for compact sink output.
    pub fn short_file(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.short_file(), self.line, self.function)
    }
}

/// Captures the current file, enclosing function, and line as a
/// [`SourceLocation`].
///
/// The function name comes from `type_name` of a local item, the stable
/// stand-in for compiler-injected function literals.
#[macro_export]
macro_rules! source_location {
    () => {{
        fn here() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(here);
        $crate::domain::SourceLocation {
            file: ::std::file!(),
            function: name.strip_suffix("::here").unwrap_or(name),
            line: ::std::line!(),
        }
    }};
}

/// One captured, already-redacted log occurrence.
///
/// Built only by the ingestion path after the level gate and redaction have
/// run; immutable from then on. Consumed and discarded by the flush
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    pub metadata: Option<HashMap<String, String>>,
    pub location: SourceLocation,
}
