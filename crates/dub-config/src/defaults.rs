use crate::{LogFormat, OutputFormat};

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default rendering of the call graph.
#[must_use]
pub const fn default_output_format() -> OutputFormat {
    OutputFormat::Html
}
