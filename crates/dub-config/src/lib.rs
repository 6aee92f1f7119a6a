//! Layered configuration for the dub call mapper.
//!
//! [`Config`] is resolved by `ortho_config` from, in increasing precedence:
//! built-in defaults, a TOML file (`--config-path`, `DUB_CONFIG_PATH`, or a
//! discovered `.dub.toml`), `DUB_*` environment variables, and command-line
//! flags.

mod defaults;
mod logging;
mod output;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_format, default_output_format,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use output::{OutputFormat, OutputFormatParseError};

/// Resolved settings for a `dub` run.
///
/// Every layer may leave any field unset; unset fields keep the built-in
/// defaults such as [`DEFAULT_LOG_FILTER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DUB")]
#[serde(default)]
pub struct Config {
    /// `tracing` filter directive, e.g. `dub_syntax=debug`.
    #[ortho_config(default = default_log_filter().to_owned())]
    log_filter: String,
    /// Log line formatting.
    #[ortho_config(default = default_log_format())]
    log_format: LogFormat,
    /// Call graph rendering written to standard output.
    #[ortho_config(default = default_output_format())]
    format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter().to_owned(),
            log_format: default_log_format(),
            format: default_output_format(),
        }
    }
}

impl Config {
    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the call graph rendering.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }
}
