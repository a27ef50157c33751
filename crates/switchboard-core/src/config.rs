//! Runtime configuration for an embedded switchboard.
//!
//! Hosts deserialise a [`SwitchboardConfig`] from whatever configuration
//! source they already carry; every field has a default so an empty document
//! yields a working setup.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_MAX_COMMAND_BYTES: usize = 64 * 1024;

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

/// Configuration consumed by [`Switchboard::with_config`] and
/// [`telemetry::initialise`].
///
/// [`Switchboard::with_config`]: crate::Switchboard::with_config
/// [`telemetry::initialise`]: crate::telemetry::initialise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwitchboardConfig {
    /// Tracing filter expression applied when telemetry is initialised.
    log_filter: String,
    /// Output format for the telemetry subscriber.
    log_format: LogFormat,
    /// Upper bound on accepted command text, in bytes.
    max_command_bytes: usize,
}

impl Default for SwitchboardConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::default(),
            max_command_bytes: DEFAULT_MAX_COMMAND_BYTES,
        }
    }
}

impl SwitchboardConfig {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the telemetry output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the command size bound in bytes.
    #[must_use]
    pub const fn max_command_bytes(&self) -> usize {
        self.max_command_bytes
    }

    /// Replaces the tracing filter expression.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Replaces the telemetry output format.
    #[must_use]
    pub const fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Replaces the command size bound.
    #[must_use]
    pub const fn with_max_command_bytes(mut self, bytes: usize) -> Self {
        self.max_command_bytes = bytes;
        self
    }
}
