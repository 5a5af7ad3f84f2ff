//! Shared configuration for the Strido process bootstrap.
//!
//! Configuration is layered by `ortho_config`: defaults, configuration files,
//! `STRIDO_*` environment variables, then command-line flags, with later
//! sources winning. The resolved [`Config`] drives telemetry, the work
//! scheduler's minimum log level, and the bootstrap failure policies.

mod defaults;
mod logging;
mod policy;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_HOST_API_LEVEL, DEFAULT_LOG_FILTER, default_channel_failure_policy,
    default_host_api_level, default_log_filter, default_log_filter_string, default_log_format,
    default_reinit_policy, default_scheduler_log_level,
};
pub use logging::{LogFormat, LogFormatParseError, LogLevel, LogLevelParseError};
pub use policy::{ChannelFailurePolicy, ReinitPolicy};

/// Resolved bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "STRIDO")]
#[serde(default)]
pub struct Config {
    /// `tracing` filter expression for the process.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for structured logs.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Minimum verbosity handed to the work scheduler.
    #[serde(default = "default_scheduler_log_level")]
    pub scheduler_log_level: LogLevel,
    /// Treatment of a repeated scheduler initialisation.
    #[serde(default = "default_reinit_policy")]
    pub reinit_policy: ReinitPolicy,
    /// Treatment of a failed channel registration.
    #[serde(default = "default_channel_failure_policy")]
    pub channel_failure_policy: ChannelFailurePolicy,
    /// API level reported by the host environment.
    #[serde(default = "default_host_api_level")]
    pub host_api_level: u32,
}

impl Config {
    /// Returns the configured log filter.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the scheduler's minimum log level.
    #[must_use]
    pub const fn scheduler_log_level(&self) -> LogLevel {
        self.scheduler_log_level
    }

    /// Returns the repeated-initialisation policy.
    #[must_use]
    pub const fn reinit_policy(&self) -> ReinitPolicy {
        self.reinit_policy
    }

    /// Returns the channel failure policy.
    #[must_use]
    pub const fn channel_failure_policy(&self) -> ChannelFailurePolicy {
        self.channel_failure_policy
    }

    /// Returns the host API level.
    #[must_use]
    pub const fn host_api_level(&self) -> u32 {
        self.host_api_level
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            scheduler_log_level: default_scheduler_log_level(),
            reinit_policy: default_reinit_policy(),
            channel_failure_policy: default_channel_failure_policy(),
            host_api_level: default_host_api_level(),
        }
    }
}
