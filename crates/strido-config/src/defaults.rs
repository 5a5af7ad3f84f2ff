use crate::logging::{LogFormat, LogLevel};
use crate::policy::{ChannelFailurePolicy, ReinitPolicy};

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Host API level assumed when none is configured.
pub const DEFAULT_HOST_API_LEVEL: u32 = 35;

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default minimum verbosity for the work scheduler.
#[must_use]
pub const fn default_scheduler_log_level() -> LogLevel {
    LogLevel::Info
}

/// Default handling of repeated scheduler initialisation.
#[must_use]
pub const fn default_reinit_policy() -> ReinitPolicy {
    ReinitPolicy::Reject
}

/// Default handling of channel registration failures.
#[must_use]
pub const fn default_channel_failure_policy() -> ChannelFailurePolicy {
    ChannelFailurePolicy::Abort
}

/// Default host API level.
#[must_use]
pub const fn default_host_api_level() -> u32 {
    DEFAULT_HOST_API_LEVEL
}
