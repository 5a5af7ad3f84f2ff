use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::Level;

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

/// Minimum verbosity the work scheduler logs at.
///
/// Variants mirror the host platform's log priorities so the numeric value can
/// be handed straight to the scheduling subsystem.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogLevel {
    /// Everything, including internal state transitions.
    Verbose,
    /// Diagnostic detail.
    Debug,
    /// Lifecycle milestones.
    #[default]
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
    /// Conditions that should never happen.
    Assert,
}

/// Errors encountered while parsing a [`LogLevel`] from text.
pub type LogLevelParseError = strum::ParseError;

impl LogLevel {
    /// Returns the host platform's numeric priority for this level.
    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            Self::Verbose => 2,
            Self::Debug => 3,
            Self::Info => 4,
            Self::Warn => 5,
            Self::Error => 6,
            Self::Assert => 7,
        }
    }

    /// Maps the level onto the closest `tracing` level.
    ///
    /// `Assert` has no direct equivalent and is reported as `ERROR`.
    #[must_use]
    pub const fn tracing_level(self) -> Level {
        match self {
            Self::Verbose => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error | Self::Assert => Level::ERROR,
        }
    }

    /// Returns `true` when a message at `level` passes this minimum.
    #[must_use]
    pub fn admits(self, level: Self) -> bool {
        level >= self
    }
}
