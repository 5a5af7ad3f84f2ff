//! Bootstrap policies the host can tune without recompiling.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a repeated scheduler initialisation within one process is treated.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReinitPolicy {
    /// A second initialisation is an error.
    #[default]
    Reject,
    /// A second initialisation returns the existing scheduler handle.
    Reuse,
}

/// What bootstrap does when the notification channel cannot be registered.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ChannelFailurePolicy {
    /// Stop before the scheduler is initialised.
    #[default]
    Abort,
    /// Initialise the scheduler anyway so the host can run without
    /// notifications. The channel error is still reported.
    Continue,
}
