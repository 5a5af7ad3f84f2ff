//! Process-wide bootstrap progress.

use std::fmt;

/// Stage the bootstrap sequence has reached.
///
/// Progress is strictly forward: `Uninitialized` → `ChannelReady` → `Ready`,
/// with any failure moving to `Failed`. Both `Ready` and `Failed` are terminal
/// for the life of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BootstrapState {
    /// Nothing has run yet.
    #[default]
    Uninitialized,
    /// The notification channel exists, or the host has no channels.
    ChannelReady,
    /// The work scheduler is initialised.
    Ready,
    /// A step failed; restarting the process is the only way back.
    Failed,
}

impl BootstrapState {
    /// Returns `true` when moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::ChannelReady | Self::Failed)
                | (Self::ChannelReady, Self::Ready | Self::Failed)
        )
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::ChannelReady => "channel_ready",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        formatter.write_str(label)
    }
}
