//! Notification channel registration.
//!
//! The host environment refuses to show a notification unless the channel it
//! targets has been registered first. Registration is create-or-update keyed
//! by channel id, so repeating it on every process start is harmless.
//!
//! Hosts below [`NOTIFICATION_CHANNELS_MIN_API_LEVEL`] have no channel
//! concept. Rather than branching at the call site, those hosts receive a
//! [`LegacyNotificationChannels`] implementation whose registration is a
//! no-op; see [`channels_for_api_level`].

mod memory;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

pub use memory::InMemoryNotificationService;

/// Stable identifier of the foreground tracking channel.
pub const NOTIFICATION_CHANNEL_ID: &str = "strido_foreground_channel";

/// User-visible name of the foreground tracking channel.
pub const NOTIFICATION_CHANNEL_NAME: &str = "Strido Tracker Service";

/// User-visible description of the foreground tracking channel.
pub const NOTIFICATION_CHANNEL_DESCRIPTION: &str =
    "Keeps Strido running in the background to track your steps 24/7";

/// First host API level that supports notification channels.
pub const NOTIFICATION_CHANNELS_MIN_API_LEVEL: ApiLevel = ApiLevel(26);

/// Host platform API level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// Wraps a raw API level.
    #[must_use]
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Returns `true` when the host supports notification channels.
    #[must_use]
    pub const fn supports_notification_channels(self) -> bool {
        self.0 >= NOTIFICATION_CHANNELS_MIN_API_LEVEL.0
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "api-{}", self.0)
    }
}

/// How strongly notifications on a channel may interrupt the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Importance {
    /// Never shown.
    None,
    /// Shown only in the collapsed shade.
    Min,
    /// Shown everywhere, but makes no sound.
    Low,
    /// Shown everywhere and makes noise.
    Default,
    /// Makes noise and peeks on screen.
    High,
}

impl fmt::Display for Importance {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Min => "min",
            Self::Low => "low",
            Self::Default => "default",
            Self::High => "high",
        };
        formatter.write_str(label)
    }
}

/// Attributes of a notification channel as registered with the host.
///
/// Descriptors built here are always quiet: low importance, no badge, no
/// vibration, and no sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannelDescriptor {
    id: String,
    name: String,
    description: String,
    importance: Importance,
    show_badge: bool,
    vibration: bool,
    sound: Option<String>,
}

impl NotificationChannelDescriptor {
    /// Builds a quiet channel descriptor.
    #[must_use]
    pub fn quiet(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            importance: Importance::Low,
            show_badge: false,
            vibration: false,
            sound: None,
        }
    }

    /// Descriptor for the channel carrying the foreground tracking
    /// notification.
    #[must_use]
    pub fn foreground() -> Self {
        Self::quiet(
            NOTIFICATION_CHANNEL_ID,
            NOTIFICATION_CHANNEL_NAME,
            NOTIFICATION_CHANNEL_DESCRIPTION,
        )
    }

    /// Channel identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Channel display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Channel description shown in the host's settings.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Channel importance.
    #[must_use]
    pub const fn importance(&self) -> Importance {
        self.importance
    }

    /// Whether launcher badges are shown for this channel.
    #[must_use]
    pub const fn show_badge(&self) -> bool {
        self.show_badge
    }

    /// Whether notifications on this channel vibrate.
    #[must_use]
    pub const fn vibration(&self) -> bool {
        self.vibration
    }

    /// Sound played for notifications on this channel, if any.
    #[must_use]
    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    /// Checks the descriptor before it is handed to the host.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.id.trim().is_empty() {
            return Err(RegistrationError::InvalidDescriptor {
                reason: "channel id must not be blank",
            });
        }
        if self.name.trim().is_empty() {
            return Err(RegistrationError::InvalidDescriptor {
                reason: "channel name must not be blank",
            });
        }
        Ok(())
    }
}

/// Result of a registration that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// The host now holds the channel with the requested attributes.
    Registered,
    /// The host has no channel concept; nothing was done.
    Unsupported,
}

impl fmt::Display for ChannelOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Registered => "registered",
            Self::Unsupported => "unsupported",
        };
        formatter.write_str(label)
    }
}

/// Errors surfaced while registering a notification channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The host notification service could not be reached.
    #[error("notification service unavailable: {message}")]
    ServiceUnavailable {
        /// Host-provided explanation.
        message: String,
    },
    /// The host refused the descriptor.
    #[error("notification service rejected channel '{id}': {message}")]
    Rejected {
        /// Identifier of the refused channel.
        id: String,
        /// Host-provided explanation.
        message: String,
    },
    /// The descriptor failed local validation.
    #[error("invalid channel descriptor: {reason}")]
    InvalidDescriptor {
        /// Which rule was broken.
        reason: &'static str,
    },
}

impl RegistrationError {
    /// Builds a [`RegistrationError::ServiceUnavailable`].
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }
}

/// Host notification subsystem capable of holding channels.
pub trait NotificationChannels: Send + Sync {
    /// Creates the channel, or updates it in place when the id already exists.
    fn create_notification_channel(
        &self,
        descriptor: &NotificationChannelDescriptor,
    ) -> Result<ChannelOutcome, RegistrationError>;
}

impl<T> NotificationChannels for Arc<T>
where
    T: NotificationChannels + ?Sized,
{
    fn create_notification_channel(
        &self,
        descriptor: &NotificationChannelDescriptor,
    ) -> Result<ChannelOutcome, RegistrationError> {
        (**self).create_notification_channel(descriptor)
    }
}

/// Channel support for hosts that predate notification channels.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyNotificationChannels;

impl NotificationChannels for LegacyNotificationChannels {
    fn create_notification_channel(
        &self,
        _descriptor: &NotificationChannelDescriptor,
    ) -> Result<ChannelOutcome, RegistrationError> {
        Ok(ChannelOutcome::Unsupported)
    }
}

/// Picks the channel implementation matching the host's API level.
#[must_use]
pub fn channels_for_api_level(
    level: ApiLevel,
    capable: Arc<dyn NotificationChannels>,
) -> Arc<dyn NotificationChannels> {
    if level.supports_notification_channels() {
        capable
    } else {
        Arc::new(LegacyNotificationChannels)
    }
}

/// Registers notification channels with the host.
#[derive(Debug, Clone)]
pub struct ChannelRegistrar<N> {
    channels: N,
}

impl<N> ChannelRegistrar<N> {
    /// Builds a registrar over the supplied host channels.
    #[must_use]
    pub const fn new(channels: N) -> Self {
        Self { channels }
    }
}

impl<N> ChannelRegistrar<N>
where
    N: NotificationChannels,
{
    /// Ensures the described channel exists.
    ///
    /// Invalid descriptors never reach the host. Host failures are returned
    /// as-is; registration is not retried.
    pub fn register_channel(
        &self,
        descriptor: &NotificationChannelDescriptor,
    ) -> Result<ChannelOutcome, RegistrationError> {
        descriptor.validate()?;
        let outcome = self.channels.create_notification_channel(descriptor)?;
        tracing::debug!(
            target: "strido::notification",
            channel = descriptor.id(),
            importance = %descriptor.importance(),
            %outcome,
            "notification channel registration finished"
        );
        Ok(outcome)
    }
}
