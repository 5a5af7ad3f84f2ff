//! Process bootstrap for the Strido step tracker.
//!
//! Two process-wide subsystems must be ready before any feature code runs:
//! the notification channel the foreground tracking notification is posted
//! on, and the work scheduler that drives background jobs such as the
//! periodic step-count poll. [`Bootstrap`] brings them up once, in that
//! order, and hands back a [`Runtime`] carrying the scheduler handle.
//!
//! Host capabilities are injected rather than checked inline. Hosts without
//! notification channels receive [`LegacyNotificationChannels`], whose
//! registration is a no-op, so the bootstrap sequence itself never branches
//! on the host's API level.
//!
//! Each stage emits structured events through a [`BootstrapReporter`] so the
//! host can tell a missing channel from a refused scheduler configuration.
//! Whether a failed channel registration still initialises the scheduler,
//! and whether a repeated initialisation is an error, are configuration
//! choices exposed by [`strido_config`].

mod bootstrap;
mod health;
mod host;
pub mod notification;
pub mod scheduler;
mod state;
mod telemetry;

pub use bootstrap::{Bootstrap, BootstrapError, DegradedScheduler, Runtime, bootstrap_with};
pub use health::{BootstrapReporter, StructuredBootstrapReporter};
pub use host::{
    ConfigLoader, HeadlessHost, HostError, STEP_COUNT_POLL_INTERVAL, STEP_COUNT_POLL_JOB,
    STEP_COUNT_POLL_WORK, StaticConfigLoader, SystemConfigLoader, job_factory, run_host,
    run_host_with,
};
pub use notification::{
    ChannelOutcome, ChannelRegistrar, LegacyNotificationChannels, NOTIFICATION_CHANNEL_ID,
    NOTIFICATION_CHANNEL_NAME, NotificationChannelDescriptor, NotificationChannels,
    RegistrationError,
};
pub use scheduler::{
    InitError, SchedulerBootstrapper, SchedulerConfiguration, SchedulerHandle, SchedulingSubsystem,
};
pub use state::BootstrapState;
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
