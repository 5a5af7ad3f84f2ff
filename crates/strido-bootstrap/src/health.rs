//! Structured health reporting for bootstrap lifecycle events.

use std::sync::Arc;

use crate::bootstrap::{BootstrapError, Runtime};
use crate::notification::{NotificationChannelDescriptor, RegistrationError};
use crate::scheduler::SchedulerConfiguration;

/// Observer trait used to surface bootstrap events to telemetry sinks.
pub trait BootstrapReporter: Send + Sync {
    /// Invoked before the channel is registered.
    fn bootstrap_starting(&self);

    /// Invoked after the host accepted the channel.
    fn channel_registered(&self, descriptor: &NotificationChannelDescriptor);

    /// Invoked when the host has no channel support.
    fn channel_unsupported(&self, descriptor: &NotificationChannelDescriptor);

    /// Invoked when channel registration fails.
    fn channel_failed(&self, error: &RegistrationError);

    /// Invoked after the work scheduler is initialised.
    fn scheduler_initialised(&self, config: &SchedulerConfiguration);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, runtime: &Runtime);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);
}

impl<T> BootstrapReporter for Arc<T>
where
    T: BootstrapReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn channel_registered(&self, descriptor: &NotificationChannelDescriptor) {
        (**self).channel_registered(descriptor);
    }

    fn channel_unsupported(&self, descriptor: &NotificationChannelDescriptor) {
        (**self).channel_unsupported(descriptor);
    }

    fn channel_failed(&self, error: &RegistrationError) {
        (**self).channel_failed(error);
    }

    fn scheduler_initialised(&self, config: &SchedulerConfiguration) {
        (**self).scheduler_initialised(config);
    }

    fn bootstrap_succeeded(&self, runtime: &Runtime) {
        (**self).bootstrap_succeeded(runtime);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredBootstrapReporter;

impl StructuredBootstrapReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BootstrapReporter for StructuredBootstrapReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: "strido::health",
            event = "bootstrap_starting",
            "starting process bootstrap"
        );
    }

    fn channel_registered(&self, descriptor: &NotificationChannelDescriptor) {
        tracing::info!(
            target: "strido::health",
            event = "channel_registered",
            channel = descriptor.id(),
            name = descriptor.name(),
            importance = %descriptor.importance(),
            "notification channel registered"
        );
    }

    fn channel_unsupported(&self, descriptor: &NotificationChannelDescriptor) {
        tracing::info!(
            target: "strido::health",
            event = "channel_unsupported",
            channel = descriptor.id(),
            "host has no notification channels; skipping registration"
        );
    }

    fn channel_failed(&self, error: &RegistrationError) {
        tracing::warn!(
            target: "strido::health",
            event = "channel_failed",
            error = %error,
            "notification channel registration failed"
        );
    }

    fn scheduler_initialised(&self, config: &SchedulerConfiguration) {
        tracing::info!(
            target: "strido::health",
            event = "scheduler_initialised",
            min_log_level = %config.min_log_level,
            job_factory = config.job_factory.name(),
            "work scheduler initialised"
        );
    }

    fn bootstrap_succeeded(&self, runtime: &Runtime) {
        tracing::info!(
            target: "strido::health",
            event = "bootstrap_succeeded",
            channel = %runtime.channel(),
            "process bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: "strido::health",
            event = "bootstrap_failed",
            error = %error,
            "process bootstrap failed"
        );
    }
}
