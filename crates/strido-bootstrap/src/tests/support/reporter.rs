//! Test double for [`BootstrapReporter`] that records structured events for
//! assertions.

use std::sync::Mutex;

use crate::bootstrap::{BootstrapError, Runtime};
use crate::health::BootstrapReporter;
use crate::notification::{ChannelOutcome, NotificationChannelDescriptor, RegistrationError};
use crate::scheduler::SchedulerConfiguration;

/// Structured bootstrap events tracked during tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// The channel was registered.
    ChannelRegistered(String),
    /// The host has no channels.
    ChannelUnsupported(String),
    /// Channel registration failed with a message.
    ChannelFailed(String),
    /// The scheduler was initialised by the named factory.
    SchedulerInitialised(String),
    /// Bootstrap completed with the given channel outcome.
    BootstrapSucceeded(ChannelOutcome),
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
}

/// Records bootstrap events for assertions.
#[derive(Debug, Default)]
pub struct RecordingBootstrapReporter {
    events: Mutex<Vec<BootstrapEvent>>,
}

impl RecordingBootstrapReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<BootstrapEvent> {
        self.events
            .lock()
            .expect("bootstrap reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: BootstrapEvent) {
        self.events
            .lock()
            .expect("bootstrap reporter mutex poisoned")
            .push(event);
    }
}

impl BootstrapReporter for RecordingBootstrapReporter {
    fn bootstrap_starting(&self) {
        self.record(BootstrapEvent::BootstrapStarting);
    }

    fn channel_registered(&self, descriptor: &NotificationChannelDescriptor) {
        self.record(BootstrapEvent::ChannelRegistered(descriptor.id().to_owned()));
    }

    fn channel_unsupported(&self, descriptor: &NotificationChannelDescriptor) {
        self.record(BootstrapEvent::ChannelUnsupported(descriptor.id().to_owned()));
    }

    fn channel_failed(&self, error: &RegistrationError) {
        self.record(BootstrapEvent::ChannelFailed(error.to_string()));
    }

    fn scheduler_initialised(&self, config: &SchedulerConfiguration) {
        self.record(BootstrapEvent::SchedulerInitialised(
            config.job_factory.name().to_owned(),
        ));
    }

    fn bootstrap_succeeded(&self, runtime: &Runtime) {
        self.record(BootstrapEvent::BootstrapSucceeded(runtime.channel()));
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(BootstrapEvent::BootstrapFailed(error.to_string()));
    }
}
