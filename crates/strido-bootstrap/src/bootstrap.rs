//! Process bootstrap orchestration.

use std::sync::Arc;

use thiserror::Error;

use strido_config::{ChannelFailurePolicy, Config, LogLevel};

use crate::health::BootstrapReporter;
use crate::notification::{
    ChannelOutcome, ChannelRegistrar, NotificationChannelDescriptor, NotificationChannels,
    RegistrationError,
};
use crate::scheduler::{
    InitError, JobFactory, SchedulerBootstrapper, SchedulerConfiguration, SchedulerHandle,
    SchedulingSubsystem,
};
use crate::state::BootstrapState;

/// Process services available once bootstrap succeeds.
#[derive(Debug, Clone)]
pub struct Runtime {
    scheduler: SchedulerHandle,
    channel: ChannelOutcome,
}

impl Runtime {
    /// Handle for submitting background work.
    #[must_use]
    pub const fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    /// What channel registration did on this host.
    #[must_use]
    pub const fn channel(&self) -> ChannelOutcome {
        self.channel
    }
}

/// Scheduler status carried by a channel failure.
#[derive(Debug, Clone)]
pub enum DegradedScheduler {
    /// Bootstrap stopped before touching the scheduler.
    NotAttempted,
    /// The scheduler was initialised; notifications are unavailable.
    Ready(SchedulerHandle),
    /// The scheduler failed as well.
    Failed(InitError),
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The notification channel could not be registered.
    #[error("failed to register notification channel: {source}")]
    Channel {
        /// Underlying registration error.
        #[source]
        source: RegistrationError,
        /// Scheduler status under the configured channel failure policy.
        scheduler: DegradedScheduler,
    },
    /// The work scheduler could not be initialised.
    #[error("failed to initialise work scheduler: {source}")]
    Scheduler {
        /// Underlying initialisation error.
        #[source]
        source: InitError,
    },
    /// An earlier bootstrap attempt in this process failed.
    #[error("bootstrap already failed in this process; restart to retry")]
    PreviouslyFailed,
}

impl BootstrapError {
    /// Scheduler left usable for degraded operation, if any.
    #[must_use]
    pub const fn degraded_scheduler(&self) -> Option<&SchedulerHandle> {
        match self {
            Self::Channel {
                scheduler: DegradedScheduler::Ready(handle),
                ..
            } => Some(handle),
            _ => None,
        }
    }
}

/// Runs the channel registration and scheduler initialisation in order.
pub struct Bootstrap<N, S> {
    registrar: ChannelRegistrar<N>,
    scheduler: SchedulerBootstrapper<S>,
    descriptor: NotificationChannelDescriptor,
    scheduler_log_level: LogLevel,
    channel_failure_policy: ChannelFailurePolicy,
    job_factory: Arc<dyn JobFactory>,
    reporter: Arc<dyn BootstrapReporter>,
    state: BootstrapState,
    runtime: Option<Runtime>,
}

impl<N, S> Bootstrap<N, S> {
    /// Wires the bootstrap sequence over the host's collaborators.
    #[must_use]
    pub fn new(
        config: &Config,
        channels: N,
        subsystem: S,
        job_factory: Arc<dyn JobFactory>,
        reporter: Arc<dyn BootstrapReporter>,
    ) -> Self {
        Self {
            registrar: ChannelRegistrar::new(channels),
            scheduler: SchedulerBootstrapper::new(subsystem, config.reinit_policy()),
            descriptor: NotificationChannelDescriptor::foreground(),
            scheduler_log_level: config.scheduler_log_level(),
            channel_failure_policy: config.channel_failure_policy(),
            job_factory,
            reporter,
            state: BootstrapState::Uninitialized,
            runtime: None,
        }
    }

    /// Stage reached so far.
    #[must_use]
    pub const fn state(&self) -> BootstrapState {
        self.state
    }

    /// Builds the configuration handed to the scheduler.
    #[must_use]
    pub fn scheduler_configuration(&self) -> SchedulerConfiguration {
        SchedulerConfiguration::new(self.scheduler_log_level, Arc::clone(&self.job_factory))
    }

    fn advance(&mut self, next: BootstrapState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal bootstrap transition from {} to {next}",
            self.state
        );
        tracing::debug!(
            target: "strido::bootstrap",
            from = %self.state,
            to = %next,
            "bootstrap state changed"
        );
        self.state = next;
    }

    fn fail(&mut self, error: BootstrapError) -> BootstrapError {
        self.advance(BootstrapState::Failed);
        self.reporter.bootstrap_failed(&error);
        error
    }
}

impl<N, S> Bootstrap<N, S>
where
    N: NotificationChannels,
    S: SchedulingSubsystem,
{
    /// Runs the bootstrap sequence.
    ///
    /// The scheduler is only initialised once the channel is registered (or
    /// the host has no channels). A repeated call after success follows the
    /// configured reinit policy and leaves the state at `Ready`; a call after
    /// failure returns [`BootstrapError::PreviouslyFailed`].
    pub fn bootstrap(&mut self) -> Result<Runtime, BootstrapError> {
        match self.state {
            BootstrapState::Failed => return Err(BootstrapError::PreviouslyFailed),
            BootstrapState::Ready => return self.bootstrap_again(),
            BootstrapState::Uninitialized | BootstrapState::ChannelReady => {}
        }

        self.reporter.bootstrap_starting();

        let channel = match self.register_channel() {
            Ok(outcome) => outcome,
            Err(source) => return Err(self.channel_failure(source)),
        };
        self.advance(BootstrapState::ChannelReady);

        let scheduler = match self.initialise_scheduler() {
            Ok(handle) => handle,
            Err(source) => return Err(self.fail(BootstrapError::Scheduler { source })),
        };
        self.advance(BootstrapState::Ready);

        let runtime = Runtime { scheduler, channel };
        self.runtime = Some(runtime.clone());
        self.reporter.bootstrap_succeeded(&runtime);
        Ok(runtime)
    }

    fn register_channel(&self) -> Result<ChannelOutcome, RegistrationError> {
        let outcome = self.registrar.register_channel(&self.descriptor)?;
        match outcome {
            ChannelOutcome::Registered => self.reporter.channel_registered(&self.descriptor),
            ChannelOutcome::Unsupported => self.reporter.channel_unsupported(&self.descriptor),
        }
        Ok(outcome)
    }

    fn initialise_scheduler(&self) -> Result<SchedulerHandle, InitError> {
        let config = self.scheduler_configuration();
        let handle = self.scheduler.initialize_scheduler(config.clone())?;
        self.reporter.scheduler_initialised(&config);
        Ok(handle)
    }

    fn channel_failure(&mut self, source: RegistrationError) -> BootstrapError {
        self.reporter.channel_failed(&source);
        let scheduler = match self.channel_failure_policy {
            ChannelFailurePolicy::Abort => DegradedScheduler::NotAttempted,
            ChannelFailurePolicy::Continue => match self.initialise_scheduler() {
                Ok(handle) => DegradedScheduler::Ready(handle),
                Err(error) => DegradedScheduler::Failed(error),
            },
        };
        self.fail(BootstrapError::Channel { source, scheduler })
    }

    fn bootstrap_again(&self) -> Result<Runtime, BootstrapError> {
        let scheduler = self
            .scheduler
            .initialize_scheduler(self.scheduler_configuration())
            .map_err(|source| BootstrapError::Scheduler { source })?;
        let channel = self
            .runtime
            .as_ref()
            .map_or(ChannelOutcome::Registered, Runtime::channel);
        Ok(Runtime { scheduler, channel })
    }
}

/// Bootstraps the process once using the supplied collaborators.
pub fn bootstrap_with<N, S>(
    config: &Config,
    channels: N,
    subsystem: S,
    job_factory: Arc<dyn JobFactory>,
    reporter: Arc<dyn BootstrapReporter>,
) -> Result<Runtime, BootstrapError>
where
    N: NotificationChannels,
    S: SchedulingSubsystem,
{
    Bootstrap::new(config, channels, subsystem, job_factory, reporter).bootstrap()
}
