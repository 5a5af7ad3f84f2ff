//! BDD test world: wires recording host doubles into a bootstrap and keeps
//! the results for step functions.

use std::cell::RefCell;
use std::sync::Arc;

use strido_config::{ChannelFailurePolicy, Config, ReinitPolicy};

use crate::bootstrap::{Bootstrap, BootstrapError, Runtime};
use crate::host::{STEP_COUNT_POLL_INTERVAL, STEP_COUNT_POLL_JOB, STEP_COUNT_POLL_WORK, job_factory};
use crate::notification::{
    ApiLevel, NotificationChannelDescriptor, NotificationChannels, RegistrationError,
    channels_for_api_level,
};
use crate::scheduler::{SubmitError, WorkRequest};
use crate::state::BootstrapState;

use super::call_log::CallLog;
use super::notification_host::RecordingNotificationHost;
use super::reporter::RecordingBootstrapReporter;
use super::scheduling::RecordingSchedulingSubsystem;

type WorldBootstrap = Bootstrap<Arc<dyn NotificationChannels>, RecordingSchedulingSubsystem>;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    config: Config,
    pub log: CallLog,
    pub notifications: RecordingNotificationHost,
    pub scheduling: RecordingSchedulingSubsystem,
    pub reporter: Arc<RecordingBootstrapReporter>,
    bootstrap: Option<WorldBootstrap>,
    result: Option<Result<Runtime, BootstrapError>>,
    submit_result: Option<Result<(), SubmitError>>,
}

impl TestWorld {
    /// Builds a world over a capable host with default configuration.
    #[must_use]
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            config: Config::default(),
            notifications: RecordingNotificationHost::new(log.clone()),
            scheduling: RecordingSchedulingSubsystem::new(log.clone()),
            log,
            reporter: Arc::new(RecordingBootstrapReporter::default()),
            bootstrap: None,
            result: None,
            submit_result: None,
        }
    }

    /// Reports the given host API level.
    pub fn use_api_level(&mut self, level: u32) {
        self.config.host_api_level = level;
    }

    /// Selects how channel failures are handled.
    pub fn use_channel_failure_policy(&mut self, policy: ChannelFailurePolicy) {
        self.config.channel_failure_policy = policy;
    }

    /// Selects how repeated initialisation is handled.
    pub fn use_reinit_policy(&mut self, policy: ReinitPolicy) {
        self.config.reinit_policy = policy;
    }

    /// Makes the notification host unreachable.
    pub fn break_notifications(&self) {
        self.notifications
            .fail_with(RegistrationError::unavailable("service binder died"));
    }

    /// Makes the scheduling subsystem refuse initialisation.
    pub fn reject_scheduler(&self, message: &str) {
        self.scheduling.reject_with(message);
    }

    /// Runs the bootstrap sequence, reusing the same bootstrap across calls.
    pub fn bootstrap(&mut self) {
        let bootstrap = self.bootstrap.get_or_insert_with(|| {
            let level = ApiLevel::new(self.config.host_api_level());
            let channels = channels_for_api_level(level, Arc::new(self.notifications.clone()));
            Bootstrap::new(
                &self.config,
                channels,
                self.scheduling.clone(),
                job_factory(),
                self.reporter.clone(),
            )
        });
        self.result = Some(bootstrap.bootstrap());
    }

    /// Queues the step-count poll through the bootstrapped scheduler.
    pub fn submit_step_poll(&mut self) {
        let Some(Ok(runtime)) = self.result.as_ref() else {
            return;
        };
        self.submit_result = Some(runtime.scheduler().enqueue(WorkRequest::periodic(
            STEP_COUNT_POLL_WORK,
            STEP_COUNT_POLL_JOB,
            STEP_COUNT_POLL_INTERVAL,
        )));
    }

    /// Returns the last bootstrap result.
    #[must_use]
    pub const fn result(&self) -> Option<&Result<Runtime, BootstrapError>> {
        self.result.as_ref()
    }

    /// Returns the runtime when the last bootstrap succeeded.
    #[must_use]
    pub fn runtime(&self) -> Option<&Runtime> {
        self.result.as_ref().and_then(|result| result.as_ref().ok())
    }

    /// Returns the error when the last bootstrap failed.
    #[must_use]
    pub fn error(&self) -> Option<&BootstrapError> {
        self.result.as_ref().and_then(|result| result.as_ref().err())
    }

    /// Returns the last submission result.
    #[must_use]
    pub const fn submit_result(&self) -> Option<&Result<(), SubmitError>> {
        self.submit_result.as_ref()
    }

    /// Returns the bootstrap state, `Uninitialized` before the first run.
    #[must_use]
    pub fn state(&self) -> BootstrapState {
        self.bootstrap
            .as_ref()
            .map_or(BootstrapState::Uninitialized, Bootstrap::state)
    }

    /// Returns the registered foreground channel, if any.
    #[must_use]
    pub fn foreground_channel(&self) -> Option<NotificationChannelDescriptor> {
        self.notifications
            .channel(NotificationChannelDescriptor::foreground().id())
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
