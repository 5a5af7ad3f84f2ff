//! Headless host: loads configuration, bootstraps against in-process host
//! services, and queues the periodic step-count poll.

use std::sync::Arc;
use std::time::Duration;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use strido_config::Config;

use crate::bootstrap::{Bootstrap, BootstrapError, Runtime};
use crate::health::{BootstrapReporter, StructuredBootstrapReporter};
use crate::notification::{ApiLevel, InMemoryNotificationService, channels_for_api_level};
use crate::scheduler::{
    InMemorySchedulingSubsystem, Job, JobFactory, JobOutcome, JobRegistry, MIN_PERIODIC_INTERVAL,
    SubmitError, WorkRequest,
};
use crate::telemetry::{self, TelemetryError};

pub(crate) const HOST_TARGET: &str = "strido::host";

/// Job name of the step-count poll.
pub const STEP_COUNT_POLL_JOB: &str = "step_count_poll";

/// Unique work name the step-count poll is queued under.
pub const STEP_COUNT_POLL_WORK: &str = "strido_step_count_poll";

/// Interval between step-count polls.
pub const STEP_COUNT_POLL_INTERVAL: Duration = MIN_PERIODIC_INTERVAL;

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the process configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that reads defaults, files, environment, and process arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that always returns the same configuration.
#[derive(Debug, Default, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Builds a loader around `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced while running the headless host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The bootstrap sequence failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// Queuing the step-count poll failed.
    #[error("failed to queue step-count poll: {source}")]
    Submit {
        /// Underlying submission error.
        #[source]
        source: SubmitError,
    },
}

/// Step-count poll that only logs until the tracker service is wired in.
#[derive(Debug, Default, Clone, Copy)]
struct PlaceholderStepCountPoll;

impl Job for PlaceholderStepCountPoll {
    fn run(&mut self) -> JobOutcome {
        tracing::warn!(
            target: HOST_TARGET,
            job = STEP_COUNT_POLL_JOB,
            "step-count poll requested but no tracker is attached"
        );
        JobOutcome::Success
    }
}

/// Job factory serving the host's background jobs.
#[must_use]
pub fn job_factory() -> Arc<dyn JobFactory> {
    Arc::new(
        JobRegistry::new("strido")
            .with_job(STEP_COUNT_POLL_JOB, || Box::new(PlaceholderStepCountPoll)),
    )
}

/// Host services backing a headless process.
#[derive(Debug, Default, Clone)]
pub struct HeadlessHost {
    notifications: Arc<InMemoryNotificationService>,
    scheduling: Arc<InMemorySchedulingSubsystem>,
}

impl HeadlessHost {
    /// Builds a host with fresh in-memory services.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notification service owned by the host.
    #[must_use]
    pub fn notifications(&self) -> &InMemoryNotificationService {
        &self.notifications
    }

    /// Scheduling subsystem owned by the host.
    #[must_use]
    pub fn scheduling(&self) -> &InMemorySchedulingSubsystem {
        &self.scheduling
    }

    /// Bootstraps against this host and queues the step-count poll.
    pub fn launch(
        &self,
        config: &Config,
        reporter: Arc<dyn BootstrapReporter>,
    ) -> Result<Runtime, HostError> {
        let level = ApiLevel::new(config.host_api_level());
        let channels = channels_for_api_level(level, self.notifications.clone());
        tracing::info!(
            target: HOST_TARGET,
            api_level = %level,
            channels_supported = level.supports_notification_channels(),
            "launching headless host"
        );

        let mut bootstrap = Bootstrap::new(
            config,
            channels,
            Arc::clone(&self.scheduling),
            job_factory(),
            reporter,
        );
        let runtime = bootstrap.bootstrap()?;

        runtime
            .scheduler()
            .enqueue(WorkRequest::periodic(
                STEP_COUNT_POLL_WORK,
                STEP_COUNT_POLL_JOB,
                STEP_COUNT_POLL_INTERVAL,
            ))
            .map_err(|source| HostError::Submit { source })?;
        Ok(runtime)
    }
}

/// Runs the headless host with the system configuration.
pub fn run_host() -> Result<Runtime, HostError> {
    let reporter = Arc::new(StructuredBootstrapReporter::new());
    run_host_with(&SystemConfigLoader, reporter, &HeadlessHost::new())
}

/// Runs the headless host with injected collaborators.
pub fn run_host_with<L>(
    loader: &L,
    reporter: Arc<dyn BootstrapReporter>,
    host: &HeadlessHost,
) -> Result<Runtime, HostError>
where
    L: ConfigLoader + ?Sized,
{
    let config = loader
        .load()
        .map_err(|source| HostError::Configuration { source })?;
    telemetry::initialise(&config).map_err(|source| HostError::Telemetry { source })?;
    host.launch(&config, reporter)
}
