//! Work scheduler initialisation.
//!
//! The work-scheduling subsystem is a process-wide singleton owned by the
//! host. [`SchedulerBootstrapper`] initialises it once with a
//! [`SchedulerConfiguration`] and hands back a [`SchedulerHandle`] that later
//! components receive explicitly instead of looking the scheduler up globally.

mod jobs;
mod memory;

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use thiserror::Error;

use strido_config::{LogLevel, ReinitPolicy};

pub use jobs::{
    ExistingWorkPolicy, Job, JobFactory, JobOutcome, JobRegistry, MIN_PERIODIC_INTERVAL,
    Schedule, WorkRequest,
};
pub use memory::InMemorySchedulingSubsystem;

/// Parameters consumed by the scheduler's one-time initialisation.
#[derive(Clone)]
pub struct SchedulerConfiguration {
    /// Minimum verbosity of the scheduler's own logging.
    pub min_log_level: LogLevel,
    /// Component that builds job instances for the scheduler.
    pub job_factory: Arc<dyn JobFactory>,
}

impl SchedulerConfiguration {
    /// Builds a configuration for the given minimum level and job factory.
    #[must_use]
    pub fn new(min_log_level: LogLevel, job_factory: Arc<dyn JobFactory>) -> Self {
        Self {
            min_log_level,
            job_factory,
        }
    }
}

impl fmt::Debug for SchedulerConfiguration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SchedulerConfiguration")
            .field("min_log_level", &self.min_log_level)
            .field("job_factory", &self.job_factory.name())
            .finish()
    }
}

/// Errors surfaced when submitting work.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The job factory cannot build the requested job.
    #[error("job factory '{factory}' cannot build job '{job}'")]
    UnknownJob {
        /// Factory that was asked.
        factory: String,
        /// Job that was requested.
        job: String,
    },
    /// The request was malformed.
    #[error("invalid work request: {reason}")]
    InvalidRequest {
        /// Which rule was broken.
        reason: &'static str,
    },
}

/// Operations available on an initialised work scheduler.
pub trait WorkScheduler: Send + Sync {
    /// Queues `request` under its unique name.
    fn enqueue_unique(
        &self,
        request: WorkRequest,
        policy: ExistingWorkPolicy,
    ) -> Result<(), SubmitError>;

    /// Cancels queued work by unique name. Returns `true` when work was removed.
    fn cancel_unique(&self, unique_name: &str) -> bool;

    /// Returns the queued requests ordered by unique name.
    fn pending(&self) -> Vec<WorkRequest>;
}

/// Shared handle to the initialised work scheduler.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Arc<dyn WorkScheduler>,
}

impl SchedulerHandle {
    /// Wraps a scheduler implementation.
    #[must_use]
    pub fn new(inner: Arc<dyn WorkScheduler>) -> Self {
        Self { inner }
    }

    /// Queues `request`, keeping any existing work with the same name.
    pub fn enqueue(&self, request: WorkRequest) -> Result<(), SubmitError> {
        self.inner
            .enqueue_unique(request, ExistingWorkPolicy::Keep)
    }

    /// Queues `request` with an explicit existing-work policy.
    pub fn enqueue_unique(
        &self,
        request: WorkRequest,
        policy: ExistingWorkPolicy,
    ) -> Result<(), SubmitError> {
        self.inner.enqueue_unique(request, policy)
    }

    /// Cancels queued work by unique name.
    #[must_use]
    pub fn cancel_unique(&self, unique_name: &str) -> bool {
        self.inner.cancel_unique(unique_name)
    }

    /// Returns the queued requests.
    #[must_use]
    pub fn pending(&self) -> Vec<WorkRequest> {
        self.inner.pending()
    }

    /// Returns `true` when both handles refer to the same scheduler.
    #[must_use]
    pub fn same_scheduler(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SchedulerHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SchedulerHandle")
            .field("pending", &self.inner.pending().len())
            .finish()
    }
}

/// Raised by the scheduling subsystem when it refuses initialisation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SchedulerRejection {
    message: String,
}

impl SchedulerRejection {
    /// Builds a rejection with the subsystem's explanation.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The subsystem's explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Host work-scheduling subsystem.
pub trait SchedulingSubsystem: Send + Sync {
    /// Initialises the process-wide scheduler.
    fn initialize(
        &self,
        config: SchedulerConfiguration,
    ) -> Result<SchedulerHandle, SchedulerRejection>;
}

impl<T> SchedulingSubsystem for Arc<T>
where
    T: SchedulingSubsystem + ?Sized,
{
    fn initialize(
        &self,
        config: SchedulerConfiguration,
    ) -> Result<SchedulerHandle, SchedulerRejection> {
        (**self).initialize(config)
    }
}

/// Errors surfaced while initialising the work scheduler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitError {
    /// The subsystem refused the configuration.
    #[error("work scheduler rejected configuration: {source}")]
    Rejected {
        /// Subsystem explanation.
        #[source]
        source: SchedulerRejection,
    },
    /// The scheduler was already initialised in this process.
    #[error("work scheduler is already initialised")]
    AlreadyInitialized,
}

/// Initialises the work scheduler at most once.
pub struct SchedulerBootstrapper<S> {
    subsystem: S,
    policy: ReinitPolicy,
    handle: OnceCell<SchedulerHandle>,
}

impl<S> SchedulerBootstrapper<S> {
    /// Builds a bootstrapper that treats repeated initialisation per `policy`.
    #[must_use]
    pub const fn new(subsystem: S, policy: ReinitPolicy) -> Self {
        Self {
            subsystem,
            policy,
            handle: OnceCell::new(),
        }
    }

    /// Returns the handle when initialisation already succeeded.
    #[must_use]
    pub fn handle(&self) -> Option<&SchedulerHandle> {
        self.handle.get()
    }
}

impl<S> SchedulerBootstrapper<S>
where
    S: SchedulingSubsystem,
{
    /// Initialises the scheduler with `config`.
    ///
    /// The subsystem is consulted only on the first successful call. Later
    /// calls return the existing handle under [`ReinitPolicy::Reuse`] and
    /// [`InitError::AlreadyInitialized`] under [`ReinitPolicy::Reject`]. A
    /// rejected first attempt leaves the bootstrapper uninitialised.
    pub fn initialize_scheduler(
        &self,
        config: SchedulerConfiguration,
    ) -> Result<SchedulerHandle, InitError> {
        let mut initialised_now = false;
        let handle = self.handle.get_or_try_init(|| {
            initialised_now = true;
            self.subsystem
                .initialize(config)
                .map_err(|source| InitError::Rejected { source })
        })?;

        if !initialised_now && self.policy == ReinitPolicy::Reject {
            return Err(InitError::AlreadyInitialized);
        }
        Ok(handle.clone())
    }
}
