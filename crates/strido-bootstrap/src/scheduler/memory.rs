//! In-process work scheduler used by headless hosts.
//!
//! Queued work is held in memory only; running it is left to whoever drains
//! the queue.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use strido_config::LogLevel;
use tracing::Level;

use super::{
    ExistingWorkPolicy, JobFactory, SchedulerConfiguration, SchedulerHandle, SchedulerRejection,
    SchedulingSubsystem, SubmitError, WorkRequest, WorkScheduler,
};

const SCHEDULER_TARGET: &str = "strido::scheduler";

/// Scheduling subsystem that allows exactly one initialisation.
#[derive(Debug, Default)]
pub struct InMemorySchedulingSubsystem {
    scheduler: Mutex<Option<SchedulerHandle>>,
}

impl InMemorySchedulingSubsystem {
    /// Builds an uninitialised subsystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scheduler once initialised.
    #[must_use]
    pub fn scheduler(&self) -> Option<SchedulerHandle> {
        self.scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SchedulingSubsystem for InMemorySchedulingSubsystem {
    fn initialize(
        &self,
        config: SchedulerConfiguration,
    ) -> Result<SchedulerHandle, SchedulerRejection> {
        let mut slot = self
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(SchedulerRejection::new(
                "work scheduler is already initialized; initialize must be called at most once",
            ));
        }

        tracing::info!(
            target: SCHEDULER_TARGET,
            min_log_level = %config.min_log_level,
            min_priority = config.min_log_level.priority(),
            job_factory = config.job_factory.name(),
            "work scheduler initialised"
        );
        let handle = SchedulerHandle::new(Arc::new(InMemoryScheduler::new(config)));
        *slot = Some(handle.clone());
        Ok(handle)
    }
}

struct InMemoryScheduler {
    min_log_level: LogLevel,
    job_factory: Arc<dyn JobFactory>,
    queue: Mutex<BTreeMap<String, WorkRequest>>,
}

impl InMemoryScheduler {
    fn new(config: SchedulerConfiguration) -> Self {
        Self {
            min_log_level: config.min_log_level,
            job_factory: config.job_factory,
            queue: Mutex::new(BTreeMap::new()),
        }
    }

    /// Emits a scheduler message when `level` passes the configured minimum.
    ///
    /// Returns `true` when the message was emitted.
    fn log(&self, level: LogLevel, work: &str, message: &str) -> bool {
        if !self.min_log_level.admits(level) {
            return false;
        }
        let priority = level.priority();
        let tracing_level = level.tracing_level();
        if tracing_level == Level::ERROR {
            tracing::error!(target: SCHEDULER_TARGET, work, priority, "{message}");
        } else if tracing_level == Level::WARN {
            tracing::warn!(target: SCHEDULER_TARGET, work, priority, "{message}");
        } else if tracing_level == Level::INFO {
            tracing::info!(target: SCHEDULER_TARGET, work, priority, "{message}");
        } else if tracing_level == Level::DEBUG {
            tracing::debug!(target: SCHEDULER_TARGET, work, priority, "{message}");
        } else {
            tracing::trace!(target: SCHEDULER_TARGET, work, priority, "{message}");
        }
        true
    }
}

impl WorkScheduler for InMemoryScheduler {
    fn enqueue_unique(
        &self,
        request: WorkRequest,
        policy: ExistingWorkPolicy,
    ) -> Result<(), SubmitError> {
        if request.unique_name().trim().is_empty() {
            return Err(SubmitError::InvalidRequest {
                reason: "unique work name must not be blank",
            });
        }
        // Only proves the factory can build the job; execution is not ours.
        if self.job_factory.create_job(request.job()).is_none() {
            return Err(SubmitError::UnknownJob {
                factory: self.job_factory.name().to_owned(),
                job: request.job().to_owned(),
            });
        }

        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let exists = queue.contains_key(request.unique_name());
        if exists && policy == ExistingWorkPolicy::Keep {
            self.log(
                LogLevel::Debug,
                request.unique_name(),
                "unique work already queued; keeping existing request",
            );
            return Ok(());
        }

        let message = if exists { "queued work replaced" } else { "work queued" };
        self.log(LogLevel::Debug, request.unique_name(), message);
        queue.insert(request.unique_name().to_owned(), request);
        Ok(())
    }

    fn cancel_unique(&self, unique_name: &str) -> bool {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(unique_name)
            .is_some()
    }

    fn pending(&self) -> Vec<WorkRequest> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
