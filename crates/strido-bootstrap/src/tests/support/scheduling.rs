//! Scheduling subsystem double: records initialisation requests and
//! supports injected rejections.

use std::sync::{Arc, Mutex};

use crate::scheduler::{
    InMemorySchedulingSubsystem, SchedulerConfiguration, SchedulerHandle, SchedulerRejection,
    SchedulingSubsystem,
};

use super::call_log::{CallLog, HostCall};

/// Scheduling subsystem that records requests before delegating.
#[derive(Debug, Clone)]
pub struct RecordingSchedulingSubsystem {
    log: CallLog,
    inner: Arc<InMemorySchedulingSubsystem>,
    rejection: Arc<Mutex<Option<String>>>,
}

impl RecordingSchedulingSubsystem {
    /// Builds a subsystem writing to `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            inner: Arc::new(InMemorySchedulingSubsystem::new()),
            rejection: Arc::new(Mutex::new(None)),
        }
    }

    /// Makes every later initialisation fail with `message`.
    pub fn reject_with(&self, message: impl Into<String>) {
        *self
            .rejection
            .lock()
            .expect("scheduling subsystem mutex poisoned") = Some(message.into());
    }

    /// Returns the scheduler once initialised.
    #[must_use]
    pub fn scheduler(&self) -> Option<SchedulerHandle> {
        self.inner.scheduler()
    }
}

impl SchedulingSubsystem for RecordingSchedulingSubsystem {
    fn initialize(
        &self,
        config: SchedulerConfiguration,
    ) -> Result<SchedulerHandle, SchedulerRejection> {
        self.log
            .record(HostCall::InitializeScheduler(config.min_log_level));
        let rejection = self
            .rejection
            .lock()
            .expect("scheduling subsystem mutex poisoned")
            .clone();
        if let Some(message) = rejection {
            return Err(SchedulerRejection::new(message));
        }
        self.inner.initialize(config)
    }
}
