//! Job factories and work requests handed to the work scheduler.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Shortest repeat interval the work scheduler honours for periodic work.
pub const MIN_PERIODIC_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Result of a single job run, interpreted by the work scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The job finished.
    Success,
    /// The job should be run again later.
    Retry,
    /// The job failed and should not be retried.
    Failure,
}

/// Executable unit of background work.
pub trait Job: Send {
    /// Runs the job once.
    fn run(&mut self) -> JobOutcome;
}

/// Produces job instances on behalf of the work scheduler.
pub trait JobFactory: Send + Sync {
    /// Name used in logs to identify the factory.
    fn name(&self) -> &str;

    /// Builds the job registered under `job`, or `None` when unknown.
    fn create_job(&self, job: &str) -> Option<Box<dyn Job>>;
}

type JobConstructor = Box<dyn Fn() -> Box<dyn Job> + Send + Sync>;

/// Job factory backed by a table of named constructors.
pub struct JobRegistry {
    name: String,
    constructors: BTreeMap<String, JobConstructor>,
}

impl JobRegistry {
    /// Builds an empty registry.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: BTreeMap::new(),
        }
    }

    /// Registers a constructor for `job`, replacing any previous one.
    #[must_use]
    pub fn with_job<F>(mut self, job: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn Job> + Send + Sync + 'static,
    {
        self.constructors.insert(job.into(), Box::new(constructor));
        self
    }
}

impl fmt::Debug for JobRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JobRegistry")
            .field("name", &self.name)
            .field("jobs", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl JobFactory for JobRegistry {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn create_job(&self, job: &str) -> Option<Box<dyn Job>> {
        self.constructors.get(job).map(|constructor| constructor())
    }
}

/// When a work request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Runs once, as soon as constraints allow.
    OneTime,
    /// Repeats at the given interval.
    Periodic {
        /// Time between runs.
        interval: Duration,
    },
}

/// Request to run a job under a unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRequest {
    unique_name: String,
    job: String,
    schedule: Schedule,
}

impl WorkRequest {
    /// Builds a request that runs `job` once.
    #[must_use]
    pub fn one_time(unique_name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            unique_name: unique_name.into(),
            job: job.into(),
            schedule: Schedule::OneTime,
        }
    }

    /// Builds a request that repeats `job` every `interval`.
    ///
    /// Intervals below [`MIN_PERIODIC_INTERVAL`] are raised to it.
    #[must_use]
    pub fn periodic(
        unique_name: impl Into<String>,
        job: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            unique_name: unique_name.into(),
            job: job.into(),
            schedule: Schedule::Periodic {
                interval: interval.max(MIN_PERIODIC_INTERVAL),
            },
        }
    }

    /// Unique name the request is tracked under.
    #[must_use]
    pub fn unique_name(&self) -> &str {
        self.unique_name.as_str()
    }

    /// Name of the job the factory should build.
    #[must_use]
    pub fn job(&self) -> &str {
        self.job.as_str()
    }

    /// When the request runs.
    #[must_use]
    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }
}

/// What to do when unique work with the same name is already queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingWorkPolicy {
    /// Leave the queued request in place and drop the new one.
    #[default]
    Keep,
    /// Replace the queued request with the new one.
    Replace,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Job for Noop {
        fn run(&mut self) -> JobOutcome {
            JobOutcome::Success
        }
    }

    #[test]
    fn periodic_interval_is_clamped() {
        let request = WorkRequest::periodic("poll", "step_count_poll", Duration::from_secs(60));
        assert_eq!(
            request.schedule(),
            Schedule::Periodic {
                interval: MIN_PERIODIC_INTERVAL
            }
        );
    }

    #[test]
    fn registry_builds_registered_jobs_only() {
        let registry = JobRegistry::new("test").with_job("noop", || Box::new(Noop));

        let mut job = registry.create_job("noop").expect("noop should be registered");
        assert_eq!(job.run(), JobOutcome::Success);
        assert!(registry.create_job("missing").is_none());
        assert_eq!(format!("{registry:?}"), r#"JobRegistry { name: "test", jobs: ["noop"] }"#);
    }
}
