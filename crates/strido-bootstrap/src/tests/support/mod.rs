//! Test harness utilities for the bootstrap suites.

mod call_log;
mod notification_host;
mod reporter;
mod scheduling;
mod world;

pub use call_log::{CallLog, HostCall};
pub use notification_host::RecordingNotificationHost;
pub use reporter::{BootstrapEvent, RecordingBootstrapReporter};
pub use scheduling::RecordingSchedulingSubsystem;
pub use world::{TestWorld, world};
