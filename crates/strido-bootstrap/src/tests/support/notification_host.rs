//! Notification host double: stores channels by id, records every call,
//! and supports injected failures.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::notification::{
    ChannelOutcome, NotificationChannelDescriptor, NotificationChannels, RegistrationError,
};

use super::call_log::{CallLog, HostCall};

/// Notification host that records registrations.
#[derive(Debug, Clone)]
pub struct RecordingNotificationHost {
    log: CallLog,
    state: Arc<Mutex<HostState>>,
}

#[derive(Debug, Default)]
struct HostState {
    channels: BTreeMap<String, NotificationChannelDescriptor>,
    failure: Option<RegistrationError>,
}

impl RecordingNotificationHost {
    /// Builds a host writing to `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            state: Arc::new(Mutex::new(HostState::default())),
        }
    }

    /// Makes every later registration fail with `error`.
    pub fn fail_with(&self, error: RegistrationError) {
        self.state
            .lock()
            .expect("notification host mutex poisoned")
            .failure = Some(error);
    }

    /// Returns the stored channel with the given id.
    #[must_use]
    pub fn channel(&self, id: &str) -> Option<NotificationChannelDescriptor> {
        self.state
            .lock()
            .expect("notification host mutex poisoned")
            .channels
            .get(id)
            .cloned()
    }

    /// Number of stored channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.state
            .lock()
            .expect("notification host mutex poisoned")
            .channels
            .len()
    }
}

impl NotificationChannels for RecordingNotificationHost {
    fn create_notification_channel(
        &self,
        descriptor: &NotificationChannelDescriptor,
    ) -> Result<ChannelOutcome, RegistrationError> {
        self.log
            .record(HostCall::RegisterChannel(descriptor.id().to_owned()));
        let mut state = self.state.lock().expect("notification host mutex poisoned");
        if let Some(error) = state.failure.clone() {
            return Err(error);
        }
        state
            .channels
            .insert(descriptor.id().to_owned(), descriptor.clone());
        Ok(ChannelOutcome::Registered)
    }
}
