//! In-process notification service used by headless hosts.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{ChannelOutcome, NotificationChannelDescriptor, NotificationChannels, RegistrationError};

/// Notification service that keeps channels in memory, keyed by id.
#[derive(Debug)]
pub struct InMemoryNotificationService {
    channels: Mutex<BTreeMap<String, NotificationChannelDescriptor>>,
    reachable: AtomicBool,
}

impl InMemoryNotificationService {
    /// Builds an empty, reachable service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(BTreeMap::new()),
            reachable: AtomicBool::new(true),
        }
    }

    /// Simulates the service becoming reachable or unreachable.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Returns the registered channel with the given id.
    #[must_use]
    pub fn channel(&self, id: &str) -> Option<NotificationChannelDescriptor> {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Number of registered channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for InMemoryNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannels for InMemoryNotificationService {
    fn create_notification_channel(
        &self,
        descriptor: &NotificationChannelDescriptor,
    ) -> Result<ChannelOutcome, RegistrationError> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(RegistrationError::unavailable(
                "notification service is not running",
            ));
        }

        let mut channels = self
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        channels.insert(descriptor.id().to_owned(), descriptor.clone());
        Ok(ChannelOutcome::Registered)
    }
}
