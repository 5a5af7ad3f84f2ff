//! Shared sequence log used to assert the order of host calls.

use std::sync::{Arc, Mutex};

use strido_config::LogLevel;

/// Host call observed by the recording doubles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// A channel registration reached the notification host.
    RegisterChannel(String),
    /// The scheduling subsystem was asked to initialise.
    InitializeScheduler(LogLevel),
}

/// Append-only log shared between test doubles.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl CallLog {
    /// Records a call.
    pub fn record(&self, call: HostCall) {
        self.calls.lock().expect("call log mutex poisoned").push(call);
    }

    /// Captures a copy of the recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("call log mutex poisoned").clone()
    }

    /// Number of scheduler initialisation attempts.
    #[must_use]
    pub fn scheduler_initialisations(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::InitializeScheduler(_)))
            .count()
    }
}
