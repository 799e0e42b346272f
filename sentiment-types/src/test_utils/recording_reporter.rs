//! RecordingReporter: remembers every registration change.

use crate::status::{ProtocolStatus, StatusReporter};
use std::sync::Mutex;

/// A recorded registration change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedStatus {
    /// `registered` was called.
    Registered(ProtocolStatus),
    /// `unregistered` was called.
    Unregistered(ProtocolStatus),
}

/// A [`StatusReporter`] that records what it is told.
/// Use `.events()` to inspect what was recorded.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<RecordedStatus>>,
}

impl RecordingReporter {
    /// Create a new empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of all recorded events.
    pub fn events(&self) -> Vec<RecordedStatus> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusReporter for RecordingReporter {
    fn registered(&self, status: &ProtocolStatus) {
        self.events
            .lock()
            .unwrap()
            .push(RecordedStatus::Registered(status.clone()));
    }

    fn unregistered(&self, status: &ProtocolStatus) {
        self.events
            .lock()
            .unwrap()
            .push(RecordedStatus::Unregistered(status.clone()));
    }
}
