//! Process execution events

use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Command line snapshot attached to process events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCommandDescriptor {
    pub program: String,
    pub args: Vec<String>,
}

/// Platform events emitted around every spawned process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    ProcessStarted {
        command: ProcessCommandDescriptor,
    },

    ProcessCompleted {
        command: ProcessCommandDescriptor,
        exit_code: Option<i32>,
        duration_ms: u64,
    },

    /// The process could not be spawned at all
    ProcessFailed {
        command: ProcessCommandDescriptor,
        failure: FailureContext,
        duration_ms: u64,
    },
}
