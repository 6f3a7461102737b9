//! Invocation lifecycle events

use cbuild_types::Step;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

use super::FailureContext;

/// Events describing one configure + build invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvocationEvent {
    /// Invocation accepted, about to run the configure step
    Started {
        invocation_id: Uuid,
        output_dir: PathBuf,
        target: String,
    },

    /// A step's process is about to be spawned
    StepStarted {
        invocation_id: Uuid,
        step: Step,
        command: String,
    },

    /// A step's process ran to completion (successfully or not)
    StepCompleted {
        invocation_id: Uuid,
        step: Step,
        exit_code: Option<i32>,
        success: bool,
        duration: Duration,
    },

    /// A step's process could not be spawned
    StepSpawnFailed {
        invocation_id: Uuid,
        step: Step,
        failure: FailureContext,
    },

    /// A step was not attempted
    StepSkipped {
        invocation_id: Uuid,
        step: Step,
        reason: String,
    },

    /// Both steps are done; `exit_code` is what the process will exit with
    Finished { invocation_id: Uuid, exit_code: i32 },
}
