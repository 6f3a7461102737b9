#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for cbuild
//!
//! Library crates report progress by emitting [`AppEvent`]s over an unbounded
//! channel. Only the CLI turns events into log lines or console output.

pub mod events;
pub use events::{
    AppEvent, FailureContext, GeneralEvent, InvocationEvent, PlatformEvent, ProcessCommandDescriptor,
};

use std::path::PathBuf;
use std::time::Duration;

use cbuild_types::Step;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Type alias for the event sender
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for the event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Unified trait for emitting events
///
/// Implemented for raw senders and for any struct that carries an optional
/// sender, so call sites look the same either way.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Receiver gone means nobody is listening; keep going.
            let _ = sender.send(event);
        }
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an invocation started event
    fn emit_invocation_started(&self, invocation_id: Uuid, output_dir: PathBuf, target: String) {
        self.emit(AppEvent::Invocation(InvocationEvent::Started {
            invocation_id,
            output_dir,
            target,
        }));
    }

    /// Emit a step started event
    fn emit_step_started(&self, invocation_id: Uuid, step: Step, command: impl Into<String>) {
        self.emit(AppEvent::Invocation(InvocationEvent::StepStarted {
            invocation_id,
            step,
            command: command.into(),
        }));
    }

    /// Emit a step completed event
    fn emit_step_completed(
        &self,
        invocation_id: Uuid,
        step: Step,
        exit_code: Option<i32>,
        success: bool,
        duration: Duration,
    ) {
        self.emit(AppEvent::Invocation(InvocationEvent::StepCompleted {
            invocation_id,
            step,
            exit_code,
            success,
            duration,
        }));
    }

    /// Emit an invocation finished event
    fn emit_invocation_finished(&self, invocation_id: Uuid, exit_code: i32) {
        self.emit(AppEvent::Invocation(InvocationEvent::Finished {
            invocation_id,
            exit_code,
        }));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}
