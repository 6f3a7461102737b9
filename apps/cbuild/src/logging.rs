//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields.
//! General warnings go out at `warn` and reach the console by default. Spawn
//! failures and skips are already warned about where they happen, so their
//! invocation events are logged at `info` to avoid duplicate console lines.

use cbuild_events::{AppEvent, GeneralEvent, InvocationEvent, PlatformEvent};
use tracing::{debug, info, warn};

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    match event {
        AppEvent::General(GeneralEvent::Warning { message, context }) => {
            warn!(context = ?context, "{message}");
        }

        AppEvent::Invocation(invocation_event) => match invocation_event {
            InvocationEvent::Started {
                invocation_id,
                output_dir,
                target,
            } => {
                info!(
                    invocation_id = %invocation_id,
                    output_dir = %output_dir.display(),
                    target = %target,
                    "Invocation started"
                );
            }
            InvocationEvent::StepStarted {
                invocation_id,
                step,
                command,
            } => {
                info!(
                    invocation_id = %invocation_id,
                    step = %step,
                    command = %command,
                    "Step started"
                );
            }
            InvocationEvent::StepCompleted {
                invocation_id,
                step,
                exit_code,
                success,
                duration,
            } => {
                info!(
                    invocation_id = %invocation_id,
                    step = %step,
                    exit_code = ?exit_code,
                    success = success,
                    duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    "Step completed"
                );
            }
            InvocationEvent::StepSpawnFailed {
                invocation_id,
                step,
                failure,
            } => {
                info!(
                    invocation_id = %invocation_id,
                    step = %step,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Step could not be started"
                );
            }
            InvocationEvent::StepSkipped {
                invocation_id,
                step,
                reason,
            } => {
                info!(
                    invocation_id = %invocation_id,
                    step = %step,
                    reason = %reason,
                    "Step skipped"
                );
            }
            InvocationEvent::Finished {
                invocation_id,
                exit_code,
            } => {
                info!(
                    invocation_id = %invocation_id,
                    exit_code = exit_code,
                    "Invocation finished"
                );
            }
        },

        AppEvent::Platform(platform_event) => match platform_event {
            PlatformEvent::ProcessStarted { command } => {
                debug!(
                    program = %command.program,
                    args = ?command.args,
                    "Process started"
                );
            }
            PlatformEvent::ProcessCompleted {
                command,
                exit_code,
                duration_ms,
            } => {
                debug!(
                    program = %command.program,
                    exit_code = ?exit_code,
                    duration_ms = duration_ms,
                    "Process completed"
                );
            }
            PlatformEvent::ProcessFailed {
                command,
                failure,
                duration_ms,
            } => {
                debug!(
                    program = %command.program,
                    code = ?failure.code,
                    message = %failure.message,
                    duration_ms = duration_ms,
                    "Process failed to start"
                );
            }
        },
    }
}
