//! Native process operations
//!
//! Spawns with `tokio::process::Command` and wraps every spawn in
//! started/completed/failed platform events.

use async_trait::async_trait;
use cbuild_errors::{Error, PlatformError};
use cbuild_events::{AppEvent, FailureContext, PlatformEvent, ProcessCommandDescriptor};
use std::ffi::OsStr;
use std::io;
use std::process::ExitStatus;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

use crate::core::PlatformContext;
use crate::process::{PlatformCommand, ProcessOperations};

/// Native implementation of process operations
pub struct NativeProcessOperations;

impl NativeProcessOperations {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeProcessOperations {
    fn default() -> Self {
        Self::new()
    }
}

fn descriptor(cmd: &PlatformCommand) -> ProcessCommandDescriptor {
    ProcessCommandDescriptor {
        program: cmd.program().to_string_lossy().into_owned(),
        args: cmd.args_lossy(),
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn to_tokio_command(cmd: &PlatformCommand) -> Command {
    let mut command = Command::new(cmd.program());
    command.args(cmd.get_args());
    command
}

fn spawn_error(program: &OsStr, err: &io::Error) -> PlatformError {
    let command = program.to_string_lossy().into_owned();
    if err.kind() == io::ErrorKind::NotFound {
        PlatformError::CommandNotFound { command }
    } else {
        PlatformError::ProcessExecutionFailed {
            command,
            message: err.to_string(),
        }
    }
}

fn emit_started(ctx: &PlatformContext, descriptor: &ProcessCommandDescriptor) {
    ctx.emit_event(AppEvent::Platform(PlatformEvent::ProcessStarted {
        command: descriptor.clone(),
    }));
}

fn emit_finished(
    ctx: &PlatformContext,
    descriptor: ProcessCommandDescriptor,
    result: &Result<ExitStatus, PlatformError>,
    duration: Duration,
) {
    let duration_ms = duration_to_millis(duration);
    let event = match result {
        Ok(status) => PlatformEvent::ProcessCompleted {
            command: descriptor,
            exit_code: status.code(),
            duration_ms,
        },
        Err(e) => PlatformEvent::ProcessFailed {
            command: descriptor,
            failure: FailureContext::from_error(e),
            duration_ms,
        },
    };
    ctx.emit_event(AppEvent::Platform(event));
}

#[async_trait]
impl ProcessOperations for NativeProcessOperations {
    async fn run_inherited(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<ExitStatus, Error> {
        let start = Instant::now();
        let descriptor = descriptor(&cmd);
        emit_started(ctx, &descriptor);
        debug!(command = %cmd.display(), "spawning with inherited stdio");

        let result = to_tokio_command(&cmd)
            .status()
            .await
            .map_err(|e| spawn_error(cmd.program(), &e));

        emit_finished(ctx, descriptor, &result, start.elapsed());
        result.map_err(Error::from)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use cbuild_events::channel;

    #[tokio::test]
    async fn test_run_inherited_reports_exit_code() {
        let ops = NativeProcessOperations::new();
        let (tx, mut rx) = channel();
        let ctx = PlatformContext::new(Some(tx));

        let mut cmd = PlatformCommand::new("sh");
        cmd.args(["-c", "exit 3"]);
        let status = ops.run_inherited(&ctx, cmd).await.unwrap();
        assert_eq!(status.code(), Some(3));

        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::Platform(PlatformEvent::ProcessStarted { .. })
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::Platform(PlatformEvent::ProcessCompleted {
                exit_code: Some(3),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_command_not_found() {
        let ops = NativeProcessOperations::new();
        let ctx = PlatformContext::default();

        let cmd = PlatformCommand::new("cbuild-definitely-not-a-real-program");
        let err = ops.run_inherited(&ctx, cmd).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::CommandNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_arguments_reach_process_verbatim() {
        let ops = NativeProcessOperations::new();
        let ctx = PlatformContext::default();
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("arg");

        // The child writes its first argument to a file only if it matches exactly
        let mut cmd = PlatformCommand::new("sh");
        cmd.args([
            "-c",
            "[ \"$1\" = 'a b;c $(x)' ] && printf ok > \"$2\"",
            "sh",
            "a b;c $(x)",
        ])
        .arg(&marker);
        let status = ops.run_inherited(&ctx, cmd).await.unwrap();

        assert!(status.success());
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "ok");
    }
}
