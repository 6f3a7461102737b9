//! Sequential configure-then-build invocation

use cbuild_errors::{Error, UserFacingError};
use cbuild_events::{AppEvent, EventEmitter, EventSender, FailureContext, InvocationEvent};
use cbuild_platform::{Platform, PlatformCommand, PlatformContext};
use cbuild_types::{InvocationRequest, Step};
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cmake::{build_command, configure_command};
use crate::report::{InvocationReport, StepOutcome, StepStatus};
use crate::settings::CMakeSettings;

/// Runs the configure step, then the build step.
///
/// A configure step that fails (or cannot be spawned) does not prevent the
/// build step from being attempted unless `fail_fast` is set.
#[derive(Debug, Clone)]
pub struct Invoker {
    platform: Platform,
    settings: CMakeSettings,
    event_sender: Option<EventSender>,
}

impl EventEmitter for Invoker {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl Invoker {
    #[must_use]
    pub fn new(platform: Platform, settings: CMakeSettings) -> Self {
        Self {
            platform,
            settings,
            event_sender: None,
        }
    }

    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &CMakeSettings {
        &self.settings
    }

    /// The two commands an invocation would run, in order, without running them
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are unusable.
    pub fn plan(&self, request: &InvocationRequest) -> Result<[PlatformCommand; 2], Error> {
        self.settings.validate()?;
        Ok([
            configure_command(&self.settings, request),
            build_command(&self.settings, request),
        ])
    }

    /// Run both steps and report what happened.
    ///
    /// External tool failures are part of the report, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if the settings are unusable, in which case no
    /// process is started.
    pub async fn run(&self, request: &InvocationRequest) -> Result<InvocationReport, Error> {
        let [configure_cmd, build_cmd] = self.plan(request)?;
        let invocation_id = Uuid::new_v4();

        self.emit_invocation_started(
            invocation_id,
            request.output_dir.clone(),
            request.target.clone(),
        );

        let configure = self
            .run_step(invocation_id, Step::Configure, configure_cmd)
            .await;

        let build = if self.settings.fail_fast && !configure.status.success() {
            self.skip_step(
                invocation_id,
                Step::Build,
                &build_cmd,
                "configure step did not succeed",
            )
        } else {
            if !configure.status.success() {
                self.emit_warning_with_context(
                    "configure step failed; running build step anyway",
                    format!("exit code {}", configure.status.exit_code()),
                );
            }
            self.run_step(invocation_id, Step::Build, build_cmd).await
        };

        let report = InvocationReport::new(invocation_id, configure, build);
        self.emit_invocation_finished(invocation_id, report.exit_code());
        Ok(report)
    }

    async fn run_step(&self, invocation_id: Uuid, step: Step, cmd: PlatformCommand) -> StepOutcome {
        let ctx = PlatformContext::new(self.event_sender.clone());
        self.emit_step_started(invocation_id, step, cmd.display());
        debug!(%step, command = %cmd.display(), "running step");

        let start = Instant::now();
        let result = self.platform.process().run_inherited(&ctx, cmd.clone()).await;
        let duration = start.elapsed();

        let status = match result {
            Ok(exit_status) => {
                let status = StepStatus::from_exit_status(exit_status);
                self.emit_step_completed(
                    invocation_id,
                    step,
                    exit_status.code(),
                    status.success(),
                    duration,
                );
                status
            }
            Err(e) => {
                warn!(%step, error = %e, "step could not be started");
                self.emit(AppEvent::Invocation(InvocationEvent::StepSpawnFailed {
                    invocation_id,
                    step,
                    failure: FailureContext::from_error(&e),
                }));
                StepStatus::SpawnFailed {
                    message: e.user_message().into_owned(),
                    code: e.user_code().map(str::to_string),
                }
            }
        };

        StepOutcome::new(step, &cmd, status, duration)
    }

    fn skip_step(
        &self,
        invocation_id: Uuid,
        step: Step,
        cmd: &PlatformCommand,
        reason: &str,
    ) -> StepOutcome {
        warn!(%step, reason, "skipping step");
        self.emit(AppEvent::Invocation(InvocationEvent::StepSkipped {
            invocation_id,
            step,
            reason: reason.to_string(),
        }));
        StepOutcome::new(
            step,
            cmd,
            StepStatus::Skipped {
                reason: reason.to_string(),
            },
            std::time::Duration::ZERO,
        )
    }
}
