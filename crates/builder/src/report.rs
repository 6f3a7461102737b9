//! Outcome of an invocation

use cbuild_platform::PlatformCommand;
use cbuild_types::Step;
use serde::Serialize;
use std::process::ExitStatus;
use std::time::Duration;
use uuid::Uuid;

/// Exit code used when the final step could not be spawned (shell convention)
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code used when no more specific code is available
pub const EXIT_FAILURE: i32 = 1;

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepStatus {
    /// The process ran and exited (or was killed by a signal)
    Exited {
        code: Option<i32>,
        signal: Option<i32>,
        success: bool,
    },
    /// The process could not be started
    SpawnFailed {
        message: String,
        code: Option<String>,
    },
    /// The step was not attempted
    Skipped { reason: String },
}

impl StepStatus {
    /// Build from a finished process status
    #[must_use]
    pub fn from_exit_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self::Exited {
            code: status.code(),
            signal,
            success: status.success(),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited { success: true, .. })
    }

    /// Exit code a shell would report for this status
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exited { code: Some(code), .. } => *code,
            Self::Exited {
                signal: Some(signal),
                ..
            } => 128 + signal,
            Self::Exited { .. } | Self::Skipped { .. } => EXIT_FAILURE,
            Self::SpawnFailed { .. } => EXIT_NOT_FOUND,
        }
    }
}

/// One step's command and result
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: Step,
    pub program: String,
    pub args: Vec<String>,
    pub status: StepStatus,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl StepOutcome {
    #[must_use]
    pub fn new(step: Step, command: &PlatformCommand, status: StepStatus, duration: Duration) -> Self {
        Self {
            step,
            program: command.program().to_string_lossy().into_owned(),
            args: command.args_lossy(),
            status,
            duration,
        }
    }
}

/// Both steps of an invocation, in execution order
#[derive(Debug, Clone, Serialize)]
pub struct InvocationReport {
    pub invocation_id: Uuid,
    pub configure: StepOutcome,
    pub build: StepOutcome,
    pub exit_code: i32,
}

impl InvocationReport {
    #[must_use]
    pub fn new(invocation_id: Uuid, configure: StepOutcome, build: StepOutcome) -> Self {
        let exit_code = match &build.status {
            // With nothing run for the build, the configure failure is the
            // most useful thing to report.
            StepStatus::Skipped { .. } if !configure.status.success() => {
                configure.status.exit_code()
            }
            status => status.exit_code(),
        };
        Self {
            invocation_id,
            configure,
            build,
            exit_code,
        }
    }

    /// Exit code for the process: the build step's, unless it was skipped
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Outcomes in the order the steps ran
    #[must_use]
    pub fn steps(&self) -> [&StepOutcome; 2] {
        [&self.configure, &self.build]
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S>(duration: &Duration, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(step: Step, status: StepStatus) -> StepOutcome {
        StepOutcome::new(
            step,
            &PlatformCommand::new("cmake"),
            status,
            Duration::from_millis(1),
        )
    }

    fn exited(code: i32) -> StepStatus {
        StepStatus::Exited {
            code: Some(code),
            signal: None,
            success: code == 0,
        }
    }

    #[test]
    fn test_exit_code_comes_from_build_step() {
        let report = InvocationReport::new(
            Uuid::nil(),
            outcome(Step::Configure, exited(1)),
            outcome(Step::Build, exited(0)),
        );
        assert_eq!(report.exit_code(), 0);

        let report = InvocationReport::new(
            Uuid::nil(),
            outcome(Step::Configure, exited(0)),
            outcome(Step::Build, exited(2)),
        );
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_spawn_failure_maps_to_127() {
        let status = StepStatus::SpawnFailed {
            message: "command not found: cmake".into(),
            code: None,
        };
        assert_eq!(status.exit_code(), EXIT_NOT_FOUND);
        assert!(!status.success());
    }

    #[test]
    fn test_signal_maps_to_128_plus_signal() {
        let status = StepStatus::Exited {
            code: None,
            signal: Some(9),
            success: false,
        };
        assert_eq!(status.exit_code(), 137);
    }

    #[test]
    fn test_skipped_build_reports_configure_code() {
        let report = InvocationReport::new(
            Uuid::nil(),
            outcome(Step::Configure, exited(3)),
            outcome(
                Step::Build,
                StepStatus::Skipped {
                    reason: "configure failed".into(),
                },
            ),
        );
        assert_eq!(report.exit_code(), 3);
    }

    #[test]
    fn test_report_serializes_steps_and_millis() {
        let report = InvocationReport::new(
            Uuid::nil(),
            outcome(Step::Configure, exited(0)),
            outcome(Step::Build, exited(0)),
        );
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["exit_code"], 0);
        assert_eq!(value["configure"]["step"], "configure");
        assert_eq!(value["build"]["duration_ms"], 1);
        assert_eq!(value["build"]["status"]["kind"], "exited");
        assert_eq!(value["build"]["status"]["code"], 0);
    }
}
