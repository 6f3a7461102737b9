//! Invocation error types
//!
//! These cover the cases where an invocation cannot be attempted at all.
//! A configure or build step that runs and fails is reported as a step
//! status, not through this enum.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum InvokeError {
    #[error("invalid cache definition: {definition}")]
    InvalidDefine { definition: String },

    #[error("invalid parallel job count: {jobs}")]
    InvalidJobs { jobs: usize },

    #[error("empty CMake program path")]
    EmptyProgram,
}

impl UserFacingError for InvokeError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidDefine { .. } => Some("Cache definitions take the form KEY=VALUE."),
            Self::InvalidJobs { .. } => Some("Use a job count of at least 1."),
            Self::EmptyProgram => Some("Set `program` in the [cmake] config section."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidDefine { .. } => "invoke.invalid_define",
            Self::InvalidJobs { .. } => "invoke.invalid_jobs",
            Self::EmptyProgram => "invoke.empty_program",
        };
        Some(code)
    }
}
