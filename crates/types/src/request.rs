//! Invocation request and step identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The two positional inputs of an invocation.
///
/// Neither field is validated: `output_dir` may not exist yet and `target`
/// may be any string. Both are forwarded to CMake unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub output_dir: PathBuf,
    pub target: String,
}

impl InvocationRequest {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            target: target.into(),
        }
    }
}

/// One of the two external invocations, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Configure,
    Build,
}

impl Step {
    /// Both steps, in the order they run
    pub const ALL: [Step; 2] = [Step::Configure, Step::Build];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Build => "build",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
