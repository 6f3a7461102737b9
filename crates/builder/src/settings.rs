//! Resolved settings for one invocation

use cbuild_config::CMakeConfig;
use cbuild_errors::{Error, InvokeError};
use cbuild_types::CacheDefine;
use std::path::PathBuf;

/// Everything the command templates need besides the two positional inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CMakeSettings {
    pub program: PathBuf,
    pub source_dir: PathBuf,
    pub build_type: String,
    pub generator: Option<String>,
    pub make_program: Option<String>,
    pub jobs: Option<usize>,
    pub defines: Vec<CacheDefine>,
    pub fail_fast: bool,
}

impl CMakeSettings {
    /// Take settings from a loaded (and CLI-merged) config section
    #[must_use]
    pub fn from_config(config: &CMakeConfig) -> Self {
        Self {
            program: config.program.clone(),
            source_dir: config.source_dir.clone(),
            build_type: config.build_type.clone(),
            generator: config.generator.clone(),
            make_program: config.make_program.clone(),
            jobs: config.jobs,
            defines: config.defines.clone(),
            fail_fast: config.fail_fast,
        }
    }

    /// Check settings that would make every invocation meaningless.
    ///
    /// Only settings are checked here. The output directory and target are
    /// never inspected.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty program path or a zero job count.
    pub fn validate(&self) -> Result<(), Error> {
        if self.program.as_os_str().is_empty() {
            return Err(InvokeError::EmptyProgram.into());
        }
        if self.jobs == Some(0) {
            return Err(InvokeError::InvalidJobs { jobs: 0 }.into());
        }
        Ok(())
    }
}

impl Default for CMakeSettings {
    fn default() -> Self {
        Self::from_config(&CMakeConfig::default())
    }
}
