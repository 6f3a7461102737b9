//! Configuration sections

use crate::constants;
use cbuild_types::{CacheDefine, ColorChoice};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub color: ColorChoice,
}

/// Settings for the configure and build invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CMakeConfig {
    #[serde(default = "default_program")]
    pub program: PathBuf,
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default = "default_build_type")]
    pub build_type: String,
    /// Passed as `-G <generator>` when set, e.g. "Ninja"
    #[serde(default)]
    pub generator: Option<String>,
    /// Passed as `-DCMAKE_MAKE_PROGRAM=<path>` when set
    #[serde(default)]
    pub make_program: Option<String>,
    /// Passed as `--parallel <jobs>` to the build step when set
    #[serde(default)]
    pub jobs: Option<usize>,
    #[serde(default)]
    pub defines: Vec<CacheDefine>,
    /// Skip the build step when configure did not succeed
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for CMakeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            source_dir: default_source_dir(),
            build_type: default_build_type(),
            generator: None,
            make_program: None,
            jobs: None,
            defines: Vec::new(),
            fail_fast: false,
        }
    }
}

// Default value functions for serde
fn default_program() -> PathBuf {
    PathBuf::from(constants::DEFAULT_PROGRAM)
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_SOURCE_DIR)
}

fn default_build_type() -> String {
    constants::DEFAULT_BUILD_TYPE.to_string()
}
