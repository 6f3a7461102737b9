//! Built-in defaults for the CMake invocation
//!
//! These reproduce the tool's fixed behaviour when no config file or flag
//! overrides them.

/// CMake executable looked up on `PATH`
pub const DEFAULT_PROGRAM: &str = "cmake";

/// Source tree handed to `-S`, relative to the working directory
pub const DEFAULT_SOURCE_DIR: &str = "./src";

/// Value of `CMAKE_BUILD_TYPE` for the configure step
pub const DEFAULT_BUILD_TYPE: &str = "Debug";

/// Directory name under the user's config/state dirs
pub const APP_DIR: &str = "cbuild";

pub const CONFIG_FILE: &str = "config.toml";
pub const LOGS_SUBDIR: &str = "logs";
