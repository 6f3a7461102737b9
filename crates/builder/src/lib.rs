#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]
//! CMake configure + build invocation for cbuild
//!
//! Given an output directory and a target name, this crate runs the CMake
//! configure step against the source tree and then builds the target. Each
//! step is awaited before the next starts.

mod cmake;
mod invoker;
mod report;
mod settings;

pub use cmake::{build_command, configure_command};
pub use invoker::Invoker;
pub use report::{InvocationReport, StepOutcome, StepStatus, EXIT_FAILURE, EXIT_NOT_FOUND};
pub use settings::CMakeSettings;
