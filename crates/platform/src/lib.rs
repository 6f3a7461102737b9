//! Platform abstraction layer for cbuild process execution.
//!
//! External tools are reached only through [`ProcessOperations`]. The native
//! implementation spawns processes with tokio and reports each spawn through
//! the event system; tests substitute their own implementation.

pub mod core;
pub mod implementations;
pub mod process;

pub use core::{Platform, PlatformContext};
pub use implementations::native::NativePlatform;

/// Re-export commonly used types
pub use process::{PlatformCommand, ProcessOperations};
