//! Native platform implementation backed by real processes

pub mod process;

use std::sync::Arc;

/// Native platform implementation
pub struct NativePlatform;

impl NativePlatform {
    /// Create a new native platform instance
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> crate::core::Platform {
        use process::NativeProcessOperations;

        crate::core::Platform::new(Arc::new(NativeProcessOperations::new()))
    }
}
