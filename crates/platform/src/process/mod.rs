//! Process execution operations

use async_trait::async_trait;
use cbuild_errors::Error;
use std::ffi::{OsStr, OsString};
use std::process::ExitStatus;

use crate::core::PlatformContext;

/// Command builder.
///
/// Arguments are stored as `OsString` and handed to the OS as separate argv
/// entries; nothing is quoted, split or passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    /// Get the program name
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as (lossy) UTF-8, for logs and reports
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Human-readable command line.
    ///
    /// Arguments containing whitespace or nothing at all are shown in double
    /// quotes so the rendering reads unambiguously. This is presentation only.
    pub fn display(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            line.push(' ');
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                line.push('"');
                line.push_str(&arg);
                line.push('"');
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

/// Trait for process execution operations
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Run a command with stdin/stdout/stderr inherited from this process and
    /// wait for it to exit.
    ///
    /// Returns `Err` only when the process could not be spawned. A non-zero
    /// exit is an `Ok` status.
    async fn run_inherited(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<ExitStatus, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_arguments_verbatim() {
        let mut cmd = PlatformCommand::new("cmake");
        cmd.arg("--build").args(["out dir", "--target", "a;b $(x)"]);

        let args: Vec<&OsStr> = cmd.get_args().iter().map(OsString::as_os_str).collect();
        assert_eq!(
            args,
            [
                OsStr::new("--build"),
                OsStr::new("out dir"),
                OsStr::new("--target"),
                OsStr::new("a;b $(x)")
            ]
        );
    }

    #[test]
    fn test_display_quotes_whitespace_and_empty() {
        let mut cmd = PlatformCommand::new("cmake");
        cmd.args(["-B", "my build", "--target", ""]);
        assert_eq!(cmd.display(), r#"cmake -B "my build" --target """#);
    }
}
