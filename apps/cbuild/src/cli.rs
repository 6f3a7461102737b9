//! Command line interface definition

use cbuild_types::{CacheDefine, ColorChoice};
use clap::Parser;
use std::path::PathBuf;

/// cbuild - configure and build a CMake target in one step
#[derive(Parser)]
#[command(name = "cbuild")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Configure a CMake project into a build directory, then build one target")]
#[command(long_about = None)]
pub struct Cli {
    /// Build directory passed to both CMake steps
    #[arg(value_name = "OUTPUT_DIR", allow_hyphen_values = true)]
    pub output_dir: PathBuf,

    /// Name of the target to build
    #[arg(value_name = "TARGET", allow_hyphen_values = true)]
    pub target: String,

    #[command(flatten)]
    pub cmake: CMakeArgs,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Overrides for the `[cmake]` config section
#[derive(Parser)]
pub struct CMakeArgs {
    /// Source directory for the configure step [default: ./src]
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Value for CMAKE_BUILD_TYPE [default: Debug]
    #[arg(long, value_name = "TYPE")]
    pub build_type: Option<String>,

    /// CMake generator, e.g. Ninja
    #[arg(short = 'G', long, value_name = "NAME")]
    pub generator: Option<String>,

    /// Value for CMAKE_MAKE_PROGRAM
    #[arg(long, value_name = "PROGRAM")]
    pub make_program: Option<String>,

    /// Parallel jobs for the build step
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Extra cache entry for the configure step (repeatable)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    pub defines: Vec<CacheDefine>,

    /// CMake executable to run
    #[arg(long, value_name = "PATH")]
    pub cmake: Option<PathBuf>,

    /// Skip the build step when the configure step fails
    #[arg(long)]
    pub fail_fast: bool,
}

/// Output, logging and config options
#[derive(Parser)]
pub struct GlobalArgs {
    /// Print both commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the invocation report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to a file in the cbuild log directory
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positionals_and_repeated_defines() {
        let cli = Cli::try_parse_from([
            "cbuild",
            "-D",
            "A=1",
            "--define",
            "B=x=y",
            "-j",
            "4",
            "out",
            "app",
        ])
        .unwrap();

        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.target, "app");
        assert_eq!(cli.cmake.jobs, Some(4));
        assert_eq!(cli.cmake.defines.len(), 2);
        assert_eq!(cli.cmake.defines[1].to_arg(), "-DB=x=y");
    }

    #[test]
    fn test_missing_positionals_rejected() {
        assert!(Cli::try_parse_from(["cbuild"]).is_err());
        assert!(Cli::try_parse_from(["cbuild", "out"]).is_err());
    }

    #[test]
    fn test_malformed_define_rejected() {
        assert!(Cli::try_parse_from(["cbuild", "-D", "=1", "out", "app"]).is_err());
    }

    #[test]
    fn test_hyphen_leading_positionals_taken_literally() {
        let cli = Cli::try_parse_from(["cbuild", "out", "-weird"]).unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.target, "-weird");

        let cli = Cli::try_parse_from(["cbuild", "-out", "app"]).unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("-out"));
        assert_eq!(cli.target, "app");

        let cli = Cli::try_parse_from(["cbuild", "out", "--clean-first"]).unwrap();
        assert_eq!(cli.target, "--clean-first");
    }

    #[test]
    fn test_known_flags_still_parsed_around_positionals() {
        let cli = Cli::try_parse_from(["cbuild", "--dry-run", "-j", "2", "out", "app"]).unwrap();
        assert!(cli.global.dry_run);
        assert_eq!(cli.cmake.jobs, Some(2));
        assert_eq!(cli.target, "app");

        let cli = Cli::try_parse_from(["cbuild", "out", "app", "--json"]).unwrap();
        assert!(cli.global.json);

        let cli = Cli::try_parse_from(["cbuild", "out", "--fail-fast", "app"]).unwrap();
        assert!(cli.cmake.fail_fast);
        assert_eq!(cli.target, "app");

        let cli =
            Cli::try_parse_from(["cbuild", "--jobs=4", "--define=A=1", "-D", "B=2", "out", "app"])
                .unwrap();
        assert_eq!(cli.cmake.jobs, Some(4));
        assert_eq!(cli.cmake.defines.len(), 2);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_hyphenated_target_after_separator() {
        let cli = Cli::try_parse_from(["cbuild", "--", "out dir", "--weird"]).unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("out dir"));
        assert_eq!(cli.target, "--weird");
    }
}
