//! cbuild - configure and build a CMake target in one step
//!
//! Runs `cmake -DCMAKE_BUILD_TYPE=Debug -S ./src -B <OUTPUT_DIR>` followed by
//! `cmake --build <OUTPUT_DIR> --target <TARGET>`. The build step runs even when
//! the configure step fails, and the process exits with the build step's code.

mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use cbuild_builder::{CMakeSettings, Invoker};
use cbuild_config::Config;
use cbuild_events::EventReceiver;
use cbuild_platform::Platform;
use cbuild_types::{ColorChoice, InvocationRequest, Step};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first; missing positionals exit here
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    // Config is loaded before tracing so its color setting applies to logs.
    // A load error is reported once tracing is up.
    let config = Config::load_or_default(cli.global.config.as_deref()).await;
    let color = cli
        .global
        .color
        .or_else(|| config.as_ref().ok().map(|c| c.general.color))
        .unwrap_or_default();

    init_tracing(json_mode, cli.global.debug, color);

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(CliError::from(e)),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            error!("Application error: {}", e);
            if !json_mode {
                eprintln!("Error: {e}");
            }
            process::exit(1);
        }
    }
}

/// Main application logic; returns the process exit code
async fn run(cli: Cli, mut config: Config) -> Result<i32, CliError> {
    info!("Starting cbuild v{}", env!("CARGO_PKG_VERSION"));

    apply_cli_config(&mut config, &cli);

    let request = InvocationRequest::new(cli.output_dir, cli.target);
    let settings = CMakeSettings::from_config(&config.cmake);

    if cli.global.dry_run {
        let invoker = Invoker::new(Platform::current(), settings);
        print_plan(&invoker, &request, cli.global.json)?;
        return Ok(0);
    }

    let (event_sender, event_receiver) = cbuild_events::channel();
    let drain = tokio::spawn(drain_events(event_receiver));

    let invoker = Invoker::new(Platform::current(), settings).with_event_sender(event_sender);
    let result = invoker.run(&request).await;

    // Dropping the last sender closes the channel so the drain task finishes
    drop(invoker);
    let _ = drain.await;

    let report = result?;

    if cli.global.json {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    }

    info!(exit_code = report.exit_code(), "Invocation complete");
    Ok(report.exit_code())
}

/// Forward every event to tracing until all senders are gone
async fn drain_events(mut event_receiver: EventReceiver) {
    while let Some(event) = event_receiver.recv().await {
        logging::log_event_with_tracing(&event);
    }
}

/// Print the two commands an invocation would run
fn print_plan(
    invoker: &Invoker,
    request: &InvocationRequest,
    json_mode: bool,
) -> Result<(), CliError> {
    let plan = invoker.plan(request)?;
    let mut stdout = std::io::stdout().lock();

    if json_mode {
        let steps: Vec<serde_json::Value> = Step::ALL
            .iter()
            .zip(&plan)
            .map(|(step, cmd)| {
                serde_json::json!({
                    "step": step,
                    "program": cmd.program().to_string_lossy(),
                    "args": cmd.args_lossy(),
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut stdout, &steps)?;
        writeln!(stdout)?;
    } else {
        for cmd in &plan {
            writeln!(stdout, "{}", cmd.display())?;
        }
    }
    Ok(())
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(color) = cli.global.color {
        config.general.color = color;
    }

    let args = &cli.cmake;
    let cmake = &mut config.cmake;
    if let Some(program) = &args.cmake {
        cmake.program.clone_from(program);
    }
    if let Some(source_dir) = &args.source_dir {
        cmake.source_dir.clone_from(source_dir);
    }
    if let Some(build_type) = &args.build_type {
        cmake.build_type.clone_from(build_type);
    }
    if args.generator.is_some() {
        cmake.generator.clone_from(&args.generator);
    }
    if args.make_program.is_some() {
        cmake.make_program.clone_from(&args.make_program);
    }
    if args.jobs.is_some() {
        cmake.jobs = args.jobs;
    }
    // Flag definitions come after file definitions so CMake sees them last
    cmake.defines.extend(args.defines.iter().cloned());
    if args.fail_fast {
        cmake.fail_fast = true;
    }
}

fn init_tracing(json_mode: bool, debug_enabled_flag: bool, color: ColorChoice) {
    // Check if debug logging is enabled
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    let ansi = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        // Console logs go to stderr; stdout only carries --json/--dry-run output
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    };

    if json_mode {
        // JSON mode: suppress all console output to avoid contaminating JSON
        if debug_enabled {
            if let Some(file) = create_log_file() {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,cbuild=debug,cbuild_builder=debug"),
                        ),
                    )
                    .init();
                return;
            }
        }
        // Fallback: disable all logging in JSON mode
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled_flag {
        // Debug mode: structured JSON logs to file
        match create_log_file() {
            Some(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
                            |_| tracing_subscriber::EnvFilter::new("info,cbuild=debug,cbuild_builder=debug"),
                        ),
                    )
                    .init();
            }
            None => {
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                    )
                    .init();
            }
        }
    } else {
        // Normal mode: minimal logging to stderr, CMake owns the console
        tracing_subscriber::fmt()
            .compact()
            .without_time()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
}

/// Create a timestamped debug log file, reporting problems on stderr
fn create_log_file() -> Option<std::fs::File> {
    let log_dir = cbuild_config::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {e}");
        return None;
    }

    let log_file = log_dir.join(format!(
        "cbuild-{}.log",
        chrono::Utc::now().format("%Y%m%d-%H%M%S")
    ));

    match std::fs::File::create(&log_file) {
        Ok(file) => {
            eprintln!("Debug logging enabled: {}", log_file.display());
            Some(file)
        }
        Err(e) => {
            eprintln!("Warning: Failed to create log file: {e}");
            None
        }
    }
}
