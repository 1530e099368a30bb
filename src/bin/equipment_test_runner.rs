// src/bin/equipment_test_runner.rs
// ============================================================================
// Module: Equipment Test Runner
// Description: Command-line launcher for the live equipment API suites.
// Purpose: Select environment and suites, rerun flaky suites, gate exit code.
// Dependencies: clap, thiserror, tracing
// ============================================================================

//! ## Overview
//! Thin launcher over `cargo test`: picks the target environment, chooses
//! which suite binaries to run, and retries a failing suite up to a rerun
//! budget before failing the session. The child processes inherit the
//! environment selection through `EQUIPMENT_SYSTEM_TEST_ENV`.

use std::path::Path;
use std::process::Command;
use std::process::ExitCode;

use clap::Parser;
use clap::ValueEnum;
use equipment_system_tests::config::SuiteEnv;
use equipment_system_tests::logging;
use thiserror::Error;

/// Log file for the runner session itself. Suite binaries keep their own.
const RUNNER_LOG_FILE: &str = "runner.log";

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Target environment accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetEnvArg {
    /// Local development service.
    Dev,
    /// Continuous-integration service.
    Ci,
    /// Shared staging service.
    Staging,
}

impl TargetEnvArg {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Ci => "ci",
            Self::Staging => "staging",
        }
    }
}

/// Suite selection accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SuiteTag {
    /// Functional CRUD and lifecycle coverage.
    Smoke,
    /// Latency budget gates.
    Performance,
    /// Every suite.
    All,
}

impl SuiteTag {
    fn suites(self) -> Vec<&'static str> {
        match self {
            Self::Smoke => vec!["smoke"],
            Self::Performance => vec!["performance"],
            Self::All => vec!["smoke", "performance"],
        }
    }
}

/// Launcher for the live equipment API test suites.
#[derive(Debug, Parser)]
#[command(name = "equipment_test_runner", version, about)]
struct RunnerArgs {
    /// Target environment for the suites.
    #[arg(long, value_enum, default_value = "ci")]
    env: TargetEnvArg,

    /// Which suites to run.
    #[arg(long, value_enum, default_value = "smoke")]
    tags: SuiteTag,

    /// Extra attempts granted to a failing suite.
    #[arg(long, default_value_t = 2)]
    rerun: u32,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures the runner can hit while driving suites.
#[derive(Debug, Error)]
enum RunnerError {
    /// The `cargo test` child process could not be spawned.
    #[error("failed to launch suite {suite}: {source}")]
    Launch {
        suite: String,
        #[source]
        source: std::io::Error,
    },
    /// A suite stayed red through every granted attempt.
    #[error("suite {suite} failed after {attempts} attempt(s)")]
    SuiteFailed { suite: String, attempts: u32 },
}

// ============================================================================
// SECTION: Execution
// ============================================================================

fn main() -> ExitCode {
    let args = RunnerArgs::parse();
    if let Err(err) = logging::init(Path::new(RUNNER_LOG_FILE)) {
        eprintln!("cannot initialize runner logging: {err}");
        return ExitCode::FAILURE;
    }
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "test session failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &RunnerArgs) -> Result<(), RunnerError> {
    let suites = args.tags.suites();
    tracing::info!(
        environment = args.env.as_str(),
        suites = ?suites,
        rerun = args.rerun,
        "starting test session"
    );
    for suite in suites {
        run_suite_with_reruns(args, suite)?;
    }
    tracing::info!("test session passed");
    Ok(())
}

/// Runs one suite binary, retrying up to the rerun budget.
fn run_suite_with_reruns(args: &RunnerArgs, suite: &str) -> Result<(), RunnerError> {
    let max_attempts = args.rerun.saturating_add(1);
    for attempt in 1..=max_attempts {
        tracing::info!(suite, attempt, max_attempts, "running suite");
        if run_suite_once(args, suite)? {
            tracing::info!(suite, attempt, "suite passed");
            return Ok(());
        }
        tracing::warn!(suite, attempt, "suite failed");
    }
    Err(RunnerError::SuiteFailed {
        suite: suite.to_string(),
        attempts: max_attempts,
    })
}

fn run_suite_once(args: &RunnerArgs, suite: &str) -> Result<bool, RunnerError> {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let status = Command::new(cargo)
        .args(["test", "--features", "system-tests", "--test", suite, "--", "--test-threads=1"])
        .env(SuiteEnv::Environment.as_str(), args.env.as_str())
        .status()
        .map_err(|source| RunnerError::Launch {
            suite: suite.to_string(),
            source,
        })?;
    Ok(status.success())
}
