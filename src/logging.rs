// src/logging.rs
// ============================================================================
// Module: Session Logging
// Description: Session-scoped logging to console and a truncated log file.
// Purpose: Initialize tracing once per process and record session start.
// Dependencies: tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! One subscriber per process writes timestamped lines to stdout and to a log
//! file that is truncated at session start. Initialization also captures the
//! session start instant for reporting. An unwritable log path is a fatal
//! setup error.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::SuiteError;

static SESSION_START: OnceLock<Instant> = OnceLock::new();
static INSTALLED: Mutex<bool> = Mutex::new(false);

/// Initializes session logging: console plus a truncated log file.
///
/// Safe to call from every test; only the first successful call installs the
/// subscriber, later calls are no-ops.
///
/// # Errors
///
/// Returns a setup error when the log file cannot be created or the
/// subscriber cannot be installed.
pub fn init(log_file: &Path) -> Result<(), SuiteError> {
    let mut installed = INSTALLED
        .lock()
        .map_err(|_| SuiteError::Setup("logging init lock poisoned".to_string()))?;
    if *installed {
        return Ok(());
    }
    install(log_file)?;
    *installed = true;
    Ok(())
}

/// Reports whether session logging has been installed in this process.
#[must_use]
pub fn is_initialized() -> bool {
    INSTALLED.lock().map(|installed| *installed).unwrap_or(false)
}

/// Returns the instant the session started; first call pins it.
#[must_use]
pub fn session_start() -> Instant {
    *SESSION_START.get_or_init(Instant::now)
}

fn install(log_file: &Path) -> Result<(), SuiteError> {
    // File::create truncates any previous run's log.
    let file = File::create(log_file).map_err(|err| {
        SuiteError::Setup(format!("cannot create log file {}: {err}", log_file.display()))
    })?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("equipment_system_tests=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|err| SuiteError::Setup(format!("cannot install tracing subscriber: {err}")))?;
    let _ = SESSION_START.set(Instant::now());
    tracing::info!(log_file = %log_file.display(), "session logging initialized");
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
