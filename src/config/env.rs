// src/config/env.rs
// ============================================================================
// Module: Suite Environment
// Description: Environment-backed configuration for equipment system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid
//! silent misconfiguration. Invalid UTF-8, empty values, and malformed
//! numbers fail closed.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SuiteError;

/// Default request timeout when no override is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default API key sent on every request as `x-api-key`.
const DEFAULT_API_KEY: &str = "reqres-free-v1";

/// Default log file, truncated at session start.
const DEFAULT_LOG_FILE: &str = "test.log";

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// Target environment name (`dev`, `ci`, `staging`).
    Environment,
    /// Base URL override for the service under test.
    BaseUrl,
    /// API key override for the `x-api-key` header.
    ApiKey,
    /// Request timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Artifact run root override.
    RunRoot,
    /// Log file path override.
    LogFile,
}

impl SuiteEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "EQUIPMENT_SYSTEM_TEST_ENV",
            Self::BaseUrl => "EQUIPMENT_SYSTEM_TEST_BASE_URL",
            Self::ApiKey => "EQUIPMENT_SYSTEM_TEST_API_KEY",
            Self::TimeoutSeconds => "EQUIPMENT_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RunRoot => "EQUIPMENT_SYSTEM_TEST_RUN_ROOT",
            Self::LogFile => "EQUIPMENT_SYSTEM_TEST_LOG_FILE",
        }
    }
}

// ============================================================================
// SECTION: Target Environments
// ============================================================================

/// Deployment environment the suite targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetEnvironment {
    /// Local development service.
    #[default]
    Dev,
    /// Continuous-integration service instance.
    Ci,
    /// Shared staging deployment.
    Staging,
}

impl TargetEnvironment {
    /// Returns the default base URL for the environment.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Dev => "http://localhost:3000",
            Self::Ci => "http://127.0.0.1:3000",
            Self::Staging => "https://equipment-staging.internal.example.com",
        }
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Ci => "ci",
            Self::Staging => "staging",
        }
    }
}

impl FromStr for TargetEnvironment {
    type Err = SuiteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "ci" => Ok(Self::Ci),
            "staging" => Ok(Self::Staging),
            other => Err(SuiteError::Setup(format!(
                "{} must be one of dev, ci, staging (got {other:?})",
                SuiteEnv::Environment.as_str()
            ))),
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed suite configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Selected target environment.
    pub environment: TargetEnvironment,
    /// Base URL of the service under test.
    pub base_url: String,
    /// API key sent as `x-api-key` on every request.
    pub api_key: String,
    /// Request timeout for every HTTP call.
    pub timeout: Duration,
    /// Optional artifact run root override.
    pub run_root: Option<PathBuf>,
    /// Log file path, truncated at session start.
    pub log_file: PathBuf,
}

impl SuiteConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a setup error when an environment value is not valid UTF-8,
    /// is empty, or fails validation (unknown environment name, zero or
    /// non-numeric timeout).
    pub fn load() -> Result<Self, SuiteError> {
        let environment: TargetEnvironment = read_env_nonempty(SuiteEnv::Environment.as_str())?
            .map(|raw| raw.parse())
            .transpose()?
            .unwrap_or_default();
        let base_url = read_env_nonempty(SuiteEnv::BaseUrl.as_str())?
            .unwrap_or_else(|| environment.default_base_url().to_string());
        let api_key = read_env_nonempty(SuiteEnv::ApiKey.as_str())?
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());
        let timeout = read_env_nonempty(SuiteEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SuiteEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);
        let run_root = read_env_nonempty(SuiteEnv::RunRoot.as_str())?.map(PathBuf::from);
        let log_file = read_env_nonempty(SuiteEnv::LogFile.as_str())?
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);
        Ok(Self {
            environment,
            base_url,
            api_key,
            timeout,
            run_root,
            log_file,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns a setup error when the environment variable contains invalid
/// UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, SuiteError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| SuiteError::Setup(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns a setup error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, SuiteError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(SuiteError::Setup(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns a setup error when the value is non-numeric or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, SuiteError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        SuiteError::Setup(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(SuiteError::Setup(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
