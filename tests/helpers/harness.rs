// tests/helpers/harness.rs
// ============================================================================
// Module: Live Suite Harness
// Description: Configuration, logging, and client setup for live tests.
// Purpose: Build a ready lifecycle driver and bracket tests with artifacts.
// Dependencies: equipment-system-tests
// ============================================================================

use equipment_system_tests::client::ApiClient;
use equipment_system_tests::config::SuiteConfig;
use equipment_system_tests::error::SuiteError;
use equipment_system_tests::lifecycle::EquipmentApi;
use equipment_system_tests::logging;
use equipment_system_tests::report::TestReporter;

/// A configured connection to the service under test.
pub struct LiveSuite {
    pub api: EquipmentApi,
    pub config: SuiteConfig,
}

/// Loads configuration, initializes session logging, and builds the driver.
///
/// # Errors
///
/// Returns a setup error when configuration or the HTTP client is invalid.
pub fn connect() -> Result<LiveSuite, SuiteError> {
    let config = SuiteConfig::load()?;
    logging::init(&config.log_file)?;
    let client = ApiClient::new(&config)?;
    Ok(LiveSuite {
        api: EquipmentApi::new(client),
        config,
    })
}

/// Writes the captured transcript and a passing summary for a test.
///
/// # Errors
///
/// Returns an error when an artifact write fails.
pub fn record_pass(
    reporter: &mut TestReporter,
    api: &EquipmentApi,
    notes: Vec<String>,
) -> std::io::Result<()> {
    reporter.artifacts().write_transcript(&api.client().transcript())?;
    reporter.finish("pass", notes, vec!["transcript.json".to_string()])
}
