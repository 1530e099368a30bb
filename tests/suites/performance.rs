// tests/suites/performance.rs
// ============================================================================
// Module: Performance Suite
// Description: Latency budget gates for every equipment endpoint.
// Purpose: Fail when a live call exceeds its wall-clock budget.
// Dependencies: helpers, equipment-system-tests
// ============================================================================

//! Latency budget gates for the equipment API.

use equipment_system_tests::check;
use equipment_system_tests::check::CREATE_BUDGET_MS;
use equipment_system_tests::check::READ_BUDGET_MS;
use equipment_system_tests::fixtures;
use equipment_system_tests::report::TestReporter;

use crate::helpers::harness;

const ACTOR: &str = "Operator John";

#[tokio::test(flavor = "multi_thread")]
async fn create_completes_within_budget() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("create_completes_within_budget")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, response) = suite.api.create(&payload).await?;
    check::expect_within_budget(&response, CREATE_BUDGET_MS)?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("create of equipment {} took {} ms", created.id, response.elapsed_ms())],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_completes_within_budget() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("listing_completes_within_budget")?;
    let suite = harness::connect()?;

    let (count, _, response) = suite.api.list().await?;
    check::expect_within_budget(&response, READ_BUDGET_MS)?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("listing of {count} items took {} ms", response.elapsed_ms())],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn status_update_completes_within_budget() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("status_update_completes_within_budget")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;
    let (_, response) = suite.api.update_status(created.id, created.status.next(), ACTOR).await?;
    check::expect_within_budget(&response, READ_BUDGET_MS)?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("status update took {} ms", response.elapsed_ms())],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn history_page_completes_within_budget() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("history_page_completes_within_budget")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;
    let _ = suite.api.update_status(created.id, created.status.next(), ACTOR).await?;
    let (page, response) = suite.api.history(created.id, None, None).await?;
    check::expect_within_budget(&response, READ_BUDGET_MS)?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("history page of {} entries took {} ms", page.history.len(), response.elapsed_ms())],
    )?;
    Ok(())
}
