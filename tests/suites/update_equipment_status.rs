// tests/suites/update_equipment_status.rs
// ============================================================================
// Module: Update Equipment Status Suite
// Description: Live coverage for POST /api/equipment/{id}/status.
// Purpose: Verify transitions, history linkage, and the 400/404 paths.
// Dependencies: helpers, equipment-system-tests
// ============================================================================

//! Live coverage for equipment status transitions.

use equipment_system_tests::check;
use equipment_system_tests::fixtures;
use equipment_system_tests::model::EquipmentStatus;
use equipment_system_tests::report::TestReporter;
use equipment_system_tests::schema;

use crate::helpers::harness;

const OPERATOR: &str = "Operator John";
const TECHNICIAN: &str = "Technician Mike";

#[tokio::test(flavor = "multi_thread")]
async fn status_update_links_a_history_entry() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("status_update_links_a_history_entry")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;
    let _ = suite.api.wait_until_listed(created.id).await?;

    let target = created.status.next();
    let (change, response) = suite.api.update_status(created.id, target, OPERATOR).await?;
    check::expect_json_content_type(&response)?;
    check::expect_schema(&response, &schema::registry::update_status_ok(), "status update")?;
    check::expect_history_consistency(&change, created.status, OPERATOR, &response)?;

    let listed = suite.api.wait_for_listed_status(created.id, target).await?;
    if listed.status != target {
        return Err(format!(
            "listing shows status {} for equipment {}, expected {target}",
            listed.status, created.id
        )
        .into());
    }

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("equipment {} transitioned {} -> {target}", created.id, created.status)],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn full_status_cycle_returns_to_start() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("full_status_cycle_returns_to_start")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;

    let mut current = created.status;
    for _ in 0..3 {
        let before = current;
        current = current.next();
        let (change, response) = suite.api.update_status(created.id, current, TECHNICIAN).await?;
        check::expect_history_consistency(&change, before, TECHNICIAN, &response)?;
    }
    if current != created.status {
        return Err(format!(
            "three transitions ended at {current}, expected the starting status {}",
            created.status
        )
        .into());
    }

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("equipment {} cycled back to {}", created.id, created.status)],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("unknown_status_is_rejected")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;

    let body = serde_json::json!({"status": "Broken", "changedBy": OPERATOR});
    let response = suite.api.update_status_raw(created.id, &body).await?;
    check::expect_status(&response, 400)?;
    check::expect_json_content_type(&response)?;
    check::expect_error_envelope(&response)?;
    check::expect_schema(&response, &schema::registry::error_envelope(), "error envelope")?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec!["unknown status rejected with 400 and an error envelope".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_status_field_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("missing_status_field_is_rejected")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;

    let body = serde_json::json!({"changedBy": OPERATOR});
    let response = suite.api.update_status_raw(created.id, &body).await?;
    check::expect_status(&response, 400)?;
    check::expect_json_content_type(&response)?;
    check::expect_error_envelope(&response)?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec!["missing status field rejected with 400".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_equipment_returns_404() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("update_of_missing_equipment_returns_404")?;
    let suite = harness::connect()?;

    // An id far above every listed id cannot exist.
    let (_, items, _) = suite.api.list().await?;
    let max_id = items.iter().map(|item| item.id).max().unwrap_or(0);
    let missing_id = max_id + 99_999;

    let body =
        serde_json::json!({"status": EquipmentStatus::Idle.as_str(), "changedBy": OPERATOR});
    let response = suite.api.update_status_raw(missing_id, &body).await?;
    check::expect_status(&response, 404)?;
    check::expect_json_content_type(&response)?;
    check::expect_error_envelope(&response)?;
    check::expect_schema(&response, &schema::registry::error_envelope(), "error envelope")?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("update of equipment {missing_id} returned 404")],
    )?;
    Ok(())
}
