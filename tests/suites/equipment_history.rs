// tests/suites/equipment_history.rs
// ============================================================================
// Module: Equipment History Suite
// Description: Live coverage for GET /api/equipment/{id}/history.
// Purpose: Verify seeded entries, page shape, and the pagination invariant.
// Dependencies: helpers, equipment-system-tests
// ============================================================================

//! Live coverage for equipment status history.

use equipment_system_tests::check;
use equipment_system_tests::fixtures;
use equipment_system_tests::model;
use equipment_system_tests::report::TestReporter;
use equipment_system_tests::schema;

use crate::helpers::harness;

const ACTORS: [&str; 2] = ["Operator John", "Technician Mike"];

#[tokio::test(flavor = "multi_thread")]
async fn seeded_transitions_appear_in_history() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("seeded_transitions_appear_in_history")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;
    let _ = suite.api.wait_until_listed(created.id).await?;
    let _ = suite.api.seed_history(created.id, created.status, &ACTORS).await?;

    let (page, response) = suite.api.history(created.id, Some(5), Some(0)).await?;
    check::expect_json_content_type(&response)?;
    check::expect_schema(&response, &schema::registry::equipment_history_ok(), "history")?;

    if page.equipment_id != created.id {
        return Err(format!(
            "history page reports equipment {}, expected {}",
            page.equipment_id, created.id
        )
        .into());
    }
    if page.history.len() < ACTORS.len() {
        return Err(format!(
            "history holds {} entries after {} seeded transitions: {}",
            page.history.len(),
            ACTORS.len(),
            response.context()
        )
        .into());
    }
    if !page.has_more_is_consistent() {
        return Err(format!(
            "hasMore {} disagrees with total {} offset {} page length {}",
            page.has_more,
            page.total,
            page.offset,
            page.history.len()
        )
        .into());
    }
    for entry in &page.history {
        if entry.equipment_id != created.id {
            return Err(format!(
                "history entry {} links equipment {}, expected {}",
                entry.id, entry.equipment_id, created.id
            )
            .into());
        }
        model::parse_iso_timestamp(&entry.timestamp)
            .map_err(|err| format!("history entry {} has invalid timestamp: {err}", entry.id))?;
    }
    for actor in ACTORS {
        if !page.history.iter().any(|entry| entry.changed_by == actor) {
            return Err(format!("no history entry recorded for actor {actor:?}").into());
        }
    }

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("history for equipment {} holds the seeded transitions", created.id)],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn pagination_invariant_holds_across_offsets() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("pagination_invariant_holds_across_offsets")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;
    let _ = suite.api.seed_history(created.id, created.status, &ACTORS).await?;

    let (first, _) = suite.api.history(created.id, Some(1), Some(0)).await?;
    let (second, _) = suite.api.history(created.id, Some(1), Some(1)).await?;
    for page in [&first, &second] {
        if !page.has_more_is_consistent() {
            return Err(format!(
                "hasMore {} disagrees with total {} offset {} page length {}",
                page.has_more,
                page.total,
                page.offset,
                page.history.len()
            )
            .into());
        }
    }
    if first.total != second.total {
        return Err(format!(
            "totals differ across offsets: {} vs {}",
            first.total, second.total
        )
        .into());
    }
    if first.history.len() > 1 || second.history.len() > 1 {
        return Err("a page exceeded its requested limit of 1".into());
    }

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("pagination consistent across offsets for equipment {}", created.id)],
    )?;
    Ok(())
}
