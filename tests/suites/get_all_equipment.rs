// tests/suites/get_all_equipment.rs
// ============================================================================
// Module: Get All Equipment Suite
// Description: Live coverage for GET /api/equipment.
// Purpose: Verify listing envelope, item shape, and the missing item route.
// Dependencies: helpers, equipment-system-tests
// ============================================================================

//! Live coverage for the equipment listing.

use std::collections::HashSet;

use equipment_system_tests::check;
use equipment_system_tests::fixtures;
use equipment_system_tests::model;
use equipment_system_tests::report::TestReporter;
use equipment_system_tests::schema;

use crate::helpers::harness;

#[tokio::test(flavor = "multi_thread")]
async fn listing_envelope_is_well_formed() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("listing_envelope_is_well_formed")?;
    let suite = harness::connect()?;

    // Guarantee at least one item before inspecting the listing.
    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;
    let _ = suite.api.wait_until_listed(created.id).await?;

    let (count, items, response) = suite.api.list().await?;
    check::expect_json_content_type(&response)?;
    check::expect_count_matches(&response)?;
    check::expect_schema(&response, &schema::registry::get_all_equipment_ok(), "listing")?;
    if count == 0 || items.is_empty() {
        return Err(format!("listing is empty after create: {}", response.context()).into());
    }

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("listing holds {count} items with matching count")],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listing_ids_are_unique() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("listing_ids_are_unique")?;
    let suite = harness::connect()?;

    let (_, items, response) = suite.api.list().await?;
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.id) {
            return Err(
                format!("duplicate equipment id {} in listing: {}", item.id, response.context())
                    .into(),
            );
        }
    }

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("{} listed ids are pairwise distinct", items.len())],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listed_items_carry_valid_fields() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("listed_items_carry_valid_fields")?;
    let suite = harness::connect()?;

    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;
    let _ = suite.api.wait_until_listed(created.id).await?;

    let (_, items, _) = suite.api.list().await?;
    for item in &items {
        if item.name.is_empty() {
            return Err(format!("equipment {} has an empty name", item.id).into());
        }
        if item.location.is_empty() {
            return Err(format!("equipment {} has an empty location", item.id).into());
        }
        if let Some(raw) = &item.last_updated {
            model::parse_iso_timestamp(raw).map_err(|err| {
                format!("equipment {} has invalid lastUpdated {raw:?}: {err}", item.id)
            })?;
        }
    }

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("{} listed items carry valid fields", items.len())],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn single_resource_route_is_absent() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("single_resource_route_is_absent")?;
    let suite = harness::connect()?;

    // Even an id known to exist must 404 on the per-item route.
    let payload = fixtures::payload_fixture()?;
    let (created, _) = suite.api.create(&payload).await?;

    let response = suite.api.fetch_one_raw(created.id).await?;
    check::expect_status(&response, 404)?;
    check::expect_error_envelope(&response)?;
    check::expect_schema(&response, &schema::registry::error_envelope(), "error envelope")?;

    harness::record_pass(
        &mut reporter,
        &suite.api,
        vec![format!("GET by id returned 404 for existing equipment {}", created.id)],
    )?;
    Ok(())
}
