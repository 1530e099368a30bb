// src/fixtures.rs
// ============================================================================
// Module: Test Fixtures
// Description: Isolated test inputs for the equipment suites.
// Purpose: Provide base payloads, unique names, and the on-disk seed payload.
// Dependencies: chrono, rand, serde_json
// ============================================================================

//! ## Overview
//! Every test-local equipment name is disambiguated so the suite can run
//! against a live, shared, stateful service without colliding with itself or
//! with other runs. The microsecond-timestamp strategy is the default; the
//! random 1-100 suffix survives only as an explicit legacy helper.

use std::path::Path;
use std::path::PathBuf;

use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::SuiteError;
use crate::model::EquipmentStatus;

/// Relative location of the generic payload fixture.
const PAYLOAD_FILE: &str = "data/payload.json";

/// Request body for creating equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentPayload {
    /// Display name; uniquified before sending.
    pub name: String,
    /// Initial status.
    pub status: EquipmentStatus,
    /// Location label.
    pub location: String,
}

impl EquipmentPayload {
    /// Builds a payload from parts.
    #[must_use]
    pub fn new(name: &str, status: EquipmentStatus, location: &str) -> Self {
        Self {
            name: name.to_string(),
            status,
            location: location.to_string(),
        }
    }

    /// Returns a copy with a collision-resistant unique name.
    #[must_use]
    pub fn uniquified(&self) -> Self {
        Self {
            name: unique_name(&self.name),
            status: self.status,
            location: self.location.clone(),
        }
    }

    /// Serializes the payload to the wire JSON shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "status": self.status.as_str(),
            "location": self.location,
        })
    }
}

/// Fixed catalogue of base payloads covering all three statuses and three
/// locations.
#[must_use]
pub fn base_payloads() -> Vec<EquipmentPayload> {
    vec![
        EquipmentPayload::new("Excavator CAT 320", EquipmentStatus::Active, "Site A"),
        EquipmentPayload::new("Bulldozer Komatsu D65", EquipmentStatus::Idle, "Site B"),
        EquipmentPayload::new("Crane Liebherr LTM 1055", EquipmentStatus::UnderMaintenance, "Site C"),
    ]
}

/// Appends a microsecond-precision UTC timestamp suffix to a base name.
///
/// Monotonic and collision-resistant across quick successive calls, unlike
/// the legacy 100-bucket random suffix.
#[must_use]
pub fn unique_name(base: &str) -> String {
    format!("{base} #{}", Utc::now().timestamp_micros())
}

/// Legacy uniqueness strategy: random numeric suffix in 1-100.
///
/// Kept for compatibility with older fixtures; prefer [`unique_name`].
#[must_use]
pub fn legacy_random_name(base: &str) -> String {
    let suffix = rand::thread_rng().gen_range(1..=100);
    format!("{base}{suffix}")
}

/// Reads the generic payload fixture from disk and uniquifies its name.
///
/// # Errors
///
/// Returns a fatal setup error when the fixture file is missing, unreadable,
/// or not a valid payload.
pub fn payload_fixture() -> Result<EquipmentPayload, SuiteError> {
    read_payload_file(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(PAYLOAD_FILE))
        .map(|payload| payload.uniquified())
}

/// Reads an equipment payload from a JSON file.
///
/// # Errors
///
/// Returns a fatal setup error when the file is missing, unreadable, or not
/// a valid payload.
pub fn read_payload_file(path: &Path) -> Result<EquipmentPayload, SuiteError> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        SuiteError::Setup(format!("cannot read payload fixture {}: {err}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|err| {
        SuiteError::Setup(format!("invalid payload fixture {}: {err}", path.display()))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
