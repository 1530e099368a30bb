// src/schema/registry.rs
// ============================================================================
// Module: Schema Registry
// Description: Declared response contracts per equipment API endpoint.
// Purpose: Provide the success and error schemas the suites validate against.
// Dependencies: schema descriptors
// ============================================================================

//! ## Overview
//! One success schema and one shared error schema per endpoint, mirroring the
//! observed service contract. Timestamp strictness differs by endpoint on
//! purpose: listing `lastUpdated` values are `Z`-only with up to six
//! fractional digits, while history `timestamp` values also appear with nine
//! fractional digits and numeric offsets.

use super::FieldRule;
use super::Schema;

/// Wire spellings of the status enum.
pub const ALLOWED_STATUS: [&str; 3] = ["Active", "Idle", "Under Maintenance"];

/// Listing timestamps: `Z`-only, up to 6 fractional digits.
const LISTING_TIMESTAMP: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{1,6})?Z$";

/// History timestamps: up to 9 fractional digits, `Z` or numeric offset.
const HISTORY_TIMESTAMP: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d{1,9})?(?:Z|[+-]\d{2}:\d{2})$";

fn status_field() -> FieldRule {
    FieldRule::string().allowed_strings(&ALLOWED_STATUS)
}

/// Error envelope shared by every endpoint: `{success: false, error}`.
#[must_use]
pub fn error_envelope() -> Schema {
    Schema::object()
        .field("success", FieldRule::boolean().allowed_bool(false))
        .field("error", FieldRule::string())
}

/// Success contract for `POST /api/equipment`.
#[must_use]
pub fn create_equipment_ok() -> Schema {
    let item = Schema::object()
        .field("id", FieldRule::integer().min(1))
        .field("name", FieldRule::string().min_len(1))
        .field("status", status_field())
        .field("location", FieldRule::string().min_len(1))
        .field("lastUpdated", FieldRule::string().optional().nullable());
    Schema::object()
        .field("success", FieldRule::boolean().allowed_bool(true))
        .field("data", FieldRule::object(item))
}

/// Success contract for `GET /api/equipment`.
#[must_use]
pub fn get_all_equipment_ok() -> Schema {
    let item = Schema::object()
        .field("id", FieldRule::integer().min(1))
        .field("name", FieldRule::string())
        .field("status", status_field())
        .field("location", FieldRule::string())
        .field("lastUpdated", FieldRule::string().pattern(LISTING_TIMESTAMP));
    Schema::object()
        .field("success", FieldRule::boolean().allowed_bool(true))
        .field("count", FieldRule::integer().min(0))
        .field("data", FieldRule::list_of(FieldRule::object(item)))
}

/// Success contract for `POST /api/equipment/{id}/status`.
#[must_use]
pub fn update_status_ok() -> Schema {
    let equipment = Schema::object()
        .field("id", FieldRule::integer().min(1))
        .field("name", FieldRule::string().min_len(1))
        .field("status", status_field())
        .field("location", FieldRule::string().min_len(1))
        .field("lastUpdated", FieldRule::string().min_len(1));
    let history_entry = Schema::object()
        .field("id", FieldRule::integer().min(1))
        .field("equipmentId", FieldRule::integer().min(1))
        .field("previousStatus", status_field())
        .field("newStatus", status_field())
        .field("timestamp", FieldRule::string().min_len(1))
        .field("changedBy", FieldRule::string().min_len(1));
    let data = Schema::object()
        .field("equipment", FieldRule::object(equipment))
        .field("historyEntry", FieldRule::object(history_entry));
    Schema::object()
        .field("success", FieldRule::boolean().allowed_bool(true))
        .field("data", FieldRule::object(data))
}

/// Success contract for `GET /api/equipment/{id}/history`.
#[must_use]
pub fn equipment_history_ok() -> Schema {
    let entry = Schema::object()
        .field("id", FieldRule::integer().min(1))
        .field("equipmentId", FieldRule::integer().min(1))
        .field("previousStatus", status_field())
        .field("newStatus", status_field())
        .field("timestamp", FieldRule::string().pattern(HISTORY_TIMESTAMP))
        .field("changedBy", FieldRule::string().min_len(1));
    let data = Schema::object()
        .field("equipmentId", FieldRule::integer().min(1))
        .field("history", FieldRule::list_of(FieldRule::object(entry)))
        .field("total", FieldRule::integer().min(0))
        .field("limit", FieldRule::integer().min(0))
        .field("offset", FieldRule::integer().min(0))
        .field("hasMore", FieldRule::boolean());
    Schema::object()
        .field("success", FieldRule::boolean().allowed_bool(true))
        .field("data", FieldRule::object(data))
}
