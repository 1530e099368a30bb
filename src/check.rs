// src/check.rs
// ============================================================================
// Module: Response Checks
// Description: Assertion layer for equipment API responses.
// Purpose: Verify status, envelope, schema, timing, and consistency.
// Dependencies: serde_json, schema descriptors
// ============================================================================

//! ## Overview
//! Every observable response dimension is checked here: status codes,
//! `Content-Type`, envelope invariants, declarative schema conformance,
//! performance budgets, and cross-entity history consistency. Every failure
//! embeds the captured request/response context so a failing run is
//! debuggable from its output alone.

use serde_json::Value;

use crate::client::ApiResponse;
use crate::error::SuiteError;
use crate::model::EquipmentStatus;
use crate::model::StatusChange;
use crate::schema::Schema;

/// Latency ceiling for equipment creation.
pub const CREATE_BUDGET_MS: u64 = 700;

/// Latency ceiling for reads, status updates, and history pages.
pub const READ_BUDGET_MS: u64 = 500;

/// Requires an exact status code.
///
/// # Errors
///
/// Returns an assertion failure naming both codes and the call context.
pub fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), SuiteError> {
    if response.status == expected {
        Ok(())
    } else {
        Err(SuiteError::assertion(
            format!("expected status {expected}, got {}", response.status),
            response.context(),
        ))
    }
}

/// Requires a `Content-Type` starting with `application/json`.
///
/// # Errors
///
/// Returns an assertion failure when the header is missing or different.
pub fn expect_json_content_type(response: &ApiResponse) -> Result<(), SuiteError> {
    match &response.content_type {
        Some(content_type) if content_type.starts_with("application/json") => Ok(()),
        Some(content_type) => Err(SuiteError::assertion(
            format!("expected application/json content type, got {content_type:?}"),
            response.context(),
        )),
        None => Err(SuiteError::assertion("missing Content-Type header", response.context())),
    }
}

/// Requires the success envelope and returns its `data` payload.
///
/// The `success` flag must be `true` and must agree with the 2xx status
/// class.
///
/// # Errors
///
/// Returns an assertion failure on a missing/false flag, a status-class
/// mismatch, or a missing `data` field.
pub fn success_data(response: &ApiResponse) -> Result<Value, SuiteError> {
    let body = response.json()?;
    let flag = body
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| SuiteError::assertion("missing boolean success flag", response.context()))?;
    if !flag {
        return Err(SuiteError::assertion("success flag is false", response.context()));
    }
    if !(200..300).contains(&response.status) {
        return Err(SuiteError::assertion(
            format!("success envelope with non-2xx status {}", response.status),
            response.context(),
        ));
    }
    body.get("data")
        .cloned()
        .ok_or_else(|| SuiteError::assertion("missing data payload", response.context()))
}

/// Requires the error envelope: `success == false` and a non-empty `error`
/// string, agreeing with the 4xx/5xx status class.
///
/// # Errors
///
/// Returns an assertion failure when any envelope invariant does not hold.
pub fn expect_error_envelope(response: &ApiResponse) -> Result<(), SuiteError> {
    let body = response.json()?;
    match body.get("success").and_then(Value::as_bool) {
        Some(false) => {}
        other => {
            return Err(SuiteError::assertion(
                format!("expected success=false in error envelope, got {other:?}"),
                response.context(),
            ));
        }
    }
    match body.get("error").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => {}
        _ => {
            return Err(SuiteError::assertion(
                "error envelope must carry a non-empty error string",
                response.context(),
            ));
        }
    }
    if response.status < 400 {
        return Err(SuiteError::assertion(
            format!("error envelope with non-error status {}", response.status),
            response.context(),
        ));
    }
    Ok(())
}

/// Requires `count == data.len()` on a listing envelope.
///
/// # Errors
///
/// Returns an assertion failure when the fields are missing or disagree.
pub fn expect_count_matches(response: &ApiResponse) -> Result<(), SuiteError> {
    let body = response.json()?;
    let count = body
        .get("count")
        .and_then(Value::as_u64)
        .ok_or_else(|| SuiteError::assertion("missing integer count", response.context()))?;
    let data_len = body
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::len)
        .ok_or_else(|| SuiteError::assertion("missing data array", response.context()))?;
    if count == data_len as u64 {
        Ok(())
    } else {
        Err(SuiteError::assertion(
            format!("count {count} does not match data length {data_len}"),
            response.context(),
        ))
    }
}

/// Validates the body against a declared schema.
///
/// # Errors
///
/// Returns an assertion failure listing every violation with its path.
pub fn expect_schema(response: &ApiResponse, schema: &Schema, label: &str) -> Result<(), SuiteError> {
    let body = response.json()?;
    let violations = schema.validate(body);
    if violations.is_empty() {
        Ok(())
    } else {
        let rendered: Vec<String> = violations.iter().map(ToString::to_string).collect();
        Err(SuiteError::assertion(
            format!("schema {label} violated: {}", rendered.join("; ")),
            response.context(),
        ))
    }
}

/// Requires the call to finish within a wall-clock budget.
///
/// # Errors
///
/// Returns an assertion failure reporting the measured elapsed time.
pub fn expect_within_budget(response: &ApiResponse, budget_ms: u64) -> Result<(), SuiteError> {
    let elapsed_ms = response.elapsed_ms();
    if elapsed_ms <= budget_ms {
        Ok(())
    } else {
        Err(SuiteError::assertion(
            format!("call took {elapsed_ms} ms, budget is {budget_ms} ms"),
            response.context(),
        ))
    }
}

/// Requires a status transition result to be internally consistent: the
/// history entry must link the same equipment, record the pre-call status as
/// `previousStatus`, the post-call resource status as `newStatus`, and the
/// requesting actor.
///
/// # Errors
///
/// Returns an assertion failure naming the first inconsistency.
pub fn expect_history_consistency(
    change: &StatusChange,
    status_before: EquipmentStatus,
    changed_by: &str,
    response: &ApiResponse,
) -> Result<(), SuiteError> {
    let entry = &change.history_entry;
    if entry.equipment_id != change.equipment.id {
        return Err(SuiteError::assertion(
            format!(
                "history entry links equipment {} but resource is {}",
                entry.equipment_id, change.equipment.id
            ),
            response.context(),
        ));
    }
    if entry.previous_status != status_before {
        return Err(SuiteError::assertion(
            format!(
                "previousStatus {} does not match pre-update status {status_before}",
                entry.previous_status
            ),
            response.context(),
        ));
    }
    if entry.new_status != change.equipment.status {
        return Err(SuiteError::assertion(
            format!(
                "newStatus {} does not match updated resource status {}",
                entry.new_status, change.equipment.status
            ),
            response.context(),
        ));
    }
    if entry.changed_by != changed_by {
        return Err(SuiteError::assertion(
            format!("changedBy {:?} does not match actor {changed_by:?}", entry.changed_by),
            response.context(),
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
