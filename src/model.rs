// src/model.rs
// ============================================================================
// Module: Wire Models
// Description: Response payload types for the equipment API.
// Purpose: Provide typed views of envelopes, equipment, and history records.
// Dependencies: serde, chrono
// ============================================================================

//! ## Overview
//! Typed views of the service's response payloads. All entities are owned by
//! the remote service; the suite only holds transient copies for comparison.
//! The `success` envelope flag must match the HTTP status class, which the
//! assertion layer enforces separately.

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// The three valid equipment statuses, in cycling order.
pub const STATUS_ORDER: [EquipmentStatus; 3] =
    [EquipmentStatus::Active, EquipmentStatus::Idle, EquipmentStatus::UnderMaintenance];

/// Equipment status enum as the service spells it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    /// Equipment is in service.
    Active,
    /// Equipment is parked but available.
    Idle,
    /// Equipment is unavailable for work.
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
}

impl EquipmentStatus {
    /// Returns the wire spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Idle => "Idle",
            Self::UnderMaintenance => "Under Maintenance",
        }
    }

    /// Deterministically advances to the next status in the fixed cycling
    /// order. Guaranteed to differ from `self`, so it doubles as a
    /// "pick any different status" helper.
    #[must_use]
    pub fn next(self) -> Self {
        let index = STATUS_ORDER.iter().position(|status| *status == self).unwrap_or(0);
        STATUS_ORDER[(index + 1) % STATUS_ORDER.len()]
    }

    /// Parses the wire spelling, returning `None` for anything outside the
    /// three-value enum.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        STATUS_ORDER.iter().copied().find(|status| status.as_str() == raw)
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An equipment resource as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Server-assigned identifier, unique across any listing snapshot.
    pub id: u64,
    /// Non-empty display name.
    pub name: String,
    /// Current status.
    pub status: EquipmentStatus,
    /// Non-empty location label.
    pub location: String,
    /// ISO-8601 UTC timestamp of the last mutation. Absent on some create
    /// responses, always present in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// One immutable audit record of a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Server-assigned identifier of the history record.
    pub id: u64,
    /// The equipment this entry belongs to.
    pub equipment_id: u64,
    /// Status before the transition.
    pub previous_status: EquipmentStatus,
    /// Status after the transition.
    pub new_status: EquipmentStatus,
    /// ISO-8601 timestamp of the transition.
    pub timestamp: String,
    /// Actor that requested the transition.
    pub changed_by: String,
}

/// Result payload of a successful status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    /// The updated equipment resource.
    pub equipment: Equipment,
    /// The history entry the transition generated.
    pub history_entry: HistoryEntry,
}

/// One page of history entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    /// The equipment the page belongs to.
    pub equipment_id: u64,
    /// Entries in creation order, bounded by `limit`/`offset`.
    pub history: Vec<HistoryEntry>,
    /// Total number of entries for the equipment.
    pub total: u64,
    /// Requested page size.
    pub limit: u64,
    /// Requested page offset.
    pub offset: u64,
    /// Whether entries exist past this page.
    pub has_more: bool,
}

impl HistoryPage {
    /// Checks the pagination invariant
    /// `hasMore == (total > offset + len(history))`.
    #[must_use]
    pub fn has_more_is_consistent(&self) -> bool {
        self.has_more == (self.total > self.offset + self.history.len() as u64)
    }
}

/// Parses an ISO-8601 timestamp as the service emits them (`Z` suffix or
/// numeric offset).
///
/// # Errors
///
/// Returns the chrono parse error message when the value is not a valid
/// RFC 3339 timestamp.
pub fn parse_iso_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| format!("invalid ISO-8601 timestamp {raw:?}: {err}"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
