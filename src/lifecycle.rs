// src/lifecycle.rs
// ============================================================================
// Module: Equipment Lifecycle Driver
// Description: Multi-call flows against the equipment API.
// Purpose: Create, list, transition, and page history with bounded polling.
// Dependencies: api client, tokio
// ============================================================================

//! ## Overview
//! Encapsulates the call sequences the suites need: create (requires 201),
//! list, status transitions (require 200), history pages, raw variants for
//! negative paths, and bounded polling for the eventual-consistency window
//! between a write and its visibility in subsequent listings. Polling always
//! has an explicit interval and a fixed attempt ceiling; it never retries
//! indefinitely.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;

use crate::client::ApiClient;
use crate::client::ApiResponse;
use crate::error::SuiteError;
use crate::fixtures::EquipmentPayload;
use crate::model::Equipment;
use crate::model::EquipmentStatus;
use crate::model::HistoryPage;
use crate::model::StatusChange;

/// Attempt ceiling for every eventual-consistency poll.
pub const MAX_POLL_ATTEMPTS: u32 = 10;

/// Poll interval while waiting for a created item to appear in listings.
pub const CREATE_VISIBILITY_INTERVAL: Duration = Duration::from_millis(500);

/// Poll interval while waiting for an updated status to appear in listings.
pub const UPDATE_VISIBILITY_INTERVAL: Duration = Duration::from_millis(300);

/// Collection endpoint path.
const EQUIPMENT_PATH: &str = "/api/equipment";

/// Polls until `predicate` accepts a polled value, with a fixed attempt
/// ceiling and explicit interval.
///
/// # Errors
///
/// Propagates poll errors immediately; returns a timeout error once the
/// attempt budget is exhausted.
pub async fn wait_for<T, F, Fut, P>(
    mut poll: F,
    mut predicate: P,
    condition: &str,
    max_attempts: u32,
    interval: Duration,
) -> Result<T, SuiteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SuiteError>>,
    P: FnMut(&T) -> bool,
{
    for attempt in 1..=max_attempts {
        let value = poll().await?;
        if predicate(&value) {
            return Ok(value);
        }
        if attempt < max_attempts {
            sleep(interval).await;
        }
    }
    Err(SuiteError::Timeout {
        condition: condition.to_string(),
        attempts: max_attempts,
        interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
    })
}

/// Lifecycle driver over an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct EquipmentApi {
    client: ApiClient,
}

impl EquipmentApi {
    /// Wraps a configured client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self {
            client,
        }
    }

    /// Returns the underlying client, e.g. for transcript snapshots.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Creates equipment and requires HTTP 201.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; returns an unexpected-status error on
    /// anything but 201, since the rest of the test cannot proceed.
    pub async fn create(
        &self,
        payload: &EquipmentPayload,
    ) -> Result<(Equipment, ApiResponse), SuiteError> {
        let response = self.client.post(EQUIPMENT_PATH, &payload.to_json()).await?;
        require_status(&response, 201)?;
        let equipment = parse_data(&response)?;
        Ok((equipment, response))
    }

    /// Sends an arbitrary create body without status requirements, for
    /// negative-path tests.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn create_raw(&self, body: &Value) -> Result<ApiResponse, SuiteError> {
        self.client.post(EQUIPMENT_PATH, body).await
    }

    /// Lists the collection and requires HTTP 200.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and unexpected statuses.
    pub async fn list(&self) -> Result<(u64, Vec<Equipment>, ApiResponse), SuiteError> {
        let response = self.client.get(EQUIPMENT_PATH, &[]).await?;
        require_status(&response, 200)?;
        let body = response.json()?;
        let count = body.get("count").and_then(Value::as_u64).unwrap_or(0);
        let items: Vec<Equipment> = body
            .get("data")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|err| malformed(&response, &format!("listing data: {err}")))?
            .unwrap_or_default();
        Ok((count, items, response))
    }

    /// Fetches a single resource by id. The endpoint is documented absent;
    /// callers use this as a negative-path probe.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn fetch_one_raw(&self, id: u64) -> Result<ApiResponse, SuiteError> {
        self.client.get(&format!("{EQUIPMENT_PATH}/{id}"), &[]).await
    }

    /// Transitions a resource's status and requires HTTP 200.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and unexpected statuses.
    pub async fn update_status(
        &self,
        id: u64,
        status: EquipmentStatus,
        changed_by: &str,
    ) -> Result<(StatusChange, ApiResponse), SuiteError> {
        let body = serde_json::json!({"status": status.as_str(), "changedBy": changed_by});
        let response = self.client.post(&format!("{EQUIPMENT_PATH}/{id}/status"), &body).await?;
        require_status(&response, 200)?;
        let change = parse_data(&response)?;
        Ok((change, response))
    }

    /// Sends an arbitrary status-transition body without status
    /// requirements, for 400/404 paths.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn update_status_raw(&self, id: u64, body: &Value) -> Result<ApiResponse, SuiteError> {
        self.client.post(&format!("{EQUIPMENT_PATH}/{id}/status"), body).await
    }

    /// Fetches a history page with optional pagination parameters and
    /// requires HTTP 200.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and unexpected statuses.
    pub async fn history(
        &self,
        id: u64,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<(HistoryPage, ApiResponse), SuiteError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        let response = self.client.get(&format!("{EQUIPMENT_PATH}/{id}/history"), &query).await?;
        require_status(&response, 200)?;
        let page = parse_data(&response)?;
        Ok((page, response))
    }

    /// Seeds history by cycling the status once per actor, returning the
    /// final status.
    ///
    /// # Errors
    ///
    /// Propagates the first failed transition.
    pub async fn seed_history(
        &self,
        id: u64,
        start: EquipmentStatus,
        actors: &[&str],
    ) -> Result<EquipmentStatus, SuiteError> {
        let mut current = start;
        for actor in actors {
            current = current.next();
            tracing::info!(id, status = %current, actor, "seeding history transition");
            let _ = self.update_status(id, current, actor).await?;
        }
        Ok(current)
    }

    /// Waits until a freshly created id is visible in the listing.
    ///
    /// # Errors
    ///
    /// Returns a timeout error after the poll budget is exhausted.
    pub async fn wait_until_listed(&self, id: u64) -> Result<Equipment, SuiteError> {
        let items = wait_for(
            || async { self.list().await.map(|(_, items, _)| items) },
            |items: &Vec<Equipment>| items.iter().any(|item| item.id == id),
            &format!("equipment {id} visible in listing"),
            MAX_POLL_ATTEMPTS,
            CREATE_VISIBILITY_INTERVAL,
        )
        .await?;
        items.into_iter().find(|item| item.id == id).ok_or(SuiteError::Timeout {
            condition: format!("equipment {id} visible in listing"),
            attempts: MAX_POLL_ATTEMPTS,
            interval_ms: u64::try_from(CREATE_VISIBILITY_INTERVAL.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Waits until the listing reflects an updated status for an id.
    ///
    /// # Errors
    ///
    /// Returns a timeout error after the poll budget is exhausted.
    pub async fn wait_for_listed_status(
        &self,
        id: u64,
        status: EquipmentStatus,
    ) -> Result<Equipment, SuiteError> {
        let items = wait_for(
            || async { self.list().await.map(|(_, items, _)| items) },
            |items: &Vec<Equipment>| {
                items.iter().any(|item| item.id == id && item.status == status)
            },
            &format!("equipment {id} listed with status {status}"),
            MAX_POLL_ATTEMPTS,
            UPDATE_VISIBILITY_INTERVAL,
        )
        .await?;
        items
            .into_iter()
            .find(|item| item.id == id && item.status == status)
            .ok_or(SuiteError::Timeout {
                condition: format!("equipment {id} listed with status {status}"),
                attempts: MAX_POLL_ATTEMPTS,
                interval_ms: u64::try_from(UPDATE_VISIBILITY_INTERVAL.as_millis())
                    .unwrap_or(u64::MAX),
            })
    }
}

fn require_status(response: &ApiResponse, expected: u16) -> Result<(), SuiteError> {
    if response.status == expected {
        Ok(())
    } else {
        Err(SuiteError::UnexpectedStatus {
            method: response.record.method.clone(),
            url: response.record.url.clone(),
            expected,
            actual: response.status,
            context: response.context(),
        })
    }
}

fn parse_data<T: serde::de::DeserializeOwned>(response: &ApiResponse) -> Result<T, SuiteError> {
    let body = response.json()?;
    let data = body
        .get("data")
        .cloned()
        .ok_or_else(|| malformed(response, "missing data payload"))?;
    serde_json::from_value(data).map_err(|err| malformed(response, &err.to_string()))
}

fn malformed(response: &ApiResponse, detail: &str) -> SuiteError {
    SuiteError::MalformedBody {
        url: response.record.url.clone(),
        detail: detail.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
