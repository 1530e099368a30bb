// src/client.rs
// ============================================================================
// Module: API Client
// Description: HTTP client wrapper for the equipment service.
// Purpose: Issue requests with default headers and uniform capture.
// Dependencies: reqwest, serde, url
// ============================================================================

//! ## Overview
//! Thin envelope around request dispatch. Every call captures method, URL,
//! headers, payload, status, body, and wall-clock elapsed time into a
//! [`CallRecord`], both for failure diagnostics and for the per-test
//! transcript artifact. The client always carries an explicit request
//! timeout; transport defaults are never relied on.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::SuiteConfig;
use crate::error::SuiteError;

/// One captured request/response pair.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    /// 1-based position in the transcript.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Full request URL including query parameters.
    pub url: String,
    /// Request headers, api key redacted.
    pub request_headers: Vec<(String, String)>,
    /// JSON request payload, when one was sent.
    pub request_body: Option<Value>,
    /// Response status code.
    pub status: u16,
    /// Response `Content-Type`, when present.
    pub content_type: Option<String>,
    /// Raw response body.
    pub response_body: String,
    /// Wall-clock time from dispatch to full response receipt.
    pub elapsed_ms: u64,
}

impl CallRecord {
    /// Renders the captured request and response for failure diagnostics.
    #[must_use]
    pub fn render(&self) -> String {
        let headers: Vec<String> =
            self.request_headers.iter().map(|(name, value)| format!("{name}: {value}")).collect();
        let payload = self
            .request_body
            .as_ref()
            .map_or_else(|| "(none)".to_string(), ToString::to_string);
        format!(
            "request: {} {}\n  headers: {}\n  payload: {payload}\nresponse: {} ({} ms)\n  body: {}",
            self.method,
            self.url,
            headers.join(", "),
            self.status,
            self.elapsed_ms,
            self.response_body,
        )
    }
}

/// Captured response with parsed JSON and timing.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response status code.
    pub status: u16,
    /// Response `Content-Type`, when present.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: String,
    /// Parsed JSON body, when the body was valid JSON.
    pub json: Option<Value>,
    /// Wall-clock elapsed time for the call.
    pub elapsed: Duration,
    /// Full captured context for diagnostics.
    pub record: CallRecord,
}

impl ApiResponse {
    /// Elapsed time in whole milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns a malformed-body error when the response was not valid JSON.
    pub fn json(&self) -> Result<&Value, SuiteError> {
        self.json.as_ref().ok_or_else(|| SuiteError::MalformedBody {
            url: self.record.url.clone(),
            detail: format!("body is not JSON: {}", truncate(&self.body, 200)),
        })
    }

    /// Rendered request/response context for diagnostics.
    #[must_use]
    pub fn context(&self) -> String {
        self.record.render()
    }
}

/// HTTP client for the equipment service with transcript capture.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    api_key: String,
    client: Client,
    transcript: Arc<Mutex<Vec<CallRecord>>>,
}

impl ApiClient {
    /// Builds a client from suite configuration.
    ///
    /// # Errors
    ///
    /// Returns a setup error when the base URL is invalid or the underlying
    /// client cannot be constructed.
    pub fn new(config: &SuiteConfig) -> Result<Self, SuiteError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| SuiteError::Setup(format!("invalid base URL {}: {err}", config.base_url)))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| SuiteError::Setup(format!("failed to build http client: {err}")))?;
        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            client,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a snapshot of every call made through this client.
    #[must_use]
    pub fn transcript(&self) -> Vec<CallRecord> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |records| records.clone())
    }

    /// Issues a GET request with optional query parameters.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request cannot be sent or the body
    /// cannot be read.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, SuiteError> {
        self.dispatch(Method::GET, path, query, None).await
    }

    /// Issues a POST request with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request cannot be sent or the body
    /// cannot be read.
    pub async fn post(&self, path: &str, payload: &Value) -> Result<ApiResponse, SuiteError> {
        self.dispatch(Method::POST, path, &[], Some(payload.clone())).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Option<Value>,
    ) -> Result<ApiResponse, SuiteError> {
        let mut url = self.base_url.join(path).map_err(|err| {
            SuiteError::Setup(format!("cannot join {path} onto {}: {err}", self.base_url))
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header("Accept", "*/*")
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key);
        if let Some(payload) = &payload {
            request = request.json(payload);
        }

        tracing::info!(method = %method, url = %url, payload = ?payload, "request");
        let started = Instant::now();
        let response = request.send().await.map_err(|source| SuiteError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        })?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = response.text().await.map_err(|source| SuiteError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        })?;
        let elapsed = started.elapsed();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(status, elapsed_ms, body = %truncate(&body, 500), "response");

        let record = CallRecord {
            sequence: self.next_sequence(),
            method: method.to_string(),
            url: url.to_string(),
            request_headers: vec![
                ("Accept".to_string(), "*/*".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("x-api-key".to_string(), "<redacted>".to_string()),
            ],
            request_body: payload,
            status,
            content_type: content_type.clone(),
            response_body: body.clone(),
            elapsed_ms,
        };
        if let Ok(mut records) = self.transcript.lock() {
            records.push(record.clone());
        }

        let json = serde_json::from_str(&body).ok();
        Ok(ApiResponse {
            status,
            content_type,
            body,
            json,
            elapsed,
            record,
        })
    }

    fn next_sequence(&self) -> u64 {
        self.transcript.lock().map_or(0, |records| records.len() as u64 + 1)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let head: String = text.chars().take(limit).collect();
        format!("{head}…")
    }
}
