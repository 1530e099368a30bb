// src/error.rs
// ============================================================================
// Module: Suite Errors
// Description: Error taxonomy for the equipment system-test suite.
// Purpose: Distinguish fatal setup problems from per-test failures.
// Dependencies: thiserror, reqwest
// ============================================================================

//! ## Overview
//! Errors fall into the taxonomy the suite is designed around: setup failures
//! are fatal to the run, unexpected statuses invalidate the rest of a test and
//! propagate immediately, assertion failures carry the captured call context,
//! and polling exhaustion surfaces as a bounded timeout.

use thiserror::Error;

/// Errors produced by the system-test harness.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Fatal setup problem: unreadable fixture, unwritable log path, bad
    /// configuration. Aborts the run rather than a single test.
    #[error("setup failed: {0}")]
    Setup(String),

    /// Network-level send/read failure while talking to the service.
    #[error("transport failure for {method} {url}: {source}")]
    Transport {
        /// HTTP method of the failed call.
        method: String,
        /// Full request URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// A precondition call returned a status the rest of the test cannot
    /// proceed from (for example, create not returning 201).
    #[error("unexpected status {actual} (wanted {expected}) for {method} {url}\n{context}")]
    UnexpectedStatus {
        /// HTTP method of the call.
        method: String,
        /// Full request URL.
        url: String,
        /// Status the test required.
        expected: u16,
        /// Status the service returned.
        actual: u16,
        /// Rendered request/response context.
        context: String,
    },

    /// Expected-vs-actual mismatch on status, schema, content, or timing.
    /// Always carries the rendered request/response context.
    #[error("assertion failed: {detail}\n{context}")]
    Assertion {
        /// Human-readable description of the mismatch.
        detail: String,
        /// Rendered request/response context.
        context: String,
    },

    /// Bounded polling exhausted its attempt budget.
    #[error("timed out waiting for {condition} after {attempts} attempts ({interval_ms} ms apart)")]
    Timeout {
        /// Description of the condition that never became true.
        condition: String,
        /// Number of poll attempts made.
        attempts: u32,
        /// Interval between attempts, in milliseconds.
        interval_ms: u64,
    },

    /// Response body was not the JSON shape the harness needed to proceed.
    #[error("malformed response body from {url}: {detail}")]
    MalformedBody {
        /// Full request URL.
        url: String,
        /// What failed to parse.
        detail: String,
    },
}

impl SuiteError {
    /// Builds an assertion failure with rendered call context.
    #[must_use]
    pub fn assertion(detail: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Assertion {
            detail: detail.into(),
            context: context.into(),
        }
    }
}
