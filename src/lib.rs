// src/lib.rs
// ============================================================================
// Module: Equipment System Tests Library
// Description: Shared harness for equipment API system tests.
// Purpose: Provide fixtures, schemas, HTTP plumbing, and assertions for suites.
// Dependencies: reqwest, serde, tokio
// ============================================================================

//! ## Overview
//! This crate hosts the shared harness used by the equipment API system-test
//! binaries in `tests/`: typed configuration, fixtures, declarative response
//! schemas, the HTTP client wrapper, the lifecycle driver, and the assertion
//! layer. The service under test is an external black box reached only over
//! HTTP; the suite never holds authoritative state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod check;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod report;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;
