// tests/helpers/mod.rs
// ============================================================================
// Module: Suite Helpers
// Description: Shared helpers for the live equipment API suites.
// Purpose: Provide harness setup and reporter plumbing.
// Dependencies: equipment-system-tests
// ============================================================================

//! ## Overview
//! Shared helpers for the live suites.
//! Invariants:
//! - Suites only observe the service through HTTP; no backdoor state.
//! - Every test leaves a transcript and summary in its artifact directory.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod harness;
