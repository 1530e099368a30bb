// src/config/mod.rs
// ============================================================================
// Module: Suite Configuration
// Description: Centralized configuration for equipment system tests.
// Purpose: Provide typed access to environment selection and overrides.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Suite configuration is read from environment variables and mapped into a
//! small typed structure reused across the harness. Invalid values fail
//! closed as setup errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SuiteConfig;
pub use env::SuiteEnv;
pub use env::TargetEnvironment;
pub use env::read_env_strict;
