//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - Service and router construction helpers
//! - Authentication test helpers


pub use auth_helpers::*;
pub use database::*;
