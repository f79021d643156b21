//! Test fixtures and data for orchestrator tests
//!
//! This module provides consistent test data used across all test suites.

use shared::AppealId;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard appeal content
    pub const THEME: &'static str = "Printer on fire";
    pub const MESSAGE: &'static str = "The office printer is literally on fire";
    pub const SOLUTION: &'static str = "Extinguished and replaced the fuser unit";
    pub const REASON: &'static str = "Reported by mistake";

    /// A well-formed id that is never present in any store
    pub const MISSING_ID: &'static str = "550e8400-e29b-41d4-a716-446655440001";

    pub fn missing_id() -> AppealId {
        AppealId::from_string(Self::MISSING_ID).unwrap()
    }
}
