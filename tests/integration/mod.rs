//! Integration tests for mediagraph
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod config_validation_tests;
pub mod database_tests;
pub mod registry_tests;
