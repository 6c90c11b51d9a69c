//! Integration test utilities for the marketplace core
//!
//! This crate provides shared fixtures (in-memory contexts, seeded
//! accounts) and helpers for cross-service scenario tests.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
