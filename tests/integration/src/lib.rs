//! Integration test utilities for the creator-subscription platform
//!
//! Runs the service layer end to end against an in-memory entity store
//! that honours the same atomicity and cascade rules as PostgreSQL.

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
pub use helpers::*;
pub use memory::InMemoryStore;
