//! Persistence boundary for the application state.
//!
//! # Responsibility
//! - Define the key-value contract the state container persists through.
//! - Isolate SQLite details from the reducer and service layers.
//!
//! # Invariants
//! - Values are JSON documents keyed by stable string identifiers.
//! - Repository APIs return typed errors; missing keys are not errors.

pub mod kv_repo;
