//! Shared domain types for benchwiz.
//!
//! This crate contains the types used across the benchmark wizard workspace:
//! step graphs, wizard requests and responses, connection records, service
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod connection;
pub mod error;
pub mod wizard;
