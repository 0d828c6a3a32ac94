//! Infrastructure layer for benchwiz.
//!
//! Contains implementations of the ports defined in `benchwiz-core`
//! (connection store clients) plus the loaders that read service
//! configuration and wizard step graphs from disk.

pub mod config;
pub mod connection;
pub mod wizard;
