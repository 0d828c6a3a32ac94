//! Repository trait definitions (ports).
//!
//! These traits define the external collaborators that the infrastructure
//! layer (benchwiz-infra) implements. The core crate never depends on any
//! specific transport or storage technology.

pub mod connection;
