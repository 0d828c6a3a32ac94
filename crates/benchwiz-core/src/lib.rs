//! Business logic and port definitions for the benchmark wizard.
//!
//! This crate defines the ports (`ConnectionStore`, `ProviderAdapter`) that
//! the infrastructure layer implements or consumes, the wizard engine itself
//! (config store, navigation, option resolution), and the AWS adapter. It
//! depends only on `benchwiz-types` -- never on `benchwiz-infra` or any
//! network/IO crate.

pub mod adapter;
pub mod condition;
pub mod config_store;
pub mod navigation;
pub mod options;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;
