//! Business logic services (use cases).
//!
//! Services orchestrate the config store, navigation, and provider adapters.
//! They depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod wizard;
