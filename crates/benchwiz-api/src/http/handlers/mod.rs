//! HTTP request handlers.

pub mod wizard;
