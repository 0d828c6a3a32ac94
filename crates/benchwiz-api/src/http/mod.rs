//! HTTP/REST API layer for benchwiz.
//!
//! Axum-based REST API at `/api/v1/`. Wizard step responses are returned
//! verbatim; errors and listings use the envelope format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
