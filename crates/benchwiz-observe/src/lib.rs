//! Observability setup for benchwiz: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
