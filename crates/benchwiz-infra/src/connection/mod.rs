//! Connection store adapters.
//!
//! - [`http::HttpConnectionStore`]: the connection service's REST API
//! - [`fixture::FixtureConnectionStore`]: a local JSON file

pub mod fixture;
pub mod http;
