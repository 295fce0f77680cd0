//! Port traits defining external boundaries.
//!
//! The only boundary of the reachability core is the upstream REST API.
//! Implementations live in `src/adapters/`.

pub mod http;

pub use http::{FetchFuture, JsonFetcher};
