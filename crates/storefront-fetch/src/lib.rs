//! JSON resource fetching for the storefront.
//!
//! This crate provides:
//! - `FetchClient` - HTTP GET of JSON documents with status checking
//! - `FetchError` - transport, status and decoding failures
//! - `TimeoutConfig` - optional connect/total timeouts

mod client;
mod timeout;

pub use client::*;
pub use timeout::*;
