//! Adapters - Implementations of port interfaces.
//!
//! - `http` - reqwest-backed fetcher and entity writer against the REST backend
//! - `memory` - in-memory implementations for tests

pub mod http;
pub mod memory;
