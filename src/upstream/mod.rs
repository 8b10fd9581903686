//! Upstream quote provider subsystem.
//!
//! # Data Flow
//! ```text
//! QuoteEngine
//!     → client.rs (GET provider URL under the fetch deadline)
//!     → quoting::types (decode envelope → Quote)
//!     → Quote or UpstreamFetchError back to the engine
//! ```

pub mod client;

pub use client::{UpstreamClient, UpstreamFetchError};
