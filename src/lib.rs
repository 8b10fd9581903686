//! FX quote relay library.
//!
//! A quote service that fetches a currency quote upstream, keeps a
//! best-effort copy in SQLite and answers with the bid, every hop bounded by
//! a deadline carved from its parent. Also home of the single-shot requestor
//! that consumes the service.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod persistence;
pub mod quoting;
pub mod resilience;
pub mod upstream;

pub use client::Requestor;
pub use config::QuoteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use quoting::{Quote, QuoteEngine};
