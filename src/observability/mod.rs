//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Engine and handlers produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Persistence failures are only observable here, never in responses
//! - Request ID flows through every span of a request

pub mod logging;
pub mod metrics;
