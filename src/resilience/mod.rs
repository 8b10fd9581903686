//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     → Deadline::after(request budget)            (D0)
//!         → child(fetch budget)   → upstream fetch (D1, critical)
//!         → child(persist budget) → store append   (D2, best effort)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - A child deadline is clamped to its parent
//! - No retries at any tier: one failed attempt is final for the request

pub mod timeouts;

pub use timeouts::{Deadline, DeadlineExceeded};
