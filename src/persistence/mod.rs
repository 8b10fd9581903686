//! Quote persistence subsystem.
//!
//! Best-effort audit trail: the engine appends each fetched quote here under a
//! short deadline and only logs failures.

pub mod store;

pub use store::{PersistenceError, QuoteStore};
