//! Quote pipeline module.

pub mod engine;
pub mod types;

pub use engine::{CascadeOutcome, QuoteEngine};
pub use types::{DecodeError, Quote};
