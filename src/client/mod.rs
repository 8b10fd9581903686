//! Requestor side of the system: fetch the bid from the quote service and
//! store it in a local file.

pub mod requestor;

pub use requestor::{FetchError, Requestor, RequestorError};
