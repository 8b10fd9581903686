//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → metrics → store → upstream client → engine → server
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → server stops accepting → in-flight requests drain
//! ```

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, StartupError};
