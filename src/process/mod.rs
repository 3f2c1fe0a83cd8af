//! Live process handles and the platform termination capability.
//!
//! ## Contents
//! - [`ProcessHandle`] object-safe contract for a supervised child
//! - [`ProcessRef`] shared handle (`Arc<dyn ProcessHandle>`)
//! - [`ChildProcess`] tokio-backed implementation
//! - [`Terminator`] platform kill strategy, selected once at startup

mod handle;
mod terminator;

pub use handle::{ChildProcess, ProcessHandle, ProcessRef};
pub use terminator::Terminator;
