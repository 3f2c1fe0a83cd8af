//! Change records delivered by the external watcher feed.
//!
//! The filesystem watcher itself lives outside this crate; the core
//! consumes it as a `Stream` of [`ChangeBatch`] values. This module holds
//! the data model for one such delivery.
//!
//! ## Contents
//! - [`ChangeKind`] classification of a single change record
//! - [`ChangeEvent`] one classified path change
//! - [`ChangeBatch`] one delivery from the feed (zero or more records)

mod change;

pub use change::{ChangeBatch, ChangeEvent, ChangeKind};
