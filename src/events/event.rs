//! # Lifecycle events observed by the daemon's consumer.
//!
//! The emitted sequence is always of the shape
//! `Start (Reload)* Exit` — `Start` once before the first execution,
//! `Reload` once per qualifying change batch, `Exit` once when the
//! sequence terminates. There is no error variant: every failure is
//! absorbed, logged, and converted into a supervisory decision.

use crate::watch::ChangeBatch;

/// One lifecycle event emitted by the [`Daemon`](crate::Daemon).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaemonEvent {
    /// Emitted once, before the first chain execution.
    Start,

    /// Emitted once per qualifying change batch, before the reload
    /// procedure runs.
    Reload {
        /// The batch that triggered the reload.
        change: ChangeBatch,
    },

    /// Emitted once, when the sequence terminates: the main command's
    /// options requested no watching, or the change feed ended.
    Exit,
}

impl DaemonEvent {
    #[inline]
    pub fn is_start(&self) -> bool {
        matches!(self, DaemonEvent::Start)
    }

    #[inline]
    pub fn is_reload(&self) -> bool {
        matches!(self, DaemonEvent::Reload { .. })
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self, DaemonEvent::Exit)
    }
}
