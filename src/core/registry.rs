//! # Process registry - tracked handles and the kill-all path.
//!
//! The registry maps pid → [`ProcessRef`] for currently supervised
//! processes. Only the main (last) command of a chain is ever inserted,
//! so it holds at most one entry in normal operation.
//!
//! ## Rules
//! - [`kill_all`](ProcessRegistry::kill_all) drains the map to a snapshot
//!   under the write lock **before** acting on any handle: racing
//!   triggers (signal + reload) never double-kill, and a concurrent
//!   insert is either part of the snapshot or untouched, never lost.
//! - The exit monitor's [`take`](ProcessRegistry::take) is the other half
//!   of the same protocol: whoever removes the pid first owns the
//!   cleanup, so "exited on its own" and "killed externally" are
//!   mutually exclusive.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::process::{ProcessRef, Terminator};

/// Tracked child processes of one [`Daemon`](crate::Daemon).
pub struct ProcessRegistry {
    procs: RwLock<HashMap<u32, ProcessRef>>,
    terminator: Terminator,
}

impl ProcessRegistry {
    /// Creates an empty registry using the given termination strategy.
    pub fn new(terminator: Terminator) -> Arc<Self> {
        Arc::new(Self {
            procs: RwLock::new(HashMap::new()),
            terminator,
        })
    }

    /// Starts tracking a live process, keyed by its pid.
    pub async fn insert(&self, process: ProcessRef) {
        self.procs.write().await.insert(process.pid(), process);
    }

    /// Atomically stops tracking `pid`, returning the handle if it was
    /// still present.
    pub async fn take(&self, pid: u32) -> Option<ProcessRef> {
        self.procs.write().await.remove(&pid)
    }

    /// Returns the sorted pids currently tracked.
    pub async fn pids(&self) -> Vec<u32> {
        let procs = self.procs.read().await;
        let mut pids: Vec<u32> = procs.keys().copied().collect();
        pids.sort_unstable();
        pids
    }

    /// Returns `true` when nothing is tracked.
    pub async fn is_empty(&self) -> bool {
        self.procs.read().await.is_empty()
    }

    /// Force-terminates every tracked process: drain → kill snapshot.
    ///
    /// Idempotent and safe under racing triggers. Termination is
    /// best-effort per handle; an already-dead process is not an error.
    /// After this returns the registry is empty, and a monitor awaiting
    /// one of the snapshotted processes will find its pid gone.
    pub async fn kill_all(&self) {
        let snapshot: Vec<(u32, ProcessRef)> = {
            let mut procs = self.procs.write().await;
            procs.drain().collect()
        };

        for (pid, process) in snapshot {
            debug!(pid, "stopping process");
            self.terminator.terminate(process.as_ref());
        }
    }
}
