//! # Process handles.
//!
//! [`ProcessHandle`] is the supervisor-facing view of a live child: a pid,
//! a best-effort termination request, and an awaitable termination status.
//! The common handle type is [`ProcessRef`], an `Arc<dyn ProcessHandle>`
//! shared between the registry and the detached exit monitor.
//!
//! ## Rules
//! - [`wait`](ProcessHandle::wait) resolves **once**; afterwards the
//!   handle is invalidated and further waits fail with
//!   [`ProcessError::HandleClosed`].
//! - [`close`](ProcessHandle::close) never fails and is safe to call on
//!   an already-dead process; a waiter in flight performs the kill on the
//!   closer's behalf.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Child;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::ProcessError;

/// Shared reference to a live supervised process.
pub type ProcessRef = Arc<dyn ProcessHandle>;

/// # Supervisor-facing contract for one live child process.
///
/// Implementations must keep `pid` stable for the handle's lifetime and
/// make `close` idempotent.
#[async_trait]
pub trait ProcessHandle: Send + Sync + 'static {
    /// Host process id of the child.
    fn pid(&self) -> u32;

    /// Requests termination by closing the handle.
    ///
    /// Best-effort: never fails, even for an already-dead process. This
    /// is the `Close` arm of [`Terminator`](crate::Terminator); on Unix
    /// the registry kills by signal instead and leaves the handle alone.
    fn close(&self);

    /// Suspends until the termination status is available and returns the
    /// success flag.
    ///
    /// Fails with [`ProcessError::HandleClosed`] when the status can no
    /// longer be retrieved (handle consumed by an earlier wait or closed
    /// before one started).
    async fn wait(&self) -> Result<bool, ProcessError>;
}

/// Tokio-backed process handle.
///
/// Wraps a [`tokio::process::Child`] spawned by
/// [`ShellCommand`](crate::ShellCommand). The child is parked in a mutex;
/// the single waiter takes it out, so a second wait observes
/// [`ProcessError::HandleClosed`].
pub struct ChildProcess {
    pid: u32,
    child: Mutex<Option<Child>>,
    stop: CancellationToken,
}

impl ChildProcess {
    /// Wraps a freshly spawned child.
    pub fn new(child: Child) -> Self {
        // The pid is present right after a successful spawn.
        let pid = child.id().unwrap_or_default();
        Self {
            pid,
            child: Mutex::new(Some(child)),
            stop: CancellationToken::new(),
        }
    }

    fn map_status(
        pid: u32,
        status: std::io::Result<std::process::ExitStatus>,
    ) -> Result<bool, ProcessError> {
        match status {
            Ok(status) => Ok(status.success()),
            Err(source) => Err(ProcessError::Wait { pid, source }),
        }
    }
}

#[async_trait]
impl ProcessHandle for ChildProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn close(&self) {
        self.stop.cancel();
        // No waiter yet: the child is still parked here, kill it directly.
        // Otherwise the in-flight waiter observes the cancelled token and
        // issues the kill itself.
        if let Ok(mut guard) = self.child.try_lock() {
            if let Some(child) = guard.as_mut() {
                let _ = child.start_kill();
            }
        }
    }

    async fn wait(&self) -> Result<bool, ProcessError> {
        let taken = self.child.lock().await.take();
        let Some(mut child) = taken else {
            return Err(ProcessError::HandleClosed { pid: self.pid });
        };

        tokio::select! {
            status = child.wait() => Self::map_status(self.pid, status),
            _ = self.stop.cancelled() => {
                let _ = child.start_kill();
                Self::map_status(self.pid, child.wait().await)
            }
        }
    }
}
