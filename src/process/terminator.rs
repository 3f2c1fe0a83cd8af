//! # Platform termination capability.
//!
//! The registry never branches on the platform at its kill sites; it
//! holds a [`Terminator`] selected once at startup and applies it to
//! every snapshotted handle.

use super::handle::ProcessHandle;

/// How forced termination is delivered on this host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminator {
    /// Deliver a kill signal to the child's process group (Unix).
    Signal,
    /// Close the process handle and let the host reap it.
    Close,
}

impl Terminator {
    /// Selects the strategy for the current platform.
    pub fn host() -> Self {
        if cfg!(unix) {
            Terminator::Signal
        } else {
            Terminator::Close
        }
    }

    /// Requests forced termination of `process`.
    ///
    /// Best-effort: never fails, including for an already-dead process.
    pub fn terminate(&self, process: &dyn ProcessHandle) {
        match self {
            Terminator::Signal => signal_kill(process.pid()),
            Terminator::Close => process.close(),
        }
    }
}

#[cfg(unix)]
fn signal_kill(pid: u32) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    // Supervised children run in their own process group (pgid == pid),
    // so one signal takes down the whole tree.
    let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
}

#[cfg(not(unix))]
fn signal_kill(_pid: u32) {}
