//! Error types used by the procvisor core.
//!
//! This module defines two main error enums:
//!
//! - [`CommandError`] — failures while resolving a script into a command
//!   chain or spawning one of its commands.
//! - [`ProcessError`] — failures while retrieving the termination status
//!   of a supervised process.
//!
//! Neither error ever reaches the emitted event stream: the driver absorbs
//! [`CommandError`] into a terminal `Exit`, and the exit monitor absorbs
//! [`ProcessError`] by classifying the process as killed externally. Both
//! types provide `as_label` helpers for logging/metrics.

use thiserror::Error;

/// # Errors produced while building or starting a command chain.
///
/// Raised by [`CommandSource::resolve`](crate::CommandSource::resolve) and
/// [`Command::spawn`](crate::Command::spawn). The daemon driver logs these
/// at error level and terminates the event sequence.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// The script name is not known to the command source.
    #[error("unknown script: {script}")]
    UnknownScript {
        /// The script name that failed to resolve.
        script: String,
    },

    /// The script resolved, but its definition is unusable.
    #[error("invalid script {script}: {reason}")]
    Invalid {
        /// The script name.
        script: String,
        /// Why the definition was rejected.
        reason: String,
    },

    /// The host refused to spawn a command of the chain.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        /// The underlying host error.
        source: std::io::Error,
    },
}

impl CommandError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procvisor::CommandError;
    ///
    /// let err = CommandError::UnknownScript { script: "dev".into() };
    /// assert_eq!(err.as_label(), "command_unknown_script");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CommandError::UnknownScript { .. } => "command_unknown_script",
            CommandError::Invalid { .. } => "command_invalid_script",
            CommandError::Spawn { .. } => "command_spawn_failed",
        }
    }
}

/// # Errors produced while awaiting a process's termination status.
///
/// Raised by [`ProcessHandle::wait`](crate::ProcessHandle::wait). The exit
/// monitor treats any of these as "the supervisor already stopped this
/// process": the status is gone because the handle was closed, not because
/// supervision failed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The handle was already consumed or closed; no status can be
    /// retrieved anymore.
    #[error("process handle already closed (pid {pid})")]
    HandleClosed {
        /// Pid the handle referred to.
        pid: u32,
    },

    /// The host failed to report the exit status.
    #[error("failed to retrieve exit status of pid {pid}: {source}")]
    Wait {
        /// Pid the handle refers to.
        pid: u32,
        /// The underlying host error.
        source: std::io::Error,
    },
}

impl ProcessError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ProcessError::HandleClosed { .. } => "process_handle_closed",
            ProcessError::Wait { .. } => "process_wait_failed",
        }
    }
}
