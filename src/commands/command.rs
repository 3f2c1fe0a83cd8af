//! # Command descriptors and the shell-backed implementation.
//!
//! A [`Command`] is an immutable descriptor bundling a display line, its
//! [`ScriptOptions`], and a spawn capability that produces a live
//! [`ProcessRef`]. The shipped [`ShellCommand`] runs the line through the
//! host shell, the way a script runner invokes its entries.

use std::sync::Arc;

use crate::commands::options::ScriptOptions;
use crate::error::CommandError;
use crate::process::{ChildProcess, ProcessRef};

/// Shared reference to a command descriptor.
pub type CommandRef = Arc<dyn Command>;

/// # Immutable command descriptor with a spawn capability.
///
/// Spawning is synchronous: the host either hands back a live child or
/// refuses with [`CommandError::Spawn`]. Waiting for the child is the
/// handle's job, not the command's.
pub trait Command: Send + Sync + 'static {
    /// The command line, used for display and logging.
    fn line(&self) -> &str;

    /// Execution options attached to this command.
    fn options(&self) -> &ScriptOptions;

    /// Spawns a new live process for this command.
    ///
    /// Every call produces a fresh process; reloads spawn the same
    /// descriptor again.
    fn spawn(&self) -> Result<ProcessRef, CommandError>;
}

/// Command that runs its line through the host shell.
///
/// Children are spawned kill-on-drop and, on Unix, in their own process
/// group so a forced termination takes the whole tree down.
///
/// ## Example
/// ```no_run
/// use procvisor::{Command, ScriptOptions, ShellCommand};
///
/// let build = ShellCommand::new("cargo build", ScriptOptions::default());
/// assert_eq!(build.line(), "cargo build");
/// ```
pub struct ShellCommand {
    line: String,
    options: ScriptOptions,
}

impl ShellCommand {
    /// Creates a new shell-backed command.
    ///
    /// Prefer [`ShellCommand::arc`] when you immediately need a
    /// [`CommandRef`].
    pub fn new(line: impl Into<String>, options: ScriptOptions) -> Self {
        Self {
            line: line.into(),
            options,
        }
    }

    /// Creates the command and returns it as a shared handle.
    pub fn arc(line: impl Into<String>, options: ScriptOptions) -> CommandRef {
        Arc::new(Self::new(line, options))
    }
}

impl Command for ShellCommand {
    fn line(&self) -> &str {
        &self.line
    }

    fn options(&self) -> &ScriptOptions {
        &self.options
    }

    fn spawn(&self) -> Result<ProcessRef, CommandError> {
        let mut command = host_shell(&self.line);
        command.kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        for (key, value) in &self.options.env {
            command.env(key, value);
        }
        if let Some(dir) = &self.options.cwd {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|source| CommandError::Spawn {
            command: self.line.clone(),
            source,
        })?;
        Ok(Arc::new(ChildProcess::new(child)))
    }
}

#[cfg(unix)]
fn host_shell(line: &str) -> tokio::process::Command {
    let mut command = tokio::process::Command::new("sh");
    command.args(["-c", line]);
    command
}

#[cfg(not(unix))]
fn host_shell(line: &str) -> tokio::process::Command {
    let mut command = tokio::process::Command::new("cmd");
    command.args(["/C", line]);
    command
}
