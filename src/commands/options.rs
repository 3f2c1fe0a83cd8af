//! # Per-command execution options.
//!
//! [`ScriptOptions`] is derived once per script resolution by the command
//! builder. The options attached to the **last** command of a chain are
//! authoritative for the whole run: they decide whether the daemon keeps
//! watching after the main process is up.

use std::collections::HashMap;
use std::path::PathBuf;

/// Execution options attached to one command of a chain.
///
/// `Default` is non-watching with empty pass-through options, which is
/// also what an empty chain resolves to.
///
/// ## Example
/// ```
/// use procvisor::ScriptOptions;
///
/// let options = ScriptOptions::default()
///     .with_watch(true)
///     .with_env("RUST_LOG", "debug");
/// assert!(options.watch);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Keep watching for changes after the main process is running.
    pub watch: bool,

    /// Extra environment passed to the spawned process.
    pub env: HashMap<String, String>,

    /// Working directory for the spawned process.
    pub cwd: Option<PathBuf>,
}

impl ScriptOptions {
    /// Returns the options with the watch flag replaced.
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    /// Returns the options with one environment entry added.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Returns the options with the working directory replaced.
    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}
