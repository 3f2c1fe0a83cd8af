//! # Command sources.
//!
//! [`CommandSource`] is the seam to the external command builder: given a
//! script name it returns the ordered chain to run. The daemon resolves
//! through it once at start and once per reload — chains are never
//! cached, so a source backed by a config file picks up edits between
//! restarts.

use std::collections::HashMap;

use crate::commands::command::CommandRef;
use crate::error::CommandError;

/// # Script name → ordered command chain.
///
/// Must hand out a usable chain on every call; the daemon re-resolves on
/// every reload.
pub trait CommandSource: Send + Sync + 'static {
    /// Resolves `script` into its ordered chain.
    ///
    /// All commands but the last are setup steps; the last is the
    /// demonized main command.
    fn resolve(&self, script: &str) -> Result<Vec<CommandRef>, CommandError>;
}

/// Fixed table of script chains, the simplest [`CommandSource`].
///
/// Real builders (config files, CLIs) live outside this crate; this one
/// covers embedding and tests. Commands are immutable descriptors, so
/// resolving hands out shared references to the registered chain.
///
/// ## Example
/// ```
/// use procvisor::{CommandSource, ScriptOptions, ShellCommand, StaticSource};
///
/// let source = StaticSource::new().script(
///     "dev",
///     vec![ShellCommand::arc("cargo run", ScriptOptions::default().with_watch(true))],
/// );
/// assert_eq!(source.resolve("dev").unwrap().len(), 1);
/// assert!(source.resolve("missing").is_err());
/// ```
#[derive(Default)]
pub struct StaticSource {
    scripts: HashMap<String, Vec<CommandRef>>,
}

impl StaticSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the source with `chain` registered under `name`.
    pub fn script(mut self, name: impl Into<String>, chain: Vec<CommandRef>) -> Self {
        self.scripts.insert(name.into(), chain);
        self
    }
}

impl CommandSource for StaticSource {
    fn resolve(&self, script: &str) -> Result<Vec<CommandRef>, CommandError> {
        self.scripts
            .get(script)
            .cloned()
            .ok_or_else(|| CommandError::UnknownScript {
                script: script.to_string(),
            })
    }
}
