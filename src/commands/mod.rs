//! # Command abstractions and sources.
//!
//! The command builder — the thing that turns a script name into an
//! ordered chain — lives outside this crate and is consumed through
//! [`CommandSource`]. This module provides the contracts plus the
//! shipped implementations:
//! - [`Command`] - descriptor with a spawn capability
//! - [`CommandRef`] - shared reference to a command (`Arc<dyn Command>`)
//! - [`ShellCommand`] - runs a line through the host shell
//! - [`ScriptOptions`] - per-command execution options (`watch` + pass-through)
//! - [`CommandSource`] - script name → fresh command chain
//! - [`StaticSource`] - fixed script table, the simplest source

mod command;
mod options;
mod source;

pub use command::{Command, CommandRef, ShellCommand};
pub use options::ScriptOptions;
pub use source::{CommandSource, StaticSource};
