//! # procvisor
//!
//! **Procvisor** is a development-time process supervisor for Rust.
//!
//! Given a script name resolved to an ordered chain of shell commands, it
//! runs the chain, demonizes the final ("main") command, and restarts it
//! whenever the filesystem watcher reports a qualifying change, until the
//! main process exits with no further watching requested or the host
//! process receives a termination signal.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     script name ──► CommandSource::resolve() ──► [setup 1] … [setup N-1] [main]
//!                                                      │            │        │
//!                                                   awaited      awaited  demonized
//!                                                                            ▼
//! ┌───────────────────────────────────────────────────────────────────────────────┐
//! │  Daemon (driver task)                                                         │
//! │  - Executor   (runs the chain, registers the main process)                    │
//! │  - Registry   (pid → ProcessRef, atomic drain on kill_all)                    │
//! │  - Monitor    (detached: awaits main exit, classifies natural vs killed)      │
//! │  - Shutdown   (detached: SIGHUP/SIGINT/SIGTERM/SIGTSTP → kill_all → exit)     │
//! └──────────────┬──────────────────────────────────────────────┬─────────────────┘
//!                │ consumes                                     │ emits
//!                ▼                                              ▼
//!      Stream<Item = ChangeBatch>                  EventStream<DaemonEvent>
//!      (external watcher feed)                     Start / Reload { change } / Exit
//! ```
//!
//! ### Lifecycle
//! ```text
//! Daemon::run(changes)
//!   ├─► emit Start
//!   ├─► execute chain ──► register main ──► detach exit monitor
//!   ├─► detach shutdown signal listener
//!   ├─► main options say watch = false ──► emit Exit, done
//!   └─► loop over change batches:
//!         ├─ no record classified Modify ──► skip
//!         ├─ emit Reload { change }
//!         ├─ kill_all() ──► re-resolve chain ──► execute again
//!         └─ feed ended ──► emit Exit, done
//! ```
//!
//! ## Guarantees
//! - Within one chain execution, commands run strictly in order; every
//!   command except the last completes before the next starts.
//! - The registry never holds more than the main process in normal
//!   operation, and is empty after any [`ProcessRegistry::kill_all`].
//! - A natural exit and a concurrent `kill_all` resolve to exactly one
//!   classification: the kill path drains the registry atomically, so the
//!   monitor's later lookup finds the handle gone.
//! - Dropping the [`EventStream`] cancels the daemon's runtime token;
//!   every detached task exits at its next suspension point and child
//!   processes are spawned kill-on-drop, so nothing is orphaned.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use futures::{StreamExt, stream};
//! use procvisor::{Config, Daemon, DaemonEvent, ScriptOptions, ShellCommand, StaticSource};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let source = Arc::new(StaticSource::new().script(
//!         "dev",
//!         vec![
//!             ShellCommand::arc("cargo build", ScriptOptions::default()),
//!             ShellCommand::arc("cargo run", ScriptOptions::default().with_watch(true)),
//!         ],
//!     ));
//!
//!     // Plug a real watcher feed here; `pending()` never reports changes.
//!     let daemon = Daemon::new("dev", source, Config::default());
//!     let mut events = daemon.run(stream::pending());
//!
//!     while let Some(event) = events.next().await {
//!         match event {
//!             DaemonEvent::Start => println!("chain started"),
//!             DaemonEvent::Reload { change } => println!("reload: {} records", change.len()),
//!             DaemonEvent::Exit => break,
//!         }
//!     }
//! }
//! ```

mod commands;
mod config;
mod core;
mod error;
mod events;
mod process;
mod watch;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use commands::{Command, CommandRef, CommandSource, ScriptOptions, ShellCommand, StaticSource};
pub use config::Config;
pub use self::core::{Daemon, ProcessRegistry};
pub use error::{CommandError, ProcessError};
pub use events::{DaemonEvent, EventStream};
pub use process::{ChildProcess, ProcessHandle, ProcessRef, Terminator};
pub use watch::{ChangeBatch, ChangeEvent, ChangeKind};
