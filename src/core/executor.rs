//! # Command chain executor.
//!
//! Runs one resolved chain strictly in order. Every command except the
//! last is a setup step: spawned, then awaited to completion before the
//! next starts. The last command is the main process: spawned, inserted
//! into the registry, handed to a detached exit monitor, and **not**
//! awaited — its options are returned so the daemon knows whether to keep
//! watching.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::commands::{CommandRef, ScriptOptions};
use crate::core::{monitor, registry::ProcessRegistry};
use crate::error::CommandError;

/// Executes `chain` and returns the main command's options.
///
/// An empty chain is a no-op resolving to default (non-watching)
/// options. The exit status of setup steps is awaited but **not**
/// inspected; the chain always proceeds to the next step.
pub(crate) async fn execute(
    chain: Vec<CommandRef>,
    registry: &Arc<ProcessRegistry>,
    token: &CancellationToken,
) -> Result<ScriptOptions, CommandError> {
    let Some((main, setup)) = chain.split_last() else {
        return Ok(ScriptOptions::default());
    };

    for command in setup {
        debug!(command = command.line(), "running chain step");
        let process = command.spawn()?;
        let _ = process.wait().await;
    }

    debug!(command = main.line(), "starting main process");
    let process = main.spawn()?;
    let options = main.options().clone();

    registry.insert(Arc::clone(&process)).await;
    tokio::spawn(monitor::watch_exit(
        process,
        options.clone(),
        Arc::clone(registry),
        token.child_token(),
    ));

    Ok(options)
}
