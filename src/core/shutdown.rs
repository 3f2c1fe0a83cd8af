//! # Termination-signal handling.
//!
//! One detached listener per daemon races the Unix termination signals;
//! the first one observed kills every tracked process and ends the host
//! process with success status. Signals bypass the event stream on
//! purpose: they terminate the whole process, not just the sequence.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGHUP` (terminal hangup)
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGTSTP` (terminal stop, Ctrl-Z)
//!
//! **Other platforms:** the listener is a no-op; the host's own
//! process-group semantics apply.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::core::registry::ProcessRegistry;

/// Spawns the signal listener for one daemon.
///
/// The task holds a child token of the daemon's runtime token and goes
/// away with it.
#[cfg(unix)]
pub(crate) fn spawn_listener(registry: Arc<ProcessRegistry>, token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            observed = wait_for_termination_signal() => match observed {
                Ok(()) => {
                    info!("termination signal received, stopping supervised processes");
                    registry.kill_all().await;
                    std::process::exit(0);
                }
                Err(error) => warn!(%error, "failed to install signal handlers"),
            },
        }
    });
}

#[cfg(not(unix))]
pub(crate) fn spawn_listener(_registry: Arc<ProcessRegistry>, _token: CancellationToken) {}

/// Waits for the first termination signal.
///
/// Each signal stream is registered independently; none is deregistered
/// once one fires, because the process exits right after.
#[cfg(unix)]
async fn wait_for_termination_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigtstp = signal(SignalKind::from_raw(libc::SIGTSTP))?;

    tokio::select! {
        _ = sighup.recv() => {}
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
        _ = sigtstp.recv() => {}
    }
    Ok(())
}
