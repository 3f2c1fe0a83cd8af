//! # Reload orchestrator.
//!
//! One reload = kill everything tracked, then rebuild and re-run the
//! whole chain from the script name. Setup steps run again on every
//! reload; there is no build-step/serve-step distinction at this
//! boundary.

use std::io::Write;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::commands::ScriptOptions;
use crate::core::daemon::Daemon;
use crate::error::CommandError;

/// Restarts `daemon`'s chain after a qualifying change batch.
pub(crate) async fn reload(
    daemon: &Daemon,
    token: &CancellationToken,
) -> Result<ScriptOptions, CommandError> {
    if daemon.config.fullscreen {
        clear_screen();
    }
    info!(paths = ?daemon.config.paths, "watching");
    info!("restarting due to changes");

    daemon.registry.kill_all().await;
    daemon.start_chain(token).await
}

/// ANSI clear + cursor home, flushed immediately.
fn clear_screen() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x1b[2J\x1b[1;1H");
    let _ = stdout.flush();
}
