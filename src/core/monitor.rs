//! # Exit monitor - classifies how a main process ended.
//!
//! One detached monitor task accompanies every demonized main process.
//! It awaits the termination status, then disambiguates "exited on its
//! own" from "killed by the supervisor" through the registry: whoever
//! removed the pid first owns the cleanup.
//!
//! ```text
//! wait() resolves ──► registry.take(pid)
//!                        ├─ Some(_) → natural exit, log (success × watch)
//!                        └─ None    → kill_all got there first, stay quiet
//! wait() fails    ──► handle closed by the supervisor, stay quiet
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::commands::ScriptOptions;
use crate::core::registry::ProcessRegistry;
use crate::process::ProcessRef;

/// Awaits `process`'s termination and settles its registry entry.
///
/// Status-retrieval failures are absorbed: the handle is gone because the
/// kill path closed it, and that path already owns what happens next.
pub(crate) async fn watch_exit(
    process: ProcessRef,
    options: ScriptOptions,
    registry: Arc<ProcessRegistry>,
    token: CancellationToken,
) {
    let status = tokio::select! {
        _ = token.cancelled() => return,
        status = process.wait() => status,
    };

    let success = match status {
        Ok(success) => success,
        Err(error) => {
            debug!(pid = process.pid(), %error, "exit status unavailable, process was stopped");
            return;
        }
    };

    if registry.take(process.pid()).await.is_none() {
        // kill_all drained the entry; the reload or shutdown path decides
        // what happens next.
        debug!(pid = process.pid(), "process stopped by the supervisor");
        return;
    }

    match (success, options.watch) {
        (true, true) => info!(pid = process.pid(), "process exited cleanly, waiting for changes"),
        (true, false) => info!(pid = process.pid(), "process exited cleanly, supervisor exiting"),
        (false, true) => warn!(pid = process.pid(), "process crashed, waiting for changes"),
        (false, false) => warn!(pid = process.pid(), "process crashed, supervisor exiting"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::process::Terminator;
    use crate::testing::FakeProcess;

    #[tokio::test]
    async fn natural_exit_removes_the_registry_entry() {
        let registry = ProcessRegistry::new(Terminator::Close);
        let (process, exit) = FakeProcess::hanging(5);
        registry.insert(process.clone()).await;

        let monitor = tokio::spawn(watch_exit(
            process.clone(),
            ScriptOptions::default(),
            Arc::clone(&registry),
            CancellationToken::new(),
        ));

        exit.finish(true);
        tokio::time::timeout(Duration::from_secs(1), monitor)
            .await
            .expect("monitor settles")
            .unwrap();

        assert!(registry.is_empty().await);
        assert_eq!(process.close_count(), 0);
    }

    #[tokio::test]
    async fn killed_process_is_left_to_the_kill_path() {
        let registry = ProcessRegistry::new(Terminator::Close);
        let (process, _exit) = FakeProcess::hanging(6);
        registry.insert(process.clone()).await;

        let monitor = tokio::spawn(watch_exit(
            process.clone(),
            ScriptOptions::default().with_watch(true),
            Arc::clone(&registry),
            CancellationToken::new(),
        ));

        // The kill path drains the registry and closes the handle; the
        // monitor observes the failed status retrieval and stays quiet.
        registry.kill_all().await;
        tokio::time::timeout(Duration::from_secs(1), monitor)
            .await
            .expect("monitor settles")
            .unwrap();

        assert!(registry.is_empty().await);
        assert_eq!(process.close_count(), 1);
    }

    #[tokio::test]
    async fn already_drained_entry_is_not_reclassified() {
        let registry = ProcessRegistry::new(Terminator::Close);
        let (process, exit) = FakeProcess::hanging(7);
        registry.insert(process.clone()).await;

        // Simulate kill_all having snapshotted the entry before the
        // natural exit resolves.
        registry.take(7).await.unwrap();
        let monitor = tokio::spawn(watch_exit(
            process.clone(),
            ScriptOptions::default(),
            Arc::clone(&registry),
            CancellationToken::new(),
        ));

        exit.finish(true);
        tokio::time::timeout(Duration::from_secs(1), monitor)
            .await
            .expect("monitor settles")
            .unwrap();

        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn cancellation_detaches_without_touching_the_registry() {
        let registry = ProcessRegistry::new(Terminator::Close);
        let (process, _exit) = FakeProcess::hanging(8);
        registry.insert(process.clone()).await;

        let token = CancellationToken::new();
        let monitor = tokio::spawn(watch_exit(
            process.clone(),
            ScriptOptions::default(),
            Arc::clone(&registry),
            token.clone(),
        ));

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), monitor)
            .await
            .expect("monitor settles")
            .unwrap();

        assert_eq!(registry.pids().await, vec![8]);
    }
}
