//! # Daemon: composes the runtime into one observable event sequence.
//!
//! The [`Daemon`] owns the script name, the command source, the typed
//! configuration, and the process registry. [`Daemon::run`] consumes the
//! daemon — the sequence is single-use; restarting supervision means
//! constructing a new daemon — and returns the [`EventStream`] its driver
//! task feeds.
//!
//! ## Driver state machine
//! ```text
//! emit Start
//!   └─► resolve + execute chain ──► main registered, monitor detached
//!         └─► detach signal listener
//!               ├─ watch = false ──► emit Exit, done
//!               └─ for each change batch:
//!                    ├─ no Modify record ──► skip
//!                    ├─ emit Reload { change } ──► kill_all ──► re-execute
//!                    └─ feed ended ──► emit Exit, done
//! ```
//!
//! ## Rules
//! - The driver never awaits the main process; only the detached monitor
//!   does.
//! - Chain failures (resolution, spawn) cannot appear on the stream; they
//!   are logged at error level and close the sequence with `Exit`.
//! - Every detached task holds a child of the daemon's runtime token, and
//!   the returned stream guards that token: drop the stream, and driver,
//!   monitor, and listener all unwind at their next suspension point.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::commands::{CommandSource, ScriptOptions};
use crate::config::Config;
use crate::core::{executor, registry::ProcessRegistry, reload, shutdown};
use crate::error::CommandError;
use crate::events::{DaemonEvent, EventStream};
use crate::process::Terminator;
use crate::watch::ChangeBatch;

/// Supervises one script's command chain.
///
/// See the [crate docs](crate) for a full example.
pub struct Daemon {
    pub(crate) script: String,
    pub(crate) source: Arc<dyn CommandSource>,
    pub(crate) config: Config,
    pub(crate) registry: Arc<ProcessRegistry>,
}

impl Daemon {
    /// Creates a daemon for `script`, killing through the host platform's
    /// termination strategy.
    pub fn new(script: impl Into<String>, source: Arc<dyn CommandSource>, config: Config) -> Self {
        Self {
            script: script.into(),
            source,
            config,
            registry: ProcessRegistry::new(Terminator::host()),
        }
    }

    /// Returns the daemon with a different termination strategy.
    ///
    /// Must be applied before [`run`](Daemon::run); the registry is
    /// recreated empty.
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.registry = ProcessRegistry::new(terminator);
        self
    }

    /// Shared handle to the process registry.
    pub fn registry(&self) -> Arc<ProcessRegistry> {
        Arc::clone(&self.registry)
    }

    /// Starts supervision and returns the lifecycle event stream.
    ///
    /// `changes` is the external watcher feed; it is only consumed when
    /// the main command's options request watching.
    pub fn run<C>(self, changes: C) -> EventStream
    where
        C: Stream<Item = ChangeBatch> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.config.event_capacity_clamped());
        let token = CancellationToken::new();

        let driver = token.clone();
        tokio::spawn(async move { self.drive(changes, tx, driver).await });

        EventStream::new(rx, token)
    }

    /// Resolves the script and executes its chain.
    ///
    /// The chain is rebuilt from the script name on every call; reloads
    /// never reuse a previous resolution.
    pub(crate) async fn start_chain(
        &self,
        token: &CancellationToken,
    ) -> Result<ScriptOptions, CommandError> {
        let chain = self.source.resolve(&self.script)?;
        executor::execute(chain, &self.registry, token).await
    }

    async fn drive<C>(self, changes: C, tx: mpsc::Sender<DaemonEvent>, token: CancellationToken)
    where
        C: Stream<Item = ChangeBatch> + Send + 'static,
    {
        if tx.send(DaemonEvent::Start).await.is_err() {
            return;
        }

        let options = match self.start_chain(&token).await {
            Ok(options) => options,
            Err(error) => {
                error!(%error, script = %self.script, "failed to start command chain");
                let _ = tx.send(DaemonEvent::Exit).await;
                return;
            }
        };

        shutdown::spawn_listener(Arc::clone(&self.registry), token.child_token());

        if !options.watch {
            let _ = tx.send(DaemonEvent::Exit).await;
            return;
        }

        tokio::pin!(changes);
        loop {
            let batch = tokio::select! {
                _ = token.cancelled() => return,
                next = changes.next() => match next {
                    Some(batch) => batch,
                    None => break,
                },
            };

            if !batch.has_modifications() {
                continue;
            }
            if tx.send(DaemonEvent::Reload { change: batch }).await.is_err() {
                return;
            }

            if let Err(error) = reload::reload(&self, &token).await {
                error!(%error, script = %self.script, "failed to restart command chain");
                break;
            }
        }

        let _ = tx.send(DaemonEvent::Exit).await;
    }
}
