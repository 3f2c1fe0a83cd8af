//! Crate-private test doubles.
//!
//! Deterministic stand-ins for the external collaborators: journaling
//! fake commands/processes, a counting command source, and a poll-probing
//! change feed. Fakes are terminated through [`Terminator::Close`] only;
//! unit tests never signal host pids.
//!
//! [`Terminator::Close`]: crate::process::Terminator::Close

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::commands::{Command, CommandRef, CommandSource, ScriptOptions};
use crate::error::{CommandError, ProcessError};
use crate::process::{ProcessHandle, ProcessRef};
use crate::watch::ChangeBatch;

/// Pids handed to fakes; far away from anything a test host could track.
static NEXT_PID: AtomicU32 = AtomicU32::new(1000);

/// Shared, ordered log of fake activity (`spawn:`/`exit:`/`close:` lines).
#[derive(Clone, Default)]
pub(crate) struct Journal(Arc<StdMutex<Vec<String>>>);

impl Journal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Completion handle for one fake process instance.
pub(crate) struct FakeExit {
    tx: Option<oneshot::Sender<bool>>,
}

impl FakeExit {
    /// Resolves the process's termination status.
    pub(crate) fn finish(mut self, success: bool) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(success);
        }
    }
}

/// In-memory [`ProcessHandle`]: terminates when told to, or when closed.
pub(crate) struct FakeProcess {
    pid: u32,
    label: String,
    exit: Mutex<Option<oneshot::Receiver<bool>>>,
    stop: CancellationToken,
    closes: AtomicUsize,
    journal: Option<Journal>,
}

impl FakeProcess {
    /// A process that runs until its [`FakeExit`] resolves it.
    pub(crate) fn hanging(pid: u32) -> (Arc<Self>, FakeExit) {
        Self::with_journal(pid, "", None)
    }

    fn with_journal(pid: u32, label: &str, journal: Option<Journal>) -> (Arc<Self>, FakeExit) {
        let (tx, rx) = oneshot::channel();
        let process = Arc::new(Self {
            pid,
            label: label.to_string(),
            exit: Mutex::new(Some(rx)),
            stop: CancellationToken::new(),
            closes: AtomicUsize::new(0),
            journal,
        });
        (process, FakeExit { tx: Some(tx) })
    }

    pub(crate) fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn record(&self, action: &str) {
        if let Some(journal) = &self.journal {
            journal.push(format!("{action}:{}", self.label));
        }
    }
}

#[async_trait]
impl ProcessHandle for FakeProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.record("close");
        self.stop.cancel();
    }

    async fn wait(&self) -> Result<bool, ProcessError> {
        let taken = self.exit.lock().await.take();
        let Some(rx) = taken else {
            return Err(ProcessError::HandleClosed { pid: self.pid });
        };

        tokio::select! {
            status = rx => match status {
                Ok(success) => {
                    self.record("exit");
                    Ok(success)
                }
                Err(_) => Err(ProcessError::HandleClosed { pid: self.pid }),
            },
            _ = self.stop.cancelled() => Err(ProcessError::HandleClosed { pid: self.pid }),
        }
    }
}

enum Behavior {
    /// Every spawned instance terminates immediately with this flag.
    Instant { success: bool },
    /// Spawned instances run until finished externally or closed.
    Hanging,
}

#[derive(Default)]
struct SpawnLog {
    pids: Vec<u32>,
    exits: Vec<FakeExit>,
}

/// In-memory [`Command`] producing [`FakeProcess`] instances.
pub(crate) struct FakeCommand {
    line: String,
    options: ScriptOptions,
    behavior: Behavior,
    journal: Journal,
    spawns: StdMutex<SpawnLog>,
}

impl FakeCommand {
    /// A setup-style command whose processes exit immediately.
    pub(crate) fn instant(line: &str, success: bool, journal: &Journal) -> Arc<Self> {
        Self::build(line, ScriptOptions::default(), Behavior::Instant { success }, journal)
    }

    /// A main-style command whose processes run until resolved or closed.
    pub(crate) fn hanging(line: &str, options: ScriptOptions, journal: &Journal) -> Arc<Self> {
        Self::build(line, options, Behavior::Hanging, journal)
    }

    fn build(
        line: &str,
        options: ScriptOptions,
        behavior: Behavior,
        journal: &Journal,
    ) -> Arc<Self> {
        Arc::new(Self {
            line: line.to_string(),
            options,
            behavior,
            journal: journal.clone(),
            spawns: StdMutex::new(SpawnLog::default()),
        })
    }

    /// How many processes this command spawned so far.
    pub(crate) fn spawn_count(&self) -> usize {
        self.spawns.lock().unwrap().pids.len()
    }

    /// Pids of every spawned instance, in spawn order.
    pub(crate) fn pids(&self) -> Vec<u32> {
        self.spawns.lock().unwrap().pids.clone()
    }

    /// Resolves the most recently spawned hanging instance.
    #[allow(dead_code)]
    pub(crate) fn finish_last(&self, success: bool) {
        if let Some(exit) = self.spawns.lock().unwrap().exits.pop() {
            exit.finish(success);
        }
    }
}

impl Command for FakeCommand {
    fn line(&self) -> &str {
        &self.line
    }

    fn options(&self) -> &ScriptOptions {
        &self.options
    }

    fn spawn(&self) -> Result<ProcessRef, CommandError> {
        let pid = NEXT_PID.fetch_add(1, Ordering::SeqCst);
        let (process, exit) = FakeProcess::with_journal(pid, &self.line, Some(self.journal.clone()));
        self.journal.push(format!("spawn:{}", self.line));

        let mut spawns = self.spawns.lock().unwrap();
        spawns.pids.push(pid);
        match self.behavior {
            Behavior::Instant { success } => exit.finish(success),
            Behavior::Hanging => spawns.exits.push(exit),
        }
        Ok(process)
    }
}

/// Counting [`CommandSource`] over a fixed table.
pub(crate) struct FakeSource {
    chains: HashMap<String, Vec<CommandRef>>,
    resolutions: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn single(script: &str, chain: Vec<CommandRef>) -> Arc<Self> {
        let mut chains = HashMap::new();
        chains.insert(script.to_string(), chain);
        Arc::new(Self {
            chains,
            resolutions: AtomicUsize::new(0),
        })
    }

    /// How many times the daemon resolved a chain.
    pub(crate) fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

impl CommandSource for FakeSource {
    fn resolve(&self, script: &str) -> Result<Vec<CommandRef>, CommandError> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        self.chains
            .get(script)
            .cloned()
            .ok_or_else(|| CommandError::UnknownScript {
                script: script.to_string(),
            })
    }
}

/// Observer for [`ProbeFeed`] polls.
#[derive(Clone)]
pub(crate) struct PollCount(Arc<AtomicUsize>);

impl PollCount {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Change feed that never yields and counts every poll.
pub(crate) struct ProbeFeed(Arc<AtomicUsize>);

impl ProbeFeed {
    pub(crate) fn new() -> (Self, PollCount) {
        let polls = Arc::new(AtomicUsize::new(0));
        (Self(Arc::clone(&polls)), PollCount(polls))
    }
}

impl Stream for ProbeFeed {
    type Item = ChangeBatch;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Poll::Pending
    }
}

/// Adapts an mpsc receiver into a change feed tests can push into.
pub(crate) fn feed_from(
    rx: mpsc::Receiver<ChangeBatch>,
) -> impl Stream<Item = ChangeBatch> + Send + 'static {
    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|batch| (batch, rx))
    })
}
