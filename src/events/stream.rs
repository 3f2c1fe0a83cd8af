//! # Pull stream over the daemon's event channel.
//!
//! [`EventStream`] is the receiving half of the bounded channel the
//! daemon driver writes to. It is single-use: a new stream requires
//! constructing a new [`Daemon`](crate::Daemon).
//!
//! ## Rules
//! - **Backpressure**: the driver suspends when the channel is full, so
//!   a slow consumer slows the daemon down instead of losing events.
//! - **Teardown**: the stream owns a guard on the daemon's runtime
//!   token; dropping the stream cancels it, and every detached task
//!   (driver, exit monitor, signal listener) exits at its next
//!   suspension point.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::event::DaemonEvent;

/// Consumer handle for the daemon's lifecycle events.
///
/// Implements [`futures::Stream`]; `None` means the sequence terminated
/// (the `Exit` event is always delivered before that).
pub struct EventStream {
    rx: mpsc::Receiver<DaemonEvent>,
    _shutdown: DropGuard,
}

impl EventStream {
    pub(crate) fn new(rx: mpsc::Receiver<DaemonEvent>, token: CancellationToken) -> Self {
        Self {
            rx,
            _shutdown: token.drop_guard(),
        }
    }

    /// Receives the next event, or `None` once the sequence terminated.
    ///
    /// Equivalent to `StreamExt::next` without the trait import.
    pub async fn next_event(&mut self) -> Option<DaemonEvent> {
        self.rx.recv().await
    }
}

impl Stream for EventStream {
    type Item = DaemonEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
