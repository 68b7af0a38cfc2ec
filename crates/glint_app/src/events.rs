//! Event channel from native callbacks to the application task
//!
//! Unbounded and ordered: a send never blocks the windowing thread, and the
//! application sees events exactly in the order they were sent.

use glint_platform::Event;
use tokio::sync::mpsc;

/// Create a connected sender/receiver pair
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}

/// Sending half; cheap to clone
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSender {
    /// Enqueue an event
    ///
    /// Returns `false` if the receiver has been dropped, in which case the
    /// event is discarded.
    pub fn send(&self, event: Event) -> bool {
        match self.tx.send(event) {
            Ok(()) => {
                tracing::trace!(?event, "event enqueued");
                true
            }
            Err(_) => {
                tracing::trace!(?event, "event dropped, receiver closed");
                false
            }
        }
    }

    /// Check if the receiving half is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half; owned by the application task
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReceiver {
    /// Wait for the next event
    ///
    /// Returns `None` once every sender is dropped and the queue is drained.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Block the current thread until the next event
    ///
    /// # Panics
    ///
    /// Panics if called from inside an async context.
    pub fn blocking_recv(&mut self) -> Option<Event> {
        self.rx.blocking_recv()
    }

    /// Take the next event if one is queued
    pub fn try_recv(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}
