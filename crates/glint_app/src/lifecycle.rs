//! Lifecycle transitions and the one-shot stop

use crate::events::EventSender;
use glint_platform::{Event, LifecycleStage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sends lifecycle events and guards teardown so it happens once
///
/// Clones share the same stopped flag. Each windowing session creates its own.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    events: EventSender,
    stopped: Arc<AtomicBool>,
}

impl Lifecycle {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Enqueue a transition into `stage`
    pub fn send_lifecycle(&self, stage: LifecycleStage) {
        tracing::debug!(?stage, "lifecycle transition");
        self.events.send(Event::from(stage));
    }

    /// Enqueue `Dead` followed by `Stop`, the first time only
    ///
    /// Returns whether this call performed the stop.
    pub fn stop(&self) -> bool {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::trace!("stop already delivered");
            return false;
        }
        self.send_lifecycle(LifecycleStage::Dead);
        self.events.send(Event::Stop);
        true
    }

    /// Whether `stop` has run
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}
