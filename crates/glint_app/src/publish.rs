//! Frame publishing paced by an approximate vsync timer
//!
//! The application asks to publish a frame and blocks. The dispatch loop
//! swaps buffers right away, then holds the acknowledgment until the next
//! tick of a fixed-interval timer, so the application's frame rate is capped
//! at the timer rate even though no real vsync signal is available.
//!
//! ```text
//! Idle --request--> SwapPending --swap--> VsyncWait --tick--> Idle
//! ```

use crate::error::{Result, ShellError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Acknowledgment that a frame was swapped and the vsync interval elapsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishResult;

/// A pending publish, carrying the path back to the requester
#[derive(Debug)]
pub struct PublishRequest {
    ack: oneshot::Sender<PublishResult>,
}

/// Create a connected requester/receiver pair
pub fn publish_channel() -> (PublishSender, PublishReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PublishSender { tx }, PublishReceiver { rx })
}

/// Application side: issues publish requests
#[derive(Clone, Debug)]
pub struct PublishSender {
    tx: mpsc::UnboundedSender<PublishRequest>,
}

impl PublishSender {
    fn request(&self) -> Result<oneshot::Receiver<PublishResult>> {
        let (ack, rx) = oneshot::channel();
        self.tx
            .send(PublishRequest { ack })
            .map_err(|_| ShellError::Disconnected)?;
        Ok(rx)
    }

    /// Request a publish and block until it is acknowledged
    ///
    /// One request per caller at a time: the call does not return until the
    /// previous frame's interval has elapsed.
    ///
    /// # Panics
    ///
    /// Panics if called from inside an async context.
    pub fn publish(&self) -> Result<PublishResult> {
        self.request()?
            .blocking_recv()
            .map_err(|_| ShellError::Disconnected)
    }

    /// Request a publish and wait asynchronously for the acknowledgment
    pub async fn publish_async(&self) -> Result<PublishResult> {
        self.request()?.await.map_err(|_| ShellError::Disconnected)
    }
}

/// Dispatch loop side: receives publish requests
#[derive(Debug)]
pub struct PublishReceiver {
    rx: mpsc::UnboundedReceiver<PublishRequest>,
}

impl PublishReceiver {
    /// Wait for the next request; `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<PublishRequest> {
        self.rx.recv().await
    }
}

/// Where the publish state machine currently is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PublishState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Swap in progress
    SwapPending,
    /// Swapped; waiting for the next timer tick to acknowledge
    VsyncWait,
}

/// Publish state machine owned by the dispatch loop
#[derive(Debug)]
pub struct PublishScheduler {
    state: PublishState,
    interval: Duration,
    ticker: Option<Interval>,
    pending: Option<oneshot::Sender<PublishResult>>,
    published: u64,
}

impl PublishScheduler {
    /// Create a scheduler pacing acknowledgments to `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            state: PublishState::Idle,
            interval,
            ticker: None,
            pending: None,
            published: 0,
        }
    }

    pub fn state(&self) -> PublishState {
        self.state
    }

    /// Check if a new request can be accepted
    pub fn is_idle(&self) -> bool {
        self.state == PublishState::Idle
    }

    /// Check if an acknowledgment is waiting on the timer
    pub fn awaiting_vsync(&self) -> bool {
        self.state == PublishState::VsyncWait
    }

    /// Number of acknowledged publishes
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Timer interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a publish: run `swap` now and arm the timer
    ///
    /// Only valid while idle; the dispatch loop does not poll for requests
    /// otherwise.
    pub fn begin(&mut self, request: PublishRequest, swap: impl FnOnce()) {
        debug_assert!(self.is_idle(), "publish requested while {:?}", self.state);

        self.state = PublishState::SwapPending;
        swap();
        tracing::trace!("buffers swapped");

        if self.ticker.is_none() {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            self.ticker = Some(ticker);
        }

        self.pending = Some(request.ack);
        self.state = PublishState::VsyncWait;
    }

    /// Wait for the next timer tick
    ///
    /// Never resolves before the first publish has armed the timer.
    pub async fn vsync(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Acknowledge the in-flight publish and return to idle
    ///
    /// A no-op unless a swap is waiting on vsync.
    pub fn complete(&mut self) {
        if !self.awaiting_vsync() {
            return;
        }
        self.state = PublishState::Idle;
        self.published += 1;

        if let Some(ack) = self.pending.take() {
            if ack.send(PublishResult).is_err() {
                tracing::warn!("publish requester went away before acknowledgment");
            } else {
                tracing::debug!(frame = self.published, "publish acknowledged");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);

    #[tokio::test(start_paused = true)]
    async fn test_full_cycle() {
        let (sender, mut receiver) = publish_channel();
        let mut scheduler = PublishScheduler::new(FRAME);
        let swaps = Cell::new(0);

        let ack = sender.request().unwrap();
        let request = receiver.recv().await.unwrap();

        assert_eq!(scheduler.state(), PublishState::Idle);
        let start = Instant::now();
        scheduler.begin(request, || swaps.set(swaps.get() + 1));

        assert_eq!(swaps.get(), 1);
        assert_eq!(scheduler.state(), PublishState::VsyncWait);
        assert_eq!(scheduler.published(), 0);

        scheduler.vsync().await;
        assert!(Instant::now() - start >= FRAME);
        scheduler.complete();

        assert!(scheduler.is_idle());
        assert_eq!(scheduler.published(), 1);
        assert_eq!(ack.await.unwrap(), PublishResult);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ack_held_until_tick() {
        let (sender, mut receiver) = publish_channel();
        let mut scheduler = PublishScheduler::new(FRAME);

        let mut ack = sender.request().unwrap();
        scheduler.begin(receiver.recv().await.unwrap(), || {});

        assert!(ack.try_recv().is_err());
        tokio::time::advance(FRAME / 2).await;
        assert!(ack.try_recv().is_err());

        scheduler.vsync().await;
        scheduler.complete();
        assert_eq!(ack.try_recv().unwrap(), PublishResult);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ack_without_swap() {
        let mut scheduler = PublishScheduler::new(FRAME);
        scheduler.complete();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.published(), 0);

        // The timer is not armed before the first publish
        let waited = tokio::time::timeout(FRAME * 3, scheduler.vsync()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ack_within_one_interval_after_idle() {
        let (sender, mut receiver) = publish_channel();
        let mut scheduler = PublishScheduler::new(FRAME);

        for _ in 0..2 {
            let ack = sender.request().unwrap();
            scheduler.begin(receiver.recv().await.unwrap(), || {});
            let swapped = Instant::now();
            scheduler.vsync().await;
            // Timer wheel resolution is one millisecond
            assert!(Instant::now() - swapped <= FRAME + Duration::from_millis(1));
            scheduler.complete();
            ack.await.unwrap();

            // Sit idle for several frames between publishes
            tokio::time::advance(FRAME * 5).await;
        }
        assert_eq!(scheduler.published(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_requester() {
        let (sender, mut receiver) = publish_channel();
        let mut scheduler = PublishScheduler::new(FRAME);

        let ack = sender.request().unwrap();
        scheduler.begin(receiver.recv().await.unwrap(), || {});
        drop(ack);

        scheduler.vsync().await;
        scheduler.complete();
        assert!(scheduler.is_idle());
    }

    #[tokio::test]
    async fn test_request_without_loop() {
        let (sender, receiver) = publish_channel();
        drop(receiver);
        assert!(matches!(
            sender.publish_async().await,
            Err(ShellError::Disconnected)
        ));
    }
}
