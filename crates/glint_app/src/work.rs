//! Background work run on the dispatch thread between frames
//!
//! The dispatch loop treats work as one arm of its wait: when
//! [`WorkScheduler::work_available`] resolves it runs a single unit with
//! [`WorkScheduler::do_work`], then goes back to pumping native events.

use crate::error::{Result, ShellError};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{oneshot, Notify};

/// Source of deferred work for the dispatch loop
pub trait WorkScheduler {
    /// Resolves once at least one unit of work is queued
    ///
    /// Dropping the future before it resolves must not lose work.
    fn work_available(&self) -> impl Future<Output = ()> + '_;

    /// Perform one unit of queued work; a no-op if the queue is empty
    fn do_work(&self);
}

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct WorkShared {
    jobs: Mutex<VecDeque<Job>>,
    ready: Notify,
}

impl WorkShared {
    fn push(&self, job: Job) {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(job);
        self.ready.notify_one();
    }

    fn pop(&self) -> Option<Job> {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    fn len(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// FIFO work queue, the default [`WorkScheduler`]
#[derive(Default)]
pub struct WorkQueue {
    shared: Arc<WorkShared>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a handle for submitting work from other threads
    pub fn handle(&self) -> WorkHandle {
        WorkHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of queued jobs
    pub fn len(&self) -> usize {
        self.shared.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorkScheduler for WorkQueue {
    fn work_available(&self) -> impl Future<Output = ()> + '_ {
        async move {
            loop {
                if !self.is_empty() {
                    return;
                }
                // notify_one leaves a permit when nobody is waiting, so a
                // push between the check and this await is not missed
                self.shared.ready.notified().await;
            }
        }
    }

    fn do_work(&self) {
        if let Some(job) = self.shared.pop() {
            tracing::trace!("running work unit");
            job();
        }
    }
}

/// Cloneable handle for queuing work onto the dispatch thread
#[derive(Clone)]
pub struct WorkHandle {
    shared: Arc<WorkShared>,
}

impl WorkHandle {
    /// Queue a job; it runs on the dispatch thread between frames
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.push(Box::new(job));
    }

    /// Run `job` on the dispatch thread and wait for its result
    ///
    /// Must not be called from the dispatch thread itself: the job could
    /// never run while the caller blocks.
    ///
    /// # Panics
    ///
    /// Panics if called from inside an async context.
    pub fn run_blocking<F, R>(&self, job: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.submit(move || {
            // The caller may have given up; nothing to report to
            let _ = tx.send(job());
        });
        rx.blocking_recv().map_err(|_| ShellError::Disconnected)
    }

    /// Number of queued jobs
    pub fn pending(&self) -> usize {
        self.shared.len()
    }
}
