//! The dispatch loop
//!
//! [`Shell::run`] owns the calling thread for the lifetime of the
//! application. It creates the native window, starts the application callback
//! on its own task, then loops: wait for whichever of application exit, queued
//! work, a publish request or a vsync tick comes first, handle it, pump native
//! events, repeat. Only this thread touches the native backend.

use crate::app::App;
use crate::bridge::{DeferredCallbacks, EventBridge};
use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use crate::events::event_channel;
use crate::publish::{publish_channel, PublishScheduler};
use crate::work::{WorkHandle, WorkQueue, WorkScheduler};
use glint_platform::{LifecycleStage, NativeWindowing};

/// A windowing session over a native backend
///
/// # Example
///
/// ```ignore
/// use glint_app::prelude::*;
/// use glint_platform::headless::HeadlessNative;
///
/// let frames = Shell::new(HeadlessNative::new()).run(|mut app| {
///     let mut frames = 0;
///     while let Some(event) = app.next_event() {
///         match event {
///             Event::Paint => {
///                 frames += 1;
///                 app.publish().ok();
///                 if frames < 3 {
///                     app.request_paint();
///                 } else {
///                     break;
///                 }
///             }
///             Event::Stop => break,
///             _ => {}
///         }
///     }
///     frames
/// })?;
/// ```
pub struct Shell<N, W = WorkQueue> {
    native: N,
    worker: W,
    config: ShellConfig,
}

impl<N: NativeWindowing> Shell<N, WorkQueue> {
    /// Create a session with the default configuration and work queue
    pub fn new(native: N) -> Self {
        Self {
            native,
            worker: WorkQueue::new(),
            config: ShellConfig::default(),
        }
    }

    /// Get a handle for queuing work onto the dispatch thread
    pub fn worker(&self) -> WorkHandle {
        self.worker.handle()
    }
}

impl<N: NativeWindowing, W: WorkScheduler> Shell<N, W> {
    /// Replace the configuration
    pub fn with_config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the work scheduler
    pub fn with_worker<V: WorkScheduler>(self, worker: V) -> Shell<N, V> {
        Shell {
            native: self.native,
            worker,
            config: self.config,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Run `f` as the application and dispatch until it returns
    ///
    /// Blocks the calling thread, which becomes the windowing thread, and
    /// returns whatever `f` returns. Receiving [`glint_platform::Event::Stop`]
    /// does not end the loop; `f` has to return.
    ///
    /// # Panics
    ///
    /// A panic in `f` is resumed on the calling thread.
    pub fn run<F, R>(self, f: F) -> Result<R>
    where
        F: FnOnce(App) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.config.validate()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(ShellError::Runtime)?;

        let Shell {
            mut native,
            worker,
            config,
        } = self;
        runtime.block_on(dispatch(&mut native, &worker, &config, f))
    }
}

async fn dispatch<N, W, F, R>(native: &mut N, worker: &W, config: &ShellConfig, f: F) -> Result<R>
where
    N: NativeWindowing,
    W: WorkScheduler,
    F: FnOnce(App) -> R + Send + 'static,
    R: Send + 'static,
{
    let (events, receiver) = event_channel();
    let bridge = EventBridge::new(events.clone(), config.pixels_per_pt);
    let (publisher, mut requests) = publish_channel();
    let mut scheduler = PublishScheduler::new(config.vsync_interval());

    let deferred = DeferredCallbacks::default();
    native.create_window(&config.window, &deferred)?;
    tracing::info!(
        backend = native.name(),
        "window '{}' created",
        config.window.title
    );

    bridge.lifecycle().send_lifecycle(LifecycleStage::Focused);
    // No expose events reach us; ask for the first frame explicitly
    bridge.send_paint();

    let replayed = deferred.replay(&bridge);
    if replayed > 0 {
        tracing::debug!(replayed, "delivered callbacks reported during window creation");
    }

    let app = App::new(receiver, events, publisher);
    let mut app_task = tokio::task::spawn_blocking(move || f(app));
    let mut requests_open = true;

    tracing::debug!(interval = ?scheduler.interval(), "dispatch loop started");

    loop {
        tokio::select! {
            result = &mut app_task => {
                tracing::info!(
                    frames = scheduler.published(),
                    stopped = bridge.lifecycle().is_stopped(),
                    "application returned"
                );
                return match result {
                    Ok(value) => Ok(value),
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(err) => Err(ShellError::Other(format!("application task failed: {err}"))),
                };
            }
            () = worker.work_available() => {
                worker.do_work();
            }
            request = requests.recv(), if requests_open && scheduler.is_idle() => {
                match request {
                    Some(request) => scheduler.begin(request, || native.swap_buffers()),
                    None => {
                        tracing::debug!("publish channel closed");
                        requests_open = false;
                    }
                }
            }
            () = scheduler.vsync(), if scheduler.awaiting_vsync() => {
                scheduler.complete();
            }
        }

        native.process_events(&bridge);
    }
}
