//! Glint Application Shell
//!
//! The event bridge and frame-publish scheduler between a native windowing
//! backend and an application callback.
//!
//! Native input arrives through [`EventBridge`] and is delivered in order on
//! the application's event stream. The application draws, calls
//! [`App::publish`], and is paced to the configured frame rate by the
//! dispatch loop's vsync timer. Work queued through a [`WorkHandle`] runs on
//! the windowing thread between frames.
//!
//! # Example (Windowed Application)
//!
//! ```ignore
//! use glint_app::prelude::*;
//!
//! fn main() -> Result<()> {
//!     glint_app::run_windowed(|mut app| {
//!         while let Some(event) = app.next_event() {
//!             match app.filter(event) {
//!                 Event::Paint => {
//!                     // Render frame here
//!                     if app.publish().is_err() {
//!                         break;
//!                     }
//!                     app.request_paint();
//!                 }
//!                 Event::Stop => break,
//!                 _ => {}
//!             }
//!         }
//!     })
//! }
//! ```

mod app;
mod bridge;
mod config;
mod dispatch;
mod error;
mod events;
mod lifecycle;
mod publish;
mod work;

#[cfg(all(feature = "desktop", not(any(target_os = "android", target_os = "ios"))))]
pub mod windowed;

#[cfg(test)]
mod tests;

pub use app::{App, Filter};
pub use bridge::EventBridge;
pub use config::{ShellConfig, MAX_FRAME_RATE};
pub use dispatch::Shell;
pub use error::{Result, ShellError};
pub use events::{event_channel, EventReceiver, EventSender};
pub use lifecycle::Lifecycle;
pub use publish::{
    publish_channel, PublishReceiver, PublishRequest, PublishResult, PublishScheduler,
    PublishSender, PublishState,
};
pub use work::{WorkHandle, WorkQueue, WorkScheduler};

#[cfg(all(feature = "desktop", not(any(target_os = "android", target_os = "ios"))))]
pub use windowed::{run_windowed, run_windowed_with_config};

// Re-export platform types for applications
pub use glint_platform::{
    Button, Direction, Event, LifecycleEvent, LifecycleStage, Modifiers, PointerEvent,
    ResizeEvent, WindowConfig,
};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::App;
    pub use crate::config::ShellConfig;
    pub use crate::dispatch::Shell;
    pub use crate::error::{Result, ShellError};
    pub use crate::publish::PublishResult;
    pub use crate::work::{WorkHandle, WorkScheduler};

    pub use glint_platform::{
        Button, Direction, Event, LifecycleStage, Modifiers, PointerEvent, ResizeEvent,
        WindowConfig,
    };
}
