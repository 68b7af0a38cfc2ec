//! Glint Platform Abstraction Layer
//!
//! This crate provides the types and traits that sit between a native
//! windowing subsystem and the Glint event bridge.
//!
//! # Architecture
//!
//! - [`NativeWindowing`] - What the dispatch loop calls: create window, pump
//!   events, swap buffers
//! - [`NativeCallbacks`] - What a backend calls back while pumping, with raw
//!   native arguments
//! - [`Event`] - The normalized, application-facing event stream
//!
//! # Platform Implementations
//!
//! - [`headless::HeadlessNative`] - Scripted backend for tests and tooling
//! - `glint_platform_desktop` - Desktop platforms (macOS, Windows, Linux) using winit

mod error;
mod event;
pub mod headless;
mod input;
mod platform;
mod window;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{Event, LifecycleEvent, LifecycleStage, ResizeEvent};
pub use input::{Button, Direction, Modifiers, PointerEvent};
pub use platform::{NativeCallbacks, NativeInput, NativeWindowing};
pub use window::WindowConfig;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{Event, LifecycleEvent, LifecycleStage, ResizeEvent};
    pub use crate::input::{Button, Direction, Modifiers, PointerEvent};
    pub use crate::platform::{NativeCallbacks, NativeInput, NativeWindowing};
    pub use crate::window::WindowConfig;
}
