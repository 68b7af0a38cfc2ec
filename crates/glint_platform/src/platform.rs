//! Native windowing traits
//!
//! The native subsystem and the event bridge talk through two narrow traits.
//! [`NativeWindowing`] is what the dispatch loop calls into; [`NativeCallbacks`]
//! is what the native side calls back while pumping events.

use crate::error::PlatformError;
use crate::window::WindowConfig;

/// Callback surface a native backend invokes while pumping events
///
/// Arguments are raw native values: button codes and modifier state masks are
/// decoded by the implementor. Implementations must return promptly; they run
/// inside [`NativeWindowing::process_events`] on the windowing thread.
pub trait NativeCallbacks {
    /// The window's drawable area is now `width` x `height` pixels
    fn on_resize(&self, width: i32, height: i32);

    /// A pointer button went down
    fn on_pointer_press(&self, x: f32, y: f32, button: u32, state: u32);

    /// The pointer moved
    fn on_pointer_move(&self, x: f32, y: f32, state: u32);

    /// A pointer button came up
    fn on_pointer_release(&self, x: f32, y: f32, button: u32, state: u32);

    /// The native side is closing the window; may be reported more than once
    fn on_stop(&self);
}

/// A raw native input, as a backend would report it
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NativeInput {
    /// Drawable area changed
    Resize { width: i32, height: i32 },
    /// Button press with native button code and state mask
    PointerPress { x: f32, y: f32, button: u32, state: u32 },
    /// Pointer motion with native state mask
    PointerMove { x: f32, y: f32, state: u32 },
    /// Button release with native button code and state mask
    PointerRelease { x: f32, y: f32, button: u32, state: u32 },
    /// Window close notification
    Close,
}

impl NativeInput {
    /// Invoke the matching callback
    pub fn deliver(self, callbacks: &dyn NativeCallbacks) {
        match self {
            NativeInput::Resize { width, height } => callbacks.on_resize(width, height),
            NativeInput::PointerPress {
                x,
                y,
                button,
                state,
            } => callbacks.on_pointer_press(x, y, button, state),
            NativeInput::PointerMove { x, y, state } => callbacks.on_pointer_move(x, y, state),
            NativeInput::PointerRelease {
                x,
                y,
                button,
                state,
            } => callbacks.on_pointer_release(x, y, button, state),
            NativeInput::Close => callbacks.on_stop(),
        }
    }
}

/// Native windowing subsystem
///
/// All methods are called from a single thread, the one running the dispatch
/// loop, so implementations need not be `Send`.
pub trait NativeWindowing {
    /// Create the window and its graphics context
    ///
    /// Failure here is fatal; the dispatch loop never starts. Backends should
    /// not invoke `callbacks` here. Anything they do report is held back by
    /// the dispatch loop and delivered after the startup events.
    fn create_window(
        &mut self,
        config: &WindowConfig,
        callbacks: &dyn NativeCallbacks,
    ) -> Result<(), PlatformError>;

    /// Pump pending native events, dispatching them synchronously to
    /// `callbacks`; must not block waiting for new events
    fn process_events(&mut self, callbacks: &dyn NativeCallbacks);

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Get the backend name
    ///
    /// Returns a string like "desktop" or "headless".
    fn name(&self) -> &'static str;
}
