//! Desktop native subsystem driven by winit's pump API
//!
//! winit normally wants to own the thread with `run_app`. Here the dispatch
//! loop owns it instead and pumps winit with a zero timeout whenever it wants
//! pending native events delivered.

use crate::input;
use glint_platform::{NativeCallbacks, NativeWindowing, PlatformError, WindowConfig};
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

/// Pumps allowed while waiting for winit to resume and create the window
const CREATE_ATTEMPTS: usize = 50;
const CREATE_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Hook run after each buffer swap, for a renderer to present its surface
pub type PresentHook = Box<dyn FnMut(&Window)>;

/// State touched from inside winit callbacks
#[derive(Default)]
struct DesktopState {
    window: Option<Window>,
    pending_config: Option<WindowConfig>,
    creation_error: Option<String>,
    modifiers: ModifiersState,
    cursor: (f32, f32),
}

/// Desktop native windowing backed by a winit event loop
pub struct DesktopNative {
    event_loop: EventLoop<()>,
    state: DesktopState,
    present: Option<PresentHook>,
}

impl DesktopNative {
    /// Create the native event loop
    ///
    /// winit allows one event loop per process, and some platforms require it
    /// on the main thread.
    pub fn new() -> Result<Self, PlatformError> {
        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;

        Ok(Self {
            event_loop,
            state: DesktopState::default(),
            present: None,
        })
    }

    /// Run `hook` with the window after every swap
    pub fn with_present_hook<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Window) + 'static,
    {
        self.present = Some(Box::new(hook));
        self
    }

    /// Get the underlying winit window, once created
    pub fn window(&self) -> Option<&Window> {
        self.state.window.as_ref()
    }

    fn pump(&mut self, timeout: Duration, callbacks: &dyn NativeCallbacks) -> PumpStatus {
        let mut handler = DesktopHandler {
            state: &mut self.state,
            callbacks,
        };
        self.event_loop.pump_app_events(Some(timeout), &mut handler)
    }
}

impl NativeWindowing for DesktopNative {
    fn create_window(
        &mut self,
        config: &WindowConfig,
        callbacks: &dyn NativeCallbacks,
    ) -> Result<(), PlatformError> {
        if self.state.window.is_some() {
            return Err(PlatformError::WindowCreation(
                "window already created".to_string(),
            ));
        }
        self.state.pending_config = Some(config.clone());

        // The window can only be created from `resumed`, which arrives on an
        // early pump
        for _ in 0..CREATE_ATTEMPTS {
            if let PumpStatus::Exit(code) = self.pump(CREATE_PUMP_TIMEOUT, callbacks) {
                return Err(PlatformError::EventLoop(format!(
                    "event loop exited with code {code} before the window was created"
                )));
            }
            if let Some(err) = self.state.creation_error.take() {
                return Err(PlatformError::WindowCreation(err));
            }
            if self.state.window.is_some() {
                return Ok(());
            }
        }

        self.state.pending_config = None;
        Err(PlatformError::WindowCreation(
            "event loop never resumed".to_string(),
        ))
    }

    fn process_events(&mut self, callbacks: &dyn NativeCallbacks) {
        if let PumpStatus::Exit(code) = self.pump(Duration::ZERO, callbacks) {
            tracing::info!(code, "native event loop exited");
            callbacks.on_stop();
        }
    }

    fn swap_buffers(&mut self) {
        let Some(window) = self.state.window.as_ref() else {
            return;
        };
        window.pre_present_notify();
        if let Some(present) = self.present.as_mut() {
            present(window);
        }
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}

fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorations);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    attrs
}

/// winit handler living for the duration of one pump
struct DesktopHandler<'a> {
    state: &'a mut DesktopState,
    callbacks: &'a dyn NativeCallbacks,
}

impl ApplicationHandler for DesktopHandler<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.state.pending_config.take() else {
            return;
        };

        match event_loop.create_window(window_attributes(&config)) {
            Ok(window) => {
                tracing::info!("Desktop window '{}' created", config.title);
                self.state.window = Some(window);
            }
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                self.state.creation_error = Some(e.to_string());
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let callbacks = self.callbacks;
        let state = input::state_mask(self.state.modifiers);

        match event {
            WindowEvent::Resized(size) => {
                callbacks.on_resize(size.width as i32, size.height as i32);
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.state.modifiers = mods.state();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.state.cursor;
                callbacks.on_pointer_move(x, y, state);
            }

            WindowEvent::MouseInput {
                state: element,
                button,
                ..
            } => {
                let (x, y) = self.state.cursor;
                let code = input::button_code(button);
                match element {
                    ElementState::Pressed => callbacks.on_pointer_press(x, y, code, state),
                    ElementState::Released => callbacks.on_pointer_release(x, y, code, state),
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = self.state.cursor;
                for code in input::wheel_codes(delta) {
                    callbacks.on_pointer_press(x, y, code, state);
                    callbacks.on_pointer_release(x, y, code, state);
                }
            }

            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                callbacks.on_stop();
            }

            _ => {}
        }
    }
}
