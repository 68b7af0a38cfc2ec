//! Scripted native backend with no real window
//!
//! [`HeadlessNative`] stands in for a windowing system. Inputs are queued
//! through a [`HeadlessController`] from any thread and delivered, in order,
//! the next time the dispatch loop pumps events.

use crate::error::PlatformError;
use crate::platform::{NativeCallbacks, NativeWindowing};
pub use crate::platform::NativeInput;
use crate::window::WindowConfig;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Default)]
struct HeadlessShared {
    pending: Mutex<VecDeque<NativeInput>>,
    window_created: AtomicBool,
    fail_create: AtomicBool,
    swaps: AtomicU64,
    pumps: AtomicU64,
}

/// Handle for scripting a [`HeadlessNative`] and observing what it was asked
/// to do
#[derive(Clone, Default)]
pub struct HeadlessController {
    shared: Arc<HeadlessShared>,
}

impl HeadlessController {
    /// Queue a native input for the next pump
    pub fn push(&self, input: NativeInput) {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(input);
    }

    /// Queue several inputs, preserving their order
    pub fn extend(&self, inputs: impl IntoIterator<Item = NativeInput>) {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(inputs);
    }

    /// Number of inputs not yet delivered
    pub fn pending(&self) -> usize {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Make the next `create_window` call fail
    pub fn fail_window_creation(&self) {
        self.shared.fail_create.store(true, Ordering::SeqCst);
    }

    /// Whether a window has been created
    pub fn window_created(&self) -> bool {
        self.shared.window_created.load(Ordering::SeqCst)
    }

    /// Number of buffer swaps performed
    pub fn swap_count(&self) -> u64 {
        self.shared.swaps.load(Ordering::SeqCst)
    }

    /// Number of times pending events were pumped
    pub fn pump_count(&self) -> u64 {
        self.shared.pumps.load(Ordering::SeqCst)
    }
}

/// Native backend without a display
#[derive(Default)]
pub struct HeadlessNative {
    controller: HeadlessController,
}

impl HeadlessNative {
    /// Create a headless backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a controller for scripting inputs and reading counters
    pub fn controller(&self) -> HeadlessController {
        self.controller.clone()
    }
}

impl NativeWindowing for HeadlessNative {
    fn create_window(
        &mut self,
        config: &WindowConfig,
        _callbacks: &dyn NativeCallbacks,
    ) -> Result<(), PlatformError> {
        let shared = &self.controller.shared;
        if shared.fail_create.swap(false, Ordering::SeqCst) {
            return Err(PlatformError::WindowCreation(
                "headless window creation disabled".to_string(),
            ));
        }
        shared.window_created.store(true, Ordering::SeqCst);
        tracing::debug!(
            "Headless window '{}' {}x{}",
            config.title,
            config.width,
            config.height
        );
        Ok(())
    }

    fn process_events(&mut self, callbacks: &dyn NativeCallbacks) {
        let shared = &self.controller.shared;
        shared.pumps.fetch_add(1, Ordering::SeqCst);

        // Drain first so callbacks never run under the lock
        let inputs: Vec<NativeInput> = shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        for input in inputs {
            input.deliver(callbacks);
        }
    }

    fn swap_buffers(&mut self) {
        self.controller.shared.swaps.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl NativeCallbacks for Recorder {
        fn on_resize(&self, width: i32, height: i32) {
            self.calls.borrow_mut().push(format!("resize {width}x{height}"));
        }

        fn on_pointer_press(&self, x: f32, y: f32, button: u32, state: u32) {
            self.calls
                .borrow_mut()
                .push(format!("press {x},{y} b{button} s{state}"));
        }

        fn on_pointer_move(&self, x: f32, y: f32, state: u32) {
            self.calls.borrow_mut().push(format!("move {x},{y} s{state}"));
        }

        fn on_pointer_release(&self, x: f32, y: f32, button: u32, state: u32) {
            self.calls
                .borrow_mut()
                .push(format!("release {x},{y} b{button} s{state}"));
        }

        fn on_stop(&self) {
            self.calls.borrow_mut().push("stop".to_string());
        }
    }

    #[test]
    fn test_inputs_dispatched_in_order() {
        let mut native = HeadlessNative::new();
        let controller = native.controller();
        let recorder = Recorder::default();

        controller.extend([
            NativeInput::Resize {
                width: 640,
                height: 480,
            },
            NativeInput::PointerPress {
                x: 1.0,
                y: 2.0,
                button: 1,
                state: 4,
            },
            NativeInput::PointerMove {
                x: 3.0,
                y: 4.0,
                state: 0,
            },
            NativeInput::PointerRelease {
                x: 3.0,
                y: 4.0,
                button: 1,
                state: 0,
            },
            NativeInput::Close,
        ]);
        assert_eq!(controller.pending(), 5);

        native.process_events(&recorder);

        assert_eq!(
            *recorder.calls.borrow(),
            vec![
                "resize 640x480",
                "press 1,2 b1 s4",
                "move 3,4 s0",
                "release 3,4 b1 s0",
                "stop",
            ]
        );
        assert_eq!(controller.pending(), 0);
        assert_eq!(controller.pump_count(), 1);
    }

    #[test]
    fn test_window_creation_failure() {
        let mut native = HeadlessNative::new();
        let controller = native.controller();
        let recorder = Recorder::default();

        controller.fail_window_creation();
        let err = native.create_window(&WindowConfig::default(), &recorder);
        assert!(matches!(err, Err(PlatformError::WindowCreation(_))));
        assert!(!controller.window_created());

        native
            .create_window(&WindowConfig::default(), &recorder)
            .unwrap();
        assert!(controller.window_created());
    }

    #[test]
    fn test_swap_counter() {
        let mut native = HeadlessNative::new();
        let controller = native.controller();
        native.swap_buffers();
        native.swap_buffers();
        assert_eq!(controller.swap_count(), 2);
        assert_eq!(native.name(), "headless");
    }
}
