//! Native callback bridge
//!
//! [`EventBridge`] is the [`NativeCallbacks`] implementation handed to the
//! native backend. Each callback decodes its raw arguments into exactly one
//! [`Event`] and enqueues it; nothing here blocks or calls application code.

use crate::events::EventSender;
use crate::lifecycle::Lifecycle;
use glint_platform::{Direction, Event, NativeCallbacks, NativeInput, PointerEvent, ResizeEvent};
use std::cell::RefCell;

/// Turns native callbacks into events on the application's channel
#[derive(Clone, Debug)]
pub struct EventBridge {
    events: EventSender,
    lifecycle: Lifecycle,
    pixels_per_pt: f32,
}

impl EventBridge {
    /// Create a bridge with a fixed pixels-per-point scale
    pub fn new(events: EventSender, pixels_per_pt: f32) -> Self {
        let lifecycle = Lifecycle::new(events.clone());
        Self {
            events,
            lifecycle,
            pixels_per_pt,
        }
    }

    /// The lifecycle manager owning this session's stopped flag
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Enqueue a synthetic paint hint
    pub fn send_paint(&self) {
        self.events.send(Event::Paint);
    }

    fn send_pointer(&self, direction: Direction, x: f32, y: f32, button: u32, state: u32) {
        self.events
            .send(PointerEvent::from_native(x, y, button, state, direction).into());
    }
}

impl NativeCallbacks for EventBridge {
    fn on_resize(&self, width: i32, height: i32) {
        self.events
            .send(ResizeEvent::from_pixels(width, height, self.pixels_per_pt).into());
    }

    fn on_pointer_press(&self, x: f32, y: f32, button: u32, state: u32) {
        self.send_pointer(Direction::Press, x, y, button, state);
    }

    fn on_pointer_move(&self, x: f32, y: f32, state: u32) {
        self.send_pointer(Direction::Move, x, y, 0, state);
    }

    fn on_pointer_release(&self, x: f32, y: f32, button: u32, state: u32) {
        self.send_pointer(Direction::Release, x, y, button, state);
    }

    fn on_stop(&self) {
        self.lifecycle.stop();
    }
}

/// Records callbacks reported while the window is being created
///
/// The startup stream has to open with `Focused` and `Paint`, so anything a
/// backend reports from `create_window` is replayed after those.
#[derive(Debug, Default)]
pub(crate) struct DeferredCallbacks {
    inputs: RefCell<Vec<NativeInput>>,
}

impl DeferredCallbacks {
    fn record(&self, input: NativeInput) {
        self.inputs.borrow_mut().push(input);
    }

    /// Deliver everything recorded, in order; returns how many were replayed
    pub(crate) fn replay(self, callbacks: &dyn NativeCallbacks) -> usize {
        let inputs = self.inputs.into_inner();
        let count = inputs.len();
        for input in inputs {
            input.deliver(callbacks);
        }
        count
    }
}

impl NativeCallbacks for DeferredCallbacks {
    fn on_resize(&self, width: i32, height: i32) {
        self.record(NativeInput::Resize { width, height });
    }

    fn on_pointer_press(&self, x: f32, y: f32, button: u32, state: u32) {
        self.record(NativeInput::PointerPress { x, y, button, state });
    }

    fn on_pointer_move(&self, x: f32, y: f32, state: u32) {
        self.record(NativeInput::PointerMove { x, y, state });
    }

    fn on_pointer_release(&self, x: f32, y: f32, button: u32, state: u32) {
        self.record(NativeInput::PointerRelease { x, y, button, state });
    }

    fn on_stop(&self) {
        self.record(NativeInput::Close);
    }
}
