//! Application-facing events

use crate::input::PointerEvent;

/// Events delivered to the application, in emission order
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Pointer press, motion or release
    Pointer(PointerEvent),
    /// Window size changed
    Resize(ResizeEvent),
    /// Synthetic hint that the application should draw a frame
    Paint,
    /// Application lifecycle transition
    Lifecycle(LifecycleEvent),
    /// The native side has stopped; no further native input follows
    Stop,
}

impl Event {
    /// Check if this is the terminal `Dead` lifecycle event
    pub fn is_dead(&self) -> bool {
        matches!(
            self,
            Event::Lifecycle(LifecycleEvent {
                stage: LifecycleStage::Dead
            })
        )
    }
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Event::Pointer(event)
    }
}

impl From<ResizeEvent> for Event {
    fn from(event: ResizeEvent) -> Self {
        Event::Resize(event)
    }
}

impl From<LifecycleStage> for Event {
    fn from(stage: LifecycleStage) -> Self {
        Event::Lifecycle(LifecycleEvent { stage })
    }
}

/// Window size in both pixels and points
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResizeEvent {
    /// Width in physical pixels
    pub width_px: i32,
    /// Height in physical pixels
    pub height_px: i32,
    /// Width in points
    pub width_pt: f32,
    /// Height in points
    pub height_pt: f32,
    /// Pixels per point
    pub scale: f32,
}

impl ResizeEvent {
    /// Build a resize event from pixel dimensions and a fixed pixels-per-point
    /// scale
    pub fn from_pixels(width_px: i32, height_px: i32, scale: f32) -> Self {
        Self {
            width_px,
            height_px,
            width_pt: width_px as f32 / scale,
            height_pt: height_px as f32 / scale,
            scale,
        }
    }

    /// Size in points as `(width, height)`
    pub fn size_pt(&self) -> (f32, f32) {
        (self.width_pt, self.height_pt)
    }
}

/// Coarse application state
///
/// Ordered: a stage never moves backwards past `Dead`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleStage {
    /// Window is up and receiving input
    Focused,
    /// The application is shutting down; terminal
    Dead,
}

/// A lifecycle transition into `stage`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LifecycleEvent {
    /// The stage being entered
    pub stage: LifecycleStage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_unit_scale() {
        let event = ResizeEvent::from_pixels(800, 600, 1.0);
        assert_eq!(
            event,
            ResizeEvent {
                width_px: 800,
                height_px: 600,
                width_pt: 800.0,
                height_pt: 600.0,
                scale: 1.0,
            }
        );
    }

    #[test]
    fn test_resize_scaled() {
        let event = ResizeEvent::from_pixels(1600, 900, 2.0);
        assert_eq!(event.size_pt(), (800.0, 450.0));
        assert_eq!(event.scale, 2.0);
    }

    #[test]
    fn test_lifecycle_order() {
        assert!(LifecycleStage::Focused < LifecycleStage::Dead);
    }

    #[test]
    fn test_is_dead() {
        assert!(Event::from(LifecycleStage::Dead).is_dead());
        assert!(!Event::from(LifecycleStage::Focused).is_dead());
        assert!(!Event::Stop.is_dead());
    }
}
