//! Desktop input conversion (winit -> native callback arguments)
//!
//! The event bridge consumes raw button codes and modifier state masks, so
//! winit's typed input is re-encoded into that form here.

use glint_platform::{Button, Modifiers};
use winit::event::{MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::ModifiersState;

/// Native code for a winit mouse button; buttons without a code map to 0
pub fn button_code(button: WinitMouseButton) -> u32 {
    match button {
        WinitMouseButton::Left => Button::Left.code(),
        WinitMouseButton::Middle => Button::Middle.code(),
        WinitMouseButton::Right => Button::Right.code(),
        _ => Button::None.code(),
    }
}

/// Convert winit modifiers to a native state mask
pub fn state_mask(modifiers: ModifiersState) -> u32 {
    Modifiers {
        shift: modifiers.shift_key(),
        ctrl: modifiers.control_key(),
        alt: modifiers.alt_key(),
        meta: modifiers.super_key(),
    }
    .to_state_mask()
}

/// Wheel pseudo-button codes for a scroll delta, vertical first
///
/// Each code is reported as a press followed by a release.
pub fn wheel_codes(delta: MouseScrollDelta) -> impl Iterator<Item = u32> {
    let (dx, dy) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
        MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
    };

    let vertical = if dy > 0.0 {
        Some(Button::WheelUp)
    } else if dy < 0.0 {
        Some(Button::WheelDown)
    } else {
        None
    };
    let horizontal = if dx < 0.0 {
        Some(Button::WheelLeft)
    } else if dx > 0.0 {
        Some(Button::WheelRight)
    } else {
        None
    };

    [vertical, horizontal]
        .into_iter()
        .flatten()
        .map(Button::code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_button_codes() {
        assert_eq!(button_code(WinitMouseButton::Left), 1);
        assert_eq!(button_code(WinitMouseButton::Middle), 2);
        assert_eq!(button_code(WinitMouseButton::Right), 3);
        assert_eq!(button_code(WinitMouseButton::Back), 0);
        assert_eq!(button_code(WinitMouseButton::Other(12)), 0);
    }

    #[test]
    fn test_state_mask() {
        assert_eq!(state_mask(ModifiersState::empty()), 0);
        assert_eq!(state_mask(ModifiersState::SHIFT), 1 << 0);

        let mask = state_mask(ModifiersState::CONTROL | ModifiersState::ALT | ModifiersState::SUPER);
        let decoded = Modifiers::from_state_mask(mask);
        assert!(!decoded.shift && decoded.ctrl && decoded.alt && decoded.meta);
    }

    #[test]
    fn test_wheel_codes() {
        let up: Vec<u32> = wheel_codes(MouseScrollDelta::LineDelta(0.0, 1.0)).collect();
        assert_eq!(up, vec![4]);

        let down_left: Vec<u32> = wheel_codes(MouseScrollDelta::LineDelta(-2.0, -1.0)).collect();
        assert_eq!(down_left, vec![5, 6]);

        let right: Vec<u32> =
            wheel_codes(MouseScrollDelta::PixelDelta(PhysicalPosition::new(3.0, 0.0))).collect();
        assert_eq!(right, vec![7]);

        assert_eq!(wheel_codes(MouseScrollDelta::LineDelta(0.0, 0.0)).count(), 0);
    }
}
