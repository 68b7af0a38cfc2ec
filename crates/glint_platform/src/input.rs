//! Pointer input types and native code decoding
//!
//! Native backends report pointer input as raw integers: a button code and a
//! modifier state mask. The tables here turn those into semantic values.
//! Decoding is total: unknown codes and bits never fail.

// ============================================================================
// Buttons
// ============================================================================

/// Pointer buttons, including the four wheel directions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Button {
    /// No button, or a code with no mapping
    #[default]
    None,
    /// Left (primary) button
    Left,
    /// Middle button (wheel click)
    Middle,
    /// Right (secondary) button
    Right,
    /// Wheel scrolled up
    WheelUp,
    /// Wheel scrolled down
    WheelDown,
    /// Wheel scrolled left
    WheelLeft,
    /// Wheel scrolled right
    WheelRight,
}

impl Button {
    /// Decode a native button code
    ///
    /// Codes 1 through 7 map to left, middle, right, wheel up, wheel down,
    /// wheel left and wheel right. Everything else is [`Button::None`].
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Button::Left,
            2 => Button::Middle,
            3 => Button::Right,
            4 => Button::WheelUp,
            5 => Button::WheelDown,
            6 => Button::WheelLeft,
            7 => Button::WheelRight,
            _ => Button::None,
        }
    }

    /// The native code for this button (0 for [`Button::None`])
    pub fn code(self) -> u32 {
        match self {
            Button::None => 0,
            Button::Left => 1,
            Button::Middle => 2,
            Button::Right => 3,
            Button::WheelUp => 4,
            Button::WheelDown => 5,
            Button::WheelLeft => 6,
            Button::WheelRight => 7,
        }
    }
}

// ============================================================================
// Direction
// ============================================================================

/// What happened to the pointer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Nothing in particular
    #[default]
    None,
    /// A button went down
    Press,
    /// The pointer moved
    Move,
    /// A button came up
    Release,
}

// ============================================================================
// Modifiers
// ============================================================================

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Shift bit in a native state mask
    pub const SHIFT_MASK: u32 = 1 << 0;
    /// Control bit in a native state mask
    pub const CONTROL_MASK: u32 = 1 << 2;
    /// Alt bit in a native state mask
    pub const ALT_MASK: u32 = 1 << 3;
    /// Meta bit in a native state mask
    pub const META_MASK: u32 = 1 << 6;

    /// Decode a native modifier state mask; bits other than the four known
    /// positions are ignored
    pub fn from_state_mask(state: u32) -> Self {
        Self {
            shift: state & Self::SHIFT_MASK != 0,
            ctrl: state & Self::CONTROL_MASK != 0,
            alt: state & Self::ALT_MASK != 0,
            meta: state & Self::META_MASK != 0,
        }
    }

    /// Encode back into a native state mask
    pub fn to_state_mask(self) -> u32 {
        let mut state = 0;
        if self.shift {
            state |= Self::SHIFT_MASK;
        }
        if self.ctrl {
            state |= Self::CONTROL_MASK;
        }
        if self.alt {
            state |= Self::ALT_MASK;
        }
        if self.meta {
            state |= Self::META_MASK;
        }
        state
    }

    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Check if only shift is held
    pub fn shift_only(&self) -> bool {
        self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Check if only ctrl is held
    pub fn ctrl_only(&self) -> bool {
        !self.shift && self.ctrl && !self.alt && !self.meta
    }
}

// ============================================================================
// Pointer Events
// ============================================================================

/// A normalized pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    /// X position in window pixels
    pub x: f32,
    /// Y position in window pixels
    pub y: f32,
    /// Button involved, [`Button::None`] for motion
    pub button: Button,
    /// Press, release or motion
    pub direction: Direction,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Build a pointer event from raw native callback arguments
    pub fn from_native(x: f32, y: f32, button: u32, state: u32, direction: Direction) -> Self {
        Self {
            x,
            y,
            button: Button::from_code(button),
            direction,
            modifiers: Modifiers::from_state_mask(state),
        }
    }
}
