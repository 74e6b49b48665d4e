//! Pointer input events
//!
//! These are windowing-system independent; the application translates its
//! native events into them.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifiers held during a pointer event
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        /// Command on macOS, Windows key elsewhere
        const META = 1 << 3;
    }
}

/// Pointer button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left mouse button
    Primary,
    /// Usually the right mouse button
    Secondary,
    /// Usually the wheel button
    Auxiliary,
}

/// Pointer position in surface pixels, origin at the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for PointerPosition {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A pointer event delivered to controls
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down {
        button: PointerButton,
        position: PointerPosition,
        modifiers: Modifiers,
    },
    Move {
        position: PointerPosition,
        modifiers: Modifiers,
    },
    Up {
        button: PointerButton,
        position: PointerPosition,
        modifiers: Modifiers,
    },
    /// Scroll; positive `delta_y` scrolls towards the user (zoom out)
    Wheel {
        delta_y: f32,
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    /// Modifiers held when the event fired
    pub fn modifiers(&self) -> Modifiers {
        match *self {
            Self::Down { modifiers, .. }
            | Self::Move { modifiers, .. }
            | Self::Up { modifiers, .. }
            | Self::Wheel { modifiers, .. } => modifiers,
        }
    }

    /// Pointer position, if the event has one
    pub fn position(&self) -> Option<PointerPosition> {
        match *self {
            Self::Down { position, .. } | Self::Move { position, .. } | Self::Up { position, .. } => {
                Some(position)
            }
            Self::Wheel { .. } => None,
        }
    }
}
