//! Events delivered to page listeners

use scenekit_input::{Modifiers, PointerEvent, PointerPosition};

/// A click: primary button pressed and released
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickEvent {
    pub position: PointerPosition,
    pub modifiers: Modifiers,
}

impl ClickEvent {
    pub fn new(position: PointerPosition, modifiers: Modifiers) -> Self {
        Self { position, modifiers }
    }

    #[inline]
    pub fn shift_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Events the page dispatches
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The window or body changed size; listeners re-read their container
    Resize,
    Click(ClickEvent),
    Pointer(PointerEvent),
}

/// Which listeners an event is delivered to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Click,
    Pointer,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Resize => EventKind::Resize,
            HostEvent::Click(_) => EventKind::Click,
            HostEvent::Pointer(_) => EventKind::Pointer,
        }
    }
}
