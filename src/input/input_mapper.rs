//! Input mapping from raw window events
//!
//! Pointer input becomes [`HostEvent`]s for page listeners; a few special
//! keys map to application actions.

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use scenekit_input::{Modifiers, PointerButton, PointerEvent, PointerPosition};

use crate::host::{ClickEvent, HostEvent};

/// Pixels scrolled per wheel line
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Actions triggered by special keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
}

/// Maps window events to page events
///
/// Window events carry either the cursor position or the modifier state but
/// rarely both, so the mapper remembers the latest of each.
#[derive(Debug, Default)]
pub struct InputMapper {
    modifiers: Modifiers,
    cursor: PointerPosition,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn cursor(&self) -> PointerPosition {
        self.cursor
    }

    /// Page events for a window event; usually zero or one
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Vec<HostEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.set_modifiers(modifiers.state());
                Vec::new()
            }
            WindowEvent::CursorMoved { position, .. } => {
                vec![self.cursor_moved(position.x as f32, position.y as f32)]
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse_button(*button, *state),
            WindowEvent::MouseWheel { delta, .. } => vec![self.wheel(*delta)],
            _ => Vec::new(),
        }
    }

    pub fn set_modifiers(&mut self, state: ModifiersState) {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, state.shift_key());
        modifiers.set(Modifiers::CONTROL, state.control_key());
        modifiers.set(Modifiers::ALT, state.alt_key());
        modifiers.set(Modifiers::META, state.super_key());
        self.modifiers = modifiers;
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) -> HostEvent {
        self.cursor = PointerPosition::new(x, y);
        HostEvent::Pointer(PointerEvent::Move {
            position: self.cursor,
            modifiers: self.modifiers,
        })
    }

    /// Releasing the left button also produces a click
    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) -> Vec<HostEvent> {
        let Some(pointer_button) = map_button(button) else {
            return Vec::new();
        };
        let position = self.cursor;
        let modifiers = self.modifiers;

        match state {
            ElementState::Pressed => vec![HostEvent::Pointer(PointerEvent::Down {
                button: pointer_button,
                position,
                modifiers,
            })],
            ElementState::Released => {
                let mut events = vec![HostEvent::Pointer(PointerEvent::Up {
                    button: pointer_button,
                    position,
                    modifiers,
                })];
                if pointer_button == PointerButton::Primary {
                    events.push(HostEvent::Click(ClickEvent::new(position, modifiers)));
                }
                events
            }
        }
    }

    /// Positive `delta_y` scrolls down, i.e. away from the content
    pub fn wheel(&mut self, delta: MouseScrollDelta) -> HostEvent {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
            MouseScrollDelta::PixelDelta(position) => -position.y as f32,
        };
        HostEvent::Pointer(PointerEvent::Wheel {
            delta_y,
            modifiers: self.modifiers,
        })
    }

    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys on press, `None` otherwise
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            _ => None,
        }
    }

    /// Action for a keyboard window event, if any
    pub fn map_key_event(event: &WindowEvent) -> Option<InputAction> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(key) => Self::map_keyboard(key, event.state),
                PhysicalKey::Unidentified(_) => None,
            },
            _ => None,
        }
    }
}

fn map_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Auxiliary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_other_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Space, KeyCode::ShiftLeft] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
    }

    #[test]
    fn test_cursor_and_modifiers_tracked() {
        let mut mapper = InputMapper::new();
        mapper.set_modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
        let event = mapper.cursor_moved(10.0, 20.0);

        let expected_modifiers = Modifiers::SHIFT | Modifiers::META;
        assert_eq!(
            event,
            HostEvent::Pointer(PointerEvent::Move {
                position: PointerPosition::new(10.0, 20.0),
                modifiers: expected_modifiers,
            })
        );
        assert_eq!(mapper.modifiers(), expected_modifiers);
    }

    #[test]
    fn test_left_release_clicks() {
        let mut mapper = InputMapper::new();
        mapper.cursor_moved(5.0, 6.0);
        mapper.set_modifiers(ModifiersState::SHIFT);

        let pressed = mapper.mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(pressed.len(), 1);

        let released = mapper.mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(released.len(), 2);
        match released[1] {
            HostEvent::Click(click) => {
                assert!(click.shift_key());
                assert_eq!(click.position, PointerPosition::new(5.0, 6.0));
            }
            other => panic!("expected click, got {:?}", other),
        }
    }

    #[test]
    fn test_right_release_does_not_click() {
        let mut mapper = InputMapper::new();
        let released = mapper.mouse_button(MouseButton::Right, ElementState::Released);
        assert_eq!(released.len(), 1);
        assert!(matches!(
            released[0],
            HostEvent::Pointer(PointerEvent::Up { button: PointerButton::Secondary, .. })
        ));
        assert!(mapper.mouse_button(MouseButton::Back, ElementState::Pressed).is_empty());
    }

    #[test]
    fn test_wheel_direction() {
        let mut mapper = InputMapper::new();
        // Scrolling up (away from the user) dollies in
        let up = mapper.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert!(matches!(up, HostEvent::Pointer(PointerEvent::Wheel { delta_y, .. }) if delta_y == -100.0));

        let pixels = mapper.wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -30.0)));
        assert!(matches!(pixels, HostEvent::Pointer(PointerEvent::Wheel { delta_y, .. }) if delta_y == 30.0));
    }
}
