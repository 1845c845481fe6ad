//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! drag detection, modifier keys). It is the only thing that sits between
//! raw window events and the engine's command queue.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::command::ViewerCommand;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`ViewerCommand`]s.
pub struct InputProcessor {
    mouse_pos: (f32, f32),
    mouse_pressed: bool,
    shift_pressed: bool,
    dragging: bool,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            mouse_pos: (0.0, 0.0),
            mouse_pressed: false,
            shift_pressed: false,
            dragging: false,
            key_bindings,
        }
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.mouse_pos
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => {
                Some(ViewerCommand::Zoom { delta })
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved — compute the delta and produce an orbit command while
    /// the primary button is held.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewerCommand> {
        let delta =
            Vec2::new(x - self.mouse_pos.0, y - self.mouse_pos.1);
        self.mouse_pos = (x, y);

        if self.mouse_pressed {
            if delta.length_squared() > 1.0 {
                self.dragging = true;
            }
            return Some(ViewerCommand::RotateCamera { delta });
        }

        None
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewerCommand> {
        if button != MouseButton::Left {
            return None;
        }
        self.mouse_pressed = pressed;
        if !pressed {
            self.dragging = false;
        }
        None
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_produces_rotate_commands() {
        let mut p = InputProcessor::new();
        assert!(p
            .handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 })
            .is_none());

        let _ = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let cmd =
            p.handle_event(InputEvent::CursorMoved { x: 25.0, y: 4.0 });
        assert_eq!(
            cmd,
            Some(ViewerCommand::RotateCamera {
                delta: Vec2::new(15.0, -6.0)
            })
        );
        assert!(p.dragging());

        let _ = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert!(!p.dragging());
        assert!(p
            .handle_event(InputEvent::CursorMoved { x: 30.0, y: 4.0 })
            .is_none());
    }

    #[test]
    fn scroll_maps_to_zoom() {
        let mut p = InputProcessor::new();
        let cmd = p.handle_event(InputEvent::Scroll { delta: 1.5 });
        assert_eq!(cmd, Some(ViewerCommand::Zoom { delta: 1.5 }));
    }

    #[test]
    fn right_button_is_ignored() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        assert!(!p.mouse_pressed());
        assert!(p
            .handle_event(InputEvent::CursorMoved { x: 5.0, y: 5.0 })
            .is_none());
    }

    #[test]
    fn key_lookup_uses_bindings() {
        let p = InputProcessor::new();
        assert_eq!(p.handle_key_press("KeyQ"), Some(ViewerCommand::ResetView));
        assert_eq!(p.handle_key_press("F13"), None);
    }
}
