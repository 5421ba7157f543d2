//! Per-frame pointer state.

use glam::Vec2;
use std::collections::HashSet;

/// Manages pointer state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,

    /// Cursor position in window coordinates.
    mouse_position: Vec2,
    /// Cursor movement accumulated this frame.
    mouse_delta: Vec2,
    /// Whether the cursor is inside the window.
    cursor_inside: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        let position = Vec2::new(position.0 as f32, position.1 as f32);
        if self.cursor_inside {
            self.mouse_delta += position - self.mouse_position;
        }
        self.mouse_position = position;
        self.cursor_inside = true;
    }

    /// The cursor left the window; drags stop until it comes back.
    pub fn process_cursor_left(&mut self) {
        self.cursor_inside = false;
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Get the mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Get the cursor movement for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    pub fn is_cursor_inside(&self) -> bool {
        self.cursor_inside
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_one_shot_hold_persists() {
        let mut input = InputState::new();
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(input.is_mouse_pressed(MouseButton::Left));
        assert!(input.is_mouse_held(MouseButton::Left));

        input.begin_frame();
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(!input.is_mouse_pressed(MouseButton::Left));
        assert!(input.is_mouse_held(MouseButton::Left));

        input.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(input.is_mouse_released(MouseButton::Left));
        assert!(!input.is_mouse_held(MouseButton::Left));
    }

    #[test]
    fn cursor_delta_accumulates_per_frame() {
        let mut input = InputState::new();
        input.process_cursor_position((10.0, 10.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        input.process_cursor_position((13.0, 14.0));
        input.process_cursor_position((15.0, 14.0));
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, 4.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(15.0, 14.0));

        input.process_cursor_left();
        input.process_cursor_position((100.0, 100.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }
}
