//! Platform-agnostic pointer input routed to an [`OrbitController`].
//!
//! Hosts translate their windowing events into [`InputEvent`] values; the
//! [`InputHandler`] tracks drag state and turns cursor motion into orbit or
//! pan, and scroll into zoom.

use glam::Vec2;

use super::controller::OrbitController;

/// Pixel-delta scroll is scaled down to line units by this factor.
const PIXEL_SCROLL_SCALE: f32 = 0.01;

/// Platform-agnostic input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel in line units (positive = zoom in).
    Scroll {
        /// Scroll amount.
        delta: f32,
    },
    /// Scroll from a touchpad in pixels (positive = zoom in).
    PixelScroll {
        /// Scroll amount in pixels.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button. Drag to orbit, shift-drag to pan.
    Left,
    /// Secondary (right) mouse button. Drag to pan.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Orbit,
    Pan,
}

/// Tracks pointer state between events.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_cursor: Option<Vec2>,
    left_down: bool,
    right_down: bool,
    shift: bool,
}

impl InputHandler {
    /// Handler with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn drag_mode(&self) -> Option<DragMode> {
        if self.right_down || (self.left_down && self.shift) {
            Some(DragMode::Pan)
        } else if self.left_down {
            Some(DragMode::Orbit)
        } else {
            None
        }
    }

    /// Feed one event. Returns true if the camera consumed it.
    ///
    /// Button and modifier state is always tracked; motion and scroll are
    /// only consumed while the controller accepts input.
    pub fn handle_event(
        &mut self,
        controller: &mut OrbitController,
        event: InputEvent,
    ) -> bool {
        match event {
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_down = pressed,
                    MouseButton::Right => self.right_down = pressed,
                    MouseButton::Middle => return false,
                }
                controller.is_enabled()
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift = shift;
                false
            }
            InputEvent::CursorMoved { x, y } => {
                let current = Vec2::new(x, y);
                let delta = self
                    .last_cursor
                    .map_or(Vec2::ZERO, |last| current - last);
                self.last_cursor = Some(current);

                match self.drag_mode() {
                    Some(DragMode::Orbit) => controller.rotate(delta),
                    Some(DragMode::Pan) => controller.pan(delta),
                    None => false,
                }
            }
            InputEvent::Scroll { delta } => controller.zoom(delta),
            InputEvent::PixelScroll { delta } => {
                controller.zoom(delta * PIXEL_SCROLL_SCALE)
            }
        }
    }
}
