//! Input handling: translates raw keyboard, pointer and window events into
//! scene commands.

use glam::Vec2;
use std::collections::HashSet;

/// Vertical thrust direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

/// Commands the scene controller understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneInput {
    /// Forward flight key went down or up.
    Forward { pressed: bool },
    /// Climb/descend key went down or up.
    Vertical { direction: VerticalDirection, pressed: bool },
    /// Drop a box.
    Drop,
    /// Camera preset 1..=6.
    ProjectionPreset(u8),
    /// Toggle wireframe (true) or solid (false) rendering.
    Wireframe(bool),
    DragStart(Vec2),
    DragMove(Vec2),
    DragEnd(Vec2),
    /// Wheel movement; positive zooms in.
    Zoom(f32),
    Resize { width: u32, height: u32 },
    /// Set the free-orbit camera angles directly, in degrees.
    SetAngles { yaw: f32, pitch: f32 },
    Exit,
}

/// Key assignments for scene commands.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub ascend: KeyCode,
    pub descend: KeyCode,
    pub drop: KeyCode,
    pub wireframe: KeyCode,
    pub solid: KeyCode,
    pub exit: KeyCode,
    /// Presets 1..=6 in order.
    pub presets: [KeyCode; 6],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::ArrowLeft,
            ascend: KeyCode::ArrowUp,
            descend: KeyCode::ArrowDown,
            drop: KeyCode::Space,
            wireframe: KeyCode::KeyW,
            solid: KeyCode::KeyS,
            exit: KeyCode::Escape,
            presets: [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::Digit5,
                KeyCode::Digit6,
            ],
        }
    }
}

/// Collects scene commands from raw events until the frame drains them.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Commands produced since the last drain.
    pending: Vec<SceneInput>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event. `repeat` marks OS auto-repeat of a held key.
    ///
    /// Movement keys re-emit on repeat so a held key re-arms its target once
    /// the vehicle is able to follow it; drop and preset keys fire once per press.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        let pressed = state == ElementState::Pressed;
        let fresh = pressed && !repeat && !self.keys_held.contains(&key);
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        let b = &self.bindings;
        let command = if key == b.forward {
            Some(SceneInput::Forward { pressed })
        } else if key == b.ascend {
            Some(SceneInput::Vertical { direction: VerticalDirection::Up, pressed })
        } else if key == b.descend {
            Some(SceneInput::Vertical { direction: VerticalDirection::Down, pressed })
        } else if !fresh {
            None
        } else if key == b.drop {
            Some(SceneInput::Drop)
        } else if key == b.wireframe {
            Some(SceneInput::Wireframe(true))
        } else if key == b.solid {
            Some(SceneInput::Wireframe(false))
        } else if key == b.exit {
            Some(SceneInput::Exit)
        } else {
            b.presets
                .iter()
                .position(|&k| k == key)
                .map(|i| SceneInput::ProjectionPreset(i as u8 + 1))
        };

        if let Some(command) = command {
            log::trace!("{:?} {:?} -> {:?}", key, state, command);
            self.pending.push(command);
        }
    }

    /// Process a mouse button event. The left button drives camera drags.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.mouse_held.insert(button) && button == MouseButton::Left {
                    self.pending.push(SceneInput::DragStart(self.mouse_position));
                }
            }
            ElementState::Released => {
                if self.mouse_held.remove(&button) && button == MouseButton::Left {
                    self.pending.push(SceneInput::DragEnd(self.mouse_position));
                }
            }
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
        if self.is_mouse_held(MouseButton::Left) {
            self.pending.push(SceneInput::DragMove(self.mouse_position));
        }
    }

    /// Process wheel movement (positive = away from the user).
    pub fn process_scroll(&mut self, delta_y: f32) {
        if delta_y != 0.0 {
            self.pending.push(SceneInput::Zoom(delta_y));
        }
    }

    pub fn process_resize(&mut self, width: u32, height: u32) {
        self.pending.push(SceneInput::Resize { width, height });
    }

    /// Take every command collected since the last call, in arrival order.
    pub fn drain(&mut self) -> Vec<SceneInput> {
        std::mem::take(&mut self.pending)
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
