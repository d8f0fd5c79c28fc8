//! Raw device state, sampled once per tick.

use super::keys::{GamePadButton, Key, MouseButton};

/// Mouse state as reported by the host, in physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseSnapshot {
    /// Cursor X.
    pub x: i32,
    /// Cursor Y.
    pub y: i32,
    /// Cumulative scroll wheel value (delta is computed between samples).
    pub scroll_wheel: i32,
    /// Held buttons, one bit per [`MouseButton::index`].
    pub buttons: u8,
}

impl MouseSnapshot {
    /// Returns true if the button is held.
    #[must_use]
    pub const fn is_down(&self, button: MouseButton) -> bool {
        (self.buttons & button.mask()) != 0
    }

    /// Sets a button's held state.
    pub fn set(&mut self, button: MouseButton, down: bool) {
        if down {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }
}

/// One gamepad's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamePadSnapshot {
    /// Pad is connected.
    pub connected: bool,
    /// Held digital buttons.
    pub buttons: Vec<GamePadButton>,
    /// Left stick (x right, y up), each axis in -1..1.
    pub left_stick: (f32, f32),
    /// Right stick (x right, y up).
    pub right_stick: (f32, f32),
    /// Left trigger in 0..1.
    pub left_trigger: f32,
    /// Right trigger in 0..1.
    pub right_trigger: f32,
}

/// Everything the input system reads in one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Held keyboard keys.
    pub keys: Vec<Key>,
    /// Mouse state.
    pub mouse: MouseSnapshot,
    /// Gamepads, indexed by player.
    pub gamepads: Vec<GamePadSnapshot>,
}

impl InputSnapshot {
    /// Returns a copy with the key held.
    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
        self
    }

    /// Returns a copy with the cursor moved.
    #[must_use]
    pub fn with_mouse_at(mut self, x: i32, y: i32) -> Self {
        self.mouse.x = x;
        self.mouse.y = y;
        self
    }

    /// Returns a copy with the button held.
    #[must_use]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.mouse.set(button, true);
        self
    }
}

/// Host-side source of raw device state.
pub trait InputSource {
    /// Samples the current state of every device.
    fn snapshot(&mut self) -> InputSnapshot;
}

impl InputSource for InputSnapshot {
    fn snapshot(&mut self) -> InputSnapshot {
        self.clone()
    }
}
