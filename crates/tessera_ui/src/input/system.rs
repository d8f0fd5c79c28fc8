//! Edge-triggered input.
//!
//! Every key, mouse button and gamepad button runs the same state machine:
//!
//! ```text
//!   Released ──(down)──▶ Pressed     emits Down + Press, countdown = delay
//!   Pressed  ──(held)──▶ Pressed     countdown -= dt; each time it drops
//!                                    below zero: Press, countdown += rate
//!   Pressed  ──(up)────▶ Released    emits Up, countdown reset
//! ```
//!
//! A button held for `delay + n × rate` therefore produces exactly `n`
//! repeated presses, independent of how the time was split into ticks.

use std::collections::BTreeMap;
use std::time::Duration;

use tessera_core::Point;

use super::keys::{GamePadButton, Key, Modifiers, MouseButton};
use super::snapshot::{GamePadSnapshot, InputSnapshot, MouseSnapshot};
use crate::config::InputConfig;

/// An edge-triggered input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key went down.
    KeyDown {
        /// The key.
        key: Key,
        /// Modifiers at the time.
        modifiers: Modifiers,
    },
    /// Key pressed (initial press and every repeat).
    KeyPress {
        /// The key.
        key: Key,
        /// Modifiers at the time.
        modifiers: Modifiers,
    },
    /// Key released.
    KeyUp {
        /// The key.
        key: Key,
        /// Modifiers at the time.
        modifiers: Modifiers,
    },
    /// Mouse button went down.
    MouseDown {
        /// The button.
        button: MouseButton,
        /// Logical cursor position.
        position: Point,
    },
    /// Mouse button pressed (initial press and every repeat).
    MousePress {
        /// The button.
        button: MouseButton,
        /// Logical cursor position.
        position: Point,
    },
    /// Mouse button released.
    MouseUp {
        /// The button.
        button: MouseButton,
        /// Logical cursor position.
        position: Point,
    },
    /// Cursor moved.
    MouseMove {
        /// New logical position.
        position: Point,
        /// Offset from the previous position.
        delta: Point,
    },
    /// Scroll wheel turned.
    MouseScroll {
        /// Wheel delta since the previous sample (positive = away from the user).
        delta: i32,
        /// Logical cursor position.
        position: Point,
    },
    /// Gamepad button went down.
    GamePadDown {
        /// Player index.
        player: usize,
        /// The button.
        button: GamePadButton,
    },
    /// Gamepad button pressed (initial press and every repeat).
    GamePadPress {
        /// Player index.
        player: usize,
        /// The button.
        button: GamePadButton,
    },
    /// Gamepad button released.
    GamePadUp {
        /// Player index.
        player: usize,
        /// The button.
        button: GamePadButton,
    },
}

/// Result of advancing one button for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    None,
    Down,
    Repeat(u32),
    Up,
}

/// Per-button debounce state.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonTracker {
    pressed: bool,
    countdown_ms: f64,
}

impl ButtonTracker {
    fn step(&mut self, down: bool, elapsed_ms: f64, delay_ms: f64, rate_ms: f64) -> Edge {
        match (self.pressed, down) {
            (false, true) => {
                self.pressed = true;
                self.countdown_ms = delay_ms;
                Edge::Down
            }
            (true, true) => {
                self.countdown_ms -= elapsed_ms;
                let mut repeats = 0;
                while self.countdown_ms < 0.0 {
                    repeats += 1;
                    self.countdown_ms += rate_ms;
                }
                if repeats == 0 {
                    Edge::None
                } else {
                    Edge::Repeat(repeats)
                }
            }
            (true, false) => {
                self.pressed = false;
                self.countdown_ms = 0.0;
                Edge::Up
            }
            (false, false) => Edge::None,
        }
    }
}

/// Polls raw device state and turns it into [`InputEvent`]s.
#[derive(Debug, Clone)]
pub struct InputSystem {
    config: InputConfig,
    keys: BTreeMap<Key, ButtonTracker>,
    mouse_buttons: [ButtonTracker; MouseButton::COUNT],
    gamepads: Vec<BTreeMap<GamePadButton, ButtonTracker>>,
    last_mouse: MouseSnapshot,
    position: Point,
    enabled: bool,
}

impl InputSystem {
    /// Creates an input system with the given timing.
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            keys: BTreeMap::new(),
            mouse_buttons: [ButtonTracker::default(); MouseButton::COUNT],
            gamepads: Vec::new(),
            last_mouse: MouseSnapshot::default(),
            position: Point::ZERO,
            enabled: true,
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Enables or disables event generation (state is still tracked).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Last logical cursor position.
    #[must_use]
    pub const fn mouse_position(&self) -> Point {
        self.position
    }

    /// Maps a raw device position to logical render-target pixels.
    #[must_use]
    pub fn transform(&self, x: i32, y: i32) -> Point {
        let c = &self.config;
        Point::new(
            ((x - c.offset_x) as f32 * c.ratio_x) as i32,
            ((y - c.offset_y) as f32 * c.ratio_y) as i32,
        )
    }

    /// Advances every tracked input by `elapsed` and returns the resulting events.
    pub fn update(&mut self, snapshot: &InputSnapshot, elapsed: Duration) -> Vec<InputEvent> {
        let elapsed_ms = elapsed.as_micros() as f64 / 1000.0;
        let mut events = Vec::new();

        self.update_keys(snapshot, elapsed_ms, &mut events);
        self.update_mouse(snapshot.mouse, elapsed_ms, &mut events);
        self.update_gamepads(&snapshot.gamepads, elapsed_ms, &mut events);

        if self.enabled {
            events
        } else {
            Vec::new()
        }
    }

    fn timing(&self) -> (f64, f64) {
        (
            f64::from(self.config.repeat_delay_ms),
            f64::from(self.config.repeat_rate_ms.max(1)),
        )
    }

    fn update_keys(
        &mut self,
        snapshot: &InputSnapshot,
        elapsed_ms: f64,
        events: &mut Vec<InputEvent>,
    ) {
        let (delay, rate) = self.timing();
        let modifiers = Modifiers::from_keys(&snapshot.keys);

        for key in &snapshot.keys {
            self.keys.entry(*key).or_default();
        }

        let mut released = Vec::new();
        for (&key, tracker) in &mut self.keys {
            let down = snapshot.keys.contains(&key);
            match tracker.step(down, elapsed_ms, delay, rate) {
                Edge::Down => {
                    events.push(InputEvent::KeyDown { key, modifiers });
                    events.push(InputEvent::KeyPress { key, modifiers });
                }
                Edge::Repeat(n) => {
                    for _ in 0..n {
                        events.push(InputEvent::KeyPress { key, modifiers });
                    }
                }
                Edge::Up => {
                    events.push(InputEvent::KeyUp { key, modifiers });
                    released.push(key);
                }
                Edge::None => {}
            }
        }
        for key in released {
            self.keys.remove(&key);
        }
    }

    fn update_mouse(
        &mut self,
        mouse: MouseSnapshot,
        elapsed_ms: f64,
        events: &mut Vec<InputEvent>,
    ) {
        let (delay, rate) = self.timing();
        let position = self.transform(mouse.x, mouse.y);

        // Movement first, so button events carry the cursor's new position.
        if position != self.position {
            events.push(InputEvent::MouseMove {
                position,
                delta: position - self.position,
            });
            self.position = position;
        }

        for button in MouseButton::ALL {
            let tracker = &mut self.mouse_buttons[button.index()];
            match tracker.step(mouse.is_down(button), elapsed_ms, delay, rate) {
                Edge::Down => {
                    events.push(InputEvent::MouseDown { button, position });
                    events.push(InputEvent::MousePress { button, position });
                }
                Edge::Repeat(n) => {
                    for _ in 0..n {
                        events.push(InputEvent::MousePress { button, position });
                    }
                }
                Edge::Up => events.push(InputEvent::MouseUp { button, position }),
                Edge::None => {}
            }
        }

        let delta = mouse.scroll_wheel - self.last_mouse.scroll_wheel;
        if delta != 0 {
            events.push(InputEvent::MouseScroll { delta, position });
        }

        self.last_mouse = mouse;
    }

    fn update_gamepads(
        &mut self,
        pads: &[GamePadSnapshot],
        elapsed_ms: f64,
        events: &mut Vec<InputEvent>,
    ) {
        let (delay, rate) = self.timing();
        let magnitude = self.config.click_magnitude;

        if self.gamepads.len() < pads.len() {
            self.gamepads.resize_with(pads.len(), BTreeMap::new);
        }

        for (player, trackers) in self.gamepads.iter_mut().enumerate() {
            let held = pads
                .get(player)
                .filter(|pad| pad.connected)
                .map(|pad| held_buttons(pad, magnitude))
                .unwrap_or_default();

            for button in &held {
                trackers.entry(*button).or_default();
            }

            let mut released = Vec::new();
            for (&button, tracker) in trackers.iter_mut() {
                match tracker.step(held.contains(&button), elapsed_ms, delay, rate) {
                    Edge::Down => {
                        events.push(InputEvent::GamePadDown { player, button });
                        events.push(InputEvent::GamePadPress { player, button });
                    }
                    Edge::Repeat(n) => {
                        for _ in 0..n {
                            events.push(InputEvent::GamePadPress { player, button });
                        }
                    }
                    Edge::Up => {
                        events.push(InputEvent::GamePadUp { player, button });
                        released.push(button);
                    }
                    Edge::None => {}
                }
            }
            for button in released {
                trackers.remove(&button);
            }
        }
    }
}

/// Digital buttons plus pseudo-buttons from sticks and triggers.
fn held_buttons(pad: &GamePadSnapshot, magnitude: f32) -> Vec<GamePadButton> {
    let mut held = pad.buttons.clone();

    let (lx, ly) = pad.left_stick;
    let (rx, ry) = pad.right_stick;
    let analog = [
        (lx < -magnitude, GamePadButton::LeftStickLeft),
        (lx > magnitude, GamePadButton::LeftStickRight),
        (ly > magnitude, GamePadButton::LeftStickUp),
        (ly < -magnitude, GamePadButton::LeftStickDown),
        (rx < -magnitude, GamePadButton::RightStickLeft),
        (rx > magnitude, GamePadButton::RightStickRight),
        (ry > magnitude, GamePadButton::RightStickUp),
        (ry < -magnitude, GamePadButton::RightStickDown),
        (pad.left_trigger > magnitude, GamePadButton::LeftTrigger),
        (pad.right_trigger > magnitude, GamePadButton::RightTrigger),
    ];
    for (active, button) in analog {
        if active && !held.contains(&button) {
            held.push(button);
        }
    }

    held
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn count(events: &[InputEvent], pred: impl Fn(&InputEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_key_repeat_timing() {
        let config = InputConfig::default();
        let (delay, rate) = (u64::from(config.repeat_delay_ms), u64::from(config.repeat_rate_ms));
        let mut input = InputSystem::new(config);
        let held = InputSnapshot::default().with_key(Key::A);

        let mut events = input.update(&held, ms(0));
        // Hold for delay + 3 × rate in uneven ticks.
        let mut remaining = delay + 3 * rate;
        while remaining > 0 {
            let step = remaining.min(17);
            events.extend(input.update(&held, ms(step)));
            remaining -= step;
        }

        assert_eq!(count(&events, |e| matches!(e, InputEvent::KeyDown { key: Key::A, .. })), 1);
        assert_eq!(count(&events, |e| matches!(e, InputEvent::KeyPress { key: Key::A, .. })), 4);
        assert_eq!(count(&events, |e| matches!(e, InputEvent::KeyUp { .. })), 0);
    }

    #[test]
    fn test_release_emits_up_and_resets() {
        let mut input = InputSystem::new(InputConfig::default());
        let held = InputSnapshot::default().with_key(Key::Enter);

        input.update(&held, ms(0));
        input.update(&held, ms(300));
        let events = input.update(&InputSnapshot::default(), ms(16));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], InputEvent::KeyUp { key: Key::Enter, .. }));

        // A fresh press starts the full delay again.
        let events = input.update(&held, ms(16));
        assert_eq!(count(&events, |e| matches!(e, InputEvent::KeyDown { .. })), 1);
        let events = input.update(&held, ms(400));
        assert_eq!(count(&events, |e| matches!(e, InputEvent::KeyPress { .. })), 0);
    }

    #[test]
    fn test_mouse_move_is_edge_triggered() {
        let mut input = InputSystem::new(InputConfig::default());
        let at = InputSnapshot::default().with_mouse_at(10, 20);

        let events = input.update(&at, ms(16));
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            InputEvent::MouseMove {
                position: Point { x: 10, y: 20 },
                delta: Point { x: 10, y: 20 },
            }
        ));

        assert!(input.update(&at, ms(16)).is_empty());
    }

    #[test]
    fn test_scroll_delta_between_samples() {
        let mut input = InputSystem::new(InputConfig::default());
        let mut snap = InputSnapshot::default();

        snap.mouse.scroll_wheel = 120;
        let events = input.update(&snap, ms(16));
        assert!(matches!(events[0], InputEvent::MouseScroll { delta: 120, .. }));
        assert!(input.update(&snap, ms(16)).is_empty());

        snap.mouse.scroll_wheel = 0;
        let events = input.update(&snap, ms(16));
        assert!(matches!(events[0], InputEvent::MouseScroll { delta: -120, .. }));
    }

    #[test]
    fn test_offset_and_ratio_transform() {
        let config = InputConfig {
            offset_x: 100,
            offset_y: 50,
            ratio_x: 0.5,
            ratio_y: 2.0,
            ..InputConfig::default()
        };
        let input = InputSystem::new(config);
        assert_eq!(input.transform(300, 60), Point::new(100, 20));
    }

    #[test]
    fn test_stick_becomes_pseudo_button() {
        let mut input = InputSystem::new(InputConfig::default());
        let mut snap = InputSnapshot::default();
        snap.gamepads.push(GamePadSnapshot {
            connected: true,
            left_stick: (-0.9, 0.1),
            ..GamePadSnapshot::default()
        });

        let events = input.update(&snap, ms(16));
        assert!(events.contains(&InputEvent::GamePadDown {
            player: 0,
            button: GamePadButton::LeftStickLeft,
        }));

        snap.gamepads[0].left_stick = (-0.2, 0.0);
        let events = input.update(&snap, ms(16));
        assert_eq!(
            events,
            vec![InputEvent::GamePadUp { player: 0, button: GamePadButton::LeftStickLeft }]
        );
    }

    #[test]
    fn test_mouse_button_lifecycle() {
        let mut input = InputSystem::new(InputConfig::default());
        let down = InputSnapshot::default().with_button(MouseButton::Right);

        let right = MouseButton::Right;
        let events = input.update(&down, ms(16));
        let downs = count(&events, |e| {
            matches!(e, InputEvent::MouseDown { button, .. } if *button == right)
        });
        assert_eq!(downs, 1);
        assert_eq!(count(&events, |e| matches!(e, InputEvent::MousePress { .. })), 1);

        let events = input.update(&InputSnapshot::default(), ms(16));
        let ups = count(&events, |e| {
            matches!(e, InputEvent::MouseUp { button, .. } if *button == right)
        });
        assert_eq!(ups, 1);
    }
}
