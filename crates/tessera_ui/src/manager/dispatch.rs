//! Routing input edges to controls.
//!
//! Mouse input goes to the topmost control under the cursor, found by
//! walking the z-order back to front. A control only counts as hit where all
//! of its ancestors' client areas contain the cursor too, up to the nearest
//! detached ancestor. While a modal window is up only it and its descendants
//! are eligible, and a press that hits nothing eligible raises
//! `UiEvent::InvalidInput`. Mouse-down records the control as the owner of
//! that button, and later move/press/up edges go to the owner. Keyboard and
//! gamepad input go to the focused control.

use tessera_core::Point;

use super::Direction;
use crate::control::{ControlFlags, ControlId};
use crate::event::{EventKind, UiEvent};
use crate::input::{GamePadButton, InputEvent, Key, Modifiers, MouseButton};
use crate::skin::cursors;
use crate::widgets::ControlKind;
use crate::Manager;

impl Manager {
    /// Topmost hittable control at `position`. With `gated`, controls outside
    /// the active modal window are skipped.
    #[must_use]
    pub fn find_target(&self, position: Point, gated: bool) -> Option<ControlId> {
        let modal = if gated { self.modal() } else { None };
        self.order.iter().rev().copied().find(|id| {
            let Some(control) = self.controls.get(*id) else {
                return false;
            };
            !control.passive()
                && self.check_position(*id, position)
                && self.inside_ancestor_clips(*id, position)
                && modal.map_or(true, |m| *id == m || self.is_ancestor(m, *id))
        })
    }

    fn inside_ancestor_clips(&self, id: ControlId, position: Point) -> bool {
        let mut current = id;
        loop {
            let Some(control) = self.controls.get(current) else {
                return false;
            };
            if control.detached() {
                return true;
            }
            let Some(parent) = control.parent else {
                return true;
            };
            if !self.client_rect(parent).contains(position) {
                return false;
            }
            current = parent;
        }
    }

    /// Routes one input edge.
    pub(crate) fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseMove { position, .. } => self.on_mouse_move(position),
            InputEvent::MouseDown { button, position } => self.on_mouse_down(button, position),
            InputEvent::MousePress { button, position } => self.on_mouse_press(button, position),
            InputEvent::MouseUp { button, position } => self.on_mouse_up(button, position),
            InputEvent::MouseScroll { delta, position } => self.on_mouse_scroll(delta, position),
            InputEvent::KeyDown { key, modifiers } => {
                self.hide_tooltip();
                self.to_focused(EventKind::KeyDown { key, modifiers });
            }
            InputEvent::KeyPress { key, modifiers } => self.on_key_press(key, modifiers),
            InputEvent::KeyUp { key, modifiers } => {
                self.hide_tooltip();
                self.to_focused(EventKind::KeyUp { key, modifiers });
            }
            InputEvent::GamePadDown { player, button } => {
                self.to_focused(EventKind::GamePadDown { player, button });
            }
            InputEvent::GamePadPress { player, button } => self.on_gamepad_press(player, button),
            InputEvent::GamePadUp { player, button } => {
                self.to_focused(EventKind::GamePadUp { player, button });
            }
        }
    }

    /// Sends an event to the focused control if it is enabled. Returns the
    /// control.
    fn to_focused(&mut self, kind: EventKind) -> Option<ControlId> {
        let id = self.focused.filter(|f| self.is_enabled(*f))?;
        self.emit(id, kind);
        Some(id)
    }

    fn on_mouse_move(&mut self, position: Point) {
        let mut dragging = false;
        for owner in self.states.buttons.into_iter().flatten() {
            if self.is_dragging(owner) {
                self.drag_to(owner, position);
                dragging = true;
            }
        }

        let over = self.find_target(position, true);
        if over != self.states.over {
            if let Some(old) = self.states.over.filter(|old| self.contains(*old)) {
                if let Some(control) = self.controls.get_mut(old) {
                    control.flags.clear(ControlFlags::HOVERED);
                }
                self.emit(old, EventKind::MouseOut);
                self.invalidate(old);
            }
            if let Some(new) = over {
                if let Some(control) = self.controls.get_mut(new) {
                    control.flags.set(ControlFlags::HOVERED);
                }
                self.emit(new, EventKind::MouseOver);
                self.invalidate(new);
            }
            self.states.over = over;
            self.reset_tooltip(over);
        }

        let receiver = self.states.buttons[MouseButton::Left.index()].or(over);
        if let Some(id) = receiver.filter(|id| self.is_enabled(*id)) {
            self.emit(id, EventKind::MouseMove { position });
        }

        if !dragging {
            let cursor = over
                .and_then(|id| self.resize_zone_at(id, position))
                .map_or(cursors::DEFAULT, |zone| zone.cursor());
            self.set_cursor(cursor);
        }
    }

    fn on_mouse_down(&mut self, button: MouseButton, position: Point) {
        self.hide_tooltip();

        let Some(target) = self.find_target(position, true) else {
            if let Some(modal) = self.modal() {
                tracing::debug!(?modal, "mouse-down outside the modal window");
                self.push_event(UiEvent::InvalidInput { position });
            } else if self.config.auto_unfocus {
                self.focus(None);
            }
            return;
        };
        if !self.is_enabled(target) {
            return;
        }

        self.states.buttons[button.index()] = Some(target);
        self.states.click = Some(button);
        if button == MouseButton::Left {
            if let Some(control) = self.controls.get_mut(target) {
                control.flags.set(ControlFlags::PRESSED);
            }
            self.invalidate(target);
        }

        self.focus(Some(target));
        self.emit(target, EventKind::MouseDown { button, position });

        if button == MouseButton::Left {
            self.begin_drag(target, position);
        }
    }

    fn on_mouse_press(&mut self, button: MouseButton, position: Point) {
        let Some(owner) = self.states.buttons[button.index()] else {
            return;
        };
        self.emit(owner, EventKind::MousePress { button, position });
        // Fires once with the down edge and again on every repeat, so holding
        // the button on the track keeps paging.
        if button == MouseButton::Left
            && matches!(self.controls.get(owner).map(|c| &c.kind), Some(ControlKind::ScrollBar(_)))
        {
            self.page_toward(owner, position);
        }
    }

    fn on_mouse_up(&mut self, button: MouseButton, position: Point) {
        let Some(owner) = self.states.buttons[button.index()].take() else {
            return;
        };
        if button == MouseButton::Left {
            if let Some(control) = self.controls.get_mut(owner) {
                control.flags.clear(ControlFlags::PRESSED);
            }
            self.invalidate(owner);
            self.end_drag(owner);
        }
        self.emit(owner, EventKind::MouseUp { button, position });

        let still_over = self.find_target(position, true) == Some(owner);
        if still_over && self.is_enabled(owner) && !self.states.other_buttons_held(button) {
            self.register_click(owner, button);
        }
        if self.states.click == Some(button) {
            self.states.click = None;
        }
    }

    fn on_mouse_scroll(&mut self, delta: i32, position: Point) {
        let Some(target) = self.find_target(position, true) else {
            return;
        };
        if !self.is_enabled(target) {
            return;
        }
        self.emit(target, EventKind::MouseScroll { delta });
        self.scroll_by_wheel(target, delta);
    }

    fn on_key_press(&mut self, key: Key, modifiers: Modifiers) {
        self.hide_tooltip();
        let focused = self.to_focused(EventKind::KeyPress { key, modifiers });

        if let Some(id) = focused {
            if matches!(key, Key::Up | Key::Down) && self.combo_key(id, key) {
                return;
            }
        }
        if key == Key::Tab && self.config.tab_navigation {
            self.focus_next(!modifiers.shift);
        } else if let Some(direction) = key_direction(key) {
            if self.config.directional_navigation {
                self.focus_direction(direction);
            }
        }
    }

    fn on_gamepad_press(&mut self, player: usize, button: GamePadButton) {
        self.hide_tooltip();
        let focused = self.to_focused(EventKind::GamePadPress { player, button });

        if let Some(direction) = pad_direction(button) {
            if self.config.directional_navigation {
                self.focus_direction(direction);
            }
            return;
        }
        match button {
            GamePadButton::RightShoulder if self.config.tab_navigation => self.focus_next(true),
            GamePadButton::LeftShoulder if self.config.tab_navigation => self.focus_next(false),
            GamePadButton::A => {
                if let Some(id) = focused {
                    self.emit(
                        id,
                        EventKind::Click {
                            button: MouseButton::Left,
                        },
                    );
                }
            }
            _ => {}
        }
    }
}

const fn key_direction(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Direction::Up),
        Key::Down => Some(Direction::Down),
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        _ => None,
    }
}

const fn pad_direction(button: GamePadButton) -> Option<Direction> {
    match button {
        GamePadButton::DPadUp | GamePadButton::LeftStickUp => Some(Direction::Up),
        GamePadButton::DPadDown | GamePadButton::LeftStickDown => Some(Direction::Down),
        GamePadButton::DPadLeft | GamePadButton::LeftStickLeft => Some(Direction::Left),
        GamePadButton::DPadRight | GamePadButton::LeftStickRight => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_core::Rect;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn manager() -> Manager {
        Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap()
    }

    fn kinds_for(ui: &mut Manager, id: ControlId) -> Vec<EventKind> {
        ui.drain_events()
            .iter()
            .filter_map(|e| e.as_control())
            .filter(|(each, _)| *each == id)
            .map(|(_, kind)| kind)
            .collect()
    }

    #[test]
    fn test_child_clipped_by_parent_client_area() {
        let mut ui = manager();
        let panel = ui.create_control().unwrap();
        ui.add_root(panel);
        ui.set_bounds(panel, Rect::new(0, 0, 100, 100));
        let wide = ui.create_control().unwrap();
        ui.add(panel, wide);
        ui.set_bounds(wide, Rect::new(50, 10, 200, 20));
        ui.rebuild_order();

        assert_eq!(ui.find_target(Point::new(60, 15), true), Some(wide));
        assert_eq!(ui.find_target(Point::new(150, 15), true), None);

        ui.set_detached(wide, true);
        ui.rebuild_order();
        assert_eq!(ui.find_target(Point::new(150, 15), true), Some(wide));
    }

    #[test]
    fn test_passive_controls_are_transparent() {
        let mut ui = manager();
        let back = ui.create_control().unwrap();
        let glass = ui.create_control().unwrap();
        ui.add_root(back);
        ui.add_root(glass);
        ui.set_passive(glass, true);
        ui.rebuild_order();

        assert_eq!(ui.find_target(Point::new(5, 5), true), Some(back));
    }

    #[test]
    fn test_hover_over_and_out() {
        let mut ui = manager();
        let button = ui.create_button("x").unwrap();
        ui.add_root(button);
        ui.rebuild_order();
        ui.drain_events();

        ui.dispatch(InputEvent::MouseMove {
            position: Point::new(5, 5),
            delta: Point::new(5, 5),
        });
        ui.dispatch(InputEvent::MouseMove {
            position: Point::new(500, 500),
            delta: Point::new(495, 495),
        });

        let kinds = kinds_for(&mut ui, button);
        assert_eq!(kinds[0], EventKind::MouseOver);
        assert!(kinds.contains(&EventKind::MouseOut));
        assert_eq!(ui.hovered(), None);
    }

    #[test]
    fn test_click_needs_release_over_same_control() {
        let mut ui = manager();
        let a = ui.create_button("a").unwrap();
        let b = ui.create_button("b").unwrap();
        ui.add_root(a);
        ui.add_root(b);
        ui.set_left(b, 200);
        ui.rebuild_order();
        ui.drain_events();

        let left = MouseButton::Left;
        ui.dispatch(InputEvent::MouseDown { button: left, position: Point::new(5, 5) });
        ui.dispatch(InputEvent::MouseUp { button: left, position: Point::new(205, 5) });
        assert!(!kinds_for(&mut ui, a).contains(&EventKind::Click { button: left }));

        ui.dispatch(InputEvent::MouseDown { button: left, position: Point::new(5, 5) });
        ui.dispatch(InputEvent::MouseUp { button: left, position: Point::new(6, 6) });
        assert!(kinds_for(&mut ui, a).contains(&EventKind::Click { button: left }));
    }

    #[test]
    fn test_no_click_while_other_button_held() {
        let mut ui = manager();
        let a = ui.create_button("a").unwrap();
        ui.add_root(a);
        ui.rebuild_order();
        ui.drain_events();

        let p = Point::new(5, 5);
        ui.dispatch(InputEvent::MouseDown { button: MouseButton::Left, position: p });
        ui.dispatch(InputEvent::MouseDown { button: MouseButton::Right, position: p });
        ui.dispatch(InputEvent::MouseUp { button: MouseButton::Left, position: p });

        let kinds = kinds_for(&mut ui, a);
        assert!(!kinds.iter().any(|k| matches!(k, EventKind::Click { .. })));
    }

    #[test]
    fn test_click_outside_clears_focus() {
        let mut ui = manager();
        let a = ui.create_button("a").unwrap();
        ui.add_root(a);
        ui.focus(Some(a));
        ui.rebuild_order();

        ui.dispatch(InputEvent::MouseDown {
            button: MouseButton::Left,
            position: Point::new(600, 600),
        });
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn test_modal_rejects_outside_press() {
        let mut ui = manager();
        let outside = ui.create_button("x").unwrap();
        ui.add_root(outside);
        let dialog = ui.create_window().unwrap();
        ui.set_bounds(dialog, Rect::new(400, 300, 200, 100));
        ui.show_modal(dialog);
        ui.rebuild_order();
        ui.drain_events();

        ui.dispatch(InputEvent::MouseDown {
            button: MouseButton::Left,
            position: Point::new(5, 5),
        });

        let events = ui.drain_events();
        assert!(events.contains(&UiEvent::InvalidInput { position: Point::new(5, 5) }));
        assert!(!events.iter().any(|e| e.as_control().is_some_and(|(id, _)| id == outside)));
        assert_eq!(ui.focused(), Some(dialog));
        assert_eq!(ui.button_owner(MouseButton::Left), None);
    }

    #[test]
    fn test_modal_press_on_empty_space_is_rejected() {
        let mut ui = manager();
        let dialog = ui.create_window().unwrap();
        ui.set_bounds(dialog, Rect::new(300, 200, 200, 120));
        ui.show_modal(dialog);
        ui.rebuild_order();
        ui.drain_events();

        ui.dispatch(InputEvent::MouseDown {
            button: MouseButton::Left,
            position: Point::new(900, 700),
        });

        let events = ui.drain_events();
        let rejected = events
            .iter()
            .filter(|e| matches!(e, UiEvent::InvalidInput { .. }))
            .count();
        assert_eq!(rejected, 1);
        assert_eq!(ui.focused(), Some(dialog));
    }

    #[test]
    fn test_stay_on_top_root_does_not_block_modal() {
        let mut ui = manager();
        let hud = ui.create_button("hud").unwrap();
        ui.add_root(hud);
        ui.set_location(hud, Point::new(350, 250));
        ui.set_stay_on_top(hud, true);
        let dialog = ui.create_window().unwrap();
        ui.set_bounds(dialog, Rect::new(300, 200, 200, 120));
        ui.show_modal(dialog);
        ui.rebuild_order();
        ui.drain_events();

        let position = Point::new(360, 260);
        ui.dispatch(InputEvent::MouseMove { position, delta: Point::ZERO });
        assert_eq!(ui.hovered(), Some(dialog));

        ui.dispatch(InputEvent::MouseDown { button: MouseButton::Left, position });

        assert_eq!(ui.button_owner(MouseButton::Left), Some(dialog));
        let events = ui.drain_events();
        assert!(!events.iter().any(|e| matches!(e, UiEvent::InvalidInput { .. })));
        assert!(!events.iter().any(|e| e.as_control().is_some_and(|(id, _)| id == hud)));
    }

    #[test]
    fn test_tab_key_moves_focus() {
        let mut ui = manager();
        let root = ui.create_control().unwrap();
        ui.add_root(root);
        ui.set_bounds(root, Rect::new(0, 0, 300, 100));
        let a = ui.create_button("a").unwrap();
        let b = ui.create_button("b").unwrap();
        ui.add(root, a);
        ui.add(root, b);
        ui.focus(Some(a));

        ui.dispatch(InputEvent::KeyPress { key: Key::Tab, modifiers: Modifiers::default() });
        assert_eq!(ui.focused(), Some(b));

        let shift = Modifiers { shift: true, ..Modifiers::default() };
        ui.dispatch(InputEvent::KeyPress { key: Key::Tab, modifiers: shift });
        assert_eq!(ui.focused(), Some(a));
    }

    #[test]
    fn test_drag_moves_window() {
        let mut ui = manager();
        let window = ui.create_window().unwrap();
        ui.add_root(window);
        ui.set_bounds(window, Rect::new(100, 100, 200, 150));
        ui.rebuild_order();

        let left = MouseButton::Left;
        ui.dispatch(InputEvent::MouseDown { button: left, position: Point::new(150, 110) });
        ui.dispatch(InputEvent::MouseMove {
            position: Point::new(180, 140),
            delta: Point::new(30, 30),
        });
        ui.dispatch(InputEvent::MouseUp { button: left, position: Point::new(180, 140) });

        let control = ui.control(window).unwrap();
        assert_eq!((control.left(), control.top()), (130, 130));
        assert!(!ui.is_dragging(window));
    }
}
