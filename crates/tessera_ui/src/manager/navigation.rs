//! Tab-order and directional focus navigation.

use crate::control::ControlId;
use crate::Manager;

/// Direction for spatial navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller Y.
    Up,
    /// Toward larger Y.
    Down,
    /// Toward smaller X.
    Left,
    /// Toward larger X.
    Right,
}

impl Manager {
    fn navigable(&self, id: ControlId) -> bool {
        self.controls
            .get(id)
            .is_some_and(|c| c.can_focus() && !c.passive() && !c.is_internal())
            && self.is_visible(id)
            && self.is_enabled(id)
    }

    /// Moves focus to the next (or previous) focusable control of the focused
    /// control's root, in z-order, wrapping around. Without focus, the first
    /// candidate of the modal window or the topmost root is taken.
    pub fn focus_next(&mut self, forward: bool) {
        self.rebuild_order();
        let scope = self
            .focused
            .and_then(|f| self.controls.get(f))
            .map(|c| c.root)
            .or_else(|| self.modal())
            .or_else(|| {
                self.order
                    .last()
                    .and_then(|last| self.controls.get(*last))
                    .map(|c| c.root)
            });
        let Some(scope) = scope.or_else(|| self.roots.last().copied()) else {
            return;
        };

        let candidates: Vec<ControlId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.controls.get(*id).is_some_and(|c| c.root == scope))
            .filter(|id| self.navigable(*id))
            .collect();
        if candidates.is_empty() {
            return;
        }

        let next = match self.focused.and_then(|f| candidates.iter().position(|c| *c == f)) {
            Some(index) if forward => candidates[(index + 1) % candidates.len()],
            Some(index) => candidates[(index + candidates.len() - 1) % candidates.len()],
            None if forward => candidates[0],
            None => candidates[candidates.len() - 1],
        };
        self.focus(Some(next));
    }

    /// Moves focus to the nearest sibling in `direction`.
    ///
    /// Candidates must not lie behind the focused control's leading edge.
    /// The smallest gap wins, ties going to the smallest offset between
    /// centers on the other axis.
    pub fn focus_direction(&mut self, direction: Direction) {
        let Some(source) = self.focused.filter(|f| self.contains(*f)) else {
            return;
        };
        let siblings = match self.controls.get(source).and_then(|c| c.parent) {
            Some(parent) => self
                .controls
                .get(parent)
                .map(|p| p.children.clone())
                .unwrap_or_default(),
            None => self.roots.clone(),
        };
        let from = self.absolute_rect(source);
        let center = from.center();

        let best = siblings
            .into_iter()
            .filter(|id| *id != source && self.navigable(*id))
            .filter_map(|id| {
                let to = self.absolute_rect(id);
                let other = to.center();
                let (gap, across) = match direction {
                    Direction::Right => (to.left - from.right(), other.y - center.y),
                    Direction::Left => (from.left - to.right(), other.y - center.y),
                    Direction::Down => (to.top - from.bottom(), other.x - center.x),
                    Direction::Up => (from.top - to.bottom(), other.x - center.x),
                };
                (gap >= 0).then_some((gap, across.abs(), id))
            })
            .min_by_key(|(gap, across, _)| (*gap, *across));

        if let Some((_, _, id)) = best {
            self.focus(Some(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_core::Rect;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn grid() -> (Manager, Vec<ControlId>) {
        let mut ui = Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap();
        let root = ui.create_container().unwrap();
        ui.add_root(root);
        ui.set_bounds(root, Rect::new(0, 0, 400, 300));
        let mut buttons = Vec::new();
        for (x, y) in [(10, 10), (110, 10), (110, 60), (10, 60)] {
            let button = ui.create_button("b").unwrap();
            ui.add(root, button);
            ui.set_bounds(button, Rect::new(x, y, 80, 30));
            buttons.push(button);
        }
        (ui, buttons)
    }

    #[test]
    fn test_tab_cycles_and_wraps() {
        let (mut ui, b) = grid();
        ui.focus(Some(b[3]));
        ui.focus_next(true);
        // Wraps to the container root, first in z-order.
        assert_eq!(ui.focused(), ui.control(b[0]).map(|c| c.root()));
        ui.focus_next(true);
        assert_eq!(ui.focused(), Some(b[0]));
        ui.focus_next(false);
        ui.focus_next(false);
        assert_eq!(ui.focused(), Some(b[3]));
    }

    #[test]
    fn test_tab_skips_disabled() {
        let (mut ui, b) = grid();
        ui.set_enabled(b[1], false);
        ui.focus(Some(b[0]));
        ui.focus_next(true);
        assert_eq!(ui.focused(), Some(b[2]));
    }

    #[test]
    fn test_directional_navigation() {
        let (mut ui, b) = grid();
        ui.focus(Some(b[0]));

        ui.focus_direction(Direction::Right);
        assert_eq!(ui.focused(), Some(b[1]));
        ui.focus_direction(Direction::Down);
        assert_eq!(ui.focused(), Some(b[2]));
        ui.focus_direction(Direction::Left);
        assert_eq!(ui.focused(), Some(b[3]));
        ui.focus_direction(Direction::Left);
        assert_eq!(ui.focused(), Some(b[3]));
    }
}
