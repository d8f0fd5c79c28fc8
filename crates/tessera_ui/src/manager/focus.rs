//! Keyboard focus.

use crate::control::ControlId;
use crate::event::EventKind;
use crate::Manager;

impl Manager {
    /// Moves focus.
    ///
    /// A control that can't take focus hands it to its nearest focusable
    /// ancestor, or its root when none is. Focusing the focused control does
    /// nothing. While a modal window is active, focus can't move outside it.
    /// The newly focused root is brought to the front.
    pub fn focus(&mut self, target: Option<ControlId>) {
        let target = match target {
            Some(id) => match self.focus_candidate(id) {
                Some(candidate) => Some(candidate),
                None => return,
            },
            None => None,
        };
        if target == self.focused {
            return;
        }
        if let (Some(id), Some(modal)) = (target, self.modal()) {
            if id != modal && !self.is_ancestor(modal, id) {
                tracing::debug!(?id, ?modal, "focus outside the modal window rejected");
                return;
            }
        }

        let previous = std::mem::replace(&mut self.focused, target);
        tracing::debug!(from = ?previous, to = ?target, "focus changed");

        if let Some(old) = previous.filter(|old| self.contains(*old)) {
            self.emit(old, EventKind::FocusLost);
            self.invalidate(old);
        }
        if let Some(new) = target {
            self.emit(new, EventKind::FocusGained);
            self.invalidate(new);
            if let Some(root) = self.controls.get(new).map(|c| c.root) {
                self.bring_to_front(root);
            }
        }
    }

    /// The control that actually receives focus when `id` is asked to.
    fn focus_candidate(&self, id: ControlId) -> Option<ControlId> {
        let control = self.controls.get(id)?;
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|each| self.controls.get(*each).is_some_and(|c| c.can_focus()))
            .or(Some(control.root))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn manager() -> Manager {
        Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap()
    }

    fn focus_events(ui: &mut Manager) -> Vec<(ControlId, EventKind)> {
        ui.drain_events()
            .iter()
            .filter_map(|e| e.as_control())
            .filter(|(_, kind)| matches!(kind, EventKind::FocusGained | EventKind::FocusLost))
            .collect()
    }

    #[test]
    fn test_label_promotes_to_focusable_ancestor() {
        let mut ui = manager();
        let root = ui.create_container().unwrap();
        ui.add_root(root);
        let panel = ui.create_control().unwrap();
        ui.add(root, panel);
        let label = ui.create_label("name").unwrap();
        ui.add(panel, label);

        ui.focus(Some(label));
        assert_eq!(ui.focused(), Some(panel));

        ui.set_can_focus(panel, false);
        ui.set_can_focus(root, false);
        ui.focus(None);
        ui.focus(Some(label));
        assert_eq!(ui.focused(), Some(root));
    }

    #[test]
    fn test_refocus_is_silent() {
        let mut ui = manager();
        let a = ui.create_button("a").unwrap();
        let b = ui.create_button("b").unwrap();
        ui.add_root(a);
        ui.add_root(b);
        ui.drain_events();

        ui.focus(Some(a));
        ui.focus(Some(a));
        assert_eq!(focus_events(&mut ui), vec![(a, EventKind::FocusGained)]);

        ui.focus(Some(b));
        assert_eq!(
            focus_events(&mut ui),
            vec![(a, EventKind::FocusLost), (b, EventKind::FocusGained)]
        );
    }

    #[test]
    fn test_focus_brings_root_to_front() {
        let mut ui = manager();
        let back = ui.create_window().unwrap();
        let front = ui.create_window().unwrap();
        ui.add_root(back);
        ui.add_root(front);

        ui.focus(Some(back));
        assert_eq!(ui.roots(), &[front, back]);
    }

    #[test]
    fn test_modal_keeps_focus() {
        let mut ui = manager();
        let outside = ui.create_button("x").unwrap();
        ui.add_root(outside);
        let dialog = ui.create_window().unwrap();
        ui.show_modal(dialog);

        ui.focus(Some(outside));
        assert_eq!(ui.focused(), Some(dialog));
    }
}
