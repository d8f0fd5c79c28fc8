//! Windows and the modal stack.

use crate::control::ControlId;
use crate::event::EventKind;
use crate::Manager;

impl Manager {
    /// Shows a control as the active modal window. While it is on top of the
    /// modal stack, mouse-down outside it is rejected with
    /// [`UiEvent::InvalidInput`](crate::UiEvent::InvalidInput) and focus
    /// can't leave it.
    ///
    /// The control becomes a root if it isn't one.
    pub fn show_modal(&mut self, id: ControlId) {
        if !self.contains(id) {
            return;
        }
        if !self.roots.contains(&id) {
            self.add_root(id);
        }
        self.modal_stack.retain(|m| *m != id);
        self.modal_stack.push(id);
        tracing::debug!(?id, depth = self.modal_stack.len(), "modal window shown");

        self.set_visible(id, true);
        self.bring_to_front(id);
        self.focus(Some(id));
    }

    /// Returns true if the control is on the modal stack.
    #[must_use]
    pub fn is_modal(&self, id: ControlId) -> bool {
        self.modal_stack.contains(&id)
    }

    /// Hides a window and takes it off the modal stack. Focus inside it moves
    /// to the modal window below, if any.
    pub fn close(&mut self, id: ControlId) {
        if !self.contains(id) {
            return;
        }
        let was_modal = self.is_modal(id);
        self.modal_stack.retain(|m| *m != id);
        if was_modal {
            tracing::debug!(?id, depth = self.modal_stack.len(), "modal window closed");
        }

        let focus_inside = self
            .focused
            .is_some_and(|f| f == id || self.is_ancestor(id, f));

        self.set_visible(id, false);
        self.emit(id, EventKind::Closed);

        if focus_inside {
            let next = self.modal();
            self.focus(next);
        }
    }
}
