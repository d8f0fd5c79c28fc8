//! Combo box items and selection.
//!
//! The text and the selection are kept in step: selecting an item copies its
//! text, and writing text selects the first item that equals it, or nothing.

use super::ControlKind;
use crate::control::ControlId;
use crate::event::EventKind;
use crate::input::Key;
use crate::Manager;

impl Manager {
    /// Items of a combo box.
    #[must_use]
    pub fn combo_items(&self, id: ControlId) -> &[String] {
        self.controls
            .get(id)
            .and_then(|c| c.kind.combo_box())
            .map_or(&[], |s| s.items.as_slice())
    }

    /// Selected index.
    #[must_use]
    pub fn selected_index(&self, id: ControlId) -> Option<usize> {
        self.controls
            .get(id)
            .and_then(|c| c.kind.combo_box())
            .and_then(|s| s.selected)
    }

    /// Selects an item and copies its text. An out-of-range index clears the
    /// selection and leaves the text alone.
    pub fn set_selected_index(&mut self, id: ControlId, index: Option<usize>) {
        let Some(state) = self.controls.get_mut(id).and_then(|c| c.kind.combo_box_mut()) else {
            return;
        };
        let index = index.filter(|i| *i < state.items.len());
        let text = index.map(|i| state.items[i].clone());
        let changed = state.selected != index;
        state.selected = index;

        if let Some(text) = text {
            if let Some(control) = self.controls.get_mut(id) {
                if control.text != text {
                    control.text = text;
                    self.emit(id, EventKind::TextChanged);
                }
            }
        }
        if changed {
            self.emit(id, EventKind::SelectionChanged { index });
        }
        self.invalidate(id);
    }

    /// Replaces the items. The selection follows the current text.
    pub fn set_combo_items<I, S>(&mut self, id: ControlId, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(state) = self.controls.get_mut(id).and_then(|c| c.kind.combo_box_mut()) else {
            return;
        };
        state.items = items.into_iter().map(Into::into).collect();
        self.sync_combo_selection(id);
        self.invalidate(id);
    }

    /// Re-derives the selection from the text.
    pub(crate) fn sync_combo_selection(&mut self, id: ControlId) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        let ControlKind::ComboBox(state) = &mut control.kind else {
            return;
        };
        let index = state.find(&control.text);
        if state.selected == index {
            return;
        }
        state.selected = index;
        self.emit(id, EventKind::SelectionChanged { index });
    }

    /// Steps the selection with the arrow keys. Returns true if consumed.
    pub(crate) fn combo_key(&mut self, id: ControlId, key: Key) -> bool {
        let Some(state) = self.controls.get(id).and_then(|c| c.kind.combo_box()) else {
            return false;
        };
        if state.items.is_empty() {
            return false;
        }
        let last = state.items.len() - 1;
        let next = match (key, state.selected) {
            (Key::Down, None) => 0,
            (Key::Down, Some(i)) => (i + 1).min(last),
            (Key::Up, None) => last,
            (Key::Up, Some(i)) => i.saturating_sub(1),
            _ => return false,
        };
        self.set_selected_index(id, Some(next));
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn combo() -> (Manager, ControlId) {
        let mut ui = Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap();
        let id = ui.create_combo_box(["Low", "Medium", "High"]).unwrap();
        (ui, id)
    }

    #[test]
    fn test_text_drives_selection() {
        let (mut ui, id) = combo();
        ui.set_text(id, "Medium");
        assert_eq!(ui.selected_index(id), Some(1));

        ui.set_text(id, "medium");
        assert_eq!(ui.selected_index(id), None);
    }

    #[test]
    fn test_selection_sets_text() {
        let (mut ui, id) = combo();
        ui.set_selected_index(id, Some(2));
        assert_eq!(ui.control(id).unwrap().text(), "High");

        ui.set_selected_index(id, Some(9));
        assert_eq!(ui.selected_index(id), None);
        assert_eq!(ui.control(id).unwrap().text(), "High");
    }

    #[test]
    fn test_replacing_items_resyncs() {
        let (mut ui, id) = combo();
        ui.set_selected_index(id, Some(0));
        ui.set_combo_items(id, ["Off", "Low"]);
        assert_eq!(ui.selected_index(id), Some(1));
    }

    #[test]
    fn test_arrow_keys_step_and_stop() {
        let (mut ui, id) = combo();
        assert!(ui.combo_key(id, Key::Down));
        assert_eq!(ui.selected_index(id), Some(0));
        assert!(ui.combo_key(id, Key::Up));
        assert_eq!(ui.selected_index(id), Some(0));
        assert!(!ui.combo_key(id, Key::Enter));
    }
}
