//! Parenting, the root list, disposal and lookup.

use super::{ControlFlags, ControlId};
use crate::event::{EventKind, UiEvent};
use crate::Manager;

impl Manager {
    /// Parent chain of a control, nearest first (the control itself excluded).
    pub fn ancestors(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        std::iter::successors(self.controls.get(id).and_then(|c| c.parent), move |p| {
            self.controls.get(*p).and_then(|c| c.parent)
        })
    }

    /// Returns true if `ancestor` is on the parent chain of `id`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: ControlId, id: ControlId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Every descendant, depth-first in paint order.
    #[must_use]
    pub fn descendants(&self, id: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack: Vec<ControlId> = self
            .controls
            .get(id)
            .map(|c| c.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(control) = self.controls.get(next) {
                stack.extend(control.children.iter().rev().copied());
            }
        }
        out
    }

    /// Makes `child` the last child of `parent`, detaching it from wherever it
    /// was before. Adding a control to itself or to its own descendant is
    /// ignored.
    pub fn add(&mut self, parent: ControlId, child: ControlId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_ancestor(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to create a cycle in the control tree");
            return;
        }
        if self.controls[child].parent == Some(parent) {
            return;
        }

        self.detach(child);

        let root = self.controls[parent].root;
        if let Some(p) = self.controls.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.controls.get_mut(child) {
            c.parent = Some(parent);
        }
        self.set_root(child, root);
        self.capture_anchor_margins(child);
        self.emit(child, EventKind::ParentChanged);

        if let Some(container) = self.parent_container(child) {
            self.update_scrolling(container);
        }
        self.invalidate(parent);
        self.order_dirty = true;
    }

    /// Detaches `child` from `parent`. The child becomes an orphan root of
    /// its own subtree. Does nothing if `child` isn't a child of `parent`.
    pub fn remove(&mut self, parent: ControlId, child: ControlId) {
        if self.controls.get(child).and_then(|c| c.parent) != Some(parent) {
            return;
        }
        let container = self.parent_container(child);

        if let Some(p) = self.controls.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.controls.get_mut(child) {
            c.parent = None;
            c.left_modifier = 0;
            c.top_modifier = 0;
        }
        self.set_root(child, child);
        self.emit(child, EventKind::ParentChanged);

        if let Some(container) = container {
            self.update_scrolling(container);
        }
        self.invalidate(parent);
        self.order_dirty = true;
    }

    /// Adds a top-level control, detaching it from any parent first.
    pub fn add_root(&mut self, id: ControlId) {
        if !self.contains(id) || self.roots.contains(&id) {
            return;
        }
        self.detach(id);
        self.roots.push(id);
        self.set_root(id, id);
        self.capture_anchor_margins(id);
        self.invalidate(id);
        self.order_dirty = true;
    }

    /// Removes a top-level control from the root list. It stays registered.
    pub fn remove_root(&mut self, id: ControlId) {
        let before = self.roots.len();
        self.roots.retain(|r| *r != id);
        if self.roots.len() != before {
            self.modal_stack.retain(|m| *m != id);
            self.order_dirty = true;
        }
    }

    /// Takes a control out of its parent or the root list.
    fn detach(&mut self, id: ControlId) {
        match self.controls.get(id).and_then(|c| c.parent) {
            Some(parent) => self.remove(parent, id),
            None => self.remove_root(id),
        }
    }

    /// Writes `root` into a whole subtree.
    fn set_root(&mut self, id: ControlId, root: ControlId) {
        let mut subtree = self.descendants(id);
        subtree.push(id);
        for each in subtree {
            if let Some(control) = self.controls.get_mut(each) {
                control.root = root;
            }
        }
    }

    /// Destroys a control and its subtree.
    ///
    /// Children go first, last child first. The control's tooltip, drag-resize
    /// hook and texture go with it, and it is removed from every manager
    /// registry. If it held focus, focus moves to its root when that survives.
    pub fn dispose(&mut self, id: ControlId) {
        if !self.contains(id) {
            return;
        }

        while let Some(&child) = self.controls.get(id).and_then(|c| c.children.last()) {
            self.dispose(child);
        }
        if let Some(tip) = self.controls.get(id).and_then(|c| c.tool_tip) {
            self.dispose(tip);
        }

        let root = self.controls[id].root;
        if self.focused == Some(id) {
            if root != id && self.contains(root) {
                self.focus(Some(root));
            } else {
                self.focus(None);
            }
        }

        if let Some(parent) = self.controls[id].parent {
            self.remove(parent, id);
        }
        self.remove_root(id);
        self.modal_stack.retain(|m| *m != id);
        self.forget_input(id);
        self.resize_hooks.remove(id);
        self.textures.release(id);

        let Some(control) = self.controls.remove(id) else {
            return;
        };
        tracing::debug!(
            ?id,
            kind = control.kind.type_name(),
            name = %control.name,
            "control disposed"
        );
        if !control.suspended() {
            self.push_event(UiEvent::Control {
                id,
                kind: EventKind::Disposed,
            });
        }
        self.order_dirty = true;
    }

    /// Clears every input reference to a control.
    fn forget_input(&mut self, id: ControlId) {
        for owner in &mut self.states.buttons {
            if *owner == Some(id) {
                *owner = None;
            }
        }
        if self.states.over == Some(id) {
            self.states.over = None;
        }
        self.tooltip.forget(id);
    }

    /// Finds a descendant by name (case-insensitive), depth-first.
    #[must_use]
    pub fn get_control(&self, id: ControlId, name: &str) -> Option<ControlId> {
        self.descendants(id).into_iter().find(|each| {
            self.controls
                .get(*each)
                .is_some_and(|c| c.name.eq_ignore_ascii_case(name))
        })
    }

    /// Marks a control's cached pixels stale, along with every ancestor whose
    /// cache contains them.
    pub fn invalidate(&mut self, id: ControlId) {
        let mut next = Some(id);
        while let Some(current) = next {
            let Some(control) = self.controls.get_mut(current) else {
                break;
            };
            control.flags.set(ControlFlags::INVALIDATED);
            next = control.parent;
        }
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

    fn chain(ui: &mut Manager, depth: usize) -> Vec<ControlId> {
        let mut ids = vec![ui.create_control().unwrap()];
        ui.add_root(ids[0]);
        for _ in 1..depth {
            let child = ui.create_control().unwrap();
            ui.add(*ids.last().unwrap(), child);
            ids.push(child);
        }
        ids
    }

    fn clear_invalidation(ui: &mut Manager) {
        for (_, control) in &mut ui.controls {
            control.flags.clear(ControlFlags::INVALIDATED);
        }
    }

    #[test]
    fn test_invalidate_reaches_root() {
        let mut ui = manager();
        let ids = chain(&mut ui, 4);
        let sibling = ui.create_control().unwrap();
        ui.add(ids[1], sibling);
        clear_invalidation(&mut ui);

        ui.invalidate(ids[3]);

        for id in &ids {
            assert!(ui.control(*id).unwrap().invalidated());
        }
        assert!(!ui.control(sibling).unwrap().invalidated());
    }

    #[test]
    fn test_reparent_updates_root_of_subtree() {
        let mut ui = manager();
        let a = chain(&mut ui, 3);
        let b = chain(&mut ui, 1);

        ui.add(b[0], a[1]);

        assert_eq!(ui.control(a[1]).unwrap().parent(), Some(b[0]));
        assert_eq!(ui.control(a[2]).unwrap().root(), b[0]);
        assert!(ui.control(a[0]).unwrap().children().is_empty());
    }

    #[test]
    fn test_cycle_is_refused() {
        let mut ui = manager();
        let ids = chain(&mut ui, 3);
        ui.add(ids[2], ids[0]);
        assert_eq!(ui.control(ids[0]).unwrap().parent(), None);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut ui = manager();
        let ids = chain(&mut ui, 2);
        let stranger = ui.create_control().unwrap();
        ui.remove(ids[0], stranger);
        assert_eq!(ui.control(ids[0]).unwrap().children(), &[ids[1]]);
    }

    #[test]
    fn test_dispose_is_recursive_and_moves_focus_to_root() {
        let mut ui = manager();
        let ids = chain(&mut ui, 3);
        ui.focus(Some(ids[2]));
        ui.drain_events();

        ui.dispose(ids[1]);

        assert!(!ui.contains(ids[1]));
        assert!(!ui.contains(ids[2]));
        assert_eq!(ui.focused(), Some(ids[0]));
        assert!(ui.control(ids[0]).unwrap().children().is_empty());

        let disposed: Vec<ControlId> = ui
            .drain_events()
            .iter()
            .filter_map(|e| match e.as_control() {
                Some((id, EventKind::Disposed)) => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(disposed, vec![ids[2], ids[1]]);
    }

    #[test]
    fn test_dispose_root_clears_focus() {
        let mut ui = manager();
        let ids = chain(&mut ui, 1);
        ui.focus(Some(ids[0]));
        ui.dispose(ids[0]);
        assert_eq!(ui.focused(), None);
        assert!(ui.roots().is_empty());
    }

    #[test]
    fn test_get_control_is_case_insensitive() {
        let mut ui = manager();
        let ids = chain(&mut ui, 3);
        ui.set_name(ids[2], "OkButton");

        assert_eq!(ui.get_control(ids[0], "okbutton"), Some(ids[2]));
        assert_eq!(ui.get_control(ids[0], "missing"), None);
    }
}
