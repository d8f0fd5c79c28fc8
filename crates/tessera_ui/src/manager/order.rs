//! Z-order.
//!
//! Siblings paint in list order, back to front. Pinned siblings sort around
//! the rest at rebuild time: stay-on-back first, stay-on-top last, list order
//! kept inside each class. The flat order used for hit-testing and texture
//! compositing is a depth-first walk of the visible tree, with detached
//! subtrees moved after the tree they escape from.

use std::collections::VecDeque;

use crate::control::{ControlFlags, ControlId};
use crate::Manager;

impl Manager {
    /// Flat paint order of the last rebuild, back to front.
    #[must_use]
    pub fn z_order(&self) -> &[ControlId] {
        &self.order
    }

    /// Siblings in paint order with pinning applied.
    pub(crate) fn paint_order(&self, siblings: &[ControlId]) -> Vec<ControlId> {
        let mut sorted = siblings.to_vec();
        sorted.sort_by_key(|id| {
            self.controls.get(*id).map_or(1, |c| {
                if c.flags.has(ControlFlags::STAY_ON_BACK) {
                    0
                } else if c.flags.has(ControlFlags::STAY_ON_TOP) {
                    2
                } else {
                    1
                }
            })
        });
        sorted
    }

    /// Rebuilds the flat order if anything affecting it changed.
    pub(crate) fn rebuild_order(&mut self) {
        if !self.order_dirty {
            return;
        }
        let mut order = Vec::with_capacity(self.controls.len());
        for root in self.paint_order(&self.roots) {
            if !self.controls.get(root).is_some_and(|c| c.visible()) {
                continue;
            }
            let mut detached = VecDeque::from([root]);
            while let Some(next) = detached.pop_front() {
                self.collect_order(next, &mut order, &mut detached);
            }
        }
        self.order = order;
        self.order_dirty = false;
    }

    fn collect_order(
        &self,
        id: ControlId,
        order: &mut Vec<ControlId>,
        detached: &mut VecDeque<ControlId>,
    ) {
        order.push(id);
        let Some(control) = self.controls.get(id) else {
            return;
        };
        for child in self.paint_order(&control.children) {
            match self.controls.get(child) {
                Some(c) if !c.visible() => {}
                Some(c) if c.detached() => detached.push_back(child),
                Some(_) => self.collect_order(child, order, detached),
                None => {}
            }
        }
    }

    /// Moves a control to the end of its sibling list (or the root list).
    pub fn bring_to_front(&mut self, id: ControlId) {
        self.restack(id, true);
    }

    /// Moves a control to the start of its sibling list (or the root list).
    pub fn send_to_back(&mut self, id: ControlId) {
        self.restack(id, false);
    }

    fn restack(&mut self, id: ControlId, front: bool) {
        let Some(parent) = self.controls.get(id).map(|c| c.parent) else {
            return;
        };
        let siblings = match parent {
            Some(parent) => match self.controls.get_mut(parent) {
                Some(p) => &mut p.children,
                None => return,
            },
            None => &mut self.roots,
        };
        let Some(index) = siblings.iter().position(|s| *s == id) else {
            return;
        };
        let already = if front {
            index + 1 == siblings.len()
        } else {
            index == 0
        };
        if already {
            return;
        }

        siblings.remove(index);
        if front {
            siblings.push(id);
        } else {
            siblings.insert(0, id);
        }
        self.order_dirty = true;
        match parent {
            Some(parent) => self.invalidate(parent),
            None => self.invalidate(id),
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

    #[test]
    fn test_pinned_roots_sort_around_normal_ones() {
        let mut ui = manager();
        let ids: Vec<ControlId> = (0..4).map(|_| ui.create_control().unwrap()).collect();
        for id in &ids {
            ui.add_root(*id);
        }
        ui.set_stay_on_top(ids[0], true);
        ui.set_stay_on_back(ids[3], true);

        ui.rebuild_order();
        assert_eq!(ui.z_order(), &[ids[3], ids[1], ids[2], ids[0]]);

        ui.bring_to_front(ids[1]);
        ui.rebuild_order();
        assert_eq!(ui.z_order(), &[ids[3], ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_hidden_subtrees_are_skipped_and_detached_go_last() {
        let mut ui = manager();
        let root = ui.create_control().unwrap();
        ui.add_root(root);
        let popup = ui.create_control().unwrap();
        let hidden = ui.create_control().unwrap();
        let plain = ui.create_control().unwrap();
        for child in [popup, hidden, plain] {
            ui.add(root, child);
        }
        ui.set_detached(popup, true);
        ui.set_visible(hidden, false);

        ui.rebuild_order();
        assert_eq!(ui.z_order(), &[root, plain, popup]);
    }

    #[test]
    fn test_send_to_back() {
        let mut ui = manager();
        let root = ui.create_control().unwrap();
        ui.add_root(root);
        let a = ui.create_control().unwrap();
        let b = ui.create_control().unwrap();
        ui.add(root, a);
        ui.add(root, b);

        ui.send_to_back(b);
        assert_eq!(ui.control(root).unwrap().children(), &[b, a]);
    }
}
