//! Rectangles, clamped geometry setters and anchor reflow.

use tessera_core::{anchor_margins, reflow, Anchors, Point, Rect, Size};

use super::ControlId;
use crate::event::EventKind;
use crate::Manager;

impl Manager {
    /// Box in render-target pixels, including ancestor scroll offsets.
    ///
    /// A child sits at its parent's client origin plus its local position
    /// plus its own scroll modifier. The client origin is the parent's
    /// absolute position minus its origin margin plus its client margin, so
    /// local coordinates are relative to the client area rather than to the
    /// parent's outer box. With zero client margins the two agree. Stale
    /// handles give an empty rect.
    #[must_use]
    pub fn absolute_rect(&self, id: ControlId) -> Rect {
        let Some(control) = self.controls.get(id) else {
            return Rect::ZERO;
        };
        let base = control
            .parent
            .map_or(Point::ZERO, |parent| self.client_rect(parent).location());
        Rect::new(
            base.x + control.left + control.left_modifier,
            base.y + control.top + control.top_modifier,
            control.width,
            control.height,
        )
    }

    /// Absolute rect grown by the skin's origin margins.
    #[must_use]
    pub fn origin_rect(&self, id: ControlId) -> Rect {
        match self.controls.get(id) {
            Some(control) => self.absolute_rect(id).expand(control.skin.origin_margins),
            None => Rect::ZERO,
        }
    }

    /// Origin rect inset by the skin's client margins.
    #[must_use]
    pub fn client_rect(&self, id: ControlId) -> Rect {
        match self.controls.get(id) {
            Some(control) => self.origin_rect(id).inset(control.skin.client_margins),
            None => Rect::ZERO,
        }
    }

    /// Size of the client rect.
    #[must_use]
    pub fn client_size(&self, id: ControlId) -> Size {
        self.client_rect(id).size()
    }

    /// Size children lay out against: the virtual size of scrolling
    /// containers, the client size of anything else.
    #[must_use]
    pub fn virtual_size(&self, id: ControlId) -> Size {
        match self.controls.get(id) {
            Some(control) if control.kind.container().is_some() => self.container_virtual_size(id),
            Some(_) => self.client_size(id),
            None => Size::ZERO,
        }
    }

    /// Space a control's anchors refer to. Roots anchor to the render target.
    pub(crate) fn anchor_space(&self, parent: Option<ControlId>) -> Size {
        parent.map_or(self.target, |p| self.virtual_size(p))
    }

    /// Returns true if the point lies inside the control's absolute rect.
    #[must_use]
    pub fn check_position(&self, id: ControlId, position: Point) -> bool {
        self.absolute_rect(id).contains(position)
    }

    /// Sets the local X.
    pub fn set_left(&mut self, id: ControlId, left: i32) {
        if let Some(b) = self.bounds_of(id) {
            self.apply_bounds(id, Rect::new(left, b.top, b.width, b.height));
        }
    }

    /// Sets the local Y.
    pub fn set_top(&mut self, id: ControlId, top: i32) {
        if let Some(b) = self.bounds_of(id) {
            self.apply_bounds(id, Rect::new(b.left, top, b.width, b.height));
        }
    }

    /// Sets the local position.
    pub fn set_location(&mut self, id: ControlId, location: Point) {
        if let Some(b) = self.bounds_of(id) {
            self.apply_bounds(id, Rect::from_parts(location, b.size()));
        }
    }

    /// Sets the width, clamped to the control's limits.
    pub fn set_width(&mut self, id: ControlId, width: i32) {
        if let Some(b) = self.bounds_of(id) {
            self.apply_bounds(id, Rect::new(b.left, b.top, width, b.height));
        }
    }

    /// Sets the height, clamped to the control's limits.
    pub fn set_height(&mut self, id: ControlId, height: i32) {
        if let Some(b) = self.bounds_of(id) {
            self.apply_bounds(id, Rect::new(b.left, b.top, b.width, height));
        }
    }

    /// Sets width and height, clamped.
    pub fn set_size(&mut self, id: ControlId, size: Size) {
        if let Some(b) = self.bounds_of(id) {
            self.apply_bounds(id, Rect::from_parts(b.location(), size));
        }
    }

    /// Sets the whole local box, clamped.
    pub fn set_bounds(&mut self, id: ControlId, bounds: Rect) {
        self.apply_bounds(id, bounds);
    }

    /// Sets the lower size bound and re-clamps.
    pub fn set_min_size(&mut self, id: ControlId, size: Size) {
        if let Some(control) = self.controls.get_mut(id) {
            control.min_size = Size::new(size.width.max(0), size.height.max(0));
            self.clamp_to_limits(id);
        }
    }

    /// Sets the upper size bound and re-clamps. The render target size
    /// always caps it further.
    pub fn set_max_size(&mut self, id: ControlId, size: Size) {
        if let Some(control) = self.controls.get_mut(id) {
            control.max_size = size;
            self.clamp_to_limits(id);
        }
    }

    /// Changes the anchored edges.
    pub fn set_anchor(&mut self, id: ControlId, anchor: Anchors) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        if control.anchor == anchor {
            return;
        }
        control.anchor = anchor;
        self.capture_anchor_margins(id);
        self.emit(id, EventKind::AnchorChanged);

        if let Some(parent) = self.parent_container(id) {
            self.update_scrolling(parent);
        }
    }

    /// Re-applies min/max limits to the current size.
    pub(crate) fn clamp_to_limits(&mut self, id: ControlId) {
        if let Some(bounds) = self.bounds_of(id) {
            self.apply_bounds(id, bounds);
        }
    }

    fn bounds_of(&self, id: ControlId) -> Option<Rect> {
        self.controls.get(id).map(super::Control::bounds)
    }

    /// Parent, if it is a scrolling container and `id` is regular content.
    pub(crate) fn parent_container(&self, id: ControlId) -> Option<ControlId> {
        let control = self.controls.get(id)?;
        if control.is_internal() {
            return None;
        }
        let parent = control.parent?;
        self.controls
            .get(parent)
            .and_then(|p| p.kind.container())
            .map(|_| parent)
    }

    /// Stores distances to the parent's edges for later reflow.
    pub(crate) fn capture_anchor_margins(&mut self, id: ControlId) {
        let Some(control) = self.controls.get(id) else {
            return;
        };
        let space = self.anchor_space(control.parent);
        let margins = anchor_margins(control.bounds(), space);
        if let Some(control) = self.controls.get_mut(id) {
            control.anchor_margins = margins;
        }
    }

    /// The single write path for geometry: clamps, stores, captures anchor
    /// margins, queues events, reflows children and refreshes scrolling.
    pub(crate) fn apply_bounds(&mut self, id: ControlId, requested: Rect) {
        let limit = self.size_limit(id);
        let Some(control) = self.controls.get(id) else {
            return;
        };
        let min = control.min_size;
        let bounds = Rect::new(
            requested.left,
            requested.top,
            requested.width.min(limit.width).max(min.width),
            requested.height.min(limit.height).max(min.height),
        );
        let old = control.bounds();
        if bounds == old {
            return;
        }

        let old_space = self.virtual_size(id);
        if let Some(control) = self.controls.get_mut(id) {
            control.left = bounds.left;
            control.top = bounds.top;
            control.width = bounds.width;
            control.height = bounds.height;
        }
        self.capture_anchor_margins(id);

        if bounds.location() != old.location() {
            self.emit(id, EventKind::Moved { old: old.location() });
        }
        if bounds.size() != old.size() {
            self.emit(id, EventKind::Resized { old: old.size() });
            self.reflow_children(id, old_space);
        }

        if let Some(parent) = self.parent_container(id) {
            self.update_scrolling(parent);
        }
        self.invalidate(id);
    }

    /// Reflows every regular child after `id` changed size.
    fn reflow_children(&mut self, id: ControlId, old_space: Size) {
        let is_container = self
            .controls
            .get(id)
            .is_some_and(|c| c.kind.container().is_some());
        if is_container {
            self.update_scrolling(id);
        }

        let new_space = self.virtual_size(id);
        let children: Vec<ControlId> = self
            .controls
            .get(id)
            .map(|c| c.children.clone())
            .unwrap_or_default();
        for child in children {
            if self.controls.get(child).is_some_and(|c| !c.is_internal()) {
                self.reflow_child(child, old_space, new_space, new_space);
            }
        }

        if is_container {
            self.update_scrolling(id);
        }
    }

    /// Applies the anchor rules to one child after its parent's layout space
    /// went from `old_space` to `new_space`.
    pub(crate) fn reflow_child(
        &mut self,
        child: ControlId,
        old_space: Size,
        new_space: Size,
        new_virtual: Size,
    ) {
        let Some(control) = self.controls.get(child) else {
            return;
        };
        let bounds = reflow(
            control.anchor,
            control.bounds(),
            control.anchor_margins,
            old_space,
            new_space,
            new_virtual,
        );
        self.apply_bounds(child, bounds);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_core::Margins;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::{Skin, SkinControl};

    fn manager() -> Manager {
        Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap()
    }

    #[test]
    fn test_child_is_offset_by_parent_client_origin() {
        let mut skin = Skin::default_theme();
        skin.insert_control(SkinControl {
            name: "Container".to_string(),
            origin_margins: Margins::uniform(3),
            client_margins: Margins::new(5, 20, 5, 5),
            ..SkinControl::default()
        });
        let mut ui = Manager::new(UiConfig::default(), Arc::new(skin)).unwrap();

        let parent = ui.create_container().unwrap();
        ui.add_root(parent);
        ui.set_bounds(parent, Rect::new(100, 50, 300, 200));
        let child = ui.create_control().unwrap();
        ui.add(parent, child);
        ui.set_location(child, Point::new(10, 10));

        // 100 - 3 + 5 + 10, 50 - 3 + 20 + 10
        assert_eq!(ui.absolute_rect(child).location(), Point::new(112, 77));
        assert_eq!(ui.origin_rect(parent), Rect::new(97, 47, 306, 206));
        assert_eq!(ui.client_rect(parent), Rect::new(102, 67, 296, 181));
    }

    #[test]
    fn test_width_clamps_and_repeats_quietly() {
        let mut ui = manager();
        let id = ui.create_control().unwrap();
        ui.set_min_size(id, Size::new(20, 10));
        ui.set_max_size(id, Size::new(200, 100));
        ui.drain_events();

        ui.set_width(id, 5);
        assert_eq!(ui.control(id).unwrap().width(), 20);
        assert_eq!(ui.drain_events().len(), 1);

        ui.set_width(id, 5);
        assert!(ui.drain_events().is_empty());

        ui.set_width(id, 5000);
        assert_eq!(ui.control(id).unwrap().width(), 200);
    }

    #[test]
    fn test_max_is_capped_by_target() {
        let mut ui = manager();
        let id = ui.create_control().unwrap();
        ui.set_width(id, 10_000);
        assert_eq!(ui.control(id).unwrap().width(), ui.target_size().width);
    }

    #[test]
    fn test_anchor_reflow_on_parent_resize() {
        let mut ui = manager();
        let parent = ui.create_control().unwrap();
        ui.add_root(parent);
        ui.set_bounds(parent, Rect::new(0, 0, 200, 100));

        let pinned = ui.create_control().unwrap();
        let stretched = ui.create_control().unwrap();
        let right = ui.create_control().unwrap();
        for child in [pinned, stretched, right] {
            ui.add(parent, child);
        }
        ui.set_bounds(pinned, Rect::new(10, 10, 30, 20));
        ui.set_bounds(stretched, Rect::new(10, 40, 100, 20));
        ui.set_anchor(stretched, Anchors::LEFT | Anchors::RIGHT | Anchors::TOP);
        ui.set_bounds(right, Rect::new(150, 70, 40, 20));
        ui.set_anchor(right, Anchors::RIGHT | Anchors::BOTTOM);

        ui.set_size(parent, Size::new(260, 130));

        assert_eq!(ui.control(pinned).unwrap().bounds(), Rect::new(10, 10, 30, 20));
        assert_eq!(ui.control(stretched).unwrap().bounds(), Rect::new(10, 40, 160, 20));
        assert_eq!(ui.control(right).unwrap().bounds(), Rect::new(210, 100, 40, 20));
    }

    #[test]
    fn test_roots_reflow_with_target() {
        let mut ui = manager();
        let root = ui.create_control().unwrap();
        ui.add_root(root);
        ui.set_bounds(root, Rect::new(0, 0, 1280, 40));
        ui.set_anchor(root, Anchors::LEFT | Anchors::TOP | Anchors::RIGHT);

        ui.set_target_size(Size::new(1024, 768));
        assert_eq!(ui.control(root).unwrap().width(), 1024);
    }
}
