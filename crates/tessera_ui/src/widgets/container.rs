//! Scrolling containers.
//!
//! A container measures the extent of its regular children and compares it
//! with its viewport (client area minus visible scrollbars). Content anchored
//! to a far edge follows the viewport and doesn't count toward the extent.
//! Scrolling writes `-value` into every regular child's modifier.

use tessera_core::{Anchors, Rect, Size};

use super::Orientation;
use crate::control::{ControlFlags, ControlId};
use crate::event::EventKind;
use crate::Manager;

/// Wheel units per notch.
pub const WHEEL_DELTA: i32 = 120;

impl Manager {
    /// Extent of visible, regular children not anchored to the far edge.
    fn content_extent(&self, id: ControlId) -> Size {
        let Some(control) = self.controls.get(id) else {
            return Size::ZERO;
        };
        control
            .children
            .iter()
            .filter_map(|child| self.controls.get(*child))
            .filter(|c| c.visible() && !c.is_internal())
            .fold(Size::ZERO, |extent, c| {
                Size::new(
                    if c.anchor.contains(Anchors::RIGHT) {
                        extent.width
                    } else {
                        extent.width.max(c.left + c.width)
                    },
                    if c.anchor.contains(Anchors::BOTTOM) {
                        extent.height
                    } else {
                        extent.height.max(c.top + c.height)
                    },
                )
            })
    }

    fn bar_thickness(&self, bar: Option<ControlId>, orientation: Orientation) -> i32 {
        bar.and_then(|b| self.controls.get(b))
            .map_or(0, |c| match orientation {
                Orientation::Vertical => c.skin.default_size.width,
                Orientation::Horizontal => c.skin.default_size.height,
            })
    }

    fn bar_visible(&self, bar: Option<ControlId>) -> bool {
        bar.and_then(|b| self.controls.get(b)).is_some_and(|c| c.visible())
    }

    /// Client area minus the visible scrollbars.
    #[must_use]
    pub fn viewport_size(&self, id: ControlId) -> Size {
        let client = self.client_size(id);
        let Some(state) = self.controls.get(id).and_then(|c| c.kind.container()).copied() else {
            return client;
        };
        let mut viewport = client;
        if self.bar_visible(state.vertical) {
            viewport.width -= self.bar_thickness(state.vertical, Orientation::Vertical);
        }
        if self.bar_visible(state.horizontal) {
            viewport.height -= self.bar_thickness(state.horizontal, Orientation::Horizontal);
        }
        Size::new(viewport.width.max(0), viewport.height.max(0))
    }

    /// `max(viewport, content extent)` per axis.
    pub(crate) fn container_virtual_size(&self, id: ControlId) -> Size {
        self.viewport_size(id).max(self.content_extent(id))
    }

    /// Recomputes scrollbar visibility, ranges and placement, then re-applies
    /// scroll offsets to the content.
    pub fn update_scrolling(&mut self, id: ControlId) {
        let Some(state) = self.controls.get(id).and_then(|c| c.kind.container()).copied() else {
            return;
        };
        let client = self.client_size(id);
        let extent = self.content_extent(id);
        let v_thick = self.bar_thickness(state.vertical, Orientation::Vertical);
        let h_thick = self.bar_thickness(state.horizontal, Orientation::Horizontal);

        let (show_v, show_h) = if state.auto_scroll {
            let mut show_v = extent.height > client.height;
            let show_h = extent.width > client.width - if show_v { v_thick } else { 0 };
            if show_h && !show_v {
                show_v = extent.height > client.height - h_thick;
            }
            (show_v, show_h)
        } else {
            (self.bar_visible(state.vertical), self.bar_visible(state.horizontal))
        };

        let viewport = Size::new(
            (client.width - if show_v { v_thick } else { 0 }).max(0),
            (client.height - if show_h { h_thick } else { 0 }).max(0),
        );
        let virtual_size = viewport.max(extent);

        if let Some(bar) = state.vertical {
            self.configure_bar(
                bar,
                show_v,
                virtual_size.height,
                viewport.height,
                Rect::new(viewport.width, 0, v_thick, viewport.height),
            );
        }
        if let Some(bar) = state.horizontal {
            self.configure_bar(
                bar,
                show_h,
                virtual_size.width,
                viewport.width,
                Rect::new(0, viewport.height, viewport.width, h_thick),
            );
        }

        self.apply_scroll(id);
        self.invalidate(id);
    }

    fn configure_bar(
        &mut self,
        bar: ControlId,
        visible: bool,
        range: i32,
        page: i32,
        bounds: Rect,
    ) {
        let Some(control) = self.controls.get_mut(bar) else {
            return;
        };
        let shown_changed = control.flags.assign(ControlFlags::VISIBLE, visible);
        let mut value_changed = None;
        if let Some(state) = control.kind.scroll_bar_mut() {
            state.range = range.max(0);
            state.page_size = page.max(0);
            state.page_step = page.max(1);
            let value = if visible { state.clamp(state.value) } else { 0 };
            if value != state.value {
                state.value = value;
                value_changed = Some((state.orientation, value));
            }
        }

        if shown_changed {
            self.order_dirty = true;
        }
        if let Some((orientation, value)) = value_changed {
            self.emit(bar, EventKind::ScrollChanged { orientation, value });
        }
        self.apply_bounds(bar, bounds);
        self.invalidate(bar);
    }

    /// Writes the current scroll values into the content's modifiers.
    pub(crate) fn apply_scroll(&mut self, id: ControlId) {
        let Some(state) = self.controls.get(id).and_then(|c| c.kind.container()).copied() else {
            return;
        };
        let dx = if self.bar_visible(state.horizontal) {
            self.bar_value(state.horizontal)
        } else {
            0
        };
        let dy = if self.bar_visible(state.vertical) {
            self.bar_value(state.vertical)
        } else {
            0
        };

        let children = self
            .controls
            .get(id)
            .map(|c| c.children.clone())
            .unwrap_or_default();
        for child in children {
            let Some(control) = self.controls.get_mut(child) else {
                continue;
            };
            if control.is_internal() {
                continue;
            }
            if control.left_modifier != -dx || control.top_modifier != -dy {
                control.left_modifier = -dx;
                control.top_modifier = -dy;
                self.invalidate(child);
            }
        }
    }

    fn bar_value(&self, bar: Option<ControlId>) -> i32 {
        bar.and_then(|b| self.controls.get(b))
            .and_then(|c| c.kind.scroll_bar())
            .map_or(0, |s| s.value)
    }

    /// Scrollbar of a container axis.
    #[must_use]
    pub fn scroll_bar_of(
        &self,
        container: ControlId,
        orientation: Orientation,
    ) -> Option<ControlId> {
        self.controls
            .get(container)
            .and_then(|c| c.kind.container())
            .and_then(|s| s.bar(orientation))
    }

    /// Current scroll offset of a container axis.
    #[must_use]
    pub fn container_scroll(&self, container: ControlId, orientation: Orientation) -> i32 {
        self.bar_value(self.scroll_bar_of(container, orientation))
    }

    /// Scrolls a container axis. The value is clamped by the scrollbar.
    pub fn set_container_scroll(
        &mut self,
        container: ControlId,
        orientation: Orientation,
        value: i32,
    ) {
        if let Some(bar) = self.scroll_bar_of(container, orientation) {
            self.set_scroll_value(bar, value);
        }
    }

    /// Turns automatic scrollbar visibility on or off.
    pub fn set_auto_scroll(&mut self, container: ControlId, value: bool) {
        let Some(state) = self
            .controls
            .get_mut(container)
            .and_then(|c| c.kind.container_mut())
        else {
            return;
        };
        if state.auto_scroll != value {
            state.auto_scroll = value;
            self.update_scrolling(container);
        }
    }

    /// Nudges a container's scroll values by the smallest amount that brings
    /// `control` (a descendant) fully into view, one direction per axis.
    pub fn scroll_to(&mut self, container: ControlId, control: ControlId) {
        if !self.is_ancestor(container, control) {
            return;
        }
        let client = self.client_rect(container);
        let view = Rect::from_parts(client.location(), self.viewport_size(container));
        let target = self.absolute_rect(control);

        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let bar = self.scroll_bar_of(container, orientation);
            if !self.bar_visible(bar) {
                continue;
            }
            let (start, end, view_start, view_end) = match orientation {
                Orientation::Vertical => (target.top, target.bottom(), view.top, view.bottom()),
                Orientation::Horizontal => (target.left, target.right(), view.left, view.right()),
            };
            let value = self.bar_value(bar);
            let nudged = if start < view_start {
                value - (view_start - start)
            } else if end > view_end {
                value + (end - view_end)
            } else {
                continue;
            };
            self.set_container_scroll(container, orientation, nudged);
        }
    }

    /// Applies a wheel delta to the nearest scrollable control at or above
    /// `start`. Returns the control that scrolled.
    pub(crate) fn scroll_by_wheel(&mut self, start: ControlId, delta: i32) -> Option<ControlId> {
        let notches = if delta.abs() >= WHEEL_DELTA {
            delta / WHEEL_DELTA
        } else {
            delta.signum()
        };

        let mut candidate = Some(start);
        while let Some(id) = candidate {
            let control = self.controls.get(id)?;
            let parent = control.parent;
            let bar = match &control.kind {
                super::ControlKind::ScrollBar(_) => Some(id),
                kind => kind.container().and_then(|state| {
                    [state.vertical, state.horizontal]
                        .into_iter()
                        .flatten()
                        .find(|bar| self.bar_can_scroll(*bar))
                }),
            };
            if let Some(bar) = bar.filter(|b| self.bar_can_scroll(*b)) {
                let (value, step) = self
                    .controls
                    .get(bar)
                    .and_then(|c| c.kind.scroll_bar())
                    .map_or((0, 0), |s| (s.value, s.step_size));
                self.set_scroll_value(bar, value - notches * step);
                return Some(bar);
            }
            candidate = parent;
        }
        None
    }

    fn bar_can_scroll(&self, bar: ControlId) -> bool {
        self.controls
            .get(bar)
            .is_some_and(|c| {
                c.visible()
                    && c.kind
                        .scroll_bar()
                        .is_some_and(super::ScrollBarState::can_scroll)
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_core::Point;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn scrolling() -> (Manager, ControlId, ControlId) {
        let mut ui = Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap();
        let container = ui.create_container().unwrap();
        ui.add_root(container);
        ui.set_bounds(container, Rect::new(0, 0, 300, 200));
        let tall = ui.create_control().unwrap();
        ui.add(container, tall);
        ui.set_bounds(tall, Rect::new(0, 0, 50, 500));
        (ui, container, tall)
    }

    fn bar(
        ui: &Manager,
        container: ControlId,
        orientation: Orientation,
    ) -> crate::widgets::ScrollBarState {
        let id = ui.scroll_bar_of(container, orientation).unwrap();
        *ui.control(id).unwrap().kind().scroll_bar().unwrap()
    }

    #[test]
    fn test_scroll_clamp_scenario() {
        let (mut ui, container, _) = scrolling();

        let vertical = bar(&ui, container, Orientation::Vertical);
        assert_eq!((vertical.range, vertical.page_size), (500, 200));
        assert!(ui.is_visible(ui.scroll_bar_of(container, Orientation::Vertical).unwrap()));
        assert!(!ui.is_visible(ui.scroll_bar_of(container, Orientation::Horizontal).unwrap()));

        ui.set_container_scroll(container, Orientation::Vertical, 1000);
        assert_eq!(ui.container_scroll(container, Orientation::Vertical), 300);
    }

    #[test]
    fn test_scrolling_moves_content() {
        let (mut ui, container, tall) = scrolling();
        ui.set_container_scroll(container, Orientation::Vertical, 120);

        assert_eq!(ui.control(tall).unwrap().modifiers(), Point::new(0, -120));
        assert_eq!(ui.absolute_rect(tall).top, -120);
        assert_eq!(ui.control(tall).unwrap().top(), 0);
    }

    #[test]
    fn test_bar_hides_and_resets_when_content_fits() {
        let (mut ui, container, tall) = scrolling();
        ui.set_container_scroll(container, Orientation::Vertical, 100);

        ui.set_height(tall, 150);

        let vertical = ui.scroll_bar_of(container, Orientation::Vertical).unwrap();
        assert!(!ui.control(vertical).unwrap().visible());
        assert_eq!(ui.container_scroll(container, Orientation::Vertical), 0);
        assert_eq!(ui.control(tall).unwrap().modifiers(), Point::ZERO);
    }

    #[test]
    fn test_far_anchored_children_do_not_extend() {
        let (mut ui, container, tall) = scrolling();
        ui.set_height(tall, 100);
        let footer = ui.create_control().unwrap();
        ui.add(container, footer);
        ui.set_bounds(footer, Rect::new(0, 400, 50, 20));
        ui.set_anchor(footer, Anchors::LEFT | Anchors::BOTTOM);

        assert_eq!(ui.virtual_size(container).height, 200);
    }

    #[test]
    fn test_scroll_to_nudges_minimally() {
        let (mut ui, container, tall) = scrolling();
        let item = ui.create_control().unwrap();
        ui.add(tall, item);
        ui.set_bounds(item, Rect::new(0, 300, 20, 20));

        ui.scroll_to(container, item);
        // Bottom edge at 320 must line up with the viewport bottom at 200.
        assert_eq!(ui.container_scroll(container, Orientation::Vertical), 120);

        ui.set_container_scroll(container, Orientation::Vertical, 300);
        ui.scroll_to(container, item);
        assert_eq!(ui.container_scroll(container, Orientation::Vertical), 300);
    }

    #[test]
    fn test_wheel_bubbles_to_container() {
        let (mut ui, container, tall) = scrolling();
        let scrolled = ui.scroll_by_wheel(tall, -240);

        assert_eq!(scrolled, ui.scroll_bar_of(container, Orientation::Vertical));
        assert_eq!(ui.container_scroll(container, Orientation::Vertical), 40);
    }
}
