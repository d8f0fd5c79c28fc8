//! Visibility, enabled state, appearance and flags.

use tessera_core::{Anchors, Color, Rect};

use super::{ControlFlags, ControlId};
use crate::event::EventKind;
use crate::widgets::ControlKind;
use crate::Manager;

impl Manager {
    /// Effective visibility: the control and every ancestor are visible.
    #[must_use]
    pub fn is_visible(&self, id: ControlId) -> bool {
        self.controls.get(id).is_some_and(|c| c.visible())
            && self
                .ancestors(id)
                .all(|a| self.controls.get(a).is_some_and(|c| c.visible()))
    }

    /// Effective enabled state.
    #[must_use]
    pub fn is_enabled(&self, id: ControlId) -> bool {
        self.controls.get(id).is_some_and(|c| c.enabled())
            && self
                .ancestors(id)
                .all(|a| self.controls.get(a).is_some_and(|c| c.enabled()))
    }

    /// Returns true if `id` is the focused control.
    #[must_use]
    pub fn is_focused(&self, id: ControlId) -> bool {
        self.focused == Some(id)
    }

    /// Shows or hides a control. Descendants keep their own flag.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        if !control.flags.assign(ControlFlags::VISIBLE, visible) {
            return;
        }
        self.emit(id, EventKind::VisibleChanged);
        if let Some(container) = self.parent_container(id) {
            self.update_scrolling(container);
        }
        self.invalidate(id);
        self.order_dirty = true;
    }

    /// Enables or disables a control together with its descendants.
    ///
    /// Enabling is rejected while any ancestor is disabled.
    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) {
        if !self.contains(id) {
            return;
        }
        if enabled
            && self
                .ancestors(id)
                .any(|a| self.controls.get(a).is_some_and(|c| !c.enabled()))
        {
            tracing::debug!(?id, "enable rejected: an ancestor is disabled");
            return;
        }

        let mut subtree = vec![id];
        subtree.extend(self.descendants(id));
        for each in subtree {
            let Some(control) = self.controls.get_mut(each) else {
                continue;
            };
            control.flags.set(ControlFlags::INVALIDATED);
            if control.flags.assign(ControlFlags::ENABLED, enabled) {
                self.emit(each, EventKind::EnabledChanged);
            }
        }
        self.invalidate(id);
    }

    /// Sets the compositing opacity (clamped to 0..=1).
    pub fn set_alpha(&mut self, id: ControlId, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        if (control.alpha - alpha).abs() <= f32::EPSILON {
            return;
        }
        control.alpha = alpha;
        self.emit(id, EventKind::AlphaChanged);
        self.invalidate(id);
    }

    /// Sets the tint. `None` returns to the skin color.
    pub fn set_color(&mut self, id: ControlId, color: Option<Color>) {
        self.update_color(id, color, |c| &mut c.color);
    }

    /// Sets the text color. `None` returns to the skin color.
    pub fn set_text_color(&mut self, id: ControlId, color: Option<Color>) {
        self.update_color(id, color, |c| &mut c.text_color);
    }

    /// Sets the background the texture is cleared to. `None` is transparent.
    pub fn set_back_color(&mut self, id: ControlId, color: Option<Color>) {
        self.update_color(id, color, |c| &mut c.back_color);
    }

    fn update_color(
        &mut self,
        id: ControlId,
        color: Option<Color>,
        field: impl FnOnce(&mut super::Control) -> &mut Option<Color>,
    ) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        let slot = field(control);
        if *slot == color {
            return;
        }
        *slot = color;
        self.emit(id, EventKind::ColorChanged);
        self.invalidate(id);
    }

    /// Sets the caption/content text.
    pub fn set_text(&mut self, id: ControlId, text: &str) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        if control.text == text {
            return;
        }
        control.text = text.to_string();
        self.emit(id, EventKind::TextChanged);
        self.invalidate(id);

        if matches!(self.controls[id].kind, ControlKind::ComboBox(_)) {
            self.sync_combo_selection(id);
        }
    }

    /// Renames a control.
    pub fn set_name(&mut self, id: ControlId, name: &str) {
        if let Some(control) = self.controls.get_mut(id) {
            control.name = name.to_string();
        }
    }

    /// Stores an opaque user value.
    pub fn set_tag(&mut self, id: ControlId, tag: u64) {
        if let Some(control) = self.controls.get_mut(id) {
            control.tag = tag;
        }
    }

    /// Sets the text of the control's tooltip. Empty text disables it.
    pub fn set_tool_tip_text(&mut self, id: ControlId, text: &str) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        control.tool_tip_text = text.to_string();
        if let Some(tip) = control.tool_tip {
            self.set_text(tip, text);
        }
    }

    /// Allows or forbids focus.
    pub fn set_can_focus(&mut self, id: ControlId, value: bool) {
        self.assign_flag(id, ControlFlags::CAN_FOCUS, value);
    }

    /// Excludes the control from hit-testing.
    pub fn set_passive(&mut self, id: ControlId, value: bool) {
        self.assign_flag(id, ControlFlags::PASSIVE, value);
    }

    /// Gives the control its own texture so it escapes parent clipping.
    pub fn set_detached(&mut self, id: ControlId, value: bool) {
        if self.assign_flag(id, ControlFlags::DETACHED, value) {
            if !value {
                self.textures.release(id);
            }
            self.invalidate(id);
            self.order_dirty = true;
        }
    }

    /// Allows dragging by the movable area.
    pub fn set_movable(&mut self, id: ControlId, value: bool) {
        self.assign_flag(id, ControlFlags::MOVABLE, value);
    }

    /// Allows dragging the border band.
    pub fn set_resizable(&mut self, id: ControlId, value: bool) {
        self.assign_flag(id, ControlFlags::RESIZABLE, value);
    }

    /// Chooses which edges can be dragged.
    pub fn set_resize_edges(&mut self, id: ControlId, edges: Anchors) {
        if let Some(control) = self.controls.get_mut(id) {
            control.resize_edges = edges;
        }
    }

    /// Width of the resize band.
    pub fn set_resizer_size(&mut self, id: ControlId, size: i32) {
        if let Some(control) = self.controls.get_mut(id) {
            control.resizer_size = size.max(0);
        }
    }

    /// Local sub-rectangle that starts a drag move. `None` uses the default
    /// (the caption strip of windows, the whole box otherwise).
    pub fn set_movable_area(&mut self, id: ControlId, area: Option<Rect>) {
        if let Some(control) = self.controls.get_mut(id) {
            control.movable_area = area;
        }
    }

    /// Pins the control after its unpinned siblings. Clears stay-on-back.
    pub fn set_stay_on_top(&mut self, id: ControlId, value: bool) {
        if value {
            self.assign_flag(id, ControlFlags::STAY_ON_BACK, false);
        }
        if self.assign_flag(id, ControlFlags::STAY_ON_TOP, value) {
            self.order_dirty = true;
        }
    }

    /// Pins the control before its unpinned siblings. Clears stay-on-top.
    pub fn set_stay_on_back(&mut self, id: ControlId, value: bool) {
        if value {
            self.assign_flag(id, ControlFlags::STAY_ON_TOP, false);
        }
        if self.assign_flag(id, ControlFlags::STAY_ON_BACK, value) {
            self.order_dirty = true;
        }
    }

    /// Stages drag resizes in an outline rect until release.
    pub fn set_outline_resizing(&mut self, id: ControlId, value: bool) {
        self.assign_flag(id, ControlFlags::OUTLINE_RESIZING, value);
    }

    /// Stages drag moves in an outline rect until release.
    pub fn set_outline_moving(&mut self, id: ControlId, value: bool) {
        self.assign_flag(id, ControlFlags::OUTLINE_MOVING, value);
    }

    /// Suspends event delivery for batch updates. Invalidation still happens.
    pub fn set_suspended(&mut self, id: ControlId, value: bool) {
        self.assign_flag(id, ControlFlags::SUSPENDED, value);
    }

    fn assign_flag(&mut self, id: ControlId, flag: u32, value: bool) -> bool {
        self.controls
            .get_mut(id)
            .is_some_and(|c| c.flags.assign(flag, value))
    }
}
