//! Hover tooltips.
//!
//! Hovering a control with tooltip text starts a timer; once it passes the
//! configured delay, the control's tooltip is shown near the cursor as a
//! passive, stay-on-top root. The tooltip control is created on first use and
//! disposed with its owner. Leaving the control, pressing a button or any key
//! hides it until the hover target changes.

use std::time::Duration;

use tessera_core::{Margins, Point, Rect, Size};

use crate::control::{ControlFlags, ControlId};
use crate::skin::SkinFont;
use crate::widgets::ControlKind;
use crate::Manager;

/// Gap between the cursor and the tooltip.
const CURSOR_OFFSET: Point = Point::new(0, 20);

#[derive(Debug, Default)]
pub(crate) struct TooltipTimer {
    /// Control whose tooltip is pending or shown.
    pub target: Option<ControlId>,
    elapsed: Duration,
    shown: Option<ControlId>,
    suppressed: bool,
}

impl TooltipTimer {
    /// Drops references to a disposed control.
    pub fn forget(&mut self, id: ControlId) {
        if self.target == Some(id) {
            self.target = None;
        }
        if self.shown == Some(id) {
            self.shown = None;
        }
    }
}

impl Manager {
    /// Tooltip currently on screen.
    #[must_use]
    pub fn shown_tooltip(&self) -> Option<ControlId> {
        self.tooltip.shown
    }

    /// Restarts the timer for a new hover target.
    pub(crate) fn reset_tooltip(&mut self, over: Option<ControlId>) {
        self.hide_tooltip();
        self.tooltip.target = over.filter(|id| {
            self.controls
                .get(*id)
                .is_some_and(|c| !c.tool_tip_text.is_empty())
        });
        self.tooltip.elapsed = Duration::ZERO;
        self.tooltip.suppressed = false;
    }

    /// Hides the tooltip until the hover target changes.
    pub(crate) fn hide_tooltip(&mut self) {
        self.tooltip.suppressed = true;
        if let Some(tip) = self.tooltip.shown.take() {
            self.set_visible(tip, false);
        }
    }

    /// Advances the hover timer.
    pub(crate) fn update_tooltip(&mut self, elapsed: Duration) {
        let Some(target) = self.tooltip.target else {
            return;
        };
        if self.tooltip.shown.is_some() || self.tooltip.suppressed {
            return;
        }
        self.tooltip.elapsed += elapsed;
        let delay = Duration::from_millis(u64::from(self.config.tooltip_delay_ms));
        if self.tooltip.elapsed >= delay {
            self.show_tooltip(target);
        }
    }

    fn show_tooltip(&mut self, target: ControlId) {
        let Some(owner) = self.controls.get(target) else {
            return;
        };
        let text = owner.tool_tip_text.clone();
        let tip = match owner.tool_tip.filter(|tip| self.contains(*tip)) {
            Some(tip) => tip,
            None => match self.create_tooltip(target) {
                Some(tip) => tip,
                None => return,
            },
        };
        self.set_text(tip, &text);

        let size = self.tooltip_size(tip, &text);
        let cursor = self.mouse_position() + CURSOR_OFFSET;
        let left = cursor.x.min(self.target.width - size.width).max(0);
        let top = cursor.y.min(self.target.height - size.height).max(0);
        self.set_bounds(tip, Rect::new(left, top, size.width, size.height));

        self.add_root(tip);
        self.set_visible(tip, true);
        self.bring_to_front(tip);
        self.tooltip.shown = Some(tip);
        tracing::debug!(owner = ?target, "tooltip shown");
    }

    fn create_tooltip(&mut self, owner: ControlId) -> Option<ControlId> {
        let tip = match self.create(ControlKind::ToolTip) {
            Ok(tip) => tip,
            Err(err) => {
                tracing::warn!(%err, "tooltip skin unavailable");
                return None;
            }
        };
        if let Some(control) = self.controls.get_mut(tip) {
            control.flags.set(ControlFlags::PASSIVE | ControlFlags::STAY_ON_TOP);
            control.flags.clear(ControlFlags::CAN_FOCUS | ControlFlags::VISIBLE);
        }
        if let Some(control) = self.controls.get_mut(owner) {
            control.tool_tip = Some(tip);
        }
        Some(tip)
    }

    /// Text extent plus the skin's margins, never below the default size.
    fn tooltip_size(&self, tip: ControlId, text: &str) -> Size {
        let Some(control) = self.controls.get(tip) else {
            return Size::ZERO;
        };
        let font = control
            .skin
            .layer(super::BASE_LAYER)
            .and_then(|layer| layer.text.as_ref())
            .and_then(|text| self.skin.font(&text.font))
            .cloned()
            .unwrap_or_else(SkinFont::default);
        let padding: Margins = control.skin.client_margins;
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        let width = chars.saturating_mul(font.char_width) + padding.horizontal();
        let height = font.height + padding.vertical();
        Size::new(width, height).max(control.skin.default_size)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn hovered() -> (Manager, ControlId) {
        let mut ui = Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap();
        let button = ui.create_button("Save").unwrap();
        ui.add_root(button);
        ui.set_tool_tip_text(button, "Write the file to disk");
        ui.reset_tooltip(Some(button));
        (ui, button)
    }

    #[test]
    fn test_tooltip_appears_after_delay() {
        let (mut ui, button) = hovered();
        ui.update_tooltip(Duration::from_millis(300));
        assert_eq!(ui.shown_tooltip(), None);

        ui.update_tooltip(Duration::from_millis(300));
        let tip = ui.shown_tooltip().unwrap();
        let control = ui.control(tip).unwrap();
        assert_eq!(control.text(), "Write the file to disk");
        assert!(control.visible() && control.passive());
        assert_eq!(ui.control(button).unwrap().tool_tip_text(), control.text());
    }

    #[test]
    fn test_hidden_until_target_changes() {
        let (mut ui, button) = hovered();
        ui.update_tooltip(Duration::from_secs(1));
        let tip = ui.shown_tooltip().unwrap();

        ui.hide_tooltip();
        ui.update_tooltip(Duration::from_secs(1));
        assert!(!ui.control(tip).unwrap().visible());

        ui.reset_tooltip(Some(button));
        ui.update_tooltip(Duration::from_secs(1));
        assert_eq!(ui.shown_tooltip(), Some(tip));
    }

    #[test]
    fn test_tooltip_disposed_with_owner() {
        let (mut ui, button) = hovered();
        ui.update_tooltip(Duration::from_secs(1));
        let tip = ui.shown_tooltip().unwrap();

        ui.dispose(button);
        assert!(!ui.contains(tip));
        assert_eq!(ui.shown_tooltip(), None);
    }
}
