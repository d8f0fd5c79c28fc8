//! Hit areas, drag move/resize and click tracking.
//!
//! A drag remembers the cursor position and the local box at press time.
//! Every later mouse move recomputes the box from those two values, so the
//! edge opposite to the one being dragged never drifts:
//!
//! ```text
//!   press ──▶ zone picked from the resize band, or Move from the movable area
//!   move  ──▶ proposal = start box + cursor delta on the dragged edges
//!             hook may shrink/grow the proposal; pinned edges are restored
//!             outline mode: proposal goes to `outline`, else applied live
//!   up    ──▶ outline committed, drag cleared
//! ```

use std::time::Duration;

use tessera_core::{Anchors, Point, Rect, Size};

use super::{ClickKind, ControlFlags, ControlId, DragState};
use crate::event::EventKind;
use crate::input::MouseButton;
use crate::skin::cursors;
use crate::Manager;

/// One of the eight resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeZone {
    /// Top-left corner.
    TopLeft,
    /// Top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge.
    Left,
}

impl ResizeZone {
    /// Edges this zone moves.
    #[must_use]
    pub const fn edges(self) -> Anchors {
        match self {
            Self::TopLeft => Anchors::from_bits(Anchors::TOP.bits() | Anchors::LEFT.bits()),
            Self::Top => Anchors::TOP,
            Self::TopRight => Anchors::from_bits(Anchors::TOP.bits() | Anchors::RIGHT.bits()),
            Self::Right => Anchors::RIGHT,
            Self::BottomRight => Anchors::from_bits(Anchors::BOTTOM.bits() | Anchors::RIGHT.bits()),
            Self::Bottom => Anchors::BOTTOM,
            Self::BottomLeft => Anchors::from_bits(Anchors::BOTTOM.bits() | Anchors::LEFT.bits()),
            Self::Left => Anchors::LEFT,
        }
    }

    /// Cursor shown over this zone.
    #[must_use]
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::Left | Self::Right => cursors::HORIZONTAL,
            Self::Top | Self::Bottom => cursors::VERTICAL,
            Self::TopLeft | Self::BottomRight => cursors::DIAGONAL_LEFT,
            Self::TopRight | Self::BottomLeft => cursors::DIAGONAL_RIGHT,
        }
    }

    fn from_edges(left: bool, top: bool, right: bool, bottom: bool) -> Option<Self> {
        match (left, top, right, bottom) {
            (true, true, _, _) => Some(Self::TopLeft),
            (_, true, true, _) => Some(Self::TopRight),
            (_, _, true, true) => Some(Self::BottomRight),
            (true, _, _, true) => Some(Self::BottomLeft),
            (true, _, _, _) => Some(Self::Left),
            (_, true, _, _) => Some(Self::Top),
            (_, _, true, _) => Some(Self::Right),
            (_, _, _, true) => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// What an active drag does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragMode {
    /// No drag.
    #[default]
    None,
    /// Moving the whole control.
    Move,
    /// Resizing from a handle.
    Resize(ResizeZone),
}

impl Manager {
    /// Area (absolute) that starts a drag move.
    #[must_use]
    pub fn movable_rect(&self, id: ControlId) -> Rect {
        let Some(control) = self.controls.get(id) else {
            return Rect::ZERO;
        };
        let abs = self.absolute_rect(id);
        match control.movable_area {
            Some(area) => area.offset(abs.left, abs.top),
            None if control.kind.is_window() => {
                // Caption strip: from the top of the box down to the client area.
                let caption = self.client_rect(id).top - abs.top;
                Rect::new(abs.left, abs.top, abs.width, caption.max(0))
            }
            None => abs,
        }
    }

    /// Returns true if a press at `position` would start a drag move.
    #[must_use]
    pub fn check_movable_area(&self, id: ControlId, position: Point) -> bool {
        self.controls
            .get(id)
            .is_some_and(|c| c.flags.has(ControlFlags::MOVABLE))
            && self.movable_rect(id).contains(position)
    }

    /// Resize handle under `position`, if the control is resizable there.
    #[must_use]
    pub fn resize_zone_at(&self, id: ControlId, position: Point) -> Option<ResizeZone> {
        let control = self.controls.get(id)?;
        if !control.flags.has(ControlFlags::RESIZABLE) {
            return None;
        }
        let abs = self.absolute_rect(id);
        if !abs.contains(position) {
            return None;
        }

        let band = control.resizer_size;
        let edges = control.resize_edges;
        let x = position.x - abs.left;
        let y = position.y - abs.top;
        ResizeZone::from_edges(
            edges.contains(Anchors::LEFT) && x < band,
            edges.contains(Anchors::TOP) && y < band,
            edges.contains(Anchors::RIGHT) && x >= abs.width - band,
            edges.contains(Anchors::BOTTOM) && y >= abs.height - band,
        )
    }

    /// Returns true if `position` lies in the resize band of an enabled edge.
    #[must_use]
    pub fn check_resizable_area(&self, id: ControlId, position: Point) -> bool {
        self.resize_zone_at(id, position).is_some()
    }

    /// Starts a drag if the press landed on a resize handle or the movable area.
    pub(crate) fn begin_drag(&mut self, id: ControlId, position: Point) {
        let mode = if let Some(zone) = self.resize_zone_at(id, position) {
            DragMode::Resize(zone)
        } else if self.check_movable_area(id, position) {
            DragMode::Move
        } else {
            return;
        };

        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        control.drag = DragState {
            mode,
            press: position,
            start: control.bounds(),
        };
        control.outline = None;

        let kind = if mode == DragMode::Move {
            EventKind::MoveBegin
        } else {
            EventKind::ResizeBegin
        };
        self.emit(id, kind);
    }

    /// Returns true while a drag is active on the control.
    #[must_use]
    pub fn is_dragging(&self, id: ControlId) -> bool {
        self.controls
            .get(id)
            .is_some_and(|c| c.drag.mode != DragMode::None)
    }

    /// Follows the cursor during a drag.
    pub(crate) fn drag_to(&mut self, id: ControlId, position: Point) {
        let Some(control) = self.controls.get(id) else {
            return;
        };
        let drag = control.drag;
        let outline_moving = control.flags.has(ControlFlags::OUTLINE_MOVING);
        let outline_resizing = control.flags.has(ControlFlags::OUTLINE_RESIZING);
        let dx = position.x - drag.press.x;
        let dy = position.y - drag.press.y;

        let (proposal, outline_mode) = match drag.mode {
            DragMode::None => return,
            DragMode::Move => (drag.start.offset(dx, dy), outline_moving),
            DragMode::Resize(zone) => (
                self.resize_proposal(id, zone, drag.start, dx, dy),
                outline_resizing,
            ),
        };

        if outline_mode {
            if let Some(control) = self.controls.get_mut(id) {
                control.outline = Some(proposal);
            }
            self.invalidate(id);
        } else {
            self.apply_bounds(id, proposal);
        }
    }

    /// Box for a resize drag, after clamping and the validate hook, with the
    /// dragged edges adjusted so the opposite edges stay where they were.
    fn resize_proposal(
        &mut self,
        id: ControlId,
        zone: ResizeZone,
        start: Rect,
        dx: i32,
        dy: i32,
    ) -> Rect {
        let edges = zone.edges();
        let mut width = start.width;
        let mut height = start.height;
        if edges.contains(Anchors::LEFT) {
            width -= dx;
        }
        if edges.contains(Anchors::RIGHT) {
            width += dx;
        }
        if edges.contains(Anchors::TOP) {
            height -= dy;
        }
        if edges.contains(Anchors::BOTTOM) {
            height += dy;
        }

        let size = self.clamp_size(id, Size::new(width, height));
        let size = match self.resize_hooks.get_mut(id) {
            Some(hook) => {
                let adjusted = hook(id, size);
                self.clamp_size(id, adjusted)
            }
            None => size,
        };

        let left = if edges.contains(Anchors::LEFT) {
            start.right() - size.width
        } else {
            start.left
        };
        let top = if edges.contains(Anchors::TOP) {
            start.bottom() - size.height
        } else {
            start.top
        };
        Rect::new(left, top, size.width, size.height)
    }

    fn clamp_size(&self, id: ControlId, size: Size) -> Size {
        let limit = self.size_limit(id);
        let min = self.controls.get(id).map_or(Size::ZERO, |c| c.min_size);
        Size::new(
            size.width.min(limit.width).max(min.width),
            size.height.min(limit.height).max(min.height),
        )
    }

    /// Finishes a drag, committing a staged outline.
    pub(crate) fn end_drag(&mut self, id: ControlId) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        let mode = std::mem::take(&mut control.drag.mode);
        let outline = control.outline.take();

        if let Some(rect) = outline {
            self.apply_bounds(id, rect);
        }
        match mode {
            DragMode::None => {}
            DragMode::Move => self.emit(id, EventKind::MoveEnd),
            DragMode::Resize(_) => self.emit(id, EventKind::ResizeEnd),
        }
    }

    /// Classifies a validated click and queues `Click` or `DoubleClick`.
    pub(crate) fn register_click(
        &mut self,
        id: ControlId,
        button: MouseButton,
    ) -> Option<ClickKind> {
        let window = Duration::from_millis(u64::from(self.config.double_click_time_ms));
        let now = self.clock;
        let control = self.controls.get_mut(id)?;
        let kind = control.clicks.register(button, now, window);
        match kind {
            ClickKind::Single => self.emit(id, EventKind::Click { button }),
            ClickKind::Double => self.emit(id, EventKind::DoubleClick { button }),
        }
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn window() -> (Manager, ControlId) {
        let mut ui = Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap();
        let id = ui.create_window().unwrap();
        ui.add_root(id);
        ui.set_bounds(id, Rect::new(100, 100, 200, 150));
        (ui, id)
    }

    #[test]
    fn test_zones() {
        let (ui, id) = window();
        assert_eq!(ui.resize_zone_at(id, Point::new(101, 101)), Some(ResizeZone::TopLeft));
        assert_eq!(ui.resize_zone_at(id, Point::new(299, 200)), Some(ResizeZone::Right));
        assert_eq!(ui.resize_zone_at(id, Point::new(200, 249)), Some(ResizeZone::Bottom));
        assert_eq!(ui.resize_zone_at(id, Point::new(299, 249)), Some(ResizeZone::BottomRight));
        assert_eq!(ui.resize_zone_at(id, Point::new(200, 200)), None);
    }

    #[test]
    fn test_disabled_edge_has_no_zone() {
        let (mut ui, id) = window();
        ui.set_resize_edges(id, Anchors::RIGHT | Anchors::BOTTOM);
        assert_eq!(ui.resize_zone_at(id, Point::new(101, 200)), None);
        assert_eq!(ui.resize_zone_at(id, Point::new(101, 249)), Some(ResizeZone::Bottom));
    }

    #[test]
    fn test_left_resize_pins_right_edge() {
        let (mut ui, id) = window();
        ui.begin_drag(id, Point::new(101, 200));
        ui.drag_to(id, Point::new(61, 200));

        let bounds = ui.control(id).unwrap().bounds();
        assert_eq!(bounds, Rect::new(60, 100, 240, 150));

        // Past the minimum width the right edge still stays put.
        ui.drag_to(id, Point::new(400, 200));
        let bounds = ui.control(id).unwrap().bounds();
        assert_eq!(bounds.right(), 300);
        assert_eq!(bounds.width, 64);
    }

    #[test]
    fn test_validate_hook_snaps_with_compensation() {
        let (mut ui, id) = window();
        ui.set_validate_resize(id, |_, size| Size::new(size.width / 50 * 50, size.height));

        ui.begin_drag(id, Point::new(101, 200));
        ui.drag_to(id, Point::new(71, 200));

        let bounds = ui.control(id).unwrap().bounds();
        assert_eq!(bounds.width, 200);
        assert_eq!(bounds.right(), 300);
    }

    #[test]
    fn test_outline_move_commits_on_release() {
        let (mut ui, id) = window();
        ui.set_outline_moving(id, true);

        // Caption strip.
        ui.begin_drag(id, Point::new(150, 110));
        ui.drag_to(id, Point::new(170, 130));
        assert_eq!(ui.control(id).unwrap().left(), 100);
        assert_eq!(ui.control(id).unwrap().outline(), Some(Rect::new(120, 120, 200, 150)));

        ui.end_drag(id);
        assert_eq!(ui.control(id).unwrap().bounds(), Rect::new(120, 120, 200, 150));
        assert_eq!(ui.control(id).unwrap().outline(), None);
    }

    #[test]
    fn test_outline_resize_stages_until_release() {
        let (mut ui, id) = window();
        ui.set_outline_resizing(id, true);

        ui.begin_drag(id, Point::new(299, 249));
        ui.drag_to(id, Point::new(329, 269));
        assert_eq!(ui.control(id).unwrap().bounds(), Rect::new(100, 100, 200, 150));
        assert_eq!(ui.control(id).unwrap().outline(), Some(Rect::new(100, 100, 230, 170)));

        ui.end_drag(id);
        assert_eq!(ui.control(id).unwrap().bounds(), Rect::new(100, 100, 230, 170));
    }
}
