//! Scrollbar value model and track paging.

use tessera_core::{Point, Rect};

use super::{Orientation, ScrollBarState};
use crate::control::ControlId;
use crate::event::EventKind;
use crate::Manager;

/// Smallest thumb length in pixels.
pub const MIN_THUMB: i32 = 8;

/// Start and length of the thumb along a track of `track` pixels.
#[must_use]
pub fn thumb_span(state: &ScrollBarState, track: i32) -> (i32, i32) {
    if track <= 0 {
        return (0, 0);
    }
    let length = if state.range > 0 {
        ((i64::from(track) * i64::from(state.page_size.max(0))) / i64::from(state.range)) as i32
    } else {
        track
    }
    .clamp(MIN_THUMB.min(track), track);

    let max = state.max_value();
    let start = if max > 0 {
        ((i64::from(track - length) * i64::from(state.value)) / i64::from(max)) as i32
    } else {
        0
    };
    (start, length)
}

impl Manager {
    /// Current value of a scrollbar.
    #[must_use]
    pub fn scroll_value(&self, bar: ControlId) -> i32 {
        self.controls
            .get(bar)
            .and_then(|c| c.kind.scroll_bar())
            .map_or(0, |s| s.value)
    }

    /// Sets a scrollbar's value, clamped to `[0, range - page_size]`. A bar
    /// owned by a container scrolls the container's content.
    pub fn set_scroll_value(&mut self, bar: ControlId, value: i32) {
        let Some(state) = self.controls.get_mut(bar).and_then(|c| c.kind.scroll_bar_mut()) else {
            return;
        };
        let value = state.clamp(value);
        if value == state.value {
            return;
        }
        state.value = value;
        let orientation = state.orientation;

        self.emit(bar, EventKind::ScrollChanged { orientation, value });
        self.invalidate(bar);

        if let Some(owner) = self.bar_owner(bar) {
            self.apply_scroll(owner);
            self.emit(owner, EventKind::ScrollChanged { orientation, value });
        }
    }

    /// Sets the range and page size of a standalone scrollbar and re-clamps
    /// its value. Container bars are sized by their container.
    pub fn set_scroll_range(&mut self, bar: ControlId, range: i32, page_size: i32) {
        let Some(state) = self.controls.get_mut(bar).and_then(|c| c.kind.scroll_bar_mut()) else {
            return;
        };
        state.range = range.max(0);
        state.page_size = page_size.max(0);
        let value = state.value;
        self.invalidate(bar);
        self.set_scroll_value(bar, value);
    }

    /// Sets the wheel step and the track-click page step.
    pub fn set_scroll_steps(&mut self, bar: ControlId, step_size: i32, page_step: i32) {
        if let Some(state) = self.controls.get_mut(bar).and_then(|c| c.kind.scroll_bar_mut()) {
            state.step_size = step_size.max(1);
            state.page_step = page_step.max(1);
        }
    }

    /// Container whose scrollbar this is.
    fn bar_owner(&self, bar: ControlId) -> Option<ControlId> {
        let parent = self.controls.get(bar)?.parent?;
        let state = self.controls.get(parent)?.kind.container()?;
        (state.vertical == Some(bar) || state.horizontal == Some(bar)).then_some(parent)
    }

    /// Absolute rect of the thumb.
    #[must_use]
    pub fn thumb_rect(&self, bar: ControlId) -> Rect {
        let Some(state) = self.controls.get(bar).and_then(|c| c.kind.scroll_bar()) else {
            return Rect::ZERO;
        };
        let track = self.absolute_rect(bar);
        match state.orientation {
            Orientation::Vertical => {
                let (start, length) = thumb_span(state, track.height);
                Rect::new(track.left, track.top + start, track.width, length)
            }
            Orientation::Horizontal => {
                let (start, length) = thumb_span(state, track.width);
                Rect::new(track.left + start, track.top, length, track.height)
            }
        }
    }

    /// Pages toward `position` when it lies on the track outside the thumb.
    /// Returns true if the value moved.
    pub(crate) fn page_toward(&mut self, bar: ControlId, position: Point) -> bool {
        let Some(state) = self.controls.get(bar).and_then(|c| c.kind.scroll_bar()).copied() else {
            return false;
        };
        let thumb = self.thumb_rect(bar);
        let (cursor, start, end) = match state.orientation {
            Orientation::Vertical => (position.y, thumb.top, thumb.bottom()),
            Orientation::Horizontal => (position.x, thumb.left, thumb.right()),
        };
        let target = if cursor < start {
            state.value - state.page_step
        } else if cursor >= end {
            state.value + state.page_step
        } else {
            return false;
        };
        self.set_scroll_value(bar, target);
        self.scroll_value(bar) != state.value
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::UiConfig;
    use crate::skin::Skin;

    fn bar() -> (Manager, ControlId) {
        let mut ui = Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap();
        let bar = ui.create_scroll_bar(Orientation::Vertical).unwrap();
        ui.add_root(bar);
        ui.set_bounds(bar, Rect::new(0, 0, 16, 200));
        ui.set_scroll_range(bar, 400, 100);
        (ui, bar)
    }

    #[test]
    fn test_thumb_span() {
        let state = ScrollBarState {
            range: 400,
            page_size: 100,
            value: 300,
            ..ScrollBarState::new(Orientation::Vertical)
        };
        assert_eq!(thumb_span(&state, 200), (150, 50));

        let tiny = ScrollBarState {
            range: 10_000,
            page_size: 1,
            ..state
        };
        assert_eq!(thumb_span(&tiny, 200).1, MIN_THUMB);
    }

    #[test]
    fn test_value_clamps_and_emits_once() {
        let (mut ui, bar) = bar();
        ui.drain_events();

        ui.set_scroll_value(bar, 999);
        ui.set_scroll_value(bar, 999);

        assert_eq!(ui.scroll_value(bar), 300);
        let changes = ui
            .drain_events()
            .iter()
            .filter(|e| matches!(e.as_control(), Some((_, EventKind::ScrollChanged { .. }))))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_shrinking_range_reclamps() {
        let (mut ui, bar) = bar();
        ui.set_scroll_value(bar, 300);
        ui.set_scroll_range(bar, 150, 100);
        assert_eq!(ui.scroll_value(bar), 50);
    }

    #[test]
    fn test_track_click_pages() {
        let (mut ui, bar) = bar();
        assert!(ui.page_toward(bar, Point::new(8, 190)));
        assert_eq!(ui.scroll_value(bar), 50);

        // Thumb is now at 25..75; a press on it does nothing.
        assert!(!ui.page_toward(bar, Point::new(8, 40)));
        assert!(ui.page_toward(bar, Point::new(8, 5)));
        assert_eq!(ui.scroll_value(bar), 0);
    }
}
