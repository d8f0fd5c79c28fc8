//! Anchor flags and reflow.
//!
//! An anchor pins a control's edges to its parent's edges. When the parent
//! resizes, [`reflow`] computes the control's new box:
//!
//! | Left | Right | Result on the horizontal axis                    |
//! |------|-------|--------------------------------------------------|
//! | yes  | no    | unchanged                                        |
//! | no   | yes   | moves to keep its right margin                   |
//! | yes  | yes   | stretches to keep both margins                   |
//! | no   | no    | re-centers by half of the parent's size delta    |
//!
//! The vertical axis follows the same table with Top/Bottom.

use serde::{Deserialize, Serialize};

use crate::math::{Margins, Rect, Size};

/// Which parent edges a control tracks (bitfield).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchors(u8);

impl Anchors {
    /// Not pinned to any edge.
    pub const NONE: Self = Self(0);
    /// Pinned to the left edge.
    pub const LEFT: Self = Self(1 << 0);
    /// Pinned to the top edge.
    pub const TOP: Self = Self(1 << 1);
    /// Pinned to the right edge.
    pub const RIGHT: Self = Self(1 << 2);
    /// Pinned to the bottom edge.
    pub const BOTTOM: Self = Self(1 << 3);
    /// Pinned to every edge.
    pub const ALL: Self = Self(0b1111);

    /// Default anchoring for new controls.
    pub const DEFAULT: Self = Self(Self::LEFT.0 | Self::TOP.0);

    /// Creates anchors from raw bits (extra bits are dropped).
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every edge in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns true if no edge is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::ops::BitOr for Anchors {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Anchors {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Distances from each side of `bounds` to the edges of a parent whose
/// (virtual) size is `parent`.
///
/// Captured every time the control's own geometry changes, so that a later
/// parent resize can restore them.
#[must_use]
pub const fn anchor_margins(bounds: Rect, parent: Size) -> Margins {
    Margins::new(
        bounds.left,
        bounds.top,
        parent.width - bounds.width - bounds.left,
        parent.height - bounds.height - bounds.top,
    )
}

/// Offset applied to an unanchored control when its parent goes from
/// `old_size` to `new_size` along one axis.
///
/// The delta is halved with truncation toward zero. When the new size is odd
/// the delta is first pushed one pixel away from zero, so repeated odd
/// resizes don't drift the control toward one side.
#[must_use]
pub const fn center_shift(new_size: i32, old_size: i32) -> i32 {
    let mut diff = new_size - old_size;
    if new_size % 2 != 0 && diff != 0 {
        diff += diff.signum();
    }
    diff / 2
}

/// Computes the box of an anchored control after its parent resized.
///
/// * `bounds` - the control's current local box
/// * `margins` - anchor margins captured against the parent's old size
/// * `old_parent`/`new_parent` - the parent's size before and after
/// * `new_virtual` - the parent's virtual size after the resize
#[must_use]
pub fn reflow(
    anchor: Anchors,
    bounds: Rect,
    margins: Margins,
    old_parent: Size,
    new_parent: Size,
    new_virtual: Size,
) -> Rect {
    let mut result = bounds;

    let left = anchor.contains(Anchors::LEFT);
    let right = anchor.contains(Anchors::RIGHT);
    match (left, right) {
        (false, true) => result.left = new_virtual.width - bounds.width - margins.right,
        (true, true) => result.width = new_virtual.width - bounds.left - margins.right,
        (false, false) => result.left += center_shift(new_parent.width, old_parent.width),
        (true, false) => {}
    }

    let top = anchor.contains(Anchors::TOP);
    let bottom = anchor.contains(Anchors::BOTTOM);
    match (top, bottom) {
        (false, true) => result.top = new_virtual.height - bounds.height - margins.bottom,
        (true, true) => result.height = new_virtual.height - bounds.top - margins.bottom,
        (false, false) => result.top += center_shift(new_parent.height, old_parent.height),
        (true, false) => {}
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reflow_by(anchor: Anchors, bounds: Rect, dw: i32, dh: i32) -> Rect {
        let old = Size::new(200, 100);
        let new = Size::new(200 + dw, 100 + dh);
        let margins = anchor_margins(bounds, old);
        reflow(anchor, bounds, margins, old, new, new)
    }

    #[test]
    fn test_left_top_is_stationary() {
        let bounds = Rect::new(10, 10, 50, 20);
        assert_eq!(reflow_by(Anchors::DEFAULT, bounds, 37, -12), bounds);
    }

    #[test]
    fn test_left_right_stretches() {
        let bounds = Rect::new(10, 10, 50, 20);
        let out = reflow_by(Anchors::LEFT | Anchors::RIGHT | Anchors::TOP, bounds, 30, 0);

        assert_eq!(out.left, 10);
        assert_eq!(out.width, 80);
    }

    #[test]
    fn test_right_only_keeps_margin() {
        let bounds = Rect::new(100, 10, 50, 20);
        let out = reflow_by(Anchors::RIGHT | Anchors::TOP, bounds, 40, 0);

        assert_eq!(out.left, 140);
        assert_eq!(out.width, 50);
    }

    #[test]
    fn test_bottom_only_keeps_margin() {
        let bounds = Rect::new(0, 60, 50, 20);
        let out = reflow_by(Anchors::LEFT | Anchors::BOTTOM, bounds, 0, -30);
        assert_eq!(out.top, 30);
    }

    #[test]
    fn test_center_shift_rounds_away_on_odd_sizes() {
        assert_eq!(center_shift(210, 200), 5);
        assert_eq!(center_shift(201, 200), 1);
        assert_eq!(center_shift(199, 200), -1);
        assert_eq!(center_shift(200, 200), 0);
        assert_eq!(center_shift(203, 200), 2);
    }

    #[test]
    fn test_unanchored_recenters() {
        let bounds = Rect::new(75, 40, 50, 20);
        let out = reflow_by(Anchors::NONE, bounds, 20, 10);

        assert_eq!(out.left, 85);
        assert_eq!(out.top, 45);
    }
}
