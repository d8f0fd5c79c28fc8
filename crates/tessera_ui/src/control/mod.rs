//! The control node.
//!
//! Controls live in the manager's arena and are addressed by [`ControlId`].
//! A [`Control`] holds plain data; every mutation goes through a `Manager`
//! method so that invalidation, events and dependent layout stay consistent.
//! Those methods are split by concern:
//!
//! - `geometry` - rectangles, clamped setters, anchors and reflow
//! - `tree` - parenting, root list, disposal and lookup
//! - `state` - visibility, enabled state, colors, text and flags
//! - `interaction` - hit areas, drag move/resize and click tracking

mod geometry;
mod interaction;
mod state;
mod tree;

use std::sync::Arc;
use std::time::Duration;

use slotmap::new_key_type;
use tessera_core::{Anchors, Color, Margins, Point, Rect, Size};

use crate::input::MouseButton;
use crate::skin::{ControlState, SkinControl};
use crate::widgets::ControlKind;

pub use interaction::{DragMode, ResizeZone};

new_key_type! {
    /// Handle to a control in the manager's arena.
    pub struct ControlId;
}

/// Boolean control properties (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlFlags(u32);

impl ControlFlags {
    /// Own visibility flag.
    pub const VISIBLE: u32 = 1 << 0;
    /// Own enabled flag.
    pub const ENABLED: u32 = 1 << 1;
    /// Can receive focus.
    pub const CAN_FOCUS: u32 = 1 << 2;
    /// Ignored by hit-testing, still drawn.
    pub const PASSIVE: u32 = 1 << 3;
    /// Has its own texture and escapes the parent's clipping.
    pub const DETACHED: u32 = 1 << 4;
    /// Can be dragged by its movable area.
    pub const MOVABLE: u32 = 1 << 5;
    /// Can be resized by its border band.
    pub const RESIZABLE: u32 = 1 << 6;
    /// Sorted after unpinned siblings.
    pub const STAY_ON_TOP: u32 = 1 << 7;
    /// Sorted before unpinned siblings.
    pub const STAY_ON_BACK: u32 = 1 << 8;
    /// Drag resize stages into an outline rect.
    pub const OUTLINE_RESIZING: u32 = 1 << 9;
    /// Drag move stages into an outline rect.
    pub const OUTLINE_MOVING: u32 = 1 << 10;
    /// Part of a composite widget (scrollbars of a container).
    pub const INTERNAL: u32 = 1 << 11;
    /// Events are not queued.
    pub const SUSPENDED: u32 = 1 << 12;
    /// Cached pixels are stale.
    pub const INVALIDATED: u32 = 1 << 13;
    /// Under the cursor.
    pub const HOVERED: u32 = 1 << 14;
    /// Held by a mouse button.
    pub const PRESSED: u32 = 1 << 15;

    /// Flags of a freshly created control.
    pub const DEFAULT: Self =
        Self(Self::VISIBLE | Self::ENABLED | Self::CAN_FOCUS | Self::INVALIDATED);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag. Returns true if the flag changed.
    #[inline]
    pub fn assign(&mut self, flag: u32, value: bool) -> bool {
        let changed = self.has(flag) != value;
        if value {
            self.set(flag);
        } else {
            self.clear(flag);
        }
        changed
    }
}

/// Outcome of a validated click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// First click, or a click outside the window.
    Single,
    /// Second click of the same button within the window.
    Double,
}

/// Single/double click disambiguation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickTracker {
    last: Option<(MouseButton, Duration)>,
}

impl ClickTracker {
    /// Registers a click at `now` and classifies it.
    ///
    /// A double click resets tracking, so a third click starts over.
    pub fn register(&mut self, button: MouseButton, now: Duration, window: Duration) -> ClickKind {
        match self.last {
            Some((last, at)) if last == button && now.saturating_sub(at) <= window => {
                self.last = None;
                ClickKind::Double
            }
            _ => {
                self.last = Some((button, now));
                ClickKind::Single
            }
        }
    }
}

/// Drag bookkeeping for move/resize.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    /// What the drag does.
    pub mode: DragMode,
    /// Cursor position at press.
    pub press: Point,
    /// Local box at press.
    pub start: Rect,
}

/// A node of the control tree.
#[derive(Debug, Clone)]
pub struct Control {
    pub(crate) id: ControlId,
    pub(crate) name: String,
    pub(crate) tag: u64,
    pub(crate) kind: ControlKind,
    pub(crate) skin: Arc<SkinControl>,

    pub(crate) left: i32,
    pub(crate) top: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) min_size: Size,
    pub(crate) max_size: Size,
    pub(crate) anchor: Anchors,
    pub(crate) anchor_margins: Margins,
    pub(crate) left_modifier: i32,
    pub(crate) top_modifier: i32,

    pub(crate) parent: Option<ControlId>,
    pub(crate) root: ControlId,
    pub(crate) children: Vec<ControlId>,

    pub(crate) flags: ControlFlags,
    pub(crate) alpha: f32,
    pub(crate) color: Option<Color>,
    pub(crate) text_color: Option<Color>,
    pub(crate) back_color: Option<Color>,
    pub(crate) text: String,
    pub(crate) tool_tip_text: String,
    pub(crate) tool_tip: Option<ControlId>,

    pub(crate) resizer_size: i32,
    pub(crate) resize_edges: Anchors,
    pub(crate) movable_area: Option<Rect>,
    pub(crate) drag: DragState,
    pub(crate) outline: Option<Rect>,
    pub(crate) clicks: ClickTracker,
}

impl Control {
    pub(crate) fn new(id: ControlId, kind: ControlKind, skin: Arc<SkinControl>) -> Self {
        let mut flags = ControlFlags::DEFAULT;
        flags.assign(ControlFlags::CAN_FOCUS, kind.default_can_focus());
        let size = skin.default_size.max(skin.minimum_size);

        Self {
            id,
            name: kind.type_name().to_string(),
            tag: 0,
            kind,
            resizer_size: skin.resizer_size,
            min_size: skin.minimum_size,
            skin,
            left: 0,
            top: 0,
            width: size.width,
            height: size.height,
            max_size: Size::new(i32::MAX, i32::MAX),
            anchor: Anchors::DEFAULT,
            anchor_margins: Margins::ZERO,
            left_modifier: 0,
            top_modifier: 0,
            parent: None,
            root: id,
            children: Vec::new(),
            flags,
            alpha: 1.0,
            color: None,
            text_color: None,
            back_color: None,
            text: String::new(),
            tool_tip_text: String::new(),
            tool_tip: None,
            resize_edges: Anchors::ALL,
            movable_area: None,
            drag: DragState::default(),
            outline: None,
            clicks: ClickTracker::default(),
        }
    }

    /// Own handle.
    #[must_use]
    pub const fn id(&self) -> ControlId {
        self.id
    }

    /// Name used by [`Manager::get_control`](crate::Manager::get_control).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque user value.
    #[must_use]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Widget kind and its state.
    #[must_use]
    pub const fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Resolved skin definition.
    #[must_use]
    pub fn skin(&self) -> &SkinControl {
        &self.skin
    }

    /// Local X, relative to the parent's client origin.
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.left
    }

    /// Local Y, relative to the parent's client origin.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// Width of the logical box.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the logical box.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Local box.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    /// Lower size bound.
    #[must_use]
    pub const fn min_size(&self) -> Size {
        self.min_size
    }

    /// Upper size bound as set (before the render-target cap).
    #[must_use]
    pub const fn max_size(&self) -> Size {
        self.max_size
    }

    /// Anchored edges.
    #[must_use]
    pub const fn anchor(&self) -> Anchors {
        self.anchor
    }

    /// Distances to the parent's edges, captured at the last geometry change.
    #[must_use]
    pub const fn anchor_margins(&self) -> Margins {
        self.anchor_margins
    }

    /// Scroll offset applied by an ancestor container.
    #[must_use]
    pub const fn modifiers(&self) -> Point {
        Point::new(self.left_modifier, self.top_modifier)
    }

    /// Parent handle.
    #[must_use]
    pub const fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// Top-most ancestor (itself for roots and orphans).
    #[must_use]
    pub const fn root(&self) -> ControlId {
        self.root
    }

    /// Children in paint order.
    #[must_use]
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    /// All boolean properties.
    #[must_use]
    pub const fn flags(&self) -> ControlFlags {
        self.flags
    }

    /// Own visibility flag. See [`Manager::is_visible`](crate::Manager::is_visible)
    /// for effective visibility.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.flags.has(ControlFlags::VISIBLE)
    }

    /// Own enabled flag.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.flags.has(ControlFlags::ENABLED)
    }

    /// Can receive focus.
    #[must_use]
    pub const fn can_focus(&self) -> bool {
        self.flags.has(ControlFlags::CAN_FOCUS)
    }

    /// Ignored by hit-testing.
    #[must_use]
    pub const fn passive(&self) -> bool {
        self.flags.has(ControlFlags::PASSIVE)
    }

    /// Rendered and clipped independently of the parent.
    #[must_use]
    pub const fn detached(&self) -> bool {
        self.flags.has(ControlFlags::DETACHED)
    }

    /// Cached pixels are stale.
    #[must_use]
    pub const fn invalidated(&self) -> bool {
        self.flags.has(ControlFlags::INVALIDATED)
    }

    /// Events are suppressed.
    #[must_use]
    pub const fn suspended(&self) -> bool {
        self.flags.has(ControlFlags::SUSPENDED)
    }

    /// Opacity used when compositing.
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Explicit tint, `None` to use the skin.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Explicit text color, `None` to use the skin.
    #[must_use]
    pub const fn text_color(&self) -> Option<Color> {
        self.text_color
    }

    /// Explicit background color, `None` for transparent.
    #[must_use]
    pub const fn back_color(&self) -> Option<Color> {
        self.back_color
    }

    /// Caption or content text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text shown in the tooltip.
    #[must_use]
    pub fn tool_tip_text(&self) -> &str {
        &self.tool_tip_text
    }

    /// Width of the resize band.
    #[must_use]
    pub const fn resizer_size(&self) -> i32 {
        self.resizer_size
    }

    /// Edges that can be dragged.
    #[must_use]
    pub const fn resize_edges(&self) -> Anchors {
        self.resize_edges
    }

    /// Ghost rectangle of an outline drag, in local coordinates.
    #[must_use]
    pub const fn outline(&self) -> Option<Rect> {
        self.outline
    }

    /// Current drag.
    #[must_use]
    pub const fn drag(&self) -> DragState {
        self.drag
    }

    /// Skin state used for drawing. `focused` comes from the manager.
    #[must_use]
    pub const fn draw_state(&self, enabled: bool, focused: bool) -> ControlState {
        if !enabled {
            ControlState::Disabled
        } else if self.flags.has(ControlFlags::PRESSED) {
            ControlState::Pressed
        } else if self.flags.has(ControlFlags::HOVERED) {
            ControlState::Hovered
        } else if focused {
            ControlState::Focused
        } else {
            ControlState::Enabled
        }
    }

    pub(crate) fn is_internal(&self) -> bool {
        self.flags.has(ControlFlags::INTERNAL)
    }
}
