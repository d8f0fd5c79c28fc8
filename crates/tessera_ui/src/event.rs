//! Events produced by the manager.
//!
//! Every observable change is queued as a [`UiEvent`] and drained by the host
//! with [`Manager::drain_events`](crate::Manager::drain_events). Nothing is
//! delivered synchronously; a handler reacting to an event mutates the tree
//! through the manager on the next call.

use tessera_core::{Point, Size};

use crate::control::ControlId;
use crate::input::{GamePadButton, Key, Modifiers, MouseButton};
use crate::widgets::Orientation;

/// What happened to a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Local position changed.
    Moved {
        /// Position before the change.
        old: Point,
    },
    /// Size changed.
    Resized {
        /// Size before the change.
        old: Size,
    },
    /// Own `visible` flag changed.
    VisibleChanged,
    /// Own `enabled` flag changed.
    EnabledChanged,
    /// Text changed.
    TextChanged,
    /// One of the explicit colors changed.
    ColorChanged,
    /// Alpha changed.
    AlphaChanged,
    /// The resolved skin was replaced.
    SkinChanged,
    /// Anchor flags changed.
    AnchorChanged,
    /// Control was attached to or detached from a parent.
    ParentChanged,
    /// Control became the focused control.
    FocusGained,
    /// Control stopped being the focused control.
    FocusLost,
    /// Cursor entered the control.
    MouseOver,
    /// Cursor left the control.
    MouseOut,
    /// Cursor moved over the control (or while it owns a button).
    MouseMove {
        /// Logical cursor position.
        position: Point,
    },
    /// Mouse button went down on the control.
    MouseDown {
        /// Button.
        button: MouseButton,
        /// Logical cursor position.
        position: Point,
    },
    /// Mouse button press (initial and repeats).
    MousePress {
        /// Button.
        button: MouseButton,
        /// Logical cursor position.
        position: Point,
    },
    /// Mouse button released over or after the control.
    MouseUp {
        /// Button.
        button: MouseButton,
        /// Logical cursor position.
        position: Point,
    },
    /// Scroll wheel turned over the control.
    MouseScroll {
        /// Wheel delta.
        delta: i32,
    },
    /// Validated click.
    Click {
        /// Button.
        button: MouseButton,
    },
    /// Second click of the same button within the double-click window.
    DoubleClick {
        /// Button.
        button: MouseButton,
    },
    /// Key went down while focused.
    KeyDown {
        /// Key.
        key: Key,
        /// Modifiers.
        modifiers: Modifiers,
    },
    /// Key press (initial and repeats) while focused.
    KeyPress {
        /// Key.
        key: Key,
        /// Modifiers.
        modifiers: Modifiers,
    },
    /// Key released while focused.
    KeyUp {
        /// Key.
        key: Key,
        /// Modifiers.
        modifiers: Modifiers,
    },
    /// Gamepad button went down while focused.
    GamePadDown {
        /// Player index.
        player: usize,
        /// Button.
        button: GamePadButton,
    },
    /// Gamepad press (initial and repeats) while focused.
    GamePadPress {
        /// Player index.
        player: usize,
        /// Button.
        button: GamePadButton,
    },
    /// Gamepad button released while focused.
    GamePadUp {
        /// Player index.
        player: usize,
        /// Button.
        button: GamePadButton,
    },
    /// Scroll value of a scrollbar (or a container axis) changed.
    ScrollChanged {
        /// Axis.
        orientation: Orientation,
        /// New value.
        value: i32,
    },
    /// Combo box selection changed.
    SelectionChanged {
        /// New selected item.
        index: Option<usize>,
    },
    /// Drag move started.
    MoveBegin,
    /// Drag move finished.
    MoveEnd,
    /// Drag resize started.
    ResizeBegin,
    /// Drag resize finished.
    ResizeEnd,
    /// Window was closed.
    Closed,
    /// Control was disposed. The handle is already stale.
    Disposed,
}

/// A queued notification.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Something happened to a control.
    Control {
        /// The control.
        id: ControlId,
        /// What happened.
        kind: EventKind,
    },
    /// Input was rejected because a modal window is active.
    InvalidInput {
        /// Where the rejected click landed.
        position: Point,
    },
    /// The manager wants a different mouse cursor.
    CursorChanged {
        /// Skin cursor name.
        name: String,
    },
}

impl UiEvent {
    /// Returns the control and kind for control events.
    #[must_use]
    pub const fn as_control(&self) -> Option<(ControlId, EventKind)> {
        match self {
            Self::Control { id, kind } => Some((*id, *kind)),
            _ => None,
        }
    }
}
