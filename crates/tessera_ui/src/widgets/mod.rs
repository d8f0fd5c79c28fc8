//! Widget kinds.
//!
//! Every control is the same [`Control`](crate::Control) struct; the
//! [`ControlKind`] variant carries per-widget state and selects the draw and
//! input behavior. Behavior that needs the tree lives in `impl Manager`
//! blocks next to the state it drives.

mod combo_box;
mod container;
mod draw;
mod scroll_bar;
mod window;

use serde::{Deserialize, Serialize};

use crate::control::ControlId;

pub use container::WHEEL_DELTA;
pub(crate) use draw::{draw_control, DrawContext};
pub use draw::THUMB_LAYER;
pub use scroll_bar::{thumb_span, MIN_THUMB};

/// Axis of a scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Scrolls along Y.
    Vertical,
    /// Scrolls along X.
    Horizontal,
}

/// Scrolling state of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerState {
    /// Vertical scrollbar (an internal child).
    pub vertical: Option<ControlId>,
    /// Horizontal scrollbar (an internal child).
    pub horizontal: Option<ControlId>,
    /// Show each scrollbar exactly when content overflows on that axis.
    pub auto_scroll: bool,
}

impl Default for ContainerState {
    fn default() -> Self {
        Self {
            vertical: None,
            horizontal: None,
            auto_scroll: true,
        }
    }
}

impl ContainerState {
    /// The bar for an axis.
    #[must_use]
    pub const fn bar(&self, orientation: Orientation) -> Option<ControlId> {
        match orientation {
            Orientation::Vertical => self.vertical,
            Orientation::Horizontal => self.horizontal,
        }
    }
}

/// Range/page/value model of a scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBarState {
    /// Axis.
    pub orientation: Orientation,
    /// Total scrollable extent.
    pub range: i32,
    /// Visible part of the extent.
    pub page_size: i32,
    /// First visible unit, in `[0, range - page_size]`.
    pub value: i32,
    /// Units per wheel notch.
    pub step_size: i32,
    /// Units per click on the track.
    pub page_step: i32,
}

impl ScrollBarState {
    /// Creates an empty bar.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            range: 100,
            page_size: 50,
            value: 0,
            step_size: 20,
            page_step: 50,
        }
    }

    /// Largest valid value.
    #[must_use]
    pub const fn max_value(&self) -> i32 {
        let max = self.range - self.page_size;
        if max > 0 {
            max
        } else {
            0
        }
    }

    /// Clamps a value into range.
    #[must_use]
    pub const fn clamp(&self, value: i32) -> i32 {
        if value < 0 {
            0
        } else if value > self.max_value() {
            self.max_value()
        } else {
            value
        }
    }

    /// Returns true if there is at least one unit to scroll.
    #[must_use]
    pub const fn can_scroll(&self) -> bool {
        self.range - self.page_size >= 1
    }
}

/// Items and selection of a combo box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboBoxState {
    /// Items.
    pub items: Vec<String>,
    /// Selected item.
    pub selected: Option<usize>,
}

impl ComboBoxState {
    /// Index of the first item equal to `text`.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<usize> {
        self.items.iter().position(|item| item == text)
    }
}

/// Widget kind and its state.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Plain control.
    Control,
    /// Scrolling container.
    Container(ContainerState),
    /// Movable, resizable top-level container.
    Window(ContainerState),
    /// Push button.
    Button,
    /// Static text.
    Label,
    /// Hover hint.
    ToolTip,
    /// Scrollbar.
    ScrollBar(ScrollBarState),
    /// Single-selection list with editable text.
    ComboBox(ComboBoxState),
}

impl ControlKind {
    /// Skin type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Container(_) => "Container",
            Self::Window(_) => "Window",
            Self::Button => "Button",
            Self::Label => "Label",
            Self::ToolTip => "ToolTip",
            Self::ScrollBar(_) => "ScrollBar",
            Self::ComboBox(_) => "ComboBox",
        }
    }

    /// Whether new controls of this kind can take focus.
    #[must_use]
    pub const fn default_can_focus(&self) -> bool {
        !matches!(self, Self::Label | Self::ToolTip | Self::ScrollBar(_))
    }

    /// Scrolling state of containers and windows.
    #[must_use]
    pub const fn container(&self) -> Option<&ContainerState> {
        match self {
            Self::Container(state) | Self::Window(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable scrolling state.
    pub fn container_mut(&mut self) -> Option<&mut ContainerState> {
        match self {
            Self::Container(state) | Self::Window(state) => Some(state),
            _ => None,
        }
    }

    /// Scrollbar state.
    #[must_use]
    pub const fn scroll_bar(&self) -> Option<&ScrollBarState> {
        match self {
            Self::ScrollBar(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn scroll_bar_mut(&mut self) -> Option<&mut ScrollBarState> {
        match self {
            Self::ScrollBar(state) => Some(state),
            _ => None,
        }
    }

    /// Combo box state.
    #[must_use]
    pub const fn combo_box(&self) -> Option<&ComboBoxState> {
        match self {
            Self::ComboBox(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn combo_box_mut(&mut self) -> Option<&mut ComboBoxState> {
        match self {
            Self::ComboBox(state) => Some(state),
            _ => None,
        }
    }

    /// Returns true for windows.
    #[must_use]
    pub const fn is_window(&self) -> bool {
        matches!(self, Self::Window(_))
    }
}
