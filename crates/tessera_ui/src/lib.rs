//! # Tessera UI
//!
//! A skinned, retained-mode control tree for games and tools that draw
//! through their own renderer.
//!
//! ## Design Principles
//!
//! 1. **One context object** - a [`Manager`] owns every control; controls are
//!    addressed by [`ControlId`] handles that go stale safely on dispose
//! 2. **Setters, not fields** - every observable change goes through a manager
//!    method that clamps, invalidates and queues a [`UiEvent`]
//! 3. **Cached pixels** - roots and detached controls render into their own
//!    texture, which is redrawn only while invalidated
//! 4. **Host-driven** - the host passes elapsed time and an input snapshot to
//!    [`Manager::update`] and a [`Renderer`] to [`Manager::draw`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tessera_ui::{CommandRecorder, InputSnapshot, Manager, Skin, UiConfig, UiEvent, EventKind};
//!
//! let mut ui = Manager::new(UiConfig::default(), Arc::new(Skin::default_theme()))?;
//! let window = ui.create_window()?;
//! let ok = ui.create_button("OK")?;
//! ui.add_root(window);
//! ui.add(window, ok);
//!
//! ui.update(&InputSnapshot::default(), Duration::from_millis(16));
//! for event in ui.drain_events() {
//!     if let Some((id, EventKind::Click { .. })) = event.as_control() {
//!         if id == ok {
//!             ui.close(window);
//!         }
//!     }
//! }
//! ui.draw(&mut CommandRecorder::new());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod input;
pub mod manager;
pub mod render;
pub mod skin;
pub mod widgets;

pub use config::{InputConfig, UiConfig};
pub use control::{ClickKind, Control, ControlFlags, ControlId, DragMode, ResizeZone};
pub use error::{UiError, UiResult};
pub use event::{EventKind, UiEvent};
pub use input::{
    GamePadButton, GamePadSnapshot, InputEvent, InputSnapshot, InputSource, InputSystem, Key,
    Modifiers, MouseButton, MouseSnapshot,
};
pub use manager::{Direction, InputStates, Manager, ResizeHook, BASE_LAYER};
pub use render::{
    Alignment, BlendMode, CachedTexture, CommandRecorder, RenderCommand, Renderer, TextureId,
};
pub use skin::{
    ControlState, Skin, SkinControl, SkinDefinition, SkinFont, SkinImage, SkinLayer, SkinProvider,
};
pub use widgets::{ComboBoxState, ContainerState, ControlKind, Orientation, ScrollBarState};

pub use tessera_core::{Anchors, Color, Margins, Point, Rect, Size};
