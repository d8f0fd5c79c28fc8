//! # Manager
//!
//! The coordination point of the toolkit. The manager owns the control arena,
//! the root list, focus, the modal stack, the per-button input owners and the
//! texture cache, and drives the frame loop:
//!
//! ```text
//!   update(snapshot, dt)                     draw(renderer)
//!   ├─ input system → edge events            ├─ flush released textures
//!   ├─ hit-test z-order, dispatch            ├─ re-render invalidated owners
//!   ├─ tooltip timer                         └─ composite owners in z-order
//!   └─ rebuild z-order
//! ```
//!
//! There is no global state: every operation is a method on [`Manager`]
//! taking a [`ControlId`]. Handles to disposed controls are ignored.

mod dispatch;
mod draw;
mod focus;
mod navigation;
mod order;
mod tooltip;

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use slotmap::{SecondaryMap, SlotMap};
use tessera_core::{Point, Size};

use crate::config::UiConfig;
use crate::control::{Control, ControlFlags, ControlId};
use crate::error::{UiError, UiResult};
use crate::event::{EventKind, UiEvent};
use crate::input::{InputSnapshot, InputSystem, MouseButton};
use crate::render::TextureCache;
use crate::skin::{cursors, SkinControl, SkinProvider};
use crate::widgets::{ComboBoxState, ContainerState, ControlKind, Orientation, ScrollBarState};

pub use navigation::Direction;

/// Skin layer every control type must provide.
pub const BASE_LAYER: &str = "Control";

/// Hook that may adjust a proposed drag-resize size.
pub type ResizeHook = Box<dyn FnMut(ControlId, Size) -> Size>;

/// Which control owns what input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputStates {
    /// Control that received mouse-down for each button.
    pub buttons: [Option<ControlId>; MouseButton::COUNT],
    /// Control under the cursor.
    pub over: Option<ControlId>,
    /// Button that started the pending click.
    pub click: Option<MouseButton>,
}

impl InputStates {
    /// Returns true if any button other than `button` is held on a control.
    #[must_use]
    pub fn other_buttons_held(&self, button: MouseButton) -> bool {
        MouseButton::ALL
            .iter()
            .any(|b| *b != button && self.buttons[b.index()].is_some())
    }
}

/// The UI context.
pub struct Manager {
    pub(crate) config: UiConfig,
    pub(crate) skin: Arc<dyn SkinProvider>,
    pub(crate) controls: SlotMap<ControlId, Control>,
    pub(crate) roots: Vec<ControlId>,
    pub(crate) order: Vec<ControlId>,
    pub(crate) order_dirty: bool,
    pub(crate) focused: Option<ControlId>,
    pub(crate) modal_stack: Vec<ControlId>,
    pub(crate) states: InputStates,
    pub(crate) input: InputSystem,
    pub(crate) events: VecDeque<UiEvent>,
    pub(crate) resize_hooks: SecondaryMap<ControlId, ResizeHook>,
    pub(crate) textures: TextureCache,
    pub(crate) tooltip: tooltip::TooltipTimer,
    pub(crate) cursor: String,
    pub(crate) target: Size,
    pub(crate) clock: Duration,
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("skin", &self.skin.name())
            .field("controls", &self.controls.len())
            .field("roots", &self.roots.len())
            .field("focused", &self.focused)
            .field("modal_stack", &self.modal_stack)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Manager {
    /// Creates a manager.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] for out-of-range settings, and
    /// [`UiError::MissingSkin`]/[`UiError::MissingLayer`] if the skin lacks
    /// the base `Control` definition.
    pub fn new(config: UiConfig, skin: Arc<dyn SkinProvider>) -> UiResult<Self> {
        config.validate()?;
        resolve_skin(&*skin, "Control")?;

        let target = Size::new(config.target_width, config.target_height);
        tracing::info!(
            skin = %skin.name(),
            width = target.width,
            height = target.height,
            "ui manager created"
        );

        Ok(Self {
            input: InputSystem::new(config.input.clone()),
            textures: TextureCache::new(config.texture_granularity, target),
            config,
            skin,
            controls: SlotMap::with_key(),
            roots: Vec::new(),
            order: Vec::new(),
            order_dirty: true,
            focused: None,
            modal_stack: Vec::new(),
            states: InputStates::default(),
            events: VecDeque::new(),
            resize_hooks: SecondaryMap::new(),
            tooltip: tooltip::TooltipTimer::default(),
            cursor: cursors::DEFAULT.to_string(),
            target,
            clock: Duration::ZERO,
        })
    }

    /// Settings.
    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Active skin.
    #[must_use]
    pub fn skin(&self) -> &dyn SkinProvider {
        &*self.skin
    }

    /// Input system, for hosts that want to tweak it at runtime.
    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }

    /// Looks up a control.
    #[must_use]
    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id)
    }

    /// Looks up a control, treating a stale handle as an error.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if the control was disposed.
    pub fn try_control(&self, id: ControlId) -> UiResult<&Control> {
        self.controls.get(id).ok_or(UiError::UnknownControl)
    }

    /// Returns true if the handle refers to a live control.
    #[must_use]
    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains_key(id)
    }

    /// Number of live controls.
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Root controls in z-order, back to front.
    #[must_use]
    pub fn roots(&self) -> &[ControlId] {
        &self.roots
    }

    /// Focused control.
    #[must_use]
    pub const fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    /// Active modal window.
    #[must_use]
    pub fn modal(&self) -> Option<ControlId> {
        self.modal_stack.last().copied()
    }

    /// Control under the cursor.
    #[must_use]
    pub const fn hovered(&self) -> Option<ControlId> {
        self.states.over
    }

    /// Control that owns a mouse button.
    #[must_use]
    pub const fn button_owner(&self, button: MouseButton) -> Option<ControlId> {
        self.states.buttons[button.index()]
    }

    /// Current cursor name.
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Render target size.
    #[must_use]
    pub const fn target_size(&self) -> Size {
        self.target
    }

    /// Total time advanced through [`Manager::update`].
    #[must_use]
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Resizes the render target. Roots reflow against the new size and the
    /// texture cap follows.
    pub fn set_target_size(&mut self, size: Size) {
        if size == self.target || size.width <= 0 || size.height <= 0 {
            return;
        }
        let old = self.target;
        self.target = size;
        self.textures.set_limit(size);
        tracing::debug!(width = size.width, height = size.height, "render target resized");

        for root in self.roots.clone() {
            self.reflow_child(root, old, size, size);
        }
    }

    /// Queues an event unless the control is suspended.
    pub(crate) fn emit(&mut self, id: ControlId, kind: EventKind) {
        match self.controls.get(id) {
            Some(control) if control.suspended() => {}
            Some(_) => self.events.push_back(UiEvent::Control { id, kind }),
            None => {}
        }
    }

    /// Queues a manager-level event.
    pub(crate) fn push_event(&mut self, event: UiEvent) {
        self.events.push_back(event);
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        self.events.drain(..).collect()
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Changes the cursor and announces it.
    pub fn set_cursor(&mut self, name: &str) {
        if self.cursor == name {
            return;
        }
        if self.skin.cursor(name).is_none() {
            tracing::debug!(cursor = name, "cursor not in skin");
        }
        self.cursor = name.to_string();
        self.push_event(UiEvent::CursorChanged {
            name: name.to_string(),
        });
    }

    /// Installs a hook that can adjust drag-resize proposals of a control.
    pub fn set_validate_resize(
        &mut self,
        id: ControlId,
        hook: impl FnMut(ControlId, Size) -> Size + 'static,
    ) {
        if self.contains(id) {
            self.resize_hooks.insert(id, Box::new(hook));
        }
    }

    /// Removes the drag-resize hook.
    pub fn clear_validate_resize(&mut self, id: ControlId) {
        self.resize_hooks.remove(id);
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Registers a control of any kind. It starts as an orphan; attach it with
    /// [`Manager::add`] or [`Manager::add_root`].
    ///
    /// # Errors
    ///
    /// Returns [`UiError::MissingSkin`] or [`UiError::MissingLayer`] if the
    /// skin can't draw this kind.
    pub fn create(&mut self, kind: ControlKind) -> UiResult<ControlId> {
        let skin = resolve_skin(&*self.skin, kind.type_name())?;
        let id = self.controls.insert_with_key(|id| Control::new(id, kind, skin));
        self.clamp_to_limits(id);
        tracing::debug!(?id, kind = self.controls[id].kind.type_name(), "control created");
        Ok(id)
    }

    /// Creates a plain control.
    ///
    /// # Errors
    ///
    /// See [`Manager::create`].
    pub fn create_control(&mut self) -> UiResult<ControlId> {
        self.create(ControlKind::Control)
    }

    /// Creates a container with its two scrollbars.
    ///
    /// # Errors
    ///
    /// See [`Manager::create`]. The `ScrollBar` skin is required too.
    pub fn create_container(&mut self) -> UiResult<ControlId> {
        self.create_scrolling(ControlKind::Container(ContainerState::default()))
    }

    /// Creates a movable, resizable window.
    ///
    /// # Errors
    ///
    /// See [`Manager::create_container`].
    pub fn create_window(&mut self) -> UiResult<ControlId> {
        let id = self.create_scrolling(ControlKind::Window(ContainerState::default()))?;
        if let Some(control) = self.controls.get_mut(id) {
            control.flags.set(ControlFlags::MOVABLE | ControlFlags::RESIZABLE);
        }
        Ok(id)
    }

    fn create_scrolling(&mut self, mut kind: ControlKind) -> UiResult<ControlId> {
        // Check the owner's skin before the bars, so a missing skin leaves
        // nothing half-built.
        resolve_skin(&*self.skin, kind.type_name())?;
        let vertical = self.create_scroll_bar(Orientation::Vertical)?;
        let horizontal = self.create_scroll_bar(Orientation::Horizontal)?;

        if let Some(state) = kind.container_mut() {
            state.vertical = Some(vertical);
            state.horizontal = Some(horizontal);
        }
        let id = self.create(kind)?;

        for bar in [vertical, horizontal] {
            if let Some(control) = self.controls.get_mut(bar) {
                control.flags.set(ControlFlags::INTERNAL);
                control.flags.clear(ControlFlags::VISIBLE);
                control.anchor = tessera_core::Anchors::NONE;
            }
            self.add(id, bar);
        }
        self.update_scrolling(id);
        Ok(id)
    }

    /// Creates a push button.
    ///
    /// # Errors
    ///
    /// See [`Manager::create`].
    pub fn create_button(&mut self, text: &str) -> UiResult<ControlId> {
        let id = self.create(ControlKind::Button)?;
        if let Some(control) = self.controls.get_mut(id) {
            control.text = text.to_string();
        }
        Ok(id)
    }

    /// Creates a text label.
    ///
    /// # Errors
    ///
    /// See [`Manager::create`].
    pub fn create_label(&mut self, text: &str) -> UiResult<ControlId> {
        let id = self.create(ControlKind::Label)?;
        if let Some(control) = self.controls.get_mut(id) {
            control.text = text.to_string();
        }
        Ok(id)
    }

    /// Creates a scrollbar.
    ///
    /// # Errors
    ///
    /// See [`Manager::create`].
    pub fn create_scroll_bar(&mut self, orientation: Orientation) -> UiResult<ControlId> {
        self.create(ControlKind::ScrollBar(ScrollBarState::new(orientation)))
    }

    /// Creates a combo box with the given items and nothing selected.
    ///
    /// # Errors
    ///
    /// See [`Manager::create`].
    pub fn create_combo_box<I, S>(&mut self, items: I) -> UiResult<ControlId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.create(ControlKind::ComboBox(ComboBoxState {
            items: items.into_iter().map(Into::into).collect(),
            selected: None,
        }))
    }

    // ------------------------------------------------------------------
    // Skin
    // ------------------------------------------------------------------

    /// Replaces the skin and re-initializes every registered control.
    ///
    /// # Errors
    ///
    /// If any registered control's type can't be resolved, returns the error
    /// and keeps the previous skin everywhere.
    pub fn set_skin(&mut self, skin: Arc<dyn SkinProvider>) -> UiResult<()> {
        resolve_skin(&*skin, "Control")?;

        let mut resolved = Vec::with_capacity(self.controls.len());
        for (id, control) in &self.controls {
            resolved.push((id, resolve_skin(&*skin, control.kind.type_name())?));
        }

        tracing::info!(
            from = %self.skin.name(),
            to = %skin.name(),
            controls = resolved.len(),
            "skin changed"
        );
        self.skin = skin;

        for (id, definition) in resolved {
            if let Some(control) = self.controls.get_mut(id) {
                control.min_size = definition.minimum_size;
                control.resizer_size = definition.resizer_size;
                control.skin = definition;
            }
            self.clamp_to_limits(id);
            self.emit(id, EventKind::SkinChanged);
        }

        let ids: Vec<ControlId> = self.controls.keys().collect();
        for id in ids {
            if self.controls.get(id).is_some_and(|c| c.kind.container().is_some()) {
                self.update_scrolling(id);
            }
            if let Some(control) = self.controls.get_mut(id) {
                control.flags.set(ControlFlags::INVALIDATED);
            }
        }
        self.order_dirty = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------

    /// Advances one frame: pumps input, dispatches events, runs timers and
    /// rebuilds the z-order list.
    pub fn update(&mut self, snapshot: &InputSnapshot, elapsed: Duration) {
        self.clock += elapsed;
        self.rebuild_order();

        for event in self.input.update(snapshot, elapsed) {
            self.dispatch(event);
        }

        self.update_tooltip(elapsed);
        self.rebuild_order();
    }

    /// Maximum width/height a control may have.
    pub(crate) fn size_limit(&self, id: ControlId) -> Size {
        self.controls
            .get(id)
            .map_or(self.target, |c| c.max_size.min(self.target))
    }

    /// Last logical cursor position.
    pub(crate) fn mouse_position(&self) -> Point {
        self.input.mouse_position()
    }
}

/// Resolves a control type and checks its base layer.
fn resolve_skin(skin: &dyn SkinProvider, type_name: &str) -> UiResult<Arc<SkinControl>> {
    let definition = skin
        .control_skin(type_name)
        .ok_or_else(|| UiError::MissingSkin(type_name.to_string()))?;
    definition.check_layer(BASE_LAYER)?;
    Ok(definition)
}
