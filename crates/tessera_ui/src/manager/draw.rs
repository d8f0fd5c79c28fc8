//! Offscreen caching and compositing.
//!
//! Roots and detached controls own a texture. Drawing an owner re-renders it
//! only while it is invalidated: the texture is cleared to the owner's back
//! color, then the owner and its non-detached descendants are drawn into it,
//! each child clipped to the origin rects of its ancestors (the client area
//! for containers, so scrolled content stays in the viewport). Owners are
//! then composited onto the screen in z-order with their alpha.

use tessera_core::{Color, Point, Rect};

use crate::control::{ControlFlags, ControlId};
use crate::render::{BlendMode, CachedTexture, Renderer};
use crate::widgets::{draw_control, DrawContext};
use crate::Manager;

/// Color of drag outlines.
const OUTLINE_COLOR: Color = Color::WHITE;

impl Manager {
    /// Cached texture of an owner.
    #[must_use]
    pub fn texture(&self, id: ControlId) -> Option<CachedTexture> {
        self.textures.get(id)
    }

    /// Drops every cached texture, e.g. after the device was lost. They are
    /// released on the next draw and everything is re-rendered.
    pub fn release_textures(&mut self) {
        self.textures.release_all();
        for (_, control) in &mut self.controls {
            control.flags.set(ControlFlags::INVALIDATED);
        }
    }

    /// Renders a frame.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.rebuild_order();
        self.textures.flush(renderer);

        let owners: Vec<ControlId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.controls.get(*id).is_some_and(|c| c.parent.is_none() || c.detached()))
            .collect();

        for owner in &owners {
            if self.controls.get(*owner).is_some_and(|c| c.invalidated()) {
                self.prepare_texture(renderer, *owner);
            }
        }

        renderer.set_target(None);
        renderer.begin_batch(BlendMode::Premultiplied);
        for owner in &owners {
            let (Some(cached), Some(control)) =
                (self.textures.get(*owner), self.controls.get(*owner))
            else {
                continue;
            };
            let origin = self.origin_rect(*owner);
            let src = Rect::new(0, 0, origin.width, origin.height);
            renderer.draw_texture(cached.id, origin, src, Color::WHITE.with_alpha(control.alpha));
        }
        for control in self.controls.values() {
            if let Some(outline) = control.outline {
                let parent_origin = control
                    .parent
                    .map_or(Point::ZERO, |p| self.client_rect(p).location());
                renderer.draw_outline(
                    outline.offset(parent_origin.x, parent_origin.y),
                    OUTLINE_COLOR,
                );
            }
        }
        renderer.end_batch();
    }

    /// Re-renders one owner's texture.
    fn prepare_texture(&mut self, renderer: &mut dyn Renderer, owner: ControlId) {
        let origin = self.origin_rect(owner);
        if origin.is_empty() {
            return;
        }
        let cached = self.textures.ensure(renderer, owner, origin.size());
        let back = self
            .controls
            .get(owner)
            .and_then(|c| c.back_color)
            .unwrap_or(Color::TRANSPARENT);

        renderer.set_target(Some(cached.id));
        renderer.begin_batch(BlendMode::Alpha);
        renderer.clear(back);
        self.paint_subtree(renderer, owner, Point::new(-origin.left, -origin.top), None);
        renderer.end_batch();

        for id in self.cached_subtree(owner) {
            if let Some(control) = self.controls.get_mut(id) {
                control.flags.clear(ControlFlags::INVALIDATED);
            }
        }
        tracing::trace!(?owner, width = origin.width, height = origin.height, "texture rendered");
    }

    /// The owner and every descendant whose pixels live in its texture.
    fn cached_subtree(&self, owner: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack = vec![owner];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(control) = self.controls.get(id) {
                stack.extend(
                    control
                        .children
                        .iter()
                        .copied()
                        .filter(|child| self.controls.get(*child).is_some_and(|c| !c.detached())),
                );
            }
        }
        out
    }

    /// Draws a control and its visible, non-detached descendants, shifted by
    /// `offset`.
    fn paint_subtree(
        &self,
        renderer: &mut dyn Renderer,
        id: ControlId,
        offset: Point,
        clip: Option<Rect>,
    ) {
        let Some(control) = self.controls.get(id) else {
            return;
        };
        let origin = self.origin_rect(id).offset(offset.x, offset.y);
        if clip.is_some_and(|clip| !clip.intersects(&origin)) {
            return;
        }

        let ctx = DrawContext {
            skin: &*self.skin,
            enabled: self.is_enabled(id),
            focused: self.focused == Some(id),
        };
        draw_control(ctx, control, renderer, origin);

        let bounds = if control.kind.container().is_some() {
            self.client_rect(id).offset(offset.x, offset.y)
        } else {
            origin
        };
        let child_clip = match clip {
            Some(clip) => clip.intersection(&bounds),
            None => Some(bounds),
        };
        let Some(child_clip) = child_clip else {
            return;
        };

        renderer.push_clip(child_clip);
        for child in self.paint_order(&control.children) {
            if self.controls.get(child).is_some_and(|c| c.visible() && !c.detached()) {
                self.paint_subtree(renderer, child, offset, Some(child_clip));
            }
        }
        renderer.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tessera_core::Size;

    use super::*;
    use crate::config::UiConfig;
    use crate::render::{CommandRecorder, RenderCommand};
    use crate::skin::Skin;

    fn manager() -> Manager {
        Manager::new(UiConfig::default(), Arc::new(Skin::default_theme())).unwrap()
    }

    fn created(commands: &[RenderCommand]) -> Vec<Size> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::CreateTarget { size, .. } => Some(*size),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_texture_grows_in_steps_and_never_shrinks() {
        let mut ui = manager();
        let root = ui.create_control().unwrap();
        ui.add_root(root);
        ui.set_bounds(root, Rect::new(0, 0, 40, 20));
        let mut renderer = CommandRecorder::new();

        ui.draw(&mut renderer);
        assert_eq!(created(renderer.commands()), vec![Size::new(64, 32)]);

        ui.set_size(root, Size::new(60, 30));
        renderer.clear_commands();
        ui.draw(&mut renderer);
        assert!(created(renderer.commands()).is_empty());

        ui.set_size(root, Size::new(70, 30));
        renderer.clear_commands();
        ui.draw(&mut renderer);
        assert_eq!(created(renderer.commands()), vec![Size::new(96, 32)]);

        ui.set_size(root, Size::new(10, 10));
        renderer.clear_commands();
        ui.draw(&mut renderer);
        assert!(created(renderer.commands()).is_empty());
        assert_eq!(ui.texture(root).unwrap().size, Size::new(96, 32));
    }

    #[test]
    fn test_clean_owner_is_not_redrawn() {
        let mut ui = manager();
        let root = ui.create_button("ok").unwrap();
        ui.add_root(root);
        let mut renderer = CommandRecorder::new();

        ui.draw(&mut renderer);
        assert!(!ui.control(root).unwrap().invalidated());

        renderer.clear_commands();
        ui.draw(&mut renderer);
        let redraws = renderer
            .commands()
            .iter()
            .filter(|c| matches!(c, RenderCommand::NineSlice { .. }))
            .count();
        assert_eq!(redraws, 0);
        assert!(renderer
            .commands()
            .iter()
            .any(|c| matches!(c, RenderCommand::Texture { .. })));
    }

    #[test]
    fn test_clipped_child_is_skipped() {
        let mut ui = manager();
        let root = ui.create_control().unwrap();
        ui.add_root(root);
        ui.set_bounds(root, Rect::new(0, 0, 100, 100));
        let outside = ui.create_control().unwrap();
        ui.add(root, outside);
        ui.set_bounds(outside, Rect::new(150, 0, 20, 20));
        let mut renderer = CommandRecorder::new();

        ui.draw(&mut renderer);
        let slices = renderer
            .commands()
            .iter()
            .filter(|c| matches!(c, RenderCommand::NineSlice { .. }))
            .count();
        assert_eq!(slices, 1);
    }

    #[test]
    fn test_disposed_texture_released_next_frame() {
        let mut ui = manager();
        let root = ui.create_control().unwrap();
        ui.add_root(root);
        let mut renderer = CommandRecorder::new();
        ui.draw(&mut renderer);
        assert_eq!(renderer.live_targets().len(), 1);

        ui.dispose(root);
        ui.draw(&mut renderer);
        assert!(renderer.live_targets().is_empty());
    }
}
