//! Offscreen texture pool keyed by control.
//!
//! Cache policy:
//! - A texture is sized to the owner's origin rect, rounded up to the next
//!   multiple of the granularity and capped at the render target size.
//! - Textures only grow. A control that shrinks keeps its larger texture and
//!   draws into the top-left part of it.
//! - Releasing a texture only queues it. Queued textures are handed back to
//!   the renderer by [`TextureCache::flush`] at the start of the next draw,
//!   so a texture composited this frame is never freed mid-frame.

use slotmap::SecondaryMap;
use tessera_core::Size;

use super::{Renderer, TextureId};
use crate::control::ControlId;

/// A texture held for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedTexture {
    /// Renderer handle.
    pub id: TextureId,
    /// Allocated size.
    pub size: Size,
}

/// Growth-only texture pool.
#[derive(Debug)]
pub struct TextureCache {
    entries: SecondaryMap<ControlId, CachedTexture>,
    pending_release: Vec<TextureId>,
    granularity: i32,
    limit: Size,
}

impl TextureCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(granularity: i32, limit: Size) -> Self {
        Self {
            entries: SecondaryMap::new(),
            pending_release: Vec::new(),
            granularity: granularity.max(1),
            limit,
        }
    }

    /// Changes the size cap (render target resized).
    pub fn set_limit(&mut self, limit: Size) {
        self.limit = limit;
    }

    /// Texture currently held for a control.
    #[must_use]
    pub fn get(&self, control: ControlId) -> Option<CachedTexture> {
        self.entries.get(control).copied()
    }

    /// Number of held textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no texture is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Textures waiting for the next flush.
    #[must_use]
    pub fn pending(&self) -> &[TextureId] {
        &self.pending_release
    }

    /// Size a texture must have to hold `needed` pixels.
    #[must_use]
    pub fn allocation_size(&self, needed: Size) -> Size {
        let round = |value: i32| {
            let g = self.granularity;
            ((value.max(1) + g - 1) / g) * g
        };
        Size::new(round(needed.width), round(needed.height)).min(self.limit)
    }

    /// Returns a texture that holds at least `needed` pixels (capped),
    /// reusing the existing one when it is large enough.
    pub fn ensure(
        &mut self,
        renderer: &mut dyn Renderer,
        control: ControlId,
        needed: Size,
    ) -> CachedTexture {
        let wanted = self.allocation_size(needed);

        if let Some(existing) = self.entries.get(control).copied() {
            if wanted.fits_in(existing.size) {
                return existing;
            }
            self.pending_release.push(existing.id);
            let size = wanted.max(existing.size);
            return self.allocate(renderer, control, size);
        }

        self.allocate(renderer, control, wanted)
    }

    fn allocate(
        &mut self,
        renderer: &mut dyn Renderer,
        control: ControlId,
        size: Size,
    ) -> CachedTexture {
        let texture = CachedTexture {
            id: renderer.create_target(size),
            size,
        };
        tracing::debug!(?control, width = size.width, height = size.height, "texture allocated");
        self.entries.insert(control, texture);
        texture
    }

    /// Queues the control's texture for release.
    pub fn release(&mut self, control: ControlId) {
        if let Some(texture) = self.entries.remove(control) {
            self.pending_release.push(texture.id);
        }
    }

    /// Hands queued textures back to the renderer.
    pub fn flush(&mut self, renderer: &mut dyn Renderer) {
        for id in self.pending_release.drain(..) {
            renderer.release_target(id);
        }
    }

    /// Queues every texture for release.
    pub fn release_all(&mut self) {
        self.pending_release
            .extend(self.entries.drain().map(|(_, texture)| texture.id));
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;
    use crate::render::CommandRecorder;

    fn key() -> ControlId {
        let mut map: SlotMap<ControlId, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn test_rounds_up_and_caps() {
        let cache = TextureCache::new(32, Size::new(100, 100));
        assert_eq!(cache.allocation_size(Size::new(33, 10)), Size::new(64, 32));
        assert_eq!(cache.allocation_size(Size::new(500, 64)), Size::new(100, 64));
    }

    #[test]
    fn test_never_shrinks() {
        let mut renderer = CommandRecorder::new();
        let mut cache = TextureCache::new(32, Size::new(1024, 1024));
        let id = key();

        let big = cache.ensure(&mut renderer, id, Size::new(200, 100));
        let small = cache.ensure(&mut renderer, id, Size::new(20, 20));
        assert_eq!(big, small);
        assert_eq!(renderer.live_targets().len(), 1);
    }

    #[test]
    fn test_grow_defers_release() {
        let mut renderer = CommandRecorder::new();
        let mut cache = TextureCache::new(32, Size::new(1024, 1024));
        let id = key();

        let first = cache.ensure(&mut renderer, id, Size::new(30, 200));
        let second = cache.ensure(&mut renderer, id, Size::new(100, 20));
        assert_ne!(first.id, second.id);
        // Grows on the wider axis only, keeping the taller one.
        assert_eq!(second.size, Size::new(128, 224));
        assert_eq!(cache.pending(), &[first.id]);
        assert_eq!(renderer.live_targets().len(), 2);

        cache.flush(&mut renderer);
        assert!(cache.pending().is_empty());
        assert_eq!(renderer.live_targets(), &[second.id]);
    }

    #[test]
    fn test_release_is_queued() {
        let mut renderer = CommandRecorder::new();
        let mut cache = TextureCache::new(16, Size::new(256, 256));
        let id = key();

        cache.ensure(&mut renderer, id, Size::new(10, 10));
        cache.release(id);
        assert!(cache.get(id).is_none());
        assert_eq!(renderer.live_targets().len(), 1);

        cache.flush(&mut renderer);
        assert!(renderer.live_targets().is_empty());
    }
}
