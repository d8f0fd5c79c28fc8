//! Rendering contract.
//!
//! The manager never talks to a GPU. It drives a host-supplied [`Renderer`]
//! with a handful of 2D primitives: offscreen targets, 9-slice skin images,
//! text and textured quads.
//!
//! ```text
//! ┌──────────────┐  prepare   ┌────────────────┐  composite  ┌──────────┐
//! │ control tree │ ─────────▶ │ offscreen      │ ──────────▶ │ back     │
//! │ (invalidated)│  per owner │ texture cache  │  z-order    │ buffer   │
//! └──────────────┘            └────────────────┘             └──────────┘
//! ```

mod cache;
mod painter;
mod recorder;

use serde::{Deserialize, Serialize};
use tessera_core::{Color, Margins, Rect, Size};

use crate::skin::{SkinFont, SkinImage};

pub use cache::{CachedTexture, TextureCache};
pub use painter::{draw_layer, draw_layer_text, layer_rect};
pub use recorder::{CommandRecorder, RenderCommand};

/// Handle to an offscreen render target owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// How a batch blends with what is already in the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Regular alpha blending.
    #[default]
    Alpha,
    /// Source already multiplied by its alpha (used when compositing caches).
    Premultiplied,
    /// Overwrite the destination.
    Opaque,
}

/// Text placement inside its destination rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Top-left corner.
    TopLeft,
    /// Top edge, centered.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Left edge, centered vertically.
    MiddleLeft,
    /// Dead center.
    #[default]
    MiddleCenter,
    /// Right edge, centered vertically.
    MiddleRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge, centered.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Alignment {
    /// Positions a box of `size` inside `dest`.
    #[must_use]
    pub const fn place(self, dest: Rect, size: Size) -> Rect {
        let free_w = dest.width - size.width;
        let free_h = dest.height - size.height;
        let x = match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => 0,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => free_w / 2,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => free_w,
        };
        let y = match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => 0,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => free_h / 2,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => free_h,
        };
        Rect::new(dest.left + x, dest.top + y, size.width, size.height)
    }
}

/// Host-side 2D drawing primitives.
///
/// All rectangles are in pixels of the current target. Drawing outside the
/// active clip rectangle must be discarded by the implementation.
pub trait Renderer {
    /// Starts a sprite batch.
    fn begin_batch(&mut self, blend: BlendMode);

    /// Flushes the current sprite batch.
    fn end_batch(&mut self);

    /// Allocates an offscreen target.
    fn create_target(&mut self, size: Size) -> TextureId;

    /// Frees an offscreen target.
    fn release_target(&mut self, id: TextureId);

    /// Redirects drawing to an offscreen target, or to the back buffer with `None`.
    fn set_target(&mut self, target: Option<TextureId>);

    /// Clears the current target.
    fn clear(&mut self, color: Color);

    /// Restricts drawing to `rect` intersected with the current clip.
    fn push_clip(&mut self, rect: Rect);

    /// Restores the previous clip.
    fn pop_clip(&mut self);

    /// Draws a 9-slice image frame stretched over `dest`.
    fn draw_nine_slice(
        &mut self,
        image: &SkinImage,
        dest: Rect,
        sizing: Margins,
        color: Color,
        frame: u32,
    );

    /// Draws a string. With `ellipsis`, text wider than `dest` is cut and ends in "...".
    fn draw_string(
        &mut self,
        font: &SkinFont,
        text: &str,
        dest: Rect,
        color: Color,
        alignment: Alignment,
        ellipsis: bool,
    );

    /// Measures a single line of text.
    fn measure_string(&self, font: &SkinFont, text: &str) -> Size;

    /// Draws part of an offscreen target.
    fn draw_texture(&mut self, id: TextureId, dest: Rect, src: Rect, color: Color);

    /// Draws a one-pixel rectangle outline.
    fn draw_outline(&mut self, rect: Rect, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_place() {
        let dest = Rect::new(10, 10, 100, 20);
        let size = Size::new(40, 10);

        assert_eq!(Alignment::TopLeft.place(dest, size), Rect::new(10, 10, 40, 10));
        assert_eq!(Alignment::MiddleCenter.place(dest, size), Rect::new(40, 15, 40, 10));
        assert_eq!(Alignment::BottomRight.place(dest, size), Rect::new(70, 20, 40, 10));
    }
}
