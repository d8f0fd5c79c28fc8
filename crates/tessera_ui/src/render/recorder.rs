//! Headless renderer that records what it was asked to draw.

use tessera_core::{Color, Margins, Rect, Size};

use super::{Alignment, BlendMode, Renderer, TextureId};
use crate::skin::{SkinFont, SkinImage};

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Batch started.
    BeginBatch {
        /// Blend mode.
        blend: BlendMode,
    },
    /// Batch flushed.
    EndBatch,
    /// Offscreen target allocated.
    CreateTarget {
        /// New handle.
        id: TextureId,
        /// Allocated size.
        size: Size,
    },
    /// Offscreen target freed.
    ReleaseTarget {
        /// Freed handle.
        id: TextureId,
    },
    /// Drawing redirected.
    SetTarget {
        /// Offscreen target, or `None` for the back buffer.
        id: Option<TextureId>,
    },
    /// Target cleared.
    Clear {
        /// Clear color.
        color: Color,
    },
    /// Scissor rect (already intersected with the enclosing one).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
    /// 9-slice image.
    NineSlice {
        /// Image name.
        image: String,
        /// Destination.
        dest: Rect,
        /// Sizing margins.
        sizing: Margins,
        /// Tint.
        color: Color,
        /// Frame index.
        frame: u32,
    },
    /// Text.
    Text {
        /// Text content (after ellipsis).
        text: String,
        /// Where the text box was placed.
        bounds: Rect,
        /// Text color.
        color: Color,
    },
    /// Textured quad from an offscreen target.
    Texture {
        /// Source target.
        id: TextureId,
        /// Destination.
        dest: Rect,
        /// Source rectangle inside the target.
        src: Rect,
        /// Tint (alpha carries the control's opacity).
        color: Color,
    },
    /// Rectangle outline.
    Outline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
    },
}

/// Renderer that keeps every command in memory.
///
/// Text is measured with the font's fixed-pitch metrics.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
    clip_stack: Vec<Rect>,
    next_texture: u64,
    live_targets: Vec<TextureId>,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forgets recorded commands (targets stay allocated).
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Targets allocated and not yet released.
    #[must_use]
    pub fn live_targets(&self) -> &[TextureId] {
        &self.live_targets
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

impl Renderer for CommandRecorder {
    fn begin_batch(&mut self, blend: BlendMode) {
        self.commands.push(RenderCommand::BeginBatch { blend });
    }

    fn end_batch(&mut self) {
        self.commands.push(RenderCommand::EndBatch);
    }

    fn create_target(&mut self, size: Size) -> TextureId {
        self.next_texture += 1;
        let id = TextureId(self.next_texture);
        self.live_targets.push(id);
        self.commands.push(RenderCommand::CreateTarget { id, size });
        id
    }

    fn release_target(&mut self, id: TextureId) {
        self.live_targets.retain(|t| *t != id);
        self.commands.push(RenderCommand::ReleaseTarget { id });
    }

    fn set_target(&mut self, id: Option<TextureId>) {
        // Clip rectangles belong to a target.
        self.clip_stack.clear();
        self.commands.push(RenderCommand::SetTarget { id });
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(RenderCommand::Clear { color });
    }

    fn push_clip(&mut self, rect: Rect) {
        let bounds = match self.clip_stack.last() {
            Some(current) => current
                .intersection(&rect)
                .unwrap_or(Rect::new(rect.left, rect.top, 0, 0)),
            None => rect,
        };
        self.clip_stack.push(bounds);
        self.commands.push(RenderCommand::PushClip { bounds });
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.commands.push(RenderCommand::PopClip);
    }

    fn draw_nine_slice(
        &mut self,
        image: &SkinImage,
        dest: Rect,
        sizing: Margins,
        color: Color,
        frame: u32,
    ) {
        self.commands.push(RenderCommand::NineSlice {
            image: image.name.clone(),
            dest,
            sizing,
            color,
            frame,
        });
    }

    fn draw_string(
        &mut self,
        font: &SkinFont,
        text: &str,
        dest: Rect,
        color: Color,
        alignment: Alignment,
        ellipsis: bool,
    ) {
        let text = if ellipsis {
            fit_with_ellipsis(font, text, dest.width)
        } else {
            text.to_string()
        };
        let bounds = alignment.place(dest, self.measure_string(font, &text));
        self.commands.push(RenderCommand::Text { text, bounds, color });
    }

    fn measure_string(&self, font: &SkinFont, text: &str) -> Size {
        Size::new(font.char_width * text.chars().count() as i32, font.height)
    }

    fn draw_texture(&mut self, id: TextureId, dest: Rect, src: Rect, color: Color) {
        self.commands.push(RenderCommand::Texture { id, dest, src, color });
    }

    fn draw_outline(&mut self, bounds: Rect, color: Color) {
        self.commands.push(RenderCommand::Outline { bounds, color });
    }
}

/// Cuts `text` so that it plus "..." fits in `width` pixels.
fn fit_with_ellipsis(font: &SkinFont, text: &str, width: i32) -> String {
    let advance = font.char_width.max(1);
    let count = text.chars().count() as i32;
    if count * advance <= width {
        return text.to_string();
    }
    let keep = (width / advance - 3).max(0) as usize;
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}
