//! Per-kind drawing.

use tessera_core::Rect;

use super::scroll_bar::thumb_span;
use super::{ControlKind, Orientation};
use crate::control::Control;
use crate::manager::BASE_LAYER;
use crate::render::{draw_layer, draw_layer_text, Renderer};
use crate::skin::{ControlState, SkinProvider};

/// Skin layer drawn for a scrollbar thumb. Falls back to the base layer in
/// the pressed state.
pub const THUMB_LAYER: &str = "Thumb";

/// What a control needs from the manager to draw itself.
#[derive(Clone, Copy)]
pub(crate) struct DrawContext<'a> {
    pub skin: &'a dyn SkinProvider,
    pub enabled: bool,
    pub focused: bool,
}

/// Draws one control (not its children) into `origin`, its origin rect in
/// render-target coordinates.
pub(crate) fn draw_control(
    ctx: DrawContext<'_>,
    control: &Control,
    renderer: &mut dyn Renderer,
    origin: Rect,
) {
    let Some(layer) = control.skin.layer(BASE_LAYER) else {
        return;
    };
    let state = control.draw_state(ctx.enabled, ctx.focused);
    draw_layer(renderer, ctx.skin, layer, origin, state, control.color);

    match &control.kind {
        ControlKind::ScrollBar(bar) => {
            let track = origin.inset(control.skin.origin_margins);
            let thumb = match bar.orientation {
                Orientation::Vertical => {
                    let (start, length) = thumb_span(bar, track.height);
                    Rect::new(track.left, track.top + start, track.width, length)
                }
                Orientation::Horizontal => {
                    let (start, length) = thumb_span(bar, track.width);
                    Rect::new(track.left + start, track.top, length, track.height)
                }
            };
            let (thumb_layer, thumb_state) = match control.skin.layer(THUMB_LAYER) {
                Some(thumb_layer) => (thumb_layer, state),
                None => (layer, ControlState::Pressed),
            };
            draw_layer(renderer, ctx.skin, thumb_layer, thumb, thumb_state, control.color);
        }
        ControlKind::Control | ControlKind::Container(_) => {}
        ControlKind::Window(_)
        | ControlKind::Button
        | ControlKind::Label
        | ControlKind::ToolTip
        | ControlKind::ComboBox(_) => {
            draw_layer_text(
                renderer,
                ctx.skin,
                layer,
                origin,
                &control.text,
                state,
                control.text_color,
            );
        }
    }
}
