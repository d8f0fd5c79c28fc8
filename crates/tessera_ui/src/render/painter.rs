//! Draws skin layers through a [`Renderer`].

use tessera_core::{Color, Rect};

use super::Renderer;
use crate::skin::{ControlState, SkinLayer, SkinProvider};

/// Area of `dest` available to the layer's content.
#[must_use]
pub const fn layer_rect(layer: &SkinLayer, dest: Rect) -> Rect {
    dest.inset(layer.content_margins)
}

/// Draws one 9-slice layer for a state.
///
/// An overlay state first draws the enabled frame, then its own frame on
/// top. `tint` replaces the skin color when the control has an explicit one.
pub fn draw_layer(
    renderer: &mut dyn Renderer,
    skin: &dyn SkinProvider,
    layer: &SkinLayer,
    dest: Rect,
    state: ControlState,
    tint: Option<Color>,
) {
    let Some(image) = skin.image(&layer.image) else {
        tracing::warn!(image = %layer.image, layer = %layer.name, "layer image missing from skin");
        return;
    };

    let style = layer.states.get(state);
    if style.overlay && state != ControlState::Enabled {
        let base = layer.states.get(ControlState::Enabled);
        let color = tint.unwrap_or(base.color);
        renderer.draw_nine_slice(image, dest, layer.sizing_margins, color, base.index);
    }
    let color = tint.unwrap_or(style.color);
    renderer.draw_nine_slice(image, dest, layer.sizing_margins, color, style.index);
}

/// Draws `text` with the layer's font settings. Layers without text settings
/// draw nothing.
pub fn draw_layer_text(
    renderer: &mut dyn Renderer,
    skin: &dyn SkinProvider,
    layer: &SkinLayer,
    dest: Rect,
    text: &str,
    state: ControlState,
    tint: Option<Color>,
) {
    let Some(settings) = &layer.text else {
        return;
    };
    if text.is_empty() {
        return;
    }
    let Some(font) = skin.font(&settings.font) else {
        tracing::warn!(font = %settings.font, layer = %layer.name, "layer font missing from skin");
        return;
    };

    let area = layer_rect(layer, dest).offset(settings.offset.x, settings.offset.y);
    let color = tint.unwrap_or(*settings.colors.get(state));
    renderer.draw_string(font, text, area, color, settings.alignment, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandRecorder, RenderCommand};
    use crate::skin::{Skin, SkinStates, StateStyle};

    #[test]
    fn test_overlay_draws_base_first() {
        let skin = Skin::default_theme();
        let layer = SkinLayer {
            states: SkinStates {
                hovered: StateStyle {
                    index: 2,
                    overlay: true,
                    ..StateStyle::default()
                },
                ..SkinStates::uniform(StateStyle::default())
            },
            ..SkinLayer::default()
        };

        let mut recorder = CommandRecorder::new();
        let dest = Rect::new(0, 0, 40, 20);
        draw_layer(&mut recorder, &skin, &layer, dest, ControlState::Hovered, None);

        let frames: Vec<u32> = recorder
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::NineSlice { frame, .. } => Some(*frame),
                _ => None,
            })
            .collect();
        assert_eq!(frames, vec![0, 2]);
    }

    #[test]
    fn test_tint_overrides_skin_color() {
        let skin = Skin::default_theme();
        let layer = SkinLayer::default();
        let mut recorder = CommandRecorder::new();
        let red = Color::rgb(1.0, 0.0, 0.0);

        let dest = Rect::new(0, 0, 8, 8);
        draw_layer(&mut recorder, &skin, &layer, dest, ControlState::Enabled, Some(red));
        assert!(matches!(
            recorder.commands()[0],
            RenderCommand::NineSlice { color, .. } if color == red
        ));
    }
}
