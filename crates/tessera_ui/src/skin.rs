//! # Skins
//!
//! A skin maps control type names ("Button", "Window", ...) to a
//! [`SkinControl`]: default and minimum size, margins and a list of 9-slice
//! layers with per-state colors and frame indices.
//!
//! The manager only sees the [`SkinProvider`] trait. [`Skin`] is an in-memory
//! provider that can be built in code or deserialized from TOML:
//!
//! ```toml
//! name = "plain"
//!
//! [[images]]
//! name = "Frame"
//! width = 32
//! height = 32
//!
//! [[fonts]]
//! name = "Default"
//! height = 14
//! char_width = 7
//!
//! [[controls]]
//! name = "Control"
//! default_size = { width = 64, height = 24 }
//!
//! [[controls.layers]]
//! name = "Control"
//! image = "Frame"
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessera_core::{Color, Margins, Point, Size};

use crate::error::{UiError, UiResult};
use crate::render::Alignment;

/// Interaction state used to pick a layer's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlState {
    /// Idle.
    Enabled,
    /// Under the cursor.
    Hovered,
    /// Held down by a mouse button.
    Pressed,
    /// Has keyboard focus.
    Focused,
    /// Disabled.
    Disabled,
}

/// One value per [`ControlState`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinStates<T> {
    /// Idle value.
    pub enabled: T,
    /// Hover value.
    pub hovered: T,
    /// Pressed value.
    pub pressed: T,
    /// Focused value.
    pub focused: T,
    /// Disabled value.
    pub disabled: T,
}

impl<T: Clone> SkinStates<T> {
    /// Same value for every state.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self {
            enabled: value.clone(),
            hovered: value.clone(),
            pressed: value.clone(),
            focused: value.clone(),
            disabled: value,
        }
    }
}

impl<T> SkinStates<T> {
    /// Value for a state.
    #[must_use]
    pub const fn get(&self, state: ControlState) -> &T {
        match state {
            ControlState::Enabled => &self.enabled,
            ControlState::Hovered => &self.hovered,
            ControlState::Pressed => &self.pressed,
            ControlState::Focused => &self.focused,
            ControlState::Disabled => &self.disabled,
        }
    }
}

/// How a layer looks in one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateStyle {
    /// Tint.
    pub color: Color,
    /// Frame index in the layer image.
    pub index: u32,
    /// Draw the enabled frame first, then this one on top.
    pub overlay: bool,
}

impl Default for StateStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            index: 0,
            overlay: false,
        }
    }
}

/// Text settings of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinText {
    /// Font name.
    pub font: String,
    /// Color per state.
    pub colors: SkinStates<Color>,
    /// Placement inside the layer's content rect.
    pub alignment: Alignment,
    /// Pixel offset applied after alignment.
    pub offset: Point,
}

impl Default for SkinText {
    fn default() -> Self {
        Self {
            font: "Default".to_string(),
            colors: SkinStates::uniform(Color::BLACK),
            alignment: Alignment::MiddleCenter,
            offset: Point::ZERO,
        }
    }
}

/// A 9-slice image layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinLayer {
    /// Layer name.
    pub name: String,
    /// Image name.
    pub image: String,
    /// Border widths that are not stretched.
    pub sizing_margins: Margins,
    /// Inset of the layer's content area (text).
    pub content_margins: Margins,
    /// Style per state.
    pub states: SkinStates<StateStyle>,
    /// Text settings, if the layer draws text.
    pub text: Option<SkinText>,
}

impl Default for SkinLayer {
    fn default() -> Self {
        Self {
            name: "Control".to_string(),
            image: "Frame".to_string(),
            sizing_margins: Margins::ZERO,
            content_margins: Margins::ZERO,
            states: SkinStates::uniform(StateStyle::default()),
            text: None,
        }
    }
}

/// Skin definition of one control type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinControl {
    /// Control type name.
    pub name: String,
    /// Size applied at creation.
    pub default_size: Size,
    /// Lower bound for width/height.
    pub minimum_size: Size,
    /// Pixels drawn outside the logical box.
    pub origin_margins: Margins,
    /// Inset of the client area, measured from the origin rect.
    pub client_margins: Margins,
    /// Width of the resize band.
    pub resizer_size: i32,
    /// Layers, drawn in order.
    pub layers: Vec<SkinLayer>,
}

impl Default for SkinControl {
    fn default() -> Self {
        Self {
            name: "Control".to_string(),
            default_size: Size::new(64, 24),
            minimum_size: Size::ZERO,
            origin_margins: Margins::ZERO,
            client_margins: Margins::ZERO,
            resizer_size: 4,
            layers: vec![SkinLayer::default()],
        }
    }
}

impl SkinControl {
    /// Finds a layer by name (case-insensitive).
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&SkinLayer> {
        self.layers.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Fails if the layer is missing.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::MissingLayer`].
    pub fn check_layer(&self, name: &str) -> UiResult<&SkinLayer> {
        self.layer(name).ok_or_else(|| UiError::MissingLayer {
            control: self.name.clone(),
            layer: name.to_string(),
        })
    }
}

/// Image descriptor. Frames are laid out horizontally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinImage {
    /// Image name.
    pub name: String,
    /// Width of one frame.
    pub width: i32,
    /// Height.
    pub height: i32,
    /// Number of frames.
    pub frames: u32,
}

impl Default for SkinImage {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 32,
            height: 32,
            frames: 1,
        }
    }
}

/// Font descriptor. Metrics are fixed-pitch; hosts with real fonts measure
/// through [`Renderer::measure_string`](crate::render::Renderer::measure_string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinFont {
    /// Font name.
    pub name: String,
    /// Line height.
    pub height: i32,
    /// Advance per character.
    pub char_width: i32,
}

impl Default for SkinFont {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            height: 14,
            char_width: 7,
        }
    }
}

/// Mouse cursor descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinCursor {
    /// Cursor name.
    pub name: String,
    /// Image name.
    pub image: String,
    /// Hot spot inside the image.
    pub hotspot: Point,
}

impl Default for SkinCursor {
    fn default() -> Self {
        Self {
            name: String::new(),
            image: String::new(),
            hotspot: Point::ZERO,
        }
    }
}

/// Cursor names the manager asks for.
pub mod cursors {
    /// Regular arrow.
    pub const DEFAULT: &str = "Default";
    /// Left/right edge.
    pub const HORIZONTAL: &str = "Horizontal";
    /// Top/bottom edge.
    pub const VERTICAL: &str = "Vertical";
    /// Top-left or bottom-right corner.
    pub const DIAGONAL_LEFT: &str = "DiagonalLeft";
    /// Top-right or bottom-left corner.
    pub const DIAGONAL_RIGHT: &str = "DiagonalRight";
}

/// Source of skin definitions.
pub trait SkinProvider {
    /// Skin name, for diagnostics.
    fn name(&self) -> &str;

    /// Definition of a control type.
    fn control_skin(&self, type_name: &str) -> Option<Arc<SkinControl>>;

    /// Image by name.
    fn image(&self, name: &str) -> Option<&SkinImage>;

    /// Font by name.
    fn font(&self, name: &str) -> Option<&SkinFont>;

    /// Cursor by name.
    fn cursor(&self, name: &str) -> Option<&SkinCursor>;
}

/// Serialized form of a [`Skin`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinDefinition {
    /// Skin name.
    pub name: String,
    /// Control definitions.
    pub controls: Vec<SkinControl>,
    /// Images.
    pub images: Vec<SkinImage>,
    /// Fonts.
    pub fonts: Vec<SkinFont>,
    /// Cursors.
    pub cursors: Vec<SkinCursor>,
}

/// In-memory skin. Lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Skin {
    name: String,
    controls: HashMap<String, Arc<SkinControl>>,
    images: HashMap<String, SkinImage>,
    fonts: HashMap<String, SkinFont>,
    cursors: HashMap<String, SkinCursor>,
}

impl Skin {
    /// Indexes a definition.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidSkin`] if a layer refers to an image or font
    /// the definition doesn't contain.
    pub fn from_definition(definition: SkinDefinition) -> UiResult<Self> {
        let images: HashMap<_, _> = definition
            .images
            .into_iter()
            .map(|i| (i.name.to_ascii_lowercase(), i))
            .collect();
        let fonts: HashMap<_, _> = definition
            .fonts
            .into_iter()
            .map(|f| (f.name.to_ascii_lowercase(), f))
            .collect();

        for control in &definition.controls {
            for layer in &control.layers {
                if !images.contains_key(&layer.image.to_ascii_lowercase()) {
                    return Err(UiError::InvalidSkin(format!(
                        "layer `{}` of `{}` uses unknown image `{}`",
                        layer.name, control.name, layer.image
                    )));
                }
                if let Some(text) = &layer.text {
                    if !fonts.contains_key(&text.font.to_ascii_lowercase()) {
                        return Err(UiError::InvalidSkin(format!(
                            "layer `{}` of `{}` uses unknown font `{}`",
                            layer.name, control.name, text.font
                        )));
                    }
                }
            }
        }

        let skin = Self {
            name: definition.name,
            controls: definition
                .controls
                .into_iter()
                .map(|c| (c.name.to_ascii_lowercase(), Arc::new(c)))
                .collect(),
            images,
            fonts,
            cursors: definition
                .cursors
                .into_iter()
                .map(|c| (c.name.to_ascii_lowercase(), c))
                .collect(),
        };
        tracing::debug!(
            skin = %skin.name,
            controls = skin.controls.len(),
            "skin indexed"
        );
        Ok(skin)
    }

    /// Parses a skin from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidSkin`] on malformed TOML or dangling references.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let definition: SkinDefinition =
            toml::from_str(text).map_err(|e| UiError::InvalidSkin(e.to_string()))?;
        Self::from_definition(definition)
    }

    /// Loads a skin file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Io`] if the file can't be read, otherwise the errors
    /// of [`Skin::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| UiError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Adds or replaces a control definition.
    pub fn insert_control(&mut self, control: SkinControl) {
        self.controls
            .insert(control.name.to_ascii_lowercase(), Arc::new(control));
    }

    /// Removes a control definition.
    pub fn remove_control(&mut self, name: &str) -> Option<Arc<SkinControl>> {
        self.controls.remove(&name.to_ascii_lowercase())
    }

    /// A complete flat skin covering every built-in control type.
    #[must_use]
    pub fn default_theme() -> Self {
        let text_layer = |alignment| SkinLayer {
            text: Some(SkinText {
                alignment,
                ..SkinText::default()
            }),
            ..SkinLayer::default()
        };
        let pressable = SkinLayer {
            states: SkinStates {
                enabled: StateStyle::default(),
                hovered: StateStyle { index: 1, ..StateStyle::default() },
                pressed: StateStyle { index: 2, ..StateStyle::default() },
                focused: StateStyle { index: 3, ..StateStyle::default() },
                disabled: StateStyle {
                    color: Color::rgba(1.0, 1.0, 1.0, 0.5),
                    index: 0,
                    overlay: false,
                },
            },
            sizing_margins: Margins::uniform(4),
            ..text_layer(Alignment::MiddleCenter)
        };

        let definition = SkinDefinition {
            name: "Default".to_string(),
            controls: vec![
                SkinControl::default(),
                SkinControl {
                    name: "Container".to_string(),
                    default_size: Size::new(200, 150),
                    ..SkinControl::default()
                },
                SkinControl {
                    name: "Window".to_string(),
                    default_size: Size::new(320, 240),
                    minimum_size: Size::new(64, 48),
                    origin_margins: Margins::uniform(2),
                    client_margins: Margins::new(6, 26, 6, 6),
                    resizer_size: 4,
                    layers: vec![SkinLayer {
                        sizing_margins: Margins::new(6, 26, 6, 6),
                        ..text_layer(Alignment::TopLeft)
                    }],
                },
                SkinControl {
                    name: "Button".to_string(),
                    default_size: Size::new(72, 24),
                    minimum_size: Size::new(8, 8),
                    layers: vec![pressable.clone()],
                    ..SkinControl::default()
                },
                SkinControl {
                    name: "Label".to_string(),
                    default_size: Size::new(64, 16),
                    layers: vec![text_layer(Alignment::MiddleLeft)],
                    ..SkinControl::default()
                },
                SkinControl {
                    name: "ToolTip".to_string(),
                    default_size: Size::new(64, 20),
                    client_margins: Margins::uniform(2),
                    layers: vec![text_layer(Alignment::MiddleLeft)],
                    ..SkinControl::default()
                },
                SkinControl {
                    name: "ScrollBar".to_string(),
                    default_size: Size::new(16, 16),
                    minimum_size: Size::new(8, 8),
                    ..SkinControl::default()
                },
                SkinControl {
                    name: "ComboBox".to_string(),
                    default_size: Size::new(120, 22),
                    minimum_size: Size::new(24, 16),
                    layers: vec![SkinLayer {
                        content_margins: Margins::new(4, 0, 20, 0),
                        ..pressable
                    }],
                    ..SkinControl::default()
                },
            ],
            images: vec![SkinImage {
                name: "Frame".to_string(),
                frames: 4,
                ..SkinImage::default()
            }],
            fonts: vec![SkinFont::default()],
            cursors: [
                cursors::DEFAULT,
                cursors::HORIZONTAL,
                cursors::VERTICAL,
                cursors::DIAGONAL_LEFT,
                cursors::DIAGONAL_RIGHT,
            ]
            .into_iter()
            .map(|name| SkinCursor {
                name: name.to_string(),
                image: format!("Cursor{name}"),
                hotspot: Point::ZERO,
            })
            .collect(),
        };

        // Every reference above resolves, so indexing can't fail.
        Self::from_definition(definition).unwrap_or_else(|_| Self::empty("Default"))
    }

    /// A skin with no definitions.
    #[must_use]
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            controls: HashMap::new(),
            images: HashMap::new(),
            fonts: HashMap::new(),
            cursors: HashMap::new(),
        }
    }
}

impl SkinProvider for Skin {
    fn name(&self) -> &str {
        &self.name
    }

    fn control_skin(&self, type_name: &str) -> Option<Arc<SkinControl>> {
        self.controls.get(&type_name.to_ascii_lowercase()).cloned()
    }

    fn image(&self, name: &str) -> Option<&SkinImage> {
        self.images.get(&name.to_ascii_lowercase())
    }

    fn font(&self, name: &str) -> Option<&SkinFont> {
        self.fonts.get(&name.to_ascii_lowercase())
    }

    fn cursor(&self, name: &str) -> Option<&SkinCursor> {
        self.cursors.get(&name.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_covers_builtins() {
        let skin = Skin::default_theme();
        let names = [
            "Control",
            "Container",
            "Window",
            "Button",
            "Label",
            "ToolTip",
            "ScrollBar",
            "ComboBox",
        ];
        for name in names {
            let control = skin.control_skin(name).unwrap();
            control.check_layer("Control").unwrap();
        }
        assert!(skin.font("default").is_some());
        assert!(skin.cursor(cursors::HORIZONTAL).is_some());
    }

    #[test]
    fn test_toml_roundtrip_minimal() {
        let skin = Skin::from_toml_str(
            r#"
            name = "tiny"

            [[images]]
            name = "Frame"

            [[controls]]
            name = "Control"
            default_size = { width = 10, height = 12 }

            [[controls.layers]]
            name = "Control"
            image = "Frame"
            "#,
        )
        .unwrap();

        let control = skin.control_skin("control").unwrap();
        assert_eq!(control.default_size, Size::new(10, 12));
        assert_eq!(control.layers.len(), 1);
    }

    #[test]
    fn test_dangling_image_is_invalid() {
        let err = Skin::from_toml_str(
            r#"
            [[controls]]
            name = "Control"
            [[controls.layers]]
            image = "Nope"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, UiError::InvalidSkin(_)));
    }

    #[test]
    fn test_check_layer_reports_missing() {
        let control = SkinControl {
            name: "Odd".to_string(),
            layers: Vec::new(),
            ..SkinControl::default()
        };
        let err = control.check_layer("Control").unwrap_err();
        assert_eq!(
            err,
            UiError::MissingLayer {
                control: "Odd".to_string(),
                layer: "Control".to_string()
            }
        );
    }
}
