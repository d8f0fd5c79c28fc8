//! # Manager Configuration
//!
//! Timing constants and behavior switches, loaded once at startup from TOML.
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```toml
//! target_width = 1280
//! target_height = 720
//! double_click_time_ms = 400
//!
//! [input]
//! repeat_delay_ms = 400
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Manager-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Render target width in pixels. Caps control widths and texture sizes.
    pub target_width: i32,
    /// Render target height in pixels.
    pub target_height: i32,
    /// Maximum gap between two clicks that still counts as a double-click.
    pub double_click_time_ms: u32,
    /// Hover time before a tooltip appears.
    pub tooltip_delay_ms: u32,
    /// Offscreen textures grow in steps of this many pixels.
    pub texture_granularity: i32,
    /// Clicking outside every control clears focus.
    pub auto_unfocus: bool,
    /// Tab / shoulder buttons cycle focus.
    pub tab_navigation: bool,
    /// Arrow keys / d-pad move focus between siblings.
    pub directional_navigation: bool,
    /// Input system settings.
    pub input: InputConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            target_width: 1280,
            target_height: 720,
            double_click_time_ms: 500,
            tooltip_delay_ms: 500,
            texture_granularity: 32,
            auto_unfocus: true,
            tab_navigation: true,
            directional_navigation: true,
            input: InputConfig::default(),
        }
    }
}

/// Input system settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Time a button must be held before it starts repeating.
    pub repeat_delay_ms: u32,
    /// Time between repeated presses once repeating.
    pub repeat_rate_ms: u32,
    /// Stick/trigger magnitude that counts as a button press.
    pub click_magnitude: f32,
    /// Subtracted from raw mouse positions before scaling.
    pub offset_x: i32,
    /// Subtracted from raw mouse positions before scaling.
    pub offset_y: i32,
    /// Horizontal scale from physical to logical pixels.
    pub ratio_x: f32,
    /// Vertical scale from physical to logical pixels.
    pub ratio_y: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repeat_delay_ms: 500,
            repeat_rate_ms: 50,
            click_magnitude: 0.5,
            offset_x: 0,
            offset_y: 0,
            ratio_x: 1.0,
            ratio_y: 1.0,
        }
    }
}

impl UiConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] on malformed TOML or out-of-range values.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Io`] if the file can't be read, otherwise the errors
    /// of [`UiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| UiError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> UiResult<()> {
        if self.target_width <= 0 || self.target_height <= 0 {
            return Err(UiError::InvalidConfig(
                "target size must be positive".to_string(),
            ));
        }
        if self.texture_granularity <= 0 {
            return Err(UiError::InvalidConfig(
                "texture_granularity must be positive".to_string(),
            ));
        }
        if self.input.repeat_rate_ms == 0 {
            return Err(UiError::InvalidConfig(
                "input.repeat_rate_ms must be positive".to_string(),
            ));
        }
        if self.input.ratio_x <= 0.0 || self.input.ratio_y <= 0.0 {
            return Err(UiError::InvalidConfig(
                "input ratios must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = UiConfig::from_toml_str(
            r"
            target_width = 800
            [input]
            repeat_delay_ms = 250
            ",
        )
        .unwrap();

        assert_eq!(config.target_width, 800);
        assert_eq!(config.target_height, 720);
        assert_eq!(config.input.repeat_delay_ms, 250);
        assert_eq!(config.input.repeat_rate_ms, 50);
    }

    #[test]
    fn test_rejects_zero_repeat_rate() {
        let err = UiConfig::from_toml_str("[input]\nrepeat_rate_ms = 0\n").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = UiConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, UiError::Io { .. }));
    }
}
