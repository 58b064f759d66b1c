//! Widget configuration.
//!
//! DESIGN
//! ======
//! The host page may pass a JSON object when it mounts the widget. Every key
//! is optional; missing keys fall back to the values in [`crate::consts`], so
//! `{}` and no config at all behave identically. Values are validated once at
//! load time and trusted afterwards.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DEFAULT_SURFACE_HEIGHT, MIN_SURFACE_WIDTH, PREVIEW_OFFSET, PREVIEW_SIZE, WIDTH_MARGIN_PX};
use crate::error::ConfigError;
use crate::state::{Digits, Hover, PaletteId, WidgetState};

/// Tunables for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WidgetConfig {
    /// Raw digit text to start from; padded like user input.
    pub initial_digits: String,
    /// Palette selected at startup.
    pub initial_palette: PaletteId,
    /// Starting fill color. Defaults to the initial palette's preset.
    pub initial_color: Option<String>,
    /// Floor for the fitted surface width.
    pub min_width: u32,
    /// Room added to the measured digit width when fitting the surface.
    pub width_margin: u32,
    /// Surface height until an explicit resize.
    pub surface_height: u32,
    /// Side length of the hover preview box.
    pub preview_size: u32,
    /// Pointer-to-preview offset, per axis.
    pub preview_offset: i32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            initial_digits: Digits::default().to_string(),
            initial_palette: PaletteId::Default,
            initial_color: None,
            min_width: MIN_SURFACE_WIDTH,
            width_margin: WIDTH_MARGIN_PX,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            preview_size: PREVIEW_SIZE,
            preview_offset: PREVIEW_OFFSET,
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON or unknown keys, and
    /// the matching variant for any value [`WidgetConfig::validate`] rejects.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InitialDigits`] if `initial_digits` is not 0-2
    /// decimal digits, or [`ConfigError::NonPositive`] for a zero size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Digits::parse(&self.initial_digits).is_none() {
            return Err(ConfigError::InitialDigits(self.initial_digits.clone()));
        }
        for (field, value) in [
            ("minWidth", self.min_width),
            ("surfaceHeight", self.surface_height),
            ("previewSize", self.preview_size),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        Ok(())
    }

    /// The state a freshly mounted widget starts in.
    ///
    /// The width starts at the floor; the owner refits it once a surface is
    /// available to measure with.
    #[must_use]
    pub fn initial_state(&self) -> WidgetState {
        let fill_color = self
            .initial_color
            .clone()
            .unwrap_or_else(|| self.initial_palette.preset_color().to_owned());
        WidgetState {
            digits: Digits::parse(&self.initial_digits).unwrap_or_default(),
            fill_color,
            palette: self.initial_palette,
            surface_width: self.min_width,
            surface_height: self.surface_height,
            hover: Hover::default(),
        }
    }
}
