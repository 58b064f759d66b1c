//! Widget render state: the digits, fill color, palette, surface size, and hover.
//!
//! DESIGN
//! ======
//! `WidgetState` is plain data. It is only mutated through
//! [`crate::store::Store`], which enforces the causal rules between fields
//! (palette overwrites color, digits drive surface width) and notifies
//! subscribers. The types here carry the invariants that do not depend on
//! other fields: [`Digits`] is always exactly two ASCII decimal characters,
//! and [`PaletteId`] is one of the fixed options.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SURFACE_HEIGHT, DIGIT_COUNT, MIN_SURFACE_WIDTH};
use crate::error::UnknownPalette;

// =============================================================================
// DIGITS
// =============================================================================

/// Whether `raw` is acceptable digit input: zero to two ASCII decimal digits.
///
/// The empty string is accepted so a user can clear the field mid-edit.
#[must_use]
pub fn is_digit_input(raw: &str) -> bool {
    raw.len() <= DIGIT_COUNT && raw.bytes().all(|b| b.is_ascii_digit())
}

/// A normalized two-character decimal string, e.g. `"07"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Digits(String);

impl Digits {
    /// Validate and left-pad raw input. Returns `None` if the input is not
    /// zero to two decimal digits.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_digit_input(raw) {
            return None;
        }
        Some(Self(format!("{raw:0>width$}", width = DIGIT_COUNT)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Digits {
    fn default() -> Self {
        Self("00".to_owned())
    }
}

impl AsRef<str> for Digits {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PALETTE
// =============================================================================

/// Identifier of a palette preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteId {
    #[default]
    Default,
    Palette1,
    Palette2,
}

/// One entry of the palette selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteOption {
    pub id: PaletteId,
    /// Human-readable label shown in the selector.
    pub label: &'static str,
    /// Fill color applied when this palette is selected.
    pub preset_color: &'static str,
}

/// The fixed palette options, in selector order.
pub const PALETTE_OPTIONS: [PaletteOption; 3] = [
    PaletteOption { id: PaletteId::Default, label: "Default", preset_color: "#000" },
    PaletteOption { id: PaletteId::Palette1, label: "Palette 1", preset_color: "#f00" },
    PaletteOption { id: PaletteId::Palette2, label: "Palette 2", preset_color: "#0f0" },
];

impl PaletteId {
    /// The id as it appears in the selector's `value` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Palette1 => "palette1",
            Self::Palette2 => "palette2",
        }
    }

    /// The selector option for this id.
    #[must_use]
    pub fn option(self) -> PaletteOption {
        match self {
            Self::Default => PALETTE_OPTIONS[0],
            Self::Palette1 => PALETTE_OPTIONS[1],
            Self::Palette2 => PALETTE_OPTIONS[2],
        }
    }

    /// Fill color this palette applies when selected.
    #[must_use]
    pub fn preset_color(self) -> &'static str {
        self.option().preset_color
    }
}

impl FromStr for PaletteId {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PALETTE_OPTIONS
            .iter()
            .map(|opt| opt.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownPalette(s.to_owned()))
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// HOVER
// =============================================================================

/// Transient pointer-hover state. Recomputed on every pointer-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Hover {
    /// Whether the pointer is currently inside the widget.
    pub active: bool,
    /// Left edge of the preview box (pointer x plus offset).
    pub x: i32,
    /// Top edge of the preview box (pointer y plus offset).
    pub y: i32,
}

// =============================================================================
// WIDGET STATE
// =============================================================================

/// Everything the renderer and the preview read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetState {
    pub digits: Digits,
    pub fill_color: String,
    pub palette: PaletteId,
    pub surface_width: u32,
    pub surface_height: u32,
    pub hover: Hover,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            digits: Digits::default(),
            fill_color: PaletteId::Default.preset_color().to_owned(),
            palette: PaletteId::Default,
            surface_width: MIN_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            hover: Hover::default(),
        }
    }
}
