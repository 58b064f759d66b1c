//! Shared constants for the digit widget.

// ── Surface ─────────────────────────────────────────────────────

/// Minimum surface width in pixels; the width-fit rule never goes below it.
pub const MIN_SURFACE_WIDTH: u32 = 600;

/// Horizontal room added to the measured digit width when fitting the surface.
pub const WIDTH_MARGIN_PX: u32 = 100;

/// Surface height until an explicit resize arrives.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 400;

// ── Digits ──────────────────────────────────────────────────────

/// Number of characters in a normalized digit string.
pub const DIGIT_COUNT: usize = 2;

/// Font used for the digits on the main surface (and for the width-fit measurement).
pub const DIGIT_FONT: &str = "bold 50px sans-serif";

/// Left edge of the digit text, relative to the surface's top-left corner.
pub const DIGIT_ANCHOR_X: f64 = 50.0;

/// Baseline of the digit text, relative to the surface's top-left corner.
pub const DIGIT_ANCHOR_Y: f64 = 100.0;

/// Text color for digits on both the surface and the preview.
pub const TEXT_COLOR: &str = "#fff";

// ── Hover preview ───────────────────────────────────────────────

/// Side length of the square preview box.
pub const PREVIEW_SIZE: u32 = 100;

/// Offset from the pointer to the preview's top-left corner, per axis.
pub const PREVIEW_OFFSET: i32 = 10;

/// Pixel size of the preview font; kept in step with [`PREVIEW_FONT`].
pub const PREVIEW_FONT_PX: f64 = 60.0;

/// Font used for the magnified digits in the preview.
pub const PREVIEW_FONT: &str = "bold 60px sans-serif";

/// Baseline drop below the box center, as a fraction of the font size.
pub const PREVIEW_BASELINE_RATIO: f64 = 0.35;

/// Preview border thickness in pixels.
pub const PREVIEW_BORDER_PX: f64 = 1.0;

/// Preview border color.
pub const PREVIEW_BORDER_COLOR: &str = "#000";
