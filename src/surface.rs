//! Drawing-surface contract and its two implementations.
//!
//! The renderer and the preview only ever draw through [`Surface`]: a minimal
//! immediate-mode 2D API (fill style, font, filled rectangles, filled text,
//! text measurement). [`CanvasSurface`] maps it onto the browser's
//! `CanvasRenderingContext2d`; this module is the only place that touches
//! that type. [`RecordingSurface`] keeps a log of draw calls for headless
//! hosts and tests.
//!
//! Both implementations are cheap `Clone` handles onto shared state, so the
//! same surface can be held by a store subscriber and by the engine at once.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::SurfaceError;

/// Immediate-mode 2D drawing target.
pub trait Surface {
    /// Width in pixels of `text` rendered with the current font.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying context cannot measure text.
    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError>;

    /// Fill a rectangle with the current fill style.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Set the style used by subsequent fills (a CSS color string).
    fn set_fill_style(&mut self, style: &str);

    /// Set the font used by subsequent text calls (CSS font shorthand).
    fn set_font(&mut self, font: &str);

    /// Draw `text` with its left edge at `x` and its baseline at `y`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the underlying context rejects the call.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// Resize the backing bitmap. Existing content may be discarded.
    fn resize(&mut self, width: u32, height: u32);
}

/// A surface that floats above the widget and can be moved or hidden.
pub trait Overlay: Surface {
    /// Place the overlay's top-left corner at `(x, y)` in widget-local space and show it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the overlay element cannot be restyled.
    fn show_at(&mut self, x: i32, y: i32) -> Result<(), SurfaceError>;

    /// Hide the overlay.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the overlay element cannot be restyled.
    fn hide(&mut self) -> Result<(), SurfaceError>;
}

/// Measure `text` in `font`. Leaves `font` set on the surface.
///
/// # Errors
///
/// Propagates the surface's measurement error.
pub fn text_width(surface: &mut dyn Surface, font: &str, text: &str) -> Result<f64, SurfaceError> {
    surface.set_font(font);
    surface.measure_text(text)
}

// =============================================================
// Browser canvas
// =============================================================

/// [`Surface`] backed by an `HtmlCanvasElement` and its 2D context.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::NoContext`] if the element has no 2D context,
    /// or [`SurfaceError::Canvas`] if `getContext` throws.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SurfaceError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        Ok(self.ctx.measure_text(text)?.width())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.fill_text(text, x, y)?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Overlay for CanvasSurface {
    fn show_at(&mut self, x: i32, y: i32) -> Result<(), SurfaceError> {
        let style = self.canvas.style();
        style.set_property("left", &format!("{x}px"))?;
        style.set_property("top", &format!("{y}px"))?;
        style.set_property("display", "block")?;
        Ok(())
    }

    fn hide(&mut self) -> Result<(), SurfaceError> {
        self.canvas.style().set_property("display", "none")?;
        Ok(())
    }
}

// =============================================================
// Recording surface
// =============================================================

/// Font a fresh 2D context starts with.
const INITIAL_FONT: &str = "10px sans-serif";

/// Bitmap size a fresh canvas element starts with.
const INITIAL_SIZE: (u32, u32) = (300, 150);

/// Average glyph advance as a fraction of the font size, used to approximate text width.
const GLYPH_ADVANCE_RATIO: f64 = 0.5;

/// One recorded call against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetFillStyle(String),
    SetFont(String),
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    FillText { text: String, x: f64, y: f64 },
    Resize { width: u32, height: u32 },
    Show { x: i32, y: i32 },
    Hide,
}

#[derive(Debug)]
struct Recording {
    ops: Vec<DrawOp>,
    font: String,
    width: u32,
    height: u32,
    visible: bool,
}

impl Default for Recording {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            font: INITIAL_FONT.to_owned(),
            width: INITIAL_SIZE.0,
            height: INITIAL_SIZE.1,
            visible: false,
        }
    }
}

/// Headless [`Surface`] that records every state-changing call.
///
/// Clones share one log. Text width is approximated from the pixel size in
/// the current font, so measurements are deterministic across platforms.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every call recorded so far.
    #[must_use]
    pub fn ops(&self) -> Vec<DrawOp> {
        self.inner.borrow().ops.clone()
    }

    /// Drain the log, returning what was recorded.
    pub fn take_ops(&self) -> Vec<DrawOp> {
        std::mem::take(&mut self.inner.borrow_mut().ops)
    }

    /// Current bitmap size as `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        let rec = self.inner.borrow();
        (rec.width, rec.height)
    }

    /// Whether the surface is currently shown (see [`Overlay`]).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    fn push(&self, op: DrawOp) {
        self.inner.borrow_mut().ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        let px = font_px(&self.inner.borrow().font);
        Ok(approx_text_width(px, text))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::FillRect { x, y, width, height });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.push(DrawOp::SetFillStyle(style.to_owned()));
    }

    fn set_font(&mut self, font: &str) {
        self.inner.borrow_mut().font = font.to_owned();
        self.push(DrawOp::SetFont(font.to_owned()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.push(DrawOp::FillText { text: text.to_owned(), x, y });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        {
            let mut rec = self.inner.borrow_mut();
            rec.width = width;
            rec.height = height;
        }
        self.push(DrawOp::Resize { width, height });
    }
}

impl Overlay for RecordingSurface {
    fn show_at(&mut self, x: i32, y: i32) -> Result<(), SurfaceError> {
        self.inner.borrow_mut().visible = true;
        self.push(DrawOp::Show { x, y });
        Ok(())
    }

    fn hide(&mut self) -> Result<(), SurfaceError> {
        self.inner.borrow_mut().visible = false;
        self.push(DrawOp::Hide);
        Ok(())
    }
}

/// Pixel size from a CSS font shorthand such as `"bold 50px sans-serif"`.
/// Falls back to the canvas default of 10px.
fn font_px(font: &str) -> f64 {
    font.split_whitespace()
        .filter_map(|tok| tok.strip_suffix("px"))
        .find_map(|n| match n.parse::<f64>() {
            Ok(px) if px > 0.0 => Some(px),
            _ => None,
        })
        .unwrap_or(10.0)
}

#[allow(clippy::cast_precision_loss)]
fn approx_text_width(font_px: f64, text: &str) -> f64 {
    text.chars().count() as f64 * font_px * GLYPH_ADVANCE_RATIO
}
