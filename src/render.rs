//! Rendering: paints widget state onto a [`Surface`].
//!
//! Every paint is a full repaint from state: the background fill doubles as
//! the clear, so nothing drawn earlier can leak through and repeated calls
//! with the same state produce the same pixels. Nothing here reads from the
//! surface or mutates application state.
//!
//! All fallible surface calls propagate errors via `Result<(), SurfaceError>`.
//! Store subscribers, which have no caller to return to, log them instead.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{
    DIGIT_ANCHOR_X, DIGIT_ANCHOR_Y, DIGIT_FONT, PREVIEW_BASELINE_RATIO, PREVIEW_BORDER_COLOR, PREVIEW_BORDER_PX,
    PREVIEW_FONT, PREVIEW_FONT_PX, TEXT_COLOR,
};
use crate::error::SurfaceError;
use crate::geom::Point;
use crate::preview::Preview;
use crate::state::WidgetState;
use crate::store::{Store, SubscriptionId};
use crate::surface::{Surface, text_width};

/// Paint the widget surface.
///
/// In order: fill the whole `surface_width × surface_height` rectangle with
/// the fill color, switch to the digit font, switch to white, and draw the
/// digits at the fixed anchor. Digits wider than the surface are clipped by
/// the surface, not rejected here.
///
/// # Errors
///
/// Returns `Err` if the surface rejects the text call.
pub fn draw(surface: &mut dyn Surface, state: &WidgetState) -> Result<(), SurfaceError> {
    surface.set_fill_style(&state.fill_color);
    surface.fill_rect(0.0, 0.0, f64::from(state.surface_width), f64::from(state.surface_height));
    surface.set_font(DIGIT_FONT);
    surface.set_fill_style(TEXT_COLOR);
    surface.fill_text(state.digits.as_str(), DIGIT_ANCHOR_X, DIGIT_ANCHOR_Y)
}

/// Match the surface bitmap to the state's dimensions, then [`draw`].
///
/// # Errors
///
/// Returns `Err` if drawing fails.
pub fn repaint(surface: &mut dyn Surface, state: &WidgetState) -> Result<(), SurfaceError> {
    surface.resize(state.surface_width, state.surface_height);
    draw(surface, state)
}

/// Paint the hover preview with its top-left corner at `origin` on `surface`.
///
/// A border-colored square, the fill color inset by the border width, then
/// the digits centered horizontally with their baseline placed so the glyphs
/// sit on the box's vertical center.
///
/// # Errors
///
/// Returns `Err` if the surface cannot measure or draw the digits.
pub fn draw_preview(surface: &mut dyn Surface, preview: &Preview, origin: Point) -> Result<(), SurfaceError> {
    let x = f64::from(origin.x);
    let y = f64::from(origin.y);
    let size = f64::from(preview.rect.width);
    let inner = (size - 2.0 * PREVIEW_BORDER_PX).max(0.0);

    surface.set_fill_style(PREVIEW_BORDER_COLOR);
    surface.fill_rect(x, y, size, size);
    surface.set_fill_style(&preview.fill_color);
    surface.fill_rect(x + PREVIEW_BORDER_PX, y + PREVIEW_BORDER_PX, inner, inner);

    let text = preview.digits.as_str();
    let text_w = text_width(surface, PREVIEW_FONT, text)?;
    surface.set_fill_style(TEXT_COLOR);
    surface.fill_text(
        text,
        x + (size - text_w) / 2.0,
        y + size / 2.0 + PREVIEW_FONT_PX * PREVIEW_BASELINE_RATIO,
    )
}

/// Paint `surface` from the store's current state, then keep it in sync.
///
/// The subscriber repaints on every change to digits, fill color, palette,
/// or surface size, resizing the bitmap first when the size moved. Hover
/// changes are ignored; the preview has its own subscriber.
///
/// # Errors
///
/// Returns `Err` if the initial paint fails; nothing is subscribed then.
pub fn attach<S>(store: &mut Store, mut surface: S) -> Result<SubscriptionId, SurfaceError>
where
    S: Surface + 'static,
{
    repaint(&mut surface, store.state())?;
    Ok(store.subscribe(move |state, change| {
        if !change.needs_repaint() {
            return;
        }
        if change.surface_size {
            surface.resize(state.surface_width, state.surface_height);
        }
        if let Err(err) = draw(&mut surface, state) {
            tracing::warn!(%err, "surface repaint failed");
        }
    }))
}
