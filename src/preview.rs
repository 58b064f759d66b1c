//! Hover preview: a magnified copy of the digits that follows the pointer.
//!
//! DESIGN
//! ======
//! The preview is derived state. [`preview`] turns the store's hover fields
//! into a box (or nothing, when the pointer is outside the widget), and
//! [`attach`] keeps an [`Overlay`] in step with it: hidden while inactive,
//! moved on every pointer move, redrawn whenever the digits or fill color
//! change under the pointer. The overlay is sized once to the configured box
//! and drawn in its own local space, so its content never depends on where
//! it is shown.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use crate::error::SurfaceError;
use crate::geom::{Point, Rect};
use crate::render::draw_preview;
use crate::state::{Digits, WidgetState};
use crate::store::{Store, SubscriptionId};
use crate::surface::Overlay;

/// What the preview box shows and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Box placement in widget-local space.
    pub rect: Rect,
    pub digits: Digits,
    pub fill_color: String,
}

/// The preview for `state`, or `None` while the pointer is outside the widget.
#[must_use]
pub fn preview(state: &WidgetState, size: u32) -> Option<Preview> {
    if !state.hover.active {
        return None;
    }
    Some(Preview {
        rect: Rect::new(state.hover.x, state.hover.y, size, size),
        digits: state.digits.clone(),
        fill_color: state.fill_color.clone(),
    })
}

/// Size `overlay` to the preview box, sync it to the current hover state,
/// then keep it in sync through a store subscription.
///
/// # Errors
///
/// Returns `Err` if the initial sync fails; nothing is subscribed then.
pub fn attach<O>(store: &mut Store, mut overlay: O) -> Result<SubscriptionId, SurfaceError>
where
    O: Overlay + 'static,
{
    let size = store.config().preview_size;
    overlay.resize(size, size);
    sync(&mut overlay, preview(store.state(), size).as_ref(), true)?;

    Ok(store.subscribe(move |state, change| {
        if !change.affects_preview() {
            return;
        }
        if let Err(err) = sync(&mut overlay, preview(state, size).as_ref(), change.hover) {
            tracing::warn!(%err, "preview update failed");
        }
    }))
}

/// Show and redraw for an active preview, hide for an inactive one.
/// The overlay is only moved (or hidden) when the hover itself `moved`.
fn sync<O: Overlay>(overlay: &mut O, preview: Option<&Preview>, moved: bool) -> Result<(), SurfaceError> {
    match preview {
        Some(preview) => {
            if moved {
                overlay.show_at(preview.rect.x, preview.rect.y)?;
            }
            draw_preview(overlay, preview, Point::default())
        }
        None if moved => overlay.hide(),
        None => Ok(()),
    }
}
