#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geom::{Point, Rect};
use crate::state::WidgetState;

/// Region of widget-local space that counts as "over the widget".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    /// The drawing surface at its current size. Follows width refits and resizes.
    #[default]
    Surface,
    /// A fixed rectangle supplied by the host, e.g. when the widget's layout
    /// box is larger or smaller than its surface.
    Explicit(Rect),
}

impl Bounds {
    /// The concrete rectangle for `state`.
    #[must_use]
    pub fn resolve(self, state: &WidgetState) -> Rect {
        match self {
            Self::Surface => Rect::from_size(state.surface_width, state.surface_height),
            Self::Explicit(rect) => rect,
        }
    }
}

/// Whether `pointer` is over the widget.
#[must_use]
pub fn hit_test(pointer: Point, bounds: Bounds, state: &WidgetState) -> bool {
    bounds.resolve(state).contains(pointer)
}
