#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in widget-local pixel space (origin at the widget's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x.saturating_add(dx), y: self.y.saturating_add(dy) }
    }
}

/// Axis-aligned rectangle in widget-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size anchored at the origin.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Whether `pt` lies inside. The left/top edges are inclusive and the
    /// right/bottom edges exclusive, matching pixel coverage.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let (px, py) = (i64::from(pt.x), i64::from(pt.y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        px >= left && py >= top && px < left + i64::from(self.width) && py < top + i64::from(self.height)
    }
}
