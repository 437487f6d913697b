//! Edge and center geometry for axis-aligned element frames.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Edges, centers and size of an axis-aligned element frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the bounds of a frame given its top-left corner and size.
///
/// Sizes are expected to be non-negative.
pub fn bounds(x: f64, y: f64, width: f64, height: f64) -> Bounds {
    Bounds {
        left: x,
        right: x + width,
        top: y,
        bottom: y + height,
        center_x: x + width / 2.0,
        center_y: y + height / 2.0,
        width,
        height,
    }
}

impl Bounds {
    /// Bounds of a kurbo rectangle (normalized first).
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        bounds(rect.x0, rect.y0, rect.width(), rect.height())
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    /// The same frame shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        bounds(self.left + dx, self.top + dy, self.width, self.height)
    }
}

/// Pixel dimensions of a design canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Bounds {
        bounds(0.0, 0.0, self.width, self.height)
    }
}

impl From<Size> for CanvasSize {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges_and_centers() {
        let b = bounds(100.0, 50.0, 40.0, 20.0);
        assert_eq!(b.left, 100.0);
        assert_eq!(b.right, 140.0);
        assert_eq!(b.top, 50.0);
        assert_eq!(b.bottom, 70.0);
        assert_eq!(b.center_x, 120.0);
        assert_eq!(b.center_y, 60.0);
    }

    #[test]
    fn test_zero_size_collapses_to_point() {
        let b = bounds(10.0, 10.0, 0.0, 0.0);
        assert_eq!(b.left, b.right);
        assert_eq!(b.center_y, 10.0);
    }

    #[test]
    fn test_rect_conversion_normalizes() {
        let b = Bounds::from_rect(Rect::new(50.0, 80.0, 10.0, 20.0));
        assert_eq!(b.left, 10.0);
        assert_eq!(b.top, 20.0);
        assert_eq!(b.width, 40.0);
        assert_eq!(b.to_rect(), Rect::new(10.0, 20.0, 50.0, 80.0));
    }

    #[test]
    fn test_translate() {
        let b = bounds(0.0, 0.0, 10.0, 10.0).translate(5.0, -5.0);
        assert_eq!(b.left, 5.0);
        assert_eq!(b.top, -5.0);
        assert_eq!(b.center_x, 10.0);
    }
}
