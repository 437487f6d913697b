//! Selection handles and the resize / rotate math behind them.

use crate::geometry::{Bounds, bounds};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;
/// Distance from the top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;
/// Rotation snap increment in degrees.
pub const ROTATION_SNAP_DEGREES: f64 = 15.0;
/// Smallest width or height a resize can produce.
pub const MIN_ELEMENT_SIZE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    /// Edge midpoint, resizes one dimension.
    Edge(Edge),
    /// Above the top-center.
    Rotate,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in canvas coordinates) hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Handles for a frame rotated by `rotation` degrees around its center.
///
/// Text that sizes itself only gets the rotation handle.
pub fn handles(frame: &Bounds, rotation: f64, resizable: bool) -> Vec<Handle> {
    let center = Point::new(frame.center_x, frame.center_y);
    let (sin, cos) = rotation.to_radians().sin_cos();
    let place = |dx: f64, dy: f64| Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos);

    let half_w = frame.width / 2.0;
    let half_h = frame.height / 2.0;
    let mut out = Vec::with_capacity(9);
    if resizable {
        out.extend([
            Handle::new(place(-half_w, -half_h), HandleKind::Corner(Corner::TopLeft)),
            Handle::new(place(half_w, -half_h), HandleKind::Corner(Corner::TopRight)),
            Handle::new(place(-half_w, half_h), HandleKind::Corner(Corner::BottomLeft)),
            Handle::new(place(half_w, half_h), HandleKind::Corner(Corner::BottomRight)),
            Handle::new(place(0.0, -half_h), HandleKind::Edge(Edge::Top)),
            Handle::new(place(half_w, 0.0), HandleKind::Edge(Edge::Right)),
            Handle::new(place(0.0, half_h), HandleKind::Edge(Edge::Bottom)),
            Handle::new(place(-half_w, 0.0), HandleKind::Edge(Edge::Left)),
        ]);
    }
    out.push(Handle::new(place(0.0, -half_h - ROTATE_HANDLE_OFFSET), HandleKind::Rotate));
    out
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(frame: &Bounds, rotation: f64, resizable: bool, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles(frame, rotation, resizable)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Resize `frame` by dragging `handle` by `delta`.
///
/// The opposite corner or edge stays put. Dragging past it flips the frame.
/// With `keep_aspect_ratio`, corner drags scale both sides by the larger
/// change. Rotation handles leave the frame unchanged.
pub fn resize(frame: &Bounds, handle: HandleKind, delta: Vec2, keep_aspect_ratio: bool) -> Bounds {
    let (mut x0, mut y0, mut x1, mut y1) = (frame.left, frame.top, frame.right, frame.bottom);
    match handle {
        HandleKind::Corner(Corner::TopLeft) => {
            x0 += delta.x;
            y0 += delta.y;
        }
        HandleKind::Corner(Corner::TopRight) => {
            x1 += delta.x;
            y0 += delta.y;
        }
        HandleKind::Corner(Corner::BottomLeft) => {
            x0 += delta.x;
            y1 += delta.y;
        }
        HandleKind::Corner(Corner::BottomRight) => {
            x1 += delta.x;
            y1 += delta.y;
        }
        HandleKind::Edge(Edge::Top) => y0 += delta.y,
        HandleKind::Edge(Edge::Right) => x1 += delta.x,
        HandleKind::Edge(Edge::Bottom) => y1 += delta.y,
        HandleKind::Edge(Edge::Left) => x0 += delta.x,
        HandleKind::Rotate => return *frame,
    }

    let (mut left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    let (mut top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
    let mut width = (right - left).max(MIN_ELEMENT_SIZE);
    let mut height = (bottom - top).max(MIN_ELEMENT_SIZE);

    if let (true, HandleKind::Corner(corner)) = (keep_aspect_ratio, handle) {
        let aspect = frame.width / frame.height.max(0.1);
        let scale = (width / frame.width.max(0.1)).max(height / frame.height.max(0.1));
        width = (frame.width * scale).max(MIN_ELEMENT_SIZE);
        height = (width / aspect).max(MIN_ELEMENT_SIZE);

        // Grow away from the corner that stays fixed.
        let (fixed_x, moving_x) = match corner {
            Corner::TopLeft | Corner::BottomLeft => (frame.right, x0),
            Corner::TopRight | Corner::BottomRight => (frame.left, x1),
        };
        let (fixed_y, moving_y) = match corner {
            Corner::TopLeft | Corner::TopRight => (frame.bottom, y0),
            Corner::BottomLeft | Corner::BottomRight => (frame.top, y1),
        };
        left = if moving_x >= fixed_x { fixed_x } else { fixed_x - width };
        top = if moving_y >= fixed_y { fixed_y } else { fixed_y - height };
    }

    bounds(left, top, width, height)
}

/// Rotation (degrees, clockwise from up, in `[0, 360)`) that points the
/// rotation handle of a frame centered on `center` at `cursor`.
pub fn rotation_towards(center: Point, cursor: Point, snap: bool) -> f64 {
    let d = cursor - center;
    let mut angle = d.y.atan2(d.x).to_degrees() + 90.0;
    if snap {
        angle = (angle / ROTATION_SNAP_DEGREES).round() * ROTATION_SNAP_DEGREES;
    }
    angle.rem_euclid(360.0)
}
