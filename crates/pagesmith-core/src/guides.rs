//! Alignment guide generation for the kanva canvas.
//!
//! Guides are recomputed on every drag tick and never persisted. The canvas
//! always contributes ten guides (centers, edges, safe zone); every other
//! element contributes its edges and centers on both axes.

use crate::geometry::{Bounds, CanvasSize};
use uuid::Uuid;

/// Inset of the safe-zone guides from each canvas edge, in pixels.
pub const SAFE_ZONE_MARGIN: f64 = 40.0;

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideAxis {
    /// A vertical line at some x. Snaps left / center-x / right.
    Vertical,
    /// A horizontal line at some y. Snaps top / center-y / bottom.
    Horizontal,
}

/// Where a guide came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideSource {
    Canvas,
    Element(Uuid),
}

/// A transient alignment line.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub id: String,
    pub axis: GuideAxis,
    pub pos: f64,
    pub label: Option<&'static str>,
    pub source: GuideSource,
}

impl Guide {
    fn canvas(id: &str, axis: GuideAxis, pos: f64, label: &'static str) -> Self {
        Self {
            id: format!("canvas-{id}"),
            axis,
            pos,
            label: Some(label),
            source: GuideSource::Canvas,
        }
    }

    fn element(element: Uuid, axis: GuideAxis, pos: f64, label: &'static str) -> Self {
        Self {
            id: format!("{element}-{label}"),
            axis,
            pos,
            label: Some(label),
            source: GuideSource::Element(element),
        }
    }
}

/// Anything that occupies a frame on the canvas and can provide guides.
pub trait GuideTarget {
    fn guide_id(&self) -> Uuid;
    fn guide_bounds(&self) -> Bounds;
}

impl GuideTarget for (Uuid, Bounds) {
    fn guide_id(&self) -> Uuid {
        self.0
    }

    fn guide_bounds(&self) -> Bounds {
        self.1
    }
}

/// The ten guides contributed by the canvas itself.
pub fn canvas_guides(canvas: CanvasSize) -> Vec<Guide> {
    use GuideAxis::{Horizontal, Vertical};

    let (w, h, m) = (canvas.width, canvas.height, SAFE_ZONE_MARGIN);
    vec![
        Guide::canvas("center-x", Vertical, w / 2.0, "center"),
        Guide::canvas("center-y", Horizontal, h / 2.0, "middle"),
        Guide::canvas("left", Vertical, 0.0, "left edge"),
        Guide::canvas("right", Vertical, w, "right edge"),
        Guide::canvas("top", Horizontal, 0.0, "top edge"),
        Guide::canvas("bottom", Horizontal, h, "bottom edge"),
        Guide::canvas("safe-left", Vertical, m, "safe zone"),
        Guide::canvas("safe-right", Vertical, w - m, "safe zone"),
        Guide::canvas("safe-top", Horizontal, m, "safe zone"),
        Guide::canvas("safe-bottom", Horizontal, h - m, "safe zone"),
    ]
}

/// The six guides contributed by one element.
pub fn element_guides(id: Uuid, b: &Bounds) -> [Guide; 6] {
    use GuideAxis::{Horizontal, Vertical};

    [
        Guide::element(id, Vertical, b.left, "left"),
        Guide::element(id, Vertical, b.center_x, "centerX"),
        Guide::element(id, Vertical, b.right, "right"),
        Guide::element(id, Horizontal, b.top, "top"),
        Guide::element(id, Horizontal, b.center_y, "centerY"),
        Guide::element(id, Horizontal, b.bottom, "bottom"),
    ]
}

/// Build the full guide set for a drag tick.
///
/// Elements listed in `exclude` (normally the ones being moved) contribute
/// nothing, so an element never snaps to itself. Canvas guides come first;
/// positions shared by several sources are kept as distinct guides.
pub fn build_guides<T: GuideTarget>(canvas: CanvasSize, elements: &[T], exclude: &[Uuid]) -> Vec<Guide> {
    let mut guides = canvas_guides(canvas);
    guides.reserve(elements.len() * 6);
    for element in elements {
        let id = element.guide_id();
        if exclude.contains(&id) {
            continue;
        }
        guides.extend(element_guides(id, &element.guide_bounds()));
    }
    guides
}
