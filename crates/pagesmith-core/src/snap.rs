//! Snap resolution for elements dragged on the kanva canvas.
//!
//! Each axis is resolved independently: the moving element offers three
//! anchors per axis (center and both edges), every guide on that axis within
//! the threshold is a match, and the single nearest match wins.

use crate::geometry::{Bounds, CanvasSize};
use crate::guides::{Guide, GuideAxis, GuideTarget, build_guides};
use uuid::Uuid;

/// Default snap distance in canvas pixels.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 8.0;

/// User-facing snap configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    /// Whether snapping is applied at all.
    pub enabled: bool,
    /// Maximum distance (inclusive) at which an anchor is pulled onto a guide.
    pub threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

/// Which part of the moving element matched a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapAnchor {
    Left,
    CenterX,
    Right,
    Top,
    CenterY,
    Bottom,
}

impl SnapAnchor {
    /// Anchors for an axis in tie-break priority order: center, start, end.
    const VERTICAL: [SnapAnchor; 3] = [SnapAnchor::CenterX, SnapAnchor::Left, SnapAnchor::Right];
    const HORIZONTAL: [SnapAnchor; 3] = [SnapAnchor::CenterY, SnapAnchor::Top, SnapAnchor::Bottom];

    pub fn label(self) -> &'static str {
        match self {
            SnapAnchor::Left => "left",
            SnapAnchor::CenterX => "centerX",
            SnapAnchor::Right => "right",
            SnapAnchor::Top => "top",
            SnapAnchor::CenterY => "centerY",
            SnapAnchor::Bottom => "bottom",
        }
    }

    fn position(self, b: &Bounds) -> f64 {
        match self {
            SnapAnchor::Left => b.left,
            SnapAnchor::CenterX => b.center_x,
            SnapAnchor::Right => b.right,
            SnapAnchor::Top => b.top,
            SnapAnchor::CenterY => b.center_y,
            SnapAnchor::Bottom => b.bottom,
        }
    }
}

/// On-canvas feedback for a snap.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapBadge {
    /// Winning anchor names, joined with `+` (vertical axis first).
    pub label: String,
    /// Position of the winning vertical guide, if that axis snapped.
    pub x: Option<f64>,
    /// Position of the winning horizontal guide, if that axis snapped.
    pub y: Option<f64>,
}

/// Result of resolving one drag tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapOutcome {
    /// Horizontal correction to add to the element's x.
    pub dx: f64,
    /// Vertical correction to add to the element's y.
    pub dy: f64,
    /// Zero, one or two guides (at most one per axis) to render.
    pub active_guides: Vec<Guide>,
    pub badge: Option<SnapBadge>,
}

impl SnapOutcome {
    /// Check if any axis snapped.
    pub fn is_snapped(&self) -> bool {
        !self.active_guides.is_empty()
    }

    /// Apply the correction to a set of bounds.
    pub fn apply(&self, bounds: &Bounds) -> Bounds {
        bounds.translate(self.dx, self.dy)
    }
}

/// Best match on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisMatch<'a> {
    anchor: SnapAnchor,
    guide: &'a Guide,
    /// Signed distance `anchor - guide`.
    delta: f64,
}

/// Find the nearest guide on one axis.
///
/// Only a strictly smaller distance replaces the current best, so on exact
/// ties the center anchor beats the edges and earlier guides (canvas before
/// elements) beat later ones.
fn resolve_axis<'a>(
    guides: &'a [Guide],
    axis: GuideAxis,
    anchors: &[SnapAnchor; 3],
    moving: &Bounds,
    threshold: f64,
) -> Option<AxisMatch<'a>> {
    let mut best: Option<AxisMatch<'a>> = None;
    for &anchor in anchors {
        let pos = anchor.position(moving);
        for guide in guides.iter().filter(|g| g.axis == axis) {
            let delta = pos - guide.pos;
            if delta.abs() > threshold {
                continue;
            }
            if best.is_none_or(|b| delta.abs() < b.delta.abs()) {
                best = Some(AxisMatch { anchor, guide, delta });
            }
        }
    }
    best
}

/// Resolve snapping against a prebuilt guide set.
pub fn snap_to_guides(guides: &[Guide], moving: &Bounds, threshold: f64) -> SnapOutcome {
    let vertical = resolve_axis(guides, GuideAxis::Vertical, &SnapAnchor::VERTICAL, moving, threshold);
    let horizontal = resolve_axis(guides, GuideAxis::Horizontal, &SnapAnchor::HORIZONTAL, moving, threshold);

    let mut outcome = SnapOutcome::default();
    let mut labels = Vec::with_capacity(2);
    let mut badge_x = None;
    let mut badge_y = None;

    if let Some(m) = vertical {
        outcome.dx = -m.delta;
        outcome.active_guides.push(m.guide.clone());
        labels.push(m.anchor.label());
        badge_x = Some(m.guide.pos);
    }
    if let Some(m) = horizontal {
        outcome.dy = -m.delta;
        outcome.active_guides.push(m.guide.clone());
        labels.push(m.anchor.label());
        badge_y = Some(m.guide.pos);
    }
    if !labels.is_empty() {
        outcome.badge = Some(SnapBadge {
            label: labels.join("+"),
            x: badge_x,
            y: badge_y,
        });
    }
    outcome
}

/// Compute the snap correction for an element being dragged.
///
/// `moving` must already be in canvas coordinates. Elements in `exclude`
/// (normally the moving selection) do not produce guides.
pub fn compute_snap<T: GuideTarget>(
    canvas: CanvasSize,
    elements: &[T],
    moving: &Bounds,
    exclude: &[Uuid],
    threshold: f64,
) -> SnapOutcome {
    let guides = build_guides(canvas, elements, exclude);
    snap_to_guides(&guides, moving, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::bounds;
    use crate::guides::GuideSource;

    const CANVAS: CanvasSize = CanvasSize::new(1080.0, 1080.0);

    fn no_elements() -> Vec<(Uuid, Bounds)> {
        Vec::new()
    }

    #[test]
    fn test_snap_to_canvas_center() {
        // Center-x at 536, four pixels left of the canvas center.
        let moving = bounds(511.0, 100.0, 50.0, 50.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);

        assert_eq!(outcome.dx, 4.0);
        assert_eq!(outcome.dy, 0.0);
        assert_eq!(outcome.active_guides.len(), 1);
        let badge = outcome.badge.expect("badge");
        assert!(badge.label.contains("centerX"));
        assert_eq!(badge.x, Some(540.0));
        assert_eq!(badge.y, None);
    }

    #[test]
    fn test_already_aligned_needs_no_correction() {
        let moving = bounds(515.0, 300.0, 50.0, 50.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);
        assert_eq!(outcome.dx, 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // Left edge exactly 8px right of the safe-zone guide at 40.
        let moving = bounds(48.0, 300.0, 10.0, 10.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);
        assert_eq!(outcome.dx, -8.0);

        let moving = bounds(48.5, 300.0, 10.0, 10.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);
        assert_eq!(outcome.dx, 0.0);
        assert!(outcome.badge.is_none());
    }

    #[test]
    fn test_nearest_guide_wins() {
        let near = Uuid::new_v4();
        let far = Uuid::new_v4();
        // Moving left edge at 300: `far` right edge at 295 (5px), `near` left edge at 303 (3px).
        let elements = vec![
            (far, bounds(245.0, 600.0, 50.0, 50.0)),
            (near, bounds(303.0, 800.0, 50.0, 50.0)),
        ];
        let moving = bounds(300.0, 300.0, 120.0, 20.0);
        let outcome = compute_snap(CANVAS, &elements, &moving, &[], 8.0);

        assert_eq!(outcome.dx, 3.0);
        assert_eq!(outcome.active_guides[0].source, GuideSource::Element(near));
    }

    #[test]
    fn test_nearest_across_anchors() {
        // Right edge is 2px from the canvas center, left edge 6px from the safe zone.
        let moving = bounds(46.0, 300.0, 492.0, 20.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);
        assert_eq!(outcome.dx, 2.0);
        assert_eq!(outcome.badge.map(|b| b.label), Some("right".to_string()));
    }

    #[test]
    fn test_both_axes_snap() {
        let moving = bounds(37.0, 1035.0 - 20.0, 100.0, 20.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);

        assert_eq!(outcome.dx, 3.0);
        assert_eq!(outcome.dy, 5.0);
        assert_eq!(outcome.active_guides.len(), 2);
        let badge = outcome.badge.expect("badge");
        assert_eq!(badge.label, "left+bottom");
        assert_eq!(badge.x, Some(40.0));
        assert_eq!(badge.y, Some(1040.0));
    }

    #[test]
    fn test_no_snap_when_far() {
        let moving = bounds(200.0, 200.0, 10.0, 10.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);
        assert_eq!(outcome, SnapOutcome::default());
        assert!(!outcome.is_snapped());
    }

    #[test]
    fn test_equidistant_tie_prefers_center() {
        // Center-x 4px right of 540 and left edge 4px right of another element's edge.
        let other = Uuid::new_v4();
        let elements = vec![(other, bounds(480.0, 900.0, 20.0, 20.0))];
        let moving = bounds(504.0, 300.0, 80.0, 20.0);
        let outcome = compute_snap(CANVAS, &elements, &moving, &[], 8.0);

        assert_eq!(outcome.dx, -4.0);
        assert_eq!(outcome.badge.map(|b| b.label), Some("centerX".to_string()));
        assert_eq!(outcome.active_guides[0].source, GuideSource::Canvas);
    }

    #[test]
    fn test_moving_element_is_excluded() {
        let id = Uuid::new_v4();
        let start = bounds(200.0, 200.0, 50.0, 50.0);
        let elements = vec![(id, start)];
        let moving = start.translate(3.0, 3.0);
        let outcome = compute_snap(CANVAS, &elements, &moving, &[id], 8.0);
        assert!(!outcome.is_snapped());
    }

    #[test]
    fn test_apply_moves_onto_guide() {
        let moving = bounds(511.0, 100.0, 50.0, 50.0);
        let outcome = compute_snap(CANVAS, &no_elements(), &moving, &[], 8.0);
        assert_eq!(outcome.apply(&moving).center_x, 540.0);
    }
}
