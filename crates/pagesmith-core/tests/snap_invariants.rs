//! Property tests for guide snapping and the history stack.
//!
//! Coordinates are whole pixels and sizes are whole or half pixels, so every
//! edge and center is exactly representable and comparisons can be exact.

use pagesmith_core::guides::{GuideAxis, build_guides};
use pagesmith_core::{Bounds, CanvasSize, HistoryStack, MAX_HISTORY, bounds, compute_snap};
use proptest::prelude::*;
use uuid::Uuid;

const CANVAS: CanvasSize = CanvasSize::new(1080.0, 1080.0);
const THRESHOLD: f64 = 8.0;

fn frame() -> impl Strategy<Value = Bounds> {
    (-200i32..1200, -200i32..1200, 1i32..400, 1i32..400)
        .prop_map(|(x, y, w, h)| bounds(x as f64, y as f64, w as f64, h as f64))
}

fn others() -> impl Strategy<Value = Vec<(Uuid, Bounds)>> {
    prop::collection::vec(frame(), 0..6)
        .prop_map(|frames| frames.into_iter().map(|b| (Uuid::new_v4(), b)).collect())
}

/// Smallest anchor-to-guide distance on the vertical axis within the threshold.
fn nearest_vertical(elements: &[(Uuid, Bounds)], moving: &Bounds) -> Option<f64> {
    build_guides(CANVAS, elements, &[])
        .iter()
        .filter(|g| g.axis == GuideAxis::Vertical)
        .flat_map(|g| {
            [moving.left, moving.center_x, moving.right].map(|pos| (pos - g.pos).abs())
        })
        .filter(|d| *d <= THRESHOLD)
        .min_by(f64::total_cmp)
}

proptest! {
    #[test]
    fn snapping_twice_changes_nothing(elements in others(), moving in frame()) {
        let first = compute_snap(CANVAS, &elements, &moving, &[], THRESHOLD);
        let snapped = first.apply(&moving);
        let second = compute_snap(CANVAS, &elements, &snapped, &[], THRESHOLD);

        prop_assert_eq!(second.dx, 0.0);
        prop_assert_eq!(second.dy, 0.0);
        prop_assert_eq!(second.active_guides.len(), first.active_guides.len());
    }

    #[test]
    fn correction_never_exceeds_threshold(elements in others(), moving in frame()) {
        let outcome = compute_snap(CANVAS, &elements, &moving, &[], THRESHOLD);

        prop_assert!(outcome.dx.abs() <= THRESHOLD);
        prop_assert!(outcome.dy.abs() <= THRESHOLD);
        prop_assert!(outcome.active_guides.len() <= 2);
        prop_assert_eq!(outcome.badge.is_some(), outcome.is_snapped());
    }

    #[test]
    fn nearest_guide_wins(elements in others(), moving in frame()) {
        let outcome = compute_snap(CANVAS, &elements, &moving, &[], THRESHOLD);
        let vertical = outcome.active_guides.iter().find(|g| g.axis == GuideAxis::Vertical);

        match nearest_vertical(&elements, &moving) {
            Some(distance) => {
                prop_assert_eq!(outcome.dx.abs(), distance);
                prop_assert!(vertical.is_some());
            }
            None => {
                prop_assert_eq!(outcome.dx, 0.0);
                prop_assert!(vertical.is_none());
            }
        }
    }

    #[test]
    fn moving_elements_never_snap_to_themselves(moving in frame()) {
        let id = Uuid::new_v4();
        let elements = vec![(id, moving)];
        let outcome = compute_snap(CANVAS, &elements, &moving, &[id], THRESHOLD);
        let alone = compute_snap::<(Uuid, Bounds)>(CANVAS, &[], &moving, &[], THRESHOLD);

        prop_assert_eq!(outcome, alone);
    }

    #[test]
    fn history_keeps_newest_snapshots(pushes in 1usize..120) {
        let mut history = HistoryStack::new();
        for i in 0..pushes {
            history.push(i);
        }

        let kept = pushes.min(MAX_HISTORY);
        prop_assert_eq!(history.len(), kept);
        prop_assert_eq!(history.index(), kept - 1);
        prop_assert_eq!(history.current(), Some(&(pushes - 1)));
        prop_assert_eq!(history.iter().next(), Some(&(pushes - kept)));
    }
}

#[test]
fn drag_near_canvas_center_snaps_with_badge() {
    // 50px square whose center sits four pixels left of the canvas center.
    let moving = bounds(511.0, 300.0, 50.0, 50.0);
    let outcome = compute_snap::<(Uuid, Bounds)>(CANVAS, &[], &moving, &[], THRESHOLD);

    assert_eq!(outcome.dx, 4.0);
    assert_eq!(outcome.apply(&moving).center_x, 540.0);
    let badge = outcome.badge.expect("snap badge");
    assert_eq!(badge.label, "centerX");
    assert_eq!(badge.x, Some(540.0));
}

#[test]
fn zero_threshold_only_catches_exact_hits() {
    let moving = bounds(41.0, 41.0, 10.0, 10.0);
    let outcome = compute_snap::<(Uuid, Bounds)>(CANVAS, &[], &moving, &[], 0.0);
    assert!(!outcome.is_snapped());

    let aligned = bounds(40.0, 41.0, 10.0, 10.0);
    let outcome = compute_snap::<(Uuid, Bounds)>(CANVAS, &[], &aligned, &[], 0.0);
    assert_eq!(outcome.active_guides.len(), 1);
    assert_eq!(outcome.dx, 0.0);
}
