//! Pointer-driven move and handle sessions.
//!
//! A session remembers the state at pointer-down so every tick is computed
//! from the original positions, never accumulated.

use super::design::KanvaPage;
use super::element::CanvasElement;
use super::transform::{HandleKind, resize, rotation_towards};
use crate::geometry::Bounds;
use crate::snap::{SnapOutcome, SnapSettings, compute_snap};
use kurbo::{Point, Vec2};
use std::collections::HashMap;
use uuid::Uuid;

/// State for moving one or more elements at once.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub start_point: Point,
    pub current_point: Point,
    /// Top-left corner of each moving element at pointer-down.
    origins: HashMap<Uuid, Point>,
    /// Union of the moving frames at pointer-down.
    start_bounds: Bounds,
    /// Snap-corrected translation of the last tick.
    offset: Vec2,
}

impl DragSession {
    /// Start dragging `ids` on `page`. Locked and unknown elements are skipped.
    pub fn begin(page: &KanvaPage, ids: &[Uuid], start_point: Point) -> Option<Self> {
        let origins: HashMap<Uuid, Point> = page
            .elements
            .iter()
            .filter(|e| ids.contains(&e.id) && !e.locked)
            .map(|e| (e.id, Point::new(e.x, e.y)))
            .collect();
        if origins.is_empty() {
            return None;
        }
        let moving: Vec<Uuid> = origins.keys().copied().collect();
        let start_bounds = page.selection_bounds(&moving)?;
        Some(Self {
            start_point,
            current_point: start_point,
            origins,
            start_bounds,
            offset: Vec2::ZERO,
        })
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.origins.keys().copied().collect()
    }

    /// Raw pointer delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Translation actually applied, including the snap correction.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn has_moved(&self) -> bool {
        self.offset != Vec2::ZERO
    }

    /// Move the pointer and reposition the elements on `page`.
    ///
    /// The moving elements are excluded from the guide set so nothing snaps
    /// to itself. Hidden elements do not produce guides.
    pub fn update(&mut self, page: &mut KanvaPage, point: Point, settings: SnapSettings) -> SnapOutcome {
        self.current_point = point;
        let delta = self.delta();
        let moved = self.start_bounds.translate(delta.x, delta.y);

        let outcome = if settings.enabled {
            let targets: Vec<(Uuid, Bounds)> = page
                .elements
                .iter()
                .filter(|e| e.visible)
                .map(|e| (e.id, e.frame()))
                .collect();
            compute_snap(page.size(), &targets, &moved, &self.ids(), settings.threshold)
        } else {
            SnapOutcome::default()
        };

        self.offset = delta + Vec2::new(outcome.dx, outcome.dy);
        for (id, origin) in &self.origins {
            if let Some(element) = page.element_mut(*id) {
                element.x = origin.x + self.offset.x;
                element.y = origin.y + self.offset.y;
            }
        }
        outcome
    }

    /// Put every element back where it started.
    pub fn cancel(&self, page: &mut KanvaPage) {
        for (id, origin) in &self.origins {
            if let Some(element) = page.element_mut(*id) {
                element.x = origin.x;
                element.y = origin.y;
            }
        }
    }
}

/// State of a resize or rotate drag on a single element.
#[derive(Debug, Clone)]
pub struct ManipulationState {
    pub element_id: Uuid,
    pub handle: HandleKind,
    pub start_point: Point,
    pub current_point: Point,
    /// Element at pointer-down.
    pub original: CanvasElement,
}

impl ManipulationState {
    pub fn new(element: &CanvasElement, handle: HandleKind, start_point: Point) -> Self {
        Self {
            element_id: element.id,
            handle,
            start_point,
            current_point: start_point,
            original: element.clone(),
        }
    }

    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// The element as it looks with the pointer at `point`.
    ///
    /// `keep_aspect_ratio` applies to corner handles, `snap_rotation` to the
    /// rotation handle.
    pub fn preview(&mut self, point: Point, keep_aspect_ratio: bool, snap_rotation: bool) -> CanvasElement {
        self.current_point = point;
        let mut element = self.original.clone();
        match self.handle {
            HandleKind::Rotate => {
                let frame = self.original.frame();
                let center = Point::new(frame.center_x, frame.center_y);
                element.rotation = rotation_towards(center, point, snap_rotation);
            }
            handle => {
                let frame = resize(&self.original.frame(), handle, self.delta(), keep_aspect_ratio);
                element.x = frame.left;
                element.y = frame.top;
                element.width = Some(frame.width);
                element.height = Some(frame.height);
            }
        }
        element
    }
}
