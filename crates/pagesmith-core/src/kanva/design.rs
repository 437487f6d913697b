//! Pages and multi-page designs.

use super::element::CanvasElement;
use crate::color::SerializableColor;
use crate::error::DocumentResult;
use crate::geometry::{Bounds, CanvasSize, bounds};
use chrono::{DateTime, Utc};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default page size (square social post).
pub const DEFAULT_PAGE_SIZE: CanvasSize = CanvasSize::new(1080.0, 1080.0);

/// One artboard of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanvaPage {
    pub id: Uuid,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background: SerializableColor,
    /// Stored in insertion order; paint order is `z_index`.
    #[serde(default)]
    pub elements: Vec<CanvasElement>,
}

impl KanvaPage {
    pub fn new(name: impl Into<String>, size: CanvasSize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width: size.width,
            height: size.height,
            background: SerializableColor::white(),
            elements: Vec::new(),
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn element(&self, id: Uuid) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: Uuid) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Add an element on top of everything else.
    pub fn add_element(&mut self, mut element: CanvasElement) -> Uuid {
        element.z_index = self.elements.iter().map(|e| e.z_index + 1).max().unwrap_or(0);
        let id = element.id;
        self.elements.push(element);
        id
    }

    pub fn remove_element(&mut self, id: Uuid) -> Option<CanvasElement> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Elements back to front.
    pub fn ordered(&self) -> Vec<&CanvasElement> {
        let mut ordered: Vec<&CanvasElement> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Ids back to front.
    pub fn z_order(&self) -> Vec<Uuid> {
        self.ordered().into_iter().map(|e| e.id).collect()
    }

    /// Rewrite `z_index` as `0..n` following `order`.
    fn apply_z_order(&mut self, order: &[Uuid]) {
        for (z, id) in order.iter().enumerate() {
            if let Some(element) = self.element_mut(*id) {
                element.z_index = z as i32;
            }
        }
    }

    /// Move `ids` to the top, keeping their relative order.
    pub fn bring_to_front(&mut self, ids: &[Uuid]) -> bool {
        let order = self.z_order();
        let (moving, mut rest): (Vec<Uuid>, Vec<Uuid>) = order.iter().partition(|id| ids.contains(*id));
        if moving.is_empty() {
            return false;
        }
        rest.extend(moving);
        let changed = rest != order;
        self.apply_z_order(&rest);
        changed
    }

    /// Move `ids` to the bottom, keeping their relative order.
    pub fn send_to_back(&mut self, ids: &[Uuid]) -> bool {
        let order = self.z_order();
        let (mut moving, rest): (Vec<Uuid>, Vec<Uuid>) = order.iter().partition(|id| ids.contains(*id));
        if moving.is_empty() {
            return false;
        }
        moving.extend(rest);
        let changed = moving != order;
        self.apply_z_order(&moving);
        changed
    }

    /// Move each of `ids` one layer up. Returns false if none could move.
    pub fn bring_forward(&mut self, ids: &[Uuid]) -> bool {
        let mut order = self.z_order();
        let mut moved = false;
        for i in (0..order.len().saturating_sub(1)).rev() {
            if ids.contains(&order[i]) && !ids.contains(&order[i + 1]) {
                order.swap(i, i + 1);
                moved = true;
            }
        }
        self.apply_z_order(&order);
        moved
    }

    /// Move each of `ids` one layer down. Returns false if none could move.
    pub fn send_backward(&mut self, ids: &[Uuid]) -> bool {
        let mut order = self.z_order();
        let mut moved = false;
        for i in 1..order.len() {
            if ids.contains(&order[i]) && !ids.contains(&order[i - 1]) {
                order.swap(i, i - 1);
                moved = true;
            }
        }
        self.apply_z_order(&order);
        moved
    }

    /// Tag the elements with a shared group id. Needs at least two elements.
    pub fn group(&mut self, ids: &[Uuid]) -> Option<Uuid> {
        let members: Vec<Uuid> = ids.iter().copied().filter(|id| self.element(*id).is_some()).collect();
        if members.len() < 2 {
            return None;
        }
        let group = Uuid::new_v4();
        for id in members {
            if let Some(element) = self.element_mut(id) {
                element.group_id = Some(group);
            }
        }
        Some(group)
    }

    /// Dissolve a group and return its former members.
    pub fn ungroup(&mut self, group: Uuid) -> Vec<Uuid> {
        let mut members = Vec::new();
        for element in self.elements.iter_mut().filter(|e| e.group_id == Some(group)) {
            element.group_id = None;
            members.push(element.id);
        }
        members
    }

    /// The element plus every element sharing its group.
    pub fn group_members(&self, id: Uuid) -> Vec<Uuid> {
        match self.element(id).and_then(|e| e.group_id) {
            Some(group) => self
                .elements
                .iter()
                .filter(|e| e.group_id == Some(group))
                .map(|e| e.id)
                .collect(),
            None if self.element(id).is_some() => vec![id],
            None => Vec::new(),
        }
    }

    /// Visible elements under `point`, topmost first.
    pub fn elements_at(&self, point: Point) -> Vec<Uuid> {
        let mut hits: Vec<&CanvasElement> = self
            .elements
            .iter()
            .filter(|e| e.visible && e.contains(point))
            .collect();
        hits.sort_by_key(|e| std::cmp::Reverse(e.z_index));
        hits.into_iter().map(|e| e.id).collect()
    }

    /// Union of the frames of `ids`.
    pub fn selection_bounds(&self, ids: &[Uuid]) -> Option<Bounds> {
        let rect = self
            .elements
            .iter()
            .filter(|e| ids.contains(&e.id))
            .map(|e| e.frame().to_rect())
            .reduce(|a, b| a.union(b))?;
        Some(bounds(rect.x0, rect.y0, rect.width(), rect.height()))
    }

    /// Deep copy with fresh page and element ids. Groups stay intact.
    pub fn duplicate(&self) -> Self {
        let mut group_map = std::collections::HashMap::new();
        let elements = self
            .elements
            .iter()
            .map(|e| {
                let mut copy = e.duplicate(0.0, 0.0);
                copy.group_id = e.group_id.map(|g| *group_map.entry(g).or_insert_with(Uuid::new_v4));
                copy
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            name: format!("{} (Copy)", self.name),
            elements,
            ..self.clone()
        }
    }
}

/// A named set of pages, one of which is being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanvaDesign {
    pub id: Uuid,
    pub name: String,
    pub pages: Vec<KanvaPage>,
    pub current_page: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KanvaDesign {
    /// A design with one blank page.
    pub fn new(name: impl Into<String>, size: CanvasSize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pages: vec![KanvaPage::new("Page 1", size)],
            current_page: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// The page being edited. Falls back to the first page if the index is
    /// stale.
    pub fn page(&self) -> Option<&KanvaPage> {
        self.pages.get(self.current_page).or(self.pages.first())
    }

    pub fn page_mut(&mut self) -> Option<&mut KanvaPage> {
        let index = self.current_page.min(self.pages.len().saturating_sub(1));
        self.pages.get_mut(index)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let mut design: Self = serde_json::from_str(json)?;
        if design.pages.is_empty() {
            design.pages.push(KanvaPage::new("Page 1", DEFAULT_PAGE_SIZE));
        }
        design.current_page = design.current_page.min(design.pages.len() - 1);
        Ok(design)
    }
}

impl Default for KanvaDesign {
    fn default() -> Self {
        Self::new("Untitled design", DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kanva::ShapeKind;

    fn page_with(n: usize) -> (KanvaPage, Vec<Uuid>) {
        let mut page = KanvaPage::new("Page", DEFAULT_PAGE_SIZE);
        let ids = (0..n)
            .map(|i| page.add_element(CanvasElement::shape(ShapeKind::Rectangle, i as f64 * 10.0, 0.0, 50.0, 50.0)))
            .collect();
        (page, ids)
    }

    #[test]
    fn test_add_element_stacks_on_top() {
        let (page, ids) = page_with(3);
        assert_eq!(page.z_order(), ids);
        assert_eq!(page.element(ids[2]).map(|e| e.z_index), Some(2));
    }

    #[test]
    fn test_z_order_moves() {
        let (mut page, ids) = page_with(4);

        assert!(page.bring_to_front(&[ids[0]]));
        assert_eq!(page.z_order(), vec![ids[1], ids[2], ids[3], ids[0]]);
        assert!(!page.bring_to_front(&[ids[0]]));

        assert!(page.send_to_back(&[ids[0], ids[3]]));
        assert_eq!(page.z_order(), vec![ids[3], ids[0], ids[1], ids[2]]);

        assert!(page.bring_forward(&[ids[0]]));
        assert_eq!(page.z_order(), vec![ids[3], ids[1], ids[0], ids[2]]);

        assert!(!page.send_backward(&[ids[3]]));
        assert!(page.send_backward(&[ids[2]]));
        assert_eq!(page.z_order(), vec![ids[3], ids[1], ids[2], ids[0]]);

        let z: Vec<i32> = page.ordered().iter().map(|e| e.z_index).collect();
        assert_eq!(z, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_group_and_ungroup() {
        let (mut page, ids) = page_with(3);
        assert_eq!(page.group(&[ids[0]]), None);

        let group = page.group(&[ids[0], ids[2]]).unwrap();
        let mut members = page.group_members(ids[2]);
        members.sort();
        let mut expected = vec![ids[0], ids[2]];
        expected.sort();
        assert_eq!(members, expected);
        assert_eq!(page.group_members(ids[1]), vec![ids[1]]);

        assert_eq!(page.ungroup(group).len(), 2);
        assert_eq!(page.group_members(ids[0]), vec![ids[0]]);
    }

    #[test]
    fn test_elements_at_topmost_first() {
        let (mut page, ids) = page_with(2);
        let hits = page.elements_at(Point::new(20.0, 20.0));
        assert_eq!(hits, vec![ids[1], ids[0]]);

        page.element_mut(ids[1]).unwrap().visible = false;
        assert_eq!(page.elements_at(Point::new(20.0, 20.0)), vec![ids[0]]);
    }

    #[test]
    fn test_selection_bounds() {
        let (page, ids) = page_with(3);
        let union = page.selection_bounds(&ids).unwrap();
        assert_eq!(union, bounds(0.0, 0.0, 70.0, 50.0));
        assert_eq!(page.selection_bounds(&[]), None);
    }

    #[test]
    fn test_duplicate_page_remaps_groups() {
        let (mut page, ids) = page_with(2);
        let group = page.group(&ids).unwrap();
        let copy = page.duplicate();

        assert_ne!(copy.id, page.id);
        let copied_group = copy.elements[0].group_id.unwrap();
        assert_ne!(copied_group, group);
        assert_eq!(copy.elements[1].group_id, Some(copied_group));
        assert!(copy.elements.iter().all(|e| page.element(e.id).is_none()));
    }

    #[test]
    fn test_design_json_round_trip() {
        let mut design = KanvaDesign::default();
        design.page_mut().unwrap().add_element(CanvasElement::text("Sale", 40.0, 40.0));
        let json = design.to_json().unwrap();
        assert_eq!(KanvaDesign::from_json(&json).unwrap(), design);
    }
}
