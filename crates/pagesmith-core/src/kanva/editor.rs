//! Editing session for a kanva design.

use super::design::{DEFAULT_PAGE_SIZE, KanvaDesign, KanvaPage};
use super::drag::{DragSession, ManipulationState};
use super::element::CanvasElement;
use super::transform::{HANDLE_HIT_TOLERANCE, HandleKind, hit_test_handles};
use crate::guides::Guide;
use crate::history::HistoryStack;
use crate::snap::{SnapBadge, SnapOutcome, SnapSettings};
use kurbo::Point;
use uuid::Uuid;

/// Offset applied to duplicated elements so the copy is visible.
const DUPLICATE_OFFSET: f64 = 20.0;

/// Owns a design plus its undo history, selection and in-flight drags.
///
/// History snapshots hold every page, so page operations undo too. Drags
/// update the page live on every tick and record one snapshot when they end.
#[derive(Debug, Clone)]
pub struct KanvaEditor {
    design: KanvaDesign,
    history: HistoryStack<Vec<KanvaPage>>,
    selection: Vec<Uuid>,
    drag: Option<DragSession>,
    manipulation: Option<ManipulationState>,
    pub snap: SnapSettings,
    active_guides: Vec<Guide>,
    badge: Option<SnapBadge>,
}

impl Default for KanvaEditor {
    fn default() -> Self {
        Self::new(KanvaDesign::default())
    }
}

impl KanvaEditor {
    pub fn new(design: KanvaDesign) -> Self {
        Self {
            history: HistoryStack::with_initial(design.pages.clone()),
            design,
            selection: Vec::new(),
            drag: None,
            manipulation: None,
            snap: SnapSettings::default(),
            active_guides: Vec::new(),
            badge: None,
        }
    }

    pub fn design(&self) -> &KanvaDesign {
        &self.design
    }

    /// Take the design out, e.g. for saving.
    pub fn into_design(self) -> KanvaDesign {
        self.design
    }

    pub fn page(&self) -> Option<&KanvaPage> {
        self.design.page()
    }

    pub fn selection(&self) -> &[Uuid] {
        &self.selection
    }

    /// Guides to draw for the current drag tick.
    pub fn active_guides(&self) -> &[Guide] {
        &self.active_guides
    }

    pub fn badge(&self) -> Option<&SnapBadge> {
        self.badge.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some() || self.manipulation.is_some()
    }

    fn commit(&mut self) {
        self.history.push(self.design.pages.clone());
        self.design.touch();
    }

    /// Run `f` on the current page and record history if it reports a change.
    ///
    /// An in-flight drag is cancelled first so half-dragged positions never
    /// reach history.
    fn edit_page<R>(&mut self, f: impl FnOnce(&mut KanvaPage) -> Option<R>) -> Option<R> {
        self.cancel_drag();
        let result = f(self.design.page_mut()?)?;
        self.commit();
        Some(result)
    }

    // Selection

    /// Select an element, or its whole group.
    pub fn select(&mut self, id: Uuid) -> bool {
        let Some(members) = self.page().map(|p| p.group_members(id)) else {
            return false;
        };
        if members.is_empty() {
            return false;
        }
        self.selection = members;
        true
    }

    /// Add an element (and its group) to the selection.
    pub fn add_to_selection(&mut self, id: Uuid) -> bool {
        let Some(members) = self.page().map(|p| p.group_members(id)) else {
            return false;
        };
        if members.is_empty() {
            return false;
        }
        for member in members {
            if !self.selection.contains(&member) {
                self.selection.push(member);
            }
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection = self.page().map(|p| p.z_order()).unwrap_or_default();
    }

    /// Select the topmost visible element under `point`, or clear the
    /// selection when nothing is there.
    pub fn select_at(&mut self, point: Point) -> Option<Uuid> {
        let hit = self.page().and_then(|p| p.elements_at(point).first().copied());
        match hit {
            Some(id) => {
                self.select(id);
            }
            None => self.clear_selection(),
        }
        hit
    }

    // Elements

    /// Add an element on top and select it.
    pub fn add_element(&mut self, element: CanvasElement) -> Option<Uuid> {
        let id = self.edit_page(|page| Some(page.add_element(element)))?;
        self.selection = vec![id];
        Some(id)
    }

    /// Change one element in place. `f` runs on a copy; nothing is recorded
    /// if the copy comes back unchanged.
    pub fn update_element(&mut self, id: Uuid, f: impl FnOnce(&mut CanvasElement)) -> bool {
        self.edit_page(|page| {
            let element = page.element_mut(id)?;
            let mut updated = element.clone();
            f(&mut updated);
            updated.id = id;
            if updated == *element {
                return None;
            }
            *element = updated;
            Some(())
        })
        .is_some()
    }

    pub fn set_visible(&mut self, id: Uuid, visible: bool) -> bool {
        self.update_element(id, |e| e.visible = visible)
    }

    /// Opacity is clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, id: Uuid, opacity: f64) -> bool {
        self.update_element(id, |e| e.opacity = opacity.clamp(0.0, 1.0))
    }

    pub fn set_locked(&mut self, id: Uuid, locked: bool) -> bool {
        self.update_element(id, |e| e.locked = locked)
    }

    pub fn delete_selected(&mut self) -> bool {
        let ids = std::mem::take(&mut self.selection);
        self.edit_page(|page| {
            let removed = ids.iter().filter(|id| page.remove_element(**id).is_some()).count();
            (removed > 0).then_some(())
        })
        .is_some()
    }

    /// Duplicate the selection, offset slightly, and select the copies.
    pub fn duplicate_selected(&mut self) -> Vec<Uuid> {
        let ids = self.selection.clone();
        let copies = self
            .edit_page(|page| {
                let originals: Vec<CanvasElement> = page
                    .ordered()
                    .into_iter()
                    .filter(|e| ids.contains(&e.id))
                    .cloned()
                    .collect();
                if originals.is_empty() {
                    return None;
                }
                Some(
                    originals
                        .iter()
                        .map(|e| page.add_element(e.duplicate(DUPLICATE_OFFSET, DUPLICATE_OFFSET)))
                        .collect::<Vec<_>>(),
                )
            })
            .unwrap_or_default();
        if !copies.is_empty() {
            self.selection = copies.clone();
        }
        copies
    }

    // Layers

    pub fn bring_to_front(&mut self) -> bool {
        let ids = self.selection.clone();
        self.edit_page(|page| page.bring_to_front(&ids).then_some(())).is_some()
    }

    pub fn send_to_back(&mut self) -> bool {
        let ids = self.selection.clone();
        self.edit_page(|page| page.send_to_back(&ids).then_some(())).is_some()
    }

    pub fn bring_forward(&mut self) -> bool {
        let ids = self.selection.clone();
        self.edit_page(|page| page.bring_forward(&ids).then_some(())).is_some()
    }

    pub fn send_backward(&mut self) -> bool {
        let ids = self.selection.clone();
        self.edit_page(|page| page.send_backward(&ids).then_some(())).is_some()
    }

    /// Group the selection. Needs at least two elements.
    pub fn group_selected(&mut self) -> Option<Uuid> {
        let ids = self.selection.clone();
        self.edit_page(|page| page.group(&ids))
    }

    /// Dissolve every group touched by the selection.
    pub fn ungroup_selected(&mut self) -> Vec<Uuid> {
        let ids = self.selection.clone();
        self.edit_page(|page| {
            let mut groups: Vec<Uuid> = ids
                .iter()
                .filter_map(|id| page.element(*id).and_then(|e| e.group_id))
                .collect();
            groups.sort();
            groups.dedup();
            let freed: Vec<Uuid> = groups.into_iter().flat_map(|g| page.ungroup(g)).collect();
            (!freed.is_empty()).then_some(freed)
        })
        .unwrap_or_default()
    }

    // Pages

    pub fn current_page_index(&self) -> usize {
        self.design.current_page
    }

    /// Append a blank page of the same size and switch to it.
    pub fn add_page(&mut self) -> Uuid {
        self.cancel_drag();
        let size = self.page().map(|p| p.size()).unwrap_or(DEFAULT_PAGE_SIZE);
        let page = KanvaPage::new(format!("Page {}", self.design.pages.len() + 1), size);
        let id = page.id;
        self.design.pages.push(page);
        self.design.current_page = self.design.pages.len() - 1;
        self.selection.clear();
        self.commit();
        id
    }

    /// Delete a page. The last page cannot be deleted.
    pub fn delete_page(&mut self, index: usize) -> bool {
        if self.design.pages.len() <= 1 || index >= self.design.pages.len() {
            log::debug!("Refusing to delete page {}", index);
            return false;
        }
        self.cancel_drag();
        self.design.pages.remove(index);
        if self.design.current_page >= index && self.design.current_page > 0 {
            self.design.current_page -= 1;
        }
        self.selection.clear();
        self.commit();
        true
    }

    /// Insert a copy of a page right after it and switch to the copy.
    pub fn duplicate_page(&mut self, index: usize) -> Option<Uuid> {
        let copy = self.design.pages.get(index)?.duplicate();
        self.cancel_drag();
        let id = copy.id;
        self.design.pages.insert(index + 1, copy);
        self.design.current_page = index + 1;
        self.selection.clear();
        self.commit();
        Some(id)
    }

    /// Switch pages. Not an undoable change.
    pub fn switch_page(&mut self, index: usize) -> bool {
        if index >= self.design.pages.len() {
            return false;
        }
        self.cancel_drag();
        self.design.current_page = index;
        self.selection.clear();
        true
    }

    // Dragging

    /// Start moving the selection. Returns false if nothing movable is
    /// selected.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        let Some(page) = self.page() else {
            return false;
        };
        self.drag = DragSession::begin(page, &self.selection, point);
        self.drag.is_some()
    }

    /// Move the pointer. The returned outcome describes the guides to draw.
    pub fn drag_to(&mut self, point: Point) -> SnapOutcome {
        let settings = self.snap;
        let (Some(drag), Some(page)) = (self.drag.as_mut(), self.design.page_mut()) else {
            return SnapOutcome::default();
        };
        let outcome = drag.update(page, point, settings);
        self.active_guides = outcome.active_guides.clone();
        self.badge = outcome.badge.clone();
        outcome
    }

    /// Finish the drag. Records one history entry if anything moved.
    pub fn end_drag(&mut self) -> bool {
        self.active_guides.clear();
        self.badge = None;
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if !drag.has_moved() {
            return false;
        }
        self.commit();
        true
    }

    /// Abort a move or handle drag and restore the elements.
    pub fn cancel_drag(&mut self) {
        self.active_guides.clear();
        self.badge = None;
        if let (Some(drag), Some(page)) = (self.drag.take(), self.design.page_mut()) {
            drag.cancel(page);
        }
        if let Some(state) = self.manipulation.take() {
            if let Some(element) = self.design.page_mut().and_then(|p| p.element_mut(state.element_id)) {
                *element = state.original;
            }
        }
    }

    /// Handle under `point` for the single selected element, if any.
    pub fn handle_at(&self, point: Point) -> Option<HandleKind> {
        let [id] = self.selection.as_slice() else {
            return None;
        };
        let element = self.page()?.element(*id)?;
        let resizable = !(element.is_text() && element.width.is_none());
        hit_test_handles(&element.frame(), element.rotation, resizable, point, HANDLE_HIT_TOLERANCE)
    }

    /// Start a resize or rotation drag on the single selected element.
    pub fn begin_handle(&mut self, handle: HandleKind, point: Point) -> bool {
        let [id] = self.selection.as_slice() else {
            return false;
        };
        let Some(element) = self.page().and_then(|p| p.element(*id)) else {
            return false;
        };
        if element.locked {
            return false;
        }
        self.manipulation = Some(ManipulationState::new(element, handle, point));
        true
    }

    /// Update a handle drag.
    pub fn handle_to(&mut self, point: Point, keep_aspect_ratio: bool, snap_rotation: bool) -> bool {
        let Some(state) = self.manipulation.as_mut() else {
            return false;
        };
        let preview = state.preview(point, keep_aspect_ratio, snap_rotation);
        match self.design.page_mut().and_then(|p| p.element_mut(preview.id)) {
            Some(element) => {
                *element = preview;
                true
            }
            None => false,
        }
    }

    /// Finish a handle drag. Records one history entry if the element changed.
    pub fn end_handle(&mut self) -> bool {
        let Some(state) = self.manipulation.take() else {
            return false;
        };
        let changed = self
            .page()
            .and_then(|p| p.element(state.element_id))
            .is_some_and(|e| *e != state.original);
        if changed {
            self.commit();
        }
        changed
    }

    // History

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_drag();
        let Some(pages) = self.history.undo() else {
            return false;
        };
        self.design.pages = pages.clone();
        self.restore();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_drag();
        let Some(pages) = self.history.redo() else {
            return false;
        };
        self.design.pages = pages.clone();
        self.restore();
        true
    }

    fn restore(&mut self) {
        self.design.current_page = self.design.current_page.min(self.design.pages.len().saturating_sub(1));
        self.selection.clear();
        self.design.touch();
    }
}
