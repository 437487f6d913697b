//! Editing session for one page: live tree, undo history, selection and
//! clipboard.

use super::element::{Element, ElementKind};
use super::funnel::Funnel;
use super::selection::SelectionModel;
use super::tree::{
    ColumnPath, ColumnPosition, MoveDirection, NodeKind, PageTree, Reduction, SectionConfig,
    TreeAction,
};
use super::NodeId;
use crate::error::{DocumentError, DocumentResult};
use crate::history::HistoryStack;
use serde_json::Value;

/// Owns the page being edited.
///
/// Every structural change goes through [`PageEditor::dispatch`], which runs
/// the reducer and records exactly one history snapshot when the tree
/// changed. Reads never touch history.
#[derive(Debug, Clone)]
pub struct PageEditor {
    tree: PageTree,
    history: HistoryStack<PageTree>,
    selection: SelectionModel,
    clipboard: Option<Element>,
    /// Funnel step the tree was opened from, if any.
    step: Option<NodeId>,
    /// Bumped on every change, including undo and redo.
    revision: u64,
}

impl Default for PageEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageEditor {
    /// Start editing an empty page.
    pub fn new() -> Self {
        Self::with_tree(PageTree::new())
    }

    /// Start editing an existing page. The tree becomes the oldest snapshot.
    pub fn with_tree(tree: PageTree) -> Self {
        Self {
            history: HistoryStack::with_initial(tree.clone()),
            tree,
            selection: SelectionModel::new(),
            clipboard: None,
            step: None,
            revision: 0,
        }
    }

    pub fn tree(&self) -> &PageTree {
        &self.tree
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    pub fn history(&self) -> &HistoryStack<PageTree> {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clipboard(&self) -> Option<&Element> {
        self.clipboard.as_ref()
    }

    /// Funnel step being edited, when the page came from [`PageEditor::open_step`].
    pub fn step(&self) -> Option<NodeId> {
        self.step
    }

    /// Replace the whole page and start a fresh history. The page is no
    /// longer tied to a funnel step.
    pub fn load(&mut self, tree: PageTree) {
        self.step = None;
        self.history.reset(tree.clone());
        self.tree = tree;
        self.selection = SelectionModel::new();
        self.revision += 1;
    }

    /// Write the page back into the funnel step it was opened from.
    ///
    /// Returns false when the page is not tied to a step of `funnel`.
    pub fn commit_to(&self, funnel: &mut Funnel) -> bool {
        self.step.is_some_and(|step| funnel.store_sections(step, &self.tree))
    }

    /// Load a funnel step into the editor.
    ///
    /// The step being left keeps every edit made to it.
    pub fn open_step(&mut self, funnel: &mut Funnel, step: NodeId) -> bool {
        if funnel.step(step).is_none() {
            log::debug!("Cannot open unknown funnel step {}", step);
            return false;
        }
        self.commit_to(funnel);
        funnel.set_current(step);
        let tree = funnel.current_step().map(|s| s.tree()).unwrap_or_default();
        self.load(tree);
        self.step = Some(step);
        true
    }

    /// Apply an action. Returns the id of a created node, if any, or `None`
    /// when nothing changed or nothing was created.
    ///
    /// Use [`PageEditor::revision`] to tell "changed" apart from "unchanged".
    pub fn dispatch(&mut self, action: TreeAction) -> Option<NodeId> {
        match self.tree.reduce(&action) {
            Reduction::Unchanged => None,
            Reduction::Changed { tree, created } => {
                self.commit(tree);
                created
            }
        }
    }

    fn commit(&mut self, tree: PageTree) {
        self.history.push(tree.clone());
        self.tree = tree;
        self.selection.prune(&self.tree);
        self.revision += 1;
    }

    // History

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one snapshot and clear the selection.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.tree = snapshot.clone();
        self.selection.clear();
        self.revision += 1;
        true
    }

    /// Step forward one snapshot and clear the selection.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.tree = snapshot.clone();
        self.selection.clear();
        self.revision += 1;
        true
    }

    // Convenience wrappers that also update the selection

    /// Add a section and select it.
    pub fn add_section(&mut self, config: SectionConfig) -> Option<NodeId> {
        let id = self.dispatch(TreeAction::AddSection(config))?;
        self.selection.select_section(&self.tree, id);
        Some(id)
    }

    /// Add a row of `columns` equal columns and select it.
    pub fn add_row(&mut self, section: NodeId, columns: usize) -> Option<NodeId> {
        let id = self.dispatch(TreeAction::AddRow { section, columns, widths: None })?;
        self.selection.select_row(&self.tree, id);
        Some(id)
    }

    pub fn add_column(&mut self, section: NodeId, row: NodeId, position: ColumnPosition) -> Option<NodeId> {
        self.dispatch(TreeAction::AddColumn { section, row, position })
    }

    /// Add an element with default props and select it.
    pub fn add_element(&mut self, path: ColumnPath, kind: ElementKind, index: Option<usize>) -> Option<NodeId> {
        let id = self.dispatch(TreeAction::AddElement { path, kind, index })?;
        self.selection.select_element(&self.tree, id);
        Some(id)
    }

    /// Merge a JSON object into an element's props.
    ///
    /// Returns `Ok(false)` for an unknown element. A patch that does not fit
    /// the element's kind is rejected and the tree is left unchanged.
    pub fn update_element(&mut self, element: NodeId, patch: &Value) -> DocumentResult<bool> {
        let Some(current) = self.tree.element(element) else {
            log::debug!("Cannot update unknown element {}", element);
            return Ok(false);
        };
        let props = current.content.merge_patch(patch).inspect_err(|e| {
            log::warn!("Rejected props patch for element {}: {}", element, e);
        })?;
        if props == current.content {
            return Ok(false);
        }
        let before = self.revision;
        self.dispatch(TreeAction::UpdateElement { element, props });
        Ok(self.revision != before)
    }

    /// Delete whatever is most deeply selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some((kind, id)) = self.selection.focused() else {
            return false;
        };
        let action = match kind {
            NodeKind::Element => TreeAction::DeleteElement { element: id },
            NodeKind::Column => {
                let Some((section, row)) = self.tree.column_owner(id) else {
                    return false;
                };
                TreeAction::DeleteColumn { section, row, column: id }
            }
            NodeKind::Row => {
                let Some(section) = self.tree.row_owner(id) else {
                    return false;
                };
                TreeAction::DeleteRow { section, row: id }
            }
            NodeKind::Section => TreeAction::DeleteSection { section: id },
        };
        let before = self.revision;
        self.dispatch(action);
        self.revision != before
    }

    // Clipboard

    /// Copy the selected element into the clipboard.
    pub fn copy(&mut self) -> bool {
        let Some(element) = self.selection.element().and_then(|id| self.tree.element(id)) else {
            return false;
        };
        self.clipboard = Some(element.clone());
        true
    }

    /// Copy then delete the selected element.
    pub fn cut(&mut self) -> bool {
        let Some(id) = self.selection.element() else {
            return false;
        };
        if !self.copy() {
            return false;
        }
        self.dispatch(TreeAction::DeleteElement { element: id });
        true
    }

    /// Paste a fresh copy of the clipboard at the end of the selected column.
    pub fn paste(&mut self) -> Option<NodeId> {
        let element = self.clipboard.as_ref()?.duplicate();
        let column = self.selection.column()?;
        let (section, row) = self.tree.column_owner(column)?;
        let path = ColumnPath { section, row, column };
        let id = self.dispatch(TreeAction::InsertElement { path, element, index: None })?;
        self.selection.select_element(&self.tree, id);
        Some(id)
    }

    /// Duplicate the selected element right after itself and select the copy.
    pub fn duplicate_selected(&mut self) -> Option<NodeId> {
        let element = self.selection.element()?;
        let id = self.dispatch(TreeAction::DuplicateElement { element })?;
        self.selection.select_element(&self.tree, id);
        Some(id)
    }

    /// Move the selected element one slot within its column.
    pub fn move_selected(&mut self, direction: MoveDirection) -> bool {
        let Some(element) = self.selection.element() else {
            return false;
        };
        let before = self.revision;
        self.dispatch(TreeAction::ShiftElement { element, direction });
        self.revision != before
    }

    /// Move an element into another column and keep it selected.
    pub fn move_element(&mut self, element: NodeId, target: ColumnPath, index: usize) -> bool {
        let before = self.revision;
        self.dispatch(TreeAction::MoveElement { element, target, index });
        if self.revision == before {
            return false;
        }
        if self.selection.element() == Some(element) {
            self.selection.select_element(&self.tree, element);
        }
        true
    }

    /// Look up an element or report it missing.
    pub fn require_element(&self, id: NodeId) -> DocumentResult<&Element> {
        self.tree.element(id).ok_or(DocumentError::ElementNotFound(id))
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(&self.tree)?)
    }

    /// Load a page from JSON, replacing the current one.
    pub fn load_json(&mut self, json: &str) -> DocumentResult<()> {
        let tree: PageTree = serde_json::from_str(json)?;
        self.load(tree);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StepKind;
    use serde_json::json;

    fn editor_with_column() -> (PageEditor, ColumnPath) {
        let mut editor = PageEditor::new();
        let section = editor.add_section(SectionConfig::default()).unwrap();
        let row = editor.add_row(section, 2).unwrap();
        let column = editor.tree().row(section, row).unwrap().columns[0].id;
        (editor, ColumnPath { section, row, column })
    }

    #[test]
    fn test_add_section_selects_it() {
        let mut editor = PageEditor::new();
        let id = editor.add_section(SectionConfig::default()).unwrap();
        assert_eq!(editor.selection().section(), Some(id));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_noop_does_not_push_history() {
        let (mut editor, path) = editor_with_column();
        let len = editor.history().len();
        editor.dispatch(TreeAction::DeleteSection { section: uuid::Uuid::new_v4() });
        editor.dispatch(TreeAction::EqualizeColumns { section: path.section, row: uuid::Uuid::new_v4() });
        assert_eq!(editor.history().len(), len);
    }

    #[test]
    fn test_undo_clears_selection() {
        let (mut editor, path) = editor_with_column();
        editor.add_element(path, ElementKind::Headline, None).unwrap();
        assert!(editor.selection().element().is_some());
        assert!(editor.undo());
        assert!(editor.selection().is_empty());
        assert!(editor.tree().column_at(path).unwrap().elements.is_empty());
        assert!(editor.redo());
        assert_eq!(editor.tree().column_at(path).unwrap().elements.len(), 1);
    }

    #[test]
    fn test_update_element_merges_patch() {
        let (mut editor, path) = editor_with_column();
        let id = editor.add_element(path, ElementKind::Button, None).unwrap();
        let len = editor.history().len();

        assert!(editor.update_element(id, &json!({ "text": "Buy now" })).unwrap());
        let props = editor.tree().element(id).unwrap().content.to_json().unwrap();
        assert_eq!(props["text"], "Buy now");
        assert_eq!(editor.history().len(), len + 1);
    }

    #[test]
    fn test_update_element_rejects_bad_patch() {
        let (mut editor, path) = editor_with_column();
        let id = editor.add_element(path, ElementKind::Spacer, None).unwrap();
        let before = editor.tree().clone();

        assert!(editor.update_element(id, &json!({ "height": "tall" })).is_err());
        assert!(editor.update_element(id, &json!(["height"])).is_err());
        assert_eq!(editor.tree(), &before);
        assert!(!editor.update_element(uuid::Uuid::new_v4(), &json!({})).unwrap());
    }

    #[test]
    fn test_copy_paste_gets_fresh_id() {
        let (mut editor, path) = editor_with_column();
        let original = editor.add_element(path, ElementKind::Image, None).unwrap();
        assert!(editor.copy());

        let pasted = editor.paste().unwrap();
        assert_ne!(pasted, original);
        let elements = &editor.tree().column_at(path).unwrap().elements;
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].id, pasted);
        assert_eq!(editor.selection().element(), Some(pasted));
    }

    #[test]
    fn test_paste_without_column_is_noop() {
        let (mut editor, path) = editor_with_column();
        editor.add_element(path, ElementKind::Image, None);
        editor.copy();
        editor.selection_mut().clear();
        assert_eq!(editor.paste(), None);
    }

    #[test]
    fn test_cut_removes_element() {
        let (mut editor, path) = editor_with_column();
        let id = editor.add_element(path, ElementKind::Divider, None).unwrap();
        assert!(editor.cut());
        assert!(editor.tree().element(id).is_none());
        assert_eq!(editor.clipboard().map(|e| e.id), Some(id));
        assert!(editor.selection().element().is_none());
    }

    #[test]
    fn test_delete_selected_column_respects_floor() {
        let mut editor = PageEditor::new();
        let section = editor.add_section(SectionConfig::default()).unwrap();
        let row = editor.add_row(section, 1).unwrap();
        let column = editor.tree().row(section, row).unwrap().columns[0].id;
        let tree = editor.tree().clone();
        editor.selection_mut().select_column(&tree, column);
        assert!(!editor.delete_selected());
    }

    #[test]
    fn test_switching_steps_keeps_edits() {
        let mut funnel = Funnel::new("Launch");
        let landing = funnel.current_step_id();
        let checkout = funnel.add_step("Checkout", StepKind::Checkout);
        let mut editor = PageEditor::new();

        assert!(editor.open_step(&mut funnel, landing));
        editor.add_section(SectionConfig::with_rows([2])).unwrap();
        let edited = editor.tree().clone();

        assert!(editor.open_step(&mut funnel, checkout));
        assert!(editor.tree().is_empty());
        assert_eq!(funnel.step(landing).unwrap().tree(), edited);

        assert!(editor.open_step(&mut funnel, landing));
        assert_eq!(editor.tree(), &edited);
        assert_eq!(editor.step(), Some(landing));
    }

    #[test]
    fn test_unbound_page_does_not_overwrite_step() {
        let mut funnel = Funnel::new("Launch");
        let landing = funnel.current_step_id();
        let mut tree = PageTree::new();
        tree.apply(&TreeAction::AddSection(SectionConfig::with_rows([1])));
        funnel.commit_sections(&tree);

        let mut editor = PageEditor::new();
        assert!(!editor.commit_to(&mut funnel));
        assert!(editor.open_step(&mut funnel, landing));
        assert_eq!(editor.tree(), &tree);
        assert!(!editor.open_step(&mut funnel, uuid::Uuid::new_v4()));
        assert_eq!(editor.step(), Some(landing));
    }

    #[test]
    fn test_dispatched_move_keeps_selection_chain() {
        let (mut editor, from) = editor_with_column();
        let to_column = editor.tree().row(from.section, from.row).unwrap().columns[1].id;
        let to = ColumnPath { column: to_column, ..from };
        let element = editor.add_element(from, ElementKind::Paragraph, None).unwrap();

        editor.dispatch(TreeAction::MoveElement { element, target: to, index: 0 });
        assert_eq!(editor.selection().element(), Some(element));
        assert_eq!(editor.selection().column(), Some(to_column));

        let other = editor.add_section(SectionConfig::default()).unwrap();
        let tree = editor.tree().clone();
        assert!(editor.selection_mut().select_element(&tree, element));
        editor.dispatch(TreeAction::MoveRowTo { row: from.row, target_section: other, index: 0 });
        assert_eq!(editor.selection().section(), Some(other));
        assert_eq!(editor.selection().row(), Some(from.row));
        assert_eq!(editor.selection().element(), Some(element));
    }

    #[test]
    fn test_open_step_resets_history() {
        let mut funnel = Funnel::new("Launch");
        let (mut editor, _) = editor_with_column();
        funnel.commit_sections(editor.tree());
        let second = funnel.add_step("Checkout", StepKind::Checkout);

        assert!(editor.open_step(&mut funnel, second));
        assert!(editor.tree().is_empty());
        assert!(!editor.can_undo());
    }
}
