//! Selection and hover state of the page builder.

use super::tree::{NodeKind, PageTree};
use super::NodeId;

/// The node currently under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub kind: NodeKind,
    pub id: NodeId,
}

/// Which nodes are selected at each level of the tree.
///
/// Selecting a node always re-derives its ancestors from the tree, so the
/// selected ids form a chain: the element lives in the selected column, which
/// lives in the selected row, which lives in the selected section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    hovered: Option<Hover>,
    section: Option<NodeId>,
    row: Option<NodeId>,
    column: Option<NodeId>,
    element: Option<NodeId>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Option<NodeId> {
        self.section
    }

    pub fn row(&self) -> Option<NodeId> {
        self.row
    }

    pub fn column(&self) -> Option<NodeId> {
        self.column
    }

    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    pub fn hovered(&self) -> Option<Hover> {
        self.hovered
    }

    /// The deepest selected node.
    pub fn focused(&self) -> Option<(NodeKind, NodeId)> {
        self.element
            .map(|id| (NodeKind::Element, id))
            .or(self.column.map(|id| (NodeKind::Column, id)))
            .or(self.row.map(|id| (NodeKind::Row, id)))
            .or(self.section.map(|id| (NodeKind::Section, id)))
    }

    pub fn is_empty(&self) -> bool {
        self.section.is_none()
    }

    /// Select a section and clear every lower level.
    pub fn select_section(&mut self, tree: &PageTree, section: NodeId) -> bool {
        if tree.section(section).is_none() {
            log::debug!("Cannot select unknown section {}", section);
            return false;
        }
        self.section = Some(section);
        self.row = None;
        self.column = None;
        self.element = None;
        true
    }

    /// Select a row and its owning section.
    pub fn select_row(&mut self, tree: &PageTree, row: NodeId) -> bool {
        let Some(section) = tree.row_owner(row) else {
            log::debug!("Cannot select unknown row {}", row);
            return false;
        };
        self.section = Some(section);
        self.row = Some(row);
        self.column = None;
        self.element = None;
        true
    }

    /// Select a column and its owning row and section.
    pub fn select_column(&mut self, tree: &PageTree, column: NodeId) -> bool {
        let Some((section, row)) = tree.column_owner(column) else {
            log::debug!("Cannot select unknown column {}", column);
            return false;
        };
        self.section = Some(section);
        self.row = Some(row);
        self.column = Some(column);
        self.element = None;
        true
    }

    /// Select an element and every ancestor.
    pub fn select_element(&mut self, tree: &PageTree, element: NodeId) -> bool {
        let Some(path) = tree.element_owner(element) else {
            log::debug!("Cannot select unknown element {}", element);
            return false;
        };
        self.section = Some(path.section);
        self.row = Some(path.row);
        self.column = Some(path.column);
        self.element = Some(element);
        true
    }

    /// Select any node by kind.
    pub fn select(&mut self, tree: &PageTree, kind: NodeKind, id: NodeId) -> bool {
        match kind {
            NodeKind::Section => self.select_section(tree, id),
            NodeKind::Row => self.select_row(tree, id),
            NodeKind::Column => self.select_column(tree, id),
            NodeKind::Element => self.select_element(tree, id),
        }
    }

    /// Clear the selection. Hover is left alone.
    pub fn clear(&mut self) {
        self.section = None;
        self.row = None;
        self.column = None;
        self.element = None;
    }

    /// Pointer entered a node.
    ///
    /// Elements take priority: while an element is hovered, entering one of
    /// its containers does not steal the outline.
    pub fn hover_enter(&mut self, kind: NodeKind, id: NodeId) {
        if kind != NodeKind::Element
            && self.hovered.is_some_and(|h| h.kind == NodeKind::Element)
        {
            return;
        }
        self.hovered = Some(Hover { kind, id });
    }

    /// Pointer left a node. Only clears the hover if it still points there.
    pub fn hover_leave(&mut self, kind: NodeKind, id: NodeId) {
        if self.hovered == Some(Hover { kind, id }) {
            self.hovered = None;
        }
    }

    /// Check if a node should draw its hover outline.
    pub fn is_hovered(&self, kind: NodeKind, id: NodeId) -> bool {
        self.hovered == Some(Hover { kind, id })
    }

    /// Check if a node is part of the selection chain.
    pub fn is_selected(&self, kind: NodeKind, id: NodeId) -> bool {
        let slot = match kind {
            NodeKind::Section => self.section,
            NodeKind::Row => self.row,
            NodeKind::Column => self.column,
            NodeKind::Element => self.element,
        };
        slot == Some(id)
    }

    /// Bring the selection back in line with `tree` after an edit.
    ///
    /// The deepest selected id that still exists is re-selected, which
    /// re-derives its ancestors (a moved row or element drags the chain
    /// along). Hover on a vanished node is dropped.
    pub fn prune(&mut self, tree: &PageTree) {
        if self.hovered.is_some_and(|h| !tree.contains(h.id)) {
            self.hovered = None;
        }

        let chain = [
            (NodeKind::Element, self.element),
            (NodeKind::Column, self.column),
            (NodeKind::Row, self.row),
            (NodeKind::Section, self.section),
        ];
        self.clear();
        for (kind, id) in chain {
            let Some(id) = id else { continue };
            if self.select(tree, kind, id) {
                break;
            }
        }
    }
}
