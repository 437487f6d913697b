//! The section → row → column → element page tree.
//!
//! All structural edits go through [`TreeAction`]. [`PageTree::reduce`] is the
//! pure entry point used for history: it never touches the receiver and hands
//! back a brand-new tree when something changed. Unknown ids and guarded
//! invariants (column floor and ceiling) are silent no-ops.

use super::element::{Element, ElementKind, ElementProps};
use super::NodeId;
use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of columns in a row.
pub const MAX_COLUMNS: usize = 6;

/// Minimum ratio the drag-resize interaction should allow by default.
pub const DEFAULT_MIN_RATIO: f64 = 0.5;

/// Which level of the tree a node lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Section,
    Row,
    Column,
    Element,
}

/// Reordering direction among siblings. `Up` means towards the start
/// (left for columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Where a new column goes in its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPosition {
    Start,
    #[default]
    End,
    /// Clamped to the row's column count.
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerType {
    #[default]
    Boxed,
    FullWidth,
}

/// A column: a flex slot whose width is `ratio` relative to its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ratio: f64,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<HorizontalAlign>,
}

impl Column {
    /// An empty column with ratio 1.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            ratio: 1.0,
            elements: Vec::new(),
            min_ratio: None,
            vertical_align: None,
            horizontal_align: None,
        }
    }

    /// Smallest ratio a resize drag may reach.
    pub fn min_ratio(&self) -> f64 {
        self.min_ratio.unwrap_or(DEFAULT_MIN_RATIO)
    }

    /// Clamp a proposed ratio to this column's minimum.
    pub fn clamp_ratio(&self, ratio: f64) -> f64 {
        ratio.max(self.min_ratio())
    }

    /// Deep copy with fresh ids for the column and every element.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            elements: self.elements.iter().map(Element::duplicate).collect(),
            ..self.clone()
        }
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

/// Visual settings of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RowStyle {
    pub background_color: Option<SerializableColor>,
    pub background_gradient: Option<String>,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub gap: f64,
    pub alignment: Option<VerticalAlign>,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            background_color: None,
            background_gradient: None,
            padding_top: 10.0,
            padding_bottom: 10.0,
            gap: 20.0,
            alignment: None,
        }
    }
}

/// A horizontal band of 1 to 6 columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: NodeId,
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub style: RowStyle,
}

impl Row {
    /// A row of `count` equal columns (count clamped into 1..=6).
    pub fn with_columns(name: impl Into<String>, count: usize) -> Self {
        let count = count.clamp(1, MAX_COLUMNS);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            columns: (0..count).map(|_| Column::new()).collect(),
            style: RowStyle::default(),
        }
    }

    /// Sum of column ratios, for converting ratios to fractions.
    pub fn total_ratio(&self) -> f64 {
        self.columns.iter().map(|c| c.ratio).sum()
    }

    /// Fraction of the row width taken by each column.
    pub fn column_fractions(&self) -> Vec<f64> {
        let total = self.total_ratio();
        self.columns
            .iter()
            .map(|c| if total > 0.0 { c.ratio / total } else { 0.0 })
            .collect()
    }

    /// Deep copy with fresh ids at every level.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            columns: self.columns.iter().map(Column::duplicate).collect(),
            style: self.style.clone(),
        }
    }
}

/// Background, spacing and container settings of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionProps {
    pub background_color: Option<SerializableColor>,
    pub background_gradient: Option<String>,
    pub background_image: Option<String>,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub container_type: ContainerType,
    pub max_width: f64,
    pub min_height: Option<f64>,
}

impl Default for SectionProps {
    fn default() -> Self {
        Self {
            background_color: Some(SerializableColor::white()),
            background_gradient: None,
            background_image: None,
            padding_top: 40.0,
            padding_bottom: 40.0,
            container_type: ContainerType::Boxed,
            max_width: 1200.0,
            min_height: None,
        }
    }
}

/// A top-level band of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub props: SectionProps,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rows: Vec::new(),
            props: SectionProps::default(),
        }
    }

    /// Deep copy with fresh ids at every level.
    ///
    /// Only structural ids are regenerated; ids that happen to appear inside
    /// element props are left alone.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            rows: self.rows.iter().map(Row::duplicate).collect(),
            props: self.props.clone(),
        }
    }

    /// All ids in this subtree, section first.
    pub fn all_ids(&self) -> Vec<NodeId> {
        let mut ids = vec![self.id];
        for row in &self.rows {
            ids.push(row.id);
            for column in &row.columns {
                ids.push(column.id);
                ids.extend(column.elements.iter().map(|e| e.id));
            }
        }
        ids
    }
}

/// Options for a new section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionConfig {
    /// Defaults to `Section N`.
    pub name: Option<String>,
    /// Column count of each pre-seeded row.
    pub rows: Vec<usize>,
    pub props: Option<SectionProps>,
}

impl SectionConfig {
    pub fn with_rows(rows: impl Into<Vec<usize>>) -> Self {
        Self {
            rows: rows.into(),
            ..Self::default()
        }
    }
}

/// Ids of the ancestors of a column or element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPath {
    pub section: NodeId,
    pub row: NodeId,
    pub column: NodeId,
}

/// Index position of an element inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ElementSlot {
    section: usize,
    row: usize,
    column: usize,
    element: usize,
}

/// Every structural edit the builder supports.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeAction {
    AddSection(SectionConfig),
    DeleteSection { section: NodeId },
    RenameSection { section: NodeId, name: String },
    MoveSection { section: NodeId, direction: MoveDirection },
    DuplicateSection { section: NodeId },
    UpdateSectionProps { section: NodeId, props: SectionProps },

    /// `widths` is accepted for API compatibility; new columns always get ratio 1.
    AddRow { section: NodeId, columns: usize, widths: Option<Vec<f64>> },
    DeleteRow { section: NodeId, row: NodeId },
    RenameRow { section: NodeId, row: NodeId, name: String },
    MoveRow { section: NodeId, row: NodeId, direction: MoveDirection },
    /// Move a row into another (or the same) section at `index`.
    MoveRowTo { row: NodeId, target_section: NodeId, index: usize },
    DuplicateRow { section: NodeId, row: NodeId },
    UpdateRowStyle { section: NodeId, row: NodeId, style: RowStyle },

    AddColumn { section: NodeId, row: NodeId, position: ColumnPosition },
    DeleteColumn { section: NodeId, row: NodeId, column: NodeId },
    RenameColumn { section: NodeId, row: NodeId, column: NodeId, name: Option<String> },
    /// Sets the ratio verbatim. Clamping is the caller's job.
    ResizeColumn { section: NodeId, row: NodeId, column: NodeId, ratio: f64 },
    EqualizeColumns { section: NodeId, row: NodeId },
    DuplicateColumn { section: NodeId, row: NodeId, column: NodeId },
    MoveColumn { section: NodeId, row: NodeId, column: NodeId, direction: MoveDirection },
    AlignColumn {
        section: NodeId,
        row: NodeId,
        column: NodeId,
        vertical: Option<VerticalAlign>,
        horizontal: Option<HorizontalAlign>,
    },

    AddElement { path: ColumnPath, kind: ElementKind, index: Option<usize> },
    /// Insert a prebuilt element (paste). The element keeps its id.
    InsertElement { path: ColumnPath, element: Element, index: Option<usize> },
    /// Replace an element's props wholesale (already merged and validated).
    UpdateElement { element: NodeId, props: ElementProps },
    RenameElement { element: NodeId, name: Option<String> },
    DeleteElement { element: NodeId },
    DuplicateElement { element: NodeId },
    ShiftElement { element: NodeId, direction: MoveDirection },
    /// Move an element to `index` of the target column (clamped).
    MoveElement { element: NodeId, target: ColumnPath, index: usize },
}

/// A successfully applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applied {
    /// Id of the node created by the action, if any.
    pub created: Option<NodeId>,
}

/// Result of [`PageTree::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    /// Nothing matched or an invariant refused the edit.
    Unchanged,
    Changed { tree: PageTree, created: Option<NodeId> },
}

impl Reduction {
    pub fn is_changed(&self) -> bool {
        matches!(self, Reduction::Changed { .. })
    }
}

/// The ordered sections of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageTree {
    pub sections: Vec<Section>,
}

/// Move `items[index]` one step in `direction`. Returns false at the ends.
fn shift<T>(items: &mut [T], index: usize, direction: MoveDirection) -> bool {
    match direction {
        MoveDirection::Up if index > 0 => {
            items.swap(index, index - 1);
            true
        }
        MoveDirection::Down if index + 1 < items.len() => {
            items.swap(index, index + 1);
            true
        }
        _ => false,
    }
}

fn changed() -> Option<Applied> {
    Some(Applied::default())
}

/// Replace a name. Renaming to the current name is not a change.
fn rename<T: PartialEq + Clone>(slot: &mut T, name: &T) -> Option<Applied> {
    if slot == name {
        return None;
    }
    *slot = name.clone();
    changed()
}

fn created(id: NodeId) -> Option<Applied> {
    Some(Applied { created: Some(id) })
}

impl PageTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    // Lookups

    pub fn section(&self, id: NodeId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn row(&self, section: NodeId, row: NodeId) -> Option<&Row> {
        self.section(section)?.rows.iter().find(|r| r.id == row)
    }

    pub fn column(&self, section: NodeId, row: NodeId, column: NodeId) -> Option<&Column> {
        self.row(section, row)?.columns.iter().find(|c| c.id == column)
    }

    pub fn column_at(&self, path: ColumnPath) -> Option<&Column> {
        self.column(path.section, path.row, path.column)
    }

    /// Find an element anywhere in the tree.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        let slot = self.locate_element(id)?;
        Some(&self.sections[slot.section].rows[slot.row].columns[slot.column].elements[slot.element])
    }

    /// Section that owns a row.
    pub fn row_owner(&self, row: NodeId) -> Option<NodeId> {
        self.sections
            .iter()
            .find(|s| s.rows.iter().any(|r| r.id == row))
            .map(|s| s.id)
    }

    /// Section and row that own a column.
    pub fn column_owner(&self, column: NodeId) -> Option<(NodeId, NodeId)> {
        self.sections.iter().find_map(|s| {
            s.rows
                .iter()
                .find(|r| r.columns.iter().any(|c| c.id == column))
                .map(|r| (s.id, r.id))
        })
    }

    /// Full path to the column that owns an element.
    pub fn element_owner(&self, element: NodeId) -> Option<ColumnPath> {
        let slot = self.locate_element(element)?;
        let section = &self.sections[slot.section];
        let row = &section.rows[slot.row];
        Some(ColumnPath {
            section: section.id,
            row: row.id,
            column: row.columns[slot.column].id,
        })
    }

    /// Check whether any node in the tree has this id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.sections.iter().any(|s| s.all_ids().contains(&id))
    }

    fn locate_element(&self, id: NodeId) -> Option<ElementSlot> {
        for (si, section) in self.sections.iter().enumerate() {
            for (ri, row) in section.rows.iter().enumerate() {
                for (ci, column) in row.columns.iter().enumerate() {
                    if let Some(ei) = column.elements.iter().position(|e| e.id == id) {
                        return Some(ElementSlot {
                            section: si,
                            row: ri,
                            column: ci,
                            element: ei,
                        });
                    }
                }
            }
        }
        None
    }

    fn section_mut(&mut self, id: NodeId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    fn row_mut(&mut self, section: NodeId, row: NodeId) -> Option<&mut Row> {
        self.section_mut(section)?.rows.iter_mut().find(|r| r.id == row)
    }

    fn column_mut(&mut self, section: NodeId, row: NodeId, column: NodeId) -> Option<&mut Column> {
        self.row_mut(section, row)?.columns.iter_mut().find(|c| c.id == column)
    }

    fn elements_mut(&mut self, slot: ElementSlot) -> &mut Vec<Element> {
        &mut self.sections[slot.section].rows[slot.row].columns[slot.column].elements
    }

    // Reducer

    /// Apply `action` to a copy of this tree.
    pub fn reduce(&self, action: &TreeAction) -> Reduction {
        let mut next = self.clone();
        match next.apply(action) {
            Some(applied) => Reduction::Changed {
                tree: next,
                created: applied.created,
            },
            None => Reduction::Unchanged,
        }
    }

    /// Apply `action` in place. Returns `None` when nothing changed.
    ///
    /// On `None` the tree is guaranteed to be untouched.
    pub fn apply(&mut self, action: &TreeAction) -> Option<Applied> {
        let result = self.apply_inner(action);
        if result.is_none() {
            log::debug!("Tree action ignored: {:?}", action);
        }
        result
    }

    fn apply_inner(&mut self, action: &TreeAction) -> Option<Applied> {
        match action {
            TreeAction::AddSection(config) => {
                let name = config
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Section {}", self.sections.len() + 1));
                let mut section = Section::new(name);
                if let Some(props) = &config.props {
                    section.props = props.clone();
                }
                for (i, &count) in config.rows.iter().enumerate() {
                    section.rows.push(Row::with_columns(format!("Row {}", i + 1), count));
                }
                let id = section.id;
                self.sections.push(section);
                created(id)
            }
            TreeAction::DeleteSection { section } => {
                let index = self.sections.iter().position(|s| s.id == *section)?;
                self.sections.remove(index);
                changed()
            }
            TreeAction::RenameSection { section, name } => {
                rename(&mut self.section_mut(*section)?.name, name)
            }
            TreeAction::MoveSection { section, direction } => {
                let index = self.sections.iter().position(|s| s.id == *section)?;
                shift(&mut self.sections, index, *direction).then(Applied::default)
            }
            TreeAction::DuplicateSection { section } => {
                let index = self.sections.iter().position(|s| s.id == *section)?;
                let mut copy = self.sections[index].duplicate();
                copy.name = format!("{} (Copy)", copy.name);
                let id = copy.id;
                self.sections.insert(index + 1, copy);
                created(id)
            }
            TreeAction::UpdateSectionProps { section, props } => {
                self.section_mut(*section)?.props = props.clone();
                changed()
            }

            TreeAction::AddRow { section, columns, .. } => {
                let target = self.section_mut(*section)?;
                let row = Row::with_columns(format!("Row {}", target.rows.len() + 1), *columns);
                let id = row.id;
                target.rows.push(row);
                created(id)
            }
            TreeAction::DeleteRow { section, row } => {
                let rows = &mut self.section_mut(*section)?.rows;
                let index = rows.iter().position(|r| r.id == *row)?;
                rows.remove(index);
                changed()
            }
            TreeAction::RenameRow { section, row, name } => {
                rename(&mut self.row_mut(*section, *row)?.name, name)
            }
            TreeAction::MoveRow { section, row, direction } => {
                let rows = &mut self.section_mut(*section)?.rows;
                let index = rows.iter().position(|r| r.id == *row)?;
                shift(rows, index, *direction).then(Applied::default)
            }
            TreeAction::MoveRowTo { row, target_section, index } => {
                let source = self.row_owner(*row)?;
                self.section(*target_section)?;
                let rows = &mut self.section_mut(source)?.rows;
                let from = rows.iter().position(|r| r.id == *row)?;
                let moved = rows.remove(from);
                let target = &mut self.section_mut(*target_section)?.rows;
                let at = (*index).min(target.len());
                target.insert(at, moved);
                changed()
            }
            TreeAction::DuplicateRow { section, row } => {
                let rows = &mut self.section_mut(*section)?.rows;
                let index = rows.iter().position(|r| r.id == *row)?;
                let mut copy = rows[index].duplicate();
                copy.name = format!("{} (Copy)", copy.name);
                let id = copy.id;
                rows.insert(index + 1, copy);
                created(id)
            }
            TreeAction::UpdateRowStyle { section, row, style } => {
                self.row_mut(*section, *row)?.style = style.clone();
                changed()
            }

            TreeAction::AddColumn { section, row, position } => {
                let columns = &mut self.row_mut(*section, *row)?.columns;
                if columns.len() >= MAX_COLUMNS {
                    return None;
                }
                let at = match position {
                    ColumnPosition::Start => 0,
                    ColumnPosition::End => columns.len(),
                    ColumnPosition::Index(i) => (*i).min(columns.len()),
                };
                let column = Column::new();
                let id = column.id;
                columns.insert(at, column);
                created(id)
            }
            TreeAction::DeleteColumn { section, row, column } => {
                let columns = &mut self.row_mut(*section, *row)?.columns;
                let index = columns.iter().position(|c| c.id == *column)?;
                if columns.len() <= 1 {
                    return None;
                }
                columns.remove(index);
                changed()
            }
            TreeAction::RenameColumn { section, row, column, name } => {
                rename(&mut self.column_mut(*section, *row, *column)?.name, name)
            }
            TreeAction::ResizeColumn { section, row, column, ratio } => {
                self.column_mut(*section, *row, *column)?.ratio = *ratio;
                changed()
            }
            TreeAction::EqualizeColumns { section, row } => {
                for column in &mut self.row_mut(*section, *row)?.columns {
                    column.ratio = 1.0;
                }
                changed()
            }
            TreeAction::DuplicateColumn { section, row, column } => {
                let columns = &mut self.row_mut(*section, *row)?.columns;
                let index = columns.iter().position(|c| c.id == *column)?;
                if columns.len() >= MAX_COLUMNS {
                    return None;
                }
                let copy = columns[index].duplicate();
                let id = copy.id;
                columns.insert(index + 1, copy);
                created(id)
            }
            TreeAction::MoveColumn { section, row, column, direction } => {
                let columns = &mut self.row_mut(*section, *row)?.columns;
                let index = columns.iter().position(|c| c.id == *column)?;
                shift(columns, index, *direction).then(Applied::default)
            }
            TreeAction::AlignColumn { section, row, column, vertical, horizontal } => {
                let target = self.column_mut(*section, *row, *column)?;
                target.vertical_align = *vertical;
                target.horizontal_align = *horizontal;
                changed()
            }

            TreeAction::AddElement { path, kind, index } => {
                let elements = &mut self.column_mut(path.section, path.row, path.column)?.elements;
                let element = Element::new(*kind);
                let id = element.id;
                let at = index.map_or(elements.len(), |i| i.min(elements.len()));
                elements.insert(at, element);
                created(id)
            }
            TreeAction::InsertElement { path, element, index } => {
                if self.locate_element(element.id).is_some() {
                    return None;
                }
                let elements = &mut self.column_mut(path.section, path.row, path.column)?.elements;
                let at = index.map_or(elements.len(), |i| i.min(elements.len()));
                elements.insert(at, element.clone());
                created(element.id)
            }
            TreeAction::UpdateElement { element, props } => {
                let slot = self.locate_element(*element)?;
                let target = &mut self.elements_mut(slot)[slot.element];
                if target.kind() != props.kind() {
                    log::warn!(
                        "Refusing to change element {} from {:?} to {:?}",
                        element,
                        target.kind(),
                        props.kind()
                    );
                    return None;
                }
                target.content = props.clone();
                changed()
            }
            TreeAction::RenameElement { element, name } => {
                let slot = self.locate_element(*element)?;
                rename(&mut self.elements_mut(slot)[slot.element].name, name)
            }
            TreeAction::DeleteElement { element } => {
                let slot = self.locate_element(*element)?;
                self.elements_mut(slot).remove(slot.element);
                changed()
            }
            TreeAction::DuplicateElement { element } => {
                let slot = self.locate_element(*element)?;
                let elements = self.elements_mut(slot);
                let copy = elements[slot.element].duplicate();
                let id = copy.id;
                elements.insert(slot.element + 1, copy);
                created(id)
            }
            TreeAction::ShiftElement { element, direction } => {
                let slot = self.locate_element(*element)?;
                shift(self.elements_mut(slot), slot.element, *direction).then(Applied::default)
            }
            TreeAction::MoveElement { element, target, index } => {
                let slot = self.locate_element(*element)?;
                self.column_at(*target)?;
                let moved = self.elements_mut(slot).remove(slot.element);
                let elements = &mut self.column_mut(target.section, target.row, target.column)?.elements;
                let at = (*index).min(elements.len());
                elements.insert(at, moved);
                changed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree_with_row(columns: usize) -> (PageTree, NodeId, NodeId) {
        let mut tree = PageTree::new();
        let section = tree
            .apply(&TreeAction::AddSection(SectionConfig::default()))
            .and_then(|a| a.created)
            .unwrap();
        let row = tree
            .apply(&TreeAction::AddRow { section, columns, widths: None })
            .and_then(|a| a.created)
            .unwrap();
        (tree, section, row)
    }

    fn path(tree: &PageTree, section: NodeId, row: NodeId, column: usize) -> ColumnPath {
        ColumnPath {
            section,
            row,
            column: tree.row(section, row).unwrap().columns[column].id,
        }
    }

    fn add_element(tree: &mut PageTree, path: ColumnPath, kind: ElementKind) -> NodeId {
        tree.apply(&TreeAction::AddElement { path, kind, index: None })
            .and_then(|a| a.created)
            .unwrap()
    }

    #[test]
    fn test_add_section_numbers_names() {
        let mut tree = PageTree::new();
        tree.apply(&TreeAction::AddSection(SectionConfig::default()));
        tree.apply(&TreeAction::AddSection(SectionConfig::with_rows([2, 3])));
        assert_eq!(tree.sections[0].name, "Section 1");
        assert_eq!(tree.sections[1].name, "Section 2");
        assert_eq!(tree.sections[1].rows.len(), 2);
        assert_eq!(tree.sections[1].rows[1].columns.len(), 3);
    }

    #[test]
    fn test_reduce_leaves_original_untouched() {
        let tree = PageTree::new();
        let reduction = tree.reduce(&TreeAction::AddSection(SectionConfig::default()));
        assert!(tree.is_empty());
        match reduction {
            Reduction::Changed { tree: next, created } => {
                assert_eq!(next.sections.len(), 1);
                assert_eq!(created, Some(next.sections[0].id));
            }
            Reduction::Unchanged => panic!("expected a change"),
        }
    }

    #[test]
    fn test_add_row_ignores_widths_and_clamps_count() {
        let mut tree = PageTree::new();
        let section = tree
            .apply(&TreeAction::AddSection(SectionConfig::default()))
            .and_then(|a| a.created)
            .unwrap();
        tree.apply(&TreeAction::AddRow {
            section,
            columns: 2,
            widths: Some(vec![70.0, 30.0]),
        });
        tree.apply(&TreeAction::AddRow { section, columns: 9, widths: None });

        let rows = &tree.sections[0].rows;
        assert!(rows[0].columns.iter().all(|c| c.ratio == 1.0));
        assert_eq!(rows[1].columns.len(), MAX_COLUMNS);
    }

    #[test]
    fn test_add_row_unknown_section_is_noop() {
        let (tree, _, _) = tree_with_row(1);
        let reduction = tree.reduce(&TreeAction::AddRow {
            section: Uuid::new_v4(),
            columns: 2,
            widths: None,
        });
        assert_eq!(reduction, Reduction::Unchanged);
    }

    #[test]
    fn test_add_column_positions() {
        let (mut tree, section, row) = tree_with_row(2);
        let first = tree
            .apply(&TreeAction::AddColumn { section, row, position: ColumnPosition::Start })
            .and_then(|a| a.created)
            .unwrap();
        let middle = tree
            .apply(&TreeAction::AddColumn { section, row, position: ColumnPosition::Index(2) })
            .and_then(|a| a.created)
            .unwrap();
        let last = tree
            .apply(&TreeAction::AddColumn { section, row, position: ColumnPosition::Index(99) })
            .and_then(|a| a.created)
            .unwrap();

        let columns = &tree.row(section, row).unwrap().columns;
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[0].id, first);
        assert_eq!(columns[2].id, middle);
        assert_eq!(columns[4].id, last);
    }

    #[test]
    fn test_column_ceiling() {
        let (tree, section, row) = tree_with_row(6);
        let reduction = tree.reduce(&TreeAction::AddColumn {
            section,
            row,
            position: ColumnPosition::End,
        });
        assert_eq!(reduction, Reduction::Unchanged);

        let column = tree.row(section, row).unwrap().columns[0].id;
        assert_eq!(
            tree.reduce(&TreeAction::DuplicateColumn { section, row, column }),
            Reduction::Unchanged
        );
    }

    #[test]
    fn test_column_floor() {
        let (mut tree, section, row) = tree_with_row(1);
        let column = tree.row(section, row).unwrap().columns[0].id;
        assert!(tree.apply(&TreeAction::DeleteColumn { section, row, column }).is_none());
        assert_eq!(tree.row(section, row).unwrap().columns.len(), 1);
    }

    #[test]
    fn test_resize_then_equalize() {
        let (mut tree, section, row) = tree_with_row(3);
        let ids: Vec<NodeId> = tree.row(section, row).unwrap().columns.iter().map(|c| c.id).collect();
        tree.apply(&TreeAction::ResizeColumn { section, row, column: ids[0], ratio: 2.5 });
        tree.apply(&TreeAction::ResizeColumn { section, row, column: ids[1], ratio: 0.5 });
        assert_eq!(tree.row(section, row).unwrap().columns[0].ratio, 2.5);

        tree.apply(&TreeAction::EqualizeColumns { section, row });
        let ratios: Vec<f64> = tree.row(section, row).unwrap().columns.iter().map(|c| c.ratio).collect();
        assert_eq!(ratios, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_resize_does_not_validate() {
        let (mut tree, section, row) = tree_with_row(2);
        let column = tree.row(section, row).unwrap().columns[0].id;
        tree.apply(&TreeAction::ResizeColumn { section, row, column, ratio: -1.0 });
        let target = tree.column(section, row, column).unwrap();
        assert_eq!(target.ratio, -1.0);
        assert_eq!(target.clamp_ratio(-1.0), DEFAULT_MIN_RATIO);
    }

    #[test]
    fn test_column_fractions() {
        let (mut tree, section, row) = tree_with_row(2);
        let column = tree.row(section, row).unwrap().columns[0].id;
        tree.apply(&TreeAction::ResizeColumn { section, row, column, ratio: 3.0 });
        assert_eq!(tree.row(section, row).unwrap().column_fractions(), vec![0.75, 0.25]);
    }

    #[test]
    fn test_duplicate_section_fresh_ids() {
        let (mut tree, section, row) = tree_with_row(2);
        let target = path(&tree, section, row, 1);
        add_element(&mut tree, target, ElementKind::Button);
        add_element(&mut tree, target, ElementKind::Headline);
        tree.apply(&TreeAction::AddSection(SectionConfig::default()));

        let copy_id = tree
            .apply(&TreeAction::DuplicateSection { section })
            .and_then(|a| a.created)
            .unwrap();

        assert_eq!(tree.sections.len(), 3);
        assert_eq!(tree.sections[1].id, copy_id);
        assert_eq!(tree.sections[1].name, "Section 1 (Copy)");

        let original_ids = tree.sections[0].all_ids();
        let copy_ids = tree.sections[1].all_ids();
        assert_eq!(original_ids.len(), copy_ids.len());
        assert!(copy_ids.iter().all(|id| !original_ids.contains(id)));

        let copied_column = &tree.sections[1].rows[0].columns[1];
        assert_eq!(copied_column.elements[0].kind(), ElementKind::Button);
    }

    #[test]
    fn test_move_section() {
        let mut tree = PageTree::new();
        for _ in 0..3 {
            tree.apply(&TreeAction::AddSection(SectionConfig::default()));
        }
        let first = tree.sections[0].id;
        assert!(tree.apply(&TreeAction::MoveSection { section: first, direction: MoveDirection::Up }).is_none());
        tree.apply(&TreeAction::MoveSection { section: first, direction: MoveDirection::Down });
        assert_eq!(tree.sections[1].id, first);
    }

    #[test]
    fn test_move_row_between_sections() {
        let (mut tree, section, row) = tree_with_row(2);
        let other = tree
            .apply(&TreeAction::AddSection(SectionConfig::with_rows([1])))
            .and_then(|a| a.created)
            .unwrap();
        tree.apply(&TreeAction::MoveRowTo { row, target_section: other, index: 0 });

        assert!(tree.section(section).unwrap().rows.is_empty());
        assert_eq!(tree.section(other).unwrap().rows[0].id, row);
        assert_eq!(tree.row_owner(row), Some(other));
    }

    #[test]
    fn test_add_element_at_index() {
        let (mut tree, section, row) = tree_with_row(1);
        let target = path(&tree, section, row, 0);
        let a = add_element(&mut tree, target, ElementKind::Headline);
        let b = tree
            .apply(&TreeAction::AddElement { path: target, kind: ElementKind::Image, index: Some(0) })
            .and_then(|a| a.created)
            .unwrap();
        let elements = &tree.column_at(target).unwrap().elements;
        assert_eq!(elements[0].id, b);
        assert_eq!(elements[1].id, a);
    }

    #[test]
    fn test_move_element_clamps_index() {
        let (mut tree, section, row) = tree_with_row(2);
        let from = path(&tree, section, row, 0);
        let to = path(&tree, section, row, 1);
        let moving = add_element(&mut tree, from, ElementKind::Paragraph);
        add_element(&mut tree, to, ElementKind::Divider);

        tree.apply(&TreeAction::MoveElement { element: moving, target: to, index: 42 });

        assert!(tree.column_at(from).unwrap().elements.is_empty());
        let elements = &tree.column_at(to).unwrap().elements;
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].id, moving);
        assert_eq!(tree.element_owner(moving), Some(to));
    }

    #[test]
    fn test_move_unknown_element_is_noop() {
        let (tree, section, row) = tree_with_row(1);
        let to = path(&tree, section, row, 0);
        let reduction = tree.reduce(&TreeAction::MoveElement {
            element: Uuid::new_v4(),
            target: to,
            index: 0,
        });
        assert_eq!(reduction, Reduction::Unchanged);
    }

    #[test]
    fn test_move_to_unknown_column_keeps_element() {
        let (mut tree, section, row) = tree_with_row(1);
        let from = path(&tree, section, row, 0);
        let id = add_element(&mut tree, from, ElementKind::Icon);
        let bogus = ColumnPath { column: Uuid::new_v4(), ..from };
        assert!(tree.apply(&TreeAction::MoveElement { element: id, target: bogus, index: 0 }).is_none());
        assert!(tree.element(id).is_some());
    }

    #[test]
    fn test_shift_and_duplicate_element() {
        let (mut tree, section, row) = tree_with_row(1);
        let target = path(&tree, section, row, 0);
        let a = add_element(&mut tree, target, ElementKind::Headline);
        let b = add_element(&mut tree, target, ElementKind::Paragraph);

        assert!(tree.apply(&TreeAction::ShiftElement { element: a, direction: MoveDirection::Up }).is_none());
        tree.apply(&TreeAction::ShiftElement { element: b, direction: MoveDirection::Up });
        let copy = tree
            .apply(&TreeAction::DuplicateElement { element: b })
            .and_then(|a| a.created)
            .unwrap();

        let ids: Vec<NodeId> = tree.column_at(target).unwrap().elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b, copy, a]);
    }

    #[test]
    fn test_update_element_rejects_kind_change() {
        let (mut tree, section, row) = tree_with_row(1);
        let target = path(&tree, section, row, 0);
        let id = add_element(&mut tree, target, ElementKind::Spacer);
        let props = ElementProps::defaults_for(ElementKind::Button);
        assert!(tree.apply(&TreeAction::UpdateElement { element: id, props }).is_none());
    }

    #[test]
    fn test_rename_to_same_name_is_noop() {
        let (mut tree, section, row) = tree_with_row(1);
        let target = path(&tree, section, row, 0);
        let id = add_element(&mut tree, target, ElementKind::Button);

        let name = tree.section(section).unwrap().name.clone();
        assert!(tree.apply(&TreeAction::RenameSection { section, name }).is_none());
        assert!(tree.apply(&TreeAction::RenameRow { section, row, name: "Row 1".into() }).is_none());
        assert!(tree
            .apply(&TreeAction::RenameColumn { section, row, column: target.column, name: None })
            .is_none());
        assert!(tree.apply(&TreeAction::RenameElement { element: id, name: None }).is_none());

        let name = Some("CTA".to_string());
        assert!(tree.apply(&TreeAction::RenameElement { element: id, name: name.clone() }).is_some());
        assert!(tree.apply(&TreeAction::RenameElement { element: id, name }).is_none());
    }

    #[test]
    fn test_delete_section_cascades() {
        let (mut tree, section, row) = tree_with_row(1);
        let target = path(&tree, section, row, 0);
        let id = add_element(&mut tree, target, ElementKind::Video);
        tree.apply(&TreeAction::DeleteSection { section });
        assert!(tree.element(id).is_none());
        assert!(!tree.contains(row));
    }

    #[test]
    fn test_tree_json_is_section_array() {
        let (tree, _, _) = tree_with_row(2);
        let value = serde_json::to_value(&tree).unwrap();
        assert!(value.is_array());
        let back: PageTree = serde_json::from_value(value).unwrap();
        assert_eq!(back, tree);
    }
}
