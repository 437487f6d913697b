//! The funnel page builder: a section → row → column → element document,
//! a selection model and an editor that records undo history.

mod editor;
mod element;
mod funnel;
mod selection;
mod tree;

pub use editor::PageEditor;
pub use element::*;
pub use funnel::{Funnel, FunnelStep, StepKind};
pub use selection::{Hover, SelectionModel};
pub use tree::{
    Applied, Column, ColumnPath, ColumnPosition, ContainerType, DEFAULT_MIN_RATIO, HorizontalAlign,
    MAX_COLUMNS, MoveDirection, NodeKind, PageTree, Reduction, Row, RowStyle, Section,
    SectionConfig, SectionProps, TreeAction, VerticalAlign,
};

/// Identifier shared by every node of the page tree.
pub type NodeId = uuid::Uuid;
