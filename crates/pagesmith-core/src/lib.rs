//! Pagesmith Core Library
//!
//! Platform-agnostic document model and geometry for the Pagesmith page
//! builder and the kanva design canvas.

pub mod builder;
pub mod color;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod history;
pub mod kanva;
pub mod snap;
pub mod storage;

pub use builder::{
    Column, ColumnPosition, Element, ElementKind, ElementProps, Funnel, FunnelStep, MoveDirection,
    NodeId, NodeKind, PageEditor, PageTree, Reduction, Row, Section, SectionConfig,
    SelectionModel, StepKind, TreeAction,
};
pub use color::SerializableColor;
pub use error::{DocumentError, DocumentResult};
pub use geometry::{Bounds, CanvasSize, bounds};
pub use guides::{Guide, GuideAxis, GuideSource, SAFE_ZONE_MARGIN, build_guides};
pub use history::{HistoryStack, MAX_HISTORY};
pub use kanva::{CanvasContent, CanvasElement, KanvaDesign, KanvaEditor, KanvaPage};
pub use snap::{DEFAULT_SNAP_THRESHOLD, SnapAnchor, SnapBadge, SnapOutcome, SnapSettings, compute_snap};
pub use storage::{AutoSaveManager, MemoryStorage, SaveReceipt, SaveStatus, Storage, StorageError};
