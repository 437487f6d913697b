//! The kanva design canvas: freeform elements on fixed-size pages, with
//! snapping, transform handles, layers and groups.

mod design;
mod drag;
mod editor;
mod element;
pub mod transform;

pub use design::{DEFAULT_PAGE_SIZE, KanvaDesign, KanvaPage};
pub use drag::{DragSession, ManipulationState};
pub use editor::KanvaEditor;
pub use element::{
    CanvasContent, CanvasElement, DEFAULT_ELEMENT_SIZE, ImageContent, PathContent, ShapeContent,
    ShapeKind, TextContent,
};
pub use transform::{Corner, Edge, Handle, HandleKind};
