//! Document-level errors.
//!
//! Structural operations never fail: an unknown id or a guarded invariant
//! simply leaves the document unchanged. Errors are reserved for input that
//! cannot be represented at all.

use crate::builder::ElementKind;
use thiserror::Error;

/// Errors raised while building or decoding documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid props for {kind:?} element: {reason}")]
    InvalidProps { kind: ElementKind, reason: String },
    #[error("Props patch must be a JSON object")]
    PatchNotObject,
    #[error("Element not found: {0}")]
    ElementNotFound(uuid::Uuid),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
