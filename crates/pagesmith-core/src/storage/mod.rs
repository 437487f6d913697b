//! Storage abstraction for persistence.
//!
//! Backends store documents as JSON values keyed by id. Typed documents pass
//! through [`StoredDocument`], which every persistable document implements.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use autosave::{
    AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS, LAST_DOCUMENT_KEY, SaveReceipt, SaveStatus,
};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::{FileStorage, export_file, import_file};

use crate::builder::Funnel;
use crate::kanva::KanvaDesign;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A document that can be handed to a [`Storage`] backend.
pub trait StoredDocument: Serialize + DeserializeOwned {
    /// Key the document is stored under by default.
    fn document_id(&self) -> String;

    fn to_value(&self) -> StorageResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_value(value: Value) -> StorageResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl StoredDocument for Funnel {
    fn document_id(&self) -> String {
        self.id.to_string()
    }
}

impl StoredDocument for KanvaDesign {
    fn document_id(&self) -> String {
        self.id.to_string()
    }
}

/// Trait for document storage backends.
///
/// Implementations can keep documents in memory or on the filesystem.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, id: &str, document: &Value) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a document.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Value>>;

    /// Delete a document. Deleting a missing document is not an error.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all document IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Drive a storage future to completion on the current thread.
///
/// The bundled backends never suspend, so this is enough for tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
