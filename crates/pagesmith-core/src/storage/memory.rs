//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Documents held as JSON values in a map. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, Value>>,
}

type ReadGuard<'a> = RwLockReadGuard<'a, HashMap<String, Value>>;
type WriteGuard<'a> = RwLockWriteGuard<'a, HashMap<String, Value>>;

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `(id, document)` pairs.
    pub fn with_documents(documents: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            documents: RwLock::new(documents.into_iter().collect()),
        }
    }

    /// Number of stored documents, or zero if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.read().map(|docs| docs.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StorageResult<ReadGuard<'_>> {
        self.documents
            .read()
            .map_err(|e| StorageError::Other(format!("Memory storage lock poisoned: {e}")))
    }

    fn write(&self) -> StorageResult<WriteGuard<'_>> {
        self.documents
            .write()
            .map_err(|e| StorageError::Other(format!("Memory storage lock poisoned: {e}")))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &Value) -> BoxFuture<'_, StorageResult<()>> {
        let entry = (id.to_owned(), document.clone());
        Box::pin(async move {
            self.write()?.insert(entry.0, entry.1);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Value>> {
        let id = id.to_owned();
        Box::pin(async move {
            let found = self.read()?.get(&id).cloned();
            found.ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_owned();
        Box::pin(async move {
            if self.write()?.remove(&id).is_none() {
                log::debug!("Nothing stored under {}", id);
            }
            Ok(())
        })
    }

    /// Ids come back sorted.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let mut ids: Vec<String> = self.read()?.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_owned();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Funnel;
    use crate::storage::{StoredDocument, block_on};

    #[test]
    fn test_save_and_load_funnel() {
        let storage = MemoryStorage::new();
        let funnel = Funnel::new("Spring sale");

        block_on(storage.save("test", &funnel.to_value().unwrap())).unwrap();
        let loaded = Funnel::from_value(block_on(storage.load("test")).unwrap()).unwrap();

        assert_eq!(loaded, funnel);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        let doc = serde_json::json!({ "name": "draft" });

        assert!(!block_on(storage.exists("test")).unwrap());
        block_on(storage.save("test", &doc)).unwrap();
        assert!(block_on(storage.exists("test")).unwrap());

        block_on(storage.delete("test")).unwrap();
        assert!(!block_on(storage.exists("test")).unwrap());
        // Deleting again is fine.
        block_on(storage.delete("test")).unwrap();
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let doc = serde_json::json!({});

        block_on(storage.save("doc1", &doc)).unwrap();
        block_on(storage.save("doc2", &doc)).unwrap();

        block_on(storage.save("doc1", &doc)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list, vec!["doc1".to_string(), "doc2".to_string()]);
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn test_with_documents() {
        let storage = MemoryStorage::with_documents([
            ("b".to_string(), serde_json::json!(2)),
            ("a".to_string(), serde_json::json!(1)),
        ]);
        assert_eq!(block_on(storage.list()).unwrap(), vec!["a", "b"]);
        assert_eq!(block_on(storage.load("b")).unwrap(), serde_json::json!(2));
    }
}
