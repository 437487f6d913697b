//! Auto-save functionality for document persistence.
//!
//! The editors keep changing the in-memory document while a save is in
//! flight; whichever save finishes last wins.

use super::{Storage, StorageResult, StoredDocument};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Key for the "last opened" document.
pub const LAST_DOCUMENT_KEY: &str = "__last_document__";

/// What the save indicator should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Saved,
    Saving,
    Unsaved,
    Error,
}

/// Outcome of one save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReceipt {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// Manages automatic document persistence.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    last_saved_at: Option<DateTime<Utc>>,
    status: SaveStatus,
    /// Id the document is saved under; defaults to the document's own id.
    current_doc_id: Option<String>,
}

impl<S: Storage> AutoSaveManager<S> {
    /// Create a new auto-save manager with the given storage backend.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            last_saved_at: None,
            status: SaveStatus::Saved,
            current_doc_id: None,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    /// Wall-clock time of the last successful save.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// Mark the document as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.status = SaveStatus::Unsaved;
    }

    /// Check if the document has unsaved changes (including a failed save).
    pub fn is_dirty(&self) -> bool {
        matches!(self.status, SaveStatus::Unsaved | SaveStatus::Error)
    }

    pub fn set_document_id(&mut self, id: Option<String>) {
        self.current_doc_id = id;
    }

    pub fn document_id(&self) -> Option<&str> {
        self.current_doc_id.as_deref()
    }

    /// Check if enough time has passed for an auto-save.
    pub fn should_save(&self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save the document if it is dirty and the interval has elapsed.
    pub async fn maybe_save<D: StoredDocument>(&mut self, document: &D) -> Option<SaveReceipt> {
        if !self.should_save() {
            return None;
        }
        Some(self.save(document).await)
    }

    /// Save the document now.
    ///
    /// Failures are reported through the receipt and [`SaveStatus::Error`],
    /// never as an `Err`.
    pub async fn save<D: StoredDocument>(&mut self, document: &D) -> SaveReceipt {
        self.status = SaveStatus::Saving;
        let result = self.persist(document).await;
        let timestamp = Utc::now();

        match result {
            Ok(id) => {
                log::info!("Saved document {}", id);
                self.last_save = Some(Instant::now());
                self.last_saved_at = Some(timestamp);
                self.status = SaveStatus::Saved;
                SaveReceipt { success: true, timestamp }
            }
            Err(e) => {
                log::warn!("Failed to save document: {}", e);
                self.status = SaveStatus::Error;
                SaveReceipt { success: false, timestamp }
            }
        }
    }

    async fn persist<D: StoredDocument>(&self, document: &D) -> StorageResult<String> {
        let id = self
            .current_doc_id
            .clone()
            .unwrap_or_else(|| document.document_id());
        let value = document.to_value()?;

        self.storage.save(&id, &value).await?;
        // Also save as the "last document" for auto-restore
        self.storage.save(LAST_DOCUMENT_KEY, &value).await?;
        Ok(id)
    }

    /// Load a document by ID.
    pub async fn load<D: StoredDocument>(&mut self, id: &str) -> StorageResult<D> {
        let document = D::from_value(self.storage.load(id).await?)?;
        log::info!("Loaded document {}", id);
        self.current_doc_id = Some(id.to_string());
        self.status = SaveStatus::Saved;
        self.last_save = Some(Instant::now());
        Ok(document)
    }

    /// Try to load the last opened document.
    pub async fn load_last<D: StoredDocument>(&mut self) -> Option<D> {
        let value = self.storage.load(LAST_DOCUMENT_KEY).await.ok()?;
        let document = match D::from_value(value) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Ignoring unreadable last document: {}", e);
                return None;
            }
        };
        self.current_doc_id = Some(document.document_id());
        self.status = SaveStatus::Saved;
        self.last_save = Some(Instant::now());
        Some(document)
    }

    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.storage.delete(id).await
    }

    /// List all saved document IDs.
    pub async fn list_documents(&self) -> StorageResult<Vec<String>> {
        let mut docs = self.storage.list().await?;
        docs.retain(|id| id != LAST_DOCUMENT_KEY);
        Ok(docs)
    }

    pub async fn exists(&self, id: &str) -> StorageResult<bool> {
        self.storage.exists(id).await
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
