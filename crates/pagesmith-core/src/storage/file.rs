//! One JSON file per document on the local filesystem.

use super::{BoxFuture, Storage, StorageError, StorageResult, StoredDocument};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Documents stored as `<id>.json` files inside one directory.
///
/// Ids map straight onto file names, so only `[A-Za-z0-9_-]` is accepted.
/// Anything else is rejected rather than rewritten, which keeps two
/// distinct ids from landing in the same file.
///
/// Writes go through a temporary file and a rename, so an interrupted save
/// leaves the previous version intact.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    pub fn new(root: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&root).map_err(|e| io_error("create", &root, e))?;
        Ok(Self { root })
    }

    /// Storage under the platform data directory, e.g.
    /// `~/.local/share/pagesmith/documents` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let data = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("No data or home directory available".to_string()))?;
        Self::new(data.join("pagesmith").join("documents"))
    }

    pub fn base_path(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, id: &str) -> StorageResult<PathBuf> {
        validate_id(id)?;
        Ok(self.root.join(format!("{id}.{EXTENSION}")))
    }
}

/// Reject ids that are empty or not a plain file stem.
fn validate_id(id: &str) -> StorageResult<()> {
    let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::Other(format!(
            "Invalid document id {id:?}: only ASCII letters, digits, '-' and '_' are allowed"
        )))
    }
}

fn io_error(action: &str, path: &Path, e: io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {action} {}: {e}", path.display()))
}

fn write_atomic(path: &Path, contents: &str) -> StorageResult<()> {
    let staging = path.with_extension("tmp");
    fs::write(&staging, contents).map_err(|e| io_error("write", &staging, e))?;
    fs::rename(&staging, path).map_err(|e| io_error("replace", path, e))
}

impl Storage for FileStorage {
    fn save(&self, id: &str, document: &Value) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(id);
        let json = serde_json::to_string_pretty(document);
        Box::pin(async move { write_atomic(&path?, &json?) })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Value>> {
        let path = self.document_path(id);
        let id = id.to_owned();
        Box::pin(async move {
            let path = path?;
            match fs::read_to_string(&path) {
                Ok(json) => parse_json(&path, &json),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound(id)),
                Err(e) => Err(io_error("read", &path, e)),
            }
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(id);
        Box::pin(async move {
            let path = path?;
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("Nothing to delete at {}", path.display());
                    Ok(())
                }
                Err(e) => Err(io_error("delete", &path, e)),
            }
        })
    }

    /// Stems of every `.json` file in the directory, sorted.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = match fs::read_dir(&self.root) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => return Err(io_error("list", &self.root, e)),
            };
            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
                .filter_map(|path| path.file_stem()?.to_str().map(str::to_owned))
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.document_path(id);
        Box::pin(async move { Ok(path?.is_file()) })
    }
}

fn parse_json(path: &Path, json: &str) -> StorageResult<Value> {
    serde_json::from_str(json).map_err(|e| {
        StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })
}

fn read_json(path: &Path) -> StorageResult<Value> {
    let json = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;
    parse_json(path, &json)
}

/// Read a document from an arbitrary JSON file.
pub fn import_file<D: StoredDocument>(path: &Path) -> StorageResult<D> {
    let value = read_json(path)?;
    let document = D::from_value(value)?;
    log::info!("Imported document from {}", path.display());
    Ok(document)
}

/// Write a document to an arbitrary JSON file.
pub fn export_file<D: StoredDocument>(document: &D, path: &Path) -> StorageResult<()> {
    let json = serde_json::to_string_pretty(&document.to_value()?)?;
    write_atomic(path, &json)?;
    log::info!("Exported document to {}", path.display());
    Ok(())
}
