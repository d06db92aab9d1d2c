//! # Persistence
//!
//! Saving and loading whole documents. The editor only ever transmits a
//! [`DocumentRecord`] (title plus ordered component records); where it
//! ends up is the repository's business.

use pagecraft_model::DocumentRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Identifier a repository hands out for a saved document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where documents are stored
pub trait DocumentRepository {
    /// Store a new document and return its id
    fn create(&mut self, record: &DocumentRecord) -> Result<DocumentId, PersistenceError>;

    /// Overwrite an existing document
    fn update(&mut self, id: &DocumentId, record: &DocumentRecord) -> Result<(), PersistenceError>;

    fn load(&self, id: &DocumentId) -> Result<DocumentRecord, PersistenceError>;
}

/// In-process repository. Documents go through their JSON form so a load
/// sees exactly what a remote store would return.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    documents: HashMap<DocumentId, String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentRepository for MemoryRepository {
    fn create(&mut self, record: &DocumentRecord) -> Result<DocumentId, PersistenceError> {
        let id = DocumentId::generate();
        self.documents
            .insert(id.clone(), serde_json::to_string(record)?);
        Ok(id)
    }

    fn update(&mut self, id: &DocumentId, record: &DocumentRecord) -> Result<(), PersistenceError> {
        let slot = self
            .documents
            .get_mut(id)
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))?;
        *slot = serde_json::to_string(record)?;
        Ok(())
    }

    fn load(&self, id: &DocumentId) -> Result<DocumentRecord, PersistenceError> {
        let json = self
            .documents
            .get(id)
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))?;
        Ok(DocumentRecord::from_json(json)?)
    }
}

/// Stores each document as `<dir>/<id>.json`
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn write(&self, id: &DocumentId, record: &DocumentRecord) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(id);
        fs::write(&path, record.to_json_pretty()?)?;
        debug!(path = %path.display(), "Wrote document");
        Ok(())
    }
}

impl DocumentRepository for FileRepository {
    fn create(&mut self, record: &DocumentRecord) -> Result<DocumentId, PersistenceError> {
        let id = DocumentId::generate();
        self.write(&id, record)?;
        info!(id = %id, title = %record.title, "Created document");
        Ok(id)
    }

    fn update(&mut self, id: &DocumentId, record: &DocumentRecord) -> Result<(), PersistenceError> {
        if !self.path_for(id).exists() {
            return Err(PersistenceError::NotFound(id.clone()));
        }
        self.write(id, record)
    }

    fn load(&self, id: &DocumentId) -> Result<DocumentRecord, PersistenceError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(PersistenceError::NotFound(id.clone()));
        }
        let json = fs::read_to_string(&path)?;
        Ok(DocumentRecord::from_json(&json)?)
    }
}
