//! On-disk JSON document backing the link store.
//!
//! Provides [`DocumentFile`], which reads the whole document and rewrites it
//! in full. Writes go to a sibling temp file that is then renamed over the
//! target, so a concurrent reader sees either the old or the new document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::types::errors::StoreError;
use crate::types::link::{Collection, Document};

/// Handle on the persisted document at a fixed path.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
    seed: Vec<Collection>,
}

impl DocumentFile {
    /// Creates a handle for `path`.
    ///
    /// `seed` is the collection list used when the file does not exist yet.
    pub fn new<P: AsRef<Path>>(path: P, seed: Vec<Collection>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            seed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document.
    ///
    /// A missing file yields the seed document. An unreadable or malformed
    /// file is an error, never an empty document.
    pub async fn load(&self) -> Result<Document, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "document missing, using seed");
                return Ok(Document::with_collections(self.seed.clone()));
            }
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            StoreError::Serialization(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Rewrites the whole document, pretty-printed.
    ///
    /// Creates parent directories if they don't exist.
    pub async fn save(&self, document: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::Io(format!("Failed to create data directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(document).map_err(|e| {
            StoreError::Serialization(format!("Failed to serialize document: {}", e))
        })?;

        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            StoreError::Io(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(
            path = %self.path.display(),
            links = document.links.len(),
            "document written"
        );
        Ok(())
    }

    /// Writes the seed document if no file exists yet.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        let exists = fs::try_exists(&self.path).await.map_err(|e| {
            StoreError::Io(format!("Failed to check {}: {}", self.path.display(), e))
        })?;
        if exists {
            return Ok(());
        }
        info!(path = %self.path.display(), "creating seed document");
        self.save(&Document::with_collections(self.seed.clone())).await
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "dataStore.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
