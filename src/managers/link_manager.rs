//! Link Manager for Linkshelf.
//!
//! Implements `LinkManagerTrait`: collection listing plus CRUD, read-status
//! and search over links, backed by a single JSON document on disk.
//!
//! Every mutation is a full read-modify-write of the document. Mutations are
//! serialized by an async write lock so overlapping requests never lose
//! updates. Reads take no lock; the document file is replaced atomically, so
//! they always see the last complete write.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::services::scraper::{fetch_preview, PreviewScraper};
use crate::store::DocumentFile;
use crate::types::errors::StoreError;
use crate::types::link::{
    non_blank, normalize_tags, Collection, Document, LinkItem, LinkPatch, NewLink,
    ALL_COLLECTIONS,
};

/// Trait defining link store operations.
#[async_trait]
pub trait LinkManagerTrait: Send + Sync {
    async fn list_collections(&self) -> Result<Vec<Collection>, StoreError>;
    /// Links in `collection_id`, or every link for `"all"`.
    async fn list_links(&self, collection_id: &str) -> Result<Vec<LinkItem>, StoreError>;
    async fn get_link(&self, id: &str) -> Result<Option<LinkItem>, StoreError>;
    async fn create_link(&self, input: NewLink) -> Result<LinkItem, StoreError>;
    /// Returns `false` when no link has this id.
    async fn delete_link(&self, id: &str) -> Result<bool, StoreError>;
    /// Returns the updated link, or `None` when no link has this id.
    async fn update_link(&self, id: &str, patch: &LinkPatch)
        -> Result<Option<LinkItem>, StoreError>;
    /// Returns the link with its new status, or `None` when no link has this id.
    async fn toggle_read_status(&self, id: &str) -> Result<Option<LinkItem>, StoreError>;
    async fn search(&self, query: &str) -> Result<Vec<LinkItem>, StoreError>;
}

/// Link manager backed by a [`DocumentFile`].
pub struct LinkManager {
    file: DocumentFile,
    scraper: Arc<dyn PreviewScraper>,
    scraper_timeout: Duration,
    write_lock: Mutex<()>,
}

impl LinkManager {
    pub fn new(
        file: DocumentFile,
        scraper: Arc<dyn PreviewScraper>,
        scraper_timeout: Duration,
    ) -> Self {
        Self {
            file,
            scraper,
            scraper_timeout,
            write_lock: Mutex::new(()),
        }
    }

    pub fn document_file(&self) -> &DocumentFile {
        &self.file
    }

    /// Generates a fresh link id.
    fn new_link_id() -> String {
        format!("lk-{}", Uuid::new_v4().simple())
    }

    /// Runs `f` on the document under the write lock.
    ///
    /// `f` returns its result and whether it changed the document; the
    /// document is only rewritten when it did.
    async fn mutate<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Document) -> (T, bool) + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.file.load().await?;
        let (result, changed) = f(&mut document);
        if changed {
            self.file.save(&document).await?;
        }
        Ok(result)
    }

    fn validate(input: &NewLink) -> Result<String, StoreError> {
        let url = input.url.trim();
        if url.is_empty() {
            return Err(StoreError::InvalidInput("url is required".to_string()));
        }
        Url::parse(url).map_err(|e| StoreError::InvalidInput(format!("invalid url '{}': {}", url, e)))?;
        if input.collection_id.trim().is_empty() {
            return Err(StoreError::InvalidInput("collection_id is required".to_string()));
        }
        Ok(url.to_string())
    }
}

#[async_trait]
impl LinkManagerTrait for LinkManager {
    async fn list_collections(&self) -> Result<Vec<Collection>, StoreError> {
        Ok(self.file.load().await?.collections)
    }

    async fn list_links(&self, collection_id: &str) -> Result<Vec<LinkItem>, StoreError> {
        let links = self.file.load().await?.links;
        if collection_id == ALL_COLLECTIONS {
            return Ok(links);
        }
        Ok(links
            .into_iter()
            .filter(|l| l.collection_id == collection_id)
            .collect())
    }

    async fn get_link(&self, id: &str) -> Result<Option<LinkItem>, StoreError> {
        Ok(self.file.load().await?.links.into_iter().find(|l| l.id == id))
    }

    /// Creates a link, newest first.
    ///
    /// The scraper runs before the write lock is taken. User-supplied title
    /// and description win over scraped ones; a failed scrape leaves the
    /// preview empty but still saves the link.
    async fn create_link(&self, input: NewLink) -> Result<LinkItem, StoreError> {
        let url = Self::validate(&input)?;
        let id = Self::new_link_id();

        let preview = fetch_preview(self.scraper.as_ref(), &url, &id, self.scraper_timeout).await;

        let link = LinkItem {
            id,
            url,
            title: input.title.as_deref().and_then(non_blank).or(preview.title),
            description: input
                .description
                .as_deref()
                .and_then(non_blank)
                .or(preview.description),
            tags: normalize_tags(input.tags),
            collection_id: input.collection_id.trim().to_string(),
            is_read: false,
            date_saved: Utc::now(),
            preview_image_url: preview.preview_image_url,
        };

        let stored = link.clone();
        self.mutate(move |doc| {
            doc.links.insert(0, stored);
            ((), true)
        })
        .await?;

        info!(id = %link.id, url = %link.url, collection = %link.collection_id, "link created");
        Ok(link)
    }

    async fn delete_link(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self
            .mutate(|doc| {
                let before = doc.links.len();
                doc.links.retain(|l| l.id != id);
                let removed = doc.links.len() < before;
                (removed, removed)
            })
            .await?;
        if removed {
            info!(id, "link deleted");
        } else {
            debug!(id, "delete: link not found");
        }
        Ok(removed)
    }

    async fn update_link(
        &self,
        id: &str,
        patch: &LinkPatch,
    ) -> Result<Option<LinkItem>, StoreError> {
        let updated = self
            .mutate(|doc| match doc.find_link_mut(id) {
                Some(link) => {
                    patch.apply_to(link);
                    (Some(link.clone()), true)
                }
                None => (None, false),
            })
            .await?;
        if updated.is_some() {
            info!(id, "link updated");
        } else {
            debug!(id, "update: link not found");
        }
        Ok(updated)
    }

    async fn toggle_read_status(&self, id: &str) -> Result<Option<LinkItem>, StoreError> {
        self.mutate(|doc| match doc.find_link_mut(id) {
            Some(link) => {
                link.is_read = !link.is_read;
                debug!(id, is_read = link.is_read, "read status toggled");
                (Some(link.clone()), true)
            }
            None => (None, false),
        })
        .await
    }

    /// Linear, unranked substring scan. A blank query returns every link;
    /// any other query is matched as given, surrounding spaces included.
    async fn search(&self, query: &str) -> Result<Vec<LinkItem>, StoreError> {
        let links = self.file.load().await?.links;
        if query.trim().is_empty() {
            return Ok(links);
        }
        let needle = query.to_lowercase();
        Ok(links.into_iter().filter(|l| l.matches(&needle)).collect())
    }
}
