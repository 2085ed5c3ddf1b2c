//! In-process store used by the test suites.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use mongodb::bson::Document;
use tokio::sync::RwLock;

use super::{DocumentCursor, UserStore};
use crate::error::{Error, Result};

/// Insertion-ordered collection of documents held in memory.
pub struct InMemoryUserStore {
    documents: RwLock<Vec<Document>>,
    unavailable: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
            unavailable: AtomicBool::new(false),
        }
    }

    pub async fn insert(&self, document: Document) {
        self.documents.write().await.push(document);
    }

    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }

    /// Make every subsequent call fail as if the server were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable(
                "Server selection timeout: No available servers".to_string(),
            ));
        }
        Ok(())
    }

    async fn matching(&self, filter: &Document) -> Vec<Document> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .filter(|document| matches(document, filter))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    async fn find(&self, filter: Document) -> Result<DocumentCursor> {
        self.check_available()?;
        let documents = self.matching(&filter).await;
        Ok(stream::iter(documents.into_iter().map(Ok)).boxed())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        self.check_available()?;
        Ok(self.matching(&filter).await.into_iter().next())
    }
}
