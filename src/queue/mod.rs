//! # Queued document store
//!
//! Async front for a document store. Operations are serialized through a
//! `tokio::sync::Mutex`, so at most one runs against the store at a time.
//! There is no parallelism and no cancellation: an operation that acquired
//! the lock runs to completion.
//!
//! Using the wrapped store synchronously while queued operations are pending
//! is not supported; obtain it through `lock` instead.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use crate::document::{DocId, DocumentResult, DocumentStore};
use crate::field::{FieldIndex, TokenIndex};
use crate::query::{SearchOptions, SearchResponse};

/// Cloneable handle serializing operations on one store
#[derive(Debug)]
pub struct QueuedDocumentStore<I = TokenIndex> {
    inner: Arc<Mutex<DocumentStore<I>>>,
}

impl<I> Clone for QueuedDocumentStore<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: FieldIndex> QueuedDocumentStore<I> {
    /// Take ownership of `store`
    pub fn new(store: DocumentStore<I>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Wait for exclusive access to the store
    pub async fn lock(&self) -> MutexGuard<'_, DocumentStore<I>> {
        self.inner.lock().await
    }

    /// Queue `DocumentStore::add`
    pub async fn add(&self, id: impl Into<DocId>, content: Value) -> DocumentResult<()> {
        self.inner.lock().await.add(id, &content)
    }

    /// Queue `DocumentStore::append`
    pub async fn append(&self, id: impl Into<DocId>, content: Value) -> DocumentResult<()> {
        self.inner.lock().await.append(id, &content)
    }

    /// Queue `DocumentStore::update`
    pub async fn update(&self, id: impl Into<DocId>, content: Value) -> DocumentResult<()> {
        self.inner.lock().await.update(id, &content)
    }

    /// Queue `DocumentStore::remove`; false if the id was not present
    pub async fn remove(&self, id: impl Into<DocId>) -> DocumentResult<bool> {
        self.inner.lock().await.remove(id)
    }

    /// Queue a read-only `DocumentStore::search`
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> DocumentResult<SearchResponse> {
        self.inner.lock().await.search(query, options)
    }

    /// True if `id` is present once earlier queued writes have run
    pub async fn contain(&self, id: impl Into<DocId>) -> bool {
        self.inner.lock().await.contain(id)
    }
}
