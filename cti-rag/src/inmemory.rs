//! In-memory document store scored by Euclidean distance.
//!
//! This module provides [`InMemoryDocumentStore`], a store backed by a `Vec`
//! of embedded documents behind a `tokio::sync::RwLock`. It is suitable for
//! development, testing, and datasets that fit comfortably in memory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::document::{Document, ScoredDocument};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::store::{AttributeFilter, DocumentStore};

/// One indexed entry: the document plus its content embedding.
#[derive(Debug, Clone)]
struct Entry {
    document: Document,
    embedding: Vec<f32>,
}

/// An in-memory [`DocumentStore`] that owns its embeddings.
///
/// Documents are kept in insertion order, which defines the iteration order
/// of [`scan_exact`](DocumentStore::scan_exact). Search embeds the query via
/// the composed [`EmbeddingProvider`] and scores candidates by Euclidean
/// distance, so lower scores mean closer matches.
///
/// # Example
///
/// ```rust,ignore
/// use cti_rag::{InMemoryDocumentStore, DocumentStore};
///
/// let store = InMemoryDocumentStore::new(embedder);
/// store.index(&documents).await?;
/// ```
pub struct InMemoryDocumentStore {
    embedder: Arc<dyn EmbeddingProvider>,
    entries: RwLock<Vec<Entry>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store that embeds with the given provider.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder, entries: RwLock::new(Vec::new()) }
    }

    /// Embed and append documents to the index.
    ///
    /// Index building is an external lifecycle event relative to query
    /// processing; callers must not interleave it with live queries.
    ///
    /// # Errors
    ///
    /// Returns [`CtiError::Embedding`](crate::CtiError::Embedding) if the
    /// embedding provider fails; no documents are appended in that case.
    pub async fn index(&self, documents: &[Document]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let mut entries = self.entries.write().await;
        for (document, embedding) in documents.iter().zip(embeddings) {
            entries.push(Entry { document: document.clone(), embedding });
        }

        info!(indexed = documents.len(), total = entries.len(), "indexed documents");
        Ok(())
    }

    /// Number of indexed documents.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the index holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Compute the Euclidean distance between two vectors.
///
/// Dimension mismatches are scored over the shorter prefix; the store only
/// ever compares embeddings produced by the same provider.
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt()
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn search(
        &self,
        query: &str,
        k: usize,
        filter: &AttributeFilter,
    ) -> Result<Vec<ScoredDocument>> {
        let query_embedding = self.embedder.embed(query).await?;

        let entries = self.entries.read().await;
        let mut scored: Vec<ScoredDocument> = entries
            .iter()
            .filter(|entry| filter.matches(&entry.document))
            .map(|entry| ScoredDocument {
                document: entry.document.clone(),
                score: euclidean_distance(&entry.embedding, &query_embedding),
            })
            .collect();

        scored.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }

    async fn scan_exact(&self, attribute: &str, value: &str) -> Result<Vec<Document>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.document.attribute(attribute) == Some(value))
            .map(|entry| entry.document.clone())
            .collect())
    }
}
