//! Document store trait: nearest-neighbor search plus exact attribute scans.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::document::{Document, ScoredDocument};
use crate::error::Result;

/// An attribute-equality filter applied during search.
///
/// Every entry must match the document's corresponding attribute by exact
/// string equality (see [`Document::attribute`]). An empty filter matches
/// every document.
///
/// # Example
///
/// ```rust,ignore
/// let filter = AttributeFilter::new().with("kind", "post");
/// let hits = store.search("cracking tools", 20, &filter).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributeFilter {
    entries: HashMap<String, String>,
}

impl AttributeFilter {
    /// Create an empty filter that matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute-equality constraint.
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(attribute.into(), value.into());
        self
    }

    /// Check whether a document satisfies every constraint.
    pub fn matches(&self, document: &Document) -> bool {
        self.entries.iter().all(|(name, value)| document.attribute(name) == Some(value.as_str()))
    }
}

/// A read-only handle to the ingested document index.
///
/// The query engine issues only reads; concurrent queries from independent
/// callers must be safe to interleave. Index builds and updates are external
/// lifecycle events that are not assumed to happen mid-query.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Nearest-neighbor search for the `k` documents most similar to `query`,
    /// restricted to documents matching `filter`.
    ///
    /// Returns results ordered by ascending distance score (closest first).
    async fn search(
        &self,
        query: &str,
        k: usize,
        filter: &AttributeFilter,
    ) -> Result<Vec<ScoredDocument>>;

    /// Return every document whose `attribute` equals `value` exactly, in
    /// store iteration order.
    ///
    /// Used for reply-thread reattachment. May be implemented as a filtered
    /// full scan or an indexed lookup; only correctness is required.
    async fn scan_exact(&self, attribute: &str, value: &str) -> Result<Vec<Document>>;
}
