//! Two-stage retriever: post discovery, merge/rank, reply reattachment.
//!
//! Stage A runs nearest-neighbor search over top-level posts for one or two
//! query variants. Stage B merges the candidate sets, drops weak matches,
//! deduplicates by post identity, and ranks by score. Stage C reattaches
//! each surviving post's reply thread from the side index.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::QueryConfig;
use crate::document::{DocKind, Document, RetrievalResult, ScoredDocument};
use crate::error::Result;
use crate::store::{AttributeFilter, DocumentStore};

/// Over-fetch multiplier for Stage A searches: requesting `2k` candidates
/// leaves room for threshold filtering and deduplication to still fill `k`.
const OVERFETCH_FACTOR: usize = 2;

/// The two-stage retriever over a shared [`DocumentStore`].
///
/// Stateless between queries; safe to share across concurrent callers since
/// it only issues reads against the store.
pub struct Retriever {
    store: Arc<dyn DocumentStore>,
    config: QueryConfig,
}

impl Retriever {
    /// Create a retriever over the given store with explicit configuration.
    pub fn new(store: Arc<dyn DocumentStore>, config: QueryConfig) -> Self {
        Self { store, config }
    }

    /// Return a reference to the retriever configuration.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Retrieve up to `k` relevant posts with their reply threads.
    ///
    /// Searches `primary_query`, and additionally `original_query` when it is
    /// provided and distinct, then merges both candidate sets: candidates
    /// scoring above the relevance threshold or lacking a post id are
    /// dropped, duplicates keep their best (lowest) score, and the survivors
    /// are ranked ascending and truncated to `k`. An empty result is a valid
    /// outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CtiError::Store`](crate::CtiError::Store) if a Stage A
    /// search fails; no meaningful partial result exists in that case. A
    /// failed reply lookup for one post is logged and treated as zero
    /// replies for that post only.
    pub async fn retrieve(
        &self,
        primary_query: &str,
        original_query: Option<&str>,
        k: usize,
    ) -> Result<Vec<RetrievalResult>> {
        let filter = AttributeFilter::new().with("kind", "post");
        let fetch = k * OVERFETCH_FACTOR;

        // Stage A: candidate search under one or two query variants. The
        // rewritten query improves recall on domain terms; the original
        // recovers precision when the rewrite drifts.
        let mut candidates = self.store.search(primary_query, fetch, &filter).await?;
        if let Some(original) = original_query {
            if original != primary_query {
                let extra = self.store.search(original, fetch, &filter).await?;
                candidates.extend(extra);
            }
        }

        // Stage B: threshold filter, dedup by post id keeping the best
        // score, rank ascending, truncate.
        let threshold = self.config.relevance_threshold;
        let mut best: HashMap<String, ScoredDocument> = HashMap::new();
        for candidate in candidates {
            if candidate.score > threshold || candidate.document.post_id.is_empty() {
                continue;
            }
            match best.get(&candidate.document.post_id) {
                Some(kept) if kept.score <= candidate.score => {}
                _ => {
                    best.insert(candidate.document.post_id.clone(), candidate);
                }
            }
        }

        let mut ranked: Vec<ScoredDocument> = best.into_values().collect();
        ranked.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);

        debug!(candidates = ranked.len(), threshold, "ranked post candidates");

        // Stage C: reattach each post's reply thread from the side index.
        let mut results = Vec::with_capacity(ranked.len());
        for scored in ranked {
            let replies = self.lookup_replies(&scored.document.post_id).await;
            results.push(RetrievalResult {
                document: scored.document,
                score: scored.score,
                replies,
            });
        }

        Ok(results)
    }

    /// Look up a post's replies by exact parent id, capped at the configured
    /// maximum and kept in store iteration order.
    ///
    /// A store failure here degrades to an empty thread so one broken lookup
    /// cannot abort the whole retrieval.
    async fn lookup_replies(&self, post_id: &str) -> Vec<Document> {
        match self.store.scan_exact("parent_post_id", post_id).await {
            Ok(mut replies) => {
                replies.retain(|d| d.kind == DocKind::Reply);
                replies.truncate(self.config.max_replies);
                replies
            }
            Err(e) => {
                warn!(post_id, error = %e, "reply lookup failed; continuing without replies");
                Vec::new()
            }
        }
    }
}
