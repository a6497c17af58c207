//! The query agent: gate → rewrite → retrieve → format → summarize.
//!
//! [`CtiAgent`] coordinates one analyst query end-to-end. The two abstention
//! outcomes (off-topic question, no relevant evidence) are ordinary
//! successful results with empty sources and distinct fixed messages, so a
//! caller can tell "chose not to look" from "looked and found nothing".
//!
//! # Example
//!
//! ```rust,ignore
//! use cti_rag::{CtiAgent, QueryConfig};
//!
//! let agent = CtiAgent::builder()
//!     .config(QueryConfig::default())
//!     .store(store)
//!     .rewriter(rewriter)
//!     .summarizer(summarizer)
//!     .build()?;
//!
//! let result = agent.analyze("What cracking tools are shared?").await?;
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::QueryConfig;
use crate::context::format_context;
use crate::document::{AnalysisResult, SourceRef};
use crate::error::{CtiError, Result};
use crate::gate::RelevanceGate;
use crate::retriever::Retriever;
use crate::rewrite::{QueryRewriter, build_primary_query, cleanse_rewrite};
use crate::store::DocumentStore;
use crate::summarize::Summarizer;

/// Fixed guidance returned when the relevance gate rejects a question.
pub const OFF_TOPIC_GUIDANCE: &str = "This agent answers analyst questions about the indexed \
channel data. Try a question like: 'What cracking tools are shared?', 'What stolen credentials \
are sold?', or 'What cloud logs are available?'";

/// Build the fixed answer for a retrieval that found nothing under the
/// threshold. Embeds the configured threshold for diagnosability.
fn no_relevant_answer(threshold: f32) -> String {
    format!(
        "No relevant posts found under the relevance threshold ({threshold}). The indexed \
         dataset may not cover this topic; try more specific domain terms."
    )
}

/// The retrieval-augmented query agent.
///
/// Stateless between queries; all shared state lives in the read-only
/// document store, so concurrent `analyze` calls are safe to interleave.
pub struct CtiAgent {
    gate: RelevanceGate,
    rewriter: Arc<dyn QueryRewriter>,
    retriever: Retriever,
    summarizer: Arc<dyn Summarizer>,
}

impl CtiAgent {
    /// Create a new [`CtiAgentBuilder`].
    pub fn builder() -> CtiAgentBuilder {
        CtiAgentBuilder::default()
    }

    /// Return a reference to the agent configuration.
    pub fn config(&self) -> &QueryConfig {
        self.retriever.config()
    }

    /// Answer one analyst question.
    ///
    /// Runs the full pipeline: relevance gate, query rewrite, two-stage
    /// retrieval under both the weighted primary query and the literal
    /// question, context formatting, and summarization. Abstentions are
    /// returned as ordinary results with empty sources.
    ///
    /// # Errors
    ///
    /// Propagates [`CtiError::Model`] when the rewriter or summarizer fails
    /// and [`CtiError::Store`] / [`CtiError::Embedding`] when the search
    /// itself fails. The agent never substitutes a fabricated answer for a
    /// failed collaborator.
    pub async fn analyze(&self, question: &str) -> Result<AnalysisResult> {
        if !self.gate.is_relevant(question) {
            info!(question, "question rejected by relevance gate");
            return Ok(AnalysisResult {
                question: question.to_string(),
                rewritten_query: None,
                answer: OFF_TOPIC_GUIDANCE.to_string(),
                sources: Vec::new(),
            });
        }

        let raw_rewrite = self.rewriter.rewrite(question).await?;
        // Untrusted model output: cleanse, and fall back to the question
        // itself when nothing usable remains.
        let rewritten = cleanse_rewrite(&raw_rewrite).unwrap_or_else(|| question.to_string());
        let primary_query = build_primary_query(question, &rewritten);
        debug!(%rewritten, "search query after rewrite");

        let config = self.retriever.config().clone();
        let results = self.retriever.retrieve(&primary_query, Some(question), config.top_k).await?;

        if results.is_empty() {
            info!(question, threshold = config.relevance_threshold, "retrieval found no post");
            return Ok(AnalysisResult {
                question: question.to_string(),
                rewritten_query: Some(rewritten),
                answer: no_relevant_answer(config.relevance_threshold),
                sources: Vec::new(),
            });
        }

        let context = format_context(&results, config.max_context_results);
        let answer = self.summarizer.summarize(&context, question).await?;

        let sources: Vec<SourceRef> = results
            .iter()
            .take(config.max_context_results)
            .map(|r| SourceRef {
                post_id: r.document.post_id.clone(),
                score: r.score,
                reply_count: r.replies.len(),
                channel: r.document.channel.clone(),
            })
            .collect();

        info!(source_count = sources.len(), "query answered");

        Ok(AnalysisResult {
            question: question.to_string(),
            rewritten_query: Some(rewritten),
            answer,
            sources,
        })
    }
}

/// Builder for constructing a [`CtiAgent`].
///
/// `store`, `rewriter`, and `summarizer` are required; `config` and `gate`
/// default when omitted.
#[derive(Default)]
pub struct CtiAgentBuilder {
    config: Option<QueryConfig>,
    gate: Option<RelevanceGate>,
    store: Option<Arc<dyn DocumentStore>>,
    rewriter: Option<Arc<dyn QueryRewriter>>,
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl CtiAgentBuilder {
    /// Set the query configuration (defaults to [`QueryConfig::default`]).
    pub fn config(mut self, config: QueryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom relevance gate (defaults to the built-in pattern table).
    pub fn gate(mut self, gate: RelevanceGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Set the document store to retrieve from.
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the query rewriter collaborator.
    pub fn rewriter(mut self, rewriter: Arc<dyn QueryRewriter>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }

    /// Set the summarizer collaborator.
    pub fn summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Build the [`CtiAgent`], validating that all required parts are set.
    ///
    /// # Errors
    ///
    /// Returns [`CtiError::Config`] if a required component is missing.
    pub fn build(self) -> Result<CtiAgent> {
        let store =
            self.store.ok_or_else(|| CtiError::Config("store is required".to_string()))?;
        let rewriter =
            self.rewriter.ok_or_else(|| CtiError::Config("rewriter is required".to_string()))?;
        let summarizer = self
            .summarizer
            .ok_or_else(|| CtiError::Config("summarizer is required".to_string()))?;

        let config = self.config.unwrap_or_default();
        let gate = self.gate.unwrap_or_default();

        Ok(CtiAgent { gate, rewriter, retriever: Retriever::new(store, config), summarizer })
    }
}
