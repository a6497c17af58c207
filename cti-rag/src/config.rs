//! Configuration for the query engine.

use serde::{Deserialize, Serialize};

use crate::error::{CtiError, Result};

/// Configuration parameters for retrieval and context assembly.
///
/// Held by value in the retriever and agent so tests can vary thresholds per
/// case without shared-state interference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryConfig {
    /// Maximum acceptable distance score for a candidate to count as
    /// relevant. Scores are distances: lower is closer, so candidates with
    /// `score > relevance_threshold` are discarded.
    pub relevance_threshold: f32,
    /// Number of ranked posts to retrieve per query.
    pub top_k: usize,
    /// Maximum replies reattached per post.
    pub max_replies: usize,
    /// Maximum posts rendered into the evidence context and cited as
    /// sources.
    pub max_context_results: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { relevance_threshold: 1.0, top_k: 10, max_replies: 5, max_context_results: 5 }
    }
}

impl QueryConfig {
    /// Create a new builder for constructing a [`QueryConfig`].
    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`QueryConfig`].
#[derive(Debug, Clone, Default)]
pub struct QueryConfigBuilder {
    config: QueryConfig,
}

impl QueryConfigBuilder {
    /// Set the maximum acceptable distance score.
    pub fn relevance_threshold(mut self, threshold: f32) -> Self {
        self.config.relevance_threshold = threshold;
        self
    }

    /// Set the number of ranked posts retrieved per query.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the maximum replies reattached per post.
    pub fn max_replies(mut self, max: usize) -> Self {
        self.config.max_replies = max;
        self
    }

    /// Set the maximum posts rendered into the evidence context.
    pub fn max_context_results(mut self, max: usize) -> Self {
        self.config.max_context_results = max;
        self
    }

    /// Build the [`QueryConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`CtiError::Config`] if:
    /// - `top_k == 0`
    /// - `max_context_results == 0`
    /// - `relevance_threshold` is not a positive finite number
    pub fn build(self) -> Result<QueryConfig> {
        if self.config.top_k == 0 {
            return Err(CtiError::Config("top_k must be greater than zero".to_string()));
        }
        if self.config.max_context_results == 0 {
            return Err(CtiError::Config(
                "max_context_results must be greater than zero".to_string(),
            ));
        }
        let threshold = self.config.relevance_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(CtiError::Config(format!(
                "relevance_threshold must be a positive finite distance, got {threshold}"
            )));
        }
        Ok(self.config)
    }
}
