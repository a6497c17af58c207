//! Error types for the `cti-rag` crate.

use thiserror::Error;

/// Errors that can occur while answering an analyst query.
///
/// Off-topic questions and empty retrievals are NOT errors; both are
/// expected outcomes surfaced as ordinary [`AnalysisResult`](crate::AnalysisResult)
/// values with distinct answer messages.
#[derive(Debug, Error)]
pub enum CtiError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the document store backend.
    #[error("Document store error ({backend}): {message}")]
    Store {
        /// The store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A language-model collaborator (rewriter or summarizer) failed.
    #[error("Model error ({provider}): {message}")]
    Model {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for query-engine operations.
pub type Result<T> = std::result::Result<T, CtiError>;
