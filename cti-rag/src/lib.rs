//! # cti-rag
//!
//! Retrieval-augmented query engine over scraped forum/chat threat
//! intelligence. Ingested posts and their reply threads live in a
//! [`DocumentStore`]; analyst questions pass a local [`RelevanceGate`], get
//! rewritten into domain search terms, go through two-stage retrieval
//! (semantic post discovery, then exact reply reattachment), and the ranked
//! evidence is formatted into a bounded context for a summarizer model.
//!
//! Ingestion, text cleaning, and index persistence are external concerns;
//! this crate starts at the query string and ends at the
//! [`AnalysisResult`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cti_rag::{CtiAgent, InMemoryDocumentStore, QueryConfig};
//! use cti_rag::ollama::{OllamaEmbeddingProvider, OllamaGenerator};
//!
//! let store = Arc::new(InMemoryDocumentStore::new(Arc::new(
//!     OllamaEmbeddingProvider::new(),
//! )));
//! store.index(&documents).await?;
//!
//! let generator = Arc::new(OllamaGenerator::new());
//! let agent = CtiAgent::builder()
//!     .config(QueryConfig::default())
//!     .store(store)
//!     .rewriter(generator.clone())
//!     .summarizer(generator)
//!     .build()?;
//!
//! let result = agent.analyze("What cracking tools are shared?").await?;
//! ```

pub mod agent;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod gate;
pub mod inmemory;
pub mod retriever;
pub mod rewrite;
pub mod store;
pub mod summarize;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use agent::{CtiAgent, CtiAgentBuilder, OFF_TOPIC_GUIDANCE};
pub use config::{QueryConfig, QueryConfigBuilder};
pub use context::{NO_RELEVANT_CONTEXT, format_context};
pub use document::{
    AnalysisResult, DocKind, Document, PostMetrics, RetrievalResult, ScoredDocument, SourceRef,
};
pub use embedding::EmbeddingProvider;
pub use error::{CtiError, Result};
pub use gate::RelevanceGate;
pub use inmemory::InMemoryDocumentStore;
pub use retriever::Retriever;
pub use rewrite::{QueryRewriter, build_primary_query, cleanse_rewrite};
pub use store::{AttributeFilter, DocumentStore};
pub use summarize::Summarizer;
