//! Summarizer boundary: the evidence-to-answer collaborator.

use async_trait::async_trait;

use crate::error::Result;

/// A collaborator that produces the final analytic answer from a formatted
/// evidence context and the original question.
///
/// Invoked only when retrieval yielded at least one result; its output is
/// passed through to the caller unmodified. Failures propagate; the engine
/// never substitutes a fabricated answer for a missing collaborator.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the evidence context into an answer to `question`.
    async fn summarize(&self, context: &str, question: &str) -> Result<String>;
}
