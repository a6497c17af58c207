//! Data types for ingested documents and retrieval results.

use serde::{Deserialize, Serialize};

/// The kind of an ingested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// A top-level message from a scraped channel.
    Post,
    /// A response to a specific post, linked via `parent_post_id`.
    Reply,
}

impl DocKind {
    /// The attribute value used in store filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Post => "post",
            DocKind::Reply => "reply",
        }
    }
}

/// Display-only engagement counters attached to some posts.
///
/// Never consulted for ranking; rendered into the evidence context so the
/// summarizer can weigh reach when assessing a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetrics {
    /// Number of views reported by the source platform.
    pub views: u64,
    /// Number of forwards reported by the source platform.
    pub forwards: u64,
}

/// A single ingested document, created entirely by the ingestion pipeline.
///
/// Documents are immutable from the query engine's point of view. Identifiers
/// are opaque strings: equality is exact string equality, never numeric
/// coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The text body, already cleaned and split upstream.
    pub content: String,
    /// Whether this is a top-level post or a reply.
    pub kind: DocKind,
    /// The document's own stable identifier. Non-empty for posts; for
    /// replies this is the reply's own identifier.
    pub post_id: String,
    /// For replies, the `post_id` of the owning post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_post_id: Option<String>,
    /// Provenance label (source channel). Display-only.
    pub channel: String,
    /// Optional engagement counters. Display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PostMetrics>,
}

impl Document {
    /// Exact-match attribute lookup used by store filters.
    ///
    /// Returns `None` for unknown attribute names and for `parent_post_id`
    /// on documents that have none, so an equality filter on an absent
    /// attribute never matches.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "kind" => Some(self.kind.as_str()),
            "post_id" => Some(&self.post_id),
            "parent_post_id" => self.parent_post_id.as_deref(),
            "channel" => Some(&self.channel),
            _ => None,
        }
    }
}

/// A document paired with its retrieval score.
///
/// The score is a distance: lower means more similar. It is not a
/// probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// The matched document.
    pub document: Document,
    /// Distance between the query and the document embedding.
    pub score: f32,
}

/// A ranked post with its reattached reply thread.
///
/// Created fresh per query and discarded after formatting; holds no
/// identity beyond the documents it references.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    /// The matched post.
    pub document: Document,
    /// Distance score of the post match (lower = closer).
    pub score: f32,
    /// Replies attached from the side index, capped in length and kept in
    /// store iteration order.
    pub replies: Vec<Document>,
}

/// Source attribution for one retrieved post, as surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    /// Identifier of the cited post.
    pub post_id: String,
    /// Distance score of the post match.
    pub score: f32,
    /// Number of replies that were attached to the post.
    pub reply_count: usize,
    /// Source channel of the post.
    pub channel: String,
}

/// The final outcome of one analyst query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The question as asked.
    pub question: String,
    /// The cleansed rewritten search query, or `None` when the relevance
    /// gate rejected the question before any rewriting happened.
    pub rewritten_query: Option<String>,
    /// The answer text: the summarizer output, or one of the two fixed
    /// abstention messages.
    pub answer: String,
    /// Attribution for the evidence behind the answer; empty on abstention.
    pub sources: Vec<SourceRef>,
}
