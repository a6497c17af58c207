//! Evidence context formatter: ranked results to a bounded text block.

use std::fmt::Write;

use crate::document::RetrievalResult;

/// Sentinel returned for an empty result set.
///
/// The summarizer prompt and the scenario tests both key on this exact
/// literal, so it must stay stable.
pub const NO_RELEVANT_CONTEXT: &str = "NO RELEVANT RESULT FOUND IN THE INDEXED DATASET.";

/// Render ranked retrieval results into an evidence block for the summarizer.
///
/// At most `max_results` results are rendered, in the given order: the cap
/// truncates, it never re-ranks. Each block carries a 1-based source label,
/// the distance score at three decimals, the post identity and channel, the
/// full content, an optional display-only metrics line, and the reply
/// thread (or an explicit no-replies marker). Blocks are joined by a blank
/// line. Pure function: no I/O, inputs untouched.
pub fn format_context(results: &[RetrievalResult], max_results: usize) -> String {
    if results.is_empty() {
        return NO_RELEVANT_CONTEXT.to_string();
    }

    let mut blocks = Vec::with_capacity(results.len().min(max_results));

    for (i, result) in results.iter().take(max_results).enumerate() {
        let doc = &result.document;
        let mut block = String::new();

        let _ = writeln!(block, "== SOURCE {} (relevance: {:.3}) ==", i + 1, result.score);
        let _ = writeln!(
            block,
            "[POST_ID: {}] | CHANNEL: {} | CONTENT: {}",
            doc.post_id, doc.channel, doc.content
        );

        if let Some(metrics) = &doc.metrics {
            let _ = writeln!(block, "  [views: {} | forwards: {}]", metrics.views, metrics.forwards);
        }

        if result.replies.is_empty() {
            let _ = writeln!(block, "  (no replies)");
        } else {
            let _ = writeln!(block, "  -- community reactions --");
            for reply in &result.replies {
                let _ = writeln!(block, "  -> [REPLY_ID: {}] {}", reply.post_id, reply.content);
            }
        }

        blocks.push(block);
    }

    blocks.join("\n")
}
