//! Query rewriter boundary and defensive cleansing of rewriter output.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;

/// Matches parenthetical asides the rewriter model sometimes appends,
/// e.g. `credential stealer logs (expanded from your question)`.
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern compiles"));

/// A collaborator that turns a natural-language question into a terse
/// domain-specific search string.
///
/// Treated as a black box returning text; output must pass through
/// [`cleanse_rewrite`] before being used as a search query.
#[async_trait]
pub trait QueryRewriter: Send + Sync {
    /// Rewrite an analyst question into a search query.
    async fn rewrite(&self, question: &str) -> Result<String>;
}

/// Sanitize raw rewriter output into a usable search string.
///
/// Collapses to the first line, removes parenthetical asides, strips
/// surrounding quotes, and trims whitespace. Returns `None` when nothing
/// usable remains; callers fall back to the original question.
pub fn cleanse_rewrite(raw: &str) -> Option<String> {
    let first_line = raw.lines().next().unwrap_or("");
    let without_asides = PARENTHETICAL.replace_all(first_line, "");
    let unquoted = without_asides.trim().trim_matches(|c| c == '"' || c == '\'');
    let cleansed = unquoted.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleansed.is_empty() { None } else { Some(cleansed) }
}

/// Build the primary search query from the question and its cleansed rewrite.
///
/// The original question is repeated twice before the rewrite so that the
/// analyst's literal terms outweigh embedding drift introduced by rewriting.
/// The concatenation is fixed and reproducible: scenario tests depend on the
/// exact repetition count and separator.
pub fn build_primary_query(question: &str, cleansed_rewrite: &str) -> String {
    format!("{question} {question} {cleansed_rewrite}")
}
