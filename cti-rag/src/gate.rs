//! Pattern-based relevance gate applied before any retrieval.
//!
//! Retrieval and summarization cost network and model calls; the gate is a
//! cheap local filter that rejects chit-chat before any of that spend, and
//! keeps the engine from fabricating "evidence" for small talk.

use regex::Regex;

use crate::error::{CtiError, Result};

/// Built-in rejection patterns, matched against the trimmed, lowercased
/// question and anchored at the start of the string.
///
/// Extend the table through [`RelevanceGate::with_pattern`] rather than
/// branching in code.
const DEFAULT_PATTERNS: &[&str] = &[
    r"^(hi|hello|hey|yo|howdy)\b",
    r"^good (morning|afternoon|evening|night)\b",
    r"^how are you\b",
    r"^(thanks|thank you|thx|merci)\b",
    r"^(bye|goodbye|see you|farewell)\b",
    r"^(yes|no|yeah|yep|nope|ok|okay|sure|cool|nice|great)$",
    r"^who are you\b",
    r"^(what|how)('s| is| was) the weather\b",
    r"^tell me a joke\b",
    r"^make me laugh\b",
];

/// Minimum whitespace-delimited token count for a question to be considered.
const MIN_TOKENS: usize = 3;

/// A local classifier that rejects off-topic or conversational questions.
///
/// Pure function over a static pattern table: no I/O, no state, identical
/// verdicts across repeated calls.
///
/// # Example
///
/// ```rust,ignore
/// use cti_rag::RelevanceGate;
///
/// let gate = RelevanceGate::new();
/// assert!(!gate.is_relevant("hi"));
/// assert!(gate.is_relevant("What cracking tools are shared?"));
/// ```
#[derive(Debug, Clone)]
pub struct RelevanceGate {
    patterns: Vec<Regex>,
}

impl Default for RelevanceGate {
    fn default() -> Self {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("built-in gate pattern compiles"))
            .collect();
        Self { patterns }
    }
}

impl RelevanceGate {
    /// Create a gate with the built-in pattern table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rejection pattern to the table.
    ///
    /// The pattern is matched against the normalized (trimmed, lowercased)
    /// question; anchor with `^` to reject by prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CtiError::Config`] if the pattern is not a valid regex.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern)
            .map_err(|e| CtiError::Config(format!("invalid gate pattern '{pattern}': {e}")))?;
        self.patterns.push(compiled);
        Ok(self)
    }

    /// Decide whether a question is worth retrieving evidence for.
    ///
    /// Rejects when any table pattern matches the normalized question, or
    /// when the question has fewer than three whitespace-delimited tokens.
    pub fn is_relevant(&self, question: &str) -> bool {
        let normalized = question.trim().to_lowercase();

        if self.patterns.iter().any(|p| p.is_match(&normalized)) {
            return false;
        }

        normalized.split_whitespace().count() >= MIN_TOKENS
    }
}
